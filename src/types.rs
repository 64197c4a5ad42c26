//! This module defines the core data structures and types used throughout the crate:
//! the validated machine description, its transition rules, and the error types raised
//! while loading and validating a description.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A single tape symbol.
pub type Symbol = char;

/// Rule lists keyed by source state, in the order the states appear in `transitions`.
pub type Transitions = Vec<(String, Vec<TransitionRule>)>;

/// The maximum allowed size for a machine description file in bytes.
pub const MAX_DESCRIPTION_SIZE: usize = 1024 * 1024; // 1MB

/// A fully validated Turing Machine description.
///
/// Values of this type only come out of [`crate::validate`], so every invariant
/// (initial and final states are declared, rules only use alphabet symbols and
/// declared states, no state reacts twice to the same symbol) holds for the
/// lifetime of the value. The description is never mutated after it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineDescription {
    pub(crate) name: String,
    pub(crate) alphabet: Vec<Symbol>,
    pub(crate) blank: Symbol,
    pub(crate) states: Vec<String>,
    pub(crate) initial: String,
    pub(crate) finals: Vec<String>,
    #[serde(serialize_with = "serialize_transitions")]
    pub(crate) transitions: Transitions,
}

impl MachineDescription {
    /// The name of the machine.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tape alphabet, in declaration order.
    pub fn alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    /// The blank symbol.
    pub fn blank(&self) -> Symbol {
        self.blank
    }

    /// All declared states, in declaration order.
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// The state the machine starts in.
    pub fn initial(&self) -> &str {
        &self.initial
    }

    /// The halting states.
    pub fn finals(&self) -> &[String] {
        &self.finals
    }

    /// Transition rules keyed by source state, in document order.
    ///
    /// A state without an entry has no outgoing rules.
    pub fn transitions(&self) -> &[(String, Vec<TransitionRule>)] {
        &self.transitions
    }

    /// Returns the rules of `state` in source order, if any were listed.
    pub fn rules_for(&self, state: &str) -> Option<&[TransitionRule]> {
        self.transitions
            .iter()
            .find_map(|(s, rules)| (s == state).then_some(rules.as_slice()))
    }

    /// Checks if `state` is one of the final states.
    pub fn is_final(&self, state: &str) -> bool {
        self.finals.iter().any(|s| s == state)
    }
}

/// Writes the transitions as a JSON object, keeping their order.
fn serialize_transitions<S>(transitions: &Transitions, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(transitions.iter().map(|(state, rules)| (state, rules)))
}

/// A single transition rule: when the head reads `read`, write `write`,
/// move in `action` and continue in `to_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionRule {
    pub read: Symbol,
    pub to_state: String,
    pub write: Symbol,
    pub action: Direction,
}

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// The token used for this direction in JSON descriptions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }
}

/// The reasons a JSON document can be rejected as a machine description.
///
/// Validation stops at the first violation, so exactly one of these is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The top-level object declares the same key more than once.
    #[error("Duplicate top-level key: \"{0}\"")]
    DuplicateKey(String),
    /// A mandatory field is absent.
    #[error("Missing field: {0}")]
    MissingField(String),
    /// A field is present but has the wrong JSON type.
    #[error("Invalid field {field}: expected {expected}")]
    InvalidType {
        field: String,
        expected: &'static str,
    },
    /// Alphabet entries that are not exactly one character long.
    #[error("Alphabet symbols must be exactly one character: {0:?}")]
    InvalidAlphabetSymbols(Vec<String>),
    /// The blank symbol is not exactly one character long.
    #[error("Blank symbol must be exactly one character: {0:?}")]
    InvalidBlankSymbol(String),
    #[error("Initial state {0:?} is not declared in states")]
    InitialStateNotInStates(String),
    #[error("Final state {0:?} is not declared in states")]
    FinalStateNotInStates(String),
    /// A state is listed twice as a key of `transitions`.
    #[error("Duplicate state {0:?} in transitions")]
    DuplicateTransitionState(String),
    #[error("Invalid read symbol {symbol:?} in state {state:?}: not in alphabet")]
    InvalidReadSymbol { state: String, symbol: String },
    #[error("Invalid write symbol {symbol:?} in state {state:?}: not in alphabet")]
    InvalidWriteSymbol { state: String, symbol: String },
    #[error("Invalid state {to_state:?} in transitions of {state:?}: not declared in states")]
    InvalidToState { state: String, to_state: String },
    /// Two rules of one state are triggered by the same symbol.
    #[error("Duplicate read symbol {symbol:?} in transitions of {state:?}")]
    DuplicateReadSymbol { state: String, symbol: Symbol },
    #[error("Invalid action {action:?} in transitions of {state:?}: expected RIGHT or LEFT")]
    InvalidAction { state: String, action: String },
}

/// Represents the errors that can occur while turning a file or string into a
/// [`MachineDescription`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// Indicates an error related to file system operations.
    #[error("File error: {0}")]
    FileError(String),
    /// The content is not well-formed JSON (or not a JSON object).
    #[error("JSON error: {0}")]
    JsonError(String),
    /// The JSON document is not a valid machine description.
    #[error("Invalid machine description: {0}")]
    ValidationError(#[from] ValidationError),
    /// No built-in machine matches the requested name or index.
    #[error("Unknown machine: {0}")]
    UnknownMachine(String),
}

impl From<serde_json::Error> for TuringMachineError {
    fn from(error: serde_json::Error) -> Self {
        TuringMachineError::JsonError(error.to_string())
    }
}
