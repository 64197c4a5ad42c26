//! This module validates a JSON [`Document`] into a [`MachineDescription`].
//!
//! Fields are extracted and checked in a fixed order, and validation stops at the
//! first violation:
//!
//! 1. no duplicate top-level keys
//! 2. `name`
//! 3. `alphabet`, every entry exactly one character
//! 4. `blank`, exactly one character
//! 5. `states`
//! 6. `initial`, declared in `states`
//! 7. `finals`, every entry declared in `states`
//! 8. `transitions`, state by state in document order, rule by rule; a state
//!    may appear only once as a key
//!
//! The order decides which error surfaces when a document breaks several
//! invariants at once, so it must not be rearranged.

use crate::builder::DescriptionBuilder;
use crate::document::Document;
use crate::extractor::{as_array, as_object, members_field, string_field, string_list_field};
use crate::types::{Direction, MachineDescription, Symbol, TransitionRule, ValidationError};
use log::debug;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Validates `document` and builds the machine description it describes.
///
/// # Arguments
///
/// * `document` - The parsed top-level JSON object.
///
/// # Returns
///
/// * `Ok(MachineDescription)` if every field is present and every invariant holds.
/// * `Err(ValidationError)` describing the first violation found.
pub fn validate(document: &Document) -> Result<MachineDescription, ValidationError> {
    check_unique_keys(document)?;

    let name = string_field(document, "name", "name")?;
    debug!("validating machine description {name:?}");

    let alphabet = check_alphabet(string_list_field(document, "alphabet", "alphabet")?)?;
    let blank = check_blank(string_field(document, "blank", "blank")?)?;
    let states = string_list_field(document, "states", "states")?;
    let initial = check_initial(string_field(document, "initial", "initial")?, &states)?;
    let finals = check_finals(string_list_field(document, "finals", "finals")?, &states)?;
    debug!(
        "{name}: {} symbols, {} states, {} finals",
        alphabet.len(),
        states.len(),
        finals.len()
    );

    let mut transitions = Vec::new();
    let mut seen_states = HashSet::new();
    for (state, rules) in members_field(document, "transitions", "transitions")?.iter() {
        if !seen_states.insert(state) {
            return Err(ValidationError::DuplicateTransitionState(state.to_string()));
        }

        let rules = build_state_rules(state, rules, &alphabet, &states)?;
        debug!("{name}: state {state:?} has {} rules", rules.len());
        transitions.push((state.to_string(), rules));
    }

    let builder = DescriptionBuilder::new(name, alphabet, blank, states, initial, finals);

    Ok(transitions
        .into_iter()
        .fold(builder, |builder, (state, rules)| builder.rules(state, rules))
        .build())
}

/// Rejects a document that declares any top-level key twice.
fn check_unique_keys(document: &Document) -> Result<(), ValidationError> {
    match document.duplicate_key() {
        Some(key) => Err(ValidationError::DuplicateKey(key.to_string())),
        None => Ok(()),
    }
}

/// Converts the alphabet entries into symbols, reporting every entry that is
/// not exactly one character long.
fn check_alphabet(entries: Vec<String>) -> Result<Vec<Symbol>, ValidationError> {
    let (symbols, invalid): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .map(|entry| as_symbol(&entry).ok_or(entry))
        .partition(Result::is_ok);

    if !invalid.is_empty() {
        return Err(ValidationError::InvalidAlphabetSymbols(
            invalid.into_iter().filter_map(Result::err).collect(),
        ));
    }

    Ok(symbols.into_iter().filter_map(Result::ok).collect())
}

/// The blank must be a single character. It is not required to be part of the alphabet.
fn check_blank(blank: String) -> Result<Symbol, ValidationError> {
    as_symbol(&blank).ok_or(ValidationError::InvalidBlankSymbol(blank))
}

fn check_initial(initial: String, states: &[String]) -> Result<String, ValidationError> {
    if !states.contains(&initial) {
        return Err(ValidationError::InitialStateNotInStates(initial));
    }

    Ok(initial)
}

/// Reports the first final state, in list order, that is not declared.
fn check_finals(finals: Vec<String>, states: &[String]) -> Result<Vec<String>, ValidationError> {
    if let Some(unknown) = finals.iter().find(|state| !states.contains(state)) {
        return Err(ValidationError::FinalStateNotInStates(unknown.clone()));
    }

    Ok(finals)
}

/// Builds the rule list of a single state, keeping the source order of its rules.
///
/// Reads are tracked in a set that lives only for this state: two different
/// states may each have a rule for the same symbol. For every rule the checks
/// run as read, write, target state, duplicate read, then action.
fn build_state_rules(
    state: &str,
    rules: &Value,
    alphabet: &[Symbol],
    states: &[String],
) -> Result<Vec<TransitionRule>, ValidationError> {
    let path = format!("transitions.{state}");
    let mut seen_reads = HashSet::new();
    let mut built = Vec::new();

    for (index, rule) in as_array(rules, &path)?.iter().enumerate() {
        let path = format!("{path}[{index}]");
        let fields = RuleFields::extract(as_object(rule, &path)?, &path)?;

        let read = alphabet_symbol(&fields.read, alphabet).ok_or_else(|| {
            ValidationError::InvalidReadSymbol {
                state: state.to_string(),
                symbol: fields.read.clone(),
            }
        })?;

        let write = alphabet_symbol(&fields.write, alphabet).ok_or_else(|| {
            ValidationError::InvalidWriteSymbol {
                state: state.to_string(),
                symbol: fields.write.clone(),
            }
        })?;

        if !states.contains(&fields.to_state) {
            return Err(ValidationError::InvalidToState {
                state: state.to_string(),
                to_state: fields.to_state,
            });
        }

        if !seen_reads.insert(read) {
            return Err(ValidationError::DuplicateReadSymbol {
                state: state.to_string(),
                symbol: read,
            });
        }

        let action = parse_direction(state, fields.action)?;

        built.push(TransitionRule {
            read,
            to_state: fields.to_state,
            write,
            action,
        });
    }

    Ok(built)
}

/// The raw string members of one rule object.
struct RuleFields {
    read: String,
    to_state: String,
    write: String,
    action: String,
}

impl RuleFields {
    fn extract(rule: &Map<String, Value>, path: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            read: string_field(rule, "read", &format!("{path}.read"))?,
            to_state: string_field(rule, "to_state", &format!("{path}.to_state"))?,
            write: string_field(rule, "write", &format!("{path}.write"))?,
            action: string_field(rule, "action", &format!("{path}.action"))?,
        })
    }
}

/// Parses a head movement. Only the literal tokens `RIGHT` and `LEFT` are accepted.
fn parse_direction(state: &str, action: String) -> Result<Direction, ValidationError> {
    match action.as_str() {
        "RIGHT" => Ok(Direction::Right),
        "LEFT" => Ok(Direction::Left),
        _ => Err(ValidationError::InvalidAction {
            state: state.to_string(),
            action,
        }),
    }
}

/// Returns the only character of `input`, or `None` if it is empty or longer.
fn as_symbol(input: &str) -> Option<Symbol> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Some(symbol),
        _ => None,
    }
}

/// Returns the symbol spelled by `input` if it belongs to `alphabet`.
fn alphabet_symbol(input: &str, alphabet: &[Symbol]) -> Option<Symbol> {
    as_symbol(input).filter(|symbol| alphabet.contains(symbol))
}
