//! Assembly of the final [`MachineDescription`] from parts that already passed validation.

use crate::types::{MachineDescription, Symbol, TransitionRule, Transitions};

/// Collects validated fields and turns them into a [`MachineDescription`].
///
/// The builder performs no checks of its own. It is only constructed by the
/// validator once every field has been accepted, which keeps partially valid
/// descriptions out of reach of callers.
#[derive(Debug)]
pub(crate) struct DescriptionBuilder {
    name: String,
    alphabet: Vec<Symbol>,
    blank: Symbol,
    states: Vec<String>,
    initial: String,
    finals: Vec<String>,
    transitions: Transitions,
}

impl DescriptionBuilder {
    pub(crate) fn new(
        name: String,
        alphabet: Vec<Symbol>,
        blank: Symbol,
        states: Vec<String>,
        initial: String,
        finals: Vec<String>,
    ) -> Self {
        Self {
            name,
            alphabet,
            blank,
            states,
            initial,
            finals,
            transitions: Vec::new(),
        }
    }

    /// Appends the rule list of `state`. States keep the order they are added in.
    pub(crate) fn rules(mut self, state: String, rules: Vec<TransitionRule>) -> Self {
        self.transitions.push((state, rules));
        self
    }

    pub(crate) fn build(self) -> MachineDescription {
        MachineDescription {
            name: self.name,
            alphabet: self.alphabet,
            blank: self.blank,
            states: self.states,
            initial: self.initial,
            finals: self.finals,
            transitions: self.transitions,
        }
    }
}
