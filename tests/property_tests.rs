//! Property-based tests for description validation.
//!
//! These tests use proptest to generate machine descriptions and verify that
//! validation accepts, rejects and round-trips them consistently.

use proptest::prelude::*;
use serde_json::{json, Map, Value};
use tm_validator::{validate, Document, ValidationError};

const SYMBOLS: &[char] = &['0', '1', '.', '+', '-', '=', 'a', 'b', 'x', 'y'];

/// A well-formed machine: symbols and states are distinct, and every state has
/// at most one rule per symbol.
#[derive(Debug, Clone)]
struct MachineSpec {
    alphabet: Vec<char>,
    states: Vec<String>,
    initial: usize,
    finals: Vec<usize>,
    // (from, read, to, write, right)
    rules: Vec<(usize, usize, usize, usize, bool)>,
}

impl MachineSpec {
    fn to_value(&self) -> Value {
        let mut transitions = Map::new();

        for (from, read, to, write, right) in &self.rules {
            let action = if *right { "RIGHT" } else { "LEFT" };
            let rule = json!({
                "read": self.alphabet[*read].to_string(),
                "to_state": self.states[*to],
                "write": self.alphabet[*write].to_string(),
                "action": action,
            });

            transitions
                .entry(self.states[*from].clone())
                .or_insert_with(|| json!([]))
                .as_array_mut()
                .unwrap()
                .push(rule);
        }

        json!({
            "name": "generated",
            "alphabet": self.alphabet.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
            "blank": self.alphabet[0].to_string(),
            "states": self.states,
            "initial": self.states[self.initial],
            "finals": self.finals.iter().map(|&i| self.states[i].clone()).collect::<Vec<_>>(),
            "transitions": transitions,
        })
    }
}

fn to_document(value: Value) -> Document {
    match value {
        Value::Object(map) => Document::from(map),
        _ => panic!("generated machine must be an object"),
    }
}

prop_compose! {
    fn arbitrary_machine()
        (symbol_count in 1..=SYMBOLS.len(), state_count in 1..6usize)
        (
            alphabet in Just(SYMBOLS[..symbol_count].to_vec()),
            states in Just((0..state_count).map(|i| format!("q{i}")).collect::<Vec<_>>()),
            initial in 0..state_count,
            finals in prop::collection::vec(0..state_count, 0..3),
            rules in prop::collection::btree_map(
                (0..state_count, 0..symbol_count),
                (0..state_count, 0..symbol_count, any::<bool>()),
                0..12,
            ),
        ) -> MachineSpec
    {
        MachineSpec {
            alphabet,
            states,
            initial,
            finals,
            rules: rules
                .into_iter()
                .map(|((from, read), (to, write, right))| (from, read, to, write, right))
                .collect(),
        }
    }
}

proptest! {
    #[test]
    fn prop_valid_machines_are_accepted(machine in arbitrary_machine()) {
        let description = validate(&to_document(machine.to_value())).unwrap();

        prop_assert!(description.states().iter().any(|s| s == description.initial()));
        for state in description.finals() {
            prop_assert!(description.states().contains(state));
        }
        prop_assert_eq!(description.alphabet(), machine.alphabet.as_slice());

        let rule_count: usize = description
            .transitions()
            .iter()
            .map(|(_, rules)| rules.len())
            .sum();
        prop_assert_eq!(rule_count, machine.rules.len());
    }

    #[test]
    fn prop_validation_is_idempotent(machine in arbitrary_machine()) {
        let document = to_document(machine.to_value());
        prop_assert_eq!(validate(&document), validate(&document));
    }

    #[test]
    fn prop_serialized_description_validates_to_itself(machine in arbitrary_machine()) {
        let description = validate(&to_document(machine.to_value())).unwrap();
        let value = serde_json::to_value(&description).unwrap();

        prop_assert_eq!(validate(&to_document(value)), Ok(description));
    }

    #[test]
    fn prop_long_alphabet_entries_are_rejected(
        machine in arbitrary_machine(),
        entry in "[a-z]{2,4}",
    ) {
        let mut value = machine.to_value();
        value["alphabet"].as_array_mut().unwrap().push(json!(entry.clone()));

        prop_assert_eq!(
            validate(&to_document(value)),
            Err(ValidationError::InvalidAlphabetSymbols(vec![entry]))
        );
    }

    #[test]
    fn prop_duplicate_reads_are_rejected(machine in arbitrary_machine()) {
        let mut value = machine.to_value();
        let state = machine.states[machine.initial].clone();
        let rule = json!({
            "read": machine.alphabet[0].to_string(),
            "to_state": state,
            "write": machine.alphabet[0].to_string(),
            "action": "RIGHT",
        });

        let transitions = value["transitions"].as_object_mut().unwrap();
        // Replace whatever the generator produced with two rules on the same read.
        transitions.insert(state.clone(), json!([rule.clone(), rule]));

        prop_assert_eq!(
            validate(&to_document(value)),
            Err(ValidationError::DuplicateReadSymbol {
                state,
                symbol: machine.alphabet[0],
            })
        );
    }

    #[test]
    fn prop_duplicate_top_level_keys_are_rejected(
        machine in arbitrary_machine(),
        key in prop::sample::select(vec![
            "name", "alphabet", "blank", "states", "initial", "finals", "transitions",
        ]),
    ) {
        let value = machine.to_value();
        let mut text = serde_json::to_string(&value).unwrap();
        // Re-open the object and repeat one member with a bogus value.
        text.pop();
        text.push_str(&format!(",\"{key}\":null}}"));

        let document: Document = text.parse().unwrap();
        prop_assert_eq!(
            validate(&document),
            Err(ValidationError::DuplicateKey(key.to_string()))
        );
    }
}
