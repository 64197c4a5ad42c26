//! Built-in machine descriptions, embedded at compile time and validated on first use.

use crate::loader::DescriptionLoader;
use crate::types::{MachineDescription, TuringMachineError};
use log::warn;

// Default embedded machines
const MACHINE_TEXTS: [&str; 4] = [
    include_str!("../machines/unary_add.json"),
    include_str!("../machines/unary_sub.json"),
    include_str!("../machines/palindrome.json"),
    include_str!("../machines/zero_2n.json"),
];

lazy_static::lazy_static! {
    pub static ref MACHINES: Vec<MachineDescription> = MACHINE_TEXTS
        .iter()
        .enumerate()
        .filter_map(|(index, text)| match DescriptionLoader::load_description_from_string(text) {
            Ok(description) => Some(description),
            Err(e) => {
                warn!("skipping built-in machine #{index}: {e}");
                None
            }
        })
        .collect();
}

pub struct MachineCatalog;

impl MachineCatalog {
    /// Get the number of available machines
    pub fn get_machine_count() -> usize {
        MACHINES.len()
    }

    /// Get a machine by its index
    pub fn get_machine_by_index(index: usize) -> Result<MachineDescription, TuringMachineError> {
        MACHINES.get(index).cloned().ok_or_else(|| {
            TuringMachineError::UnknownMachine(format!("index {} out of range", index))
        })
    }

    /// Get a machine by its name
    pub fn get_machine_by_name(name: &str) -> Result<MachineDescription, TuringMachineError> {
        MACHINES
            .iter()
            .find(|machine| machine.name() == name)
            .cloned()
            .ok_or_else(|| TuringMachineError::UnknownMachine(format!("'{}' not found", name)))
    }

    /// List all machine names
    pub fn list_machine_names() -> Vec<String> {
        MACHINES
            .iter()
            .map(|machine| machine.name().to_string())
            .collect()
    }

    /// Get the JSON source of a machine by its index
    pub fn get_machine_text_by_index(index: usize) -> Result<&'static str, TuringMachineError> {
        MACHINE_TEXTS.get(index).copied().ok_or_else(|| {
            TuringMachineError::UnknownMachine(format!("text index {} out of range", index))
        })
    }
}
