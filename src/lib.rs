//! This crate turns JSON documents describing Turing Machines into validated,
//! immutable machine descriptions. It includes modules for extracting and validating
//! the fields of a description, loading descriptions from files, rendering them for
//! humans, and a collection of built-in sample machines.

mod builder;
pub mod catalog;
pub mod document;
pub mod extractor;
pub mod loader;
pub mod report;
pub mod types;
pub mod validator;

/// Re-exports `MachineCatalog` and `MACHINES` from the catalog module.
pub use catalog::{MachineCatalog, MACHINES};
/// Re-exports the `Document` struct from the document module.
pub use document::Document;
/// Re-exports the `DescriptionLoader` struct from the loader module.
pub use loader::DescriptionLoader;
/// Re-exports the types describing a validated machine and its errors.
pub use types::{
    Direction, MachineDescription, Symbol, TransitionRule, Transitions, TuringMachineError,
    ValidationError, MAX_DESCRIPTION_SIZE,
};
/// Re-exports the `validate` function from the validator module.
pub use validator::validate;
