//! This module provides the `DescriptionLoader` struct, responsible for loading machine
//! descriptions from various sources, including files, strings and directories.

use crate::document::Document;
use crate::types::{MachineDescription, TuringMachineError, MAX_DESCRIPTION_SIZE};
use crate::validator::validate;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// `DescriptionLoader` is a utility struct for loading machine descriptions.
/// It reads JSON from files or strings, parses it into a [`Document`] and validates it.
pub struct DescriptionLoader;

impl DescriptionLoader {
    /// Loads a single machine description from the specified file path.
    ///
    /// # Arguments
    ///
    /// * `path` - A reference to the `Path` of the `.json` file to load.
    ///
    /// # Returns
    ///
    /// * `Ok(MachineDescription)` if the file is read, parsed and validated.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read or is too large.
    /// * `Err(TuringMachineError::JsonError)` if the content is not a JSON object.
    /// * `Err(TuringMachineError::ValidationError)` if the description is invalid.
    pub fn load_description(path: &Path) -> Result<MachineDescription, TuringMachineError> {
        let read_error = |e: std::io::Error| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        };

        // Refuse oversized files before reading them into memory.
        let size = fs::metadata(path).map_err(read_error)?.len();
        if size > MAX_DESCRIPTION_SIZE as u64 {
            return Err(TuringMachineError::FileError(format!(
                "File {} exceeds the maximum description size of {} bytes",
                path.display(),
                MAX_DESCRIPTION_SIZE
            )));
        }

        let content = fs::read_to_string(path).map_err(read_error)?;

        info!("loading machine description from {}", path.display());
        Self::load_description_from_string(&content)
    }

    /// Loads a single machine description from the provided JSON text.
    pub fn load_description_from_string(
        content: &str,
    ) -> Result<MachineDescription, TuringMachineError> {
        let document: Document = content.parse()?;

        Ok(validate(&document)?)
    }

    /// Loads every machine description (`.json` extension) found in a directory.
    ///
    /// Directories and non-`.json` files are skipped. The result holds one entry
    /// per candidate file, either the loaded description with its path or the
    /// error that prevented loading it.
    pub fn load_descriptions(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, MachineDescription), TuringMachineError>> {
        if !directory.exists() {
            return vec![Err(TuringMachineError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(TuringMachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let path = match entry {
                    Ok(entry) => entry.path(),
                    Err(e) => {
                        return Some(Err(TuringMachineError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                if path.is_dir() || path.extension().is_none_or(|ext| ext != "json") {
                    return None;
                }

                match Self::load_description(&path) {
                    Ok(description) => Some(Ok((path, description))),
                    Err(e) => Some(Err(TuringMachineError::FileError(format!(
                        "Failed to load description from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}
