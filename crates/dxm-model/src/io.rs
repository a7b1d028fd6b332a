use std::fs;
use std::path::Path;

use dxm_core::errors::{DxmError, ErrorInfo};

use crate::list::ExperimentList;
use crate::serialization::{list_from_json, list_to_json};

/// Writes the collection to `path` as JSON, creating parent directories
/// as needed.
pub fn write_json_file(list: &ExperimentList, path: impl AsRef<Path>) -> Result<(), DxmError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            DxmError::Serde(
                ErrorInfo::new("file-create", "failed to create output directory")
                    .with_context("path", parent.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?;
    }
    let json = list_to_json(list)?;
    fs::write(path, json).map_err(|err| {
        DxmError::Serde(
            ErrorInfo::new("file-write", "failed to write experiment list")
                .with_context("path", path.display().to_string())
                .with_hint(err.to_string()),
        )
    })
}

/// Reads a collection previously written with [`write_json_file`].
pub fn read_json_file(path: impl AsRef<Path>) -> Result<ExperimentList, DxmError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|err| {
        DxmError::Serde(
            ErrorInfo::new("file-read", "failed to read experiment list")
                .with_context("path", path.display().to_string())
                .with_hint(err.to_string()),
        )
    })?;
    list_from_json(&json)
}
