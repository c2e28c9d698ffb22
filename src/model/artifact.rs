use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

/// Reads and deserializes one JSON artifact produced by the training pipeline.
///
/// A missing or malformed file is an `Artifact` error; callers treat it as
/// fatal at startup.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("Loading artifact: {}", path.display());

    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::artifact(format!("failed to read {}: {}", path.display(), e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| Error::artifact(format!("failed to parse {}: {}", path.display(), e)))
}
