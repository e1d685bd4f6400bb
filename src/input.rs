use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::errors::TelemetryError;

/// Read and parse one JSON document. A missing file is reported as
/// `DocumentMissing` rather than an empty document.
pub fn load_document(path: &Path) -> Result<Value, TelemetryError> {
    let content = fs::read_to_string(path).map_err(|e| TelemetryError::read_failed(path, e))?;
    let document = serde_json::from_str(&content).map_err(|source| TelemetryError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "loaded document");
    Ok(document)
}
