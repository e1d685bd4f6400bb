use std::path::PathBuf;

use thiserror::Error;

use crate::parsers::SourceFormat;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("input document {} not found", path.display())]
    DocumentMissing { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("fixture {} has no valid `unified_telemetry` list: {source}", path.display())]
    InvalidFixture {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{format} document invalid: {reason}")]
    InvalidDocument {
        format: SourceFormat,
        reason: String,
    },

    #[error("invalid ISO timestamp {value:?}: {reason}")]
    MalformedTimestamp { value: String, reason: String },

    #[error("{format} record {index}: {source}")]
    Record {
        format: SourceFormat,
        index: usize,
        #[source]
        source: Box<TelemetryError>,
    },

    #[error("{format} record {index} is missing field `{field}`")]
    MissingField {
        format: SourceFormat,
        index: usize,
        field: &'static str,
    },

    #[error("{format} record {index} field `{field}` is not a {expected}")]
    InvalidField {
        format: SourceFormat,
        index: usize,
        field: &'static str,
        expected: &'static str,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TelemetryError {
    pub fn read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            TelemetryError::DocumentMissing { path }
        } else {
            TelemetryError::Io { path, source }
        }
    }
}
