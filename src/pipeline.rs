use std::path::PathBuf;

use serde_json::Value;
use tracing::info;

use crate::errors::TelemetryError;
use crate::input::load_document;
use crate::model::UnifiedRecord;
use crate::parsers::{self, SourceFormat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub format: SourceFormat,
    pub path: PathBuf,
}

impl Source {
    pub fn new(format: SourceFormat, path: impl Into<PathBuf>) -> Self {
        Self {
            format,
            path: path.into(),
        }
    }
}

/// Load every source, then map each one. Nothing is mapped unless all
/// documents load.
pub fn run(sources: &[Source]) -> Result<Vec<UnifiedRecord>, TelemetryError> {
    let documents = sources
        .iter()
        .map(|source| load_document(&source.path))
        .collect::<Result<Vec<_>, _>>()?;
    info!(count = documents.len(), "data files loaded");

    let batches = sources
        .iter()
        .zip(&documents)
        .map(|(source, document)| transform(source.format, document))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(merge(batches))
}

pub fn transform(format: SourceFormat, document: &Value) -> Result<Vec<UnifiedRecord>, TelemetryError> {
    let records = parsers::to_unified(format, document)?;
    info!(format = %format, records = records.len(), "transformed records");
    Ok(records)
}

/// Concatenate batches in the order given; records inside a batch keep
/// their order too. Downstream consumers rely on this ordering.
pub fn merge(batches: Vec<Vec<UnifiedRecord>>) -> Vec<UnifiedRecord> {
    let total: usize = batches.iter().map(Vec::len).sum();
    let mut result = Vec::with_capacity(total);
    for mut batch in batches {
        result.append(&mut batch);
    }
    result
}
