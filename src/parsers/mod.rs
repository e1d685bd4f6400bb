pub mod common;
pub mod format_a;
pub mod format_b;

use std::fmt;

use clap::ValueEnum;
use serde_json::Value;

use crate::errors::TelemetryError;
use crate::model::UnifiedRecord;

/// Input schemas the normalizer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SourceFormat {
    /// Named fields, ISO-8601 timestamps, listed under `telemetry`.
    #[value(alias = "format-a")]
    A,
    /// Abbreviated fields, epoch-millisecond timestamps, listed under `sensors`.
    #[value(alias = "format-b")]
    B,
}

impl SourceFormat {
    pub fn name(&self) -> &'static str {
        match self {
            SourceFormat::A => "format-a",
            SourceFormat::B => "format-b",
        }
    }

    /// Top-level key holding the record list.
    pub fn list_key(&self) -> &'static str {
        match self {
            SourceFormat::A => format_a::LIST_KEY,
            SourceFormat::B => format_b::LIST_KEY,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn to_unified(format: SourceFormat, document: &Value) -> Result<Vec<UnifiedRecord>, TelemetryError> {
    match format {
        SourceFormat::A => format_a::to_unified(document),
        SourceFormat::B => format_b::to_unified(document),
    }
}
