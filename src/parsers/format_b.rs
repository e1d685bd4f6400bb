use serde_json::Value;

use crate::errors::TelemetryError;
use crate::model::UnifiedRecord;
use crate::parsers::SourceFormat;
use crate::parsers::common::{Fields, record_list};

pub const LIST_KEY: &str = "sensors";

/// Map a Format-B document into unified records by renaming fields.
/// `ts` is already epoch milliseconds and is copied unchanged.
pub fn to_unified(document: &Value) -> Result<Vec<UnifiedRecord>, TelemetryError> {
    record_list(SourceFormat::B, document)?
        .iter()
        .enumerate()
        .map(|(index, entry)| map_entry(index, entry))
        .collect()
}

fn map_entry(index: usize, entry: &Value) -> Result<UnifiedRecord, TelemetryError> {
    let fields = Fields::new(SourceFormat::B, index, entry)?;

    Ok(UnifiedRecord {
        device_id: fields.string("id")?.to_string(),
        timestamp: fields.integer("ts")?,
        temperature: fields.number("temp")?,
        humidity: fields.number("hum")?,
        pressure: fields.number("press")?,
    })
}
