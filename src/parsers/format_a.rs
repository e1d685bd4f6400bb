use serde_json::Value;

use crate::errors::TelemetryError;
use crate::model::UnifiedRecord;
use crate::normalizer::iso_to_epoch_millis;
use crate::parsers::SourceFormat;
use crate::parsers::common::{Fields, record_list};

pub const LIST_KEY: &str = "telemetry";

/// Map a Format-A document into unified records.
///
/// ```json
/// {"telemetry": [{"device_id": "sensor_001", "timestamp": "2023-10-15T14:30:25.123Z",
///                 "temperature": 23.5, "humidity": 65.2, "pressure": 1013.25}]}
/// ```
///
/// The timestamp is converted to epoch milliseconds; everything else is
/// copied as-is. The first bad record aborts the whole document.
pub fn to_unified(document: &Value) -> Result<Vec<UnifiedRecord>, TelemetryError> {
    record_list(SourceFormat::A, document)?
        .iter()
        .enumerate()
        .map(|(index, entry)| map_entry(index, entry))
        .collect()
}

fn map_entry(index: usize, entry: &Value) -> Result<UnifiedRecord, TelemetryError> {
    let fields = Fields::new(SourceFormat::A, index, entry)?;

    let device_id = fields.string("device_id")?;
    let timestamp = iso_to_epoch_millis(fields.string("timestamp")?).map_err(|e| fields.wrap(e))?;

    Ok(UnifiedRecord {
        device_id: device_id.to_string(),
        timestamp,
        temperature: fields.number("temperature")?,
        humidity: fields.number("humidity")?,
        pressure: fields.number("pressure")?,
    })
}
