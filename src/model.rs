use serde::{Deserialize, Serialize};

/// Canonical per-reading record every input schema is normalized into.
/// Field order here is the serialized field order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedRecord {
    pub device_id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

#[derive(Debug, Deserialize)]
pub struct UnifiedDocument {
    pub unified_telemetry: Vec<UnifiedRecord>,
}

#[derive(Debug, Serialize)]
pub struct UnifiedDocumentRef<'a> {
    pub unified_telemetry: &'a [UnifiedRecord],
}
