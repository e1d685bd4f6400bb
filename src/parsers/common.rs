use serde_json::{Map, Value};

use crate::errors::TelemetryError;
use crate::parsers::SourceFormat;

/// Borrow the record list stored under the format's key.
///
/// A document without the key yields an empty slice; a key holding anything
/// other than an array is an error.
pub fn record_list(format: SourceFormat, document: &Value) -> Result<&[Value], TelemetryError> {
    let object = document
        .as_object()
        .ok_or_else(|| TelemetryError::InvalidDocument {
            format,
            reason: format!("expected a JSON object, found {}", kind_of(document)),
        })?;

    match object.get(format.list_key()) {
        None => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(TelemetryError::InvalidDocument {
            format,
            reason: format!(
                "`{}` must be an array, found {}",
                format.list_key(),
                kind_of(other)
            ),
        }),
    }
}

/// Field accessor for one record, carrying enough context for error reports.
pub struct Fields<'a> {
    format: SourceFormat,
    index: usize,
    entry: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub fn new(format: SourceFormat, index: usize, entry: &'a Value) -> Result<Self, TelemetryError> {
        let entry = entry
            .as_object()
            .ok_or_else(|| TelemetryError::InvalidDocument {
                format,
                reason: format!("record {} is {}, expected an object", index, kind_of(entry)),
            })?;
        Ok(Self {
            format,
            index,
            entry,
        })
    }

    fn get(&self, field: &'static str) -> Result<&'a Value, TelemetryError> {
        self.entry.get(field).ok_or(TelemetryError::MissingField {
            format: self.format,
            index: self.index,
            field,
        })
    }

    fn invalid(&self, field: &'static str, expected: &'static str) -> TelemetryError {
        TelemetryError::InvalidField {
            format: self.format,
            index: self.index,
            field,
            expected,
        }
    }

    pub fn string(&self, field: &'static str) -> Result<&'a str, TelemetryError> {
        self.get(field)?
            .as_str()
            .ok_or_else(|| self.invalid(field, "string"))
    }

    pub fn integer(&self, field: &'static str) -> Result<i64, TelemetryError> {
        self.get(field)?
            .as_i64()
            .ok_or_else(|| self.invalid(field, "integer"))
    }

    pub fn number(&self, field: &'static str) -> Result<f64, TelemetryError> {
        self.get(field)?
            .as_f64()
            .ok_or_else(|| self.invalid(field, "number"))
    }

    /// Attach this record's position to an error raised while converting it.
    pub fn wrap(&self, source: TelemetryError) -> TelemetryError {
        TelemetryError::Record {
            format: self.format,
            index: self.index,
            source: Box::new(source),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
