use std::fmt;
use std::path::Path;

use crate::errors::TelemetryError;
use crate::input::load_document;
use crate::model::{UnifiedDocument, UnifiedRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum Mismatch {
    Length {
        expected: usize,
        actual: usize,
    },
    /// `index` is zero-based; `Display` reports it one-based.
    Record {
        index: usize,
        expected: UnifiedRecord,
        actual: UnifiedRecord,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Length { expected, actual } => {
                write!(f, "expected {} records, got {}", expected, actual)
            }
            Mismatch::Record {
                index,
                expected,
                actual,
            } => write!(
                f,
                "record {} doesn't match expected result (expected {:?}, actual {:?})",
                index + 1,
                expected,
                actual
            ),
        }
    }
}

/// Load the fixture's `unified_telemetry` records.
pub fn load_expected(path: &Path) -> Result<Vec<UnifiedRecord>, TelemetryError> {
    let document = load_document(path)?;
    let parsed: UnifiedDocument =
        serde_json::from_value(document).map_err(|source| TelemetryError::InvalidFixture {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(parsed.unified_telemetry)
}

/// Field-for-field, order-sensitive comparison. Reports the first difference.
pub fn compare(actual: &[UnifiedRecord], expected: &[UnifiedRecord]) -> Result<(), Mismatch> {
    if actual.len() != expected.len() {
        return Err(Mismatch::Length {
            expected: expected.len(),
            actual: actual.len(),
        });
    }

    match actual
        .iter()
        .zip(expected)
        .position(|(actual, expected)| actual != expected)
    {
        Some(index) => Err(Mismatch::Record {
            index,
            expected: expected[index].clone(),
            actual: actual[index].clone(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, timestamp: i64) -> UnifiedRecord {
        UnifiedRecord {
            device_id: id.to_string(),
            timestamp,
            temperature: 20.0,
            humidity: 50.0,
            pressure: 1000.0,
        }
    }

    #[test]
    fn identical_lists_pass() {
        let records = vec![record("a", 1), record("b", 2)];
        assert_eq!(compare(&records, &records.clone()), Ok(()));
    }

    #[test]
    fn length_difference_is_reported() {
        let actual = vec![record("a", 1)];
        let expected = vec![record("a", 1), record("b", 2)];
        assert_eq!(
            compare(&actual, &expected),
            Err(Mismatch::Length {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn first_differing_record_is_reported() {
        let actual = vec![record("a", 1), record("b", 0), record("c", 0)];
        let expected = vec![record("a", 1), record("b", 2), record("c", 3)];
        let mismatch = compare(&actual, &expected).unwrap_err();
        assert!(matches!(mismatch, Mismatch::Record { index: 1, .. }));
        assert!(mismatch.to_string().starts_with("record 2 doesn't match"));
    }

    #[test]
    fn order_matters() {
        let actual = vec![record("b", 2), record("a", 1)];
        let expected = vec![record("a", 1), record("b", 2)];
        assert!(compare(&actual, &expected).is_err());
    }

    #[test]
    fn fixture_requires_unified_key() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("data-result.json");
        std::fs::write(
            &good,
            r#"{"unified_telemetry":[{"device_id":"a","timestamp":1,"temperature":20,"humidity":50.0,"pressure":1000.0}]}"#,
        )
        .unwrap();
        assert_eq!(load_expected(&good).unwrap(), vec![record("a", 1)]);

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, r#"{"telemetry":[]}"#).unwrap();
        assert!(matches!(
            load_expected(&bad),
            Err(TelemetryError::InvalidFixture { .. })
        ));
        assert!(
            load_expected(&bad)
                .unwrap_err()
                .to_string()
                .starts_with("fixture ")
        );

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(
            load_expected(&broken),
            Err(TelemetryError::InvalidJson { .. })
        ));
    }
}
