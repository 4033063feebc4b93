//! Record Parser
//!
//! Parses one `DATA` line of the form `well_id,timestamp,oil,water,pressure`
//! into an [`Observation`]. Rejected lines are reported as a [`RecordError`]
//! so the caller can count them; they never reach the output.

use crate::types::{Observation, Timestamp};
use thiserror::Error;

/// Number of comma-separated fields in a data record.
pub const RECORD_FIELD_COUNT: usize = 5;

/// Why a data line was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("expected {RECORD_FIELD_COUNT} fields, got {found}")]
    FieldCount { found: usize },

    #[error("empty well identifier")]
    EmptyWellId,

    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("invalid {field} value '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} must be non-negative (got {value})")]
    NegativeRate { field: &'static str, value: f64 },

    #[error("{field} must be finite (got {value})")]
    NonFiniteRate { field: &'static str, value: f64 },
}

impl RecordError {
    /// Structural problems (field count, unparsable text) as opposed to
    /// well-formed records carrying values outside the accepted range.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::FieldCount { .. }
                | Self::EmptyWellId
                | Self::InvalidTimestamp(_)
                | Self::InvalidNumber { .. }
        )
    }
}

/// Parse and validate a single data line.
///
/// The caller passes the line already trimmed. The well identifier is taken
/// verbatim; numeric fields are trimmed individually before parsing.
pub fn parse_record(line: &str) -> Result<Observation, RecordError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != RECORD_FIELD_COUNT {
        return Err(RecordError::FieldCount { found: fields.len() });
    }

    let well_id = fields[0];
    if well_id.is_empty() {
        return Err(RecordError::EmptyWellId);
    }

    let timestamp = parse_timestamp(fields[1])?;
    let oil = parse_f64(fields[2], "oil")?;
    let water = parse_f64(fields[3], "water")?;
    let pressure = parse_f64(fields[4], "pressure")?;

    check_rate(oil, "oil")?;
    check_rate(water, "water")?;

    Ok(Observation {
        well_id: well_id.to_string(),
        timestamp,
        oil,
        water,
        pressure,
    })
}

fn parse_timestamp(raw: &str) -> Result<Timestamp, RecordError> {
    let raw = raw.trim();
    raw.parse::<Timestamp>()
        .map_err(|_| RecordError::InvalidTimestamp(raw.to_string()))
}

fn parse_f64(raw: &str, field: &'static str) -> Result<f64, RecordError> {
    let raw = raw.trim();
    raw.parse::<f64>().map_err(|_| RecordError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// Oil and water rates must be finite and non-negative.
fn check_rate(value: f64, field: &'static str) -> Result<(), RecordError> {
    if !value.is_finite() {
        return Err(RecordError::NonFiniteRate { field, value });
    }
    if value < 0.0 {
        return Err(RecordError::NegativeRate { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_record() {
        let obs = parse_record("A,1,10,2,100").unwrap();
        assert_eq!(obs.well_id, "A");
        assert_eq!(obs.timestamp, 1);
        assert_eq!(obs.oil, 10.0);
        assert_eq!(obs.water, 2.0);
        assert_eq!(obs.pressure, 100.0);
    }

    #[test]
    fn test_numeric_fields_are_trimmed() {
        let obs = parse_record("W-7, 42 , 1.5e2 ,0.25,  -3.5").unwrap();
        assert_eq!(obs.timestamp, 42);
        assert_eq!(obs.oil, 150.0);
        assert_eq!(obs.water, 0.25);
        assert_eq!(obs.pressure, -3.5);
    }

    #[test]
    fn test_wrong_field_count() {
        assert_eq!(
            parse_record("A,1,10,2").unwrap_err(),
            RecordError::FieldCount { found: 4 }
        );
        // Trailing empty field still counts
        assert_eq!(
            parse_record("A,1,10,2,100,").unwrap_err(),
            RecordError::FieldCount { found: 6 }
        );
    }

    #[test]
    fn test_empty_well_id() {
        assert_eq!(parse_record(",1,10,2,100").unwrap_err(), RecordError::EmptyWellId);
    }

    #[test]
    fn test_bad_timestamp() {
        let err = parse_record("A,1.5,10,2,100").unwrap_err();
        assert!(matches!(err, RecordError::InvalidTimestamp(_)));
        assert!(err.is_malformed());
    }

    #[test]
    fn test_bad_number() {
        let err = parse_record("A,1,ten,2,100").unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidNumber {
                field: "oil",
                value: "ten".to_string()
            }
        );
        assert!(parse_record("A,1,10,2,").is_err());
    }

    #[test]
    fn test_negative_rates_rejected() {
        let err = parse_record("A,1,-1,2,100").unwrap_err();
        assert!(matches!(err, RecordError::NegativeRate { field: "oil", .. }));
        assert!(!err.is_malformed());

        let err = parse_record("A,1,1,-0.5,100").unwrap_err();
        assert!(matches!(err, RecordError::NegativeRate { field: "water", .. }));
    }

    #[test]
    fn test_non_finite_rates_rejected() {
        for line in ["A,1,NaN,2,100", "A,1,inf,2,100", "A,1,1,-inf,100"] {
            let err = parse_record(line).unwrap_err();
            assert!(
                matches!(err, RecordError::NonFiniteRate { .. }),
                "{line} -> {err:?}"
            );
        }
    }

    #[test]
    fn test_pressure_is_unconstrained() {
        assert!(parse_record("A,1,1,1,-99999").is_ok());
        assert!(parse_record("A,1,1,1,inf").is_ok());
    }
}
