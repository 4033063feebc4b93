//! Telemetry record acquisition
//!
//! Turns raw `DATA` section lines into validated observations.

pub mod record_parser;

pub use record_parser::{parse_record, RecordError};
