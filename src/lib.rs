//! wellstream: streaming per-well production telemetry aggregation
//!
//! Ingests `well_id,timestamp,oil,water,pressure` records, deduplicates and
//! discards out-of-order samples per well, and answers a fixed set of
//! queries over the finalized history.
//!
//! ## Architecture
//!
//! - **Record parser**: one data line to a validated [`Observation`]
//! - **Finalization engine**: per-well pending slot, last write wins for a
//!   timestamp, exactly-once finalization
//! - **Analytics**: running oil/water sums and the sliding-window causal
//!   maximum pressure drop
//! - **Query evaluator**: AVG_OIL, WATER_CUT, TOP_WELLS_BY_OIL, PRESSURE_DROP

pub mod acquisition;
pub mod analytics;
pub mod config;
pub mod pipeline;
pub mod query;
pub mod types;

pub use config::AppConfig;
pub use types::{Observation, Reading, Timestamp, WellId};

pub use acquisition::{parse_record, RecordError};
pub use analytics::{PressureDropError, PressureDropTracker, WellStats};
pub use pipeline::{run, Aggregates, FinalizationEngine, IngestStats, LineSource, RunSummary};
pub use query::{parse_query, Answer, Query, QueryEvaluator};
