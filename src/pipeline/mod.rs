//! Processing Pipeline Module
//!
//! ```text
//! input lines ─▶ query section ─▶ tracker registration
//!            └─▶ data section ─▶ record parser ─▶ finalization engine
//!                                                 ├─▶ well stats
//!                                                 └─▶ pressure-drop trackers
//! aggregates ─▶ query evaluator ─▶ one answer line per query
//! ```

pub mod engine;
pub mod processing_loop;
pub mod source;
pub mod stats;

pub use engine::{Admission, Aggregates, FinalizationEngine, FinalizedWell, PendingState};
pub use processing_loop::{run, run_str, RunSummary};
pub use source::{InputEvent, InputSource, LineSource, QuerySection};
pub use stats::IngestStats;
