//! Query parsing and evaluation.

pub mod evaluator;
pub mod parser;

pub use evaluator::{Answer, QueryEvaluator};
pub use parser::{parse_query, pressure_drop_requests, Query};
