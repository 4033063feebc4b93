//! Core data types shared across the ingestion and query layers.

mod observation;

pub use observation::*;
