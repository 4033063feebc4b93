//! Configuration Module
//!
//! Output formatting, ingest reporting and logging options loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `--config <path>` on the command line (failure is fatal)
//! 2. `WELLSTREAM_CONFIG` environment variable (path to TOML file)
//! 3. Built-in defaults
//!
//! The current working directory is never searched.
//!
//! The loaded [`AppConfig`] is passed explicitly to the pipeline; there is no
//! global instance.

mod app_config;
pub mod defaults;
pub mod validation;

pub use app_config::*;
