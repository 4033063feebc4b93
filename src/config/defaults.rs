//! System-wide default constants.

// ============================================================================
// Output
// ============================================================================

/// Digits after the decimal point for numeric answers.
pub const DEFAULT_DECIMALS: usize = 6;

/// Largest accepted `output.decimals`; beyond this an f64 carries no more digits.
pub const MAX_DECIMALS: usize = 17;

// ============================================================================
// Logging
// ============================================================================

/// Filter used when neither `RUST_LOG` nor `logging.filter` is set.
///
/// Warn keeps stderr quiet for harness runs; stdout only ever carries answers.
pub const DEFAULT_LOG_FILTER: &str = "warn";

// ============================================================================
// Config discovery
// ============================================================================

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "WELLSTREAM_CONFIG";
