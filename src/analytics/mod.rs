//! Per-well analytics
//!
//! - **Well statistics**: running oil/water sums behind AVG_OIL, WATER_CUT
//!   and TOP_WELLS_BY_OIL
//! - **Pressure drop**: sliding-window causal maximum drop behind PRESSURE_DROP

pub mod pressure_drop;
pub mod well_stats;

pub use pressure_drop::{PressureDropError, PressureDropTracker};
pub use well_stats::{top_wells_by_oil, WellStats};
