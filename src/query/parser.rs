//! Query line grammar
//!
//! `COMMAND key=value key=value ...`, whitespace separated. The first token
//! is the command; parameters may appear in any order and the first
//! `key=<non-empty>` token for a key wins.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::WellId;

pub const AVG_OIL: &str = "AVG_OIL";
pub const WATER_CUT: &str = "WATER_CUT";
pub const TOP_WELLS_BY_OIL: &str = "TOP_WELLS_BY_OIL";
pub const PRESSURE_DROP: &str = "PRESSURE_DROP";

/// A parsed query. Missing or unparsable parameters are kept as `None` so
/// the evaluator can pick the right "not available" answer per command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    AvgOil { well_id: Option<WellId> },
    WaterCut { well_id: Option<WellId> },
    TopWellsByOil { k: Option<i32> },
    PressureDrop {
        well_id: Option<WellId>,
        window: Option<i32>,
    },
    Unrecognized,
}

impl Query {
    /// The (well, window) pair a tracker must exist for, if any.
    pub fn pressure_window(&self) -> Option<(&str, usize)> {
        match self {
            Self::PressureDrop {
                well_id: Some(well_id),
                window: Some(window),
            } if *window > 0 => usize::try_from(*window)
                .ok()
                .map(|w| (well_id.as_str(), w)),
            _ => None,
        }
    }
}

/// Value of the first `name=<value>` token with a non-empty value.
pub fn param<'a>(tokens: &[&'a str], name: &str) -> Option<&'a str> {
    tokens.iter().find_map(|&token| {
        token
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('='))
            .filter(|value| !value.is_empty())
    })
}

/// Signed 32-bit; larger values count as unparsable.
fn int_param(tokens: &[&str], name: &str) -> Option<i32> {
    param(tokens, name).and_then(|v| v.parse().ok())
}

fn well_param(tokens: &[&str]) -> Option<WellId> {
    param(tokens, "well_id").map(str::to_string)
}

/// Parse one query line.
pub fn parse_query(line: &str) -> Query {
    let mut tokens = line.split_whitespace();
    let Some(command) = tokens.next() else {
        return Query::Unrecognized;
    };
    let params: Vec<&str> = tokens.collect();

    match command {
        AVG_OIL => Query::AvgOil {
            well_id: well_param(&params),
        },
        WATER_CUT => Query::WaterCut {
            well_id: well_param(&params),
        },
        TOP_WELLS_BY_OIL => Query::TopWellsByOil {
            k: int_param(&params, "k"),
        },
        PRESSURE_DROP => Query::PressureDrop {
            well_id: well_param(&params),
            window: int_param(&params, "window"),
        },
        _ => Query::Unrecognized,
    }
}

/// Distinct windows requested per well, so trackers are only built for
/// windows that are actually queried.
pub fn pressure_drop_requests(queries: &[Query]) -> BTreeMap<WellId, BTreeSet<usize>> {
    let mut requests: BTreeMap<WellId, BTreeSet<usize>> = BTreeMap::new();
    for (well_id, window) in queries.iter().filter_map(Query::pressure_window) {
        requests
            .entry(well_id.to_string())
            .or_default()
            .insert(window);
    }
    requests
}
