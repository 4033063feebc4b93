//! Query Evaluator
//!
//! Answers parsed queries against frozen [`Aggregates`]. Every query yields
//! exactly one output line; unavailable data becomes `NA` or an empty line,
//! never an error.

use std::fmt::Write as _;

use crate::pipeline::Aggregates;

use super::parser::Query;

/// Token printed when a numeric answer is not available.
pub const NOT_AVAILABLE: &str = "NA";

/// Answer to one query, before formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Value(f64),
    NotAvailable,
    Wells(Vec<String>),
    Empty,
}

impl Answer {
    /// Render as one output line (without the newline).
    ///
    /// Rust float formatting is locale independent, so the decimal
    /// separator is always `.`.
    pub fn render(&self, decimals: usize) -> String {
        match self {
            Self::Value(v) => format!("{v:.decimals$}"),
            Self::NotAvailable => NOT_AVAILABLE.to_string(),
            Self::Wells(ids) => ids.join(","),
            Self::Empty => String::new(),
        }
    }
}

/// Read-only view used to answer queries.
pub struct QueryEvaluator<'a> {
    aggregates: &'a Aggregates,
}

impl<'a> QueryEvaluator<'a> {
    pub fn new(aggregates: &'a Aggregates) -> Self {
        Self { aggregates }
    }

    pub fn answer(&self, query: &Query) -> Answer {
        match query {
            Query::AvgOil { well_id } => well_id
                .as_deref()
                .and_then(|id| self.aggregates.well_stats(id))
                .and_then(|st| st.average_oil())
                .map_or(Answer::NotAvailable, Answer::Value),

            Query::WaterCut { well_id } => well_id
                .as_deref()
                .and_then(|id| self.aggregates.well_stats(id))
                .and_then(|st| st.water_cut())
                .map_or(Answer::NotAvailable, Answer::Value),

            Query::TopWellsByOil { k } => match k.and_then(|k| usize::try_from(k).ok()) {
                Some(k) if k > 0 => {
                    let wells = self.aggregates.top_wells_by_oil(k);
                    if wells.is_empty() {
                        Answer::Empty
                    } else {
                        Answer::Wells(wells.into_iter().map(str::to_string).collect())
                    }
                }
                _ => Answer::Empty,
            },

            Query::PressureDrop { .. } => query
                .pressure_window()
                .and_then(|(id, window)| self.aggregates.tracker(id, window))
                .and_then(|tracker| tracker.result().ok())
                .map_or(Answer::NotAvailable, Answer::Value),

            Query::Unrecognized => Answer::Empty,
        }
    }

    /// Answer every query and join the lines.
    ///
    /// Ends with exactly one newline; no queries produce no output at all.
    pub fn render_all(&self, queries: &[Query], decimals: usize) -> String {
        let mut out = String::new();
        for query in queries {
            let _ = writeln!(out, "{}", self.answer(query).render(decimals));
        }
        out
    }
}
