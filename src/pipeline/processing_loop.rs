//! End-to-end processing of one input stream.
//!
//! Reads the query section, registers trackers for the requested windows,
//! drains the data section through the finalization engine, flushes, and
//! writes one answer line per query.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::engine::{Aggregates, FinalizationEngine};
use super::source::{next_data_line, read_query_section, InputSource};
use super::stats::IngestStats;
use crate::config::AppConfig;
use crate::query::{parse_query, pressure_drop_requests, Query, QueryEvaluator};

/// What a completed run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub queries: usize,
    pub data_section: bool,
    pub trackers: usize,
    pub wells: usize,
    pub ingest: IngestStats,
}

/// Process `source` to exhaustion and write the answers to `out`.
pub fn run<S, W>(source: &mut S, out: &mut W, config: &AppConfig) -> Result<RunSummary>
where
    S: InputSource,
    W: Write,
{
    let section = read_query_section(source)?;
    let queries: Vec<Query> = section.queries.iter().map(|q| parse_query(q)).collect();

    let (aggregates, trackers) = if section.data_follows {
        let requests = pressure_drop_requests(&queries);
        let trackers: usize = requests.values().map(|w| w.len()).sum();
        debug!(wells = requests.len(), trackers, "Pressure-drop trackers requested");

        let mut engine = FinalizationEngine::with_windows(&requests);
        while let Some(line) = next_data_line(source)? {
            engine.ingest_line(&line);
        }
        (engine.finish(), trackers)
    } else {
        info!(
            source = source.source_name(),
            "No DATA section; answering against empty state"
        );
        (Aggregates::empty(), 0)
    };

    let ingest = *aggregates.ingest_stats();
    if config.ingest.report_stats {
        ingest.log_summary();
    }

    let evaluator = QueryEvaluator::new(&aggregates);
    let rendered = evaluator.render_all(&queries, config.output.decimals);
    out.write_all(rendered.as_bytes())
        .context("failed to write answers")?;
    out.flush().context("failed to flush answers")?;

    Ok(RunSummary {
        queries: queries.len(),
        data_section: section.data_follows,
        trackers,
        wells: aggregates.producing_wells(),
        ingest,
    })
}

/// Convenience wrapper for in-memory input, returning the output text.
pub fn run_str(input: &str, config: &AppConfig) -> Result<String> {
    let mut source = super::LineSource::new(input.as_bytes(), "memory");
    let mut out = Vec::new();
    run(&mut source, &mut out, config)?;
    String::from_utf8(out).context("answers are not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_run() {
        let input = "QUERIES\n\
                     AVG_OIL well_id=A\n\
                     PRESSURE_DROP well_id=A window=2\n\
                     TOP_WELLS_BY_OIL k=2\n\
                     DATA\n\
                     A,1,10,2,100\n\
                     B,1,50,0,7\n\
                     A,2,20,3,90\n\
                     A,3,15,1,80\n\
                     END\n\
                     A,4,1000,0,0\n";
        let out = run_str(input, &AppConfig::default()).unwrap();
        assert_eq!(out, "15.000000\n10.000000\nB,A\n");
    }

    #[test]
    fn test_summary() {
        let input = "QUERIES\nPRESSURE_DROP well_id=A window=2\nPRESSURE_DROP well_id=A window=2\nDATA\nA,1,1,1,1\nA,1,1,1,1\nbad\n";
        let mut source = crate::pipeline::LineSource::new(input.as_bytes(), "memory");
        let mut out = Vec::new();
        let summary = run(&mut source, &mut out, &AppConfig::default()).unwrap();
        assert_eq!(summary.queries, 2);
        assert!(summary.data_section);
        assert_eq!(summary.trackers, 1);
        assert_eq!(summary.wells, 1);
        assert_eq!(summary.ingest.lines_read, 3);
        assert_eq!(summary.ingest.duplicates_replaced, 1);
        assert_eq!(summary.ingest.malformed, 1);
        assert_eq!(summary.ingest.finalized, 1);
    }

    #[test]
    fn test_no_queries_writes_nothing() {
        let out = run_str("DATA\nA,1,1,1,1\nEND\n", &AppConfig::default()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_custom_decimals() {
        let mut config = AppConfig::default();
        config.output.decimals = 2;
        let out = run_str("QUERIES\nAVG_OIL well_id=A\nDATA\nA,1,1,0,0\nA,2,2,0,0\nA,3,2,0,0\n", &config).unwrap();
        assert_eq!(out, "1.67\n");
    }
}
