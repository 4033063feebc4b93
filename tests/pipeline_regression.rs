//! Pipeline Regression Tests
//!
//! End-to-end runs through `pipeline::run_str`: query section, data section,
//! finalization, evaluation and output formatting.

use wellstream::config::AppConfig;
use wellstream::pipeline::run_str;

fn answers(input: &str) -> String {
    run_str(input, &AppConfig::default()).expect("run should succeed")
}

const BASE_DATA: &str = "A,1,10,2,100\nA,2,20,3,90\nA,3,15,1,80\n";

fn with_queries(queries: &[&str], data: &str) -> String {
    format!("QUERIES\n{}\nDATA\n{}END\n", queries.join("\n"), data)
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn pressure_drop_window_two() {
    let out = answers(&with_queries(&["PRESSURE_DROP well_id=A window=2"], BASE_DATA));
    assert_eq!(out, "10.000000\n");
}

#[test]
fn average_oil() {
    let out = answers(&with_queries(&["AVG_OIL well_id=A"], BASE_DATA));
    assert_eq!(out, "15.000000\n");
}

#[test]
fn pressure_drop_window_larger_than_samples() {
    let out = answers(&with_queries(&["PRESSURE_DROP well_id=A window=5"], BASE_DATA));
    assert_eq!(out, "NA\n");
}

#[test]
fn no_data_section_answers_na() {
    assert_eq!(answers("QUERIES\nAVG_OIL well_id=X\n"), "NA\n");
}

// ============================================================================
// Admission properties
// ============================================================================

#[test]
fn duplicate_timestamp_last_write_wins() {
    let data = "A,1,999,0,500\nA,1,10,0,100\nA,2,20,0,40\n";
    let out = answers(&with_queries(
        &["AVG_OIL well_id=A", "PRESSURE_DROP well_id=A window=2"],
        data,
    ));
    assert_eq!(out, "15.000000\n60.000000\n");
}

#[test]
fn out_of_order_records_are_ignored() {
    let data = "A,5,10,0,100\nA,3,1000,0,0\nA,6,20,0,90\nA,5,1000,0,0\nA,4,1000,0,0\n";
    let out = answers(&with_queries(
        &["AVG_OIL well_id=A", "PRESSURE_DROP well_id=A window=3"],
        data,
    ));
    assert_eq!(out, "15.000000\nNA\n");
}

#[test]
fn final_pending_record_is_flushed() {
    let data = "A,1,10,0,0\nB,7,4,4,0\n";
    let out = answers(&with_queries(
        &["AVG_OIL well_id=A", "WATER_CUT well_id=B", "TOP_WELLS_BY_OIL k=5"],
        data,
    ));
    assert_eq!(out, "10.000000\n0.500000\nA,B\n");
}

#[test]
fn invalid_records_are_silently_dropped() {
    let data = "A,1,10,0,100\n\
                A,2,-5,0,0\n\
                A,3,NaN,0,0\n\
                A,4,1,inf,0\n\
                A,x,1,1,1\n\
                A,5,1,1\n\
                ,6,1,1,1\n\
                A,7,20,0,70\n";
    let out = answers(&with_queries(
        &["AVG_OIL well_id=A", "PRESSURE_DROP well_id=A window=2"],
        data,
    ));
    assert_eq!(out, "15.000000\n30.000000\n");
}

#[test]
fn wells_are_independent() {
    let data = "A,1,1,0,100\nB,1,2,0,5\nA,2,1,0,50\nB,2,2,0,1\nB,0,100,0,1000\n";
    let out = answers(&with_queries(
        &[
            "PRESSURE_DROP well_id=A window=2",
            "PRESSURE_DROP well_id=B window=2",
            "AVG_OIL well_id=B",
        ],
        data,
    ));
    assert_eq!(out, "50.000000\n4.000000\n2.000000\n");
}

// ============================================================================
// Query semantics
// ============================================================================

#[test]
fn causal_drop_is_not_symmetric_range() {
    // Trailing max-min over 2 samples would give 9 (1 -> 10); the causal
    // drop only sees 10 -> 9.
    let data = "P,1,0,0,1\nP,2,0,0,10\nP,3,0,0,9\n";
    let out = answers(&with_queries(&["PRESSURE_DROP well_id=P window=2"], data));
    assert_eq!(out, "1.000000\n");
}

#[test]
fn window_of_one_reports_zero() {
    let out = answers(&with_queries(&["PRESSURE_DROP well_id=A window=1"], BASE_DATA));
    assert_eq!(out, "0.000000\n");
}

#[test]
fn rising_pressure_reports_zero_drop() {
    let data = "R,1,0,0,1\nR,2,0,0,2\nR,3,0,0,3\n";
    let out = answers(&with_queries(&["PRESSURE_DROP well_id=R window=3"], data));
    assert_eq!(out, "0.000000\n");
}

#[test]
fn zero_fluid_water_cut() {
    let out = answers(&with_queries(&["WATER_CUT well_id=Z"], "Z,1,0,0,1\nZ,2,0,0,1\n"));
    assert_eq!(out, "0.000000\n");
}

#[test]
fn top_wells_ties_and_limits() {
    let data = "C,1,5,0,0\nB,1,5,0,0\nA,1,1,0,0\nD,1,7,0,0\n";
    let out = answers(&with_queries(
        &[
            "TOP_WELLS_BY_OIL k=2",
            "TOP_WELLS_BY_OIL k=3",
            "TOP_WELLS_BY_OIL k=10",
            "TOP_WELLS_BY_OIL k=0",
            "TOP_WELLS_BY_OIL k=abc",
        ],
        data,
    ));
    assert_eq!(out, "D,B\nD,B,C\nD,B,C,A\n\n\n");
}

#[test]
fn top_wells_with_no_data_is_empty_line() {
    assert_eq!(answers("QUERIES\nTOP_WELLS_BY_OIL k=3\n"), "\n");
}

#[test]
fn unrecognized_queries_give_empty_lines() {
    let out = answers(&with_queries(
        &["HELLO", "AVG_OIL well_id=A", "avg_oil well_id=A"],
        BASE_DATA,
    ));
    assert_eq!(out, "\n15.000000\n\n");
}

#[test]
fn one_answer_per_query_in_order() {
    let queries = [
        "WATER_CUT well_id=A",
        "AVG_OIL well_id=missing",
        "PRESSURE_DROP well_id=A window=3",
        "TOP_WELLS_BY_OIL k=1",
    ];
    let out = answers(&with_queries(&queries, BASE_DATA));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines, vec!["0.117647", "NA", "20.000000", "A"]);
    assert!(out.ends_with('\n') && !out.ends_with("\n\n"));
}

#[test]
fn data_after_end_marker_is_ignored() {
    let input = "QUERIES\nAVG_OIL well_id=A\nDATA\nA,1,10,0,0\nEND\nA,2,1000,0,0\n";
    assert_eq!(answers(input), "10.000000\n");
}

#[test]
fn crlf_input_is_accepted() {
    let input = "QUERIES\r\nAVG_OIL well_id=A\r\nDATA\r\nA,1,4,0,0\r\nA,2,6,0,0\r\nEND\r\n";
    assert_eq!(answers(input), "5.000000\n");
}

#[test]
fn invalid_utf8_record_is_dropped_and_run_continues() {
    use wellstream::pipeline::{run, LineSource};

    let input: &[u8] = b"QUERIES\nAVG_OIL well_id=A\nDATA\nA,1,10,0,0\nA,2,\xff\xfe,0,0\nA,3,20,0,0\nEND\n";
    let mut source = LineSource::new(input, "bytes");
    let mut out = Vec::new();
    let summary = run(&mut source, &mut out, &AppConfig::default()).expect("run should succeed");

    assert_eq!(String::from_utf8(out).unwrap(), "15.000000\n");
    assert_eq!(summary.ingest.malformed, 1);
}

#[test]
fn nan_pressure_does_not_mask_window_maximum() {
    let data = "A,1,1,0,NaN\nA,2,1,0,100\nA,3,1,0,10\n";
    let out = answers(&with_queries(&["PRESSURE_DROP well_id=A window=3"], data));
    assert_eq!(out, "90.000000\n");
}

#[test]
fn out_of_range_k_is_unparsable() {
    let out = answers(&with_queries(
        &["TOP_WELLS_BY_OIL k=3000000000", "TOP_WELLS_BY_OIL k=2147483647"],
        BASE_DATA,
    ));
    assert_eq!(out, "\nA\n");
}
