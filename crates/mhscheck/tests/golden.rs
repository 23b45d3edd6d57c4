//! Golden test for the errors document serialization.
//!
//! The report layout is wire-compatible with the historical output format
//! and must stay byte-stable across runs.

use mhscheck_core::compare::compare;
use mhscheck_core::report::{AlgorithmError, RunReport};
use mhscheck_core::testcase::TestCase;

fn load_golden() -> String {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/testdata/errors_golden.json");
    std::fs::read_to_string(path).expect("failed to read golden file")
}

fn build_report() -> RunReport {
    let test =
        TestCase::from_str(r#"{"sets": [[1,2],[3]], "transversals": [[1,2],[3]]}"#).unwrap();
    let truth = test.ground_truth();
    let reported: mhscheck_core::transversal::TransversalSet =
        serde_json::from_str("[[1,2],[4]]").unwrap();

    RunReport {
        correct_transversals: test.transversals.clone(),
        alg_errors: vec![AlgorithmError {
            alg_name: "B-t1".to_string(),
            errors: compare(&reported, &truth).expect("B must fail"),
        }],
    }
}

#[test]
fn report_matches_golden_bytes() {
    let rendered = serde_json::to_string_pretty(&build_report()).unwrap();
    assert_eq!(rendered.trim(), load_golden().trim());
}

#[test]
fn report_is_stable_across_rebuilds() {
    let a = serde_json::to_string_pretty(&build_report()).unwrap();
    let b = serde_json::to_string_pretty(&build_report()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn golden_parses_back() {
    let value: serde_json::Value = serde_json::from_str(&load_golden()).unwrap();
    assert_eq!(value["algErrors"][0]["algName"], "B-t1");
    assert_eq!(
        value["algErrors"][0]["errors"]["false_includes"],
        serde_json::json!([[4]])
    );
    assert_eq!(
        value["algErrors"][0]["errors"]["false_excludes"],
        serde_json::json!([[3]])
    );
}
