#![no_main]

use libfuzzer_sys::fuzz_target;

use mhscheck_core::compare::compare;
use mhscheck_core::transversal::{Token, TransversalSet};

fn build_set(bytes: &[u8]) -> TransversalSet {
    let lists: Vec<Vec<Token>> = bytes
        .chunks(3)
        .map(|chunk| chunk.iter().map(|b| Token::from(i64::from(*b % 16))).collect())
        .collect();
    TransversalSet::from_lists(&lists)
}

fuzz_target!(|data: &[u8]| {
    let mid = data.len() / 2;
    let truth = build_set(&data[..mid]);
    let reported = build_set(&data[mid..]);

    match compare(&reported, &truth) {
        None => assert_eq!(reported, truth),
        Some(report) => {
            assert!(!(report.false_includes.is_empty() && report.false_excludes.is_empty()));
            let rebuilt = truth
                .difference(&report.false_excludes)
                .union(&report.false_includes);
            assert_eq!(rebuilt, reported);
        }
    }
});
