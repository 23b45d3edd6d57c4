//! Result comparator: symmetric difference against ground truth.

use serde::Serialize;

use crate::transversal::TransversalSet;

/// Structured diagnostics for one failing invocation.
///
/// Field order matches the errors document: excludes first, includes second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscrepancyReport {
    /// Transversals present in ground truth but missing from the answer.
    pub false_excludes: TransversalSet,
    /// Transversals reported that are not in ground truth.
    pub false_includes: TransversalSet,
}

impl DiscrepancyReport {
    /// Total number of discrepant transversals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.false_excludes.len() + self.false_includes.len()
    }

    /// A report with both sides empty describes a passing invocation and is
    /// never recorded; `compare` returns `None` instead of constructing one.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.false_excludes.is_empty() && self.false_includes.is_empty()
    }
}

/// Compare a normalized reported answer against the ground truth.
///
/// Pure: same inputs always yield the same report. Returns `None` exactly
/// when the answer matches the ground truth under set semantics.
#[must_use]
pub fn compare(reported: &TransversalSet, truth: &TransversalSet) -> Option<DiscrepancyReport> {
    if reported == truth {
        return None;
    }
    Some(DiscrepancyReport {
        false_excludes: truth.difference(reported),
        false_includes: reported.difference(truth),
    })
}
