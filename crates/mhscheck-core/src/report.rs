//! Final run report, serialized only when discrepancies were recorded.

use serde::Serialize;

use crate::compare::DiscrepancyReport;
use crate::transversal::Token;

/// One failing invocation in the errors document.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmError {
    /// Invocation label ("name-tN").
    #[serde(rename = "algName")]
    pub alg_name: String,
    /// The discrepancies recorded for this invocation.
    pub errors: DiscrepancyReport,
}

/// The errors document: ground truth echoed for reference plus every failing
/// invocation in execution order. Built once per run, never mutated after.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Ground-truth transversals, echoed exactly as loaded.
    #[serde(rename = "correctTransversals")]
    pub correct_transversals: Vec<Vec<Token>>,
    /// Failing invocations in execution order.
    #[serde(rename = "algErrors")]
    pub alg_errors: Vec<AlgorithmError>,
}

impl RunReport {
    /// Number of failing invocations.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.alg_errors.len()
    }
}
