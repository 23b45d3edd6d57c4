//! Orchestration interfaces.

use std::time::Duration;

use mhscheck_core::compare::DiscrepancyReport;
use mhscheck_core::invocation::InvocationKey;
use mhscheck_core::report::{AlgorithmError, RunReport};
use mhscheck_core::transversal::Token;

/// Result of a single invocation.
#[derive(Debug, Clone)]
pub struct InvocationRecord {
    /// The (algorithm, thread count) pair exercised.
    pub key: InvocationKey,
    /// `None` when the answer matched ground truth.
    pub discrepancy: Option<DiscrepancyReport>,
    /// Wall time of the exchange.
    pub duration: Duration,
}

impl InvocationRecord {
    /// Whether this invocation matched the reference transversals.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.discrepancy.is_none()
    }
}

/// All invocation records of one completed run, in canonical order.
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    /// Records in execution (= plan) order.
    pub records: Vec<InvocationRecord>,
}

impl RunOutcome {
    /// Wrap the accumulated records.
    #[must_use]
    pub fn new(records: Vec<InvocationRecord>) -> Self {
        Self { records }
    }

    /// Total invocations executed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Number of invocations with recorded discrepancies.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.records.iter().filter(|r| !r.passed()).count()
    }

    /// Whether every invocation matched ground truth.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.records.iter().all(InvocationRecord::passed)
    }

    /// Build the errors document, echoing the raw ground truth. `None` when
    /// nothing failed — a clean run produces no report at all.
    #[must_use]
    pub fn build_report(&self, correct_transversals: &[Vec<Token>]) -> Option<RunReport> {
        let alg_errors: Vec<AlgorithmError> = self
            .records
            .iter()
            .filter_map(|record| {
                record.discrepancy.clone().map(|errors| AlgorithmError {
                    alg_name: record.key.to_string(),
                    errors,
                })
            })
            .collect();

        if alg_errors.is_empty() {
            return None;
        }
        Some(RunReport {
            correct_transversals: correct_transversals.to_vec(),
            alg_errors,
        })
    }
}

/// Trait for presenting run progress and results to the user.
pub trait ResultPresenter: Send + Sync {
    /// The run is about to execute `total` invocations.
    fn run_started(&self, total: usize);

    /// One invocation finished (pass or discrepancy; fatal errors never
    /// reach the presenter).
    fn invocation_finished(&self, record: &InvocationRecord);

    /// Every invocation completed without a fatal error.
    fn run_finished(&self, outcome: &RunOutcome);

    /// Present a fatal error.
    fn present_error(&self, error: &str);
}

/// Presenter that does nothing.
pub struct NullPresenter;

impl ResultPresenter for NullPresenter {
    fn run_started(&self, _total: usize) {}
    fn invocation_finished(&self, _record: &InvocationRecord) {}
    fn run_finished(&self, _outcome: &RunOutcome) {}
    fn present_error(&self, _error: &str) {}
}
