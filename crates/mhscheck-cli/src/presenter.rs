//! CLI result presenter.

use mhscheck_orchestration::interfaces::{InvocationRecord, ResultPresenter, RunOutcome};

use crate::output::format_duration;
use crate::ui::{print_error, print_success, print_warning};

/// CLI result presenter.
pub struct CLIResultPresenter {
    verbose: bool,
    quiet: bool,
}

impl CLIResultPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn run_started(&self, total: usize) {
        if self.quiet {
            return;
        }
        println!("Running {total} invocation(s)...");
    }

    fn invocation_finished(&self, record: &InvocationRecord) {
        if self.quiet {
            return;
        }

        let status = if record.passed() { "OK" } else { "FAILED" };
        println!(
            "  {:<24} {:>10} [{status}]",
            record.key.to_string(),
            format_duration(record.duration),
        );

        if self.verbose {
            if let Some(report) = &record.discrepancy {
                println!(
                    "    false includes: {}, false excludes: {}",
                    report.false_includes.len(),
                    report.false_excludes.len()
                );
            }
        }
    }

    fn run_finished(&self, outcome: &RunOutcome) {
        let failed = outcome.failed_count();
        if failed == 0 {
            if !self.quiet {
                print_success(&format!(
                    "all {} invocation(s) matched the reference transversals",
                    outcome.total()
                ));
            }
        } else {
            print_warning(&format!(
                "{failed} of {} invocation(s) failed",
                outcome.total()
            ));
        }
    }

    fn present_error(&self, error: &str) {
        print_error(error);
    }
}
