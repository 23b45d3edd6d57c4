//! Application entry point and dispatch.

use anyhow::{Context, Result};
use tracing::{info, warn};

use mhscheck_cli::output::write_report;
use mhscheck_cli::presenter::CLIResultPresenter;
use mhscheck_core::progress::CancellationToken;
use mhscheck_core::registry::AlgorithmRegistry;
use mhscheck_core::testcase::TestCase;
use mhscheck_orchestration::interfaces::{ResultPresenter, RunOutcome};
use mhscheck_orchestration::orchestrator::execute_run;
use mhscheck_runtime::http::HttpRuntime;
use mhscheck_runtime::service::ServiceRuntime;

use crate::config::AppConfig;

/// Terminal state of a completed (non-fatal) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every invocation matched the reference transversals.
    Clean,
    /// This many invocations disagreed; the errors file was written.
    Discrepancies(usize),
}

/// Run the application.
pub fn run(config: &AppConfig) -> Result<RunStatus> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        mhscheck_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(RunStatus::Clean);
    }

    let (algorithms_path, test_data_path, errors_path) = config.input_paths()?;

    let registry = AlgorithmRegistry::load(algorithms_path)?;
    let test = TestCase::load(test_data_path)?;

    let opts = config.run_options().normalize();
    opts.validate()?;

    let selected = registry.filtered(opts.include_slow, &opts.thread_counts);
    info!(
        selected = selected.len(),
        registered = registry.len(),
        "algorithms selected"
    );

    let presenter = CLIResultPresenter::new(opts.verbose, opts.quiet);

    if selected.is_empty() {
        info!("no algorithms to run after filtering");
        presenter.run_finished(&RunOutcome::default());
        return Ok(RunStatus::Clean);
    }

    let runtime = HttpRuntime::new(config.base_url.clone(), config.timeout_duration())?;
    info!(instances = selected.len(), "provisioning algorithm instances");
    let collection = runtime.provision(&selected)?;

    let cancel = CancellationToken::new();
    ctrlc_handler(cancel.clone());

    let result = execute_run(&collection, &selected, &test, &opts, &cancel, &presenter);

    // Teardown is guaranteed once provisioning succeeded, fatal abort included.
    collection.close();
    let outcome = result?;

    presenter.run_finished(&outcome);

    match outcome.build_report(&test.transversals) {
        None => {
            info!(
                invocations = outcome.total(),
                "all invocations matched the reference transversals"
            );
            Ok(RunStatus::Clean)
        }
        Some(report) => {
            let failed = report.failed_count();
            warn!(
                failed,
                errors_file = %errors_path.display(),
                "dumping discrepancy report"
            );
            write_report(errors_path, &report)
                .with_context(|| format!("failed to write errors file {}", errors_path.display()))?;
            Ok(RunStatus::Discrepancies(failed))
        }
    }
}

fn ctrlc_handler(cancel: CancellationToken) {
    ctrlc::set_handler(move || {
        cancel.cancel();
    })
    .expect("Error setting Ctrl+C handler");
}
