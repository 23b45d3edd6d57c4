//! mhscheck — correctness harness for minimal-hitting-set algorithm services.

use mhscheck_core::constants::exit_codes;
use mhscheck_lib::{app, config, errors};

fn main() {
    let config = config::AppConfig::parse();

    // Initialize tracing; `-v` raises the default level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config::log_level(config.verbose).into()),
        )
        .init();

    let code = match app::run(&config) {
        Ok(app::RunStatus::Clean) => exit_codes::SUCCESS,
        Ok(app::RunStatus::Discrepancies(_)) => exit_codes::ERROR_DISCREPANCY,
        Err(err) => {
            mhscheck_cli::ui::print_error(&format!("{err:#}"));
            errors::handle_error(&err)
        }
    };
    std::process::exit(code);
}
