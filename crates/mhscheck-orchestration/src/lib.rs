//! # mhscheck-orchestration
//!
//! Invocation planning, run execution, and result accumulation.

pub mod interfaces;
pub mod orchestrator;
pub mod selection;

pub use interfaces::{InvocationRecord, NullPresenter, ResultPresenter, RunOutcome};
pub use orchestrator::execute_run;
pub use selection::{plan_invocations, thread_counts_for};
