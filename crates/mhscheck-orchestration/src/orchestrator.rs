//! Core orchestration: drive every invocation and accumulate records.

use std::time::Instant;

use tracing::{debug, info};

use mhscheck_core::compare::compare;
use mhscheck_core::error::HarnessError;
use mhscheck_core::invocation::InvocationKey;
use mhscheck_core::options::RunOptions;
use mhscheck_core::progress::CancellationToken;
use mhscheck_core::registry::AlgorithmDescriptor;
use mhscheck_core::testcase::TestCase;
use mhscheck_core::transversal::TransversalSet;
use mhscheck_runtime::invoker::run_invocation;
use mhscheck_runtime::service::ServiceCollection;

use crate::interfaces::{InvocationRecord, ResultPresenter, RunOutcome};
use crate::selection::plan_invocations;

/// Execute the full verification run.
///
/// Invocations follow the canonical plan: descriptors in registry order, each
/// expanded to its applicable thread counts. The sequential mode is the
/// reference; `opts.parallel` runs invocations concurrently but the record
/// sequence and any surfaced fatal error are identical to the sequential
/// mode's.
///
/// A fatal error (transport, malformed response, missing instance,
/// cancellation) aborts the run immediately; the accumulated records are
/// discarded and no report can be built.
pub fn execute_run(
    collection: &ServiceCollection,
    descriptors: &[AlgorithmDescriptor],
    test: &TestCase,
    opts: &RunOptions,
    cancel: &CancellationToken,
    presenter: &dyn ResultPresenter,
) -> Result<RunOutcome, HarnessError> {
    let wire_input = test.wire_input()?;
    let truth = test.ground_truth();
    let plan = plan_invocations(descriptors, &opts.thread_counts);

    presenter.run_started(plan.len());
    info!(
        algorithms = descriptors.len(),
        invocations = plan.len(),
        parallel = opts.parallel,
        "running algorithms"
    );

    let records = if opts.parallel {
        execute_parallel(collection, &plan, &wire_input, &truth, cancel, presenter)?
    } else {
        execute_sequential(collection, &plan, &wire_input, &truth, cancel, presenter)?
    };

    Ok(RunOutcome::new(records))
}

fn execute_sequential(
    collection: &ServiceCollection,
    plan: &[InvocationKey],
    wire_input: &str,
    truth: &TransversalSet,
    cancel: &CancellationToken,
    presenter: &dyn ResultPresenter,
) -> Result<Vec<InvocationRecord>, HarnessError> {
    let mut records = Vec::with_capacity(plan.len());
    for key in plan {
        let record = run_one(collection, key, wire_input, truth, cancel)?;
        presenter.invocation_finished(&record);
        records.push(record);
    }
    Ok(records)
}

fn execute_parallel(
    collection: &ServiceCollection,
    plan: &[InvocationKey],
    wire_input: &str,
    truth: &TransversalSet,
    cancel: &CancellationToken,
    presenter: &dyn ResultPresenter,
) -> Result<Vec<InvocationRecord>, HarnessError> {
    use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

    // Indexed collect keeps plan order, so the canonical record sequence and
    // the earliest planned fatal error are reproduced exactly.
    let results: Vec<Result<InvocationRecord, HarnessError>> = plan
        .par_iter()
        .map(|key| run_one(collection, key, wire_input, truth, cancel))
        .collect();

    let mut records = Vec::with_capacity(results.len());
    for result in results {
        let record = result?;
        presenter.invocation_finished(&record);
        records.push(record);
    }
    Ok(records)
}

fn run_one(
    collection: &ServiceCollection,
    key: &InvocationKey,
    wire_input: &str,
    truth: &TransversalSet,
    cancel: &CancellationToken,
) -> Result<InvocationRecord, HarnessError> {
    cancel.check_cancelled()?;

    let instance = collection.instance(&key.algorithm).ok_or_else(|| {
        HarnessError::Provisioning(format!("no live instance for algorithm {}", key.algorithm))
    })?;

    let start = Instant::now();
    let reported = run_invocation(instance, key, wire_input)?;
    let duration = start.elapsed();

    let discrepancy = compare(&reported, truth);
    match &discrepancy {
        None => debug!(invocation = %key, "algorithm passed"),
        Some(report) => debug!(
            invocation = %key,
            false_includes = report.false_includes.len(),
            false_excludes = report.false_excludes.len(),
            "algorithm failed"
        ),
    }

    Ok(InvocationRecord {
        key: key.clone(),
        discrepancy,
        duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use mhscheck_core::transversal::Token;
    use mhscheck_runtime::service::AlgorithmInstance;

    use crate::interfaces::NullPresenter;

    struct ScriptedInstance {
        name: String,
        payload: String,
        invocations: Arc<AtomicUsize>,
    }

    impl AlgorithmInstance for ScriptedInstance {
        fn name(&self) -> &str {
            &self.name
        }

        fn invoke(&self, _key: &InvocationKey, _input: &str) -> Result<String, HarnessError> {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            Ok(self.payload.clone())
        }

        fn teardown(&self) -> Result<(), HarnessError> {
            Ok(())
        }
    }

    fn descriptor(name: &str, threads: bool) -> AlgorithmDescriptor {
        AlgorithmDescriptor {
            name: name.to_string(),
            container: None,
            endpoint: None,
            slow: false,
            threads,
        }
    }

    fn test_case() -> TestCase {
        TestCase::from_str(r#"{"sets": [[1,2],[3]], "transversals": [[1,2],[3]]}"#).unwrap()
    }

    fn collection(
        scripts: &[(&str, &str)],
        counter: &Arc<AtomicUsize>,
    ) -> ServiceCollection {
        ServiceCollection::new(
            scripts
                .iter()
                .map(|(name, payload)| {
                    Box::new(ScriptedInstance {
                        name: (*name).to_string(),
                        payload: (*payload).to_string(),
                        invocations: Arc::clone(counter),
                    }) as Box<dyn AlgorithmInstance>
                })
                .collect(),
        )
    }

    const CORRECT: &str = r#"{"transversals": [[2,1],[3]]}"#;
    const WRONG: &str = r#"{"transversals": [[1,2],[4]]}"#;

    fn opts(thread_counts: &[usize], parallel: bool) -> RunOptions {
        RunOptions {
            thread_counts: thread_counts.to_vec(),
            parallel,
            ..Default::default()
        }
    }

    #[test]
    fn concrete_scenario() {
        // A passes, B fails both ways, C (threads-capable) passes at 1 and 2.
        let counter = Arc::new(AtomicUsize::new(0));
        let coll = collection(&[("A", CORRECT), ("B", WRONG), ("C", CORRECT)], &counter);
        let descriptors = vec![
            descriptor("A", false),
            descriptor("B", false),
            descriptor("C", true),
        ];
        let cancel = CancellationToken::new();

        let outcome = execute_run(
            &coll,
            &descriptors,
            &test_case(),
            &opts(&[1, 2], false),
            &cancel,
            &NullPresenter,
        )
        .unwrap();

        let labels: Vec<String> = outcome.records.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(labels, ["A-t1", "B-t1", "C-t1", "C-t2"]);
        assert_eq!(outcome.failed_count(), 1);

        let report = outcome.build_report(&test_case().transversals).unwrap();
        assert_eq!(report.alg_errors.len(), 1);
        assert_eq!(report.alg_errors[0].alg_name, "B-t1");
        let errors = &report.alg_errors[0].errors;
        assert_eq!(
            errors.false_includes,
            TransversalSet::from_lists(&[vec![Token::from(4)]])
        );
        assert_eq!(
            errors.false_excludes,
            TransversalSet::from_lists(&[vec![Token::from(3)]])
        );
    }

    #[test]
    fn clean_run_builds_no_report() {
        let counter = Arc::new(AtomicUsize::new(0));
        let coll = collection(&[("A", CORRECT)], &counter);
        let descriptors = vec![descriptor("A", false)];
        let cancel = CancellationToken::new();

        let outcome = execute_run(
            &coll,
            &descriptors,
            &test_case(),
            &opts(&[1], false),
            &cancel,
            &NullPresenter,
        )
        .unwrap();

        assert!(outcome.all_passed());
        assert!(outcome.build_report(&test_case().transversals).is_none());
    }

    #[test]
    fn empty_plan_is_fully_successful() {
        let counter = Arc::new(AtomicUsize::new(0));
        let coll = collection(&[], &counter);
        let cancel = CancellationToken::new();

        let outcome = execute_run(
            &coll,
            &[],
            &test_case(),
            &opts(&[1], false),
            &cancel,
            &NullPresenter,
        )
        .unwrap();

        assert_eq!(outcome.total(), 0);
        assert!(outcome.all_passed());
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn malformed_response_aborts_before_later_invocations() {
        let counter = Arc::new(AtomicUsize::new(0));
        let coll = collection(
            &[("A", CORRECT), ("B", "garbage output"), ("C", CORRECT)],
            &counter,
        );
        let descriptors = vec![
            descriptor("A", false),
            descriptor("B", false),
            descriptor("C", false),
        ];
        let cancel = CancellationToken::new();

        let result = execute_run(
            &coll,
            &descriptors,
            &test_case(),
            &opts(&[1], false),
            &cancel,
            &NullPresenter,
        );

        match result {
            Err(HarnessError::MalformedResponse { key, payload }) => {
                assert_eq!(key, "B-t1");
                assert_eq!(payload, "garbage output");
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
        // A and B ran; C was never invoked.
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn missing_instance_is_provisioning_error() {
        let counter = Arc::new(AtomicUsize::new(0));
        let coll = collection(&[("A", CORRECT)], &counter);
        let descriptors = vec![descriptor("A", false), descriptor("ghost", false)];
        let cancel = CancellationToken::new();

        let result = execute_run(
            &coll,
            &descriptors,
            &test_case(),
            &opts(&[1], false),
            &cancel,
            &NullPresenter,
        );
        assert!(matches!(result, Err(HarnessError::Provisioning(_))));
    }

    #[test]
    fn cancelled_run_aborts() {
        let counter = Arc::new(AtomicUsize::new(0));
        let coll = collection(&[("A", CORRECT)], &counter);
        let descriptors = vec![descriptor("A", false)];
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = execute_run(
            &coll,
            &descriptors,
            &test_case(),
            &opts(&[1], false),
            &cancel,
            &NullPresenter,
        );
        assert!(matches!(result, Err(HarnessError::Cancelled)));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn parallel_records_keep_canonical_order() {
        let counter = Arc::new(AtomicUsize::new(0));
        let coll = collection(&[("A", CORRECT), ("B", WRONG), ("C", CORRECT)], &counter);
        let descriptors = vec![
            descriptor("A", false),
            descriptor("B", false),
            descriptor("C", true),
        ];
        let cancel = CancellationToken::new();

        let outcome = execute_run(
            &coll,
            &descriptors,
            &test_case(),
            &opts(&[1, 2], true),
            &cancel,
            &NullPresenter,
        )
        .unwrap();

        let labels: Vec<String> = outcome.records.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(labels, ["A-t1", "B-t1", "C-t1", "C-t2"]);
        assert_eq!(outcome.failed_count(), 1);
    }

    #[test]
    fn parallel_fatal_still_aborts() {
        let counter = Arc::new(AtomicUsize::new(0));
        let coll = collection(&[("A", "not json")], &counter);
        let descriptors = vec![descriptor("A", false)];
        let cancel = CancellationToken::new();

        let result = execute_run(
            &coll,
            &descriptors,
            &test_case(),
            &opts(&[1], true),
            &cancel,
            &NullPresenter,
        );
        assert!(matches!(
            result,
            Err(HarnessError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn sequential_and_parallel_agree() {
        let descriptors = vec![descriptor("A", true), descriptor("B", false)];
        let cancel = CancellationToken::new();

        let run = |parallel: bool| {
            let counter = Arc::new(AtomicUsize::new(0));
            let coll = collection(&[("A", WRONG), ("B", CORRECT)], &counter);
            execute_run(
                &coll,
                &descriptors,
                &test_case(),
                &opts(&[2, 1], parallel),
                &cancel,
                &NullPresenter,
            )
            .unwrap()
        };

        let sequential = run(false);
        let parallel = run(true);
        let labels = |o: &RunOutcome| {
            o.records
                .iter()
                .map(|r| (r.key.to_string(), r.passed()))
                .collect::<Vec<_>>()
        };
        assert_eq!(labels(&sequential), labels(&parallel));
    }
}
