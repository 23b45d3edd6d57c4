//! Service-runtime boundary traits.
//!
//! `ServiceRuntime` provisions live instances from descriptors;
//! `AlgorithmInstance` is one reachable algorithm service. The harness core
//! only ever talks to these traits — the HTTP adapter is one implementation,
//! test doubles are another.

use mhscheck_core::error::HarnessError;
use mhscheck_core::invocation::InvocationKey;
use mhscheck_core::registry::AlgorithmDescriptor;
use tracing::debug;

/// One live algorithm service instance.
pub trait AlgorithmInstance: Send + Sync {
    /// The algorithm name this instance serves.
    fn name(&self) -> &str;

    /// Submit serialized test input and return the raw response payload.
    ///
    /// The requested degree of parallelism is carried by the key; instances
    /// for algorithms without thread support only ever see `threads == 1`.
    fn invoke(&self, key: &InvocationKey, input: &str) -> Result<String, HarnessError>;

    /// Release the instance. Best-effort; runs once per instance after the
    /// run completes or aborts.
    fn teardown(&self) -> Result<(), HarnessError>;
}

/// The external provisioning collaborator.
pub trait ServiceRuntime {
    /// Start or locate one live instance per descriptor.
    fn provision(
        &self,
        descriptors: &[AlgorithmDescriptor],
    ) -> Result<ServiceCollection, HarnessError>;
}

/// The set of live instances for one run.
pub struct ServiceCollection {
    instances: Vec<Box<dyn AlgorithmInstance>>,
}

impl ServiceCollection {
    /// Wrap provisioned instances.
    #[must_use]
    pub fn new(instances: Vec<Box<dyn AlgorithmInstance>>) -> Self {
        Self { instances }
    }

    /// Look up a live instance by algorithm name.
    #[must_use]
    pub fn instance(&self, name: &str) -> Option<&dyn AlgorithmInstance> {
        self.instances
            .iter()
            .find(|i| i.name() == name)
            .map(AsRef::as_ref)
    }

    /// Number of live instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the collection holds no instances.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Tear down every instance. Failures are logged and swallowed: teardown
    /// must not mask the run's own outcome.
    pub fn close(&self) {
        for instance in &self.instances {
            if let Err(e) = instance.teardown() {
                debug!(algorithm = instance.name(), error = %e, "teardown failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakeInstance {
        name: String,
        torn_down: Arc<AtomicUsize>,
    }

    impl AlgorithmInstance for FakeInstance {
        fn name(&self) -> &str {
            &self.name
        }

        fn invoke(&self, _key: &InvocationKey, _input: &str) -> Result<String, HarnessError> {
            Ok(r#"{"transversals": []}"#.to_string())
        }

        fn teardown(&self) -> Result<(), HarnessError> {
            self.torn_down.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    fn collection(names: &[&str], counter: &Arc<AtomicUsize>) -> ServiceCollection {
        ServiceCollection::new(
            names
                .iter()
                .map(|n| {
                    Box::new(FakeInstance {
                        name: (*n).to_string(),
                        torn_down: Arc::clone(counter),
                    }) as Box<dyn AlgorithmInstance>
                })
                .collect(),
        )
    }

    #[test]
    fn lookup_by_name() {
        let counter = Arc::new(AtomicUsize::new(0));
        let coll = collection(&["agdmhs", "pmmcs"], &counter);
        assert!(coll.instance("pmmcs").is_some());
        assert!(coll.instance("missing").is_none());
        assert_eq!(coll.len(), 2);
    }

    #[test]
    fn close_tears_down_every_instance() {
        let counter = Arc::new(AtomicUsize::new(0));
        let coll = collection(&["a", "b", "c"], &counter);
        coll.close();
        assert_eq!(counter.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn empty_collection() {
        let coll = ServiceCollection::new(vec![]);
        assert!(coll.is_empty());
        coll.close();
    }
}
