//! Invocation identity.

use std::fmt;

/// Identifies one test execution: an algorithm name plus the thread count
/// requested of its instance. Labels follow the `"{name}-t{count}"` wire
/// convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvocationKey {
    /// Algorithm name, unique within a run.
    pub algorithm: String,
    /// Degree of parallelism requested of the instance.
    pub threads: usize,
}

impl InvocationKey {
    /// Create a key for one (algorithm, thread count) pair.
    #[must_use]
    pub fn new(algorithm: impl Into<String>, threads: usize) -> Self {
        Self {
            algorithm: algorithm.into(),
            threads,
        }
    }
}

impl fmt::Display for InvocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-t{}", self.algorithm, self.threads)
    }
}
