//! Run options and normalization.

use crate::constants::DEFAULT_THREAD_COUNT;
use crate::error::HarnessError;

/// Options governing one verification run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Thread counts to request from threads-capable algorithms, in caller
    /// order. Empty means unspecified.
    pub thread_counts: Vec<usize>,
    /// Whether algorithms flagged `slow` are exercised.
    pub include_slow: bool,
    /// Whether invocations run concurrently (results are still reported in
    /// canonical order).
    pub parallel: bool,
    /// Whether to show verbose output.
    pub verbose: bool,
    /// Whether to suppress per-invocation output.
    pub quiet: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            thread_counts: vec![DEFAULT_THREAD_COUNT],
            include_slow: false,
            parallel: false,
            verbose: false,
            quiet: false,
        }
    }
}

impl RunOptions {
    /// Normalize options: an unspecified thread-count list becomes `[1]`,
    /// duplicates collapse keeping first occurrence.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.thread_counts.is_empty() {
            self.thread_counts = vec![DEFAULT_THREAD_COUNT];
        } else {
            let mut seen = Vec::with_capacity(self.thread_counts.len());
            for t in self.thread_counts.drain(..) {
                if !seen.contains(&t) {
                    seen.push(t);
                }
            }
            self.thread_counts = seen;
        }
        self
    }

    /// Reject non-positive thread counts.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.thread_counts.contains(&0) {
            return Err(HarnessError::Config(
                "thread counts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = RunOptions::default();
        assert_eq!(opts.thread_counts, vec![1]);
        assert!(!opts.include_slow);
        assert!(!opts.parallel);
    }

    #[test]
    fn normalize_empty_thread_counts() {
        let opts = RunOptions {
            thread_counts: vec![],
            ..Default::default()
        }
        .normalize();
        assert_eq!(opts.thread_counts, vec![DEFAULT_THREAD_COUNT]);
    }

    #[test]
    fn normalize_dedups_preserving_order() {
        let opts = RunOptions {
            thread_counts: vec![4, 1, 4, 2, 1],
            ..Default::default()
        }
        .normalize();
        assert_eq!(opts.thread_counts, vec![4, 1, 2]);
    }

    #[test]
    fn validate_rejects_zero() {
        let opts = RunOptions {
            thread_counts: vec![1, 0],
            ..Default::default()
        };
        assert!(matches!(opts.validate(), Err(HarnessError::Config(_))));
    }

    #[test]
    fn validate_accepts_positive() {
        let opts = RunOptions {
            thread_counts: vec![1, 2, 8],
            ..Default::default()
        };
        assert!(opts.validate().is_ok());
    }
}
