//! Algorithm registry: descriptor parsing and capability filtering.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::constants::DEFAULT_THREAD_COUNT;
use crate::error::HarnessError;

/// One candidate algorithm and its declared capabilities.
///
/// Capability flags are explicit optional fields defaulted at load time, so
/// checks downstream are plain boolean predicates.
#[derive(Debug, Clone, Deserialize)]
pub struct AlgorithmDescriptor {
    /// Algorithm name, unique within a run.
    #[serde(rename = "algName")]
    pub name: String,

    /// Opaque handle for the external provisioning collaborator.
    #[serde(rename = "containerName", default)]
    pub container: Option<String>,

    /// Explicit service endpoint, overriding base-URL resolution.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Whether this algorithm is too slow for routine runs.
    #[serde(default)]
    pub slow: bool,

    /// Whether the algorithm accepts a requested degree of parallelism.
    #[serde(default)]
    pub threads: bool,
}

/// The full descriptor list, as loaded from the registry document.
#[derive(Debug, Clone, Deserialize)]
pub struct AlgorithmRegistry {
    /// Candidate algorithms in registry order.
    pub containers: Vec<AlgorithmDescriptor>,
}

impl AlgorithmRegistry {
    /// Parse a registry document.
    ///
    /// Duplicate algorithm names are rejected: they would produce colliding
    /// invocation keys.
    pub fn from_str(data: &str) -> Result<Self, HarnessError> {
        let registry: AlgorithmRegistry = serde_json::from_str(data)
            .map_err(|e| HarnessError::Config(format!("invalid algorithm list: {e}")))?;

        for (i, desc) in registry.containers.iter().enumerate() {
            if registry.containers[..i].iter().any(|d| d.name == desc.name) {
                return Err(HarnessError::Config(format!(
                    "duplicate algorithm name in registry: {}",
                    desc.name
                )));
            }
        }

        Ok(registry)
    }

    /// Load a registry document from a file.
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let data = fs::read_to_string(path).map_err(|e| {
            HarnessError::Config(format!("cannot read algorithm list {}: {e}", path.display()))
        })?;
        Self::from_str(&data)
    }

    /// Number of registered algorithms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Filter descriptors by requested options, preserving registry order.
    ///
    /// Slow algorithms are dropped unless `include_slow`. Algorithms without
    /// thread support are dropped whenever the caller is not asking for
    /// single-threaded runs at all. An empty result is not an error.
    #[must_use]
    pub fn filtered(
        &self,
        include_slow: bool,
        thread_counts: &[usize],
    ) -> Vec<AlgorithmDescriptor> {
        let single_threaded_requested = thread_counts.contains(&DEFAULT_THREAD_COUNT);

        self.containers
            .iter()
            .filter(|desc| {
                if desc.slow && !include_slow {
                    debug!(algorithm = %desc.name, "excluding slow algorithm");
                    return false;
                }
                if !desc.threads && !single_threaded_requested {
                    debug!(
                        algorithm = %desc.name,
                        "excluding single-threaded algorithm: no single-threaded run requested"
                    );
                    return false;
                }
                true
            })
            .cloned()
            .collect()
    }
}
