//! Shared test input: hypergraph edges and ground-truth transversals.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;
use crate::transversal::{Token, TransversalSet};

/// The shared test input, loaded once and immutable for the run.
///
/// Raw element order is preserved exactly as loaded: the wire input forwards
/// the document verbatim and the final report echoes `transversals` as given.
/// Semantically the order never matters; the canonical ground truth is
/// derived through [`TestCase::ground_truth`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    /// The hypergraph's edge sets.
    pub sets: Vec<Vec<Token>>,
    /// The complete collection of minimal hitting sets.
    pub transversals: Vec<Vec<Token>>,
}

impl TestCase {
    /// Parse a test-data document.
    pub fn from_str(data: &str) -> Result<Self, HarnessError> {
        serde_json::from_str(data)
            .map_err(|e| HarnessError::Config(format!("invalid test data: {e}")))
    }

    /// Load a test-data document from a file.
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let data = fs::read_to_string(path).map_err(|e| {
            HarnessError::Config(format!("cannot read test data {}: {e}", path.display()))
        })?;
        Self::from_str(&data)
    }

    /// The canonical ground truth, computed once per run.
    #[must_use]
    pub fn ground_truth(&self) -> TransversalSet {
        TransversalSet::from_lists(&self.transversals)
    }

    /// The serialized input submitted to every algorithm instance: the whole
    /// document, element order as loaded.
    pub fn wire_input(&self) -> Result<String, HarnessError> {
        serde_json::to_string(self)
            .map_err(|e| HarnessError::Config(format!("cannot serialize test input: {e}")))
    }
}
