//! Harness error type.
//!
//! Correctness discrepancies are NOT errors — they travel as
//! `Option<DiscrepancyReport>` through `Ok`. Every variant here is fatal to
//! the run, so callers cannot conflate an integration fault with an
//! algorithmic failure.

/// Error type for verification runs.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// Configuration error: unreadable or invalid input documents, bad options.
    #[error("configuration error: {0}")]
    Config(String),

    /// The service runtime could not start or reach an algorithm instance.
    #[error("provisioning failed: {0}")]
    Provisioning(String),

    /// An instance could not be reached or answered abnormally mid-run.
    #[error("transport error for {key}: {message}")]
    Transport {
        /// Invocation label ("name-tN").
        key: String,
        /// Transport-level failure description.
        message: String,
    },

    /// An instance returned a payload that does not parse into the expected
    /// result shape. Aborts the run; the raw payload is carried verbatim.
    #[error("algorithm {key} returned an unparsable response: {payload}")]
    MalformedResponse {
        /// Invocation label ("name-tN").
        key: String,
        /// The raw response body, untouched.
        payload: String,
    },

    /// Run was cancelled by the user.
    #[error("run cancelled")]
    Cancelled,
}
