//! # mhscheck-runtime
//!
//! The external-collaborator boundary: service-runtime traits, the HTTP
//! adapter, and the per-invocation invoker.

pub mod http;
pub mod invoker;
pub mod service;

pub use http::HttpRuntime;
pub use invoker::{parse_response, run_invocation};
pub use service::{AlgorithmInstance, ServiceCollection, ServiceRuntime};
