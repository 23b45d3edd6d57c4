//! HTTP service-runtime adapter.
//!
//! Talks to already-running algorithm services over a small REST surface:
//! `GET /v1/health` at provision time, `POST /v1/config` to set parallelism
//! on threads-capable instances, `POST /v1/run` to submit input, and a
//! best-effort `POST /v1/shutdown` at teardown.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use tracing::debug;

use mhscheck_core::error::HarnessError;
use mhscheck_core::invocation::InvocationKey;
use mhscheck_core::registry::AlgorithmDescriptor;

use crate::service::{AlgorithmInstance, ServiceCollection, ServiceRuntime};

const HEALTH_PATH: &str = "/v1/health";
const CONFIG_PATH: &str = "/v1/config";
const RUN_PATH: &str = "/v1/run";
const SHUTDOWN_PATH: &str = "/v1/shutdown";

/// Maximum time to establish a TCP connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-backed service runtime.
pub struct HttpRuntime {
    client: Client,
    base_url: Option<String>,
}

impl HttpRuntime {
    /// Create a runtime with the given base URL and per-request timeout.
    ///
    /// The request timeout bounds the whole exchange (connection plus
    /// transfer); slow algorithms need a generous value.
    pub fn new(base_url: Option<String>, timeout: Duration) -> Result<Self, HarnessError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(timeout)
            .user_agent(concat!("mhscheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HarnessError::Provisioning(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client, base_url })
    }

    /// Resolve the endpoint for one descriptor: an explicit `endpoint` wins,
    /// otherwise `{base_url}/{name}`.
    fn resolve_endpoint(
        descriptor: &AlgorithmDescriptor,
        base_url: Option<&str>,
    ) -> Result<String, HarnessError> {
        if let Some(endpoint) = &descriptor.endpoint {
            return Ok(endpoint.trim_end_matches('/').to_string());
        }
        match base_url {
            Some(base) => Ok(format!(
                "{}/{}",
                base.trim_end_matches('/'),
                descriptor.name
            )),
            None => Err(HarnessError::Provisioning(format!(
                "algorithm {} has no endpoint and no base URL was given",
                descriptor.name
            ))),
        }
    }
}

impl ServiceRuntime for HttpRuntime {
    fn provision(
        &self,
        descriptors: &[AlgorithmDescriptor],
    ) -> Result<ServiceCollection, HarnessError> {
        let mut instances: Vec<Box<dyn AlgorithmInstance>> =
            Vec::with_capacity(descriptors.len());

        for desc in descriptors {
            let endpoint = Self::resolve_endpoint(desc, self.base_url.as_deref())?;
            let health_url = format!("{endpoint}{HEALTH_PATH}");
            let response = self.client.get(&health_url).send().map_err(|e| {
                HarnessError::Provisioning(format!("cannot reach {}: {e}", desc.name))
            })?;
            if let Err(status) = status_error(&response) {
                return Err(HarnessError::Provisioning(format!(
                    "health check for {} failed: {status}",
                    desc.name
                )));
            }
            debug!(algorithm = %desc.name, %endpoint, "instance is live");

            instances.push(Box::new(HttpInstance {
                name: desc.name.clone(),
                endpoint,
                threads_capable: desc.threads,
                client: self.client.clone(),
            }));
        }

        Ok(ServiceCollection::new(instances))
    }
}

/// One reachable algorithm service.
struct HttpInstance {
    name: String,
    endpoint: String,
    threads_capable: bool,
    client: Client,
}

impl HttpInstance {
    fn transport_err(key: &InvocationKey, message: String) -> HarnessError {
        HarnessError::Transport {
            key: key.to_string(),
            message,
        }
    }
}

impl AlgorithmInstance for HttpInstance {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, key: &InvocationKey, input: &str) -> Result<String, HarnessError> {
        if self.threads_capable {
            let config_url = format!("{}{CONFIG_PATH}", self.endpoint);
            let response = self
                .client
                .post(&config_url)
                .json(&serde_json::json!({ "threads": key.threads }))
                .send()
                .map_err(|e| Self::transport_err(key, e.to_string()))?;
            status_error(&response).map_err(|status| {
                Self::transport_err(key, format!("thread configuration rejected: {status}"))
            })?;
        }

        let run_url = format!("{}{RUN_PATH}", self.endpoint);
        let response = self
            .client
            .post(&run_url)
            .json(&serde_json::json!({ "input": input }))
            .send()
            .map_err(|e| Self::transport_err(key, e.to_string()))?;
        status_error(&response)
            .map_err(|status| Self::transport_err(key, format!("run rejected: {status}")))?;

        response
            .text()
            .map_err(|e| Self::transport_err(key, format!("cannot read response body: {e}")))
    }

    fn teardown(&self) -> Result<(), HarnessError> {
        let shutdown_url = format!("{}{SHUTDOWN_PATH}", self.endpoint);
        self.client
            .post(&shutdown_url)
            .json(&serde_json::json!({}))
            .send()
            .map_err(|e| HarnessError::Transport {
                key: self.name.clone(),
                message: format!("shutdown failed: {e}"),
            })?;
        Ok(())
    }
}

/// Describe a non-success HTTP status.
fn status_error(response: &Response) -> Result<(), String> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(format!(
            "HTTP {} - {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("unknown status")
        ))
    }
}
