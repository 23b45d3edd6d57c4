//! Instance invoker: submit input, parse the answer defensively, normalize.

use serde::Deserialize;
use tracing::debug;

use mhscheck_core::error::HarnessError;
use mhscheck_core::invocation::InvocationKey;
use mhscheck_core::transversal::TransversalSet;

use crate::service::AlgorithmInstance;

/// The payload shape every algorithm must return. Extra fields are ignored;
/// deserializing through `TransversalSet` is the normalization step.
#[derive(Debug, Deserialize)]
struct AlgorithmResponse {
    transversals: TransversalSet,
}

/// Parse a raw response payload into a normalized transversal collection.
///
/// Any failure — invalid JSON, missing field, wrong element types — is a
/// fatal [`HarnessError::MalformedResponse`] carrying the invocation key and
/// the payload verbatim. Malformed output signals an integration fault, not
/// an algorithmic one, so it is never downgraded to a discrepancy.
pub fn parse_response(
    key: &InvocationKey,
    payload: &str,
) -> Result<TransversalSet, HarnessError> {
    let response: AlgorithmResponse =
        serde_json::from_str(payload).map_err(|_| HarnessError::MalformedResponse {
            key: key.to_string(),
            payload: payload.to_string(),
        })?;
    Ok(response.transversals)
}

/// Run one invocation: submit the serialized test case and parse the answer.
///
/// Stateless between calls; the only side effect is the network exchange.
pub fn run_invocation(
    instance: &dyn AlgorithmInstance,
    key: &InvocationKey,
    input: &str,
) -> Result<TransversalSet, HarnessError> {
    debug!(invocation = %key, "submitting test input");
    let payload = instance.invoke(key, input)?;
    let reported = parse_response(key, &payload)?;
    debug!(invocation = %key, transversals = reported.len(), "response parsed");
    Ok(reported)
}
