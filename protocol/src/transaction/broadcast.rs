//! Broadcast records and the transport seam.
//!
//! A broadcast record is the JSON body posted to the node. Its field names
//! are part of the wire contract: the node matches them literally, so the
//! serde renames here must not drift.
//!
//! Transport is a seam: this crate defines the `request` shape and the two
//! endpoints, callers bring the HTTP.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Endpoint accepting registration broadcast records.
pub const REGISTER_CONTRACT_ENDPOINT: &str = "/contract/broadcast/register";

/// Endpoint accepting execution broadcast records.
pub const EXECUTE_CONTRACT_ENDPOINT: &str = "/contract/broadcast/execute";

/// A transport request failed, or a record could not be serialized for it.
#[derive(Debug, Error)]
#[error("request to {endpoint} failed: {reason}")]
pub struct TransportError {
    pub endpoint: String,
    pub reason: String,
}

/// The node request seam: `request(endpoint, body) -> response`.
///
/// Implementations own retries, authentication, and timeouts. Errors must
/// propagate; a failed broadcast leaves no state to roll back here.
pub trait Transport {
    fn request(
        &self,
        endpoint: &str,
        body: Option<&str>,
    ) -> Result<serde_json::Value, TransportError>;
}

/// A signed contract registration, ready to post.
///
/// Byte-string fields (`contract`, `initData`, `description`, `signature`,
/// `senderPublicKey`) are base-58 text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedRegisterContract {
    pub sender_public_key: String,
    pub contract: String,
    pub init_data: String,
    pub description: String,
    pub fee: u64,
    pub fee_scale: u16,
    pub timestamp: u64,
    pub signature: String,
}

/// A signed contract function execution, ready to post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedExecuteContract {
    pub sender_public_key: String,
    pub contract_id: String,
    pub function_index: u16,
    pub function_data: String,
    pub attachment: String,
    pub fee: u64,
    pub fee_scale: u16,
    pub timestamp: u64,
    pub signature: String,
}

fn post<T: Serialize>(
    transport: &dyn Transport,
    endpoint: &str,
    record: &T,
) -> Result<serde_json::Value, TransportError> {
    let body = serde_json::to_string(record).map_err(|e| TransportError {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })?;
    tracing::debug!(endpoint, "broadcasting transaction");
    transport.request(endpoint, Some(&body))
}

/// Post a registration record to the node.
pub fn broadcast_register(
    transport: &dyn Transport,
    record: &SignedRegisterContract,
) -> Result<serde_json::Value, TransportError> {
    post(transport, REGISTER_CONTRACT_ENDPOINT, record)
}

/// Post an execution record to the node.
pub fn broadcast_execute(
    transport: &dyn Transport,
    record: &SignedExecuteContract,
) -> Result<serde_json::Value, TransportError> {
    post(transport, EXECUTE_CONTRACT_ENDPOINT, record)
}
