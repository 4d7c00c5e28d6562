//! Minimal JSON-RPC 2.0 client shared by the Neon operator and Solana
//! settlement lookups.
//!
//! One POST per call, no batching, no retries. Every request carries an
//! explicit timeout so a dead endpoint cannot hang the run.

use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::error::{CheckError, Result};

/// Per-request timeout used when the CLI does not override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
}

impl RpcClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CheckError::Rpc(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            url: url.to_string(),
        })
    }

    /// POST a single JSON-RPC call and return the full response body.
    pub async fn call_raw(&self, method: &str, params: Value) -> Result<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        debug!(method, url = %self.url, "sending JSON-RPC request");
        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CheckError::Rpc(format!("{}: {}", self.url, e)))?;
        let value: Value = response
            .json()
            .await
            .map_err(|e| CheckError::Rpc(format!("{}: invalid JSON response: {}", self.url, e)))?;
        debug!(method, "received JSON-RPC response");
        Ok(value)
    }

    /// POST a call and extract its `result` field.
    ///
    /// A `null` result is a valid answer ("not found") and comes back as
    /// `Value::Null`. A response carrying an `error` object becomes
    /// [`CheckError::Rpc`]; a response with neither field becomes
    /// [`CheckError::ProtocolResponse`].
    pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let mut value = self.call_raw(method, params).await?;
        if let Some(result) = value.get_mut("result") {
            return Ok(result.take());
        }
        if let Some(error) = value.get("error") {
            return Err(CheckError::Rpc(format!(
                "{} returned an error: {}",
                method, error
            )));
        }
        Err(CheckError::ProtocolResponse(format!(
            "{} response has no result field: {}",
            method, value
        )))
    }
}
