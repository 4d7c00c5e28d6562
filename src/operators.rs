//! Existence checks against the configured operator endpoints.
//!
//! Each endpoint is probed independently; a probe has three outcomes so that
//! a connectivity problem is never mistaken for a missing transaction.

use serde_json::json;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::rpc::RpcClient;
use crate::transaction::TxHash;

/// What a single operator endpoint knows about a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Exists,
    /// The endpoint answered with a `null` result. Absence is a valid
    /// answer, not an error.
    Missing,
    /// Transport or RPC failure, surfaced distinctly from `Missing`.
    Unreachable(String),
}

/// Which record the existence phase asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Transaction,
    Receipt,
}

impl Record {
    pub fn method(self) -> &'static str {
        match self {
            Record::Transaction => "eth_getTransactionByHash",
            Record::Receipt => "eth_getTransactionReceipt",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Record::Transaction => "Transaction",
            Record::Receipt => "Receipt",
        }
    }
}

/// Outcome of surveying every configured operator for one record kind.
#[derive(Debug)]
pub struct Survey {
    /// Per-endpoint outcome, in configuration order.
    pub outcomes: Vec<(String, Probe)>,
    /// First operator that reported the record, with its endpoint URL.
    pub holder: Option<(String, String)>,
}

/// Ask a single endpoint whether it knows the record.
pub async fn probe(hash: &TxHash, url: &str, record: Record, timeout: Duration) -> Probe {
    let client = match RpcClient::new(url, timeout) {
        Ok(client) => client,
        Err(e) => return Probe::Unreachable(e.to_string()),
    };
    match client.call(record.method(), json!([hash.as_str()])).await {
        Ok(value) if value.is_null() => Probe::Missing,
        Ok(_) => Probe::Exists,
        Err(e) => Probe::Unreachable(e.to_string()),
    }
}

/// Survey every configured operator in order and keep the first holder.
///
/// Every endpoint is probed regardless of earlier answers, so the report
/// always covers the full operator set.
pub async fn survey(
    hash: &TxHash,
    operators: &BTreeMap<String, String>,
    record: Record,
    timeout: Duration,
) -> Survey {
    let mut outcomes = Vec::with_capacity(operators.len());
    let mut holder = None;
    for (name, url) in operators {
        let outcome = probe(hash, url, record, timeout).await;
        if holder.is_none() && outcome == Probe::Exists {
            holder = Some((name.clone(), url.clone()));
        }
        outcomes.push((name.clone(), outcome));
    }
    Survey { outcomes, holder }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_methods_match_the_rpc_surface() {
        assert_eq!(Record::Transaction.method(), "eth_getTransactionByHash");
        assert_eq!(Record::Receipt.method(), "eth_getTransactionReceipt");
        assert_eq!(Record::Transaction.label(), "Transaction");
        assert_eq!(Record::Receipt.label(), "Receipt");
    }

    #[tokio::test]
    async fn closed_port_is_unreachable_not_missing() {
        let hash = TxHash::parse(&format!("0x{}", "1".repeat(64))).expect("hash");
        let outcome = probe(
            &hash,
            "http://127.0.0.1:1",
            Record::Transaction,
            Duration::from_secs(1),
        )
        .await;
        assert!(matches!(outcome, Probe::Unreachable(_)));
    }
}
