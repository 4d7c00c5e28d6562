//! Cross-chain debugging of a Neon transaction.
//!
//! Pulls the vendor extended receipt from the operator that holds it and,
//! when the transaction failed, chases each failed Solana sub-transaction
//! on the settlement chain to recover its log output.

use serde_json::{json, Value};

use crate::error::{CheckError, Result};
use crate::rpc::RpcClient;
use crate::transaction::{parse_hex_quantity, ExtendedReceipt, SettlementLogBundle, TxHash};

/// Fetch the vendor extended receipt for a transaction.
pub async fn fetch_extended_receipt(
    operator: &RpcClient,
    hash: &TxHash,
) -> Result<ExtendedReceipt> {
    let result = operator
        .call("neon_getTransactionReceipt", json!([hash.as_str()]))
        .await?;
    if result.is_null() {
        return Err(CheckError::ProtocolResponse(format!(
            "operator returned no extended receipt for {}",
            hash
        )));
    }
    serde_json::from_value(result)
        .map_err(|e| CheckError::ProtocolResponse(format!("malformed extended receipt: {}", e)))
}

/// Gas limit the sender attached to the transaction; serves as the estimate
/// side of the efficiency figure.
pub async fn fetch_gas_estimate(operator: &RpcClient, hash: &TxHash) -> Result<u64> {
    let result = operator
        .call("eth_getTransactionByHash", json!([hash.as_str()]))
        .await?;
    let gas = result
        .get("gas")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            CheckError::ProtocolResponse(format!("transaction {} has no gas field", hash))
        })?;
    parse_hex_quantity(gas)
}

/// used / estimate as a percentage, for two-decimal display.
pub fn gas_efficiency(gas_used: u64, gas_estimate: u64) -> f64 {
    if gas_estimate == 0 {
        return 0.0;
    }
    gas_used as f64 / gas_estimate as f64 * 100.0
}

/// Look up one failed sub-transaction on the settlement chain and bundle
/// its log messages.
///
/// A `null` result is an inconsistency: the receipt referenced a signature
/// the settlement chain does not know.
pub async fn fetch_settlement_logs(
    solana: &RpcClient,
    signature: &str,
) -> Result<SettlementLogBundle> {
    let result = solana
        .call(
            "getTransaction",
            json!([signature, {"encoding": "json", "maxSupportedTransactionVersion": 0}]),
        )
        .await?;
    if result.is_null() {
        return Err(CheckError::InconsistentState(format!(
            "settlement transaction {} not found",
            signature
        )));
    }
    let messages = result
        .pointer("/meta/logMessages")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            CheckError::ProtocolResponse(format!(
                "settlement transaction {} has no log messages",
                signature
            ))
        })?;
    let logs = messages
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();
    Ok(SettlementLogBundle::new(signature.to_string(), logs))
}

/// Collect log bundles for every failed sub-transaction, in receipt order.
///
/// A failed receipt with zero failed sub-transactions is an observable
/// anomaly and is reported as such rather than silently ignored.
pub async fn debug_failures(
    solana: &RpcClient,
    hash: &TxHash,
    receipt: &ExtendedReceipt,
) -> Result<Vec<SettlementLogBundle>> {
    let failed = receipt.failed_signatures();
    if failed.is_empty() {
        return Err(CheckError::InconsistentState(format!(
            "transaction {} is failed but no failed Solana transaction was found",
            hash
        )));
    }
    let mut bundles = Vec::with_capacity(failed.len());
    for signature in failed {
        bundles.push(fetch_settlement_logs(solana, signature).await?);
    }
    Ok(bundles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gas_efficiency_is_a_percentage() {
        assert_eq!(gas_efficiency(5_000, 10_000), 50.0);
        assert_eq!(gas_efficiency(10_000, 10_000), 100.0);
        assert_eq!(format!("{:.2}", gas_efficiency(1, 3)), "33.33");
    }

    #[test]
    fn gas_efficiency_tolerates_zero_estimate() {
        assert_eq!(gas_efficiency(5_000, 0), 0.0);
    }

    #[tokio::test]
    async fn failed_receipt_without_failed_subtransactions_is_inconsistent() {
        let receipt: ExtendedReceipt = serde_json::from_str(
            r#"{
                "status": "0x0",
                "gasUsed": "0x0",
                "solanaTransactions": [
                    {"solanaTransactionIsSuccess": true, "solanaTransactionSignature": "sigA"}
                ]
            }"#,
        )
        .expect("receipt json");
        // The endpoint is never contacted: the inconsistency is detected first.
        let solana = RpcClient::new("http://127.0.0.1:1", std::time::Duration::from_secs(1))
            .expect("client");
        let hash = TxHash::parse(&format!("0x{}", "2".repeat(64))).expect("hash");
        let err = debug_failures(&solana, &hash, &receipt).await.unwrap_err();
        assert!(matches!(err, CheckError::InconsistentState(_)));
    }
}
