//! Transaction identifiers and receipt types
//!
//! Covers the pieces of chain data this tool consumes: the Neon transaction
//! hash given on the command line, the vendor extended receipt returned by
//! `neon_getTransactionReceipt`, and the log bundle pulled from a failed
//! Solana sub-transaction.

use serde::Deserialize;
use std::fmt;

use crate::error::{CheckError, Result};

/// A validated Neon transaction hash: `0x` followed by 64 hex digits.
///
/// Validation is purely syntactic; an all-zero hash is well formed and is
/// deliberately not special-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxHash(String);

impl TxHash {
    pub fn parse(raw: &str) -> Result<Self> {
        let digits = raw.strip_prefix("0x").ok_or_else(|| {
            CheckError::Validation(format!("{}: missing 0x prefix", raw))
        })?;
        if digits.len() != 64 {
            return Err(CheckError::Validation(format!(
                "{}: expected 64 hex digits, got {}",
                raw,
                digits.len()
            )));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CheckError::Validation(format!(
                "{}: contains non-hex characters",
                raw
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Decode an `0x`-prefixed JSON-RPC quantity.
pub fn parse_hex_quantity(raw: &str) -> Result<u64> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    u64::from_str_radix(digits, 16).map_err(|e| {
        CheckError::ProtocolResponse(format!("bad hex quantity '{}': {}", raw, e))
    })
}

/// Extended receipt returned by the vendor `neon_getTransactionReceipt`
/// method. Only the fields this tool reads are modeled.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedReceipt {
    status: String,
    gas_used: String,
    #[serde(default)]
    solana_transactions: Vec<SolanaTxRef>,
}

impl ExtendedReceipt {
    /// Receipt status: anything other than `0x0` counts as success.
    pub fn is_success(&self) -> bool {
        self.status != "0x0"
    }

    pub fn gas_used(&self) -> Result<u64> {
        parse_hex_quantity(&self.gas_used)
    }

    /// Settlement sub-transactions in receipt order.
    pub fn solana_transactions(&self) -> &[SolanaTxRef] {
        &self.solana_transactions
    }

    /// Signatures of the unsuccessful sub-transactions, receipt order preserved.
    pub fn failed_signatures(&self) -> Vec<&str> {
        self.solana_transactions
            .iter()
            .filter(|tx| !tx.is_success)
            .map(|tx| tx.signature.as_str())
            .collect()
    }
}

/// Reference to one Solana sub-transaction inside an extended receipt.
#[derive(Debug, Clone, Deserialize)]
pub struct SolanaTxRef {
    #[serde(rename = "solanaTransactionIsSuccess")]
    pub is_success: bool,
    #[serde(rename = "solanaTransactionSignature")]
    pub signature: String,
}

/// Log output of one failed Solana sub-transaction, in execution order.
#[derive(Debug, Clone)]
pub struct SettlementLogBundle {
    pub signature: String,
    pub logs: Vec<String>,
}

impl SettlementLogBundle {
    pub fn new(signature: String, logs: Vec<String>) -> Self {
        Self { signature, logs }
    }

    /// The failure reason heuristic: the last log line. A deliberate
    /// simplification, not a root-cause analysis.
    pub fn reason(&self) -> &str {
        self.logs
            .last()
            .map(String::as_str)
            .unwrap_or("<no log messages>")
    }
}
