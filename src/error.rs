//! Error types for neon-txcheck

use thiserror::Error;

/// Everything that can stop a diagnostic run.
///
/// `Config`, `Validation` and `NotFound` are terminal for the whole run and
/// map to exit code 1. `ProtocolResponse` and `InconsistentState` abort the
/// cross-chain debug step only; the status already printed stays valid.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid transaction hash: {0}")]
    Validation(String),

    /// Carries the record kind ("Transaction" or "Receipt").
    #[error("{0} not found in operators")]
    NotFound(String),

    #[error("Unexpected RPC response: {0}")]
    ProtocolResponse(String),

    #[error("Inconsistent chain state: {0}")]
    InconsistentState(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, CheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_record() {
        let err = CheckError::NotFound("Transaction".to_string());
        assert_eq!(err.to_string(), "Transaction not found in operators");
        let err = CheckError::NotFound("Receipt".to_string());
        assert_eq!(err.to_string(), "Receipt not found in operators");
    }
}
