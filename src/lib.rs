//! neon-txcheck - one-shot diagnostics for a Neon transaction
//!
//! Given a transaction hash, the tool asks every configured operator
//! endpoint whether it knows the transaction and its receipt, then digs
//! into failures by cross-referencing the Solana settlement chain.
//!
//! # Modules
//!
//! - [`operators`] - per-endpoint existence checks and the operator survey
//! - [`debugger`] - extended receipt lookup and settlement-chain log retrieval
//! - [`persistence`] - log files written per failed sub-transaction
//! - [`rpc`] - JSON-RPC client shared by both chains
//! - [`transaction`] - hash validation and receipt types
//! - [`config`] - endpoint configuration
//! - [`error`] - error types

#![forbid(unsafe_code)]

pub mod config;
pub mod debugger;
pub mod error;
pub mod operators;
pub mod persistence;
pub mod rpc;
pub mod transaction;
