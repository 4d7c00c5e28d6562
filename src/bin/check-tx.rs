#![forbid(unsafe_code)]
//! Check whether a Neon transaction is known to the configured operators
//! and, if it failed, explain why via the Solana settlement chain.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

use neon_txcheck::config::load_config;
use neon_txcheck::debugger;
use neon_txcheck::error::{CheckError, Result};
use neon_txcheck::operators::{self, Probe, Record, Survey};
use neon_txcheck::persistence;
use neon_txcheck::rpc::RpcClient;
use neon_txcheck::transaction::TxHash;

#[derive(Parser)]
#[command(author, version, about = "Check transaction exist in operators", long_about = None)]
struct Cli {
    /// Neon transaction hash (0x + 64 hex digits)
    tx_hash: String,

    /// Solana network name from the [solana] config section
    #[arg(long, default_value = "mainnet")]
    network: String,

    /// Output logs of failed solana transactions to stdout
    #[arg(long)]
    logs: bool,

    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = neon_txcheck::rpc::DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            ExitCode::from(1)
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = load_config(&cli.config)?;
    let solana_url = config.settlement_url(&cli.network)?.to_string();
    let hash = TxHash::parse(&cli.tx_hash)?;
    let timeout = Duration::from_secs(cli.timeout);
    let log_dir = PathBuf::from(persistence::DEFAULT_LOG_DIR);

    banner("Verify transaction exist in operators");
    let tx_survey = operators::survey(&hash, &config.rpc, Record::Transaction, timeout).await;
    print_survey(&tx_survey);
    if tx_survey.holder.is_none() {
        return Err(CheckError::NotFound(Record::Transaction.label().to_string()));
    }

    println!();
    banner("Verify receipt exist in operators");
    let receipt_survey = operators::survey(&hash, &config.rpc, Record::Receipt, timeout).await;
    print_survey(&receipt_survey);
    let Some((receipt_operator, operator_url)) = receipt_survey.holder else {
        return Err(CheckError::NotFound(Record::Receipt.label().to_string()));
    };

    println!();
    banner("Provide more information about transaction");
    tracing::debug!(operator = %receipt_operator, "debugging via receipt holder");
    if let Err(e) = debug_transaction(&hash, &operator_url, &solana_url, &log_dir, timeout).await {
        // ProtocolResponse / InconsistentState abort this step only; the
        // survey results above remain valid and the run still exits 0.
        eprintln!("{}", e.to_string().yellow());
    }

    if cli.logs {
        println!();
        banner("Logs of failed solana transactions");
        for (path, contents) in persistence::read_saved_logs(&log_dir)? {
            println!("{}", format!("---- Log from file: {}", path.display()).bright_white());
            println!("{}", contents);
        }
    }

    Ok(())
}

async fn debug_transaction(
    hash: &TxHash,
    operator_url: &str,
    solana_url: &str,
    log_dir: &Path,
    timeout: Duration,
) -> Result<()> {
    let operator = RpcClient::new(operator_url, timeout)?;
    let receipt = debugger::fetch_extended_receipt(&operator, hash).await?;
    let gas_estimate = debugger::fetch_gas_estimate(&operator, hash).await?;
    let gas_used = receipt.gas_used()?;

    let status = if receipt.is_success() {
        "Success".green()
    } else {
        "Failed".red()
    };
    println!("Status: {}", status);
    println!(
        "Estimated gas: {} | Gas used: {} {:.2}%",
        gas_estimate,
        gas_used,
        debugger::gas_efficiency(gas_used, gas_estimate)
    );
    println!("Solana transactions: {}", receipt.solana_transactions().len());

    if receipt.is_success() {
        return Ok(());
    }

    let solana = RpcClient::new(solana_url, timeout)?;
    let bundles = debugger::debug_failures(&solana, hash, &receipt).await?;

    let mut saved_any = false;
    for bundle in &bundles {
        match persistence::save_bundle(log_dir, bundle) {
            Ok(_) => saved_any = true,
            // A write failure loses one file, not the whole report.
            Err(e) => eprintln!(
                "{}",
                format!("Could not save log for {}: {}", bundle.signature, e).yellow()
            ),
        }
    }

    let signatures: Vec<&str> = bundles.iter().map(|b| b.signature.as_str()).collect();
    println!("Solana failed transactions: {}", bundles.len());
    println!("Failed Solana transactions: {}", signatures.join(", "));
    println!("Reasons:");
    for bundle in &bundles {
        println!("    {}: {}", bundle.signature, bundle.reason());
    }
    if saved_any {
        println!("Full log saved in '{}' folder", log_dir.display());
    }

    Ok(())
}

fn banner(title: &str) {
    println!("{}", title.bright_cyan().bold());
    println!("{}", "-".repeat(title.len()).bright_cyan());
}

fn print_survey(survey: &Survey) {
    for (name, outcome) in &survey.outcomes {
        let rendered = match outcome {
            Probe::Exists => "Exist".green().to_string(),
            Probe::Missing => "Not exist".red().to_string(),
            Probe::Unreachable(reason) => format!("Unreachable ({})", reason).yellow().to_string(),
        };
        println!("{}: {}", name, rendered);
    }
}
