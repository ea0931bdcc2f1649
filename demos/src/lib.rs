//! Shared helpers for the demo binaries

use colored::*;
use enclave_rest::{Credentials, EnclaveClient, Endpoint};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Install a `RUST_LOG`-driven subscriber and connect to the sandbox
///
/// Credentials come from the `enclave_key` and `enclave_secret`
/// environment variables.
pub fn sandbox_client(title: &str) -> Result<EnclaveClient, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("{}", "═".repeat(65).cyan());
    println!("{}", format!("  {}", title).cyan().bold());
    println!("{}", "  Enclave sandbox".cyan());
    println!("{}", "═".repeat(65).cyan());
    println!();

    let client = EnclaveClient::new(Credentials::from_env()?, Endpoint::Sandbox)?;
    println!("{} Using sandbox at {}\n", "✓".green(), client.dispatcher().base_url());
    Ok(client)
}

/// Print a labelled value as indented JSON
pub fn show<T: Serialize>(label: &str, value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{} {}\n{}\n", "▸".yellow(), label.white().bold(), json),
        Err(e) => println!("{} {}: {}", "✗".red(), label, e),
    }
}
