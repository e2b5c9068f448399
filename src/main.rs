//! `sepay-checkout <amount> <invoice> <description>`
//!
//! Prints an auto-submitting checkout form for a PURCHASE using credentials
//! from `SEPAY__CLIENT__*` environment variables.

use std::process::ExitCode;

use sepay::client::SepayClient;
use sepay::config::SepayConfig;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: sepay-checkout <amount> <invoice> <description>";

fn main() -> ExitCode {
    match run() {
        Ok(html) => {
            println!("{}", html);
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<String, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [amount, invoice, description] = args.as_slice() else {
        return Err(USAGE.to_string());
    };
    let amount: u64 = amount
        .parse()
        .map_err(|_| format!("invalid amount '{}'\n{}", amount, USAGE))?;

    let config = SepayConfig::load().map_err(|e| e.to_string())?;
    config.validate().map_err(|e| e.to_string())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let client = SepayClient::new(config.client).map_err(|e| e.to_string())?;
    let request = client
        .new_checkout()
        .purchase(amount, invoice.as_str(), description.as_str())
        .build()
        .map_err(|e| e.to_string())?;

    tracing::info!(
        invoice = %invoice,
        amount,
        "Checkout form generated"
    );

    Ok(client.checkout().build_auto_submit_form(&request, None))
}
