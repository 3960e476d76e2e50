//! check-vat — verify VAT status of Polish taxpayers in the white list.
//!
//! # Usage
//!
//! ```text
//! check-vat <NIP> [<NIP> ...] [--date YYYY-MM-DD] [--json] [--api-url URL] [--retries N] [-v]
//! ```

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vatpl::core::{LookupDate, VatStatus};
use vatpl::registry::{Config, WhiteListClient};

#[derive(Parser, Debug)]
#[command(
    name = "check-vat",
    version,
    about = "Verify VAT status in the Polish white list (wl-api.mf.gov.pl)",
    long_about = None,
)]
struct Cli {
    /// One or more NIPs; hyphens and surrounding whitespace are ignored.
    #[arg(required = true, value_name = "NIP")]
    nips: Vec<String>,

    /// Check the status as of this day instead of today.
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<LookupDate>,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,

    /// Registry base URL (defaults to $VATPL_API_URL or the production API).
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Number of attempts on transient failures (defaults to $VATPL_RETRY_COUNT or 5).
    #[arg(long, value_name = "N")]
    retries: Option<u32>,

    /// Log requests and retries to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "vatpl=debug" } else { "vatpl=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env().context("reading VATPL_* environment")?;
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url.as_str());
    }
    if let Some(retries) = cli.retries {
        config = config.with_max_attempts(retries);
    }
    Ok(config)
}

fn print(results: &[(String, VatStatus)], json: bool) -> Result<()> {
    if json {
        let map: serde_json::Map<String, serde_json::Value> = results
            .iter()
            .map(|(nip, status)| (nip.clone(), status.registry_name().into()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        for (nip, status) in results {
            println!("Verification status of {nip} - {status}");
        }
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let client = WhiteListClient::with_config(config(&cli)?)?;

    let results = if let [nip] = cli.nips.as_slice() {
        let status = client
            .verify(nip, cli.date)
            .await
            .with_context(|| format!("verifying {nip}"))?;
        vec![(nip.clone(), status)]
    } else {
        client
            .verify_many(cli.nips.as_slice(), cli.date)
            .await
            .context("bulk verification")?
            .into_iter()
            .collect()
    };

    print(&results, cli.json)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
