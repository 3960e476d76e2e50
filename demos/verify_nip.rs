use vatpl::core::*;
use vatpl::registry::{Config, WhiteListClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // NIP validation (no network required)
    println!("=== NIP Validation ===\n");

    let test_nips = [
        "692-00-00-013",  // KGHM Polska Miedź
        " 526-025-02-74", // whitespace and hyphens are ignored
        "9990000013",     // bad checksum
        "12345",          // too short
    ];

    for raw in &test_nips {
        let nip = normalize_nip(raw);
        let verdict = if is_valid_nip(&nip) { "valid" } else { "INVALID" };
        println!("  {raw:?} => {nip} {verdict}");
    }

    // Registry lookups
    println!("\n=== White List Lookup ===\n");

    let client = WhiteListClient::with_config(Config::from_env()?)?;

    match client.verify("692-00-00-013", None).await {
        Ok(status) => println!("  692-00-00-013 => {status}"),
        Err(e) => println!("  692-00-00-013 => lookup failed (permanent: {}): {e}", e.is_permanent()),
    }

    let date: LookupDate = "2020-10-07".parse()?;
    let statuses = client.verify_many(&test_nips, Some(date)).await?;
    println!("\n  Statuses on {date}:");
    for (nip, status) in &statuses {
        println!("    {nip:?} => {status}");
    }

    if let Some(subject) = client.verify_subject("692-00-00-013", None).await? {
        println!("\n  {} (REGON {})", subject.name.unwrap_or_default(), subject.regon.unwrap_or_default());
        println!("  Accounts: {}", subject.account_numbers.len());
    }

    Ok(())
}
