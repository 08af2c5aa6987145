use clap::Parser;
use std::path::PathBuf;

use ghl_lead_sync::config::Config;
use ghl_lead_sync::ghl_client::GhlClient;
use ghl_lead_sync::loader::load_leads;
use ghl_lead_sync::obs::init_tracing;
use ghl_lead_sync::repair::RepairPass;
use ghl_lead_sync::sync::run_sync;

#[derive(Parser)]
#[command(
    name = "ghl-lead-sync",
    version,
    about = "Push scraped business leads into GoHighLevel as contacts"
)]
struct CliArgs {
    /// JSON file holding an array of lead records
    leads_file: Option<PathBuf>,
}

/// Main entry point.
///
/// Loads configuration and the leads file, then syncs every lead in order and
/// prints the run summary. Exits with status 1 when the file argument is
/// missing or the file cannot be loaded; failed leads do not change the exit
/// status.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let Some(leads_file) = args.leads_file else {
        println!("Usage: ghl-lead-sync <leads-json-file>");
        std::process::exit(1);
    };

    let config = Config::from_env()?;

    println!("📊 Loading leads from file...");
    let leads = match load_leads(&leads_file).await {
        Ok(leads) => leads,
        Err(e) => {
            tracing::error!("Failed to load {}: {}", leads_file.display(), e);
            println!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if leads.pass == RepairPass::LineScan {
        if let Some(ref parse_error) = leads.strict_error {
            println!("JSON parse error: {}", parse_error);
        }
        println!("Attempting to fix and retry...");
    }
    println!("Found {} leads to sync\n", leads.records.len());

    let client = GhlClient::new(&config)?;
    tracing::info!("✓ CRM client initialized: {}", config.api_url);

    println!("🔄 Syncing to GoHighLevel...\n");
    let summary = run_sync(&client, &config, &leads.records).await;

    println!("{}", summary.report(&config));

    Ok(())
}
