//! Prints the contact payloads a sync run would send, without calling the CRM.

use clap::Parser;
use ghl_lead_sync::config::Config;
use ghl_lead_sync::contact::build_contact_payload;
use ghl_lead_sync::loader::load_leads;
use ghl_lead_sync::models::{raw_business_name, Lead};
use ghl_lead_sync::obs::init_tracing;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "preview-payloads",
    version,
    about = "Print the GoHighLevel contact payloads built from a leads file"
)]
struct CliArgs {
    /// JSON file holding an array of lead records
    leads_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let Some(leads_file) = args.leads_file else {
        println!("Usage: preview-payloads <leads-json-file>");
        std::process::exit(1);
    };

    let config = Config::from_env()?;
    let leads = load_leads(&leads_file).await?;
    let total = leads.records.len();

    let mut unreadable = 0;
    for (idx, record) in leads.records.iter().enumerate() {
        match Lead::from_value(record) {
            Ok(lead) => {
                let payload = build_contact_payload(&lead, &config);
                println!(
                    "[{}/{}] {}\n{}",
                    idx + 1,
                    total,
                    lead.display_name(),
                    serde_json::to_string_pretty(&payload)?
                );
            }
            Err(e) => {
                unreadable += 1;
                println!(
                    "[{}/{}] ✗ Unreadable lead {}: {}",
                    idx + 1,
                    total,
                    raw_business_name(record),
                    e
                );
            }
        }
    }

    println!("\n{} payloads, {} unreadable records", total - unreadable, unreadable);

    Ok(())
}
