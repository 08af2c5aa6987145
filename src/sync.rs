//! Sequential lead → contact sync loop.
//!
//! Each lead is mapped, posted, classified and throttled before the next one
//! starts. A failed lead never stops the run.

use crate::config::Config;
use crate::contact::build_contact_payload;
use crate::ghl_client::{truncate_chars, GhlClient};
use crate::models::{raw_business_name, Lead};
use serde_json::Value;
use std::fmt;

/// Maximum number of response body characters echoed on failure.
pub const ERROR_BODY_LIMIT: usize = 200;

/// Result of syncing one lead.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// The CRM answered 200 or 201.
    Synced { contact_id: Option<String> },
    /// The CRM answered with any other status.
    Rejected { status: u16, body: String },
    /// The request never completed or the record was unusable.
    Errored { message: String },
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SyncOutcome::Synced { .. })
    }

    /// Console line for this outcome, without the progress prefix.
    pub fn message(&self, business_name: &str) -> String {
        match self {
            SyncOutcome::Synced { .. } => format!("✓ Synced: {}", business_name),
            SyncOutcome::Rejected { status, body } if *status >= 400 => {
                format!("✗ HTTP Error: {} - {}: {}", business_name, status, body)
            }
            SyncOutcome::Rejected { status, body } => {
                format!("✗ Failed: {} - {}: {}", business_name, status, body)
            }
            SyncOutcome::Errored { message } => {
                format!("✗ Error: {} - {}", business_name, message)
            }
        }
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub synced: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: &SyncOutcome) {
        if outcome.is_success() {
            self.synced += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Boxed end-of-run report including the link to the location's contacts.
    pub fn report(&self, config: &Config) -> String {
        format!(
            "\n{rule}\n🎉 SYNC COMPLETE!\n{rule}\n{counts}\n{rule}\n\nView contacts: {link}\n",
            rule = "=".repeat(50),
            counts = self,
            link = config.contacts_view_url(),
        )
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Total leads:  {}", self.total)?;
        writeln!(f, "  Synced:       {}", self.synced)?;
        write!(f, "  Failed:       {}", self.failed)
    }
}

/// Maps one raw record to a contact and posts it.
///
/// Returns the business name used for reporting alongside the outcome.
pub async fn sync_lead(
    client: &GhlClient,
    config: &Config,
    record: &Value,
) -> (String, SyncOutcome) {
    let lead = match Lead::from_value(record) {
        Ok(lead) => lead,
        Err(e) => {
            let name = raw_business_name(record).to_string();
            tracing::warn!("Skipping unreadable lead record {:?}: {}", name, e);
            return (
                name,
                SyncOutcome::Errored {
                    message: format!("invalid lead record: {}", e),
                },
            );
        }
    };
    let name = lead.display_name().to_string();

    let payload = build_contact_payload(&lead, config);

    let outcome = match client.create_contact(&payload).await {
        Ok(response) if response.is_created() => {
            let contact_id = response.contact_id();
            tracing::debug!("Created contact {:?} for {}", contact_id, name);
            SyncOutcome::Synced { contact_id }
        }
        Ok(response) => SyncOutcome::Rejected {
            status: response.status.as_u16(),
            body: truncate_chars(&response.body, ERROR_BODY_LIMIT).to_string(),
        },
        Err(e) => SyncOutcome::Errored {
            message: e.to_string(),
        },
    };

    (name, outcome)
}

/// Syncs every record in order, printing one progress line per lead.
///
/// Sleeps `config.throttle` after every attempt, successful or not.
pub async fn run_sync(client: &GhlClient, config: &Config, records: &[Value]) -> RunSummary {
    let mut summary = RunSummary::new(records.len());

    for (i, record) in records.iter().enumerate() {
        let (name, outcome) = sync_lead(client, config, record).await;
        println!("[{}/{}] {}", i + 1, records.len(), outcome.message(&name));
        summary.record(&outcome);

        tokio::time::sleep(config.throttle).await;
    }

    tracing::info!(
        "Sync finished: {} synced, {} failed of {}",
        summary.synced,
        summary.failed,
        summary.total
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_messages() {
        assert_eq!(
            SyncOutcome::Synced { contact_id: None }.message("Acme"),
            "✓ Synced: Acme"
        );
        assert_eq!(
            SyncOutcome::Rejected {
                status: 429,
                body: "slow down".to_string()
            }
            .message("Acme"),
            "✗ HTTP Error: Acme - 429: slow down"
        );
        assert_eq!(
            SyncOutcome::Rejected {
                status: 202,
                body: String::new()
            }
            .message("Acme"),
            "✗ Failed: Acme - 202: "
        );
        assert_eq!(
            SyncOutcome::Errored {
                message: "connection refused".to_string()
            }
            .message("Acme"),
            "✗ Error: Acme - connection refused"
        );
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = RunSummary::new(3);
        summary.record(&SyncOutcome::Synced { contact_id: None });
        summary.record(&SyncOutcome::Errored {
            message: "x".to_string(),
        });
        summary.record(&SyncOutcome::Synced {
            contact_id: Some("c1".to_string()),
        });
        assert_eq!(summary.synced, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.synced + summary.failed, summary.total);
    }

    #[test]
    fn test_report_contents() {
        let config = Config::new("key", "LOC9");
        let mut summary = RunSummary::new(2);
        summary.record(&SyncOutcome::Synced { contact_id: None });
        summary.record(&SyncOutcome::Rejected {
            status: 500,
            body: String::new(),
        });

        let report = summary.report(&config);
        assert!(report.contains("SYNC COMPLETE!"));
        assert!(report.contains("Total leads:  2"));
        assert!(report.contains("Synced:       1"));
        assert!(report.contains("Failed:       1"));
        assert!(report.contains("https://app.gohighlevel.com/location/LOC9/contacts"));
    }
}
