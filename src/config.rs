use crate::errors::AppError;
use std::time::Duration;

/// Contacts endpoint of the LeadConnector API.
pub const DEFAULT_API_URL: &str = "https://services.leadconnectorhq.com/contacts/";
/// Placeholder token used when `GHL_API_KEY` is unset.
pub const DEFAULT_API_KEY: &str = "pit-00000000-0000-0000-0000-000000000000";
pub const DEFAULT_LOCATION_ID: &str = "UBmPAwAYktetwRC3MC0Z";
/// Value of the `Version` header the API expects.
pub const API_VERSION: &str = "2021-07-28";
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
/// Label sent as the contact `source`.
pub const CONTACT_SOURCE: &str = "LeadForge Bot Army";
pub const DEFAULT_TAGS: [&str; 3] = ["Dentist", "Los Angeles", "Auto-Scraped"];
pub const DEFAULT_THROTTLE_MS: u64 = 500;
/// Root of the CRM web app, used for the contacts view link.
pub const APP_BASE_URL: &str = "https://app.gohighlevel.com/";

/// Runtime settings for one sync run, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub location_id: String,
    pub api_url: String,
    /// Delay after every contact request.
    pub throttle: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Self {
            api_key: non_blank("GHL_API_KEY").unwrap_or_else(|| {
                tracing::warn!("GHL_API_KEY not set, using built-in default token");
                DEFAULT_API_KEY.to_string()
            }),
            location_id: non_blank("GHL_LOCATION_ID")
                .unwrap_or_else(|| DEFAULT_LOCATION_ID.to_string()),
            api_url: non_blank("GHL_API_URL")
                .map(|url| validate_api_url(&url).map(|_| url))
                .transpose()?
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            throttle: non_blank("GHL_THROTTLE_MS")
                .map(|ms| {
                    ms.trim().parse::<u64>().map_err(|_| {
                        AppError::InvalidConfig(
                            "GHL_THROTTLE_MS must be a whole number of milliseconds".to_string(),
                        )
                    })
                })
                .transpose()?
                .map(Duration::from_millis)
                .unwrap_or(Duration::from_millis(DEFAULT_THROTTLE_MS)),
        };

        // Never log the token itself
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Location ID: {}", config.location_id);
        tracing::debug!("Contacts endpoint: {}", config.api_url);
        tracing::debug!("Throttle: {:?}", config.throttle);

        Ok(config)
    }

    /// Builds a config with the given credentials and default endpoint and throttle.
    pub fn new(api_key: impl Into<String>, location_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            location_id: location_id.into(),
            api_url: DEFAULT_API_URL.to_string(),
            throttle: Duration::from_millis(DEFAULT_THROTTLE_MS),
        }
    }

    /// Link to the contacts list of the configured location in the CRM web app.
    ///
    /// The location id is percent-encoded as a single path segment.
    pub fn contacts_view_url(&self) -> String {
        let mut link = url::Url::parse(APP_BASE_URL).expect("static URL is valid");
        if let Ok(mut segments) = link.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("location")
                .push(&self.location_id)
                .push("contacts");
        }
        link.to_string()
    }
}

/// Checks that an endpoint override is an absolute http(s) URL.
pub fn validate_api_url(raw: &str) -> Result<url::Url, AppError> {
    let parsed = url::Url::parse(raw).map_err(|e| {
        AppError::InvalidConfig(format!("GHL_API_URL is not a valid URL: {}", e))
    })?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(AppError::InvalidConfig(
            "GHL_API_URL must start with http:// or https://".to_string(),
        ));
    }
    Ok(parsed)
}
