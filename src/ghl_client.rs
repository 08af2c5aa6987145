use crate::config::{Config, API_VERSION, USER_AGENT};
use crate::errors::{AppError, ResultExt};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::{Map, Value};

/// Raw reply to a contact creation request.
#[derive(Debug, Clone)]
pub struct ContactResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ContactResponse {
    /// Only 200 and 201 count as a created contact.
    pub fn is_created(&self) -> bool {
        self.status == StatusCode::OK || self.status == StatusCode::CREATED
    }

    /// Id of the created contact, if the body carries one.
    ///
    /// Accepts `{"contact": {"id": ...}}` as well as a top-level `id`.
    pub fn contact_id(&self) -> Option<String> {
        let data: Value = serde_json::from_str(&self.body).ok()?;

        let id = data
            .get("contact")
            .and_then(|c| c.get("id"))
            .or_else(|| data.get("id"))?;

        match id {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => {
                tracing::warn!("Unexpected contact id format: {:?}", id);
                None
            }
        }
    }
}

/// Client for the LeadConnector contacts endpoint.
#[derive(Clone)]
pub struct GhlClient {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl GhlClient {
    /// Creates a new `GhlClient` for the endpoint and token in `config`.
    ///
    /// No request timeout is set; a stalled endpoint stalls the caller.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(AppError::from)
            .context("Failed to create CRM client")?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            token: config.api_key.clone(),
        })
    }

    /// Posts one contact payload.
    ///
    /// Any HTTP status is returned as a [`ContactResponse`]; only transport
    /// failures are errors.
    pub async fn create_contact(
        &self,
        payload: &Map<String, Value>,
    ) -> Result<ContactResponse, AppError> {
        tracing::debug!("POST {} ({} fields)", self.api_url, payload.len());

        let response = self
            .client
            .post(&self.api_url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(CONTENT_TYPE, "application/json")
            .header("Version", API_VERSION)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(AppError::from)
            .context("Contact request failed")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if !status.is_success() {
            tracing::warn!("CRM returned {}: {}", status, truncate_chars(&body, 200));
        }

        Ok(ContactResponse { status, body })
    }
}

/// First `max` characters of `text`, respecting char boundaries.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
