use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::Settings;

/// Failures from the api-sports client. There is no retry layer: the free
/// tier's daily request budget is the scarce resource, so a failed call is
/// reported once and the caller decides whether the run can continue.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("API_KEY is not set — copy .env.example to .env and add your key")]
    MissingKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("API rate limit reached — try again later")]
    RateLimited,
    #[error("API reported an error: {0}")]
    Api(String),
}

/// Thin client for the api-sports v3 football API.
pub struct ApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        if settings.api_key.is_empty() {
            return Err(FetchError::MissingKey);
        }

        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(10)).build()?,
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.clone(),
        })
    }

    /// GET one endpoint (`teams`, `fixtures`, `standings`) for a league
    /// season. Returns the full JSON payload so callers can cache it verbatim.
    pub async fn fetch(&self, endpoint: &str, league: u32, season: u16) -> Result<Value, FetchError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint);
        tracing::info!("GET /{} league={} season={}", endpoint, league, season);

        let response = self
            .client
            .get(&url)
            .header("x-apisports-key", &self.api_key)
            .query(&[("league", league.to_string()), ("season", season.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let payload: Value = response.json().await?;

        // The envelope reports application errors with HTTP 200.
        if let Some(errors) = payload.get("errors") {
            if has_entries(errors) {
                let text = errors.to_string();
                if text.contains("rateLimit") {
                    return Err(FetchError::RateLimited);
                }
                return Err(FetchError::Api(text));
            }
        }

        let results = payload.get("results").and_then(Value::as_u64).unwrap_or(0);
        tracing::info!("/{} returned {} result(s)", endpoint, results);

        Ok(payload)
    }
}

/// The envelope's `errors` member is an empty array on success, but a
/// populated array or object (or occasionally a bare message) on failure.
fn has_entries(errors: &Value) -> bool {
    match errors {
        Value::Null => false,
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}
