//! cpw-tracker-backed event source.
//!
//! Wraps the RapidAPI cpw-tracker search endpoint: one POST per
//! entity/topic query over a time window, returning a JSON array of raw
//! event records.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{Result, SourceError, SourceResult};
use crate::security::{require_env, SecretString};
use crate::traits::source::{EventSource, TimeWindow};
use crate::types::config::QuerySpec;
use crate::types::event::RegulatoryEvent;

/// Default endpoint for the cpw-tracker search API.
pub const DEFAULT_TRACKER_URL: &str = "https://cpw-tracker.p.rapidapi.com/";

const TRACKER_HOST: &str = "cpw-tracker.p.rapidapi.com";

/// Environment variable holding the RapidAPI key.
pub const RAPIDAPI_KEY_VAR: &str = "RAPIDAPI_KEY";

/// Event source backed by the cpw-tracker API on RapidAPI.
pub struct CpwTrackerSource {
    api_key: SecretString,
    client: reqwest::Client,
    base_url: String,
}

impl CpwTrackerSource {
    /// Create a new tracker source.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            api_key: api_key.into(),
            client: reqwest::Client::new(),
            base_url: DEFAULT_TRACKER_URL.to_string(),
        }
    }

    /// Create from the `RAPIDAPI_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(require_env(RAPIDAPI_KEY_VAR)?))
    }

    /// Override the endpoint (for tests and proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Z-suffixed millisecond ISO-8601, the instant format the API expects.
fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[async_trait]
impl EventSource for CpwTrackerSource {
    async fn fetch(
        &self,
        query: &QuerySpec,
        window: TimeWindow,
    ) -> SourceResult<Vec<RegulatoryEvent>> {
        #[derive(Serialize)]
        struct Request<'a> {
            entities: &'a str,
            topic: &'a str,
            #[serde(rename = "startTime")]
            start_time: String,
            #[serde(rename = "endTime")]
            end_time: String,
        }

        let request = Request {
            entities: &query.entities,
            topic: &query.topic,
            start_time: format_instant(window.start),
            end_time: format_instant(window.end),
        };

        let response = self
            .client
            .post(&self.base_url)
            .header("Content-Type", "application/json")
            .header("x-rapidapi-host", TRACKER_HOST)
            .header("x-rapidapi-key", self.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| SourceError::Http(Box::new(e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                status: response.status().as_u16(),
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SourceError::Http(Box::new(e)))?;

        // The API answers with an array of events; anything else is
        // treated as an empty batch.
        match body {
            serde_json::Value::Array(_) => Ok(serde_json::from_value(body)?),
            _ => Ok(Vec::new()),
        }
    }
}
