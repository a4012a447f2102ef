//! Scheduling service client -- submit completed schedule requests over HTTP.
//!
//! One `POST` per submission, JSON in and JSON out.  Any transport failure,
//! non-2xx status or undecodable body becomes a readable
//! [`SubmissionResult::Failed`] message.  There are no retries.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use agendabot_dialogue::{ScheduleRequest, ScheduleSubmitter, SubmissionResult};

use crate::error::{AdapterError, Result};

/// Where the service lives when nothing else is configured.
pub const DEFAULT_SERVICE_URL: &str = "http://example.com/api/agendar-relatorio";

/// Prefix of every user-facing submission failure.
const FAILURE_PREFIX: &str = "Erro ao enviar a requisição";

/// Scheduling service connection settings.
#[derive(Debug, Clone)]
pub struct ScheduleServiceConfig {
    /// Absolute URL of the schedule-request endpoint.
    pub url: String,
    /// Upper bound on a whole request.  `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ScheduleServiceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVICE_URL.to_string(),
            timeout: None,
        }
    }
}

/// HTTP client for the scheduling service.
pub struct HttpScheduleSubmitter {
    url: url::Url,
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl HttpScheduleSubmitter {
    /// Build a client for the configured endpoint.
    pub fn new(config: &ScheduleServiceConfig) -> Result<Self> {
        let url = url::Url::parse(&config.url).map_err(|e| {
            AdapterError::ConfigError(format!("invalid service URL `{}`: {e}", config.url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AdapterError::ConfigError(format!(
                "unsupported scheme `{}` in service URL",
                url.scheme()
            )));
        }

        let mut builder =
            reqwest::Client::builder().user_agent(concat!("AgendaBot/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AdapterError::ConfigError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url,
            timeout: config.timeout,
            client,
        })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Send the request and decode the response body.
    async fn post(&self, request: &ScheduleRequest) -> Result<Value> {
        let payload = request.to_payload();
        let url = self.url.as_str();

        debug!(url, frequency = payload.frequency, "posting schedule request");

        let start = Instant::now();
        let response = self
            .client
            .post(self.url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let status = response.status();
        if !status.is_success() {
            return Err(AdapterError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                self.transport_error(e)
            } else {
                AdapterError::Decode {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        info!(url, status = status.as_u16(), elapsed_ms, "schedule request accepted");
        Ok(body)
    }

    fn transport_error(&self, e: reqwest::Error) -> AdapterError {
        let url = self.url.to_string();
        match self.timeout {
            Some(after) if e.is_timeout() => AdapterError::Timeout { url, after },
            _ => AdapterError::Transport {
                url,
                reason: e.to_string(),
            },
        }
    }
}

#[async_trait]
impl ScheduleSubmitter for HttpScheduleSubmitter {
    async fn submit(&self, request: &ScheduleRequest) -> SubmissionResult {
        match self.post(request).await {
            Ok(body) => SubmissionResult::Accepted(body),
            Err(e) => {
                warn!(error = %e, "schedule submission failed");
                SubmissionResult::Failed(format!("{FAILURE_PREFIX}: {e}"))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
