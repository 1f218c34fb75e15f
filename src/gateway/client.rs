// src/gateway/client.rs

//! Pluggable scheduling-service abstraction.
//!
//! Submission code talks to a `SchedulerService` rather than to `reqwest`
//! directly, so tests can swap in a fake that returns canned result sets.
//! [`HttpSchedulerService`] is the production implementation.
//!
//! Requests are sent once: no retry, no timeout, no cancellation.

use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;
use tracing::debug;

use crate::errors::{Result, RungraphError};
use crate::gateway::request::ScheduleRequest;
use crate::gateway::response::ResultSet;

/// Path of the scheduling endpoint relative to the service base URL.
pub const SCHEDULE_PATH: &str = "/api/schedule";
/// Path of the health endpoint relative to the service base URL.
pub const HEALTH_PATH: &str = "/api/health";

/// Body returned by the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Trait abstracting how runnable sets reach the scheduler.
pub trait SchedulerService: Send + Sync {
    /// Submit one snapshot and parse the service's answer.
    fn submit<'a>(
        &'a self,
        request: &'a ScheduleRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ResultSet>> + Send + 'a>>;

    /// Query the service health endpoint.
    fn health(&self) -> Pin<Box<dyn Future<Output = Result<HealthStatus>> + Send + '_>>;
}

/// HTTP client for the scheduling service.
#[derive(Debug, Clone)]
pub struct HttpSchedulerService {
    base_url: String,
    http: reqwest::Client,
}

impl HttpSchedulerService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl SchedulerService for HttpSchedulerService {
    fn submit<'a>(
        &'a self,
        request: &'a ScheduleRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ResultSet>> + Send + 'a>> {
        Box::pin(async move {
            let url = self.url(SCHEDULE_PATH);
            debug!(
                url = %url,
                runnables = request.runnables.len(),
                num_cores = request.num_cores,
                "posting schedule request"
            );

            let response = self.http.post(&url).json(request).send().await?;
            let status = response.status();
            let body = response.text().await?;

            if !status.is_success() {
                return Err(RungraphError::Service(describe_failure(status, &body)));
            }

            ResultSet::from_json(&body)
        })
    }

    fn health(&self) -> Pin<Box<dyn Future<Output = Result<HealthStatus>> + Send + '_>> {
        Box::pin(async move {
            let url = self.url(HEALTH_PATH);
            let response = self.http.get(&url).send().await?;
            let status = response.status();
            let body = response.text().await?;

            if !status.is_success() {
                return Err(RungraphError::Service(describe_failure(status, &body)));
            }

            Ok(serde_json::from_str(&body)?)
        })
    }
}

/// Prefer the service's own `{"error": "..."}` message over the raw body.
fn describe_failure(status: reqwest::StatusCode, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => format!("{status}: {}", parsed.error),
        Err(_) if body.trim().is_empty() => status.to_string(),
        Err(_) => format!("{status}: {}", body.trim()),
    }
}
