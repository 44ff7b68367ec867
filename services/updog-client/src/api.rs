//! Typed client for the UpDog REST API

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};
use crate::io::{HttpClient, HttpResponse};
use crate::model::{
    CheckResult, HealthStatus, Monitor, MonitorId, MonitorUpdate, NewMonitor, SloConfig,
    SloReport,
};

/// Number of results the service returns when no limit is given
pub const DEFAULT_RESULTS_LIMIT: u32 = 20;

/// Domain operations against the UpDog service
///
/// Every call is independent: no batching, caching or retries. Any failure,
/// whether a non-2xx status, a network error or an unexpected body, comes
/// back as [`ClientError::Transport`].
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait MonitorApi: Send + Sync {
    /// All monitors, in server order
    async fn list_monitors(&self) -> Result<Vec<Monitor>>;

    async fn get_monitor(&self, id: MonitorId) -> Result<Monitor>;

    /// Most recent check results, newest first, at most `limit` entries
    async fn get_results(&self, id: MonitorId, limit: u32) -> Result<Vec<CheckResult>>;

    async fn create_monitor(&self, monitor: NewMonitor) -> Result<Monitor>;

    /// Partial update; fields left as `None` are not touched by the server
    async fn update_monitor(&self, id: MonitorId, update: MonitorUpdate) -> Result<Monitor>;

    async fn delete_monitor(&self, id: MonitorId) -> Result<()>;

    async fn health(&self) -> Result<HealthStatus>;

    async fn slo_config(&self) -> Result<SloConfig>;

    async fn slo_report(&self, id: MonitorId) -> Result<SloReport>;
}

/// [`MonitorApi`] over HTTP/JSON
pub struct HttpMonitorApi {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for HttpMonitorApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMonitorApi")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpMonitorApi {
    pub fn new(base_url: &str, http: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        tracing::debug!("Created HttpMonitorApi for {}", base_url);
        Self { base_url, http }
    }

    fn monitors_url(&self) -> String {
        format!("{}/api/monitors", self.base_url)
    }

    fn monitor_url(&self, id: MonitorId) -> String {
        format!("{}/api/monitors/{}", self.base_url, id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, action: &str) -> Result<T> {
        let response = self.http.get(url).await.map_err(|e| failed(action, e))?;
        decode(&check_status(response, action)?, action)
    }
}

fn failed(action: &str, err: ClientError) -> ClientError {
    ClientError::Transport(format!("Failed to {}: {}", action, err))
}

fn check_status(response: HttpResponse, action: &str) -> Result<HttpResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        tracing::debug!("Failed to {}: HTTP {}", action, response.status);
        Err(ClientError::Transport(format!(
            "Failed to {}: HTTP {}",
            action, response.status
        )))
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse, action: &str) -> Result<T> {
    serde_json::from_str(&response.body).map_err(|e| {
        ClientError::Transport(format!("Failed to {}: unexpected response: {}", action, e))
    })
}

fn encode<T: serde::Serialize>(body: &T) -> Result<String> {
    Ok(serde_json::to_string(body)?)
}

#[async_trait]
impl MonitorApi for HttpMonitorApi {
    async fn list_monitors(&self) -> Result<Vec<Monitor>> {
        self.get_json(&self.monitors_url(), "fetch monitors").await
    }

    async fn get_monitor(&self, id: MonitorId) -> Result<Monitor> {
        self.get_json(&self.monitor_url(id), "fetch monitor").await
    }

    async fn get_results(&self, id: MonitorId, limit: u32) -> Result<Vec<CheckResult>> {
        let url = format!("{}/results?limit={}", self.monitor_url(id), limit);
        self.get_json(&url, "fetch results").await
    }

    async fn create_monitor(&self, monitor: NewMonitor) -> Result<Monitor> {
        let action = "create monitor";
        let body = encode(&monitor)?;
        let response = self
            .http
            .post_json(&self.monitors_url(), &body)
            .await
            .map_err(|e| failed(action, e))?;
        decode(&check_status(response, action)?, action)
    }

    async fn update_monitor(&self, id: MonitorId, update: MonitorUpdate) -> Result<Monitor> {
        let action = "update monitor";
        let body = encode(&update)?;
        let response = self
            .http
            .put_json(&self.monitor_url(id), &body)
            .await
            .map_err(|e| failed(action, e))?;
        decode(&check_status(response, action)?, action)
    }

    async fn delete_monitor(&self, id: MonitorId) -> Result<()> {
        let action = "delete monitor";
        let response = self
            .http
            .delete(&self.monitor_url(id))
            .await
            .map_err(|e| failed(action, e))?;
        check_status(response, action)?;
        Ok(())
    }

    async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/health", self.base_url);
        self.get_json(&url, "check service health").await
    }

    async fn slo_config(&self) -> Result<SloConfig> {
        let url = format!("{}/api/slo/config", self.base_url);
        self.get_json(&url, "fetch SLO configuration").await
    }

    async fn slo_report(&self, id: MonitorId) -> Result<SloReport> {
        let url = format!("{}/api/slo/monitors/{}", self.base_url, id);
        self.get_json(&url, "fetch SLO report").await
    }
}
