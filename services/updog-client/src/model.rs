//! Monitor and check-result types as exchanged with the UpDog service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned monitor identifier
pub type MonitorId = i64;

/// A monitored HTTP endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monitor {
    pub id: MonitorId,
    pub name: String,
    pub url: String,
    pub interval_seconds: u32,
    pub is_active: bool,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub updated_at: DateTime<Utc>,
}

impl Monitor {
    /// `Active` or `Paused`
    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "Active"
        } else {
            "Paused"
        }
    }
}

/// One probe outcome recorded by the scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub id: i64,
    pub monitor_id: MonitorId,
    pub status_code: Option<u16>,
    pub response_time_ms: Option<u64>,
    /// The scheduler's verdict; never re-derive it from `status_code`
    pub is_up: bool,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub checked_at: DateTime<Utc>,
    pub error_message: Option<String>,
}

/// How far a probe got before its result was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// An HTTP status code came back
    Responded,
    /// The probe failed at the transport level
    Failed,
    /// Neither a status code nor an error, e.g. a timeout
    Incomplete,
}

impl CheckResult {
    pub fn outcome(&self) -> CheckOutcome {
        match (self.status_code, &self.error_message) {
            (Some(_), _) => CheckOutcome::Responded,
            (None, Some(_)) => CheckOutcome::Failed,
            (None, None) => CheckOutcome::Incomplete,
        }
    }
}

/// Body of `POST /api/monitors`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMonitor {
    pub name: String,
    pub url: String,
    /// Left out of the payload when `None` so the server applies its default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_seconds: Option<u32>,
}

/// Body of `PUT /api/monitors/{id}`
///
/// A partial update: only fields that are `Some` are serialized, and the
/// server leaves every omitted field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl MonitorUpdate {
    /// An update touching only `is_active`
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.url.is_none()
            && self.interval_seconds.is_none()
            && self.is_active.is_none()
    }
}

/// Client-local, unsaved copy of the editable monitor fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorDraft {
    pub name: String,
    pub url: String,
    pub interval_seconds: u32,
}

impl MonitorDraft {
    pub fn from_monitor(monitor: &Monitor) -> Self {
        Self {
            name: monitor.name.clone(),
            url: monitor.url.clone(),
            interval_seconds: monitor.interval_seconds,
        }
    }

    /// Superficial checks only; the server stays authoritative
    pub fn validate(&self, min_interval_seconds: u32) -> crate::Result<()> {
        if self.name.trim().is_empty() {
            return Err(crate::ClientError::Validation(
                "name must not be empty".to_string(),
            ));
        }
        if self.url.trim().is_empty() {
            return Err(crate::ClientError::Validation(
                "url must not be empty".to_string(),
            ));
        }
        if let Err(e) = reqwest::Url::parse(&self.url) {
            return Err(crate::ClientError::Validation(format!(
                "url {:?} is not valid: {}",
                self.url, e
            )));
        }
        if self.interval_seconds < min_interval_seconds {
            return Err(crate::ClientError::Validation(format!(
                "interval must be at least {} seconds",
                min_interval_seconds
            )));
        }
        Ok(())
    }

    pub fn to_update(&self) -> MonitorUpdate {
        MonitorUpdate {
            name: Some(self.name.clone()),
            url: Some(self.url.clone()),
            interval_seconds: Some(self.interval_seconds),
            is_active: None,
        }
    }

    pub fn to_new_monitor(&self) -> NewMonitor {
        NewMonitor {
            name: self.name.clone(),
            url: self.url.clone(),
            interval_seconds: Some(self.interval_seconds),
        }
    }
}

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub database: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Response of `GET /api/slo/config`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SloConfig {
    pub availability_target: f64,
    pub availability_target_pct: String,
    pub latency_target_ms: u64,
    pub latency_percentile: String,
    pub window_days: u32,
}

/// State of a single service level objective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SloStatus {
    pub name: String,
    pub target: f64,
    pub current: f64,
    pub is_met: bool,
    pub error_budget_pct: f64,
    pub burn_rate: f64,
    pub time_remaining_hours: Option<f64>,
}

/// Response of `GET /api/slo/monitors/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SloReport {
    pub monitor_id: MonitorId,
    pub monitor_name: String,
    pub window_days: u32,
    pub total_checks: u64,
    pub availability: SloStatus,
    pub latency: SloStatus,
}

/// The service writes naive UTC timestamps (no offset); accept those as well
/// as RFC 3339.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Ok(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|e| format!("invalid timestamp {:?}: {}", raw, e))
    }
}
