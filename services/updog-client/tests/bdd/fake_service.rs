//! In-memory UpDog service for BDD scenarios
//!
//! Applies partial updates the way the real service does and can be told to
//! fail any single operation with an HTTP 500.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use updog_client::model::{
    CheckResult, HealthStatus, Monitor, MonitorId, MonitorUpdate, NewMonitor, SloConfig,
    SloReport, SloStatus,
};
use updog_client::{ClientError, MonitorApi, Result};

#[derive(Debug, Default)]
struct Store {
    monitors: Vec<Monitor>,
    results: Vec<CheckResult>,
    next_monitor_id: MonitorId,
    next_result_id: i64,
    failing: HashSet<String>,
    calls: HashMap<String, usize>,
}

impl Store {
    fn call(&mut self, op: &str, action: &str) -> Result<()> {
        *self.calls.entry(op.to_string()).or_default() += 1;
        if self.failing.contains(op) {
            return Err(ClientError::Transport(format!(
                "Failed to {}: HTTP 500",
                action
            )));
        }
        Ok(())
    }

    fn find(&self, id: MonitorId, action: &str) -> Result<&Monitor> {
        self.monitors
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| ClientError::Transport(format!("Failed to {}: HTTP 404", action)))
    }
}

#[derive(Debug, Default)]
pub struct FakeService {
    store: Mutex<Store>,
}

impl FakeService {
    fn store(&self) -> std::sync::MutexGuard<'_, Store> {
        self.store.lock().expect("fake service lock poisoned")
    }

    pub fn add_monitor(&self, name: &str, url: &str, interval_seconds: u32, is_active: bool) {
        let mut store = self.store();
        store.next_monitor_id += 1;
        let at = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        let monitor = Monitor {
            id: store.next_monitor_id,
            name: name.to_string(),
            url: url.to_string(),
            interval_seconds,
            is_active,
            created_at: at,
            updated_at: at,
        };
        store.monitors.push(monitor);
    }

    /// Record `count` checks for a monitor, one minute apart
    pub fn add_results(&self, monitor_id: MonitorId, count: usize) {
        let mut store = self.store();
        let start = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        for n in 0..count {
            store.next_result_id += 1;
            let result = CheckResult {
                id: store.next_result_id,
                monitor_id,
                status_code: Some(200),
                response_time_ms: Some(40 + n as u64),
                is_up: true,
                checked_at: start + Duration::minutes(n as i64),
                error_message: None,
            };
            store.results.push(result);
        }
    }

    pub fn fail(&self, op: &str) {
        self.store().failing.insert(op.to_string());
    }

    pub fn calls(&self, op: &str) -> usize {
        self.store().calls.get(op).copied().unwrap_or(0)
    }

    pub fn id_of(&self, name: &str) -> Option<MonitorId> {
        self.store()
            .monitors
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.id)
    }

    pub fn stored(&self, id: MonitorId) -> Option<Monitor> {
        self.store().monitors.iter().find(|m| m.id == id).cloned()
    }
}

#[async_trait]
impl MonitorApi for FakeService {
    async fn list_monitors(&self) -> Result<Vec<Monitor>> {
        let mut store = self.store();
        store.call("list_monitors", "fetch monitors")?;
        Ok(store.monitors.clone())
    }

    async fn get_monitor(&self, id: MonitorId) -> Result<Monitor> {
        let mut store = self.store();
        store.call("get_monitor", "fetch monitor")?;
        store.find(id, "fetch monitor").cloned()
    }

    async fn get_results(&self, id: MonitorId, limit: u32) -> Result<Vec<CheckResult>> {
        let mut store = self.store();
        store.call("get_results", "fetch results")?;
        store.find(id, "fetch results")?;
        let mut results: Vec<CheckResult> = store
            .results
            .iter()
            .filter(|r| r.monitor_id == id)
            .cloned()
            .collect();
        results.sort_by(|a, b| b.checked_at.cmp(&a.checked_at));
        results.truncate(limit as usize);
        Ok(results)
    }

    async fn create_monitor(&self, monitor: NewMonitor) -> Result<Monitor> {
        let mut store = self.store();
        store.call("create_monitor", "create monitor")?;
        store.next_monitor_id += 1;
        let now = Utc::now();
        let created = Monitor {
            id: store.next_monitor_id,
            name: monitor.name,
            url: monitor.url,
            interval_seconds: monitor.interval_seconds.unwrap_or(60),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        store.monitors.push(created.clone());
        Ok(created)
    }

    async fn update_monitor(&self, id: MonitorId, update: MonitorUpdate) -> Result<Monitor> {
        let mut store = self.store();
        store.call("update_monitor", "update monitor")?;
        store.find(id, "update monitor")?;
        let monitor = store
            .monitors
            .iter_mut()
            .find(|m| m.id == id)
            .expect("monitor found above");
        if let Some(name) = update.name {
            monitor.name = name;
        }
        if let Some(url) = update.url {
            monitor.url = url;
        }
        if let Some(interval_seconds) = update.interval_seconds {
            monitor.interval_seconds = interval_seconds;
        }
        if let Some(is_active) = update.is_active {
            monitor.is_active = is_active;
        }
        monitor.updated_at = Utc::now();
        Ok(monitor.clone())
    }

    async fn delete_monitor(&self, id: MonitorId) -> Result<()> {
        let mut store = self.store();
        store.call("delete_monitor", "delete monitor")?;
        store.find(id, "delete monitor")?;
        store.monitors.retain(|m| m.id != id);
        store.results.retain(|r| r.monitor_id != id);
        Ok(())
    }

    async fn health(&self) -> Result<HealthStatus> {
        let mut store = self.store();
        store.call("health", "check service health")?;
        Ok(HealthStatus {
            status: "healthy".to_string(),
            service: "updog".to_string(),
            version: "0.1.0".to_string(),
            database: "connected".to_string(),
        })
    }

    async fn slo_config(&self) -> Result<SloConfig> {
        let mut store = self.store();
        store.call("slo_config", "fetch SLO configuration")?;
        Ok(SloConfig {
            availability_target: 0.995,
            availability_target_pct: "99.5%".to_string(),
            latency_target_ms: 500,
            latency_percentile: "p95".to_string(),
            window_days: 30,
        })
    }

    async fn slo_report(&self, id: MonitorId) -> Result<SloReport> {
        let mut store = self.store();
        store.call("slo_report", "fetch SLO report")?;
        let monitor_name = store.find(id, "fetch SLO report")?.name.clone();
        let checks: Vec<&CheckResult> =
            store.results.iter().filter(|r| r.monitor_id == id).collect();
        let total_checks = checks.len() as u64;
        let up = checks.iter().filter(|r| r.is_up).count() as f64;
        let current = if total_checks == 0 {
            1.0
        } else {
            up / total_checks as f64
        };
        let status = |name: &str| SloStatus {
            name: name.to_string(),
            target: 0.995,
            current,
            is_met: current >= 0.995,
            error_budget_pct: 100.0,
            burn_rate: 0.0,
            time_remaining_hours: None,
        };
        Ok(SloReport {
            monitor_id: id,
            monitor_name,
            window_days: 30,
            total_checks,
            availability: status("Availability"),
            latency: status("Latency (p95 < 500ms)"),
        })
    }
}
