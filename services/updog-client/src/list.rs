//! Monitor list view

use std::sync::Arc;

use crate::api::MonitorApi;
use crate::model::{Monitor, MonitorId};
use crate::Navigation;

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Error(String),
    Loaded(Vec<Monitor>),
}

/// Read-only view over every monitor the service knows about
pub struct MonitorList {
    api: Arc<dyn MonitorApi>,
    state: ListState,
}

impl std::fmt::Debug for MonitorList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorList")
            .field("state", &self.state)
            .finish()
    }
}

impl MonitorList {
    pub fn new(api: Arc<dyn MonitorApi>) -> Self {
        Self {
            api,
            state: ListState::Loading,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Fetch the monitor set. Calling it again refreshes the view.
    pub async fn activate(&mut self) -> &ListState {
        self.state = ListState::Loading;
        self.state = match self.api.list_monitors().await {
            Ok(monitors) => {
                tracing::debug!("Loaded {} monitors", monitors.len());
                ListState::Loaded(monitors)
            }
            Err(e) => {
                tracing::warn!("Failed to list monitors: {}", e);
                ListState::Error(e.to_string())
            }
        };
        &self.state
    }

    /// Navigation to the detail view of a listed monitor
    pub fn select(&self, id: MonitorId) -> Option<Navigation> {
        match &self.state {
            ListState::Loaded(monitors) if monitors.iter().any(|m| m.id == id) => {
                Some(Navigation::Monitor(id))
            }
            _ => None,
        }
    }

    pub fn render(&self) -> String {
        crate::render::monitor_list(&self.state)
    }
}
