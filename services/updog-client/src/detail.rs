//! Monitor detail/edit state machine
//!
//! Holds one monitor's live state, its recent check results and, while
//! editing, a draft of the editable fields. The live monitor is only ever
//! replaced by a server response; form input goes to the draft.
//!
//! ```text
//! Loading -> Error
//!         -> Viewing <-> Editing
//!            Viewing  -> Deleted
//! ```
//!
//! Selecting another monitor resets the machine to `Loading` from any state.
//! Each load is tagged with a [`LoadTicket`]; outcomes carrying a superseded
//! ticket are dropped in [`MonitorDetail::apply`].

use std::future::Future;
use std::sync::Arc;

use crate::api::MonitorApi;
use crate::error::{ClientError, Result};
use crate::model::{CheckResult, Monitor, MonitorDraft, MonitorId, MonitorUpdate};
use crate::Navigation;

/// Explicit user confirmation gate for destructive actions
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this monitor?";

/// A loaded monitor together with its result feed
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorSnapshot {
    pub live: Monitor,
    pub results: Vec<CheckResult>,
    /// Inline message from the last failed action
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading {
        monitor_id: MonitorId,
    },
    Error {
        monitor_id: MonitorId,
        message: String,
    },
    Viewing(MonitorSnapshot),
    Editing {
        view: MonitorSnapshot,
        draft: MonitorDraft,
    },
    /// Terminal; the monitor is gone and control belongs to the list view
    Deleted {
        monitor_id: MonitorId,
    },
}

impl DetailState {
    pub fn monitor_id(&self) -> MonitorId {
        match self {
            DetailState::Loading { monitor_id }
            | DetailState::Error { monitor_id, .. }
            | DetailState::Deleted { monitor_id } => *monitor_id,
            DetailState::Viewing(view) | DetailState::Editing { view, .. } => view.live.id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DetailState::Loading { .. } => "loading",
            DetailState::Error { .. } => "error",
            DetailState::Viewing(_) => "viewing",
            DetailState::Editing { .. } => "editing",
            DetailState::Deleted { .. } => "deleted",
        }
    }

    /// The live monitor, when one is loaded
    pub fn live(&self) -> Option<&Monitor> {
        match self {
            DetailState::Viewing(view) | DetailState::Editing { view, .. } => Some(&view.live),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&str> {
        match self {
            DetailState::Viewing(view) | DetailState::Editing { view, .. } => {
                view.notice.as_deref()
            }
            _ => None,
        }
    }
}

/// Identifies one load request: the monitor it was issued for and the
/// selection generation that was current at the time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub monitor_id: MonitorId,
    pub generation: u64,
}

/// Result of the joined monitor + results fetch
#[derive(Debug)]
pub struct LoadOutcome {
    pub ticket: LoadTicket,
    pub result: Result<(Monitor, Vec<CheckResult>)>,
}

pub struct MonitorDetail {
    api: Arc<dyn MonitorApi>,
    results_limit: u32,
    min_interval_seconds: u32,
    generation: u64,
    state: DetailState,
}

impl std::fmt::Debug for MonitorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorDetail")
            .field("generation", &self.generation)
            .field("state", &self.state)
            .finish()
    }
}

impl MonitorDetail {
    /// Create the state machine in `Loading` for `monitor_id`
    ///
    /// Nothing is fetched until [`load`](Self::load) (or
    /// [`fetch`](Self::fetch) + [`apply`](Self::apply)) is driven.
    pub fn new(
        api: Arc<dyn MonitorApi>,
        monitor_id: MonitorId,
        results_limit: u32,
        min_interval_seconds: u32,
    ) -> Self {
        Self {
            api,
            results_limit,
            min_interval_seconds,
            generation: 0,
            state: DetailState::Loading { monitor_id },
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn monitor_id(&self) -> MonitorId {
        self.state.monitor_id()
    }

    /// Ticket for the selection currently in effect
    pub fn ticket(&self) -> LoadTicket {
        LoadTicket {
            monitor_id: self.state.monitor_id(),
            generation: self.generation,
        }
    }

    /// Switch to another monitor (or reload the current one)
    ///
    /// Drops whatever was displayed, including an unsaved draft, and
    /// invalidates every load still in flight.
    pub fn select(&mut self, monitor_id: MonitorId) -> LoadTicket {
        self.generation += 1;
        tracing::debug!(
            "Selecting monitor {} (generation {}), leaving {} state",
            monitor_id,
            self.generation,
            self.state.name()
        );
        self.state = DetailState::Loading { monitor_id };
        self.ticket()
    }

    /// Fetch the monitor and its results concurrently
    ///
    /// The returned future does not borrow `self`, so the caller may keep
    /// changing the selection while it is pending. Both requests must
    /// succeed; the first failure cancels the other.
    pub fn fetch(&self, ticket: LoadTicket) -> impl Future<Output = LoadOutcome> + Send + 'static {
        let api = Arc::clone(&self.api);
        let limit = self.results_limit;
        async move {
            let id = ticket.monitor_id;
            let result = tokio::try_join!(api.get_monitor(id), api.get_results(id, limit));
            LoadOutcome { ticket, result }
        }
    }

    /// Apply a finished load. Returns `false` when the outcome was discarded
    /// because the selection moved on or the load was already applied.
    pub fn apply(&mut self, outcome: LoadOutcome) -> bool {
        let is_loading = matches!(self.state, DetailState::Loading { .. });
        if outcome.ticket != self.ticket() || !is_loading {
            tracing::debug!(
                "Discarding stale load for monitor {} (generation {}, current {})",
                outcome.ticket.monitor_id,
                outcome.ticket.generation,
                self.generation
            );
            return false;
        }

        let monitor_id = outcome.ticket.monitor_id;
        self.state = match outcome.result {
            Ok((live, results)) => {
                tracing::debug!(
                    "Loaded monitor {} with {} results",
                    monitor_id,
                    results.len()
                );
                DetailState::Viewing(MonitorSnapshot {
                    live,
                    results,
                    notice: None,
                })
            }
            Err(e) => {
                tracing::warn!("Failed to load monitor {}: {}", monitor_id, e);
                DetailState::Error {
                    monitor_id,
                    message: e.to_string(),
                }
            }
        };
        true
    }

    /// Run the pending load for the current selection to completion
    pub async fn load(&mut self) -> &DetailState {
        let outcome = self.fetch(self.ticket()).await;
        self.apply(outcome);
        &self.state
    }

    /// `select` followed by `load`
    pub async fn open(&mut self, monitor_id: MonitorId) -> &DetailState {
        self.select(monitor_id);
        self.load().await
    }

    /// Viewing -> Editing, seeding the draft from the live monitor
    pub fn begin_edit(&mut self) -> Result<()> {
        if !matches!(self.state, DetailState::Viewing(_)) {
            return Err(self.invalid("enter edit mode"));
        }
        self.transition(|state| match state {
            DetailState::Viewing(mut view) => {
                view.notice = None;
                let draft = MonitorDraft::from_monitor(&view.live);
                DetailState::Editing { view, draft }
            }
            other => other,
        });
        Ok(())
    }

    pub fn draft(&self) -> Option<&MonitorDraft> {
        match &self.state {
            DetailState::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Mutable access to the draft; the live monitor is not reachable this way
    pub fn draft_mut(&mut self) -> Option<&mut MonitorDraft> {
        match &mut self.state {
            DetailState::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Editing -> Viewing, discarding the draft without any request
    pub fn cancel_edit(&mut self) -> Result<()> {
        if !matches!(self.state, DetailState::Editing { .. }) {
            return Err(self.invalid("cancel editing"));
        }
        self.transition(|state| match state {
            DetailState::Editing { mut view, .. } => {
                view.notice = None;
                DetailState::Viewing(view)
            }
            other => other,
        });
        Ok(())
    }

    /// Send the draft to the server
    ///
    /// On success the live monitor becomes the server response and the
    /// machine returns to `Viewing`. On failure it stays in `Editing` with
    /// the draft exactly as entered and the message set as notice.
    pub async fn save(&mut self) -> Result<()> {
        let min_interval_seconds = self.min_interval_seconds;
        let (monitor_id, update) = match &mut self.state {
            DetailState::Editing { view, draft } => {
                if let Err(e) = draft.validate(min_interval_seconds) {
                    view.notice = Some(e.to_string());
                    return Err(e);
                }
                (view.live.id, draft.to_update())
            }
            _ => return Err(self.invalid("save")),
        };

        tracing::debug!("Saving draft for monitor {}", monitor_id);
        let result = self.api.update_monitor(monitor_id, update).await;

        match result {
            Ok(updated) => {
                self.transition(|state| match state {
                    DetailState::Editing { view, .. } => DetailState::Viewing(MonitorSnapshot {
                        live: updated,
                        results: view.results,
                        notice: None,
                    }),
                    other => other,
                });
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to save monitor {}: {}", monitor_id, e);
                if let DetailState::Editing { view, .. } = &mut self.state {
                    view.notice = Some(e.to_string());
                }
                Err(e)
            }
        }
    }

    /// Pause or resume the monitor
    ///
    /// The displayed `is_active` only changes once the server has answered,
    /// and then to whatever the server reports.
    pub async fn toggle_active(&mut self) -> Result<()> {
        let (monitor_id, requested) = match &self.state {
            DetailState::Viewing(view) => (view.live.id, !view.live.is_active),
            _ => return Err(self.invalid("toggle active")),
        };

        tracing::debug!("Setting monitor {} is_active={}", monitor_id, requested);
        let result = self
            .api
            .update_monitor(monitor_id, MonitorUpdate::active(requested))
            .await;

        if let DetailState::Viewing(view) = &mut self.state {
            match result {
                Ok(updated) => {
                    view.live = updated;
                    view.notice = None;
                    Ok(())
                }
                Err(e) => {
                    tracing::warn!("Failed to toggle monitor {}: {}", monitor_id, e);
                    view.notice = Some(e.to_string());
                    Err(e)
                }
            }
        } else {
            result.map(|_| ())
        }
    }

    /// Delete the monitor after asking `confirm`
    ///
    /// Returns `Ok(None)` when the user declines (no request is made) and
    /// `Ok(Some(Navigation::List))` once the server has deleted it.
    pub async fn delete(&mut self, confirm: &dyn Confirm) -> Result<Option<Navigation>> {
        let monitor_id = match &self.state {
            DetailState::Viewing(view) => view.live.id,
            _ => return Err(self.invalid("delete")),
        };

        if !confirm.confirm(DELETE_PROMPT) {
            tracing::debug!("Delete of monitor {} not confirmed", monitor_id);
            return Ok(None);
        }

        match self.api.delete_monitor(monitor_id).await {
            Ok(()) => {
                tracing::info!("Deleted monitor {}", monitor_id);
                self.state = DetailState::Deleted { monitor_id };
                Ok(Some(Navigation::List))
            }
            Err(e) => {
                tracing::warn!("Failed to delete monitor {}: {}", monitor_id, e);
                if let DetailState::Viewing(view) = &mut self.state {
                    view.notice = Some(e.to_string());
                }
                Err(e)
            }
        }
    }

    pub fn render(&self) -> String {
        crate::render::detail(&self.state)
    }

    fn transition(&mut self, f: impl FnOnce(DetailState) -> DetailState) {
        let monitor_id = self.state.monitor_id();
        let previous = std::mem::replace(&mut self.state, DetailState::Loading { monitor_id });
        self.state = f(previous);
        tracing::debug!("Monitor {} is now {}", monitor_id, self.state.name());
    }

    fn invalid(&self, action: &str) -> ClientError {
        ClientError::InvalidState(format!(
            "cannot {} while {}",
            action,
            self.state.name()
        ))
    }
}
