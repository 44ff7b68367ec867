//! Monitor creation form

use std::sync::Arc;

use crate::api::MonitorApi;
use crate::error::{ClientError, Result};
use crate::model::{Monitor, MonitorDraft, NewMonitor};
use crate::Navigation;

/// One-shot form producing a new monitor
///
/// The submit control is disabled from [`begin_submit`](Self::begin_submit)
/// until [`finish_submit`](Self::finish_submit); a second submission in that
/// window is rejected. A failed submission keeps the draft.
pub struct CreateForm {
    api: Arc<dyn MonitorApi>,
    draft: MonitorDraft,
    min_interval_seconds: u32,
    submitting: bool,
    error: Option<String>,
    created: Option<Monitor>,
}

impl std::fmt::Debug for CreateForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateForm")
            .field("draft", &self.draft)
            .field("submitting", &self.submitting)
            .field("error", &self.error)
            .finish()
    }
}

impl CreateForm {
    pub fn new(
        api: Arc<dyn MonitorApi>,
        default_interval_seconds: u32,
        min_interval_seconds: u32,
    ) -> Self {
        Self {
            api,
            draft: MonitorDraft {
                name: String::new(),
                url: String::new(),
                interval_seconds: default_interval_seconds,
            },
            min_interval_seconds,
            submitting: false,
            error: None,
            created: None,
        }
    }

    pub fn draft(&self) -> &MonitorDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut MonitorDraft {
        &mut self.draft
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        !self.submitting && self.created.is_none()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The monitor returned by the server after a successful submission
    pub fn created(&self) -> Option<&Monitor> {
        self.created.as_ref()
    }

    /// Validate the draft and disable the submit control
    ///
    /// Returns the payload to send. Validation failures leave the control
    /// enabled and set the form error.
    pub fn begin_submit(&mut self) -> Result<NewMonitor> {
        if !self.can_submit() {
            return Err(ClientError::InvalidState(
                "a submission is already in progress".to_string(),
            ));
        }
        self.error = None;
        if let Err(e) = self.draft.validate(self.min_interval_seconds) {
            self.error = Some(e.to_string());
            return Err(e);
        }
        self.submitting = true;
        Ok(self.draft.to_new_monitor())
    }

    /// Re-enable the control and record the outcome
    pub fn finish_submit(&mut self, result: Result<Monitor>) -> Result<Navigation> {
        self.submitting = false;
        match result {
            Ok(monitor) => {
                tracing::info!("Created monitor {} ({})", monitor.id, monitor.name);
                self.created = Some(monitor);
                Ok(Navigation::List)
            }
            Err(e) => {
                tracing::warn!("Failed to create monitor: {}", e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Submit the draft and wait for the server
    pub async fn submit(&mut self) -> Result<Navigation> {
        let payload = self.begin_submit()?;
        let result = self.api.create_monitor(payload).await;
        self.finish_submit(result)
    }

    pub fn render(&self) -> String {
        crate::render::create_form(self)
    }
}
