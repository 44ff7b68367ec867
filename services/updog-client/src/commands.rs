//! CLI commands driving the views

use std::io::{BufRead, Write};
use std::sync::Arc;

use clap::Subcommand;

use crate::api::MonitorApi;
use crate::config::Config;
use crate::create::CreateForm;
use crate::detail::{Confirm, DetailState, MonitorDetail};
use crate::error::ClientError;
use crate::list::MonitorList;
use crate::model::MonitorId;
use crate::Navigation;

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List all monitors
    List,

    /// Show a monitor and its recent checks
    Show { id: MonitorId },

    /// Register a new monitor
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        url: String,

        /// Check interval in seconds (defaults to the configured default)
        #[arg(long)]
        interval: Option<u32>,
    },

    /// Edit a monitor's name, URL or interval
    Edit {
        id: MonitorId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        interval: Option<u32>,
    },

    /// Pause an active monitor or resume a paused one
    Toggle { id: MonitorId },

    /// Delete a monitor
    Delete {
        id: MonitorId,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the SLO report for a monitor
    Slo { id: MonitorId },

    /// Check service health
    Health,
}

/// What a command leaves on screen, plus the failure it surfaced, if any
#[derive(Debug)]
pub struct CommandOutput {
    pub rendered: String,
    pub error: Option<ClientError>,
}

impl CommandOutput {
    fn ok(rendered: String) -> Self {
        Self {
            rendered,
            error: None,
        }
    }

    fn from_result(rendered: String, result: crate::Result<()>) -> Self {
        Self {
            rendered,
            error: result.err(),
        }
    }
}

/// Asks on stderr and reads the answer from stdin
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let mut stderr = std::io::stderr();
        if write!(stderr, "{} [y/N] ", prompt)
            .and_then(|_| stderr.flush())
            .is_err()
        {
            return false;
        }
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Confirms everything, for `--yes`
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Run one command against `api`
pub async fn execute(
    api: Arc<dyn MonitorApi>,
    config: &Config,
    command: Command,
    confirm: &dyn Confirm,
) -> CommandOutput {
    tracing::debug!("Executing {:?}", command);
    match command {
        Command::List => follow(api, config, Navigation::List).await,
        Command::Show { id } => follow(api, config, Navigation::Monitor(id)).await,
        Command::Create {
            name,
            url,
            interval,
        } => {
            let mut form = CreateForm::new(
                Arc::clone(&api),
                config.default_interval_seconds,
                config.min_interval_seconds,
            );
            {
                let draft = form.draft_mut();
                draft.name = name;
                draft.url = url;
                if let Some(interval) = interval {
                    draft.interval_seconds = interval;
                }
            }
            match form.submit().await {
                Ok(navigation) => {
                    let mut output = follow(api, config, navigation).await;
                    output.rendered = format!("{}\n\n{}", form.render(), output.rendered);
                    output
                }
                Err(e) => CommandOutput {
                    rendered: form.render(),
                    error: Some(e),
                },
            }
        }
        Command::Edit {
            id,
            name,
            url,
            interval,
        } => {
            let mut detail = open_detail(api, config, id).await;
            if let Err(e) = loaded(&detail) {
                return CommandOutput {
                    rendered: detail.render(),
                    error: Some(e),
                };
            }
            let result = edit(&mut detail, name, url, interval).await;
            CommandOutput::from_result(detail.render(), result)
        }
        Command::Toggle { id } => {
            let mut detail = open_detail(api, config, id).await;
            let result = match loaded(&detail) {
                Ok(()) => detail.toggle_active().await,
                Err(e) => Err(e),
            };
            CommandOutput::from_result(detail.render(), result)
        }
        Command::Delete { id, yes } => {
            let mut detail = open_detail(Arc::clone(&api), config, id).await;
            if let Err(e) = loaded(&detail) {
                return CommandOutput {
                    rendered: detail.render(),
                    error: Some(e),
                };
            }
            let result = if yes {
                detail.delete(&AssumeYes).await
            } else {
                detail.delete(confirm).await
            };
            match result {
                Ok(Some(navigation)) => {
                    let mut output = follow(api, config, navigation).await;
                    output.rendered = format!("{}\n\n{}", detail.render(), output.rendered);
                    output
                }
                Ok(None) => CommandOutput::ok(format!("Not deleted.\n\n{}", detail.render())),
                Err(e) => CommandOutput {
                    rendered: detail.render(),
                    error: Some(e),
                },
            }
        }
        Command::Slo { id } => match api.slo_report(id).await {
            Ok(report) => CommandOutput::ok(crate::render::slo_report(&report)),
            Err(e) => CommandOutput {
                rendered: format!("Error: {}", e),
                error: Some(e),
            },
        },
        Command::Health => match api.health().await {
            Ok(health) => {
                let rendered = crate::render::health(&health);
                if health.is_healthy() {
                    CommandOutput::ok(rendered)
                } else {
                    let error = ClientError::Transport(format!(
                        "{} reports {}",
                        health.service, health.status
                    ));
                    CommandOutput {
                        rendered,
                        error: Some(error),
                    }
                }
            }
            Err(e) => CommandOutput {
                rendered: format!("Error: {}", e),
                error: Some(e),
            },
        },
    }
}

/// Activate the view a navigation points at and render it
async fn follow(api: Arc<dyn MonitorApi>, config: &Config, navigation: Navigation) -> CommandOutput {
    match navigation {
        Navigation::List => {
            let mut list = MonitorList::new(api);
            list.activate().await;
            let error = match list.state() {
                crate::list::ListState::Error(message) => {
                    Some(ClientError::Transport(message.clone()))
                }
                _ => None,
            };
            CommandOutput {
                rendered: list.render(),
                error,
            }
        }
        Navigation::Monitor(id) => {
            let detail = open_detail(api, config, id).await;
            CommandOutput::from_result(detail.render(), loaded(&detail))
        }
    }
}

async fn open_detail(api: Arc<dyn MonitorApi>, config: &Config, id: MonitorId) -> MonitorDetail {
    let mut detail = MonitorDetail::new(
        api,
        id,
        config.results_limit,
        config.min_interval_seconds,
    );
    detail.load().await;
    detail
}

/// The load error, if the detail view did not get past `Loading`
fn loaded(detail: &MonitorDetail) -> crate::Result<()> {
    match detail.state() {
        DetailState::Error { message, .. } => Err(ClientError::Transport(message.clone())),
        _ => Ok(()),
    }
}

async fn edit(
    detail: &mut MonitorDetail,
    name: Option<String>,
    url: Option<String>,
    interval: Option<u32>,
) -> crate::Result<()> {
    if name.is_none() && url.is_none() && interval.is_none() {
        return Err(ClientError::Validation(
            "nothing to change; pass --name, --url or --interval".to_string(),
        ));
    }

    detail.begin_edit()?;
    if let Some(draft) = detail.draft_mut() {
        if let Some(name) = name {
            draft.name = name;
        }
        if let Some(url) = url {
            draft.url = url;
        }
        if let Some(interval) = interval {
            draft.interval_seconds = interval;
        }
    }
    detail.save().await
}
