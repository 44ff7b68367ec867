//! UpDog client - uptime monitoring service client
//!
//! Lists monitors, shows a monitor with its recent check results, and
//! creates, edits, pauses/resumes and deletes monitors against the UpDog
//! REST API. The remote service is the only source of truth: every local
//! mutation is replaced by the server's response.

pub mod api;
pub mod commands;
pub mod config;
pub mod create;
pub mod detail;
pub mod error;
pub mod io;
pub mod list;
pub mod model;
pub mod render;

pub use api::{HttpMonitorApi, MonitorApi};
pub use commands::{Command, CommandOutput};
pub use config::{load_config, Config};
pub use error::{ClientError, Result};

use std::sync::Arc;

use crate::commands::StdinConfirm;
use crate::io::ReqwestHttpClient;
use crate::model::MonitorId;

/// Where control goes after a view operation completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The monitor list
    List,
    /// The detail view of one monitor
    Monitor(MonitorId),
}

/// Run a single command against the configured service, printing the
/// resulting view to stdout
pub async fn run(config: Config, command: Command) -> Result<()> {
    config.validate()?;
    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::new());
    let api: Arc<dyn MonitorApi> = Arc::new(HttpMonitorApi::new(&config.base_url, http));

    let output = commands::execute(api, &config, command, &StdinConfirm).await;
    println!("{}", output.rendered);

    match output.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
