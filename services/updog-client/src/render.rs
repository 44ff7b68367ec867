//! Plain-text rendering of the views

use crate::create::CreateForm;
use crate::detail::DetailState;
use crate::list::ListState;
use crate::model::{CheckOutcome, CheckResult, HealthStatus, MonitorDraft, SloReport, SloStatus};

const PLACEHOLDER: &str = "-";

pub fn monitor_list(state: &ListState) -> String {
    match state {
        ListState::Loading => "Loading...".to_string(),
        ListState::Error(message) => format!("Error: {}", message),
        ListState::Loaded(monitors) if monitors.is_empty() => {
            "Dashboard\n\nNo monitors yet.".to_string()
        }
        ListState::Loaded(monitors) => {
            let rows: String = monitors
                .iter()
                .map(|m| {
                    format!(
                        "{:>6}  {:<7} {}\n",
                        m.id,
                        m.status_label(),
                        m.name
                    )
                })
                .collect();
            format!(
                "Dashboard\n\n{:>6}  {:<7} {}\n{}",
                "ID", "STATUS", "NAME", rows
            )
            .trim_end()
            .to_string()
        }
    }
}

pub fn detail(state: &DetailState) -> String {
    match state {
        DetailState::Loading { .. } => "Loading...".to_string(),
        DetailState::Error { message, .. } => format!("Error: {}", message),
        DetailState::Deleted { monitor_id } => format!("Monitor {} deleted.", monitor_id),
        DetailState::Viewing(view) => {
            let live = &view.live;
            let mut out = format!(
                "{}\nURL: {}\nStatus: {}\nCheck interval: {} seconds\n",
                live.name,
                live.url,
                live.status_label(),
                live.interval_seconds
            );
            push_notice(&mut out, view.notice.as_deref());
            out.push('\n');
            out.push_str(&results(&view.results));
            out
        }
        DetailState::Editing { view, draft } => {
            let mut out = edit_form("Edit Monitor", draft);
            push_notice(&mut out, view.notice.as_deref());
            out.push('\n');
            out.push_str(&results(&view.results));
            out
        }
    }
}

fn push_notice(out: &mut String, notice: Option<&str>) {
    if let Some(notice) = notice {
        out.push_str(&format!("Error: {}\n", notice));
    }
}

fn edit_form(title: &str, draft: &MonitorDraft) -> String {
    format!(
        "{}\nName: {}\nURL: {}\nInterval (seconds): {}\n",
        title, draft.name, draft.url, draft.interval_seconds
    )
}

/// The "Recent Checks" feed
///
/// The status column shows the scheduler's `is_up` verdict as-is.
pub fn results(results: &[CheckResult]) -> String {
    if results.is_empty() {
        return "Recent Checks\n\nNo check results yet.".to_string();
    }

    let rows: String = results
        .iter()
        .map(|r| {
            let status = if r.is_up { "Up" } else { "Down" };
            let code = match (r.outcome(), r.status_code) {
                (CheckOutcome::Responded, Some(code)) => code.to_string(),
                _ => PLACEHOLDER.to_string(),
            };
            let response_time = r
                .response_time_ms
                .map(|ms| format!("{}ms", ms))
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            let error = r.error_message.as_deref().unwrap_or(PLACEHOLDER);
            format!(
                "{:<19}  {:<6} {:<4} {:<9} {}\n",
                r.checked_at.format("%Y-%m-%d %H:%M:%S"),
                status,
                code,
                response_time,
                error
            )
        })
        .collect();

    format!(
        "Recent Checks\n\n{:<19}  {:<6} {:<4} {:<9} {}\n{}",
        "TIME", "STATUS", "CODE", "RESPONSE", "ERROR", rows
    )
    .trim_end()
    .to_string()
}

pub fn create_form(form: &CreateForm) -> String {
    let mut out = edit_form("Add Monitor", form.draft());
    if let Some(error) = form.error() {
        out.push_str(&format!("Error: {}\n", error));
    }
    if let Some(created) = form.created() {
        out.push_str(&format!("Created monitor {} ({}).\n", created.id, created.name));
    } else if form.is_submitting() {
        out.push_str("Creating...\n");
    }
    out.trim_end().to_string()
}

pub fn health(health: &HealthStatus) -> String {
    format!(
        "Service: {} {}\nStatus: {}\nDatabase: {}",
        health.service, health.version, health.status, health.database
    )
}

fn slo_status(status: &SloStatus) -> String {
    let verdict = if status.is_met { "met" } else { "missed" };
    let remaining = status
        .time_remaining_hours
        .map(|h| format!("{:.1}h", h))
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    format!(
        "{}: {:.2}% (target {:.2}%, {})\n  error budget {:.1}%, burn rate {:.2}, exhausted in {}\n",
        status.name,
        status.current * 100.0,
        status.target * 100.0,
        verdict,
        status.error_budget_pct,
        status.burn_rate,
        remaining
    )
}

pub fn slo_report(report: &SloReport) -> String {
    let mut out = format!(
        "SLO report for {} (last {} days, {} checks)\n",
        report.monitor_name, report.window_days, report.total_checks
    );
    out.push_str(&slo_status(&report.availability));
    out.push_str(&slo_status(&report.latency));
    out.trim_end().to_string()
}
