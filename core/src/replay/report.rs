use serde_json::Value;

use crate::event::LogEntry;

use super::filter::is_replayable;
use super::handle::{ReplayStep, ReplaySummary};

pub fn build_log_report(entries: &[LogEntry]) -> Value {
    let mut user_actions = 0usize;
    let mut replayable = 0usize;
    let mut errors = 0usize;

    let mut items = Vec::new();
    for e in entries {
        if e.is_user_action() {
            user_actions += 1;
        }
        if is_replayable(e) {
            replayable += 1;
        }
        if e.state == crate::event::EventState::Error {
            errors += 1;
        }

        items.push(serde_json::json!({
            "created_at": e.created_at().to_rfc3339(),
            "method": e.method,
            "url": e.url(),
            "sub_type": e.sub_type(),
            "type": e.repr_type.map(|r| r.as_str()),
            "state": e.state,
            "title": e.title,
            "obj": e.obj.kind(),
            "duration_ms": e.duration_ms(),
        }));
    }

    serde_json::json!({
        "totals": {
            "entries": entries.len(),
            "replayable": replayable,
            "user_actions": user_actions,
            "errors": errors,
        },
        "entries": items,
    })
}

pub fn format_log_text(report: &Value) -> String {
    let mut out = String::new();
    out.push_str("Event log\n");

    if let Some(t) = report.get("totals") {
        for key in ["entries", "replayable", "user_actions", "errors"] {
            out.push_str(&format!("{key}: {}\n", t.get(key).unwrap_or(&Value::Null)));
        }
    }

    if let Some(entries) = report.get("entries").and_then(|v| v.as_array()) {
        for e in entries {
            let field = |k: &str| e.get(k).and_then(|v| v.as_str()).unwrap_or("-").to_string();
            out.push_str(&format!(
                "- {} {} {} [{}] {}\n",
                field("created_at"),
                field("method"),
                field("url"),
                field("type"),
                field("state"),
            ));
        }
    }

    out
}

pub fn build_replay_report(steps: &[ReplayStep], summary: &ReplaySummary) -> Value {
    serde_json::json!({
        "summary": summary,
        "steps": steps,
    })
}

pub fn format_replay_text(steps: &[ReplayStep], summary: &ReplaySummary) -> String {
    let mut out = String::new();
    out.push_str("Replay report\n");
    out.push_str(&format!(
        "fetched: {}\nloaded: {}\nskipped: {}\nfailed: {}\ncancelled: {}\n",
        summary.fetched, summary.loaded, summary.skipped, summary.failed, summary.cancelled
    ));
    for step in steps {
        match step {
            ReplayStep::Fetch { url, sub_type } => {
                out.push_str(&format!("- fetch {url} ({sub_type})\n"))
            }
            ReplayStep::Load {
                url,
                title,
                delay_ms,
            } => out.push_str(&format!("- load  {url} \"{title}\" after {delay_ms}ms\n")),
            ReplayStep::Skipped { url, reason } => {
                out.push_str(&format!("- skip  {url}: {reason}\n"))
            }
        }
    }
    out
}
