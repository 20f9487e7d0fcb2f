//! Command handlers: each one works against an [`AppContext`] built in `main`.
use std::path::{Path, PathBuf};
use std::time::Duration;

use kroviz_core::capture::{load_log, save_log};
use kroviz_core::config::AppConfig;
use kroviz_core::context::AppContext;
use kroviz_core::error::CliError;
use kroviz_core::event::{EntryObject, Link, ResourceSpecification};
use kroviz_core::replay::{
    build_log_report, build_replay_report, filter_replay_events, format_log_text,
    format_replay_text,
};

use crate::commands::cli::{Args, FetchArgs, LogArgs, OutputFormat, ReplayArgs};

/// Expand a leading `~/` against the home directory.
pub fn expand_path(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

/// Fold command line overrides into the loaded config.
pub fn apply_cli_overrides(cfg: &mut AppConfig, args: &Args) {
    if let Some(url) = args.base_url.as_deref().filter(|s| !s.trim().is_empty()) {
        cfg.backend.base_url = url.to_string();
    }
    if let Some(user) = &args.user {
        cfg.backend.user = user.clone();
    }
    if let Some(password) = &args.password {
        cfg.backend.password = password.clone();
    }
}

fn events_path(cfg: &AppConfig, explicit: Option<&str>) -> PathBuf {
    expand_path(explicit.unwrap_or(&cfg.capture.path))
}

#[tracing::instrument(name = "cli.fetch", skip_all)]
pub async fn run_fetch(args: FetchArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let sub_type = args
        .sub_type
        .clone()
        .unwrap_or_else(|| ctx.cfg().backend.default_sub_type.clone());
    let proxy = ctx.proxy();
    let mut failures = 0usize;

    for url in &args.urls {
        if let Err(e) = proxy.fetch(Link::get(url.as_str()), None, &sub_type).await {
            tracing::warn!(target: "kroviz.proxy", url = %url, error = %e, "fetch failed");
            eprintln!("{e}");
            failures += 1;
        }
    }

    for href in &args.open {
        if let Err(e) = proxy.fetch(Link::get(href.as_str()), None, &sub_type).await {
            eprintln!("{e}");
            failures += 1;
            continue;
        }
        let rs = ResourceSpecification::new(ctx.session().resolve_href(href), sub_type.as_str());
        match ctx.store().find(&rs).map(|e| e.obj) {
            Some(EntryObject::Domain(obj)) => {
                let title = format!("open {}", obj.title);
                ctx.store().add_user_action(&title, obj, &sub_type);
            }
            _ => {
                tracing::warn!(target: "kroviz.store", href = %href, "not a domain object; no user action recorded");
            }
        }
    }

    let out = events_path(ctx.cfg(), args.out.as_deref());
    let log = ctx.store().log();
    save_log(&out, &log)?;
    println!("captured {} entries to {}", log.len(), out.display());

    Ok(if failures == 0 { 0 } else { 30 })
}

#[tracing::instrument(name = "cli.replay", skip_all)]
pub async fn run_replay(args: ReplayArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let path = events_path(ctx.cfg(), args.events.as_deref());
    let recorded = load_log(&path)?;
    tracing::info!(
        target: "kroviz.replay",
        path = %path.display(),
        entries = recorded.len(),
        "replaying capture"
    );
    for entry in recorded {
        ctx.store().push(entry);
    }

    let handle = ctx.replay_command().execute();
    let steps = handle.scheduled().to_vec();
    let canceller = handle.canceller();

    let timeout = args.timeout_ms.map(Duration::from_millis);
    let watchdog = tokio::spawn(async move {
        let deadline = async {
            match timeout {
                Some(d) => tokio::time::sleep(d).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::select! {
            _ = deadline => tracing::warn!(target: "kroviz.replay", "replay timed out"),
            _ = tokio::signal::ctrl_c() => tracing::warn!(target: "kroviz.replay", "interrupted"),
        }
        canceller.cancel();
    });

    let summary = handle.join().await;
    watchdog.abort();

    match args.format {
        OutputFormat::Json => {
            let report = build_replay_report(&steps, &summary);
            let text = serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::Replay(e.to_string()))?;
            println!("{text}");
        }
        OutputFormat::Text => print!("{}", format_replay_text(&steps, &summary)),
    }

    if let Some(out) = args.out.as_deref() {
        save_log(&expand_path(out), &ctx.store().log())?;
    }

    Ok(if summary.failed == 0 && summary.cancelled == 0 {
        0
    } else {
        50
    })
}

pub fn run_log(args: LogArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let path = events_path(cfg, args.events.as_deref());
    let mut entries = load_log(&path)?;
    if args.replayable {
        entries = filter_replay_events(entries);
    }

    let report = build_log_report(&entries);
    match args.format {
        OutputFormat::Json => {
            let text =
                serde_json::to_string_pretty(&report).map_err(|e| CliError::Replay(e.to_string()))?;
            println!("{text}");
        }
        OutputFormat::Text => print!("{}", format_log_text(&report)),
    }
    Ok(0)
}

pub fn config_path(args: &Args) -> Option<&Path> {
    args.config.as_deref().map(Path::new)
}
