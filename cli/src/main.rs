use clap::Parser;
use kroviz_cli::app;
use kroviz_cli::commands::cli;
use kroviz_core::context::AppContext;
use kroviz_core::error::CliError;
use kroviz_plugins::PluginServicesFactory;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            e.exit_code()
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();
    let mut cfg = match app::config_path(&args) {
        Some(path) => kroviz_core::config::load_explicit(path),
        None => kroviz_core::config::load_default(),
    }
    .map_err(|e| CliError::Config(e.to_string()))?;
    app::apply_cli_overrides(&mut cfg, &args);
    init_tracing(&cfg.logging).map_err(CliError::Config)?;

    let command = match args.command {
        cli::Commands::Log(log_args) => return app::run_log(log_args, &cfg),
        other => other,
    };

    let ctx = AppContext::new(cfg, &PluginServicesFactory).await?;
    tracing::debug!(session = %ctx.session().id(), "session started");

    match command {
        cli::Commands::Fetch(fetch_args) => app::run_fetch(fetch_args, &ctx).await,
        cli::Commands::Replay(replay_args) => app::run_replay(replay_args, &ctx).await,
        cli::Commands::Log(log_args) => app::run_log(log_args, ctx.cfg()),
    }
}

fn init_tracing(logging: &kroviz_core::config::LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => app::expand_path(d),
            None => std::env::temp_dir().join("kroviz"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let appender = tracing_appender::rolling::daily(dir, "kroviz.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging enabled but neither console nor file output is on".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
            .with_target(true)
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| e.to_string())
}
