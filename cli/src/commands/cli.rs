use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "kroviz", version, about = "Capture and replay Restful Objects sessions")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file; defaults to ~/.kroviz/config.toml, then ./config.toml.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Overrides `backend.base_url`.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[arg(long, global = true)]
    pub user: Option<String>,

    #[arg(long, global = true)]
    pub password: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct FetchArgs {
    /// Resources to fetch, in order. Relative hrefs resolve against the base URL.
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Objects to open as user actions after the plain fetches.
    #[arg(long = "open", action = clap::ArgAction::Append)]
    pub open: Vec<String>,

    #[arg(long)]
    pub sub_type: Option<String>,

    /// Capture file to write; defaults to `capture.path`.
    #[arg(long)]
    pub out: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ReplayArgs {
    /// Capture file to replay; defaults to `capture.path`.
    #[arg(long)]
    pub events: Option<String>,

    /// Write the log produced by the replay here.
    #[arg(long)]
    pub out: Option<String>,

    /// Abort whatever is still pending after this many milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct LogArgs {
    #[arg(long)]
    pub events: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Show only entries a replay would re-issue.
    #[arg(long, default_value_t = false)]
    pub replayable: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Fetch(FetchArgs),
    Replay(ReplayArgs),
    Log(LogArgs),
}
