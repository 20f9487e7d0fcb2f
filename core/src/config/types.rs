use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub capture: CaptureConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Root of the Restful Objects API; relative hrefs are resolved against it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub password: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Sub type used when a command does not name one, e.g. "json" or "xml".
    #[serde(default = "default_sub_type")]
    pub default_sub_type: String,
}

fn default_base_url() -> String {
    "http://localhost:8080/restful/".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_sub_type() -> String {
    "json".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user: String::new(),
            password: String::new(),
            timeout_ms: default_timeout_ms(),
            default_sub_type: default_sub_type(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "kroviz_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_file() -> bool {
    false
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Default JSON Lines file used by `fetch --out` and `replay --events`.
    #[serde(default = "default_capture_path")]
    pub path: String,
}

pub(crate) const DEFAULT_CAPTURE_PATH: &str = "./events.jsonl";

fn default_capture_path() -> String {
    DEFAULT_CAPTURE_PATH.to_string()
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            path: default_capture_path(),
        }
    }
}
