use thiserror::Error;

use super::proxy::ProxyError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("replay failed: {0}")]
    Replay(String),
    #[error("capture failed: {0}")]
    Capture(#[from] CaptureError),
    #[error("proxy failed: {0}")]
    Proxy(#[from] ProxyError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// 11: config, 20: io / capture file, 30: backend, 50: replay or uncategorized.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 11,
            CliError::Io(_) => 20,
            CliError::Capture(_) => 20,
            CliError::Proxy(_) => 30,
            CliError::Replay(_) => 50,
            CliError::Anyhow(_) => 50,
        }
    }
}

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("capture io error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("capture line {line} is not a log entry: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },
    #[error("failed to encode log entry: {0}")]
    Encode(#[from] serde_json::Error),
}
