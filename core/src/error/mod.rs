#[allow(clippy::module_inception)]
pub mod error;
pub mod proxy;

pub use error::{CaptureError, CliError};
pub use proxy::{ProxyError, ProxyErrorKind};
