use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyErrorKind {
    Timeout,
    Connect,
    Request,
    Body,
    Decode,
    Unknown,
}

impl ProxyErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Body => "body",
            Self::Decode => "decode",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProxyErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures raised by a [`crate::proxy::ResourceProxy`] while talking to the backend.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("proxy http error kind={kind} url={url}: {message}")]
    Http {
        kind: ProxyErrorKind,
        url: String,
        message: String,
    },

    #[error("proxy http error kind=status status={status} url={url}: {preview}")]
    Status {
        status: u16,
        url: String,
        preview: String,
    },

    #[error("object '{title}' has no self link")]
    MissingSelfLink { title: String },

    #[error("failed to build http client: {0}")]
    Build(String),
}

impl ProxyError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
