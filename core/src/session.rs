use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::BackendConfig;

/// Long-lived UI/session context. Created once by the composition root and
/// shared; a UI rebuild keeps it.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    base_url: String,
    user: String,
    password: String,
    started_at: DateTime<Utc>,
    generation: AtomicU64,
}

impl Session {
    pub fn new(base_url: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            base_url: base_url.into(),
            user: user.into(),
            password: password.into(),
            started_at: Utc::now(),
            generation: AtomicU64::new(0),
        }
    }

    pub fn from_config(cfg: &BackendConfig) -> Arc<Self> {
        Arc::new(Self::new(
            cfg.base_url.clone(),
            cfg.user.clone(),
            cfg.password.clone(),
        ))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Basic auth credentials, if a user is configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        if self.user.trim().is_empty() {
            None
        } else {
            Some((self.user.as_str(), self.password.as_str()))
        }
    }

    /// Resolve `href` against the session's base URL. Absolute hrefs pass through.
    pub fn resolve_href(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            return href.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            href.trim_start_matches('/')
        )
    }

    /// Number of UI rebuilds this session has survived.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }

    pub fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Entry point that reconstructs the UI while keeping `session`.
pub trait UiShell: Send + Sync {
    fn rebuild(&self, session: &Arc<Session>);
}
