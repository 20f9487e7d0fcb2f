use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::ProxyError;
use crate::event::EventStore;
use crate::proxy::ResourceProxy;
use crate::replay::ReplayCommand;
use crate::session::{Session, UiShell};

#[derive(Clone)]
pub struct Services {
    pub proxy: Arc<dyn ResourceProxy>,
    pub shell: Arc<dyn UiShell>,
}

/// Builds the concrete proxy and shell for a session.
#[async_trait::async_trait]
pub trait ServicesFactory: Send + Sync {
    async fn build_services(
        &self,
        cfg: &AppConfig,
        store: &EventStore,
        session: &Arc<Session>,
    ) -> Result<Services, ProxyError>;
}

/// Composition root: owns the event log and the long-lived session and hands
/// them to everything that needs them.
#[derive(Clone)]
pub struct AppContext {
    cfg: AppConfig,
    store: EventStore,
    session: Arc<Session>,
    services: Services,
}

impl AppContext {
    pub async fn new(cfg: AppConfig, factory: &dyn ServicesFactory) -> Result<Self, ProxyError> {
        let store = EventStore::new();
        let session = Session::from_config(&cfg.backend);
        let services = factory.build_services(&cfg, &store, &session).await?;
        tracing::debug!(
            target: "kroviz.replay",
            session = %session.id(),
            base_url = %session.base_url(),
            "context ready"
        );
        Ok(Self {
            cfg,
            store,
            session,
            services,
        })
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn proxy(&self) -> Arc<dyn ResourceProxy> {
        self.services.proxy.clone()
    }

    pub fn replay_command(&self) -> ReplayCommand {
        ReplayCommand::new(
            self.store.clone(),
            self.services.shell.clone(),
            self.services.proxy.clone(),
            self.session.clone(),
        )
    }
}
