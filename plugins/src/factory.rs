use std::sync::Arc;

use async_trait::async_trait;
use kroviz_core::config::AppConfig;
use kroviz_core::context::{Services, ServicesFactory};
use kroviz_core::error::ProxyError;
use kroviz_core::event::EventStore;
use kroviz_core::session::Session;

use crate::proxy::HttpResourceProxy;
use crate::shell::HeadlessShell;

pub fn build_proxy(
    cfg: &AppConfig,
    store: &EventStore,
    session: &Arc<Session>,
) -> Result<HttpResourceProxy, ProxyError> {
    HttpResourceProxy::new(
        store.clone(),
        session.clone(),
        cfg.backend.timeout_ms,
        cfg.backend.default_sub_type.clone(),
    )
}

#[derive(Default)]
pub struct PluginServicesFactory;

#[async_trait]
impl ServicesFactory for PluginServicesFactory {
    async fn build_services(
        &self,
        cfg: &AppConfig,
        store: &EventStore,
        session: &Arc<Session>,
    ) -> Result<Services, ProxyError> {
        let proxy = build_proxy(cfg, store, session)?;
        Ok(Services {
            proxy: Arc::new(proxy),
            shell: Arc::new(HeadlessShell),
        })
    }
}
