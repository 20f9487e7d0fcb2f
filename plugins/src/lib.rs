pub mod factory;
pub mod proxy;
pub mod shell;

pub use factory::PluginServicesFactory;
pub use proxy::HttpResourceProxy;
pub use shell::HeadlessShell;
