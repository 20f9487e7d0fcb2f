use futures::future::BoxFuture;

use crate::error::ProxyError;
use crate::event::{Link, TObject};

/// Future returned by a proxy call. The call itself is made synchronously so
/// the order of invocations is the order of calls; the I/O runs when polled.
pub type ProxyFuture = BoxFuture<'static, Result<(), ProxyError>>;

/// Outbound access to the Restful Objects backend.
pub trait ResourceProxy: Send + Sync {
    /// Retrieve the resource behind `link`, sending `body` if present.
    fn fetch(&self, link: Link, body: Option<String>, sub_type: &str) -> ProxyFuture;

    /// Refresh a previously resolved domain object through its self link.
    fn load(&self, obj: TObject) -> ProxyFuture;
}
