use std::sync::Arc;

use kroviz_core::error::{ProxyError, ProxyErrorKind};
use kroviz_core::event::{
    EntryObject, EventStore, Link, Represention, ResourceSpecification, TObject,
};
use kroviz_core::proxy::{ProxyFuture, ResourceProxy};
use kroviz_core::session::Session;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

const BODY_PREVIEW_LIMIT: usize = 512;

fn from_reqwest(err: reqwest::Error, url: String) -> ProxyError {
    let kind = if err.is_timeout() {
        ProxyErrorKind::Timeout
    } else if err.is_connect() {
        ProxyErrorKind::Connect
    } else if err.is_request() {
        ProxyErrorKind::Request
    } else if err.is_body() {
        ProxyErrorKind::Body
    } else if err.is_decode() {
        ProxyErrorKind::Decode
    } else {
        ProxyErrorKind::Unknown
    };
    ProxyError::Http {
        kind,
        url,
        message: err.to_string(),
    }
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out = String::new();
    let mut truncated = false;
    for (idx, ch) in trimmed.chars().enumerate() {
        if idx >= BODY_PREVIEW_LIMIT {
            truncated = true;
            break;
        }
        out.push(ch);
    }

    if truncated {
        out.push_str("...");
    }

    out
}

pub(crate) fn accept_header(sub_type: &str) -> String {
    match sub_type {
        "" | "json" => "application/json".to_string(),
        "xml" => "application/xml".to_string(),
        other => format!("application/{other}"),
    }
}

/// Resource proxy backed by reqwest. Every request is recorded in the event
/// log: `start` before sending, `end` or `fault` once the outcome is known.
#[derive(Clone)]
pub struct HttpResourceProxy {
    http: reqwest::Client,
    store: EventStore,
    session: Arc<Session>,
    default_sub_type: String,
}

impl HttpResourceProxy {
    pub fn new(
        store: EventStore,
        session: Arc<Session>,
        timeout_ms: u64,
        default_sub_type: String,
    ) -> Result<Self, ProxyError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| ProxyError::Build(e.to_string()))?;
        Ok(Self {
            http,
            store,
            session,
            default_sub_type,
        })
    }

    async fn send(self, link: Link, body: Option<String>, sub_type: String) -> Result<(), ProxyError> {
        let url = self.session.resolve_href(&link.href);
        let rs = ResourceSpecification::new(url.clone(), sub_type.clone());
        let index = self.store.start(rs.clone(), &link.method, body.clone());

        match self.exchange(&url, &link.method, body, &sub_type).await {
            Ok((text, repr_type)) => {
                let obj = TObject::from_json(&text)
                    .map(EntryObject::Domain)
                    .unwrap_or_default();
                self.store.end(index, &rs, Some(text), repr_type, obj);
                Ok(())
            }
            Err(e) => {
                self.store.fault(index, &rs, e.to_string());
                Err(e)
            }
        }
    }

    async fn exchange(
        &self,
        url: &str,
        method: &str,
        body: Option<String>,
        sub_type: &str,
    ) -> Result<(String, Option<Represention>), ProxyError> {
        let method = reqwest::Method::from_bytes(method.as_bytes()).map_err(|e| ProxyError::Http {
            kind: ProxyErrorKind::Request,
            url: url.to_string(),
            message: e.to_string(),
        })?;
        tracing::debug!(
            target: "kroviz.proxy",
            stage = "proxy.fetch.in",
            url = %url,
            method = %method,
            has_body = body.is_some()
        );

        let mut req = self
            .http
            .request(method, url)
            .header(ACCEPT, accept_header(sub_type));
        if let Some((user, password)) = self.session.credentials() {
            req = req.basic_auth(user, Some(password));
        }
        if let Some(body) = body {
            req = req.header(CONTENT_TYPE, "application/json").body(body);
        }

        let resp = req
            .send()
            .await
            .map_err(|err| from_reqwest(err, url.to_string()))?;
        let status = resp.status();
        let repr_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(Represention::from_content_type);
        let text = resp
            .text()
            .await
            .map_err(|err| from_reqwest(err, url.to_string()))?;

        tracing::debug!(
            target: "kroviz.proxy",
            stage = "proxy.fetch.out",
            url = %url,
            status = %status,
            repr_type = ?repr_type
        );

        if status.is_client_error() || status.is_server_error() {
            return Err(ProxyError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                preview: preview_body(&text),
            });
        }

        Ok((text, repr_type))
    }
}

impl ResourceProxy for HttpResourceProxy {
    fn fetch(&self, link: Link, body: Option<String>, sub_type: &str) -> ProxyFuture {
        let sub_type = if sub_type.trim().is_empty() {
            self.default_sub_type.clone()
        } else {
            sub_type.to_string()
        };
        Box::pin(self.clone().send(link, body, sub_type))
    }

    fn load(&self, obj: TObject) -> ProxyFuture {
        let Some(link) = obj.self_link().cloned() else {
            return Box::pin(async move { Err(ProxyError::MissingSelfLink { title: obj.title }) });
        };
        tracing::debug!(target: "kroviz.proxy", title = %obj.title, href = %link.href, "load");
        let link = Link {
            method: "GET".to_string(),
            ..link
        };
        Box::pin(self.clone().send(link, None, self.default_sub_type.clone()))
    }
}
