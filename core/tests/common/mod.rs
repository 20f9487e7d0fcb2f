#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use kroviz_core::event::{
    EntryObject, EventState, EventStore, Link, LogEntry, Represention, ResourceSpecification,
    TObject,
};
use kroviz_core::proxy::{ProxyFuture, ResourceProxy};
use kroviz_core::replay::ReplayCommand;
use kroviz_core::session::{Session, UiShell};
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Fetch { href: String, sub_type: String, body: Option<String> },
    Load { domain_type: String, title: String },
}

/// Proxy that records each call with the (virtual) time it was made.
pub struct RecordingProxy {
    origin: Instant,
    calls: Mutex<Vec<(Call, Duration)>>,
}

impl RecordingProxy {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            origin: Instant::now(),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(Call, Duration)> {
        self.calls.lock().unwrap().clone()
    }

    fn note(&self, call: Call) {
        self.calls
            .lock()
            .unwrap()
            .push((call, self.origin.elapsed()));
    }
}

impl ResourceProxy for RecordingProxy {
    fn fetch(&self, link: Link, body: Option<String>, sub_type: &str) -> ProxyFuture {
        self.note(Call::Fetch {
            href: link.href,
            sub_type: sub_type.to_string(),
            body,
        });
        Box::pin(async { Ok(()) })
    }

    fn load(&self, obj: TObject) -> ProxyFuture {
        self.note(Call::Load {
            domain_type: obj.domain_type,
            title: obj.title,
        });
        Box::pin(async { Ok(()) })
    }
}

/// Shell whose rebuild writes a fresh homepage fetch into the store, the way
/// a real UI start does.
pub struct EchoShell {
    pub store: EventStore,
    pub sessions_seen: Mutex<Vec<uuid::Uuid>>,
}

impl UiShell for EchoShell {
    fn rebuild(&self, session: &Arc<Session>) {
        session.next_generation();
        self.sessions_seen.lock().unwrap().push(session.id());
        self.store.start(
            ResourceSpecification::new(session.base_url(), "json"),
            "GET",
            None,
        );
    }
}

pub fn obj(title: &str) -> TObject {
    TObject {
        domain_type: "demo.SimpleObject".to_string(),
        instance_id: Some("1".to_string()),
        title: title.to_string(),
        links: vec![],
        members: serde_json::json!({}),
    }
}

pub fn entry(url: &str, repr: Option<Represention>, state: EventState, at_ms: i64) -> LogEntry {
    let mut e = LogEntry::new(
        ResourceSpecification::new(url, "json"),
        "GET",
        None,
        Utc.timestamp_millis_opt(1_690_000_000_000 + at_ms).unwrap(),
    );
    e.repr_type = repr;
    e.state = state;
    e
}

pub fn user_action(url: &str, title: &str, at_ms: i64) -> LogEntry {
    let mut e = entry(url, Some(Represention::Object), EventState::UserAction, at_ms);
    e.title = title.to_string();
    e.obj = EntryObject::Domain(obj(title));
    e
}

pub fn replay_fixture(
    entries: Vec<LogEntry>,
) -> (ReplayCommand, EventStore, Arc<RecordingProxy>, Arc<EchoShell>, Arc<Session>) {
    let store = EventStore::new();
    for e in entries {
        store.push(e);
    }
    let proxy = RecordingProxy::new();
    let shell = Arc::new(EchoShell {
        store: store.clone(),
        sessions_seen: Mutex::new(Vec::new()),
    });
    let session = Arc::new(Session::new("http://localhost:8080/restful/", "sven", "pass"));
    let cmd = ReplayCommand::new(store.clone(), shell.clone(), proxy.clone(), session.clone());
    (cmd, store, proxy, shell, session)
}
