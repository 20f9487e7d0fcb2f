use std::sync::Arc;

use crate::event::{EntryObject, EventStore, Link, LogEntry};
use crate::proxy::{ProxyFuture, ResourceProxy};
use crate::session::{Session, UiShell};

use super::delay::replay_delay;
use super::filter::filter_replay_events;
use super::handle::{ReplayHandle, ReplayStep, TaskKind};

/// Deep copy of `events`; nothing in the result aliases the live log.
pub fn copy_events(events: &[LogEntry]) -> Vec<LogEntry> {
    events.iter().map(LogEntry::copy_entry).collect()
}

/// Replays the captured session against the live backend.
///
/// The store, shell, proxy and session are all owned by the composition root
/// ([`crate::context::AppContext`]) and handed in here.
pub struct ReplayCommand {
    store: EventStore,
    shell: Arc<dyn UiShell>,
    proxy: Arc<dyn ResourceProxy>,
    session: Arc<Session>,
}

impl ReplayCommand {
    pub fn new(
        store: EventStore,
        shell: Arc<dyn UiShell>,
        proxy: Arc<dyn ResourceProxy>,
        session: Arc<Session>,
    ) -> Self {
        Self {
            store,
            shell,
            proxy,
            session,
        }
    }

    /// Snapshot and reset the log, rebuild the UI, then re-issue every
    /// replayable entry with its original pacing.
    ///
    /// Returns as soon as every entry has been dispatched; the returned handle
    /// may be ignored.
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime.
    pub fn execute(&self) -> ReplayHandle {
        let expected = copy_events(&self.store.log());
        self.store.reset();
        self.shell.rebuild(&self.session);

        let events = filter_replay_events(expected);
        tracing::info!(
            target: "kroviz.replay",
            session = %self.session.id(),
            session_started_at = %self.session.started_at().to_rfc3339(),
            generation = self.session.generation(),
            entries = events.len(),
            "replay started"
        );
        self.replay(&events)
    }

    fn replay(&self, events: &[LogEntry]) -> ReplayHandle {
        let mut handle = ReplayHandle::default();
        let mut previous: Option<&LogEntry> = None;

        for current in events {
            match previous {
                Some(prev) if current.is_user_action() => {
                    self.schedule_load(&mut handle, prev, current)
                }
                _ => self.dispatch_fetch(&mut handle, current),
            }
            previous = Some(current);
        }

        handle
    }

    fn dispatch_fetch(&self, handle: &mut ReplayHandle, entry: &LogEntry) {
        let url = entry.url().to_string();
        let fut = self.proxy.fetch(Link::get(url.clone()), None, entry.sub_type());
        tracing::debug!(target: "kroviz.replay", url = %url, "fetch");

        handle.record(ReplayStep::Fetch {
            url: url.clone(),
            sub_type: entry.sub_type().to_string(),
        });
        handle.track(TaskKind::Fetch, spawn_logged(url, fut));
    }

    fn schedule_load(&self, handle: &mut ReplayHandle, previous: &LogEntry, entry: &LogEntry) {
        let url = entry.url().to_string();
        let obj = match &entry.obj {
            EntryObject::Domain(obj) => obj.clone(),
            other => {
                tracing::warn!(
                    target: "kroviz.replay",
                    url = %url,
                    obj = other.kind(),
                    "user action carries no domain object, skipped"
                );
                handle.record(ReplayStep::Skipped {
                    url,
                    reason: format!("user action carries {} object", other.kind()),
                });
                return;
            }
        };

        let delay = replay_delay(previous, entry);
        tracing::debug!(
            target: "kroviz.replay",
            url = %url,
            delay_ms = delay.as_millis() as u64,
            "load scheduled"
        );
        handle.record(ReplayStep::Load {
            url: url.clone(),
            title: entry.title.clone(),
            delay_ms: delay.as_millis() as u64,
        });

        let proxy = self.proxy.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let res = proxy.load(obj).await;
            if let Err(ref e) = res {
                tracing::warn!(target: "kroviz.replay", url = %url, error = %e, "replayed load failed");
            }
            res
        });
        handle.track(TaskKind::Load, task);
    }
}

fn spawn_logged(
    url: String,
    fut: ProxyFuture,
) -> tokio::task::JoinHandle<Result<(), crate::error::ProxyError>> {
    tokio::spawn(async move {
        let res = fut.await;
        if let Err(ref e) = res {
            tracing::warn!(target: "kroviz.replay", url = %url, error = %e, "replayed fetch failed");
        }
        res
    })
}
