use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use super::entry::{EntryObject, EventState, LogEntry, ResourceSpecification};
use super::object::TObject;
use super::represention::Represention;

/// Append-only, resettable log of captured interactions.
///
/// Cloning yields another handle onto the same log. The lock is never held
/// across an `.await`.
#[derive(Clone, Default)]
pub struct EventStore {
    inner: Arc<Mutex<Vec<LogEntry>>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        // Mutations are single pushes or field updates; a poisoned log is still whole.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Snapshot of the current log, oldest first.
    pub fn log(&self) -> Vec<LogEntry> {
        self.entries().clone()
    }

    pub fn reset(&self) {
        let mut g = self.entries();
        let dropped = g.len();
        g.clear();
        tracing::debug!(target: "kroviz.store", dropped, "event log reset");
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn push(&self, entry: LogEntry) {
        self.entries().push(entry);
    }

    /// Record the start of a request. Returns the index of the new entry.
    pub fn start(&self, rs: ResourceSpecification, method: &str, request: Option<String>) -> usize {
        let mut entry = LogEntry::new(rs, method, request, Utc::now());
        entry.state = EventState::Running;
        tracing::debug!(
            target: "kroviz.store",
            url = %entry.url(),
            method = %entry.method,
            "start"
        );
        let mut g = self.entries();
        g.push(entry);
        g.len() - 1
    }

    /// Resolve the entry `start` returned `index` for as successful.
    ///
    /// Returns false when that slot no longer holds a running entry for `rs`,
    /// e.g. after a reset.
    pub fn end(
        &self,
        index: usize,
        rs: &ResourceSpecification,
        response: Option<String>,
        repr_type: Option<Represention>,
        obj: EntryObject,
    ) -> bool {
        let mut g = self.entries();
        let Some(entry) = running_at(&mut g, index, rs) else {
            tracing::warn!(target: "kroviz.store", url = %rs.url, index, "end without matching start");
            return false;
        };
        entry.resolve(EventState::Success, response, repr_type, obj);
        tracing::debug!(
            target: "kroviz.store",
            url = %rs.url,
            repr_type = ?entry.repr_type,
            duration_ms = entry.duration_ms().unwrap_or_default(),
            "end"
        );
        true
    }

    /// Resolve the entry `start` returned `index` for as failed.
    pub fn fault(&self, index: usize, rs: &ResourceSpecification, message: String) -> bool {
        let mut g = self.entries();
        let Some(entry) = running_at(&mut g, index, rs) else {
            tracing::warn!(target: "kroviz.store", url = %rs.url, index, "fault without matching start");
            return false;
        };
        entry.resolve(EventState::Error, Some(message), None, EntryObject::Unresolved);
        true
    }

    /// Record that the user acted on `obj`, e.g. opened it from a list.
    pub fn add_user_action(&self, title: &str, obj: TObject, sub_type: &str) {
        let url = obj
            .self_link()
            .map(|l| l.href.clone())
            .unwrap_or_default();
        let mut entry = LogEntry::new(ResourceSpecification::new(url, sub_type), "GET", None, Utc::now());
        entry.title = title.to_string();
        entry.state = EventState::UserAction;
        entry.repr_type = Some(Represention::Object);
        entry.obj = EntryObject::Domain(obj);
        tracing::debug!(target: "kroviz.store", title = %entry.title, "user action");
        self.entries().push(entry);
    }

    /// Latest entry for `rs`, in any state.
    pub fn find(&self, rs: &ResourceSpecification) -> Option<LogEntry> {
        self.entries().iter().rev().find(|e| e.rs() == rs).cloned()
    }
}

fn running_at<'a>(
    entries: &'a mut [LogEntry],
    index: usize,
    rs: &ResourceSpecification,
) -> Option<&'a mut LogEntry> {
    entries
        .get_mut(index)
        .filter(|e| e.rs() == rs && e.state == EventState::Running)
}
