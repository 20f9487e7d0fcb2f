use serde::Serialize;
use tokio::task::{AbortHandle, JoinHandle};

use crate::error::ProxyError;

/// What the replay walk decided for one filtered entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ReplayStep {
    Fetch { url: String, sub_type: String },
    Load { url: String, title: String, delay_ms: u64 },
    Skipped { url: String, reason: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub fetched: usize,
    pub loaded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub cancelled: usize,
}

impl ReplaySummary {
    pub fn total(&self) -> usize {
        self.fetched + self.loaded + self.skipped + self.failed + self.cancelled
    }
}

#[derive(Clone)]
pub struct ReplayCanceller {
    tasks: Vec<AbortHandle>,
}

impl ReplayCanceller {
    pub fn cancel(&self) {
        let mut aborted = 0usize;
        for task in &self.tasks {
            if !task.is_finished() {
                task.abort();
                aborted += 1;
            }
        }
        tracing::info!(target: "kroviz.replay", aborted, "replay cancelled");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TaskKind {
    Fetch,
    Load,
}

/// Tasks spawned by one replay run.
///
/// Dropping the handle leaves the tasks running; use [`ReplayHandle::cancel`]
/// to abort them.
#[derive(Default)]
pub struct ReplayHandle {
    steps: Vec<ReplayStep>,
    tasks: Vec<(TaskKind, JoinHandle<Result<(), ProxyError>>)>,
}

impl ReplayHandle {
    pub(crate) fn record(&mut self, step: ReplayStep) {
        self.steps.push(step);
    }

    pub(crate) fn track(&mut self, kind: TaskKind, task: JoinHandle<Result<(), ProxyError>>) {
        self.tasks.push((kind, task));
    }

    pub fn scheduled(&self) -> &[ReplayStep] {
        &self.steps
    }

    /// Tasks that have not finished yet.
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|(_, t)| !t.is_finished()).count()
    }

    /// Abort every task that has not finished.
    pub fn cancel(&self) {
        self.canceller().cancel();
    }

    /// Detached cancellation handle, usable while [`ReplayHandle::join`] is
    /// awaited elsewhere.
    pub fn canceller(&self) -> ReplayCanceller {
        ReplayCanceller {
            tasks: self.tasks.iter().map(|(_, t)| t.abort_handle()).collect(),
        }
    }

    /// Wait for every task and tally the outcome.
    pub async fn join(self) -> ReplaySummary {
        let mut summary = ReplaySummary {
            skipped: self
                .steps
                .iter()
                .filter(|s| matches!(s, ReplayStep::Skipped { .. }))
                .count(),
            ..Default::default()
        };

        for (kind, task) in self.tasks {
            match task.await {
                Ok(Ok(())) => match kind {
                    TaskKind::Fetch => summary.fetched += 1,
                    TaskKind::Load => summary.loaded += 1,
                },
                Ok(Err(_)) => summary.failed += 1,
                Err(e) if e.is_cancelled() => summary.cancelled += 1,
                Err(e) => {
                    tracing::error!(target: "kroviz.replay", error = %e, "replay task panicked");
                    summary.failed += 1;
                }
            }
        }

        summary
    }
}
