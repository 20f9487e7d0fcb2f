use std::sync::Arc;

use kroviz_core::session::{Session, UiShell};

/// UI shell for terminal use: there is nothing to draw, so a rebuild only
/// advances the session generation.
#[derive(Debug, Default)]
pub struct HeadlessShell;

impl UiShell for HeadlessShell {
    fn rebuild(&self, session: &Arc<Session>) {
        let generation = session.next_generation();
        tracing::info!(
            target: "kroviz.replay",
            session = %session.id(),
            generation,
            "ui rebuilt, session kept"
        );
    }
}
