use crate::event::LogEntry;

/// Whether `entry` is worth re-issuing on replay.
pub fn is_replayable(entry: &LogEntry) -> bool {
    entry.has_relevant_type() || entry.is_user_action()
}

/// Keep relevant-type and user-action entries, in their original order.
pub fn filter_replay_events(events: Vec<LogEntry>) -> Vec<LogEntry> {
    events.into_iter().filter(is_replayable).collect()
}
