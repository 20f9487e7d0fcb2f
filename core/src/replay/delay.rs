use std::time::Duration;

use crate::event::LogEntry;

/// Milliseconds between the creation of `previous` and `current`.
///
/// Negative when the log is out of chronological order.
pub fn calculate_delay(previous: &LogEntry, current: &LogEntry) -> i64 {
    (current.created_at() - previous.created_at()).num_milliseconds()
}

/// Delay to sleep before replaying `current`; out-of-order pairs replay at once.
pub fn replay_delay(previous: &LogEntry, current: &LogEntry) -> Duration {
    let ms = calculate_delay(previous, current);
    if ms < 0 {
        tracing::warn!(
            target: "kroviz.replay",
            previous = %previous.url(),
            current = %current.url(),
            delay_ms = ms,
            "log entries out of order, replaying without delay"
        );
        return Duration::ZERO;
    }
    Duration::from_millis(ms as u64)
}
