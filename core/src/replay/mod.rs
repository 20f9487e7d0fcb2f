//! Replay of a captured session: filter the log, pace the entries by their
//! original spacing and re-issue them through the resource proxy.

pub mod delay;
pub mod filter;
pub mod handle;
pub mod report;
pub mod scheduler;

pub use delay::{calculate_delay, replay_delay};
pub use filter::{filter_replay_events, is_replayable};
pub use handle::{ReplayCanceller, ReplayHandle, ReplayStep, ReplaySummary};
pub use report::{build_log_report, build_replay_report, format_log_text, format_replay_text};
pub use scheduler::{copy_events, ReplayCommand};
