//! Captured interactions: the log entry model and the process-wide event log store.

pub mod entry;
pub mod object;
pub mod represention;
pub mod store;

pub use entry::{EntryObject, EventState, LogEntry, ResourceSpecification};
pub use object::{Link, TObject};
pub use represention::Represention;
pub use store::EventStore;
