//! Core of the kroviz client: the captured event log and its replay.

pub mod capture;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod proxy;
pub mod replay;
pub mod session;
