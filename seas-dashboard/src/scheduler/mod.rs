//! Scheduler layer for the dashboard
//!
//! This layer keeps the job snapshot fresh by polling the directory on a
//! fixed interval, independently of anything the operator does.

pub mod poller;

pub use poller::{Poller, refresh_snapshot};
