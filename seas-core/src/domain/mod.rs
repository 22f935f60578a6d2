//! Core domain types
//!
//! These types describe batch jobs the way the job directory reports them.
//! The client never mutates them directly; it only replaces its copy on each
//! successful poll.

pub mod job;
