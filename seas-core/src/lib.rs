//! Seas Core
//!
//! Core types shared by the Seas job dashboard crates.
//!
//! This crate contains:
//! - Domain types: the job record as known to the client and the lifecycle gate
//! - DTOs: request and response bodies exchanged with the job directory

pub mod domain;
pub mod dto;
