//! Data Transfer Objects for talking to the job directory
//!
//! Response bodies are lenient: optional fields default to absent so a
//! sparse reply such as `{}` still decodes.

pub mod job;
