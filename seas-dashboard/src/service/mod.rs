//! Service layer
//!
//! Services run the operator's one-shot actions against the job directory
//! and fold their results back into the dashboard state.
//!
//! The operator is reached through the [`Interaction`] trait so actions can
//! be driven without a terminal.

mod coordinator;
mod interaction;

pub use coordinator::ActionCoordinator;
pub use interaction::Interaction;
