//! Status Transition Module
//!
//! Data-driven status flows per entity type plus the engine that applies
//! transitions: status update first (the only step that must succeed),
//! then best-effort event logging and email notification.

mod engine;
mod flow;

pub use engine::{BulkTransitionReport, StatusEngine, TransitionError};
pub use flow::{StatusDef, StatusFlow, StatusFlows};
