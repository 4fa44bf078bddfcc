//! Execution engine.
//!
//! Runtime capability detection and tier selection.

pub mod dispatcher;

pub use dispatcher::active_tier_name;
