//! Command and query handlers, grouped by area.

pub mod execution;
