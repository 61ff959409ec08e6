//! Incident module - automatic low-performance flagging.

mod generator;
mod incident;

pub use generator::{evaluate, IncidentInput};
pub use incident::Incident;
