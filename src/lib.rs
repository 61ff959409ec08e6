//! Fleetcheck - Checklist Execution & Scoring Engine
//!
//! This crate evaluates structured inspection and compliance checklists,
//! aggregates weighted scores across a category -> template -> group
//! hierarchy, and automatically raises incidents when performance falls
//! below configured thresholds.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
