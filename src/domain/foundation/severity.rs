//! Incident severity and lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How far below threshold an execution landed.
///
/// Classified from `deficit = threshold - score`. Boundary values land in
/// the higher tier (a deficit of exactly 30 is Critical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IncidentSeverity {
    /// Classifies severity from the threshold deficit.
    pub fn from_deficit(deficit: f64) -> Self {
        if deficit >= 30.0 {
            IncidentSeverity::Critical
        } else if deficit >= 20.0 {
            IncidentSeverity::High
        } else if deficit >= 10.0 {
            IncidentSeverity::Medium
        } else {
            IncidentSeverity::Low
        }
    }
}

impl fmt::Display for IncidentSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IncidentSeverity::Low => "Low",
            IncidentSeverity::Medium => "Medium",
            IncidentSeverity::High => "High",
            IncidentSeverity::Critical => "Critical",
        };
        write!(f, "{}", s)
    }
}

/// Lifecycle status of an incident. Auto-generated incidents open as `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    #[default]
    Open,
    Acknowledged,
    Resolved,
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IncidentStatus::Open => "Open",
            IncidentStatus::Acknowledged => "Acknowledged",
            IncidentStatus::Resolved => "Resolved",
        };
        write!(f, "{}", s)
    }
}
