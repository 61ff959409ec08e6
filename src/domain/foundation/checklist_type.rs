//! ChecklistType enum for template classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of evaluation a template describes.
///
/// Compliance checklists are the ones that feed incident generation;
/// group executions are always treated as compliance evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistType {
    Inspection,
    Compliance,
    Audit,
}

impl ChecklistType {
    /// Returns true if executions of this type are incident-eligible.
    pub fn is_compliance(&self) -> bool {
        matches!(self, ChecklistType::Compliance)
    }
}

impl fmt::Display for ChecklistType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChecklistType::Inspection => "Inspection",
            ChecklistType::Compliance => "Compliance",
            ChecklistType::Audit => "Audit",
        };
        write!(f, "{}", s)
    }
}
