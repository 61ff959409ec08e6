//! ExecutionTarget - what an execution is scored against.
//!
//! Exactly one of template/group is set per execution. The decision is made
//! once at the orchestrator boundary; the rest of the pipeline matches on
//! the sum type instead of re-checking optional fields.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{GroupId, TemplateId};

use super::ExecutionError;

/// The checklist definition an execution runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionTarget {
    Template(TemplateId),
    Group(GroupId),
}

impl ExecutionTarget {
    /// Resolve the target from the optional request fields.
    ///
    /// # Errors
    ///
    /// - `InvalidTarget` if both or neither id is present
    pub fn resolve(
        template_id: Option<TemplateId>,
        group_id: Option<GroupId>,
    ) -> Result<Self, ExecutionError> {
        match (template_id, group_id) {
            (Some(template_id), None) => Ok(ExecutionTarget::Template(template_id)),
            (None, Some(group_id)) => Ok(ExecutionTarget::Group(group_id)),
            (Some(_), Some(_)) => Err(ExecutionError::invalid_target(
                "Exactly one of template_id or group_id must be set, got both",
            )),
            (None, None) => Err(ExecutionError::invalid_target(
                "Exactly one of template_id or group_id must be set, got neither",
            )),
        }
    }

    pub fn template_id(&self) -> Option<&TemplateId> {
        match self {
            ExecutionTarget::Template(id) => Some(id),
            ExecutionTarget::Group(_) => None,
        }
    }

    pub fn group_id(&self) -> Option<&GroupId> {
        match self {
            ExecutionTarget::Template(_) => None,
            ExecutionTarget::Group(id) => Some(id),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, ExecutionTarget::Group(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_accepts_template_only() {
        let id = TemplateId::new();
        let target = ExecutionTarget::resolve(Some(id), None).unwrap();
        assert_eq!(target, ExecutionTarget::Template(id));
        assert!(!target.is_group());
    }

    #[test]
    fn resolve_accepts_group_only() {
        let id = GroupId::new();
        let target = ExecutionTarget::resolve(None, Some(id)).unwrap();
        assert_eq!(target.group_id(), Some(&id));
        assert!(target.is_group());
    }

    #[test]
    fn resolve_rejects_both() {
        let result = ExecutionTarget::resolve(Some(TemplateId::new()), Some(GroupId::new()));
        assert!(matches!(result, Err(ExecutionError::InvalidTarget(_))));
    }

    #[test]
    fn resolve_rejects_neither() {
        let result = ExecutionTarget::resolve(None, None);
        assert!(matches!(result, Err(ExecutionError::InvalidTarget(_))));
    }
}
