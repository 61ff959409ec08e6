//! HTTP DTOs for execution endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::execution::{Answer, Execution, SubmittedAnswer};
use crate::domain::foundation::{
    ApprovalStatus, ExecutionStatus, GroupId, IncidentSeverity, IncidentStatus, QuestionId,
    TemplateId,
};
use crate::domain::incident::Incident;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One submitted answer.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedAnswerRequest {
    pub question_id: QuestionId,
    pub approval_status: ApprovalStatus,
    pub approval_value: f64,
    #[serde(default)]
    pub is_skipped: bool,
}

impl From<SubmittedAnswerRequest> for SubmittedAnswer {
    fn from(req: SubmittedAnswerRequest) -> Self {
        SubmittedAnswer {
            question_id: req.question_id,
            approval_status: req.approval_status,
            approval_value: req.approval_value,
            is_skipped: req.is_skipped,
        }
    }
}

/// Request to execute a checklist against a target.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteChecklistRequest {
    #[serde(default)]
    pub template_id: Option<TemplateId>,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    pub executor_user_id: String,
    pub target_type: String,
    pub target_id: String,
    #[serde(default)]
    pub executed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    pub answers: Vec<SubmittedAnswerRequest>,
}

/// Query parameters for listing executions.
#[derive(Debug, Clone, Deserialize)]
pub struct ListExecutionsParams {
    pub executor_user_id: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One scored answer in an execution view.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub id: String,
    pub question_id: String,
    pub approval_status: ApprovalStatus,
    pub approval_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    pub is_skipped: bool,
    pub answered_at: String,
}

impl From<&Answer> for AnswerResponse {
    fn from(answer: &Answer) -> Self {
        Self {
            id: answer.id().to_string(),
            question_id: answer.question_id().to_string(),
            approval_status: answer.approval_status(),
            approval_value: answer.approval_value().value(),
            answer_score: answer.answer_score(),
            max_score: answer.max_score(),
            is_skipped: answer.is_skipped(),
            answered_at: answer.answered_at().as_datetime().to_rfc3339(),
        }
    }
}

/// An incident attached to an execution view.
#[derive(Debug, Clone, Serialize)]
pub struct IncidentResponse {
    pub id: String,
    pub execution_id: String,
    pub severity: IncidentSeverity,
    pub status: IncidentStatus,
    pub performance_score: f64,
    pub threshold_score: f64,
    pub failed_categories: Vec<String>,
    pub auto_generated: bool,
    pub created_at: String,
}

impl From<&Incident> for IncidentResponse {
    fn from(incident: &Incident) -> Self {
        Self {
            id: incident.id().to_string(),
            execution_id: incident.execution_id().to_string(),
            severity: incident.severity(),
            status: incident.status(),
            performance_score: incident.performance_score(),
            threshold_score: incident.threshold_score(),
            failed_categories: incident.failed_categories().to_vec(),
            auto_generated: incident.auto_generated(),
            created_at: incident.created_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Full execution view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub executor_user_id: String,
    pub target_type: String,
    pub target_id: String,
    pub status: ExecutionStatus,
    pub total_score: f64,
    pub max_possible_score: f64,
    pub percentage_score: f64,
    pub category_scores: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_scores: Option<BTreeMap<String, f64>>,
    pub answers: Vec<AnswerResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident: Option<IncidentResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub executed_at: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Execution> for ExecutionResponse {
    fn from(execution: &Execution) -> Self {
        Self {
            id: execution.id().to_string(),
            template_id: execution.target().template_id().map(|id| id.to_string()),
            group_id: execution.target().group_id().map(|id| id.to_string()),
            executor_user_id: execution.executor_user_id().to_string(),
            target_type: execution.target_type().to_string(),
            target_id: execution.target_id().to_string(),
            status: execution.status(),
            total_score: execution.total_score(),
            max_possible_score: execution.max_possible_score(),
            percentage_score: execution.percentage_score(),
            category_scores: execution.category_scores().clone(),
            group_score: execution.group_score(),
            template_scores: execution.template_scores().cloned(),
            answers: execution.answers().iter().map(Into::into).collect(),
            incident: execution.incident().map(Into::into),
            notes: execution.notes().map(str::to_string),
            executed_at: execution.executed_at().as_datetime().to_rfc3339(),
            created_at: execution.created_at().as_datetime().to_rfc3339(),
            updated_at: execution.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// List of executions for one executor.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionListResponse {
    pub items: Vec<ExecutionResponse>,
    pub total: usize,
}

/// Standard error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::execution::ExecutionTarget;
    use crate::domain::foundation::{ExecutionId, TargetType, Timestamp, UserId};

    #[test]
    fn execute_request_deserializes_with_template() {
        let template_id = TemplateId::new();
        let question_id = QuestionId::new();
        let json = format!(
            r#"{{
                "template_id": "{}",
                "executor_user_id": "inspector-1",
                "target_type": "vehicle",
                "target_id": "truck-42",
                "answers": [
                    {{"question_id": "{}", "approval_status": "approved", "approval_value": 1.0}}
                ]
            }}"#,
            template_id, question_id
        );
        let req: ExecuteChecklistRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req.template_id, Some(template_id));
        assert!(req.group_id.is_none());
        assert_eq!(req.answers.len(), 1);
        assert!(!req.answers[0].is_skipped);
    }

    #[test]
    fn execute_request_rejects_malformed_ids() {
        let json = r#"{
            "template_id": "not-a-uuid",
            "executor_user_id": "inspector-1",
            "target_type": "vehicle",
            "target_id": "truck-42",
            "answers": []
        }"#;
        assert!(serde_json::from_str::<ExecuteChecklistRequest>(json).is_err());
    }

    #[test]
    fn execution_response_carries_target_and_status() {
        let execution = Execution::new(
            ExecutionId::new(),
            ExecutionTarget::Template(TemplateId::new()),
            UserId::new("inspector-1").unwrap(),
            TargetType::new("vehicle").unwrap(),
            "truck-42".to_string(),
            Timestamp::now(),
            Some("routine check".to_string()),
        );

        let response = ExecutionResponse::from(&execution);

        assert!(response.template_id.is_some());
        assert!(response.group_id.is_none());
        assert_eq!(response.status, ExecutionStatus::Pending);
        assert_eq!(response.notes.as_deref(), Some("routine check"));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "pending");
        // Absent optionals are omitted entirely.
        assert!(json.get("group_id").is_none());
        assert!(json.get("incident").is_none());
    }

    #[test]
    fn error_response_serializes_code_and_message() {
        let err = ErrorResponse::new("UNKNOWN_QUESTION", "Answer references unknown question");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "UNKNOWN_QUESTION");
        assert!(json.get("details").is_none());
    }
}
