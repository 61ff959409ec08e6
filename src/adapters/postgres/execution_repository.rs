//! PostgreSQL implementation of ExecutionRepository.
//!
//! Single-row writes only; the engine accepts at-least-once semantics
//! between answer writes, the execution update, and the incident write.

use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::execution::{Answer, Execution, ExecutionTarget};
use crate::domain::foundation::{
    AnswerId, ApprovalStatus, ApprovalValue, DomainError, ErrorCode, ExecutionId,
    ExecutionStatus, GroupId, IncidentId, IncidentSeverity, IncidentStatus, QuestionId,
    TargetType, TemplateId, Timestamp, UserId,
};
use crate::domain::incident::Incident;
use crate::ports::ExecutionRepository;

/// PostgreSQL implementation of ExecutionRepository.
#[derive(Clone)]
pub struct PostgresExecutionRepository {
    pool: PgPool,
}

impl PostgresExecutionRepository {
    /// Creates a new PostgresExecutionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_answers(&self, id: &ExecutionId) -> Result<Vec<Answer>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, execution_id, question_id, approval_status, approval_value,
                   answer_score, max_score, is_skipped, answered_at
            FROM execution_answers
            WHERE execution_id = $1
            ORDER BY answered_at, id
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch answers: {}", e)))?;

        rows.into_iter().map(row_to_answer).collect()
    }

    async fn fetch_incident(&self, id: &ExecutionId) -> Result<Option<Incident>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, execution_id, severity, status, performance_score,
                   threshold_score, failed_categories, auto_generated, created_at
            FROM incidents
            WHERE execution_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch incident: {}", e)))?;

        row.map(row_to_incident).transpose()
    }

    async fn hydrate(&self, row: PgRow) -> Result<Execution, DomainError> {
        let id = ExecutionId::from_uuid(column(&row, "id")?);
        let answers = self.fetch_answers(&id).await?;
        let incident = self.fetch_incident(&id).await?;
        row_to_execution(row, answers, incident)
    }
}

#[async_trait]
impl ExecutionRepository for PostgresExecutionRepository {
    async fn create(&self, execution: &Execution) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO executions (
                id, template_id, group_id, executor_user_id, target_type, target_id,
                status, total_score, max_possible_score, percentage_score,
                category_scores, group_score, template_scores, notes,
                executed_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(execution.id().as_uuid())
        .bind(execution.target().template_id().map(|id| *id.as_uuid()))
        .bind(execution.target().group_id().map(|id| *id.as_uuid()))
        .bind(execution.executor_user_id().as_str())
        .bind(execution.target_type().as_str())
        .bind(execution.target_id())
        .bind(execution_status_to_str(execution.status()))
        .bind(execution.total_score())
        .bind(execution.max_possible_score())
        .bind(execution.percentage_score())
        .bind(Json(execution.category_scores()))
        .bind(execution.group_score())
        .bind(execution.template_scores().map(Json))
        .bind(execution.notes())
        .bind(execution.executed_at().as_datetime())
        .bind(execution.created_at().as_datetime())
        .bind(execution.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert execution: {}", e)))?;

        Ok(())
    }

    async fn save_answers(&self, answers: &[Answer]) -> Result<(), DomainError> {
        for answer in answers {
            sqlx::query(
                r#"
                INSERT INTO execution_answers (
                    id, execution_id, question_id, approval_status, approval_value,
                    answer_score, max_score, is_skipped, answered_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(answer.id().as_uuid())
            .bind(answer.execution_id().as_uuid())
            .bind(answer.question_id().as_uuid())
            .bind(approval_status_to_str(answer.approval_status()))
            .bind(answer.approval_value().value())
            .bind(answer.answer_score())
            .bind(answer.max_score())
            .bind(answer.is_skipped())
            .bind(answer.answered_at().as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to insert answer: {}", e)))?;
        }

        Ok(())
    }

    async fn update(&self, execution: &Execution) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE executions SET
                status = $2,
                total_score = $3,
                max_possible_score = $4,
                percentage_score = $5,
                category_scores = $6,
                group_score = $7,
                template_scores = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(execution.id().as_uuid())
        .bind(execution_status_to_str(execution.status()))
        .bind(execution.total_score())
        .bind(execution.max_possible_score())
        .bind(execution.percentage_score())
        .bind(Json(execution.category_scores()))
        .bind(execution.group_score())
        .bind(execution.template_scores().map(Json))
        .bind(execution.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update execution: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ExecutionNotFound,
                format!("Execution not found: {}", execution.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &ExecutionId) -> Result<Option<Execution>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, template_id, group_id, executor_user_id, target_type, target_id,
                   status, total_score, max_possible_score, percentage_score,
                   category_scores, group_score, template_scores, notes,
                   executed_at, created_at, updated_at
            FROM executions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch execution: {}", e)))?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_executor(&self, user_id: &UserId) -> Result<Vec<Execution>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, template_id, group_id, executor_user_id, target_type, target_id,
                   status, total_score, max_possible_score, percentage_score,
                   category_scores, group_score, template_scores, notes,
                   executed_at, created_at, updated_at
            FROM executions
            WHERE executor_user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to fetch executions by executor: {}", e))
        })?;

        let mut executions = Vec::with_capacity(rows.len());
        for row in rows {
            executions.push(self.hydrate(row).await?);
        }
        Ok(executions)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

fn execution_status_to_str(status: ExecutionStatus) -> &'static str {
    match status {
        ExecutionStatus::Pending => "pending",
        ExecutionStatus::InProgress => "in_progress",
        ExecutionStatus::Completed => "completed",
        ExecutionStatus::LowPerformance => "low_performance",
    }
}

fn str_to_execution_status(s: &str) -> Result<ExecutionStatus, DomainError> {
    match s {
        "pending" => Ok(ExecutionStatus::Pending),
        "in_progress" => Ok(ExecutionStatus::InProgress),
        "completed" => Ok(ExecutionStatus::Completed),
        "low_performance" => Ok(ExecutionStatus::LowPerformance),
        _ => Err(DomainError::database(format!("Invalid execution status: {}", s))),
    }
}

fn approval_status_to_str(status: ApprovalStatus) -> &'static str {
    match status {
        ApprovalStatus::Approved => "approved",
        ApprovalStatus::NotApproved => "not_approved",
        ApprovalStatus::Intermediate => "intermediate",
    }
}

fn str_to_approval_status(s: &str) -> Result<ApprovalStatus, DomainError> {
    match s {
        "approved" => Ok(ApprovalStatus::Approved),
        "not_approved" => Ok(ApprovalStatus::NotApproved),
        "intermediate" => Ok(ApprovalStatus::Intermediate),
        _ => Err(DomainError::database(format!("Invalid approval status: {}", s))),
    }
}

fn str_to_severity(s: &str) -> Result<IncidentSeverity, DomainError> {
    match s {
        "low" => Ok(IncidentSeverity::Low),
        "medium" => Ok(IncidentSeverity::Medium),
        "high" => Ok(IncidentSeverity::High),
        "critical" => Ok(IncidentSeverity::Critical),
        _ => Err(DomainError::database(format!("Invalid severity: {}", s))),
    }
}

fn str_to_incident_status(s: &str) -> Result<IncidentStatus, DomainError> {
    match s {
        "open" => Ok(IncidentStatus::Open),
        "acknowledged" => Ok(IncidentStatus::Acknowledged),
        "resolved" => Ok(IncidentStatus::Resolved),
        _ => Err(DomainError::database(format!("Invalid incident status: {}", s))),
    }
}

fn row_to_answer(row: PgRow) -> Result<Answer, DomainError> {
    let approval_value: f64 = column(&row, "approval_value")?;
    let status_str: String = column(&row, "approval_status")?;
    Ok(Answer::reconstitute(
        AnswerId::from_uuid(column(&row, "id")?),
        ExecutionId::from_uuid(column(&row, "execution_id")?),
        QuestionId::from_uuid(column(&row, "question_id")?),
        str_to_approval_status(&status_str)?,
        ApprovalValue::try_new(approval_value).map_err(|_| {
            DomainError::database(format!("Invalid approval value in store: {}", approval_value))
        })?,
        column(&row, "answer_score")?,
        column(&row, "max_score")?,
        column(&row, "is_skipped")?,
        Timestamp::from_datetime(column(&row, "answered_at")?),
    ))
}

fn row_to_incident(row: PgRow) -> Result<Incident, DomainError> {
    let severity_str: String = column(&row, "severity")?;
    let status_str: String = column(&row, "status")?;
    let Json(failed_categories): Json<Vec<String>> = column(&row, "failed_categories")?;
    Ok(Incident::reconstitute(
        IncidentId::from_uuid(column(&row, "id")?),
        ExecutionId::from_uuid(column(&row, "execution_id")?),
        str_to_severity(&severity_str)?,
        str_to_incident_status(&status_str)?,
        column(&row, "performance_score")?,
        column(&row, "threshold_score")?,
        failed_categories,
        column(&row, "auto_generated")?,
        Timestamp::from_datetime(column(&row, "created_at")?),
    ))
}

fn row_to_execution(
    row: PgRow,
    answers: Vec<Answer>,
    incident: Option<Incident>,
) -> Result<Execution, DomainError> {
    let template_id: Option<Uuid> = column(&row, "template_id")?;
    let group_id: Option<Uuid> = column(&row, "group_id")?;
    let target = match (template_id, group_id) {
        (Some(id), None) => ExecutionTarget::Template(TemplateId::from_uuid(id)),
        (None, Some(id)) => ExecutionTarget::Group(GroupId::from_uuid(id)),
        _ => {
            return Err(DomainError::database(
                "Execution row must reference exactly one of template or group",
            ))
        }
    };

    let executor: String = column(&row, "executor_user_id")?;
    let target_type: String = column(&row, "target_type")?;
    let status_str: String = column(&row, "status")?;
    let Json(category_scores): Json<BTreeMap<String, f64>> = column(&row, "category_scores")?;
    let template_scores: Option<Json<BTreeMap<String, f64>>> = column(&row, "template_scores")?;

    Ok(Execution::reconstitute(
        ExecutionId::from_uuid(column(&row, "id")?),
        target,
        UserId::new(executor).map_err(DomainError::from)?,
        TargetType::new(target_type).map_err(DomainError::from)?,
        column(&row, "target_id")?,
        str_to_execution_status(&status_str)?,
        column(&row, "total_score")?,
        column(&row, "max_possible_score")?,
        column(&row, "percentage_score")?,
        category_scores,
        column(&row, "group_score")?,
        template_scores.map(|Json(scores)| scores),
        answers,
        incident,
        column(&row, "notes")?,
        Timestamp::from_datetime(column(&row, "executed_at")?),
        Timestamp::from_datetime(column(&row, "created_at")?),
        Timestamp::from_datetime(column(&row, "updated_at")?),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_status_round_trips() {
        for status in [
            ExecutionStatus::Pending,
            ExecutionStatus::InProgress,
            ExecutionStatus::Completed,
            ExecutionStatus::LowPerformance,
        ] {
            let s = execution_status_to_str(status);
            assert_eq!(str_to_execution_status(s).unwrap(), status);
        }
    }

    #[test]
    fn approval_status_round_trips() {
        for status in [
            ApprovalStatus::Approved,
            ApprovalStatus::NotApproved,
            ApprovalStatus::Intermediate,
        ] {
            let s = approval_status_to_str(status);
            assert_eq!(str_to_approval_status(s).unwrap(), status);
        }
    }

    #[test]
    fn severity_strings_parse() {
        assert_eq!(str_to_severity("low").unwrap(), IncidentSeverity::Low);
        assert_eq!(str_to_severity("critical").unwrap(), IncidentSeverity::Critical);
    }

    #[test]
    fn unknown_status_strings_are_rejected() {
        assert!(str_to_execution_status("archived").is_err());
        assert!(str_to_approval_status("maybe").is_err());
        assert!(str_to_severity("catastrophic").is_err());
        assert!(str_to_incident_status("closed").is_err());
    }
}
