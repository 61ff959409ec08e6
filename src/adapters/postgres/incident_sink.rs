//! PostgreSQL implementation of IncidentSink.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, IncidentSeverity, IncidentStatus};
use crate::domain::incident::Incident;
use crate::ports::IncidentSink;

/// PostgreSQL implementation of IncidentSink.
///
/// A unique index on `execution_id` backs the at-most-one-per-execution
/// invariant at the storage level.
#[derive(Clone)]
pub struct PostgresIncidentSink {
    pool: PgPool,
}

impl PostgresIncidentSink {
    /// Creates a new PostgresIncidentSink.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IncidentSink for PostgresIncidentSink {
    async fn save(&self, incident: &Incident) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO incidents (
                id, execution_id, severity, status, performance_score,
                threshold_score, failed_categories, auto_generated, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(incident.id().as_uuid())
        .bind(incident.execution_id().as_uuid())
        .bind(severity_to_str(incident.severity()))
        .bind(incident_status_to_str(incident.status()))
        .bind(incident.performance_score())
        .bind(incident.threshold_score())
        .bind(Json(incident.failed_categories()))
        .bind(incident.auto_generated())
        .bind(incident.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert incident: {}", e)))?;

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn severity_to_str(severity: IncidentSeverity) -> &'static str {
    match severity {
        IncidentSeverity::Low => "low",
        IncidentSeverity::Medium => "medium",
        IncidentSeverity::High => "high",
        IncidentSeverity::Critical => "critical",
    }
}

fn incident_status_to_str(status: IncidentStatus) -> &'static str {
    match status {
        IncidentStatus::Open => "open",
        IncidentStatus::Acknowledged => "acknowledged",
        IncidentStatus::Resolved => "resolved",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_maps_to_lowercase_strings() {
        assert_eq!(severity_to_str(IncidentSeverity::Low), "low");
        assert_eq!(severity_to_str(IncidentSeverity::Medium), "medium");
        assert_eq!(severity_to_str(IncidentSeverity::High), "high");
        assert_eq!(severity_to_str(IncidentSeverity::Critical), "critical");
    }

    #[test]
    fn incident_status_maps_to_lowercase_strings() {
        assert_eq!(incident_status_to_str(IncidentStatus::Open), "open");
        assert_eq!(
            incident_status_to_str(IncidentStatus::Acknowledged),
            "acknowledged"
        );
        assert_eq!(incident_status_to_str(IncidentStatus::Resolved), "resolved");
    }
}
