//! Incident entity - a record of below-threshold performance.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ExecutionId, IncidentId, IncidentSeverity, IncidentStatus, Timestamp,
};

/// An automatically generated record flagging an execution whose score fell
/// below its configured threshold.
///
/// Created only by the incident generator, never edited by callers; at most
/// one per execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    id: IncidentId,
    execution_id: ExecutionId,
    severity: IncidentSeverity,
    status: IncidentStatus,

    /// The score that triggered the incident.
    performance_score: f64,

    /// The threshold it fell below.
    threshold_score: f64,

    /// Category keys that individually scored below the threshold.
    failed_categories: Vec<String>,

    auto_generated: bool,
    created_at: Timestamp,
}

impl Incident {
    /// Create a new open, auto-generated incident.
    pub fn new(
        id: IncidentId,
        execution_id: ExecutionId,
        severity: IncidentSeverity,
        performance_score: f64,
        threshold_score: f64,
        failed_categories: Vec<String>,
    ) -> Self {
        Self {
            id,
            execution_id,
            severity,
            status: IncidentStatus::Open,
            performance_score,
            threshold_score,
            failed_categories,
            auto_generated: true,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitute an incident from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: IncidentId,
        execution_id: ExecutionId,
        severity: IncidentSeverity,
        status: IncidentStatus,
        performance_score: f64,
        threshold_score: f64,
        failed_categories: Vec<String>,
        auto_generated: bool,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            execution_id,
            severity,
            status,
            performance_score,
            threshold_score,
            failed_categories,
            auto_generated,
            created_at,
        }
    }

    pub fn id(&self) -> &IncidentId {
        &self.id
    }

    pub fn execution_id(&self) -> &ExecutionId {
        &self.execution_id
    }

    pub fn severity(&self) -> IncidentSeverity {
        self.severity
    }

    pub fn status(&self) -> IncidentStatus {
        self.status
    }

    pub fn performance_score(&self) -> f64 {
        self.performance_score
    }

    pub fn threshold_score(&self) -> f64 {
        self.threshold_score
    }

    pub fn failed_categories(&self) -> &[String] {
        &self.failed_categories
    }

    pub fn auto_generated(&self) -> bool {
        self.auto_generated
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
