//! Execution aggregate - one concrete run of a template or group.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, ExecutionId, ExecutionStatus, StateMachine, TargetType, Timestamp,
    UserId,
};
use crate::domain::incident::Incident;

use super::{Answer, ExecutionTarget, GroupScoreSummary, ScoreSummary};

/// One concrete run of a template or group against a target.
///
/// # Invariants
///
/// - exactly one of template/group is referenced, fixed at creation
/// - scores are written once, while `InProgress`
/// - a sealed execution (`Completed`/`LowPerformance`) is never re-scored;
///   the only post-completion mutation is the incident transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    id: ExecutionId,
    target: ExecutionTarget,
    executor_user_id: UserId,
    target_type: TargetType,

    /// Identifier of the inspected entity (driver, vehicle, warehouse...).
    target_id: String,

    status: ExecutionStatus,
    total_score: f64,
    max_possible_score: f64,
    percentage_score: f64,

    /// Category percentages; group executions key these as
    /// `"{template_id}_{category_id}"`.
    category_scores: BTreeMap<String, f64>,

    /// Weighted average of template percentages (group executions only).
    group_score: Option<f64>,

    /// Per-template percentages (group executions only).
    template_scores: Option<BTreeMap<String, f64>>,

    answers: Vec<Answer>,
    incident: Option<Incident>,
    notes: Option<String>,
    executed_at: Timestamp,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Execution {
    /// Create a new pending execution with zeroed scores.
    pub fn new(
        id: ExecutionId,
        target: ExecutionTarget,
        executor_user_id: UserId,
        target_type: TargetType,
        target_id: String,
        executed_at: Timestamp,
        notes: Option<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            target,
            executor_user_id,
            target_type,
            target_id,
            status: ExecutionStatus::Pending,
            total_score: 0.0,
            max_possible_score: 0.0,
            percentage_score: 0.0,
            category_scores: BTreeMap::new(),
            group_score: None,
            template_scores: None,
            answers: Vec::new(),
            incident: None,
            notes,
            executed_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute an execution from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ExecutionId,
        target: ExecutionTarget,
        executor_user_id: UserId,
        target_type: TargetType,
        target_id: String,
        status: ExecutionStatus,
        total_score: f64,
        max_possible_score: f64,
        percentage_score: f64,
        category_scores: BTreeMap<String, f64>,
        group_score: Option<f64>,
        template_scores: Option<BTreeMap<String, f64>>,
        answers: Vec<Answer>,
        incident: Option<Incident>,
        notes: Option<String>,
        executed_at: Timestamp,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            target,
            executor_user_id,
            target_type,
            target_id,
            status,
            total_score,
            max_possible_score,
            percentage_score,
            category_scores,
            group_score,
            template_scores,
            answers,
            incident,
            notes,
            executed_at,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ExecutionId {
        &self.id
    }

    pub fn target(&self) -> &ExecutionTarget {
        &self.target
    }

    pub fn executor_user_id(&self) -> &UserId {
        &self.executor_user_id
    }

    pub fn target_type(&self) -> &TargetType {
        &self.target_type
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn status(&self) -> ExecutionStatus {
        self.status
    }

    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    pub fn max_possible_score(&self) -> f64 {
        self.max_possible_score
    }

    pub fn percentage_score(&self) -> f64 {
        self.percentage_score
    }

    pub fn category_scores(&self) -> &BTreeMap<String, f64> {
        &self.category_scores
    }

    pub fn group_score(&self) -> Option<f64> {
        self.group_score
    }

    pub fn template_scores(&self) -> Option<&BTreeMap<String, f64>> {
        self.template_scores.as_ref()
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn incident(&self) -> Option<&Incident> {
        self.incident.as_ref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn executed_at(&self) -> &Timestamp {
        &self.executed_at
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// The score incident evaluation compares against the threshold: the
    /// group score where present, otherwise the raw percentage.
    pub fn score_to_check(&self) -> f64 {
        self.group_score.unwrap_or(self.percentage_score)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations (orchestrator only)
    // ─────────────────────────────────────────────────────────────────────

    /// Advance from `Pending` to `InProgress`.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if not pending
    pub fn start(&mut self) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(ExecutionStatus::InProgress)
            .map_err(DomainError::from)?;
        self.touch();
        Ok(())
    }

    /// Record template scores while `InProgress`.
    ///
    /// # Errors
    ///
    /// - `ExecutionAlreadyCompleted` if the execution is sealed
    pub fn record_template_scores(&mut self, summary: ScoreSummary) -> Result<(), DomainError> {
        self.ensure_scorable()?;
        self.total_score = summary.total_score;
        self.max_possible_score = summary.max_possible_score;
        self.percentage_score = summary.percentage_score;
        self.category_scores = summary.category_scores;
        self.group_score = None;
        self.template_scores = None;
        self.touch();
        Ok(())
    }

    /// Record group scores while `InProgress`.
    ///
    /// # Errors
    ///
    /// - `ExecutionAlreadyCompleted` if the execution is sealed
    pub fn record_group_scores(&mut self, summary: GroupScoreSummary) -> Result<(), DomainError> {
        self.ensure_scorable()?;
        self.total_score = summary.total_score;
        self.max_possible_score = summary.max_possible_score;
        self.percentage_score = summary.percentage_score;
        self.category_scores = summary.category_scores;
        self.group_score = Some(summary.group_score);
        self.template_scores = Some(summary.template_scores);
        self.touch();
        Ok(())
    }

    /// Attach the scored answer records.
    pub fn attach_answers(&mut self, answers: Vec<Answer>) {
        self.answers = answers;
    }

    /// Seal the execution as `Completed`.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if not in progress
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(ExecutionStatus::Completed)
            .map_err(DomainError::from)?;
        self.touch();
        Ok(())
    }

    /// Flag the completed execution as low-performance, attaching its
    /// incident. The only post-completion mutation, applied immediately
    /// after the same scoring pass.
    ///
    /// # Errors
    ///
    /// - `IncidentAlreadyExists` if an incident is already attached
    /// - `InvalidStateTransition` if not completed
    pub fn flag_low_performance(&mut self, incident: Incident) -> Result<(), DomainError> {
        if self.incident.is_some() {
            return Err(DomainError::new(
                ErrorCode::IncidentAlreadyExists,
                format!("Execution {} already has an incident", self.id),
            ));
        }
        self.status = self
            .status
            .transition_to(ExecutionStatus::LowPerformance)
            .map_err(DomainError::from)?;
        self.incident = Some(incident);
        self.touch();
        Ok(())
    }

    fn ensure_scorable(&self) -> Result<(), DomainError> {
        if self.status != ExecutionStatus::InProgress {
            return Err(DomainError::new(
                ErrorCode::ExecutionAlreadyCompleted,
                format!("Execution {} is {} and cannot be scored", self.id, self.status),
            ));
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
