//! ExecuteChecklistHandler - orchestrates one checklist execution.
//!
//! One transaction-like sequence per request: resolve target, load
//! definitions, validate answers, score, persist, evaluate incident.
//! Validation failures abort before any execution row is written.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::catalog::{
    validate_group_weights, validate_template_weights, Group, Question, Template,
};
use crate::domain::execution::{
    score_group, score_template, validate_answers, Answer, Execution, ExecutionError,
    ExecutionTarget, SubmittedAnswer,
};
use crate::domain::foundation::{
    AnswerId, ChecklistType, ExecutionId, GroupId, TargetType, TemplateId, Timestamp, UserId,
};
use crate::domain::incident::{evaluate, IncidentInput};
use crate::ports::{CatalogStore, ExecutionRepository, IncidentSink};

/// Command to execute a checklist against a target.
#[derive(Debug, Clone)]
pub struct ExecuteChecklistCommand {
    pub template_id: Option<TemplateId>,
    pub group_id: Option<GroupId>,
    pub executor_user_id: UserId,
    pub target_type: TargetType,
    pub target_id: String,
    pub executed_at: Option<Timestamp>,
    pub notes: Option<String>,
    pub answers: Vec<SubmittedAnswer>,
}

/// Catalog data resolved for one execution.
enum LoadedTarget {
    Template {
        template: Template,
        questions: Vec<Question>,
    },
    Group {
        group: Group,
        questions_by_template: BTreeMap<TemplateId, Vec<Question>>,
    },
}

/// Handler coordinating validation, scoring, persistence, and incident
/// generation for one execution request.
pub struct ExecuteChecklistHandler {
    catalog: Arc<dyn CatalogStore>,
    executions: Arc<dyn ExecutionRepository>,
    incidents: Arc<dyn IncidentSink>,
}

impl ExecuteChecklistHandler {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        executions: Arc<dyn ExecutionRepository>,
        incidents: Arc<dyn IncidentSink>,
    ) -> Self {
        Self {
            catalog,
            executions,
            incidents,
        }
    }

    pub async fn handle(
        &self,
        cmd: ExecuteChecklistCommand,
    ) -> Result<Execution, ExecutionError> {
        // 1. Decide the target once; the rest of the pipeline matches on it.
        let target = ExecutionTarget::resolve(cmd.template_id, cmd.group_id)?;

        // 2. Load definitions and re-check their weight invariants.
        let loaded = self.load_target(&target).await?;

        // 3. Validate answers against the resolved question set. Any
        //    violation aborts before an execution row exists.
        let questions = loaded.all_questions();
        validate_answers(&questions, &cmd.answers)?;

        // 4. Create the execution and advance it to InProgress.
        let execution_id = ExecutionId::new();
        let mut execution = Execution::new(
            execution_id,
            target,
            cmd.executor_user_id,
            cmd.target_type,
            cmd.target_id,
            cmd.executed_at.unwrap_or_else(Timestamp::now),
            cmd.notes,
        );
        execution.start()?;
        self.executions.create(&execution).await?;

        // 5. Record answers and compute scores.
        let answered_at = Timestamp::now();
        let mut answers = Vec::with_capacity(cmd.answers.len());
        for submitted in &cmd.answers {
            answers.push(Answer::record(
                AnswerId::new(),
                execution_id,
                submitted,
                answered_at,
            )?);
        }

        let (threshold, checklist_type, is_group) = match &loaded {
            LoadedTarget::Template { template, questions } => {
                let summary = score_template(questions, &mut answers);
                execution.record_template_scores(summary)?;
                (
                    template.performance_threshold(),
                    template.checklist_type(),
                    false,
                )
            }
            LoadedTarget::Group {
                group,
                questions_by_template,
            } => {
                let summary = score_group(group, questions_by_template, &mut answers);
                execution.record_group_scores(summary)?;
                // Groups are always treated as compliance evaluations.
                (group.performance_threshold(), ChecklistType::Compliance, true)
            }
        };

        // 6. Persist scored answers, then seal the execution.
        self.executions.save_answers(&answers).await?;
        execution.attach_answers(answers);
        execution.complete()?;
        self.executions.update(&execution).await?;

        tracing::info!(
            execution_id = %execution.id(),
            percentage_score = execution.percentage_score(),
            "checklist execution scored"
        );

        // 7. Incident evaluation against the resolved threshold.
        let incident = evaluate(IncidentInput {
            execution_id,
            checklist_type,
            is_group,
            threshold,
            score_to_check: execution.score_to_check(),
            category_scores: execution.category_scores(),
        });
        if let Some(incident) = incident {
            tracing::warn!(
                execution_id = %execution.id(),
                severity = %incident.severity(),
                score = execution.score_to_check(),
                threshold,
                "low performance incident generated"
            );
            self.incidents.save(&incident).await?;
            execution.flag_low_performance(incident)?;
            self.executions.update(&execution).await?;
        }

        Ok(execution)
    }

    async fn load_target(&self, target: &ExecutionTarget) -> Result<LoadedTarget, ExecutionError> {
        match target {
            ExecutionTarget::Template(template_id) => {
                let template = self
                    .catalog
                    .get_template(template_id)
                    .await?
                    .ok_or(ExecutionError::TemplateNotFound(*template_id))?;
                validate_template_weights(&template)?;
                let questions = self.catalog.get_template_questions(template_id).await?;
                Ok(LoadedTarget::Template {
                    template,
                    questions,
                })
            }
            ExecutionTarget::Group(group_id) => {
                let group = self
                    .catalog
                    .get_group(group_id)
                    .await?
                    .ok_or(ExecutionError::GroupNotFound(*group_id))?;

                let found = self.catalog.templates_exist(group.template_ids()).await?;
                validate_group_weights(
                    group.template_ids(),
                    &found,
                    Some(group.template_weights()),
                )?;

                let mut questions_by_template = BTreeMap::new();
                for template_id in group.template_ids() {
                    let questions =
                        self.catalog.get_template_questions(template_id).await?;
                    questions_by_template.insert(*template_id, questions);
                }
                Ok(LoadedTarget::Group {
                    group,
                    questions_by_template,
                })
            }
        }
    }
}

impl LoadedTarget {
    /// The full question set answers are validated against.
    fn all_questions(&self) -> Vec<Question> {
        match self {
            LoadedTarget::Template { questions, .. } => questions.clone(),
            LoadedTarget::Group {
                questions_by_template,
                ..
            } => questions_by_template.values().flatten().cloned().collect(),
        }
    }
}
