//! Score calculator - hierarchical weighted score computation.
//!
//! Scores flow question -> category -> template -> (optionally) group.
//! A question's approval value is its compliance fraction; weights are free
//! multipliers, so category and template maxima are plain weight sums.

use std::collections::{BTreeMap, HashMap};

use crate::domain::catalog::{Group, Question};
use crate::domain::foundation::{CategoryId, TemplateId};

use super::Answer;

/// Computed scores for one template's answer set.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    pub total_score: f64,
    pub max_possible_score: f64,
    pub percentage_score: f64,
    /// Category percentage keyed by category id.
    pub category_scores: BTreeMap<String, f64>,
}

/// Computed scores for one group's answer set.
///
/// `percentage_score` aggregates raw points across all member templates;
/// `group_score` is the template-weight-weighted average of template
/// percentages. The two differ whenever templates carry unequal question
/// weight totals, and both are load-bearing for incident evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupScoreSummary {
    pub total_score: f64,
    pub max_possible_score: f64,
    pub percentage_score: f64,
    /// Category percentage keyed by `"{template_id}_{category_id}"`.
    pub category_scores: BTreeMap<String, f64>,
    pub group_score: f64,
    /// Template percentage keyed by template id.
    pub template_scores: BTreeMap<String, f64>,
}

/// Compute category and template scores for one template.
///
/// Skipped and unanswered questions score zero but still contribute their
/// weight to the category maximum. Inactive questions are ignored
/// entirely. Each matched answer gets its `answer_score`/`max_score`
/// filled in for later reporting.
pub fn score_template(questions: &[Question], answers: &mut [Answer]) -> ScoreSummary {
    let mut answer_index: HashMap<_, usize> = HashMap::new();
    for (i, answer) in answers.iter().enumerate() {
        answer_index.insert(*answer.question_id(), i);
    }

    let mut by_category: BTreeMap<CategoryId, Vec<&Question>> = BTreeMap::new();
    for question in questions.iter().filter(|q| q.is_active()) {
        by_category.entry(*question.category_id()).or_default().push(question);
    }

    let mut category_scores = BTreeMap::new();
    let mut total_score = 0.0;
    let mut max_possible_score = 0.0;

    for (category_id, questions) in &by_category {
        let mut category_score = 0.0;
        let mut category_max = 0.0;

        for question in questions {
            let question_score = match answer_index.get(question.id()) {
                Some(&i) if !answers[i].is_skipped() => answers[i].approval_value().value(),
                _ => 0.0,
            };
            if let Some(&i) = answer_index.get(question.id()) {
                answers[i].set_score(question_score, question.weight());
            }
            category_score += question_score * question.weight();
            category_max += question.weight();
        }

        let category_pct = if category_max > 0.0 {
            category_score / category_max * 100.0
        } else {
            0.0
        };
        category_scores.insert(category_id.to_string(), category_pct);
        total_score += category_score;
        max_possible_score += category_max;
    }

    let percentage_score = if max_possible_score > 0.0 {
        total_score / max_possible_score * 100.0
    } else {
        0.0
    };

    ScoreSummary {
        total_score,
        max_possible_score,
        percentage_score,
        category_scores,
    }
}

/// Compute scores for a group by scoring each member template and
/// aggregating.
///
/// Category keys are prefixed with the template id so two templates
/// sharing a category id cannot collide in the merged map.
pub fn score_group(
    group: &Group,
    questions_by_template: &BTreeMap<TemplateId, Vec<Question>>,
    answers: &mut [Answer],
) -> GroupScoreSummary {
    let mut category_scores = BTreeMap::new();
    let mut template_scores = BTreeMap::new();
    let mut total_score = 0.0;
    let mut max_possible_score = 0.0;
    let mut group_score = 0.0;

    for template_id in group.template_ids() {
        let Some(questions) = questions_by_template.get(template_id) else {
            continue;
        };
        let summary = score_template(questions, answers);

        for (category_id, pct) in &summary.category_scores {
            category_scores.insert(format!("{}_{}", template_id, category_id), *pct);
        }
        template_scores.insert(template_id.to_string(), summary.percentage_score);
        group_score += summary.percentage_score * group.weight_for(template_id).unwrap_or(0.0);
        total_score += summary.total_score;
        max_possible_score += summary.max_possible_score;
    }

    let percentage_score = if max_possible_score > 0.0 {
        total_score / max_possible_score * 100.0
    } else {
        0.0
    };

    GroupScoreSummary {
        total_score,
        max_possible_score,
        percentage_score,
        category_scores,
        group_score,
        template_scores,
    }
}
