//! Incident generator - decides whether low performance warrants an
//! incident and classifies its severity.

use std::collections::BTreeMap;

use crate::domain::foundation::{ChecklistType, ExecutionId, IncidentId, IncidentSeverity};

use super::Incident;

/// Everything the generator needs, resolved by the orchestrator.
///
/// For template executions the threshold and type come from the template;
/// for group executions the threshold comes from the group and the type is
/// fixed to `Compliance` — groups are always treated as compliance
/// evaluations. `score_to_check` is the group score where available,
/// otherwise the raw percentage.
#[derive(Debug, Clone)]
pub struct IncidentInput<'a> {
    pub execution_id: ExecutionId,
    pub checklist_type: ChecklistType,
    pub is_group: bool,
    pub threshold: f64,
    pub score_to_check: f64,
    pub category_scores: &'a BTreeMap<String, f64>,
}

/// Evaluate whether an execution's score warrants an incident.
///
/// Triggers when a compliance-typed execution, or any group execution,
/// scores below its threshold. Severity comes from the deficit
/// (`threshold - score`): >= 30 Critical, >= 20 High, >= 10 Medium,
/// otherwise Low. Failed categories are the ones individually below the
/// threshold.
pub fn evaluate(input: IncidentInput<'_>) -> Option<Incident> {
    let below = input.score_to_check < input.threshold;
    let triggered = (input.checklist_type.is_compliance() && below) || (input.is_group && below);
    if !triggered {
        return None;
    }

    let severity = IncidentSeverity::from_deficit(input.threshold - input.score_to_check);
    let failed_categories: Vec<String> = input
        .category_scores
        .iter()
        .filter(|(_, pct)| **pct < input.threshold)
        .map(|(key, _)| key.clone())
        .collect();

    Some(Incident::new(
        IncidentId::new(),
        input.execution_id,
        severity,
        input.score_to_check,
        input.threshold,
        failed_categories,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(
        checklist_type: ChecklistType,
        is_group: bool,
        threshold: f64,
        score: f64,
        category_scores: &BTreeMap<String, f64>,
    ) -> IncidentInput<'_> {
        IncidentInput {
            execution_id: ExecutionId::new(),
            checklist_type,
            is_group,
            threshold,
            score_to_check: score,
            category_scores,
        }
    }

    #[test]
    fn compliance_below_threshold_triggers() {
        let scores = BTreeMap::new();
        let incident =
            evaluate(input(ChecklistType::Compliance, false, 70.0, 40.0, &scores)).unwrap();
        assert_eq!(incident.severity(), IncidentSeverity::Critical);
        assert_eq!(incident.performance_score(), 40.0);
        assert_eq!(incident.threshold_score(), 70.0);
    }

    #[test]
    fn compliance_at_threshold_does_not_trigger() {
        let scores = BTreeMap::new();
        assert!(evaluate(input(ChecklistType::Compliance, false, 70.0, 70.0, &scores)).is_none());
    }

    #[test]
    fn inspection_below_threshold_does_not_trigger() {
        let scores = BTreeMap::new();
        assert!(evaluate(input(ChecklistType::Inspection, false, 70.0, 10.0, &scores)).is_none());
    }

    #[test]
    fn group_execution_triggers_regardless_of_type() {
        let scores = BTreeMap::new();
        // Groups always carry Compliance, but the group path alone suffices.
        let incident =
            evaluate(input(ChecklistType::Compliance, true, 70.0, 68.0, &scores)).unwrap();
        assert_eq!(incident.severity(), IncidentSeverity::Low);
    }

    #[test]
    fn severity_boundaries_land_in_higher_tier() {
        let scores = BTreeMap::new();
        let cases = [
            (40.0, IncidentSeverity::Critical), // deficit 30
            (50.0, IncidentSeverity::High),     // deficit 20
            (60.0, IncidentSeverity::Medium),   // deficit 10
            (69.0, IncidentSeverity::Low),      // deficit 1
        ];
        for (score, expected) in cases {
            let incident =
                evaluate(input(ChecklistType::Compliance, false, 70.0, score, &scores)).unwrap();
            assert_eq!(incident.severity(), expected, "score {}", score);
        }
    }

    #[test]
    fn failed_categories_are_those_below_threshold() {
        let mut scores = BTreeMap::new();
        scores.insert("brakes".to_string(), 55.0);
        scores.insert("lights".to_string(), 90.0);
        scores.insert("tires".to_string(), 69.99);

        let incident =
            evaluate(input(ChecklistType::Compliance, false, 70.0, 65.0, &scores)).unwrap();

        assert_eq!(
            incident.failed_categories(),
            &["brakes".to_string(), "tires".to_string()]
        );
    }
}
