//! GetExecutionHandler - read path for a single execution.

use std::sync::Arc;

use crate::domain::execution::{Execution, ExecutionError};
use crate::domain::foundation::ExecutionId;
use crate::ports::ExecutionRepository;

/// Query for one execution with all relations populated.
#[derive(Debug, Clone)]
pub struct GetExecutionQuery {
    pub execution_id: ExecutionId,
}

/// Handler for fetching a single execution.
///
/// Reads are idempotent: a completed execution returns identical scores on
/// every call; nothing is re-computed.
pub struct GetExecutionHandler {
    executions: Arc<dyn ExecutionRepository>,
}

impl GetExecutionHandler {
    pub fn new(executions: Arc<dyn ExecutionRepository>) -> Self {
        Self { executions }
    }

    pub async fn handle(&self, query: GetExecutionQuery) -> Result<Execution, ExecutionError> {
        self.executions
            .find_by_id(&query.execution_id)
            .await?
            .ok_or(ExecutionError::NotFound(query.execution_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::execution::ExecutionTarget;
    use crate::domain::foundation::{
        DomainError, TargetType, TemplateId, Timestamp, UserId,
    };
    use crate::domain::execution::Answer;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockExecutionRepository {
        executions: Mutex<Vec<Execution>>,
        find_calls: Mutex<u32>,
    }

    impl MockExecutionRepository {
        fn with(executions: Vec<Execution>) -> Self {
            Self {
                executions: Mutex::new(executions),
                find_calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl ExecutionRepository for MockExecutionRepository {
        async fn create(&self, _execution: &Execution) -> Result<(), DomainError> {
            Ok(())
        }

        async fn save_answers(&self, _answers: &[Answer]) -> Result<(), DomainError> {
            Ok(())
        }

        async fn update(&self, _execution: &Execution) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_id(
            &self,
            id: &ExecutionId,
        ) -> Result<Option<Execution>, DomainError> {
            *self.find_calls.lock().unwrap() += 1;
            Ok(self
                .executions
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id() == id)
                .cloned())
        }

        async fn find_by_executor(
            &self,
            _user_id: &UserId,
        ) -> Result<Vec<Execution>, DomainError> {
            Ok(vec![])
        }
    }

    fn completed_execution() -> Execution {
        let mut execution = Execution::new(
            ExecutionId::new(),
            ExecutionTarget::Template(TemplateId::new()),
            UserId::new("inspector-1").unwrap(),
            TargetType::new("warehouse").unwrap(),
            "wh-1".to_string(),
            Timestamp::now(),
            None,
        );
        execution.start().unwrap();
        execution
            .record_template_scores(crate::domain::execution::ScoreSummary {
                total_score: 0.9,
                max_possible_score: 1.0,
                percentage_score: 90.0,
                category_scores: Default::default(),
            })
            .unwrap();
        execution.complete().unwrap();
        execution
    }

    #[tokio::test]
    async fn returns_execution_when_found() {
        let execution = completed_execution();
        let id = *execution.id();
        let repo = Arc::new(MockExecutionRepository::with(vec![execution]));
        let handler = GetExecutionHandler::new(repo);

        let found = handler
            .handle(GetExecutionQuery { execution_id: id })
            .await
            .unwrap();
        assert_eq!(found.id(), &id);
    }

    #[tokio::test]
    async fn returns_not_found_when_absent() {
        let repo = Arc::new(MockExecutionRepository::with(vec![]));
        let handler = GetExecutionHandler::new(repo);

        let missing = ExecutionId::new();
        let result = handler
            .handle(GetExecutionQuery {
                execution_id: missing,
            })
            .await;
        assert_eq!(result.unwrap_err(), ExecutionError::NotFound(missing));
    }

    #[tokio::test]
    async fn repeated_reads_return_identical_scores() {
        let execution = completed_execution();
        let id = *execution.id();
        let repo = Arc::new(MockExecutionRepository::with(vec![execution]));
        let handler = GetExecutionHandler::new(repo);

        let first = handler
            .handle(GetExecutionQuery { execution_id: id })
            .await
            .unwrap();
        let second = handler
            .handle(GetExecutionQuery { execution_id: id })
            .await
            .unwrap();

        assert_eq!(first.percentage_score(), second.percentage_score());
        assert_eq!(first.status(), second.status());
        assert_eq!(first, second);
    }
}
