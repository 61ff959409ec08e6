//! ListExecutionsHandler - executions recorded by one executor.

use std::sync::Arc;

use crate::domain::execution::{Execution, ExecutionError};
use crate::domain::foundation::UserId;
use crate::ports::ExecutionRepository;

/// Query for an executor's executions, newest first.
#[derive(Debug, Clone)]
pub struct ListExecutionsQuery {
    pub executor_user_id: UserId,
}

/// Handler listing executions by executor.
pub struct ListExecutionsHandler {
    executions: Arc<dyn ExecutionRepository>,
}

impl ListExecutionsHandler {
    pub fn new(executions: Arc<dyn ExecutionRepository>) -> Self {
        Self { executions }
    }

    pub async fn handle(
        &self,
        query: ListExecutionsQuery,
    ) -> Result<Vec<Execution>, ExecutionError> {
        Ok(self
            .executions
            .find_by_executor(&query.executor_user_id)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::execution::{Answer, ExecutionTarget};
    use crate::domain::foundation::{
        DomainError, ExecutionId, TargetType, TemplateId, Timestamp,
    };
    use async_trait::async_trait;

    struct MockExecutionRepository {
        executions: Vec<Execution>,
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
            _id: &ExecutionId,
        ) -> Result<Option<Execution>, DomainError> {
            Ok(None)
        }

        async fn find_by_executor(
            &self,
            user_id: &UserId,
        ) -> Result<Vec<Execution>, DomainError> {
            Ok(self
                .executions
                .iter()
                .filter(|e| e.executor_user_id() == user_id)
                .cloned()
                .collect())
        }
    }

    fn execution_for(user: &str) -> Execution {
        Execution::new(
            ExecutionId::new(),
            ExecutionTarget::Template(TemplateId::new()),
            UserId::new(user).unwrap(),
            TargetType::new("driver").unwrap(),
            "driver-9".to_string(),
            Timestamp::now(),
            None,
        )
    }

    #[tokio::test]
    async fn lists_only_the_executors_executions() {
        let repo = Arc::new(MockExecutionRepository {
            executions: vec![
                execution_for("inspector-1"),
                execution_for("inspector-2"),
                execution_for("inspector-1"),
            ],
        });
        let handler = ListExecutionsHandler::new(repo);

        let found = handler
            .handle(ListExecutionsQuery {
                executor_user_id: UserId::new("inspector-1").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(found.len(), 2);
    }
}
