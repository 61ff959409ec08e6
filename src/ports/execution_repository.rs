//! Execution repository port (write side).
//!
//! Durable storage for executions and their answers.
//!
//! # Design
//!
//! - Single-row atomicity only: the engine does not require a transaction
//!   spanning answers, execution, and incident. A crash between steps can
//!   leave an execution scored without its incident (at-least-once).
//! - Reads return fully populated aggregates (answers plus incident) and
//!   never trigger re-scoring.

use crate::domain::execution::{Answer, Execution};
use crate::domain::foundation::{DomainError, ExecutionId, UserId};
use async_trait::async_trait;

/// Repository port for Execution aggregate persistence.
#[async_trait]
pub trait ExecutionRepository: Send + Sync {
    /// Persist a new execution.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, execution: &Execution) -> Result<(), DomainError>;

    /// Persist the scored answer records for an execution.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save_answers(&self, answers: &[Answer]) -> Result<(), DomainError>;

    /// Update an existing execution's scores and status.
    ///
    /// # Errors
    ///
    /// - `ExecutionNotFound` if the execution doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, execution: &Execution) -> Result<(), DomainError>;

    /// Find an execution by id with answers and incident populated.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ExecutionId) -> Result<Option<Execution>, DomainError>;

    /// All executions recorded by one executor, newest first.
    async fn find_by_executor(&self, user_id: &UserId) -> Result<Vec<Execution>, DomainError>;
}
