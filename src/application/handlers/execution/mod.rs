//! Execution handlers - orchestration and read paths.

mod execute_checklist;
mod get_execution;
mod list_executions;

pub use execute_checklist::{ExecuteChecklistCommand, ExecuteChecklistHandler};
pub use get_execution::{GetExecutionHandler, GetExecutionQuery};
pub use list_executions::{ListExecutionsHandler, ListExecutionsQuery};
