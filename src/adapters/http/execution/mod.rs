//! HTTP adapter for execution endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AnswerResponse, ErrorResponse, ExecuteChecklistRequest, ExecutionListResponse,
    ExecutionResponse, IncidentResponse, ListExecutionsParams, SubmittedAnswerRequest,
};
pub use handlers::{execute_checklist, get_execution, list_executions, ExecutionHandlers};
pub use routes::execution_routes;
