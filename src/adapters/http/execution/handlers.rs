//! HTTP handlers for execution endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::execution::{
    ExecuteChecklistCommand, ExecuteChecklistHandler, GetExecutionHandler, GetExecutionQuery,
    ListExecutionsHandler, ListExecutionsQuery,
};
use crate::domain::execution::ExecutionError;
use crate::domain::foundation::{ExecutionId, TargetType, Timestamp, UserId};

use super::dto::{
    ErrorResponse, ExecuteChecklistRequest, ExecutionListResponse, ExecutionResponse,
    ListExecutionsParams,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ExecutionHandlers {
    execute_handler: Arc<ExecuteChecklistHandler>,
    get_handler: Arc<GetExecutionHandler>,
    list_handler: Arc<ListExecutionsHandler>,
}

impl ExecutionHandlers {
    pub fn new(
        execute_handler: Arc<ExecuteChecklistHandler>,
        get_handler: Arc<GetExecutionHandler>,
        list_handler: Arc<ListExecutionsHandler>,
    ) -> Self {
        Self {
            execute_handler,
            get_handler,
            list_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/executions - Execute a checklist
pub async fn execute_checklist(
    State(handlers): State<ExecutionHandlers>,
    Json(req): Json<ExecuteChecklistRequest>,
) -> Response {
    let executor_user_id = match UserId::new(req.executor_user_id) {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };
    let target_type = match TargetType::new(req.target_type) {
        Ok(kind) => kind,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    let cmd = ExecuteChecklistCommand {
        template_id: req.template_id,
        group_id: req.group_id,
        executor_user_id,
        target_type,
        target_id: req.target_id,
        executed_at: req.executed_at.map(Timestamp::from_datetime),
        notes: req.notes,
        answers: req.answers.into_iter().map(Into::into).collect(),
    };

    match handlers.execute_handler.handle(cmd).await {
        Ok(execution) => {
            let response = ExecutionResponse::from(&execution);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_execution_error(e),
    }
}

/// GET /api/executions/:id - Get execution details
pub async fn get_execution(
    State(handlers): State<ExecutionHandlers>,
    Path(execution_id): Path<String>,
) -> Response {
    let execution_id = match execution_id.parse::<ExecutionId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid execution ID")),
            )
                .into_response()
        }
    };

    let query = GetExecutionQuery { execution_id };

    match handlers.get_handler.handle(query).await {
        Ok(execution) => {
            let response = ExecutionResponse::from(&execution);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_execution_error(e),
    }
}

/// GET /api/executions - List executions by executor
pub async fn list_executions(
    State(handlers): State<ExecutionHandlers>,
    Query(params): Query<ListExecutionsParams>,
) -> Response {
    let executor_user_id = match UserId::new(params.executor_user_id) {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    let query = ListExecutionsQuery { executor_user_id };

    match handlers.list_handler.handle(query).await {
        Ok(executions) => {
            let items: Vec<ExecutionResponse> =
                executions.iter().map(ExecutionResponse::from).collect();
            let response = ExecutionListResponse {
                total: items.len(),
                items,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_execution_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_execution_error(error: ExecutionError) -> Response {
    let code = error.code();
    match error {
        ExecutionError::TemplateNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Template", &id.to_string())),
        )
            .into_response(),
        ExecutionError::GroupNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Group", &id.to_string())),
        )
            .into_response(),
        ExecutionError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Execution", &id.to_string())),
        )
            .into_response(),
        ExecutionError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "execution request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(msg)),
            )
                .into_response()
        }
        // Every validator violation surfaces unmodified with its code.
        other => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(code.to_string(), other.message())),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, QuestionId};

    #[test]
    fn validation_errors_map_to_bad_request() {
        let response = handle_execution_error(ExecutionError::UnknownQuestion(QuestionId::new()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_errors_map_to_404() {
        let response = handle_execution_error(ExecutionError::NotFound(ExecutionId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn infrastructure_errors_map_to_500() {
        let response =
            handle_execution_error(ExecutionError::Infrastructure("db down".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_codes_survive_the_mapping() {
        // The error code string reaches the response payload unmodified.
        let err = ExecutionError::MissingRequiredAnswers {
            question_titles: vec!["Horn working".to_string()],
        };
        assert_eq!(err.code(), ErrorCode::MissingRequiredAnswers);
        let response = handle_execution_error(err);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
