//! Route Handlers
//!
//! Each handler unpacks the request, calls one service operation and wraps
//! the result.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use moveops_core::application::{CompleteRequest, ExecutionDetail, StartRequest, StartedExecution};
use moveops_core::domain::{ActiveExecution, DealId, ExecutionId, PauseAction, TimeRecordView};

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;
use crate::types::{
    CompleteMoveBody, HealthResponse, StartMoveBody, StatusResponse, SuccessResponse,
    TogglePauseBody,
};

/// POST /api/moves/{deal_id}/start
pub async fn start_move(
    State(state): State<AppState>,
    ApiPath(deal_id): ApiPath<DealId>,
    ApiJson(body): ApiJson<StartMoveBody>,
) -> ApiResult<(StatusCode, Json<StartedExecution>)> {
    let started = state
        .service
        .start(StartRequest {
            deal_id,
            team: body.team,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(started)))
}

/// POST /api/moves/{id}/toggle-pause
pub async fn toggle_pause(
    State(state): State<AppState>,
    ApiPath(execution_id): ApiPath<ExecutionId>,
    ApiJson(body): ApiJson<TogglePauseBody>,
) -> ApiResult<Json<StatusResponse>> {
    let action: PauseAction = body.action.parse()?;
    let status = state.service.toggle_pause(execution_id, action).await?;

    Ok(Json(StatusResponse { status }))
}

/// POST /api/moves/{id}/complete
pub async fn complete_move(
    State(state): State<AppState>,
    ApiPath(execution_id): ApiPath<ExecutionId>,
    ApiJson(body): ApiJson<CompleteMoveBody>,
) -> ApiResult<Json<SuccessResponse>> {
    state
        .service
        .complete(CompleteRequest {
            execution_id,
            material_usage: body.material_usage,
            notes: body.notes,
        })
        .await?;

    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/moves/active
pub async fn active_moves(State(state): State<AppState>) -> ApiResult<Json<Vec<ActiveExecution>>> {
    Ok(Json(state.service.get_active().await?))
}

/// GET /api/moves/{id}/time-records
pub async fn time_records(
    State(state): State<AppState>,
    ApiPath(execution_id): ApiPath<ExecutionId>,
) -> ApiResult<Json<Vec<TimeRecordView>>> {
    Ok(Json(state.service.get_time_records(execution_id).await?))
}

/// GET /api/moves/{id}
pub async fn move_detail(
    State(state): State<AppState>,
    ApiPath(execution_id): ApiPath<ExecutionId>,
) -> ApiResult<Json<ExecutionDetail>> {
    Ok(Json(state.service.get_execution(execution_id).await?))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Response {
    let (code, status) = match state.service.check_storage().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: moveops_core::VERSION.to_string(),
        }),
    )
        .into_response()
}
