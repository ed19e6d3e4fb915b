//! Application intake endpoint.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::ApplyRequest;
use crate::AppState;

/// Body of a successful submission.
#[derive(Debug, Serialize)]
pub struct ApplyAccepted {
    pub message: &'static str,
}

/// POST /api/apply - Validate, store and acknowledge a course application.
///
/// Notification emails are attempted after the insert commits. Their outcome
/// is logged and does not affect the response.
pub async fn apply(
    State(state): State<AppState>,
    payload: Result<Json<ApplyRequest>, JsonRejection>,
) -> ApiResult<ApplyAccepted> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let application = request.validate()?;

    let id = state
        .store
        .insert(&application)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    tracing::info!(application_id = id, "Application stored");

    state.dispatcher.dispatch(&application).await.log(id);

    success(ApplyAccepted {
        message: "Application received",
    })
}
