//! Admin listing of stored applications.

use axum::extract::State;
use serde::Serialize;

use super::{success, ApiResult};
use crate::models::Application;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ApplicationList {
    pub applications: Vec<Application>,
}

/// GET /api/applications - List all applications, newest first.
pub async fn list_applications(State(state): State<AppState>) -> ApiResult<ApplicationList> {
    let applications = state.store.list_all().await?;
    success(ApplicationList { applications })
}
