//! Admin page.

use axum::{extract::State, response::Html};

use crate::errors::AppError;
use crate::AppState;

/// GET /admin - Serve the admin page.
///
/// The page lives outside the public directory, so the static fallback never
/// sees it.
pub async fn admin_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let path = &state.config.admin_page;

    match tokio::fs::read_to_string(path).await {
        Ok(page) => Ok(Html(page)),
        Err(e) => {
            tracing::warn!("Failed to read {:?}: {}", path, e);
            Err(AppError::NotFound("Not found".to_string()))
        }
    }
}
