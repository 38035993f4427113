//! Notifications API
//!
//! - GET /api/notifications - Paged list, sortable, no keyword search
//! - POST /api/notifications/:id/read - Mark a notification as read

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::debug;

use crate::api::extract::ApiQuery;
use crate::api::listing::{list_page, ListQuery};
use crate::error::Result;
use crate::services::QueryError;
use crate::types::{ApiResponse, Notification, PageResult, Record};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/:id/read", post(mark_read))
}

/// GET /api/notifications
async fn list_notifications(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListQuery>,
) -> Result<Json<ApiResponse<PageResult<Notification>>>> {
    // Notifications are not searchable; a keyword is ignored.
    let params = ListQuery {
        keyword: None,
        ..params
    };
    let page = list_page(&state.notifications, &params, &state.config.paging)?;
    Ok(Json(ApiResponse::ok(page, "Notifications fetched")))
}

/// POST /api/notifications/:id/read
async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Notification>>> {
    let notification = state
        .notifications
        .update(&id, |n| n.read = true)
        .ok_or_else(|| QueryError::NotFound {
            entity: Notification::ENTITY,
            id: id.clone(),
        })?;
    debug!("Notification {} marked read", id);
    Ok(Json(ApiResponse::ok(notification, "Notification marked as read")))
}
