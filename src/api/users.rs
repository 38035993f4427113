//! Users API
//!
//! - GET /api/users - Paged user list (search: name, email, username)
//! - POST /api/users - Create a user
//! - GET /api/users/:id - User details
//! - PUT /api/users/:id - Partial update
//! - DELETE /api/users/:id - Remove a user

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use tracing::info;

use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::listing::{list_page, ListQuery};
use crate::error::Result;
use crate::services::QueryError;
use crate::types::{ApiResponse, PageResult, Record, User, UserDraft};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

fn not_found(id: String) -> QueryError {
    QueryError::NotFound {
        entity: User::ENTITY,
        id,
    }
}

/// GET /api/users
async fn list_users(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListQuery>,
) -> Result<Json<ApiResponse<PageResult<User>>>> {
    let page = list_page(&state.users, &params, &state.config.paging)?;
    Ok(Json(ApiResponse::ok(page, "Users fetched")))
}

/// GET /api/users/:id
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<User>>> {
    let user = state.users.get(&id).ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::ok(user, "User fetched")))
}

/// POST /api/users
async fn create_user(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<UserDraft>,
) -> (StatusCode, Json<ApiResponse<User>>) {
    let id = format!("user_{}", uuid::Uuid::new_v4().simple());
    let user = state.users.insert(draft.into_user(id, Utc::now()));
    info!("Created user {}", user.id);
    (
        StatusCode::CREATED,
        Json(ApiResponse::created(user, "User created")),
    )
}

/// PUT /api/users/:id
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(draft): ApiJson<UserDraft>,
) -> Result<Json<ApiResponse<User>>> {
    let now = Utc::now();
    let user = state
        .users
        .update(&id, |u| draft.apply_to(u, now))
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::ok(user, "User updated")))
}

/// DELETE /api/users/:id
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    state.users.remove(&id).ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::ok((), "User deleted")))
}
