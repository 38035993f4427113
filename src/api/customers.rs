//! Customers API
//!
//! - GET /api/customers - Paged list (search: name, email, company, phone)
//! - POST /api/customers - Create a customer
//! - GET /api/customers/:id - Customer details
//! - PUT /api/customers/:id - Partial update
//! - DELETE /api/customers/:id - Remove a customer

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
use crate::types::{ApiResponse, Customer, CustomerDraft, PageResult, Record};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

fn not_found(id: String) -> QueryError {
    QueryError::NotFound {
        entity: Customer::ENTITY,
        id,
    }
}

/// GET /api/customers
async fn list_customers(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListQuery>,
) -> Result<Json<ApiResponse<PageResult<Customer>>>> {
    let page = list_page(&state.customers, &params, &state.config.paging)?;
    Ok(Json(ApiResponse::ok(page, "Customers fetched")))
}

/// GET /api/customers/:id
async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Customer>>> {
    let customer = state.customers.get(&id).ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::ok(customer, "Customer fetched")))
}

/// POST /api/customers
async fn create_customer(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<CustomerDraft>,
) -> (StatusCode, Json<ApiResponse<Customer>>) {
    let id = format!("customer_{}", uuid::Uuid::new_v4().simple());
    let customer = state.customers.insert(draft.into_customer(id, Utc::now()));
    info!("Created customer {}", customer.id);
    (
        StatusCode::CREATED,
        Json(ApiResponse::created(customer, "Customer created")),
    )
}

/// PUT /api/customers/:id
async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(draft): ApiJson<CustomerDraft>,
) -> Result<Json<ApiResponse<Customer>>> {
    let customer = state
        .customers
        .update(&id, |c| draft.apply_to(c))
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::ok(customer, "Customer updated")))
}

/// DELETE /api/customers/:id
async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    state.customers.remove(&id).ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::ok((), "Customer deleted")))
}
