//! Products API
//!
//! - GET /api/products - Paged list (search: name, description, category)
//! - GET /api/products/:id - Product details

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::extract::ApiQuery;
use crate::api::listing::{list_page, ListQuery};
use crate::error::Result;
use crate::services::find_by_id;
use crate::types::{ApiResponse, PageResult, Product};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/:id", get(get_product))
}

/// GET /api/products
async fn list_products(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListQuery>,
) -> Result<Json<ApiResponse<PageResult<Product>>>> {
    let page = list_page(&state.products, &params, &state.config.paging)?;
    Ok(Json(ApiResponse::ok(page, "Products fetched")))
}

/// GET /api/products/:id
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Product>>> {
    let product = find_by_id(&state.products.snapshot(), &id)?;
    Ok(Json(ApiResponse::ok(product, "Product fetched")))
}
