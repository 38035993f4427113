//! Market API
//!
//! Stocks:
//! - GET /api/stocks - Paged list (search: symbol, name, sector, industry)
//! - GET /api/stocks/:symbol - Stock details
//! - GET /api/stocks/:symbol/related?count= - Same sector or industry
//! - GET /api/stocks/:symbol/metrics - Indicators, fundamentals, ratings
//!
//! Positions:
//! - GET /api/positions - Paged holdings (search: stockSymbol, stockName)
//!
//! Portfolio:
//! - GET /api/portfolio/overview?groupBy=sector|name - Portfolio roll-up

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::api::extract::ApiQuery;
use crate::api::listing::{list_page, ListQuery};
use crate::error::{AppError, Result};
use crate::services::{aggregate, aggregate_by, find_by_id, related_stocks, DEFAULT_RELATED_COUNT};
use crate::types::{
    ApiResponse, PageResult, PortfolioOverview, Position, RelatedStock, Stock, StockMetrics,
};
use crate::AppState;

pub fn stocks_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stocks))
        .route("/:symbol", get(get_stock))
        .route("/:symbol/related", get(get_related))
        .route("/:symbol/metrics", get(get_metrics))
}

pub fn positions_router() -> Router<AppState> {
    Router::new().route("/", get(list_positions))
}

pub fn portfolio_router() -> Router<AppState> {
    Router::new().route("/overview", get(get_overview))
}

// =============================================================================
// Query Parameters
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RelatedQuery {
    pub count: Option<usize>,
}

/// Grouping key for the sector allocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupBy {
    #[default]
    Sector,
    /// Group by stock name (legacy dashboard behavior)
    Name,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewQuery {
    pub group_by: Option<String>,
}

impl OverviewQuery {
    fn group_by(&self) -> Result<GroupBy> {
        match self.group_by.as_deref().map(str::trim) {
            None | Some("") | Some("sector") => Ok(GroupBy::Sector),
            Some("name") => Ok(GroupBy::Name),
            Some(other) => Err(AppError::BadRequest(format!("Unknown groupBy: {}", other))),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/stocks
async fn list_stocks(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListQuery>,
) -> Result<Json<ApiResponse<PageResult<Stock>>>> {
    let page = list_page(&state.stocks, &params, &state.config.paging)?;
    Ok(Json(ApiResponse::ok(page, "Stocks fetched")))
}

/// GET /api/stocks/:symbol
async fn get_stock(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<Stock>>> {
    let stock = find_by_id(&state.stocks.snapshot(), &symbol.to_uppercase())?;
    Ok(Json(ApiResponse::ok(stock, "Stock fetched")))
}

/// GET /api/stocks/:symbol/related
async fn get_related(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    ApiQuery(params): ApiQuery<RelatedQuery>,
) -> Result<Json<ApiResponse<Vec<RelatedStock>>>> {
    let count = params.count.unwrap_or(DEFAULT_RELATED_COUNT);
    let related = related_stocks(&state.stocks.snapshot(), &symbol, count)?;
    Ok(Json(ApiResponse::ok(related, "Related stocks fetched")))
}

/// GET /api/stocks/:symbol/metrics
async fn get_metrics(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ApiResponse<StockMetrics>>> {
    let metrics = find_by_id(&state.stock_metrics.snapshot(), &symbol.to_uppercase())?;
    Ok(Json(ApiResponse::ok(metrics, "Stock metrics fetched")))
}

/// GET /api/positions
async fn list_positions(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListQuery>,
) -> Result<Json<ApiResponse<PageResult<Position>>>> {
    let page = list_page(&state.positions, &params, &state.config.paging)?;
    Ok(Json(ApiResponse::ok(page, "Positions fetched")))
}

/// GET /api/portfolio/overview
async fn get_overview(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<OverviewQuery>,
) -> Result<Json<ApiResponse<PortfolioOverview>>> {
    let positions = state.positions.snapshot();
    let overview = match params.group_by()? {
        GroupBy::Sector => aggregate(&positions),
        GroupBy::Name => aggregate_by(&positions, |p| p.stock_name.clone()),
    };
    Ok(Json(ApiResponse::ok(overview, "Portfolio overview fetched")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_parsing() {
        let q = OverviewQuery::default();
        assert_eq!(q.group_by().unwrap(), GroupBy::Sector);

        let q = OverviewQuery {
            group_by: Some("name".to_string()),
        };
        assert_eq!(q.group_by().unwrap(), GroupBy::Name);

        let q = OverviewQuery {
            group_by: Some("color".to_string()),
        };
        assert!(q.group_by().is_err());
    }
}
