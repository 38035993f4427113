//! Dashboard API
//!
//! - GET /api/dashboard/stats - Record counts and portfolio value

use axum::{extract::State, routing::get, Json, Router};

use crate::services::aggregate;
use crate::types::{ApiResponse, DashboardStats};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/stats", get(get_stats))
}

fn collect_stats(state: &AppState) -> DashboardStats {
    let notifications = state.notifications.snapshot();
    let positions = state.positions.snapshot();

    DashboardStats {
        total_users: state.users.len(),
        total_customers: state.customers.len(),
        total_products: state.products.len(),
        total_notifications: notifications.len(),
        unread_notifications: notifications.iter().filter(|n| !n.read).count(),
        total_stocks: state.stocks.len(),
        total_positions: positions.len(),
        portfolio_value: aggregate(&positions).total_value,
        active_risk_sessions: state.sessions.len(),
    }
}

/// GET /api/dashboard/stats
async fn get_stats(State(state): State<AppState>) -> Json<ApiResponse<DashboardStats>> {
    Json(ApiResponse::ok(collect_stats(&state), "Dashboard stats fetched"))
}
