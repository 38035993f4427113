pub mod customers;
pub mod dashboard;
pub mod extract;
pub mod health;
pub mod listing;
pub mod market;
pub mod notifications;
pub mod products;
pub mod risk;
pub mod users;

use crate::AppState;
use axum::Router;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/dashboard", dashboard::router())
        .nest("/api/users", users::router())
        .nest("/api/customers", customers::router())
        .nest("/api/products", products::router())
        .nest("/api/notifications", notifications::router())
        .nest("/api/stocks", market::stocks_router())
        .nest("/api/positions", market::positions_router())
        .nest("/api/portfolio", market::portfolio_router())
        .nest("/api/risk", risk::router())
}
