//! RiskDesk - portfolio and risk analytics server

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod types;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use services::{RecordStore, RiskSessionStore, SeedData};
use types::{Customer, Notification, Position, Product, Stock, StockMetrics, User};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub users: Arc<RecordStore<User>>,
    pub customers: Arc<RecordStore<Customer>>,
    pub products: Arc<RecordStore<Product>>,
    pub notifications: Arc<RecordStore<Notification>>,
    pub stocks: Arc<RecordStore<Stock>>,
    pub positions: Arc<RecordStore<Position>>,
    pub stock_metrics: Arc<RecordStore<StockMetrics>>,
    pub sessions: RiskSessionStore,
}

impl AppState {
    /// State populated from the given data.
    pub fn new(config: Arc<Config>, data: SeedData) -> Self {
        let sessions = RiskSessionStore::new(config.risk_defaults);
        Self {
            config,
            users: Arc::new(RecordStore::new(data.users)),
            customers: Arc::new(RecordStore::new(data.customers)),
            products: Arc::new(RecordStore::new(data.products)),
            notifications: Arc::new(RecordStore::new(data.notifications)),
            stocks: Arc::new(RecordStore::new(data.stocks)),
            positions: Arc::new(RecordStore::new(data.positions)),
            stock_metrics: Arc::new(RecordStore::new(data.stock_metrics)),
            sessions,
        }
    }

    /// State populated by the seed generator.
    pub fn seeded(config: Arc<Config>) -> Self {
        let data = services::generate(config.seed.seed, config.seed.counts());
        Self::new(config, data)
    }
}

/// Build the application router with middleware.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
