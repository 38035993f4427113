//! Dashboard Types

use serde::{Deserialize, Serialize};

/// Back-office counters shown on the dashboard landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: usize,
    pub total_customers: usize,
    pub total_products: usize,
    pub total_notifications: usize,
    pub unread_notifications: usize,
    pub total_stocks: usize,
    pub total_positions: usize,
    /// Market value of every position
    pub portfolio_value: f64,
    pub active_risk_sessions: usize,
}
