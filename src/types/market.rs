//! Market Types
//!
//! Listed securities, holdings and the portfolio roll-up built from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{FieldValue, Record};

/// `part / whole * 100`, or `None` when the ratio is undefined.
///
/// A zero (or non-finite) divisor never produces NaN or infinity.
pub fn percent_of(part: f64, whole: f64) -> Option<f64> {
    if whole == 0.0 || !whole.is_finite() {
        return None;
    }
    let pct = part / whole * 100.0;
    pct.is_finite().then_some(pct)
}

// =============================================================================
// Stocks
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub symbol: String,
    pub name: String,
    pub exchange: String,
    pub sector: String,
    pub industry: String,
    pub market_cap: f64,
    pub current_price: f64,
    pub previous_close: f64,
    pub day_change: f64,
    /// `None` when the previous close is zero
    pub day_change_percent: Option<f64>,
    pub volume: u64,
    pub avg_volume: u64,
    pub pe: f64,
    pub eps: f64,
    pub dividend: f64,
    pub dividend_yield: f64,
    pub beta: f64,
    #[serde(rename = "high52Week")]
    pub high_52_week: f64,
    #[serde(rename = "low52Week")]
    pub low_52_week: f64,
    pub description: String,
    pub website: String,
}

impl Record for Stock {
    const ENTITY: &'static str = "stock";
    const SEARCHABLE_FIELDS: &'static [&'static str] = &["symbol", "name", "sector", "industry"];

    fn id(&self) -> &str {
        &self.symbol
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "symbol" => Some(self.symbol.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "exchange" => Some(self.exchange.as_str().into()),
            "sector" => Some(self.sector.as_str().into()),
            "industry" => Some(self.industry.as_str().into()),
            "marketCap" => Some(self.market_cap.into()),
            "currentPrice" => Some(self.current_price.into()),
            "previousClose" => Some(self.previous_close.into()),
            "dayChange" => Some(self.day_change.into()),
            "dayChangePercent" => self.day_change_percent.map(FieldValue::from),
            "volume" => Some(self.volume.into()),
            "avgVolume" => Some(self.avg_volume.into()),
            "pe" => Some(self.pe.into()),
            "eps" => Some(self.eps.into()),
            "dividend" => Some(self.dividend.into()),
            "dividendYield" => Some(self.dividend_yield.into()),
            "beta" => Some(self.beta.into()),
            "high52Week" => Some(self.high_52_week.into()),
            "low52Week" => Some(self.low_52_week.into()),
            _ => None,
        }
    }
}

/// Why a stock was suggested as related to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    SameSectorAndIndustry,
    SameSector,
    SameIndustry,
}

/// A stock sharing a sector or industry with the one being viewed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedStock {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub industry: String,
    pub current_price: f64,
    pub day_change_percent: Option<f64>,
    pub market_cap: f64,
    pub relation: Relation,
}

/// Technical indicators at the last close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalIndicators {
    pub rsi: f64,
    pub macd: f64,
    pub bollinger_upper: f64,
    pub bollinger_middle: f64,
    pub bollinger_lower: f64,
    pub sma20: f64,
    pub sma50: f64,
    pub sma200: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundamentalMetrics {
    pub pe: f64,
    pub peg: f64,
    pub pb: f64,
    pub ps: f64,
    pub ev_ebitda: f64,
    pub roe: f64,
    pub roa: f64,
    pub debt_to_equity: f64,
    pub current_ratio: f64,
    pub quick_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalystRatings {
    pub buy: u32,
    pub hold: u32,
    pub sell: u32,
    /// 1 (sell) to 5 (strong buy)
    pub average_rating: f64,
    pub price_target: f64,
    /// Percent move from the current price to the target
    pub price_target_upside: Option<f64>,
}

/// Per-symbol indicator snapshot, keyed by symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMetrics {
    pub symbol: String,
    pub technical_indicators: TechnicalIndicators,
    pub fundamental_metrics: FundamentalMetrics,
    pub analyst_ratings: AnalystRatings,
    pub last_updated: DateTime<Utc>,
}

impl Record for StockMetrics {
    const ENTITY: &'static str = "stock metrics";
    const SEARCHABLE_FIELDS: &'static [&'static str] = &["symbol"];

    fn id(&self) -> &str {
        &self.symbol
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "symbol" => Some(self.symbol.as_str().into()),
            "rsi" => Some(self.technical_indicators.rsi.into()),
            "pe" => Some(self.fundamental_metrics.pe.into()),
            "averageRating" => Some(self.analyst_ratings.average_rating.into()),
            _ => None,
        }
    }
}

// =============================================================================
// Positions
// =============================================================================

/// A single holding with its derived valuation fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: String,
    pub stock_symbol: String,
    pub stock_name: String,
    /// Grouping key for sector allocation
    pub sector: String,
    pub shares: f64,
    pub average_price: f64,
    pub current_price: f64,
    pub market_value: f64,
    pub cost_basis: f64,
    pub unrealized_gain_loss: f64,
    pub unrealized_gain_loss_percent: Option<f64>,
    pub realized_gain_loss: f64,
    pub total_gain_loss: f64,
    pub total_gain_loss_percent: Option<f64>,
    pub institutional_holding_percent: f64,
    pub purchase_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Position {
    /// Create a position and derive its valuation fields.
    pub fn new(
        id: String,
        stock_symbol: String,
        stock_name: String,
        sector: String,
        shares: f64,
        average_price: f64,
        current_price: f64,
    ) -> Self {
        let now = Utc::now();
        let mut position = Self {
            id,
            stock_symbol,
            stock_name,
            sector,
            shares,
            average_price,
            current_price,
            market_value: 0.0,
            cost_basis: 0.0,
            unrealized_gain_loss: 0.0,
            unrealized_gain_loss_percent: None,
            realized_gain_loss: 0.0,
            total_gain_loss: 0.0,
            total_gain_loss_percent: None,
            institutional_holding_percent: 0.0,
            purchase_date: now,
            last_updated: now,
        };
        position.recalculate();
        position
    }

    pub fn with_realized_gain_loss(mut self, realized: f64) -> Self {
        self.realized_gain_loss = realized;
        self.recalculate();
        self
    }

    /// Set the institutional holding share, clamped to 0-100.
    pub fn with_institutional_holding(mut self, pct: f64) -> Self {
        self.institutional_holding_percent = pct.clamp(0.0, 100.0);
        self
    }

    pub fn with_purchase_date(mut self, date: DateTime<Utc>) -> Self {
        self.purchase_date = date;
        self
    }

    pub fn with_last_updated(mut self, at: DateTime<Utc>) -> Self {
        self.last_updated = at;
        self
    }

    fn recalculate(&mut self) {
        self.market_value = self.shares * self.current_price;
        self.cost_basis = self.shares * self.average_price;
        self.unrealized_gain_loss = self.market_value - self.cost_basis;
        self.unrealized_gain_loss_percent = percent_of(self.unrealized_gain_loss, self.cost_basis);
        self.total_gain_loss = self.unrealized_gain_loss + self.realized_gain_loss;
        self.total_gain_loss_percent = percent_of(self.total_gain_loss, self.cost_basis);
    }

    /// Rough intraday P&L: one percent of the open gain.
    pub fn day_gain_loss(&self) -> f64 {
        (self.current_price - self.average_price) * self.shares * 0.01
    }
}

impl Record for Position {
    const ENTITY: &'static str = "position";
    const SEARCHABLE_FIELDS: &'static [&'static str] = &["stockSymbol", "stockName"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.as_str().into()),
            "stockSymbol" => Some(self.stock_symbol.as_str().into()),
            "stockName" => Some(self.stock_name.as_str().into()),
            "sector" => Some(self.sector.as_str().into()),
            "shares" => Some(self.shares.into()),
            "averagePrice" => Some(self.average_price.into()),
            "currentPrice" => Some(self.current_price.into()),
            "marketValue" => Some(self.market_value.into()),
            "costBasis" => Some(self.cost_basis.into()),
            "unrealizedGainLoss" => Some(self.unrealized_gain_loss.into()),
            "unrealizedGainLossPercent" => self.unrealized_gain_loss_percent.map(FieldValue::from),
            "realizedGainLoss" => Some(self.realized_gain_loss.into()),
            "totalGainLoss" => Some(self.total_gain_loss.into()),
            "totalGainLossPercent" => self.total_gain_loss_percent.map(FieldValue::from),
            "institutionalHoldingPercent" => Some(self.institutional_holding_percent.into()),
            "purchaseDate" => Some(self.purchase_date.to_rfc3339().into()),
            _ => None,
        }
    }
}

// =============================================================================
// Portfolio Overview
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorAllocation {
    pub sector: String,
    pub value: f64,
    pub percentage: Option<f64>,
}

/// Portfolio-level roll-up. Recomputed from positions on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioOverview {
    pub total_value: f64,
    pub total_cost: f64,
    pub total_gain_loss: f64,
    /// `None` for an empty (zero-cost) portfolio
    pub total_gain_loss_percent: Option<f64>,
    pub day_gain_loss: f64,
    pub day_gain_loss_percent: Option<f64>,
    pub positions: Vec<Position>,
    pub top_performers: Vec<Position>,
    pub worst_performers: Vec<Position>,
    pub sector_allocation: Vec<SectorAllocation>,
    pub last_updated: DateTime<Utc>,
}
