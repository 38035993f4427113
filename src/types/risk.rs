//! Risk Types
//!
//! Tunable risk parameters, analysis subjects and the Value-at-Risk
//! report derived from them.

use serde::{Deserialize, Serialize};

// =============================================================================
// Parameters
// =============================================================================

/// Tunable inputs of the VaR heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskParameters {
    /// Confidence level in percent (90-99)
    pub confidence_level: f64,
    /// Holding horizon in days (>= 1)
    pub time_horizon_days: u32,
    /// Capital the VaR amount is expressed against (> 0)
    pub portfolio_value: f64,
    /// Volatility as a fraction (0, 1]
    pub volatility: f64,
    /// Cross-asset correlation [0, 1]; collected but not used by the formula
    pub correlation: f64,
    pub market_stress: f64,
    pub liquidity_risk: f64,
    pub concentration_risk: f64,
}

impl Default for RiskParameters {
    fn default() -> Self {
        Self {
            confidence_level: 95.0,
            time_horizon_days: 1,
            portfolio_value: 100_000.0,
            volatility: 0.2,
            correlation: 0.3,
            market_stress: 0.1,
            liquidity_risk: 0.05,
            concentration_risk: 0.15,
        }
    }
}

/// Partial parameter edit. Unset fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialRiskParameters {
    pub confidence_level: Option<f64>,
    pub time_horizon_days: Option<u32>,
    pub portfolio_value: Option<f64>,
    pub volatility: Option<f64>,
    pub correlation: Option<f64>,
    pub market_stress: Option<f64>,
    pub liquidity_risk: Option<f64>,
    pub concentration_risk: Option<f64>,
}

impl PartialRiskParameters {
    pub fn apply_to(&self, params: &mut RiskParameters) {
        if let Some(v) = self.confidence_level {
            params.confidence_level = v;
        }
        if let Some(v) = self.time_horizon_days {
            params.time_horizon_days = v;
        }
        if let Some(v) = self.portfolio_value {
            params.portfolio_value = v;
        }
        if let Some(v) = self.volatility {
            params.volatility = v;
        }
        if let Some(v) = self.correlation {
            params.correlation = v;
        }
        if let Some(v) = self.market_stress {
            params.market_stress = v;
        }
        if let Some(v) = self.liquidity_risk {
            params.liquidity_risk = v;
        }
        if let Some(v) = self.concentration_risk {
            params.concentration_risk = v;
        }
    }
}

// =============================================================================
// Subjects
// =============================================================================

/// Long or short exposure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Long,
    Short,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Long => write!(f, "long"),
            Direction::Short => write!(f, "short"),
        }
    }
}

/// A security being analyzed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSubject {
    pub symbol: String,
    pub name: String,
    /// Percent of portfolio capital (0-100). `None` means full exposure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub direction: Direction,
}

impl RiskSubject {
    /// A single security at full, long exposure.
    pub fn single(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            weight: None,
            direction: Direction::Long,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn short(mut self) -> Self {
        self.direction = Direction::Short;
        self
    }
}

/// One asset of a stored strategy, in its transport form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyAsset {
    pub symbol: String,
    pub name: String,
    /// Percent of capital (0-100)
    pub position: f64,
    #[serde(rename = "type")]
    pub direction: Direction,
}

impl From<StrategyAsset> for RiskSubject {
    fn from(asset: StrategyAsset) -> Self {
        Self {
            symbol: asset.symbol,
            name: asset.name,
            weight: Some(asset.position),
            direction: asset.direction,
        }
    }
}

// =============================================================================
// Report
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Buy,
    Hold,
    Sell,
    Avoid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    BestCase,
    BaseCase,
    WorstCase,
}

/// A what-if outcome. `probability` and `impact` are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: ScenarioKind,
    pub probability: f64,
    pub impact: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactorKind {
    Market,
    Sector,
    Company,
    Liquidity,
}

/// Relative contribution of a risk source. Static metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    pub factor: RiskFactorKind,
    pub impact: f64,
    pub description: String,
}

/// Value-at-Risk report for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    pub symbol: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub direction: Direction,
    pub confidence_level: f64,
    pub time_horizon_days: u32,
    /// Input volatility expressed in percent
    pub volatility_percent: f64,
    pub var_value: f64,
    pub var_percent: f64,
    pub expected_shortfall: f64,
    pub max_drawdown: f64,
    pub risk_level: RiskLevel,
    pub recommendation: Recommendation,
    pub scenarios: Vec<Scenario>,
    pub risk_factors: Vec<RiskFactor>,
}

/// Per-asset reports plus simple strategy-level sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySummary {
    pub reports: Vec<RiskReport>,
    /// Sum of per-asset VaR; no correlation netting
    pub total_var: f64,
    pub total_expected_shortfall: f64,
    /// Largest per-asset drawdown, `None` when there are no reports
    pub max_drawdown: Option<f64>,
}
