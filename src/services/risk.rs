//! Risk Analysis Engine
//!
//! Simplified Value-at-Risk heuristic:
//!
//! ```text
//! raw      = volatility * sqrt(horizon) * (1 + stress + liquidity + concentration)
//! var      = portfolio_value * effective
//! es       = var * 1.2
//! drawdown = effective * 100 * 1.5
//! ```
//!
//! `effective` is `raw` scaled by the subject's exposure (weight, short
//! premium) for a fresh analysis, and `raw` unchanged once the user has
//! overridden the parameters.

use thiserror::Error;
use tracing::{debug, info};

use crate::types::{
    Direction, Recommendation, RiskFactor, RiskFactorKind, RiskLevel, RiskParameters, RiskReport,
    RiskSubject, Scenario, ScenarioKind, StrategySummary,
};

/// Expected shortfall as a multiple of VaR.
pub const EXPECTED_SHORTFALL_MULTIPLIER: f64 = 1.2;
/// Max drawdown as a multiple of VaR percent.
pub const MAX_DRAWDOWN_MULTIPLIER: f64 = 1.5;
/// Extra risk carried by a short position over a long one of equal weight.
pub const SHORT_PREMIUM: f64 = 1.2;

const VERY_HIGH_THRESHOLD: f64 = 0.15;
const HIGH_THRESHOLD: f64 = 0.10;
const MEDIUM_THRESHOLD: f64 = 0.05;

const BEST_CASE_IMPACT: f64 = 15.0;
const BEST_CASE_PROBABILITY: f64 = 20.0;
const BASE_CASE_PROBABILITY: f64 = 60.0;
const WORST_CASE_PROBABILITY: f64 = 20.0;

/// Risk engine errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    #[error("No symbol or strategy assets supplied")]
    MissingSubject,

    #[error("Malformed strategy payload: {0}")]
    MalformedStrategyPayload(String),

    #[error("Invalid parameter {field}: {value}")]
    InvalidParameter { field: &'static str, value: String },
}

fn invalid(field: &'static str, value: impl ToString) -> RiskError {
    RiskError::InvalidParameter {
        field,
        value: value.to_string(),
    }
}

/// Check every parameter against its allowed range.
pub fn validate_params(params: &RiskParameters) -> Result<(), RiskError> {
    let p = params;
    if !(90.0..=99.0).contains(&p.confidence_level) {
        return Err(invalid("confidenceLevel", p.confidence_level));
    }
    if p.time_horizon_days < 1 {
        return Err(invalid("timeHorizonDays", p.time_horizon_days));
    }
    if !(p.portfolio_value.is_finite() && p.portfolio_value > 0.0) {
        return Err(invalid("portfolioValue", p.portfolio_value));
    }
    if !(p.volatility > 0.0 && p.volatility <= 1.0) {
        return Err(invalid("volatility", p.volatility));
    }
    if !(0.0..=1.0).contains(&p.correlation) {
        return Err(invalid("correlation", p.correlation));
    }
    for (field, value) in [
        ("marketStress", p.market_stress),
        ("liquidityRisk", p.liquidity_risk),
        ("concentrationRisk", p.concentration_risk),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            return Err(invalid(field, value));
        }
    }
    Ok(())
}

fn validate_subject(subject: &RiskSubject) -> Result<(), RiskError> {
    if subject.symbol.trim().is_empty() {
        return Err(RiskError::MissingSubject);
    }
    if let Some(weight) = subject.weight {
        if !(0.0..=100.0).contains(&weight) {
            return Err(invalid("weight", weight));
        }
    }
    Ok(())
}

/// Unscaled VaR fraction implied by the parameters.
pub fn raw_var_fraction(params: &RiskParameters) -> f64 {
    let load = 1.0 + params.market_stress + params.liquidity_risk + params.concentration_risk;
    params.volatility * (params.time_horizon_days as f64).sqrt() * load
}

/// Multiplier applied to the raw fraction for the subject's exposure.
///
/// An absent weight means full exposure.
pub fn exposure_multiplier(subject: &RiskSubject) -> f64 {
    let weight = subject.weight.map(|w| w / 100.0).unwrap_or(1.0);
    match subject.direction {
        Direction::Long => weight,
        Direction::Short => weight * SHORT_PREMIUM,
    }
}

/// Tier and recommendation for a VaR fraction. Boundaries fall to the
/// lower tier.
pub fn classify(fraction: f64) -> (RiskLevel, Recommendation) {
    if fraction > VERY_HIGH_THRESHOLD {
        (RiskLevel::VeryHigh, Recommendation::Avoid)
    } else if fraction > HIGH_THRESHOLD {
        (RiskLevel::High, Recommendation::Sell)
    } else if fraction > MEDIUM_THRESHOLD {
        (RiskLevel::Medium, Recommendation::Hold)
    } else {
        (RiskLevel::Low, Recommendation::Buy)
    }
}

/// Fixed three-scenario table. The worst case loses the raw VaR percent.
pub fn scenarios(raw_fraction: f64) -> Vec<Scenario> {
    vec![
        Scenario {
            name: ScenarioKind::BestCase,
            probability: BEST_CASE_PROBABILITY,
            impact: BEST_CASE_IMPACT,
        },
        Scenario {
            name: ScenarioKind::BaseCase,
            probability: BASE_CASE_PROBABILITY,
            impact: 0.0,
        },
        Scenario {
            name: ScenarioKind::WorstCase,
            probability: WORST_CASE_PROBABILITY,
            impact: -raw_fraction * 100.0,
        },
    ]
}

/// Static factor breakdown; weights sum to 1.0.
pub fn risk_factors() -> Vec<RiskFactor> {
    [
        (RiskFactorKind::Market, 0.4, "Overall market movement"),
        (RiskFactorKind::Sector, 0.3, "Sector and industry specific risk"),
        (RiskFactorKind::Company, 0.2, "Company specific operating risk"),
        (RiskFactorKind::Liquidity, 0.1, "Trading liquidity of the security"),
    ]
    .into_iter()
    .map(|(factor, impact, description)| RiskFactor {
        factor,
        impact,
        description: description.to_string(),
    })
    .collect()
}

/// Analyze a subject at its own exposure (weight and direction).
pub fn analyze(subject: &RiskSubject, params: &RiskParameters) -> Result<RiskReport, RiskError> {
    validate_subject(subject)?;
    validate_params(params)?;
    Ok(build_report(subject, params, exposure_multiplier(subject)))
}

/// Analyze a subject with user-overridden parameters; exposure scaling
/// does not apply.
pub fn analyze_with_overrides(
    subject: &RiskSubject,
    params: &RiskParameters,
) -> Result<RiskReport, RiskError> {
    validate_subject(subject)?;
    validate_params(params)?;
    Ok(build_report(subject, params, 1.0))
}

/// One independent report per strategy asset.
pub fn analyze_strategy(
    subjects: &[RiskSubject],
    params: &RiskParameters,
) -> Result<Vec<RiskReport>, RiskError> {
    if subjects.is_empty() {
        return Err(RiskError::MissingSubject);
    }
    let reports = subjects
        .iter()
        .map(|s| analyze(s, params))
        .collect::<Result<Vec<_>, _>>()?;
    info!("Analyzed strategy with {} assets", reports.len());
    Ok(reports)
}

/// Strategy-level totals: summed VaR and shortfall, largest drawdown.
pub fn summarize(reports: Vec<RiskReport>) -> StrategySummary {
    let total_var = reports.iter().map(|r| r.var_value).sum();
    let total_expected_shortfall = reports.iter().map(|r| r.expected_shortfall).sum();
    let max_drawdown = reports.iter().map(|r| r.max_drawdown).reduce(f64::max);

    StrategySummary {
        reports,
        total_var,
        total_expected_shortfall,
        max_drawdown,
    }
}

fn build_report(subject: &RiskSubject, params: &RiskParameters, multiplier: f64) -> RiskReport {
    let raw = raw_var_fraction(params);
    let effective = raw * multiplier;

    let var_value = params.portfolio_value * effective;
    let var_percent = effective * 100.0;
    let (risk_level, recommendation) = classify(effective);

    debug!(
        "VaR {}: raw={:.4} effective={:.4} level={:?}",
        subject.symbol, raw, effective, risk_level
    );

    RiskReport {
        symbol: subject.symbol.clone(),
        name: subject.name.clone(),
        weight: subject.weight,
        direction: subject.direction,
        confidence_level: params.confidence_level,
        time_horizon_days: params.time_horizon_days,
        volatility_percent: params.volatility * 100.0,
        var_value,
        var_percent,
        expected_shortfall: var_value * EXPECTED_SHORTFALL_MULTIPLIER,
        max_drawdown: var_percent * MAX_DRAWDOWN_MULTIPLIER,
        risk_level,
        recommendation,
        scenarios: scenarios(raw),
        risk_factors: risk_factors(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_raw_fraction_default_params() {
        // 0.2 * 1 * (1 + 0.1 + 0.05 + 0.15)
        assert!(close(raw_var_fraction(&RiskParameters::default()), 0.26));
    }

    #[test]
    fn test_classify_boundaries_fall_low() {
        assert_eq!(classify(0.15), (RiskLevel::High, Recommendation::Sell));
        assert_eq!(classify(0.10), (RiskLevel::Medium, Recommendation::Hold));
        assert_eq!(classify(0.05), (RiskLevel::Low, Recommendation::Buy));
        assert_eq!(classify(0.1500001), (RiskLevel::VeryHigh, Recommendation::Avoid));
        assert_eq!(classify(0.0), (RiskLevel::Low, Recommendation::Buy));
    }

    #[test]
    fn test_exposure_multiplier() {
        let full = RiskSubject::single("AAPL", "Apple");
        assert!(close(exposure_multiplier(&full), 1.0));

        let weighted = RiskSubject::single("AAPL", "Apple").with_weight(25.0);
        assert!(close(exposure_multiplier(&weighted), 0.25));

        let short = RiskSubject::single("QQQ", "Nasdaq").with_weight(20.0).short();
        assert!(close(exposure_multiplier(&short), 0.24));
    }

    #[test]
    fn test_zero_weight_means_no_exposure() {
        let subject = RiskSubject::single("GLD", "Gold").with_weight(0.0);
        let report = analyze(&subject, &RiskParameters::default()).unwrap();
        assert_eq!(report.var_value, 0.0);
        assert_eq!(report.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_validate_params_ranges() {
        let ok = RiskParameters::default();
        assert!(validate_params(&ok).is_ok());

        let cases: Vec<(&str, RiskParameters)> = vec![
            ("confidenceLevel", RiskParameters { confidence_level: 89.0, ..ok }),
            ("confidenceLevel", RiskParameters { confidence_level: 99.5, ..ok }),
            ("timeHorizonDays", RiskParameters { time_horizon_days: 0, ..ok }),
            ("portfolioValue", RiskParameters { portfolio_value: 0.0, ..ok }),
            ("volatility", RiskParameters { volatility: 0.0, ..ok }),
            ("volatility", RiskParameters { volatility: 1.01, ..ok }),
            ("correlation", RiskParameters { correlation: -0.1, ..ok }),
            ("marketStress", RiskParameters { market_stress: -0.01, ..ok }),
            ("liquidityRisk", RiskParameters { liquidity_risk: f64::NAN, ..ok }),
            ("concentrationRisk", RiskParameters { concentration_risk: -1.0, ..ok }),
        ];
        for (expected, params) in cases {
            match validate_params(&params) {
                Err(RiskError::InvalidParameter { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected {} to fail, got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_rejects_out_of_range_weight() {
        let subject = RiskSubject::single("AAPL", "Apple").with_weight(150.0);
        let err = analyze(&subject, &RiskParameters::default()).unwrap_err();
        assert!(matches!(err, RiskError::InvalidParameter { field: "weight", .. }));
    }

    #[test]
    fn test_blank_symbol_is_missing_subject() {
        let subject = RiskSubject::single("  ", "Nothing");
        assert_eq!(
            analyze(&subject, &RiskParameters::default()).unwrap_err(),
            RiskError::MissingSubject
        );
    }

    #[test]
    fn test_factor_weights_sum_to_one() {
        let total: f64 = risk_factors().iter().map(|f| f.impact).sum();
        assert!(close(total, 1.0));
        assert_eq!(risk_factors().len(), 4);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(vec![]);
        assert_eq!(summary.total_var, 0.0);
        assert_eq!(summary.max_drawdown, None);
    }
}
