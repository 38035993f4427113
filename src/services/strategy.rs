//! Strategy payload codec
//!
//! Strategies travel between views as a JSON array of assets, or in the
//! legacy form as a comma-separated symbol list.

use crate::services::risk::RiskError;
use crate::types::{RiskSubject, StrategyAsset};

/// Decode a JSON strategy payload into analysis subjects.
pub fn decode_strategy_payload(json: &str) -> Result<Vec<RiskSubject>, RiskError> {
    let assets: Vec<StrategyAsset> = serde_json::from_str(json)
        .map_err(|e| RiskError::MalformedStrategyPayload(e.to_string()))?;
    if assets.is_empty() {
        return Err(RiskError::MissingSubject);
    }
    Ok(assets.into_iter().map(RiskSubject::from).collect())
}

/// Encode strategy assets into the JSON payload `decode_strategy_payload`
/// accepts.
pub fn encode_strategy_payload(assets: &[StrategyAsset]) -> Result<String, RiskError> {
    serde_json::to_string(assets).map_err(|e| RiskError::MalformedStrategyPayload(e.to_string()))
}

/// Parse the legacy `assets=A,B` form. Names are positional placeholders
/// and weights are absent.
pub fn parse_legacy_symbols(list: &str) -> Result<Vec<RiskSubject>, RiskError> {
    let subjects: Vec<RiskSubject> = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(i, symbol)| RiskSubject::single(symbol, format!("Strategy asset {}", i + 1)))
        .collect();

    if subjects.is_empty() {
        return Err(RiskError::MissingSubject);
    }
    Ok(subjects)
}
