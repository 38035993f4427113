//! Risk API
//!
//! Analysis:
//! - GET /api/risk/analyze?symbol=&name= - Single security
//! - GET /api/risk/analyze?strategy=&assetsData= - Strategy from JSON assets
//! - GET /api/risk/analyze?strategy=&assets=A,B - Strategy from a symbol list
//! - POST /api/risk/strategy - Strategy summary from a JSON body
//!
//! Sessions:
//! - POST /api/risk/sessions - Open a session
//! - GET /api/risk/sessions/:id - Session state
//! - DELETE /api/risk/sessions/:id - Close a session
//! - PUT /api/risk/sessions/:id/params - Stage parameter edits
//! - POST /api/risk/sessions/:id/recompute - Apply staged parameters
//! - POST /api/risk/sessions/:id/reset - Restore default parameters

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::extract::{ApiJson, ApiQuery, StrategyJson};
use crate::error::Result;
use crate::services::{
    analyze, analyze_strategy, decode_strategy_payload, parse_legacy_symbols, summarize,
    RiskError, SessionSnapshot,
};
use crate::types::{
    ApiResponse, Direction, PartialRiskParameters, RiskParameters, RiskReport, RiskSubject,
    StrategyAsset, StrategySummary,
};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze", get(get_analysis))
        .route("/strategy", post(post_strategy))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(get_session).delete(close_session))
        .route("/sessions/:id/params", put(update_params))
        .route("/sessions/:id/recompute", post(recompute_session))
        .route("/sessions/:id/reset", post(reset_session))
}

// =============================================================================
// Request / Response Types
// =============================================================================

/// Where the analysis subjects come from. Strategy payloads take
/// precedence over the legacy symbol list, which takes precedence over a
/// single symbol.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectQuery {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub weight: Option<f64>,
    pub direction: Option<Direction>,
    /// Strategy display name
    pub strategy: Option<String>,
    /// JSON array of strategy assets
    pub assets_data: Option<String>,
    /// Legacy comma-separated symbol list
    pub assets: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl SubjectQuery {
    pub fn is_strategy(&self) -> bool {
        non_blank(&self.assets_data).is_some() || non_blank(&self.assets).is_some()
    }

    pub fn resolve(&self) -> std::result::Result<Vec<RiskSubject>, RiskError> {
        if let Some(json) = non_blank(&self.assets_data) {
            return decode_strategy_payload(json);
        }
        if let Some(list) = non_blank(&self.assets) {
            return parse_legacy_symbols(list);
        }
        let symbol = non_blank(&self.symbol).ok_or(RiskError::MissingSubject)?;
        let name = non_blank(&self.name).unwrap_or(symbol);
        Ok(vec![RiskSubject {
            symbol: symbol.to_string(),
            name: name.to_string(),
            weight: self.weight,
            direction: self.direction.unwrap_or_default(),
        }])
    }
}

/// A single report, or a strategy summary.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Analysis {
    Single(RiskReport),
    Strategy(StrategySummary),
}

#[derive(Debug, Deserialize)]
pub struct StrategyRequest {
    pub assets: Vec<StrategyAsset>,
    #[serde(default)]
    pub params: Option<PartialRiskParameters>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(flatten)]
    pub source: SubjectQuery,
    /// Structured alternative to `assetsData`
    #[serde(default)]
    pub strategy_assets: Option<Vec<StrategyAsset>>,
    #[serde(default)]
    pub params: Option<PartialRiskParameters>,
}

fn params_with(defaults: RiskParameters, edit: Option<&PartialRiskParameters>) -> RiskParameters {
    let mut params = defaults;
    if let Some(edit) = edit {
        edit.apply_to(&mut params);
    }
    params
}

// =============================================================================
// Analysis Handlers
// =============================================================================

/// GET /api/risk/analyze
async fn get_analysis(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SubjectQuery>,
) -> Result<Json<ApiResponse<Analysis>>> {
    let params = state.config.risk_defaults;
    let subjects = query.resolve()?;

    let analysis = if query.is_strategy() {
        info!(
            "Analyzing strategy {:?} ({} assets)",
            query.strategy.as_deref().unwrap_or("unnamed"),
            subjects.len()
        );
        Analysis::Strategy(summarize(analyze_strategy(&subjects, &params)?))
    } else {
        let subject = subjects.first().ok_or(RiskError::MissingSubject)?;
        Analysis::Single(analyze(subject, &params)?)
    };

    Ok(Json(ApiResponse::ok(analysis, "Risk analysis complete")))
}

/// POST /api/risk/strategy
async fn post_strategy(
    State(state): State<AppState>,
    StrategyJson(request): StrategyJson<StrategyRequest>,
) -> Result<Json<ApiResponse<StrategySummary>>> {
    let params = params_with(state.config.risk_defaults, request.params.as_ref());
    let subjects: Vec<RiskSubject> = request.assets.into_iter().map(RiskSubject::from).collect();
    let summary = summarize(analyze_strategy(&subjects, &params)?);
    Ok(Json(ApiResponse::ok(summary, "Strategy analysis complete")))
}

// =============================================================================
// Session Handlers
// =============================================================================

/// POST /api/risk/sessions
async fn create_session(
    State(state): State<AppState>,
    StrategyJson(request): StrategyJson<CreateSessionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SessionSnapshot>>)> {
    let subjects = match request.strategy_assets {
        Some(assets) => assets.into_iter().map(RiskSubject::from).collect(),
        None => request.source.resolve()?,
    };
    let params = params_with(state.sessions.defaults(), request.params.as_ref());
    let snapshot = state.sessions.create(subjects, Some(params))?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::created(snapshot, "Risk session created")),
    ))
}

/// GET /api/risk/sessions/:id
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SessionSnapshot>>> {
    let snapshot = state.sessions.get(&id)?;
    Ok(Json(ApiResponse::ok(snapshot, "Risk session fetched")))
}

/// DELETE /api/risk/sessions/:id
async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    state.sessions.remove(&id)?;
    Ok(Json(ApiResponse::ok((), "Risk session closed")))
}

/// PUT /api/risk/sessions/:id/params
async fn update_params(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(edit): ApiJson<PartialRiskParameters>,
) -> Result<Json<ApiResponse<SessionSnapshot>>> {
    let snapshot = state.sessions.set_params(&id, &edit)?;
    Ok(Json(ApiResponse::ok(snapshot, "Parameters staged")))
}

/// POST /api/risk/sessions/:id/recompute
async fn recompute_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SessionSnapshot>>> {
    let snapshot = state.sessions.recompute(&id)?;
    Ok(Json(ApiResponse::ok(snapshot, "Risk session recomputed")))
}

/// POST /api/risk/sessions/:id/reset
async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SessionSnapshot>>> {
    let snapshot = state.sessions.reset(&id)?;
    Ok(Json(ApiResponse::ok(snapshot, "Parameters reset")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_single() {
        let q = SubjectQuery {
            symbol: Some("AAPL".to_string()),
            ..Default::default()
        };
        let subjects = q.resolve().unwrap();
        assert_eq!(subjects[0].name, "AAPL");
        assert!(!q.is_strategy());
    }

    #[test]
    fn test_resolve_prefers_assets_data() {
        let q = SubjectQuery {
            symbol: Some("AAPL".to_string()),
            assets: Some("MSFT".to_string()),
            assets_data: Some(
                r#"[{"symbol":"SPY","name":"S&P 500","position":100,"type":"long"}]"#.to_string(),
            ),
            ..Default::default()
        };
        let subjects = q.resolve().unwrap();
        assert_eq!(subjects[0].symbol, "SPY");
        assert!(q.is_strategy());
    }

    #[test]
    fn test_resolve_nothing() {
        let q = SubjectQuery {
            symbol: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(q.resolve().unwrap_err(), RiskError::MissingSubject);
    }

    #[test]
    fn test_params_with_edit() {
        let edit = PartialRiskParameters {
            time_horizon_days: Some(5),
            ..Default::default()
        };
        let params = params_with(RiskParameters::default(), Some(&edit));
        assert_eq!(params.time_horizon_days, 5);
        assert_eq!(params.volatility, 0.2);
    }
}
