/**
 * Risk Sessions
 *
 * Server-held parameter controls for an analysis. Parameter edits are
 * staged as pending and only take effect on an explicit recompute, which
 * builds a complete new report set and swaps it in. Readers always see
 * either the old set or the new one.
 */

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::services::risk::{self, RiskError};
use crate::types::{
    PartialRiskParameters, RiskParameters, RiskReport, RiskSubject, StrategySummary,
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Risk session not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Risk(#[from] RiskError),
}

/// One analysis with its committed and pending parameters.
#[derive(Debug, Clone)]
pub struct RiskSession {
    pub id: String,
    pub subjects: Vec<RiskSubject>,
    /// Parameters the current reports were computed with
    pub params: RiskParameters,
    /// Edited parameters awaiting recompute
    pub pending: RiskParameters,
    pub reports: Arc<Vec<RiskReport>>,
    pub created_at: DateTime<Utc>,
    pub computed_at: DateTime<Utc>,
}

impl RiskSession {
    /// Open a session. The first report set is exposure-scaled.
    pub fn open(
        id: String,
        subjects: Vec<RiskSubject>,
        params: RiskParameters,
    ) -> Result<Self, RiskError> {
        let reports = risk::analyze_strategy(&subjects, &params)?;
        let now = Utc::now();
        Ok(Self {
            id,
            subjects,
            params,
            pending: params,
            reports: Arc::new(reports),
            created_at: now,
            computed_at: now,
        })
    }

    /// Stage a parameter edit. Reports are untouched.
    pub fn set_params(&mut self, edit: &PartialRiskParameters) {
        edit.apply_to(&mut self.pending);
    }

    /// Restore default pending parameters. Reports are untouched.
    pub fn reset(&mut self, defaults: RiskParameters) {
        self.pending = defaults;
    }

    /// Rebuild every report from the pending parameters and commit them.
    ///
    /// On error the session keeps its previous parameters and reports.
    pub fn recompute(&mut self) -> Result<(), RiskError> {
        risk::validate_params(&self.pending)?;
        let reports = self
            .subjects
            .iter()
            .map(|s| risk::analyze_with_overrides(s, &self.pending))
            .collect::<Result<Vec<_>, _>>()?;

        self.reports = Arc::new(reports);
        self.params = self.pending;
        self.computed_at = Utc::now();
        Ok(())
    }

    pub fn has_pending_changes(&self) -> bool {
        self.pending != self.params
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id.clone(),
            subjects: self.subjects.clone(),
            params: self.params,
            pending: self.pending,
            has_pending_changes: self.has_pending_changes(),
            reports: self.reports.as_ref().clone(),
            summary: risk::summarize(self.reports.as_ref().clone()).into(),
            created_at: self.created_at,
            computed_at: self.computed_at,
        }
    }
}

/// Serializable view of a session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: String,
    pub subjects: Vec<RiskSubject>,
    pub params: RiskParameters,
    pub pending: RiskParameters,
    pub has_pending_changes: bool,
    pub reports: Vec<RiskReport>,
    pub summary: SessionTotals,
    pub created_at: DateTime<Utc>,
    pub computed_at: DateTime<Utc>,
}

/// Strategy totals without the per-asset reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTotals {
    pub total_var: f64,
    pub total_expected_shortfall: f64,
    pub max_drawdown: Option<f64>,
}

impl From<StrategySummary> for SessionTotals {
    fn from(summary: StrategySummary) -> Self {
        Self {
            total_var: summary.total_var,
            total_expected_shortfall: summary.total_expected_shortfall,
            max_drawdown: summary.max_drawdown,
        }
    }
}

// =============================================================================
// Session store
// =============================================================================

/// Concurrent registry of risk sessions.
#[derive(Clone)]
pub struct RiskSessionStore {
    sessions: Arc<DashMap<String, RiskSession>>,
    defaults: RiskParameters,
}

impl RiskSessionStore {
    pub fn new(defaults: RiskParameters) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            defaults,
        }
    }

    pub fn defaults(&self) -> RiskParameters {
        self.defaults
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Create a session and compute its first report set.
    pub fn create(
        &self,
        subjects: Vec<RiskSubject>,
        params: Option<RiskParameters>,
    ) -> Result<SessionSnapshot, SessionError> {
        let id = uuid::Uuid::new_v4().to_string();
        let session = RiskSession::open(id.clone(), subjects, params.unwrap_or(self.defaults))?;
        let snapshot = session.snapshot();
        self.sessions.insert(id.clone(), session);
        info!("Opened risk session {} ({} subjects)", id, snapshot.subjects.len());
        Ok(snapshot)
    }

    pub fn get(&self, id: &str) -> Result<SessionSnapshot, SessionError> {
        self.sessions
            .get(id)
            .map(|s| s.snapshot())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    pub fn set_params(
        &self,
        id: &str,
        edit: &PartialRiskParameters,
    ) -> Result<SessionSnapshot, SessionError> {
        self.with_session(id, |s| {
            s.set_params(edit);
            debug!("Session {} pending params updated", s.id);
            Ok(())
        })
    }

    pub fn recompute(&self, id: &str) -> Result<SessionSnapshot, SessionError> {
        self.with_session(id, |s| {
            s.recompute()?;
            info!("Session {} recomputed {} reports", s.id, s.reports.len());
            Ok(())
        })
    }

    pub fn reset(&self, id: &str) -> Result<SessionSnapshot, SessionError> {
        let defaults = self.defaults;
        self.with_session(id, |s| {
            s.reset(defaults);
            debug!("Session {} pending params reset", s.id);
            Ok(())
        })
    }

    /// Close a session and drop its reports.
    pub fn remove(&self, id: &str) -> Result<RiskSession, SessionError> {
        let (_, session) = self
            .sessions
            .remove(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        info!("Closed risk session {}", id);
        Ok(session)
    }

    fn with_session<F>(&self, id: &str, f: F) -> Result<SessionSnapshot, SessionError>
    where
        F: FnOnce(&mut RiskSession) -> Result<(), RiskError>,
    {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        f(session.value_mut())?;
        Ok(session.snapshot())
    }
}
