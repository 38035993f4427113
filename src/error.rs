use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::services::{QueryError, RiskError, SessionError};
use crate::types::ApiResponse;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Risk(#[from] RiskError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Query(QueryError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Query(QueryError::InvalidParameter { .. }) => StatusCode::BAD_REQUEST,
            AppError::Risk(RiskError::MalformedStrategyPayload(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Risk(_) => StatusCode::BAD_REQUEST,
            AppError::Session(SessionError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Session(SessionError::Risk(RiskError::MalformedStrategyPayload(_))) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Session(SessionError::Risk(_)) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!("Request failed ({}): {}", status.as_u16(), self);

        let body = Json(ApiResponse::<()>::error(status.as_u16(), self.to_string()));
        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
