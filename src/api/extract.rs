//! Request extractors that fail with the response envelope.
//!
//! axum's stock `Json` and `Query` rejections answer in plain text. These
//! wrappers turn them into `AppError` so every failure carries the
//! `{code, message, data, success}` body.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::services::RiskError;

/// Query string extractor. Undecodable parameters are a 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: QueryRejection| AppError::BadRequest(e.body_text()))?;
        Ok(Self(value))
    }
}

/// JSON body extractor. Undecodable bodies are a 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(Self(value))
    }
}

/// JSON body carrying strategy assets. A body that is not valid JSON, or
/// whose assets do not decode, is a malformed strategy payload (422).
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for StrategyJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(strategy_rejection)?;
        Ok(Self(value))
    }
}

fn strategy_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            RiskError::MalformedStrategyPayload(rejection.body_text()).into()
        }
        other => AppError::BadRequest(other.body_text()),
    }
}
