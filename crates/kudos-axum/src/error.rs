//! Error types for HTTP handlers.
//!
//! Every denial is rendered with its structured fields so the client can
//! show an upgrade prompt without a second lookup.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kudos_entitlements::EntitlementError;
use serde_json::json;

/// Errors surfaced to HTTP clients
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Denial or failure from the entitlement core
    #[error(transparent)]
    Entitlement(#[from] EntitlementError),

    /// Rate limit exceeded on a public endpoint
    #[error("too many requests: retry after {retry_after_secs} seconds")]
    RateLimited {
        retry_after_secs: u64,
    },
}

impl ApiError {
    /// Create a rate limit exceeded error.
    #[must_use]
    pub fn rate_limited(retry_after_secs: u64) -> Self {
        Self::RateLimited { retry_after_secs }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Entitlement(err) => entitlement_response(err),
            Self::RateLimited { retry_after_secs } => {
                let mut response = (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({
                        "error": format!(
                            "too many requests: retry after {retry_after_secs} seconds"
                        ),
                        "code": "RATE_LIMITED",
                    })),
                )
                    .into_response();
                response.headers_mut().insert(
                    "Retry-After",
                    retry_after_secs.to_string().parse().unwrap(),
                );
                response
            }
        }
    }
}

fn entitlement_response(err: EntitlementError) -> Response {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let code = err.error_code();

    let body = match &err {
        EntitlementError::LimitExceeded {
            kind,
            current,
            limit,
            suggested_tier,
        } => json!({
            "error": err.to_string(),
            "code": code,
            "kind": kind,
            "current": current,
            "limit": limit,
            "suggested_tier": suggested_tier,
        }),
        EntitlementError::FeatureNotAvailable {
            feature,
            required_tier,
            current_tier,
        } => json!({
            "error": err.to_string(),
            "code": code,
            "feature": feature,
            "required_tier": required_tier,
            "current_tier": current_tier,
        }),
        EntitlementError::Database(e) => {
            tracing::error!(error = %e, "store failure during entitlement check");
            json!({
                "error": "internal error",
                "code": code,
            })
        }
        _ => json!({
            "error": err.to_string(),
            "code": code,
        }),
    };

    (status, Json(body)).into_response()
}
