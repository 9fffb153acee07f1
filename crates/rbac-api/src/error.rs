// ============================================================================
// RBAC API - Error Mapping
// File: crates/rbac-api/src/error.rs
// ============================================================================
//! Every rejection leaves the API as a failed `ResponseEnvelope`.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::ValidationErrors;

use rbac_core::{DomainError, ResponseEnvelope};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Too many requests")]
    RateLimited,

    /// Model-state failure. Answered with 200 and the list of violations.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Flattens validator output into `"field: message"` strings, ordered by
/// field name.
pub fn model_state_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, envelope) = match self {
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, ResponseEnvelope::<()>::fail(msg))
            }
            ApiError::Forbidden(msg) => {
                tracing::warn!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, ResponseEnvelope::fail(msg))
            }
            ApiError::RateLimited => {
                tracing::warn!("Rate limit exceeded");
                let body = Json(ResponseEnvelope::<()>::fail("Too many requests."));
                return (
                    StatusCode::TOO_MANY_REQUESTS,
                    [(header::RETRY_AFTER, "1")],
                    body,
                )
                    .into_response();
            }
            ApiError::Validation(errors) => {
                let errors = model_state_errors(&errors);
                tracing::warn!("Model validation rejected: {} error(s)", errors.len());
                (StatusCode::OK, ResponseEnvelope::fail_with_errors(errors))
            }
            ApiError::Domain(DomainError::Conflict(msg)) => {
                tracing::warn!("Conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ResponseEnvelope::fail("The record was changed by another request."),
                )
            }
            ApiError::Domain(err) => {
                tracing::error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ResponseEnvelope::fail("An unexpected error occurred."),
                )
            }
        };

        (status, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(range(min = 1))]
        size: u32,
    }

    #[test]
    fn test_model_state_errors_are_sorted_by_field() {
        let sample = Sample {
            name: String::new(),
            size: 0,
        };
        let errors = sample.validate().unwrap_err();
        assert_eq!(
            model_state_errors(&errors),
            vec!["Name is required".to_string(), "size is invalid".to_string()]
        );
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (ApiError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (ApiError::RateLimited, StatusCode::TOO_MANY_REQUESTS),
            (
                ApiError::Domain(DomainError::Conflict("dup".into())),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::Domain(DomainError::DatabaseError("down".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }
}
