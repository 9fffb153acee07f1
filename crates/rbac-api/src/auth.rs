// ============================================================================
// RBAC API - Bearer Authentication
// File: crates/rbac-api/src/auth.rs
// ============================================================================
//! `AuthUser` extractor: validates the bearer token and resolves the caller's
//! IP address.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use tracing::warn;

use rbac_security::JwtError;

use crate::error::ApiError;
use crate::state::AppState;

const FORWARDED_FOR: &str = "x-forwarded-for";
const REAL_IP: &str = "x-real-ip";

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub organization_id: String,
    pub user_type: String,
    pub permissions: Vec<String>,
    pub ip_address: String,
}

impl AuthUser {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    /// Rejects with 403 when the claim is missing.
    pub fn require(&self, permission: &str) -> Result<(), ApiError> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            warn!("User {} lacks claim {}", self.user_id, permission);
            Err(ApiError::Forbidden(format!("Missing permission {}", permission)))
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// First `x-forwarded-for` hop, then `x-real-ip`, then the socket peer.
fn client_ip(parts: &Parts) -> String {
    let header_value = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    header_value(FORWARDED_FOR)
        .or_else(|| header_value(REAL_IP))
        .or_else(|| {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_default()
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

        let claims = state.jwt.validate_token(token).map_err(|e| match e {
            JwtError::TokenExpired => ApiError::Unauthorized("Token expired".to_string()),
            other => ApiError::Unauthorized(other.to_string()),
        })?;

        Ok(AuthUser {
            ip_address: client_ip(parts),
            user_id: claims.sub,
            organization_id: claims.org,
            user_type: claims.user_type,
            permissions: claims.permissions,
        })
    }
}
