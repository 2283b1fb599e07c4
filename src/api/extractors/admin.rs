use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::warn;

pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Proof that the request carried the shared admin secret.
pub struct AdminUser;

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let supplied = parts.headers.get(ADMIN_PASSWORD_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        if supplied != state.config.admin_password {
            warn!(path = %parts.uri.path(), "rejected admin request with wrong password");
            return Err(AppError::Unauthorized);
        }

        Ok(AdminUser)
    }
}
