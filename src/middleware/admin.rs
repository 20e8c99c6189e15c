// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin password middleware.

use crate::error::AppError;
use crate::services::pin::secrets_match;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Header carrying the shared admin password.
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Require the configured admin password for `/api/admin/*` routes.
///
/// With no password configured every admin request is rejected.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.config.admin_password.as_deref() else {
        tracing::warn!("Blocked admin request: no admin password configured");
        return Err(AppError::Unauthorized);
    };

    let presented = request
        .headers()
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    if presented.is_empty() || !secrets_match(presented, expected) {
        tracing::warn!(
            path = %request.uri().path(),
            "Blocked admin request with invalid password"
        );
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
