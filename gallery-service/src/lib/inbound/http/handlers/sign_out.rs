use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::middleware::AuthenticatedSession;
use crate::inbound::http::router::AppState;

/// Invalidate the presented token for the rest of its lifetime.
///
/// Logout is itself an authenticated action: the middleware has already
/// verified the token, so its id and expiry in the extension are trusted.
pub async fn sign_out(
    State(state): State<AppState>,
    Extension(session): Extension<AuthenticatedSession>,
) -> Result<ApiSuccess<SignOutResponseData>, ApiError> {
    state
        .session_service
        .logout(&session.token_id, session.expires_at)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        SignOutResponseData {
            message: "Signed out".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignOutResponseData {
    pub message: String,
}
