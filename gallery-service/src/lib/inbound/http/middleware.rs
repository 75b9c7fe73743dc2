use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::session::models::TokenId;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::session::errors::SessionError;
use crate::session::ports::SessionServicePort;

/// Extension type carrying the verified session in request extensions.
///
/// The token id and expiry ride along so a sign-out later in the same
/// request can revoke the token without re-decoding it.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub user_id: UserId,
    pub token_id: TokenId,
    pub expires_at: DateTime<Utc>,
}

/// Middleware that verifies bearer tokens and adds session info to request
/// extensions.
///
/// Verification (signature, expiry, revocation lookup) is delegated to the
/// session service; a revoked token and an unreachable revocation store map
/// to distinct responses, everything else collapses to one unauthorized
/// answer.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Extract token from Authorization header
    let token = extract_token_from_header(&req)?;

    let session = state
        .session_service
        .verify(token)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    req.extensions_mut().insert(AuthenticatedSession {
        user_id: session.user_id,
        token_id: session.token_id,
        expires_at: session.expires_at,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::from(SessionError::MissingCredential).into_response())?;

    let auth_str = auth_header.to_str().map_err(|_| {
        ApiError::Unauthorized("Invalid Authorization header".to_string()).into_response()
    })?;

    if !auth_str.starts_with("Bearer ") {
        return Err(ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
        .into_response());
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
