use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_post::create_post;
use super::handlers::list_posts::list_posts;
use super::handlers::register_user::register_user;
use super::handlers::sign_in::sign_in;
use super::handlers::sign_out::sign_out;
use super::middleware::authenticate as auth_middleware;
use crate::domain::post::service::PostService;
use crate::domain::session::service::SessionService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::post::PostgresPostRepository;
use crate::outbound::repositories::revoked_token::PostgresRevokedTokenRepository;
use crate::outbound::repositories::user::PostgresUserRepository;

/// Upload size cap: 5 MiB
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PostgresUserRepository>>,
    pub session_service: Arc<SessionService<PostgresRevokedTokenRepository>>,
    pub post_service: Arc<PostService<PostgresPostRepository>>,
    pub uploads_dir: Arc<PathBuf>,
}

pub fn create_router(
    user_service: Arc<UserService<PostgresUserRepository>>,
    session_service: Arc<SessionService<PostgresRevokedTokenRepository>>,
    post_service: Arc<PostService<PostgresPostRepository>>,
    uploads_dir: PathBuf,
) -> Router {
    let state = AppState {
        user_service,
        session_service,
        post_service,
        uploads_dir: Arc::new(uploads_dir.clone()),
    };

    let public_routes = Router::new()
        .route("/api/users", post(register_user))
        .route("/api/sign-in", post(sign_in))
        .route(
            "/api/posts",
            get(list_posts).merge(
                post(create_post)
                    .route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        auth_middleware,
                    ))
                    .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
            ),
        );

    let protected_routes = Router::new()
        .route("/api/sign-out", post(sign_out))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Spans deliberately omit request headers: bearer tokens must never be
    // logged.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
