use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use gallery_service::config::Config;
use gallery_service::domain::post::service::PostService;
use gallery_service::domain::session::ports::SessionServicePort;
use gallery_service::domain::session::service::SessionService;
use gallery_service::domain::user::service::UserService;
use gallery_service::inbound::http::router::create_router;
use gallery_service::outbound::repositories::PostgresPostRepository;
use gallery_service::outbound::repositories::PostgresRevokedTokenRepository;
use gallery_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Interval between revocation-store purge runs.
const PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gallery_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "gallery-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    // Fails fast when the signing secret is absent; nothing below runs
    // without it.
    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        uploads_dir = %config.storage.uploads_dir,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let uploads_dir = PathBuf::from(&config.storage.uploads_dir);
    tokio::fs::create_dir_all(&uploads_dir).await?;

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let post_repository = Arc::new(PostgresPostRepository::new(pg_pool.clone()));
    let revoked_token_repository = Arc::new(PostgresRevokedTokenRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(
        user_repository,
        Arc::clone(&authenticator),
    ));
    let session_service = Arc::new(SessionService::new(
        Arc::clone(&authenticator),
        revoked_token_repository,
    ));
    let post_service = Arc::new(PostService::new(post_repository));

    // Revocation records for naturally-expired tokens are dead weight;
    // sweep them on a schedule.
    let purge_service = Arc::clone(&session_service);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            match purge_service.purge_expired().await {
                Ok(count) => {
                    tracing::info!(removed = count, "Purged expired revocation records")
                }
                Err(e) => tracing::error!(error = %e, "Revocation purge failed"),
            }
        }
    });

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, session_service, post_service, uploads_dir);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
