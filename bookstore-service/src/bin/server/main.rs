use std::sync::Arc;

use auth::Authenticator;
use bookstore_service::config::Config;
use bookstore_service::domain::principal::ports::AuthServicePort;
use bookstore_service::domain::principal::service::AuthService;
use bookstore_service::inbound::http::router::create_router;
use bookstore_service::outbound::repositories::InMemoryPrincipalRepository;
use bookstore_service::outbound::repositories::PostgresPrincipalRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookstore_service=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "bookstore-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    // Fatal before anything binds: never sign with an absent or empty key.
    let signing = config.jwt.signing_config().map_err(|e| {
        tracing::error!(error = %e, "Invalid signing configuration");
        e
    })?;
    let token_ttl = config.jwt.token_ttl().map_err(|e| {
        tracing::error!(error = %e, "Invalid token lifetime");
        e
    })?;

    let persistence = if config.database.is_some() {
        "postgresql"
    } else {
        "memory"
    };
    tracing::info!(
        http_port = config.server.http_port,
        jwt_algorithm = ?signing.algorithm(),
        jwt_expiration_minutes = config.jwt.expiration_minutes,
        persistence,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(&signing, token_ttl));

    let auth_service: Arc<dyn AuthServicePort> = match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = 5,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let repository = Arc::new(PostgresPrincipalRepository::new(pg_pool));
            Arc::new(AuthService::new(repository, Arc::clone(&authenticator)))
        }
        None => {
            tracing::warn!("No database configured, principals are kept in memory");
            let repository = Arc::new(InMemoryPrincipalRepository::new());
            Arc::new(AuthService::new(repository, Arc::clone(&authenticator)))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service)).await?;
    tracing::info!("Server exited successfully");

    Ok(())
}
