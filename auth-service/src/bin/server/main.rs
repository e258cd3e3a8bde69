use std::sync::Arc;

use anyhow::Context;
use auth::TokenIssuer;
use auth_service::config::Config;
use auth_service::config::JwtConfig;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::password::Argon2PasswordVerifier;
use auth_service::outbound::repositories::PostgresCredentialStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        "Configuration loaded"
    );

    if config.jwt.secret.len() < JwtConfig::RECOMMENDED_SECRET_LEN {
        tracing::warn!(
            secret_len = config.jwt.secret.len(),
            recommended = JwtConfig::RECOMMENDED_SECRET_LEN,
            "JWT secret is shorter than recommended for HS512"
        );
    }

    let token_issuer = Arc::new(
        TokenIssuer::new(config.jwt.secret.as_bytes(), config.jwt.validity())
            .context("Invalid JWT configuration")?,
    );
    tracing::info!(
        algorithm = "HS512",
        validity_secs = token_issuer.validity().as_secs(),
        "Token issuer ready"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let credential_store = Arc::new(PostgresCredentialStore::new(pg_pool));
    let password_verifier = Arc::new(Argon2PasswordVerifier::default());

    let auth_service = Arc::new(AuthService::new(
        credential_store,
        password_verifier,
        token_issuer,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
