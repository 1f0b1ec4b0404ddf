use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitaplan_core::otp::{InMemoryOtpStore, OtpStore};

use vitaplan_api::config::ServerConfig;
use vitaplan_api::notifications::mailer::{EmailConfig, OtpMailer};
use vitaplan_api::router::build_app_router;
use vitaplan_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitaplan_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = vitaplan_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    vitaplan_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    vitaplan_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- OTP store + mailer ---
    let otp_store: Arc<dyn OtpStore> = Arc::new(InMemoryOtpStore::new());
    let mailer = EmailConfig::from_env().map(|cfg| Arc::new(OtpMailer::new(cfg)));
    if mailer.is_none() {
        tracing::warn!("SMTP_HOST not set; OTP codes will be logged instead of emailed");
    }

    // --- Router ---
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid HOST/PORT combination");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        otp_store,
        mailer,
    };
    let app = build_app_router(state, &config);

    // --- Serve ---
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
