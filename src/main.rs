//! CounselHub server binary.
//!
//! Loads configuration, connects PostgreSQL, wires the adapters into the
//! shared API state, and serves the HTTP API.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use counselhub::adapters::email::{ResendConfig, ResendEmailSender};
use counselhub::adapters::http::ApiState;
use counselhub::adapters::postgres::{
    PostgresAppointmentRepository, PostgresAvailabilityRepository, PostgresPaymentRepository,
    PostgresUserDirectory,
};
use counselhub::adapters::razorpay::{RazorpayConfig, RazorpayGateway};
use counselhub::adapters::storage::LocalFileStorage;
use counselhub::app::build_router;
use counselhub::application::notifications::NotificationDispatcher;
use counselhub::config::AppConfig;
use counselhub::domain::payment::PaymentSignatureVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let email_sender = Arc::new(ResendEmailSender::new(ResendConfig::new(
        config.email.resend_api_key.clone(),
        config.email.from_header(),
    )));
    let gateway = Arc::new(RazorpayGateway::new(RazorpayConfig::new(
        config.payment.razorpay_key_id.clone(),
        config.payment.razorpay_key_secret.clone(),
    )));

    let state = ApiState {
        appointments: Arc::new(PostgresAppointmentRepository::new(pool.clone())),
        availability: Arc::new(PostgresAvailabilityRepository::new(pool.clone())),
        payments: Arc::new(PostgresPaymentRepository::new(pool.clone())),
        gateway,
        directory: Arc::new(PostgresUserDirectory::new(pool.clone())),
        storage: Arc::new(LocalFileStorage::new(
            config.storage.upload_dir.clone(),
            config.storage.public_base.clone(),
        )),
        dispatcher: Arc::new(NotificationDispatcher::new(email_sender)),
        verifier: Arc::new(PaymentSignatureVerifier::new(
            config.payment.razorpay_key_secret.clone(),
        )),
        currency: config.payment.currency.clone(),
    };

    let app = build_router(state, &config.server, &config.storage);

    let addr = config.server.socket_addr()?;
    info!(%addr, environment = ?config.server.environment, "counselhub listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
