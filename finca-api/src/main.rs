use anyhow::Context;
use finca_api::{app, AppState};
use finca_store::app_config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finca_api=debug,finca_booking=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!(
        "Starting Finca API on {}:{} (strict dates: {})",
        config.server.host,
        config.server.port,
        config.business_rules.strict_date_range
    );

    let app = app(AppState::from_config(&config));

    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.server.host, config.server.port))?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    tracing::info!("Studios endpoint: /api/studios, bookings endpoint: /api/bookings");

    axum::serve(listener, app).await?;
    Ok(())
}
