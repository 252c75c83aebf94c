mod model;
mod server;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::server::{
    config::Config, error::AppError, router, scheduler::maintenance, startup,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    startup::bootstrap_super_admin(&db, &config).await?;

    let bind_address = config.bind_address();
    let state = startup::build_state(db, config, http_client);

    // Start maintenance scheduler
    let scheduler_db = state.db.clone();
    let scheduler_config = state.config.clone();
    let scheduler_otp = state.otp.clone();
    tokio::spawn(async move {
        if let Err(e) =
            maintenance::start_scheduler(scheduler_db, scheduler_config, scheduler_otp).await
        {
            tracing::error!("Maintenance scheduler error: {}", e);
        }
    });

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Listening on {}", bind_address);

    axum::serve(listener, router::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Logs as JSON when `LOG_FORMAT=json`, otherwise human-readable. `RUST_LOG` overrides
/// the default filter.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sea_orm=warn"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
