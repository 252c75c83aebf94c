use std::sync::Arc;

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    config::Config,
    data::refresh_token::RefreshTokenRepository,
    error::AppError,
    service::{booking::BookingService, otp::OtpService},
};

/// Revoked or expired refresh tokens are kept this long before deletion.
const REFRESH_TOKEN_RETENTION_DAYS: i64 = 1;

/// Starts the maintenance scheduler
///
/// This scheduler runs every minute and:
/// - Cancels bookings whose payment window has lapsed
/// - Deletes refresh tokens that expired or were revoked over a day ago
/// - Drops expired OTP codes from memory
///
/// # Arguments
/// - `db`: Database connection
/// - `config`: Application configuration, for the payment timeout
/// - `otp`: OTP service sharing the code store with the request handlers
pub async fn start_scheduler(
    db: DatabaseConnection,
    config: Arc<Config>,
    otp: OtpService,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let db = db.clone();
        let payment_timeout = Duration::minutes(config.booking_payment_timeout_mins);
        let otp = otp.clone();

        Box::pin(async move {
            if let Err(e) = run_maintenance(&db, payment_timeout, &otp).await {
                tracing::error!("Error running maintenance: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Maintenance scheduler started");

    Ok(())
}

/// Runs one maintenance pass. Each step logs its own failure so the others still run.
pub async fn run_maintenance(
    db: &DatabaseConnection,
    payment_timeout: Duration,
    otp: &OtpService,
) -> Result<(), AppError> {
    let now = Utc::now();

    match BookingService::new(db)
        .expire_stale(now - payment_timeout)
        .await
    {
        Ok(0) => {}
        Ok(expired) => tracing::info!("Expired {} unpaid booking(s)", expired),
        Err(e) => tracing::error!("Error expiring bookings: {}", e),
    }

    match RefreshTokenRepository::new(db)
        .purge_before(now - Duration::days(REFRESH_TOKEN_RETENTION_DAYS))
        .await
    {
        Ok(0) => {}
        Ok(purged) => tracing::debug!("Purged {} refresh token(s)", purged),
        Err(e) => tracing::error!("Error purging refresh tokens: {}", e),
    }

    let dropped = otp.purge_expired().await;
    if dropped > 0 {
        tracing::debug!("Dropped {} expired OTP code(s)", dropped);
    }

    Ok(())
}
