use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    error::AppError,
    integration::{
        firebase::{FirebaseVerifier, IdTokenVerifier},
        razorpay::{PaymentGateway, RazorpayGateway},
        sms::{LogOtpSender, OtpSender, TwilioSender},
    },
    service::{admin::AdminService, otp::OtpService},
    state::AppState,
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for Razorpay, Firebase and Twilio.
///
/// Redirects are disabled so a compromised upstream cannot bounce requests elsewhere.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(std::time::Duration::from_secs(15))
        .build()?;

    Ok(client)
}

/// Wires the optional integrations and builds the shared state.
///
/// Missing Razorpay or Firebase settings disable payments or social login; missing
/// Twilio settings make OTP codes go to the log.
pub fn build_state(
    db: DatabaseConnection,
    config: Config,
    http_client: reqwest::Client,
) -> AppState {
    let sender: Arc<dyn OtpSender> = match &config.twilio {
        Some(twilio) => Arc::new(TwilioSender::new(http_client.clone(), twilio.clone())),
        None => {
            tracing::warn!("Twilio is not configured, OTP codes are written to the log");
            Arc::new(LogOtpSender)
        }
    };

    let payment_gateway: Option<Arc<dyn PaymentGateway>> = match &config.razorpay {
        Some(razorpay) => Some(Arc::new(RazorpayGateway::new(
            http_client.clone(),
            razorpay.clone(),
        ))),
        None => {
            tracing::warn!("Razorpay is not configured, payments are disabled");
            None
        }
    };

    let id_verifier: Option<Arc<dyn IdTokenVerifier>> = config.firebase.as_ref().map(|firebase| {
        Arc::new(FirebaseVerifier::new(http_client.clone(), firebase.clone()))
            as Arc<dyn IdTokenVerifier>
    });

    let otp = OtpService::new(config.otp.clone(), sender);

    AppState::new(db, config, otp, payment_gateway, id_verifier)
}

/// Creates the configured super admin when none exists yet.
pub async fn bootstrap_super_admin(db: &DatabaseConnection, config: &Config) -> Result<(), AppError> {
    let Some(super_admin) = &config.super_admin else {
        return Ok(());
    };

    if !AdminService::new(db).bootstrap_super_admin(super_admin).await? {
        tracing::debug!("Super admin already exists, skipping bootstrap");
    }

    Ok(())
}
