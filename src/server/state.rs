//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - Loaded configuration (JWT secrets, currency, timeouts)
//! - OTP service with its in-process code store
//! - Optional payment gateway and social ID token verifier

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::{
    config::Config,
    error::payment::PaymentError,
    integration::{firebase::IdTokenVerifier, razorpay::PaymentGateway},
    service::otp::OtpService,
};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `Config` and the integrations sit behind an `Arc`
/// - `OtpService` shares its code store between clones
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    pub config: Arc<Config>,

    /// Issues and verifies one-time codes. Codes live in memory, so every request must
    /// hit the same clone family.
    pub otp: OtpService,

    /// Razorpay in production. `None` when the gateway is not configured, in which case
    /// payment endpoints answer 500 with a generic message.
    pub payment_gateway: Option<Arc<dyn PaymentGateway>>,

    /// Firebase ID token verifier for social login, when configured.
    pub id_verifier: Option<Arc<dyn IdTokenVerifier>>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `config` - Loaded application configuration
    /// - `otp` - OTP service
    /// - `payment_gateway` - Payment gateway, if configured
    /// - `id_verifier` - Social login verifier, if configured
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        db: DatabaseConnection,
        config: Config,
        otp: OtpService,
        payment_gateway: Option<Arc<dyn PaymentGateway>>,
        id_verifier: Option<Arc<dyn IdTokenVerifier>>,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            otp,
            payment_gateway,
            id_verifier,
        }
    }

    /// The configured payment gateway.
    ///
    /// # Returns
    /// - `Ok(&dyn PaymentGateway)` - Gateway to charge through
    /// - `Err(PaymentError::NotConfigured)` - Payments are disabled on this deployment
    pub fn gateway(&self) -> Result<&dyn PaymentGateway, PaymentError> {
        self.payment_gateway
            .as_deref()
            .ok_or(PaymentError::NotConfigured)
    }

    pub fn verifier(&self) -> Option<&dyn IdTokenVerifier> {
        self.id_verifier.as_deref()
    }
}

