//! Shared fixtures for service tests.

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;

use crate::server::{
    config::{JwtConfig, OtpConfig},
    error::{payment::PaymentError, AppError},
    integration::{
        firebase::{IdTokenVerifier, SocialIdentity},
        razorpay::{sign, GatewayOrder, GatewayRefund, PaymentGateway},
        sms::LogOtpSender,
    },
    service::otp::OtpService,
};

mod admin;
mod auth;
mod booking;
mod center;
mod participant;
mod payment;

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        access_secret: "test-access-secret".to_string(),
        refresh_secret: "test-refresh-secret".to_string(),
        access_ttl_secs: 900,
        refresh_ttl_secs: 3600,
    }
}

/// OTP service without a resend cooldown that logs codes instead of sending them.
pub fn otp_service() -> OtpService {
    OtpService::new(
        OtpConfig {
            length: 6,
            ttl_secs: 300,
            max_attempts: 5,
            resend_cooldown_secs: 0,
        },
        Arc::new(LogOtpSender),
    )
}

/// Verifier that accepts one fixed token.
pub struct FakeVerifier {
    pub token: String,
    pub identity: SocialIdentity,
}

#[async_trait]
impl IdTokenVerifier for FakeVerifier {
    async fn verify(&self, id_token: &str) -> Result<SocialIdentity, AppError> {
        if id_token == self.token {
            Ok(self.identity.clone())
        } else {
            Err(crate::server::error::auth::AuthError::InvalidToken(
                "unknown id token".to_string(),
            )
            .into())
        }
    }
}

pub const GATEWAY_SECRET: &str = "rzp-test-secret";
pub const WEBHOOK_SECRET: &str = "rzp-webhook-secret";

/// In-memory gateway signing with [`GATEWAY_SECRET`] and [`WEBHOOK_SECRET`].
#[derive(Default)]
pub struct FakeGateway {
    orders: AtomicU32,
    pub refunds: Mutex<Vec<(String, i64)>>,
    pub fail_orders: bool,
}

impl FakeGateway {
    /// Signature the checkout widget would return for `order_id|payment_id`.
    pub fn checkout_signature(order_id: &str, payment_id: &str) -> String {
        sign(GATEWAY_SECRET, format!("{order_id}|{payment_id}").as_bytes())
    }

    pub fn webhook_signature(body: &[u8]) -> String {
        sign(WEBHOOK_SECRET, body)
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    fn key_id(&self) -> &str {
        "rzp_test_key"
    }

    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        _receipt: &str,
    ) -> Result<GatewayOrder, PaymentError> {
        if self.fail_orders {
            return Err(PaymentError::Gateway("gateway unavailable".to_string()));
        }
        let n = self.orders.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(GatewayOrder {
            id: format!("order_test{n}"),
            amount,
            currency: currency.to_string(),
        })
    }

    async fn refund(&self, payment_id: &str, amount: i64) -> Result<GatewayRefund, PaymentError> {
        self.refunds
            .lock()
            .unwrap()
            .push((payment_id.to_string(), amount));
        Ok(GatewayRefund {
            id: format!("rfnd_{payment_id}"),
        })
    }

    fn verify_payment_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        Self::checkout_signature(order_id, payment_id) == signature
    }

    fn verify_webhook_signature(
        &self,
        body: &[u8],
        signature: &str,
    ) -> Result<bool, PaymentError> {
        Ok(Self::webhook_signature(body) == signature)
    }
}
