//! Razorpay orders, refunds and signature verification.

use async_trait::async_trait;
use ring::hmac;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::server::{config::RazorpayConfig, error::payment::PaymentError};

/// Order created at the gateway for a checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRefund {
    pub id: String,
}

/// Operations the booking flow needs from a payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Public key handed to the client checkout widget.
    fn key_id(&self) -> &str;

    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, PaymentError>;

    async fn refund(&self, payment_id: &str, amount: i64) -> Result<GatewayRefund, PaymentError>;

    /// Checks the checkout signature over `order_id|payment_id`.
    fn verify_payment_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool;

    /// Checks a webhook signature over the raw request body.
    ///
    /// # Returns
    /// - `Ok(bool)` - Whether the signature matches
    /// - `Err(PaymentError::NotConfigured)` - No webhook secret is configured
    fn verify_webhook_signature(&self, body: &[u8], signature: &str)
        -> Result<bool, PaymentError>;
}

/// Hex-encoded HMAC-SHA256 of `message` under `secret`.
pub fn sign(secret: &str, message: &[u8]) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    hex::encode(hmac::sign(&key, message).as_ref())
}

/// Constant-time comparison of `signature` against the expected HMAC of `message`.
pub fn verify_signature(secret: &str, message: &[u8], signature: &str) -> bool {
    let expected = sign(secret, message);
    let provided = signature.trim().to_ascii_lowercase();

    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

pub struct RazorpayGateway {
    http: reqwest::Client,
    config: RazorpayConfig,
}

impl RazorpayGateway {
    pub fn new(http: reqwest::Client, config: RazorpayConfig) -> Self {
        Self { http, config }
    }
}

#[derive(Serialize)]
struct CreateOrderRequest<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

#[derive(Deserialize)]
struct OrderResponse {
    id: String,
    amount: i64,
    currency: String,
}

#[derive(Serialize)]
struct RefundRequest {
    amount: i64,
}

#[derive(Deserialize)]
struct RefundResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    description: Option<String>,
}

async fn gateway_error(response: reqwest::Response) -> PaymentError {
    let status = response.status();
    let description = response
        .json::<ErrorEnvelope>()
        .await
        .ok()
        .and_then(|e| e.error.description);

    PaymentError::Gateway(format!(
        "status {}: {}",
        status,
        description.unwrap_or_else(|| "no description".to_string())
    ))
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    fn key_id(&self) -> &str {
        &self.config.key_id
    }

    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, PaymentError> {
        let response = self
            .http
            .post(format!("{}/v1/orders", self.config.base_url))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&CreateOrderRequest {
                amount,
                currency,
                receipt,
            })
            .send()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        if !response.status().is_success() {
            return Err(gateway_error(response).await);
        }

        let order: OrderResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        Ok(GatewayOrder {
            id: order.id,
            amount: order.amount,
            currency: order.currency,
        })
    }

    async fn refund(&self, payment_id: &str, amount: i64) -> Result<GatewayRefund, PaymentError> {
        let response = self
            .http
            .post(format!(
                "{}/v1/payments/{}/refund",
                self.config.base_url, payment_id
            ))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&RefundRequest { amount })
            .send()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        if !response.status().is_success() {
            return Err(gateway_error(response).await);
        }

        let refund: RefundResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Gateway(e.to_string()))?;

        Ok(GatewayRefund { id: refund.id })
    }

    fn verify_payment_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        verify_signature(
            &self.config.key_secret,
            format!("{order_id}|{payment_id}").as_bytes(),
            signature,
        )
    }

    fn verify_webhook_signature(
        &self,
        body: &[u8],
        signature: &str,
    ) -> Result<bool, PaymentError> {
        let secret = self
            .config
            .webhook_secret
            .as_deref()
            .ok_or(PaymentError::NotConfigured)?;

        Ok(verify_signature(secret, body, signature))
    }
}

/// Webhook events the booking flow reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    /// `payment.captured` or `order.paid`.
    Paid {
        order_id: String,
        payment_id: String,
    },
    /// `payment.failed`.
    Failed {
        order_id: String,
        payment_id: Option<String>,
        reason: Option<String>,
    },
    /// `refund.processed`.
    Refunded {
        payment_id: String,
        refund_id: String,
    },
    Ignored(String),
}

#[derive(Deserialize)]
struct WebhookBody {
    event: String,
    #[serde(default)]
    payload: WebhookPayload,
}

#[derive(Deserialize, Default)]
struct WebhookPayload {
    payment: Option<Wrapped<PaymentEntity>>,
    order: Option<Wrapped<OrderEntity>>,
    refund: Option<Wrapped<RefundEntity>>,
}

#[derive(Deserialize)]
struct Wrapped<T> {
    entity: T,
}

#[derive(Deserialize)]
struct PaymentEntity {
    id: String,
    order_id: Option<String>,
    error_description: Option<String>,
}

#[derive(Deserialize)]
struct OrderEntity {
    id: String,
}

#[derive(Deserialize)]
struct RefundEntity {
    id: String,
    payment_id: String,
}

impl WebhookEvent {
    /// Parses a webhook body. Events missing the identifiers they need are ignored.
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        let body: WebhookBody = serde_json::from_slice(body)?;
        let payload = body.payload;
        let payment = payload.payment.map(|p| p.entity);
        let order_id = payload
            .order
            .map(|o| o.entity.id)
            .or_else(|| payment.as_ref().and_then(|p| p.order_id.clone()));

        let event = match body.event.as_str() {
            "payment.captured" | "order.paid" => match (order_id, payment) {
                (Some(order_id), Some(payment)) => Self::Paid {
                    order_id,
                    payment_id: payment.id,
                },
                _ => Self::Ignored(body.event),
            },
            "payment.failed" => match order_id {
                Some(order_id) => Self::Failed {
                    order_id,
                    reason: payment.as_ref().and_then(|p| p.error_description.clone()),
                    payment_id: payment.map(|p| p.id),
                },
                None => Self::Ignored(body.event),
            },
            "refund.processed" => match payload.refund {
                Some(refund) => Self::Refunded {
                    payment_id: refund.entity.payment_id,
                    refund_id: refund.entity.id,
                },
                None => Self::Ignored(body.event),
            },
            _ => Self::Ignored(body.event),
        };

        Ok(event)
    }
}
