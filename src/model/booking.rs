use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BookingParticipantDto {
    pub participant_id: i32,
    pub amount: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PaymentDto {
    pub status: String,
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub failure_reason: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BookingDto {
    pub id: i32,
    pub booking_ref: String,
    pub user_id: i32,
    pub batch_id: i32,
    pub center_id: i32,
    pub quantity: i32,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub payment: PaymentDto,
    pub participants: Vec<BookingParticipantDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CreateBookingDto {
    pub batch_id: Option<i32>,
    #[serde(default)]
    pub participant_ids: Vec<i32>,
    pub quantity: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PaymentOrderDto {
    pub key_id: String,
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    pub booking_ref: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct VerifyPaymentDto {
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RefundDto {
    pub reason: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct BookingQueryDto {
    pub status: Option<String>,
    #[serde(default)]
    pub page: u64,
    pub per_page: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TransactionDto {
    pub id: i32,
    pub booking_id: i32,
    pub user_id: i32,
    pub kind: String,
    pub status: String,
    pub amount: i64,
    pub currency: String,
    pub gateway_order_id: Option<String>,
    pub gateway_payment_id: Option<String>,
    pub gateway_refund_id: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WebhookAckDto {
    pub success: bool,
    pub status: String,
}
