use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::{BookingStatus, PaymentStatus};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::{payment::PaymentError, AppError},
    model::{booking::CreateBookingParams, pagination::PageRequest, user::User},
    service::booking::{BookingService, PAYMENT_TIMEOUT_REASON},
};

mod cancel;
mod create;
mod expire;

fn request(batch_id: i32, participant_ids: Vec<i32>) -> CreateBookingParams {
    CreateBookingParams {
        batch_id,
        participant_ids,
        quantity: 1,
    }
}
