use crate::server::{
    data::booking::{BookingRepository, NewBooking},
    model::booking::BookingLine,
};
use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::{BookingStatus, PaymentStatus};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod find_stale;
mod participants_with_live_booking;
mod save_state;
mod seats_taken;
