use chrono::NaiveDate;
use entity::sea_orm_active_enums::{BookingStatus, Gender, ParticipantRelation, PaymentStatus};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::AppError,
    model::{participant::ParticipantParams, user::User},
    service::participant::ParticipantService,
};

mod create;
mod delete;

fn params(relation: ParticipantRelation) -> ParticipantParams {
    ParticipantParams {
        first_name: "Anika".to_string(),
        last_name: "Rao".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(2014, 3, 9).unwrap(),
        gender: Gender::Female,
        relation,
    }
}
