//! Batch factory.

use crate::factory::helpers::next_id;
use chrono::{Duration, NaiveTime, Utc};
use entity::sea_orm_active_enums::FeeType;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use serde_json::json;

/// Factory for batches.
///
/// Defaults: Mon/Wed/Fri 06:00-07:00 starting in a week, capacity 10, ages 5..=18,
/// monthly fee of 1500.00 (150000 paise).
pub struct BatchFactory<'a> {
    db: &'a DatabaseConnection,
    center_id: i32,
    sport_id: i32,
    capacity: i32,
    age_min: i32,
    age_max: i32,
    fee_type: FeeType,
    fee_configuration: serde_json::Value,
    is_active: bool,
}

impl<'a> BatchFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, center_id: i32, sport_id: i32) -> Self {
        Self {
            db,
            center_id,
            sport_id,
            capacity: 10,
            age_min: 5,
            age_max: 18,
            fee_type: FeeType::Monthly,
            fee_configuration: json!({ "amount": 150000 }),
            is_active: true,
        }
    }

    pub fn capacity(mut self, capacity: i32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn ages(mut self, age_min: i32, age_max: i32) -> Self {
        self.age_min = age_min;
        self.age_max = age_max;
        self
    }

    pub fn fee(mut self, fee_type: FeeType, fee_configuration: serde_json::Value) -> Self {
        self.fee_type = fee_type;
        self.fee_configuration = fee_configuration;
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub async fn build(self) -> Result<entity::batch::Model, DbErr> {
        let now = Utc::now();
        let start = NaiveTime::from_hms_opt(6, 0, 0).unwrap_or_default();
        let end = NaiveTime::from_hms_opt(7, 0, 0).unwrap_or_default();

        entity::batch::ActiveModel {
            center_id: ActiveValue::Set(self.center_id),
            sport_id: ActiveValue::Set(self.sport_id),
            name: ActiveValue::Set(format!("Batch {}", next_id())),
            description: ActiveValue::Set(None),
            schedule_days: ActiveValue::Set(json!(["mon", "wed", "fri"])),
            start_time: ActiveValue::Set(start),
            end_time: ActiveValue::Set(end),
            start_date: ActiveValue::Set((now + Duration::days(7)).date_naive()),
            end_date: ActiveValue::Set(None),
            capacity: ActiveValue::Set(self.capacity),
            age_min: ActiveValue::Set(self.age_min),
            age_max: ActiveValue::Set(self.age_max),
            fee_type: ActiveValue::Set(self.fee_type),
            fee_configuration: ActiveValue::Set(self.fee_configuration),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active monthly batch with default values.
pub async fn create_batch(
    db: &DatabaseConnection,
    center_id: i32,
    sport_id: i32,
) -> Result<entity::batch::Model, DbErr> {
    BatchFactory::new(db, center_id, sport_id).build().await
}
