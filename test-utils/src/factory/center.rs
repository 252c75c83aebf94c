//! Coaching center factory.

use crate::factory::{helpers::next_id, location::create_city};
use chrono::Utc;
use entity::sea_orm_active_enums::CenterStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use serde_json::json;

/// Factory for coaching centers.
///
/// The defaults satisfy every publish requirement except the sport list and city, so a
/// center built with `.published().sport(id)` is a valid published center. The city is
/// created on demand when none was provided.
pub struct CoachingCenterFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: i32,
    name: String,
    city_id: Option<i32>,
    status: CenterStatus,
    sport_ids: Vec<i32>,
    bank_info: Option<serde_json::Value>,
}

impl<'a> CoachingCenterFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, owner_id: i32) -> Self {
        Self {
            db,
            owner_id,
            name: format!("Center {}", next_id()),
            city_id: None,
            status: CenterStatus::Draft,
            sport_ids: Vec::new(),
            bank_info: Some(json!({
                "account_holder": "Academy Owner",
                "account_number": "001234567890",
                "ifsc": "HDFC0001234",
                "bank_name": "HDFC Bank"
            })),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn city(mut self, city_id: i32) -> Self {
        self.city_id = Some(city_id);
        self
    }

    pub fn published(mut self) -> Self {
        self.status = CenterStatus::Published;
        self
    }

    /// Offers `sport_id` at the center with one image.
    pub fn sport(mut self, sport_id: i32) -> Self {
        self.sport_ids.push(sport_id);
        self
    }

    pub fn without_bank_info(mut self) -> Self {
        self.bank_info = None;
        self
    }

    pub async fn build(self) -> Result<entity::coaching_center::Model, DbErr> {
        let city_id = match self.city_id {
            Some(id) => id,
            None => create_city(self.db).await?.id,
        };
        let now = Utc::now();

        let center = entity::coaching_center::ActiveModel {
            owner_id: ActiveValue::Set(self.owner_id),
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(Some("Professional coaching for all levels".to_string())),
            email: ActiveValue::Set(Some(format!("center{}@example.com", next_id()))),
            mobile: ActiveValue::Set(Some("+919876543210".to_string())),
            address_line1: ActiveValue::Set(Some("12 Stadium Road".to_string())),
            address_line2: ActiveValue::Set(None),
            city_id: ActiveValue::Set(Some(city_id)),
            pincode: ActiveValue::Set(Some("560001".to_string())),
            latitude: ActiveValue::Set(None),
            longitude: ActiveValue::Set(None),
            facility_ids: ActiveValue::Set(json!([])),
            operational_timing: ActiveValue::Set(json!([
                { "day": "mon", "open": "06:00", "close": "20:00" },
                { "day": "wed", "open": "06:00", "close": "20:00" }
            ])),
            bank_info: ActiveValue::Set(self.bank_info),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for sport_id in self.sport_ids {
            create_center_sport(self.db, center.id, sport_id).await?;
        }

        Ok(center)
    }
}

/// Creates a draft center owned by `owner_id`.
pub async fn create_center(
    db: &DatabaseConnection,
    owner_id: i32,
) -> Result<entity::coaching_center::Model, DbErr> {
    CoachingCenterFactory::new(db, owner_id).build().await
}

/// Links a sport to a center with a single image.
pub async fn create_center_sport(
    db: &DatabaseConnection,
    center_id: i32,
    sport_id: i32,
) -> Result<entity::center_sport::Model, DbErr> {
    entity::center_sport::ActiveModel {
        center_id: ActiveValue::Set(center_id),
        sport_id: ActiveValue::Set(sport_id),
        description: ActiveValue::Set(None),
        images: ActiveValue::Set(json!(["https://cdn.example.com/court.jpg"])),
        videos: ActiveValue::Set(json!([])),
        ..Default::default()
    }
    .insert(db)
    .await
}
