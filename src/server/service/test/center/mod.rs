use chrono::{NaiveTime, Weekday};
use entity::sea_orm_active_enums::{CenterStatus, UserRole};
use sea_orm::DatabaseConnection;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::{auth::AuthError, AppError},
    model::{
        center::{Address, BankInfo, CenterFilter, CenterProfile, CenterSport, OperatingHours},
        pagination::PageRequest,
        user::User,
    },
    service::center::CenterService,
};

mod delete;
mod publish;
mod update;
mod visibility;

async fn academy(db: &DatabaseConnection) -> Result<User, AppError> {
    Ok(User::from_entity(
        factory::user::create_user_with_role(db, UserRole::Academy).await?,
    ))
}

/// Complete, publishable profile for the given city and sport.
fn profile(city_id: i32, sport_id: i32) -> CenterProfile {
    CenterProfile {
        name: "Smash Academy".to_string(),
        description: Some("Badminton for all ages".to_string()),
        email: Some("hello@smash.example".to_string()),
        mobile: None,
        address: Address {
            line1: Some("12 Court Road".to_string()),
            line2: None,
            city_id: Some(city_id),
            pincode: Some("560001".to_string()),
            latitude: None,
            longitude: None,
        },
        facility_ids: Vec::new(),
        sports: vec![CenterSport {
            sport_id,
            description: None,
            images: vec!["https://cdn.example.com/court.jpg".to_string()],
            videos: Vec::new(),
        }],
        operational_timing: vec![OperatingHours {
            day: Weekday::Mon,
            open: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
            close: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
        }],
        bank_info: Some(BankInfo {
            account_holder: Some("Smash Sports LLP".to_string()),
            account_number: Some("001234567890".to_string()),
            ifsc: Some("HDFC0001234".to_string()),
            bank_name: Some("HDFC Bank".to_string()),
        }),
    }
}
