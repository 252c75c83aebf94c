use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct AddressDto {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city_id: Option<i32>,
    pub pincode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CenterSportDto {
    pub sport_id: i32,
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TimingDto {
    pub day: String,
    pub open: String,
    pub close: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct BankInfoDto {
    pub account_holder: Option<String>,
    pub account_number: Option<String>,
    pub ifsc: Option<String>,
    pub bank_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CenterDto {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub address: AddressDto,
    pub facility_ids: Vec<i32>,
    pub sports: Vec<CenterSportDto>,
    pub operational_timing: Vec<TimingDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_info: Option<BankInfoDto>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/replace body for a coaching center. Omitted lists are treated as empty.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpsertCenterDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    #[serde(default)]
    pub address: AddressDto,
    #[serde(default)]
    pub facility_ids: Vec<i32>,
    #[serde(default)]
    pub sports: Vec<CenterSportDto>,
    #[serde(default)]
    pub operational_timing: Vec<TimingDto>,
    pub bank_info: Option<BankInfoDto>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CenterQueryDto {
    pub sport_id: Option<i32>,
    pub city_id: Option<i32>,
    pub status: Option<String>,
    #[serde(default)]
    pub page: u64,
    pub per_page: Option<u64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CenterStatusDto {
    pub status: Option<String>,
}
