use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ScheduleDto {
    #[serde(default)]
    pub days: Vec<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BatchDto {
    pub id: i32,
    pub center_id: i32,
    pub sport_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub schedule: ScheduleDto,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub capacity: i32,
    pub age_min: i32,
    pub age_max: i32,
    pub fee_type: String,
    pub fee_configuration: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpsertBatchDto {
    pub sport_id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub schedule: ScheduleDto,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub capacity: Option<i32>,
    pub age_min: Option<i32>,
    pub age_max: Option<i32>,
    pub fee_type: Option<String>,
    pub fee_configuration: Option<serde_json::Value>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct QuoteRequestDto {
    #[serde(default)]
    pub participant_ids: Vec<i32>,
    pub quantity: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct QuoteLineDto {
    pub participant_id: i32,
    pub age: i32,
    pub unit_amount: i64,
    pub amount: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct QuoteDto {
    pub batch_id: i32,
    pub fee_type: String,
    pub quantity: i32,
    pub currency: String,
    pub lines: Vec<QuoteLineDto>,
    pub total: i64,
}
