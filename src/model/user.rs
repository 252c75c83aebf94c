use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserDto {
    pub id: i32,
    pub role: String,
    pub user_type: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub is_email_verified: bool,
    pub is_mobile_verified: bool,
    pub admin_role_id: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpdateProfileDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_type: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ChangePasswordDto {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}
