use serde::{Deserialize, Serialize};

use crate::model::user::UserDto;

#[derive(Deserialize, Debug, Clone)]
pub struct SendOtpDto {
    pub mode: String,
    pub mobile: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OtpSentDto {
    pub mode: String,
    pub contact: String,
    pub expires_in: u64,
}

/// Verification payload. Which of the optional fields are required depends on `mode`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct VerifyOtpDto {
    pub mode: String,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub otp: Option<String>,
    pub device_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub user_type: Option<String>,
    pub password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LoginDto {
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub password: Option<String>,
    pub device_id: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SocialLoginDto {
    pub id_token: Option<String>,
    pub device_id: Option<String>,
    pub role: Option<String>,
    pub user_type: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RefreshDto {
    pub refresh_token: Option<String>,
    pub device_id: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LogoutDto {
    pub device_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenPairDto {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponseDto {
    pub user: UserDto,
    pub tokens: TokenPairDto,
}
