use entity::sea_orm_active_enums::{UserRole, UserType};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    integration::firebase::SocialIdentity,
    model::auth::{
        Contact, OtpAction, OtpMode, PasswordLoginParams, RegistrationDetails, SendOtpParams,
        SocialLoginParams, VerifyOtpParams,
    },
    service::{
        auth::{AuthService, OtpOutcome},
        test::{jwt_config, otp_service, FakeVerifier},
    },
    util::password::hash_password,
};

mod login;
mod send_otp;
mod social_login;
mod verify_otp;
