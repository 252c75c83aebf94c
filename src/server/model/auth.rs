//! Authentication models: OTP modes, contacts, JWT claims and token pairs.

use entity::sea_orm_active_enums::{UserRole, UserType};
use serde::{Deserialize, Serialize};

use crate::{
    model::{
        admin::AdminLoginDto,
        auth::{LoginDto, RefreshDto, SendOtpDto, SocialLoginDto, TokenPairDto, VerifyOtpDto},
    },
    server::{
        error::validation::ValidationError,
        util::{
            parse::parse_enum,
            validation::{
                is_valid_password, non_blank, normalize_email, normalize_mobile, MIN_PASSWORD_LEN,
            },
        },
    },
};

/// Purpose an OTP was issued for. Codes are only valid for the mode they were sent for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OtpMode {
    Register,
    Login,
    ForgotPassword,
    ProfileUpdate,
}

impl OtpMode {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim() {
            "register" => Ok(Self::Register),
            "login" => Ok(Self::Login),
            "forgot_password" => Ok(Self::ForgotPassword),
            "profile_update" => Ok(Self::ProfileUpdate),
            _ => Err(ValidationError::field(
                "mode",
                "must be one of: register, login, forgot_password, profile_update",
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Login => "login",
            Self::ForgotPassword => "forgot_password",
            Self::ProfileUpdate => "profile_update",
        }
    }
}

/// Normalized destination of an OTP.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Contact {
    Mobile(String),
    Email(String),
}

impl Contact {
    /// Parses exactly one of `mobile`/`email`, normalizing the value.
    pub fn from_parts(mobile: Option<&str>, email: Option<&str>) -> Result<Self, ValidationError> {
        let mobile = mobile.map(str::trim).filter(|m| !m.is_empty());
        let email = email.map(str::trim).filter(|e| !e.is_empty());

        match (mobile, email) {
            (Some(mobile), None) => normalize_mobile(mobile)
                .map(Contact::Mobile)
                .ok_or_else(|| ValidationError::field("mobile", "is not a valid mobile number")),
            (None, Some(email)) => normalize_email(email)
                .map(Contact::Email)
                .ok_or_else(|| ValidationError::field("email", "is not a valid email address")),
            (Some(_), Some(_)) => Err(ValidationError::field(
                "contact",
                "provide either mobile or email, not both",
            )),
            (None, None) => Err(ValidationError::field(
                "contact",
                "mobile or email is required",
            )),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Contact::Mobile(v) | Contact::Email(v) => v,
        }
    }

    pub fn is_mobile(&self) -> bool {
        matches!(self, Contact::Mobile(_))
    }
}

#[derive(Debug, Clone)]
pub struct SendOtpParams {
    pub mode: OtpMode,
    pub contact: Contact,
}

impl SendOtpParams {
    pub fn from_dto(dto: SendOtpDto) -> Result<Self, ValidationError> {
        let mode = OtpMode::parse(&dto.mode)?;
        let contact = Contact::from_parts(dto.mobile.as_deref(), dto.email.as_deref())?;

        if mode == OtpMode::Register && !contact.is_mobile() {
            return Err(ValidationError::field(
                "mobile",
                "registration requires a mobile number",
            ));
        }
        if mode == OtpMode::Login && !contact.is_mobile() {
            return Err(ValidationError::field("mobile", "OTP login requires a mobile number"));
        }

        Ok(Self { mode, contact })
    }
}

/// Registration details collected alongside a `register` OTP.
#[derive(Debug, Clone)]
pub struct RegistrationDetails {
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub user_type: Option<UserType>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub device_id: String,
}

/// Mode-specific payload of a verified OTP.
#[derive(Debug, Clone)]
pub enum OtpAction {
    Register(RegistrationDetails),
    Login { device_id: String },
    ForgotPassword { new_password: String },
    ProfileUpdate,
}

#[derive(Debug, Clone)]
pub struct VerifyOtpParams {
    pub mode: OtpMode,
    pub contact: Contact,
    pub otp: String,
    pub action: OtpAction,
}

impl VerifyOtpParams {
    /// Validates the fields each mode requires, collecting every problem.
    pub fn from_dto(dto: VerifyOtpDto) -> Result<Self, ValidationError> {
        let mode = OtpMode::parse(&dto.mode)?;
        let contact = Contact::from_parts(dto.mobile.as_deref(), dto.email.as_deref())?;

        let mut errors = ValidationError::new();
        errors.require_str("otp", dto.otp.as_deref());

        let action = match mode {
            OtpMode::Register => {
                if !contact.is_mobile() {
                    errors.add("mobile", "registration requires a mobile number");
                }
                errors.require_str("first_name", dto.first_name.as_deref());
                errors.require_str("last_name", dto.last_name.as_deref());
                errors.require_str("device_id", dto.device_id.as_deref());

                let role = match dto.role.as_deref() {
                    None => {
                        errors.add("role", "role is required");
                        None
                    }
                    Some(raw) => match parse_enum::<UserRole>("role", raw) {
                        Ok(role @ (UserRole::User | UserRole::Academy)) => Some(role),
                        Ok(_) => {
                            errors.add("role", "must be one of: user, academy");
                            None
                        }
                        Err(e) => {
                            errors.errors.extend(e.errors);
                            None
                        }
                    },
                };

                let user_type = match (role, dto.user_type.as_deref()) {
                    (Some(UserRole::User), None) => {
                        errors.add("user_type", "user_type is required for role user");
                        None
                    }
                    (Some(UserRole::User), Some(raw)) => match parse_enum::<UserType>("user_type", raw) {
                        Ok(t) => Some(t),
                        Err(e) => {
                            errors.errors.extend(e.errors);
                            None
                        }
                    },
                    _ => None,
                };

                let email = match non_blank(dto.email.clone()) {
                    Some(raw) if contact.is_mobile() => match normalize_email(&raw) {
                        Some(email) => Some(email),
                        None => {
                            errors.add("email", "is not a valid email address");
                            None
                        }
                    },
                    _ => None,
                };

                if let Some(password) = dto.password.as_deref() {
                    if !is_valid_password(password) {
                        errors.add(
                            "password",
                            format!("must be at least {} characters", MIN_PASSWORD_LEN),
                        );
                    }
                }

                errors.clone().into_result()?;

                OtpAction::Register(RegistrationDetails {
                    first_name: dto.first_name.unwrap_or_default().trim().to_string(),
                    last_name: dto.last_name.unwrap_or_default().trim().to_string(),
                    role: role.unwrap_or(UserRole::User),
                    user_type,
                    email,
                    password: dto.password,
                    device_id: dto.device_id.unwrap_or_default().trim().to_string(),
                })
            }
            OtpMode::Login => {
                errors.require_str("device_id", dto.device_id.as_deref());
                OtpAction::Login {
                    device_id: dto.device_id.clone().unwrap_or_default().trim().to_string(),
                }
            }
            OtpMode::ForgotPassword => {
                match dto.new_password.as_deref() {
                    None => errors.add("new_password", "new_password is required"),
                    Some(p) if !is_valid_password(p) => errors.add(
                        "new_password",
                        format!("must be at least {} characters", MIN_PASSWORD_LEN),
                    ),
                    Some(_) => {}
                }
                OtpAction::ForgotPassword {
                    new_password: dto.new_password.clone().unwrap_or_default(),
                }
            }
            OtpMode::ProfileUpdate => OtpAction::ProfileUpdate,
        };

        errors.into_result()?;

        Ok(Self {
            mode,
            contact,
            otp: dto.otp.unwrap_or_default().trim().to_string(),
            action,
        })
    }
}

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessClaims {
    pub sub: i32,
    pub role: UserRole,
    pub typ: String,
    pub iat: i64,
    pub exp: i64,
}

/// Claims carried by a refresh token. Bound to the device it was issued to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshClaims {
    pub sub: i32,
    pub device_id: String,
    pub typ: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

pub const ACCESS_TOKEN_TYPE: &str = "access";
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

/// Freshly issued access and refresh tokens.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

impl TokenPair {
    pub fn into_dto(self) -> TokenPairDto {
        TokenPairDto {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.expires_in,
        }
    }
}

/// Credentials for password login.
#[derive(Debug, Clone)]
pub struct PasswordLoginParams {
    pub identifier: Contact,
    pub password: String,
    pub device_id: String,
}

impl PasswordLoginParams {
    pub fn from_dto(dto: LoginDto) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        let identifier = Contact::from_parts(dto.mobile.as_deref(), dto.email.as_deref())
            .map_err(|e| errors.merge(e))
            .ok();
        errors.require_str("password", dto.password.as_deref());
        errors.require_str("device_id", dto.device_id.as_deref());
        errors.into_result()?;

        Ok(Self {
            identifier: identifier.unwrap_or(Contact::Email(String::new())),
            password: dto.password.unwrap_or_default(),
            device_id: dto.device_id.unwrap_or_default().trim().to_string(),
        })
    }

    /// Admin panel login is email-only.
    pub fn from_admin_dto(dto: AdminLoginDto) -> Result<Self, ValidationError> {
        Self::from_dto(LoginDto {
            email: Some(dto.email.unwrap_or_default()),
            mobile: None,
            password: dto.password,
            device_id: dto.device_id,
        })
    }
}

/// Details for a social login; role and type only matter when a new account is created.
#[derive(Debug, Clone)]
pub struct SocialLoginParams {
    pub id_token: String,
    pub device_id: String,
    pub role: UserRole,
    pub user_type: Option<UserType>,
}

impl SocialLoginParams {
    /// New social accounts default to a student learner.
    pub fn from_dto(dto: SocialLoginDto) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        errors.require_str("id_token", dto.id_token.as_deref());
        errors.require_str("device_id", dto.device_id.as_deref());

        let role = match non_blank(dto.role) {
            None => UserRole::User,
            Some(raw) => match parse_enum::<UserRole>("role", &raw) {
                Ok(role @ (UserRole::User | UserRole::Academy)) => role,
                Ok(_) => {
                    errors.add("role", "must be one of: user, academy");
                    UserRole::User
                }
                Err(e) => {
                    errors.merge(e);
                    UserRole::User
                }
            },
        };
        let user_type = match (role, non_blank(dto.user_type)) {
            (UserRole::User, None) => Some(UserType::Student),
            (UserRole::User, Some(raw)) => parse_enum::<UserType>("user_type", &raw)
                .map_err(|e| errors.merge(e))
                .ok(),
            _ => None,
        };

        errors.into_result()?;

        Ok(Self {
            id_token: dto.id_token.unwrap_or_default().trim().to_string(),
            device_id: dto.device_id.unwrap_or_default().trim().to_string(),
            role,
            user_type,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RefreshParams {
    pub refresh_token: String,
    pub device_id: String,
}

impl RefreshParams {
    pub fn from_dto(dto: RefreshDto) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::new();
        errors.require_str("refresh_token", dto.refresh_token.as_deref());
        errors.require_str("device_id", dto.device_id.as_deref());
        errors.into_result()?;

        Ok(Self {
            refresh_token: dto.refresh_token.unwrap_or_default().trim().to_string(),
            device_id: dto.device_id.unwrap_or_default().trim().to_string(),
        })
    }
}
