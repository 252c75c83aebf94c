//! Environment-driven application configuration.
//!
//! `Config::from_env` reads every setting once at startup. Optional integrations
//! (Razorpay, Firebase, Twilio, super admin bootstrap) are enabled by setting all of
//! their variables; a partially configured group is a startup error.

use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_DATABASE_URL: &str = "sqlite://coachbase.db?mode=rwc";
const DEFAULT_RAZORPAY_BASE_URL: &str = "https://api.razorpay.com";
const DEFAULT_TWILIO_BASE_URL: &str = "https://api.twilio.com";
const FIREBASE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
}

#[derive(Clone, Debug)]
pub struct OtpConfig {
    pub length: usize,
    pub ttl_secs: u64,
    pub max_attempts: u32,
    pub resend_cooldown_secs: u64,
}

#[derive(Clone, Debug)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: String,
    /// Webhooks are rejected while this is unset.
    pub webhook_secret: Option<String>,
    pub base_url: String,
}

#[derive(Clone, Debug)]
pub struct FirebaseConfig {
    pub project_id: String,
    pub jwks_url: String,
}

#[derive(Clone, Debug)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub base_url: String,
}

#[derive(Clone, Debug)]
pub struct SuperAdminConfig {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty allows any origin.
    pub cors_origins: Vec<String>,
    pub currency: String,
    pub booking_payment_timeout_mins: i64,
    pub jwt: JwtConfig,
    pub otp: OtpConfig,
    pub razorpay: Option<RazorpayConfig>,
    pub firebase: Option<FirebaseConfig>,
    pub twilio: Option<TwilioConfig>,
    pub super_admin: Option<SuperAdminConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_source(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Source(&lookup);

        let razorpay = match env.group(&["RAZORPAY_KEY_ID", "RAZORPAY_KEY_SECRET"])? {
            Some(values) => {
                let base_url = env.get_or("RAZORPAY_BASE_URL", DEFAULT_RAZORPAY_BASE_URL);
                validate_url("RAZORPAY_BASE_URL", &base_url)?;
                Some(RazorpayConfig {
                    key_id: values[0].clone(),
                    key_secret: values[1].clone(),
                    webhook_secret: env.get("RAZORPAY_WEBHOOK_SECRET"),
                    base_url: base_url.trim_end_matches('/').to_string(),
                })
            }
            None => None,
        };

        let twilio = match env.group(&[
            "TWILIO_ACCOUNT_SID",
            "TWILIO_AUTH_TOKEN",
            "TWILIO_FROM_NUMBER",
        ])? {
            Some(values) => {
                let base_url = env.get_or("TWILIO_BASE_URL", DEFAULT_TWILIO_BASE_URL);
                validate_url("TWILIO_BASE_URL", &base_url)?;
                Some(TwilioConfig {
                    account_sid: values[0].clone(),
                    auth_token: values[1].clone(),
                    from_number: values[2].clone(),
                    base_url: base_url.trim_end_matches('/').to_string(),
                })
            }
            None => None,
        };

        let super_admin = env
            .group(&["SUPER_ADMIN_EMAIL", "SUPER_ADMIN_PASSWORD"])?
            .map(|values| SuperAdminConfig {
                email: values[0].trim().to_lowercase(),
                password: values[1].clone(),
            });

        let otp_length: usize = env.parse_or("OTP_LENGTH", 6)?;
        if !(4..=10).contains(&otp_length) {
            return Err(invalid("OTP_LENGTH", "must be between 4 and 10").into());
        }

        Ok(Self {
            database_url: env.get_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            host: env.get_or("HOST", "0.0.0.0"),
            port: env.parse_or("PORT", 3001)?,
            cors_origins: env
                .get("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            currency: env.get_or("CURRENCY", "INR").to_uppercase(),
            booking_payment_timeout_mins: env.parse_or("BOOKING_PAYMENT_TIMEOUT_MINS", 30)?,
            jwt: JwtConfig {
                access_secret: env.required("JWT_ACCESS_SECRET")?,
                refresh_secret: env.required("JWT_REFRESH_SECRET")?,
                access_ttl_secs: env.parse_or("JWT_ACCESS_TTL_SECS", 900)?,
                refresh_ttl_secs: env.parse_or("JWT_REFRESH_TTL_SECS", 30 * 24 * 60 * 60)?,
            },
            otp: OtpConfig {
                length: otp_length,
                ttl_secs: env.parse_or("OTP_TTL_SECS", 300)?,
                max_attempts: env.parse_or("OTP_MAX_ATTEMPTS", 5)?,
                resend_cooldown_secs: env.parse_or("OTP_RESEND_COOLDOWN_SECS", 60)?,
            },
            razorpay,
            firebase: env.get("FIREBASE_PROJECT_ID").map(|project_id| FirebaseConfig {
                project_id,
                jwks_url: FIREBASE_JWKS_URL.to_string(),
            }),
            twilio,
            super_admin,
        })
    }

    /// `host:port` socket address string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

struct Source<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> Source<'_, F> {
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name).filter(|v| !v.trim().is_empty())
    }

    fn get_or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    fn required(&self, name: &str) -> Result<String, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
    }

    fn parse_or<T>(&self, name: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(name) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e: T::Err| invalid(name, &e.to_string())),
            None => Ok(default),
        }
    }

    /// All-or-nothing group: `None` when every variable is unset.
    fn group(&self, names: &[&str]) -> Result<Option<Vec<String>>, ConfigError> {
        let values: Vec<Option<String>> = names.iter().map(|n| self.get(n)).collect();

        if values.iter().all(Option::is_none) {
            return Ok(None);
        }

        names
            .iter()
            .zip(values)
            .map(|(name, value)| value.ok_or_else(|| ConfigError::MissingEnvVar(name.to_string())))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

fn invalid(name: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_url(name: &str, value: &str) -> Result<(), ConfigError> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| invalid(name, &e.to_string()))
}
