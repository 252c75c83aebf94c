//! OTP delivery.

use async_trait::async_trait;

use crate::server::{config::TwilioConfig, error::AppError, model::auth::Contact};

#[async_trait]
pub trait OtpSender: Send + Sync {
    async fn send(&self, contact: &Contact, code: &str, ttl_secs: u64) -> Result<(), AppError>;
}

fn message(code: &str, ttl_secs: u64) -> String {
    format!(
        "{code} is your verification code. It expires in {} minutes.",
        ttl_secs.div_ceil(60)
    )
}

/// Writes codes to the log. Used when no SMS provider is configured.
pub struct LogOtpSender;

#[async_trait]
impl OtpSender for LogOtpSender {
    async fn send(&self, contact: &Contact, code: &str, ttl_secs: u64) -> Result<(), AppError> {
        tracing::info!(
            "OTP for {}: {} (valid {}s)",
            contact.value(),
            code,
            ttl_secs
        );
        Ok(())
    }
}

/// Sends codes as SMS through Twilio's Messages API. Email contacts fall back to the log.
pub struct TwilioSender {
    http: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioSender {
    pub fn new(http: reqwest::Client, config: TwilioConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl OtpSender for TwilioSender {
    async fn send(&self, contact: &Contact, code: &str, ttl_secs: u64) -> Result<(), AppError> {
        let Contact::Mobile(to) = contact else {
            return LogOtpSender.send(contact, code, ttl_secs).await;
        };

        let body = message(code, ttl_secs);
        let response = self
            .http
            .post(format!(
                "{}/2010-04-01/Accounts/{}/Messages.json",
                self.config.base_url, self.config.account_sid
            ))
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("To", to.as_str()),
                ("From", self.config.from_number.as_str()),
                ("Body", body.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::InternalError(format!(
                "Twilio rejected OTP SMS to {to} with {status}: {detail}"
            )));
        }

        tracing::debug!("Sent OTP SMS to {}", to);
        Ok(())
    }
}
