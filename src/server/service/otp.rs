//! One-time password issuing and verification.
//!
//! Codes are held in process memory keyed by `(mode, contact)`, so a code sent for
//! `login` can never complete a `forgot_password` flow. Each key holds at most one live
//! code: requesting a new one replaces the old one once the resend cooldown has passed.
//! Verified codes are consumed, and a code is discarded after too many wrong guesses.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use rand::Rng;
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;

use crate::server::{
    config::OtpConfig,
    error::{auth::AuthError, AppError},
    integration::sms::OtpSender,
    model::auth::{Contact, OtpMode},
};

/// Issued code with its expiry, resend window and failed-guess count.
struct OtpEntry {
    code: String,
    sent_at: Instant,
    expires_at: Instant,
    attempts: u32,
}

impl OtpEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Constant-time comparison against the stored code.
    fn matches(&self, input: &str) -> bool {
        self.code.as_bytes().ct_eq(input.as_bytes()).into()
    }
}

type OtpKey = (OtpMode, Contact);

/// Issues, delivers and verifies OTP codes.
///
/// Cheap to clone; clones share the same code store.
#[derive(Clone)]
pub struct OtpService {
    config: OtpConfig,
    sender: Arc<dyn OtpSender>,
    codes: Arc<RwLock<HashMap<OtpKey, OtpEntry>>>,
}

impl OtpService {
    pub fn new(config: OtpConfig, sender: Arc<dyn OtpSender>) -> Self {
        Self {
            config,
            sender,
            codes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Issues a code for `(mode, contact)` and delivers it.
    ///
    /// The code is withdrawn again when delivery fails so the caller may retry right away.
    ///
    /// # Arguments
    /// - `mode` - Flow the code is valid for
    /// - `contact` - Normalized mobile number or email address to deliver to
    ///
    /// # Returns
    /// - `Ok(u64)` - Seconds until the code expires
    /// - `Err(AppError::AuthErr(OtpCooldown))` - A code was sent within the cooldown window
    /// - `Err(AppError)` - Delivery failed
    pub async fn send(&self, mode: OtpMode, contact: &Contact) -> Result<u64, AppError> {
        let code = self.issue(mode, contact).await?;

        if let Err(err) = self
            .sender
            .send(contact, &code, self.config.ttl_secs)
            .await
        {
            self.codes.write().await.remove(&(mode, contact.clone()));
            return Err(err);
        }

        tracing::debug!("Sent {} OTP to {}", mode.as_str(), contact.value());
        Ok(self.config.ttl_secs)
    }

    /// Generates and stores a new code, replacing any previous one for the same key.
    ///
    /// # Returns
    /// - `Ok(String)` - The new code
    /// - `Err(AuthError::OtpCooldown)` - Seconds left before another code may be requested
    pub(crate) async fn issue(&self, mode: OtpMode, contact: &Contact) -> Result<String, AuthError> {
        let key = (mode, contact.clone());
        let cooldown = Duration::from_secs(self.config.resend_cooldown_secs);
        let mut codes = self.codes.write().await;

        if let Some(existing) = codes.get(&key) {
            let elapsed = existing.sent_at.elapsed();
            if elapsed < cooldown {
                let remaining = (cooldown - elapsed).as_secs_f64().ceil() as u64;
                return Err(AuthError::OtpCooldown(remaining.max(1)));
            }
        }

        let code = Self::generate_code(self.config.length);
        let now = Instant::now();
        codes.insert(
            key,
            OtpEntry {
                code: code.clone(),
                sent_at: now,
                expires_at: now + Duration::from_secs(self.config.ttl_secs),
                attempts: 0,
            },
        );

        Ok(code)
    }

    /// Checks `input` against the live code for `(mode, contact)`.
    ///
    /// A matching code is consumed. A wrong guess counts against the code, which is
    /// discarded once `max_attempts` wrong guesses have been made.
    ///
    /// # Returns
    /// - `Ok(())` - Code matched and has been consumed
    /// - `Err(AuthError::InvalidOtp)` - No live code or wrong code
    /// - `Err(AuthError::OtpAttemptsExceeded)` - Wrong code and no attempts left
    pub async fn verify(
        &self,
        mode: OtpMode,
        contact: &Contact,
        input: &str,
    ) -> Result<(), AuthError> {
        let key = (mode, contact.clone());
        let mut codes = self.codes.write().await;

        let Some(entry) = codes.get_mut(&key) else {
            return Err(AuthError::InvalidOtp);
        };

        if entry.is_expired() {
            codes.remove(&key);
            return Err(AuthError::InvalidOtp);
        }

        if entry.matches(input.trim()) {
            codes.remove(&key);
            return Ok(());
        }

        entry.attempts += 1;
        if entry.attempts >= self.config.max_attempts {
            codes.remove(&key);
            return Err(AuthError::OtpAttemptsExceeded);
        }

        Err(AuthError::InvalidOtp)
    }

    /// Drops every expired code.
    ///
    /// # Returns
    /// - `usize` - Number of codes removed
    pub async fn purge_expired(&self) -> usize {
        let mut codes = self.codes.write().await;
        let before = codes.len();
        codes.retain(|_, entry| !entry.is_expired());
        before - codes.len()
    }

    fn generate_code(length: usize) -> String {
        let mut rng = rand::rng();
        (0..length)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect()
    }
}
