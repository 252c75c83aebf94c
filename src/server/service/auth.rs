use entity::sea_orm_active_enums::UserRole;
use sea_orm::DatabaseConnection;

use crate::server::{
    config::JwtConfig,
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    integration::firebase::{IdTokenVerifier, SocialIdentity},
    model::{
        auth::{
            Contact, OtpAction, OtpMode, PasswordLoginParams, RefreshParams, RegistrationDetails,
            SendOtpParams, SocialLoginParams, TokenPair, VerifyOtpParams,
        },
        user::{CreateUserParams, User},
    },
    service::{otp::OtpService, token::TokenService},
    util::{
        password::{hash_password, verify_password},
        validation::normalize_mobile,
    },
};

/// Result of a successful OTP verification.
#[derive(Debug)]
pub enum OtpOutcome {
    /// `register` and `login`: the user is signed in on the requesting device.
    Authenticated(User, TokenPair),
    /// `forgot_password`: the password was replaced and every session revoked.
    PasswordReset,
    /// `profile_update`: the contact now belongs to the user and is verified.
    ContactVerified(User),
}

/// Service for sign-up, sign-in and session management.
///
/// Orchestrates OTP delivery and verification, password and social logins, and the
/// refresh token lifecycle through [`TokenService`].
pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtConfig,
    otp: &'a OtpService,
}

impl<'a> AuthService<'a> {
    /// Creates a new AuthService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `jwt` - Token signing configuration
    /// - `otp` - Shared OTP store and sender
    ///
    /// # Returns
    /// - `AuthService` - New service instance
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtConfig, otp: &'a OtpService) -> Self {
        Self { db, jwt, otp }
    }

    /// Sends an OTP after checking the contact is acceptable for the requested mode.
    ///
    /// # Arguments
    /// - `params` - Mode and normalized contact
    /// - `current_user` - Authenticated caller, required for `profile_update`
    ///
    /// # Returns
    /// - `Ok(u64)` - Seconds until the code expires
    /// - `Err(AppError::Conflict)` - `register`: mobile already registered;
    ///   `profile_update`: contact belongs to another account
    /// - `Err(AppError::NotFound)` - `login`/`forgot_password`: no matching active account
    /// - `Err(AuthError::MissingToken)` - `profile_update` without authentication
    /// - `Err(AuthError::OtpCooldown)` - A code was sent too recently
    pub async fn send_otp(
        &self,
        params: SendOtpParams,
        current_user: Option<&User>,
    ) -> Result<u64, AppError> {
        self.check_contact(params.mode, &params.contact, current_user)
            .await?;

        self.otp.send(params.mode, &params.contact).await
    }

    /// Verifies an OTP and performs the mode's action.
    ///
    /// Account checks run before the code is consumed, so a rejected request leaves the
    /// code usable.
    ///
    /// # Returns
    /// - `Ok(OtpOutcome)` - What the verification did
    /// - `Err(AuthError::InvalidOtp | OtpAttemptsExceeded)` - Code did not verify
    /// - `Err(AppError::Conflict | NotFound)` - Same account checks as [`Self::send_otp`]
    pub async fn verify_otp(
        &self,
        params: VerifyOtpParams,
        current_user: Option<&User>,
    ) -> Result<OtpOutcome, AppError> {
        let existing = self
            .check_contact(params.mode, &params.contact, current_user)
            .await?;

        if let OtpAction::Register(details) = &params.action {
            if let Some(email) = &details.email {
                if UserRepository::new(self.db)
                    .find_by_email(email)
                    .await?
                    .is_some()
                {
                    return Err(AppError::Conflict("Email is already registered".to_string()));
                }
            }
        }

        self.otp
            .verify(params.mode, &params.contact, &params.otp)
            .await?;

        let user_repo = UserRepository::new(self.db);
        let tokens = TokenService::new(self.db, self.jwt);

        match params.action {
            OtpAction::Register(details) => {
                let user = self.register(&params.contact, details.clone()).await?;
                let pair = tokens.issue_pair(&user, &details.device_id).await?;
                tracing::info!("Registered user {} as {:?}", user.id, user.role);

                Ok(OtpOutcome::Authenticated(user, pair))
            }
            OtpAction::Login { device_id } => {
                let user = existing.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
                if !user.is_mobile_verified {
                    user_repo
                        .set_verified_contact(user.id, &params.contact)
                        .await?;
                }
                let pair = tokens.issue_pair(&user, &device_id).await?;

                Ok(OtpOutcome::Authenticated(user, pair))
            }
            OtpAction::ForgotPassword { new_password } => {
                let user = existing.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
                let hash = hash_password(new_password).await?;
                user_repo.set_password_hash(user.id, &hash).await?;
                let revoked = tokens.revoke_all(user.id).await?;
                tracing::info!(
                    "Reset password of user {} and revoked {} refresh tokens",
                    user.id,
                    revoked
                );

                Ok(OtpOutcome::PasswordReset)
            }
            OtpAction::ProfileUpdate => {
                let user = current_user.ok_or(AuthError::MissingToken)?;
                user_repo
                    .set_verified_contact(user.id, &params.contact)
                    .await?;
                let updated = user_repo
                    .find_by_id(user.id)
                    .await?
                    .ok_or(AuthError::UserNotInDatabase(user.id))?;

                Ok(OtpOutcome::ContactVerified(updated))
            }
        }
    }

    /// Signs a learner or academy in with email/mobile and password.
    ///
    /// # Returns
    /// - `Ok((User, TokenPair))` - Authenticated user and tokens for the device
    /// - `Err(AuthError::InvalidCredentials)` - Unknown account, no password or wrong password
    /// - `Err(AuthError::AccountInactive)` - Account has been deactivated
    pub async fn password_login(
        &self,
        params: PasswordLoginParams,
    ) -> Result<(User, TokenPair), AppError> {
        let user = self.authenticate(&params).await?;
        let pair = TokenService::new(self.db, self.jwt)
            .issue_pair(&user, &params.device_id)
            .await?;

        Ok((user, pair))
    }

    /// Signs an administrator in to the admin panel.
    ///
    /// # Returns
    /// - `Ok((User, TokenPair))` - Authenticated admin or super admin
    /// - `Err(AuthError::AccessDenied)` - Credentials are valid but the account is not an admin
    /// - `Err(AuthError::InvalidCredentials | AccountInactive)` - As [`Self::password_login`]
    pub async fn admin_login(
        &self,
        params: PasswordLoginParams,
    ) -> Result<(User, TokenPair), AppError> {
        let user = self.authenticate(&params).await?;
        if !user.is_admin() {
            return Err(AuthError::AccessDenied(
                user.id,
                "attempted admin login without an admin role".to_string(),
            )
            .into());
        }

        let pair = TokenService::new(self.db, self.jwt)
            .issue_pair(&user, &params.device_id)
            .await?;

        Ok((user, pair))
    }

    /// Signs in with an identity-provider token, creating the account on first use.
    ///
    /// The user is looked up by provider uid first, then by verified email (linking the
    /// uid to that account).
    ///
    /// # Arguments
    /// - `params` - Provider token, device and the role/type for new accounts
    /// - `verifier` - Token verifier, `None` when social login is not configured
    ///
    /// # Returns
    /// - `Ok((User, TokenPair))` - Signed-in user
    /// - `Err(AuthError::SocialLoginUnavailable)` - No verifier configured
    /// - `Err(AuthError::AccountInactive)` - Matched account is deactivated
    pub async fn social_login(
        &self,
        params: SocialLoginParams,
        verifier: Option<&dyn IdTokenVerifier>,
    ) -> Result<(User, TokenPair), AppError> {
        let verifier = verifier.ok_or(AuthError::SocialLoginUnavailable)?;
        let identity = verifier.verify(&params.id_token).await?;
        let user_repo = UserRepository::new(self.db);

        let verified_email = identity
            .email
            .as_deref()
            .filter(|_| identity.email_verified)
            .map(str::to_lowercase);

        let by_email = match (&verified_email, user_repo.find_by_firebase_uid(&identity.uid).await?) {
            (_, Some(user)) => return self.finish_social_login(user, &params).await,
            (Some(email), None) => user_repo.find_by_email(email).await?,
            (None, None) => None,
        };

        let user = if let Some(user) = by_email {
            user_repo.link_firebase_uid(user.id, &identity.uid).await?;
            tracing::info!("Linked social identity to existing user {}", user.id);
            user
        } else {
            let user = self
                .create_social_user(&identity, verified_email, &params)
                .await?;
            tracing::info!("Created user {} from social login", user.id);
            user
        };

        self.finish_social_login(user, &params).await
    }

    async fn finish_social_login(
        &self,
        user: User,
        params: &SocialLoginParams,
    ) -> Result<(User, TokenPair), AppError> {
        if !user.is_active {
            return Err(AuthError::AccountInactive(user.id).into());
        }

        let pair = TokenService::new(self.db, self.jwt)
            .issue_pair(&user, &params.device_id)
            .await?;

        Ok((user, pair))
    }

    /// Rotates a refresh token. See [`TokenService::rotate`].
    pub async fn refresh(&self, params: RefreshParams) -> Result<(User, TokenPair), AppError> {
        TokenService::new(self.db, self.jwt).rotate(params).await
    }

    /// Revokes the refresh tokens `user` holds on `device_id`.
    pub async fn logout(&self, user: &User, device_id: &str) -> Result<(), AppError> {
        let revoked = TokenService::new(self.db, self.jwt)
            .revoke_device(user.id, device_id)
            .await?;
        tracing::debug!(
            "User {} logged out of {} ({} tokens revoked)",
            user.id,
            device_id,
            revoked
        );

        Ok(())
    }

    /// Applies the per-mode account rules to `contact`.
    ///
    /// Returns the account the contact belongs to for `login` and `forgot_password`.
    async fn check_contact(
        &self,
        mode: OtpMode,
        contact: &Contact,
        current_user: Option<&User>,
    ) -> Result<Option<User>, AppError> {
        let owner = UserRepository::new(self.db)
            .find_by_contact(contact)
            .await?;

        match mode {
            OtpMode::Register => {
                if owner.is_some() {
                    return Err(AppError::Conflict(
                        "Mobile number is already registered".to_string(),
                    ));
                }
                Ok(None)
            }
            OtpMode::Login => match owner {
                Some(user) if user.is_active => Ok(Some(user)),
                Some(user) => Err(AuthError::AccountInactive(user.id).into()),
                None => Err(AppError::NotFound(
                    "No account is registered with this mobile number".to_string(),
                )),
            },
            OtpMode::ForgotPassword => match owner {
                Some(user) if user.is_active && user.password_hash.is_some() => Ok(Some(user)),
                Some(user) if !user.is_active => Err(AuthError::AccountInactive(user.id).into()),
                _ => Err(AppError::NotFound(
                    "No password account is registered with this contact".to_string(),
                )),
            },
            OtpMode::ProfileUpdate => {
                let user = current_user.ok_or(AuthError::MissingToken)?;
                match owner {
                    Some(other) if other.id != user.id => Err(AppError::Conflict(
                        "Contact is already used by another account".to_string(),
                    )),
                    _ => Ok(None),
                }
            }
        }
    }

    async fn authenticate(&self, params: &PasswordLoginParams) -> Result<User, AppError> {
        let user = UserRepository::new(self.db)
            .find_by_contact(&params.identifier)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let Some(hash) = user.password_hash.clone() else {
            return Err(AuthError::InvalidCredentials.into());
        };
        if !verify_password(params.password.clone(), hash).await? {
            return Err(AuthError::InvalidCredentials.into());
        }
        if !user.is_active {
            return Err(AuthError::AccountInactive(user.id).into());
        }

        Ok(user)
    }

    async fn register(
        &self,
        contact: &Contact,
        details: RegistrationDetails,
    ) -> Result<User, AppError> {
        let password_hash = match details.password {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        UserRepository::new(self.db)
            .create(CreateUserParams {
                role: details.role,
                user_type: details.user_type,
                first_name: details.first_name,
                last_name: details.last_name,
                email: details.email,
                mobile: Some(contact.value().to_string()),
                password_hash,
                is_email_verified: false,
                is_mobile_verified: true,
                firebase_uid: None,
                admin_role_id: None,
            })
            .await
            .map_err(|e| AppError::on_constraint(e, "Mobile or email is already registered"))
    }

    async fn create_social_user(
        &self,
        identity: &SocialIdentity,
        email: Option<String>,
        params: &SocialLoginParams,
    ) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        let (first_name, last_name) = split_name(identity.name.as_deref());
        let mobile = match identity.phone_number.as_deref().and_then(normalize_mobile) {
            Some(mobile) if user_repo.find_by_mobile(&mobile).await?.is_none() => Some(mobile),
            _ => None,
        };
        let is_mobile_verified = mobile.is_some();

        user_repo
            .create(CreateUserParams {
                role: params.role,
                user_type: match params.role {
                    UserRole::User => params.user_type,
                    _ => None,
                },
                first_name,
                last_name,
                is_email_verified: email.is_some(),
                email,
                mobile,
                password_hash: None,
                is_mobile_verified,
                firebase_uid: Some(identity.uid.clone()),
                admin_role_id: None,
            })
            .await
            .map_err(|e| AppError::on_constraint(e, "Account already exists"))
    }
}

/// Splits a display name into first and last name; missing parts default to "User" and "".
fn split_name(name: Option<&str>) -> (String, String) {
    let name = name.map(str::trim).filter(|n| !n.is_empty());

    match name.and_then(|n| n.split_once(char::is_whitespace)) {
        Some((first, last)) => (first.to_string(), last.trim().to_string()),
        None => (name.unwrap_or("User").to_string(), String::new()),
    }
}
