/// Signup, verification, resend, login and profile flows
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AuthError, Result};
use crate::models::{
    AuthResponse, LoginRequest, SignupRequest, SignupResponse, UpdateProfileRequest, User,
    UserSummary, VerifyOtpRequest,
};
use crate::notify::OtpNotifier;
use crate::roles::validate_role;
use crate::security::jwt::{self, Claims};
use crate::security::otp;
use crate::security::password::{hash_password_async, verify_password_async};
use crate::store::UserStore;
use crate::throttle::{AttemptStore, ResendThrottle};
use crate::validators;

pub struct AuthService {
    store: Arc<dyn UserStore>,
    notifier: Arc<dyn OtpNotifier>,
    throttle: ResendThrottle,
    config: Config,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn UserStore>,
        notifier: Arc<dyn OtpNotifier>,
        attempts: impl AttemptStore + 'static,
        config: Config,
    ) -> Self {
        let throttle = ResendThrottle::new(
            attempts,
            config.resend_cooldown_secs,
            config.max_resend_attempts,
        );
        Self {
            store,
            notifier,
            throttle,
            config,
        }
    }

    /// Register a new account and send its first verification code.
    ///
    /// The record is persisted before delivery is attempted, so a delivery
    /// failure leaves a pending account that the resend path can complete.
    pub async fn signup(&self, req: SignupRequest) -> Result<SignupResponse> {
        if !validators::validate_name(&req.name) {
            return Err(AuthError::Validation("Name is required".to_string()));
        }
        if !validators::validate_email(&req.email) {
            return Err(AuthError::Validation("Invalid email address".to_string()));
        }
        if !validators::validate_phone(&req.phone) {
            return Err(AuthError::Validation("Invalid phone number".to_string()));
        }
        if !validators::validate_password(&req.password) {
            return Err(AuthError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }
        let role = validate_role(req.role.as_ref())?;

        let email = req.email.trim().to_lowercase();
        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = hash_password_async(req.password).await?;
        let code = otp::generate_otp(self.config.otp_length);
        let expires_at = otp::expiry_from_now(self.config.otp_ttl_minutes);

        let now = Utc::now();
        let user = self
            .store
            .create(User {
                id: Uuid::new_v4(),
                name: req.name.trim().to_string(),
                email,
                phone: req.phone.trim().to_string(),
                password_hash,
                role,
                is_verified: false,
                otp: Some(code.clone()),
                otp_expires_at: Some(expires_at),
                created_at: now,
                updated_at: now,
            })
            .await?;

        tracing::info!(email = %user.email, role = %user.role, "user registered, verification pending");

        self.notifier.send_code(&user.email, &user.name, &code).await?;

        Ok(SignupResponse {
            user: user.summary(),
            otp_expires_at: expires_at,
        })
    }

    /// Redeem a pending verification code and open a session.
    pub async fn verify_otp(&self, req: VerifyOtpRequest) -> Result<AuthResponse> {
        let user = self
            .store
            .find_by_email(&req.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if !user.has_pending_code() {
            return Err(AuthError::NoPendingCode);
        }
        if otp::is_expired(user.otp_expires_at) {
            return Err(AuthError::OtpExpired);
        }
        if user.otp.as_deref() != Some(req.otp.as_str()) {
            return Err(AuthError::OtpMismatch);
        }

        // Redeem atomically. A false here means another caller consumed or
        // replaced the code after the snapshot above.
        if !self.store.verify_code(&req.email, &req.otp).await? {
            return Err(AuthError::NoPendingCode);
        }

        self.throttle.reset(&req.email).await?;

        let user = self
            .store
            .find_by_email(&req.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let token = jwt::issue_token(
            user.id,
            &user.email,
            user.role,
            &self.config.jwt_secret,
            self.config.token_ttl_secs,
        )?;

        tracing::info!(email = %user.email, "account verified");

        Ok(AuthResponse {
            token,
            expires_in: self.config.token_ttl_secs,
            user: user.summary(),
        })
    }

    /// Reissue a verification code, subject to the resend throttle.
    ///
    /// The fresh code replaces the prior one even when delivery then fails,
    /// so only the newest code is ever redeemable.
    pub async fn resend_otp(&self, email: &str) -> Result<SignupResponse> {
        let user = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if user.is_verified {
            return Err(AuthError::NoPendingCode);
        }

        self.throttle.check(email).await?;

        let code = otp::generate_otp(self.config.otp_length);
        let expires_at = otp::expiry_from_now(self.config.otp_ttl_minutes);
        self.store
            .set_pending_code(&user.email, &code, expires_at)
            .await?;

        tracing::info!(email = %user.email, "verification code reissued");

        self.notifier.send_code(&user.email, &user.name, &code).await?;

        Ok(SignupResponse {
            user: user.summary(),
            otp_expires_at: expires_at,
        })
    }

    /// Open a session for an existing account.
    ///
    /// The identifier may be an email address or a phone number. Unknown
    /// identities and wrong passwords both fail `InvalidCredentials`.
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse> {
        let identifier = req.identifier.trim();
        let user = match self.store.find_by_email(identifier).await? {
            Some(user) => Some(user),
            None => self.store.find_by_phone(identifier).await?,
        };
        let user = user.ok_or(AuthError::InvalidCredentials)?;

        verify_password_async(req.password, user.password_hash.clone()).await?;

        if self.config.require_verified_login && !user.is_verified {
            return Err(AuthError::AccountNotVerified);
        }

        let token = jwt::issue_token(
            user.id,
            &user.email,
            user.role,
            &self.config.jwt_secret,
            self.config.token_ttl_secs,
        )?;

        tracing::info!(email = %user.email, "user logged in");

        Ok(AuthResponse {
            token,
            expires_in: self.config.token_ttl_secs,
            user: user.summary(),
        })
    }

    pub async fn get_profile(&self, id: Uuid) -> Result<UserSummary> {
        let user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        Ok(user.summary())
    }

    /// Update the mutable profile fields (name, phone).
    pub async fn update_profile(
        &self,
        id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<UserSummary> {
        let mut user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if let Some(name) = req.name {
            if !validators::validate_name(&name) {
                return Err(AuthError::Validation("Name is required".to_string()));
            }
            user.name = name.trim().to_string();
        }
        if let Some(phone) = req.phone {
            if !validators::validate_phone(&phone) {
                return Err(AuthError::Validation("Invalid phone number".to_string()));
            }
            user.phone = phone.trim().to_string();
        }

        let user = self.store.update(&user).await?;
        Ok(user.summary())
    }

    pub async fn delete_account(&self, id: Uuid) -> Result<()> {
        self.store.delete(id).await?;
        tracing::info!(user_id = %id, "account deleted");
        Ok(())
    }

    /// Check a bearer credential presented on a subsequent call.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        jwt::verify_token(token, &self.config.jwt_secret)
    }
}
