use chrono::{DateTime, Utc};
/// Identity record and boundary payloads
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roles::{Role, RoleInput};
use crate::security::otp;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub role: Role,
    pub is_verified: bool,
    pub otp: Option<String>,
    pub otp_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if a verification code is currently pending
    pub fn has_pending_code(&self) -> bool {
        self.otp.is_some()
    }

    /// Check if the pending code (if any) can still be redeemed
    pub fn pending_code_usable(&self) -> bool {
        self.has_pending_code() && !otp::is_expired(self.otp_expires_at)
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            role: self.role,
        }
    }
}

/// Identity summary returned to callers (never includes credentials)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role: Option<RoleInput>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address or, when the store supports it, a phone number
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Signup outcome: the record is persisted, verification is pending
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user: UserSummary,
    pub otp_expires_at: DateTime<Utc>,
}

/// Verification or login outcome carrying the session token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub expires_in: u64,
    pub user: UserSummary,
}
