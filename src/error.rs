use thiserror::Error;

use crate::roles::Role;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Role is required. Please select a role from the available options.")]
    RoleRequired,

    #[error("Invalid role: {role}. Must be one of: {}", Role::valid_names())]
    InvalidRole { role: String },

    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("No verification code is pending for this account")]
    NoPendingCode,

    #[error("Verification code has expired")]
    OtpExpired,

    #[error("Verification code does not match")]
    OtpMismatch,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is not verified")]
    AccountNotVerified,

    #[error("Too many resend requests (retry after {retry_after_secs}s, max attempts reached: {max_attempts_reached})")]
    RateLimited {
        retry_after_secs: u64,
        max_attempts_reached: bool,
    },

    #[error("Failed to send verification code: {0}")]
    NotificationFailed(String),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}
