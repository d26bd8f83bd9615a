/// Configuration management
use serde::Deserialize;

use crate::security::jwt::DEFAULT_TOKEN_TTL_SECS;
use crate::security::otp::{DEFAULT_OTP_LENGTH, OTP_TTL_MINUTES};
use crate::throttle::{DEFAULT_MAX_RESEND_ATTEMPTS, DEFAULT_RESEND_COOLDOWN_SECS};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    #[serde(default = "default_otp_length")]
    pub otp_length: usize,
    #[serde(default = "default_otp_ttl_minutes")]
    pub otp_ttl_minutes: i64,
    #[serde(default = "default_resend_cooldown_secs")]
    pub resend_cooldown_secs: u64,
    #[serde(default = "default_max_resend_attempts")]
    pub max_resend_attempts: u32,
    /// When set, login refuses accounts that have not redeemed their code
    #[serde(default)]
    pub require_verified_login: bool,
}

fn default_token_ttl_secs() -> u64 {
    DEFAULT_TOKEN_TTL_SECS
}

fn default_otp_length() -> usize {
    DEFAULT_OTP_LENGTH
}

fn default_otp_ttl_minutes() -> i64 {
    OTP_TTL_MINUTES
}

fn default_resend_cooldown_secs() -> u64 {
    DEFAULT_RESEND_COOLDOWN_SECS
}

fn default_max_resend_attempts() -> u32 {
    DEFAULT_MAX_RESEND_ATTEMPTS
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Config with defaults for tests and embedded use
    pub fn for_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl_secs: default_token_ttl_secs(),
            otp_length: default_otp_length(),
            otp_ttl_minutes: default_otp_ttl_minutes(),
            resend_cooldown_secs: default_resend_cooldown_secs(),
            max_resend_attempts: default_max_resend_attempts(),
            require_verified_login: false,
        }
    }
}
