/// One-time verification codes
///
/// Codes are fixed-length numeric strings drawn uniformly over the full
/// `10^length` range and zero-padded, so every digit position is unbiased.
use chrono::{DateTime, Utc};
use rand::Rng;

pub const DEFAULT_OTP_LENGTH: usize = 6;
pub const OTP_TTL_MINUTES: i64 = 30;

/// Generate a numeric one-time code of exactly `length` digits.
///
/// `length` must be between 1 and 18 so the draw fits in a u64.
pub fn generate_otp(length: usize) -> String {
    debug_assert!((1..=18).contains(&length));
    let length = length.clamp(1, 18);
    let bound = 10u64.pow(length as u32);
    let value = rand::thread_rng().gen_range(0..bound);
    format!("{value:0width$}", width = length)
}

/// True when the expiry is missing or strictly in the past.
pub fn is_expired(expiry: Option<DateTime<Utc>>) -> bool {
    match expiry {
        None => true,
        Some(at) => at < Utc::now(),
    }
}

/// Expiry timestamp for a code issued now.
pub fn expiry_from_now(ttl_minutes: i64) -> DateTime<Utc> {
    Utc::now() + chrono::Duration::minutes(ttl_minutes)
}
