/// Resend throttling for verification codes
///
/// Tracks per-account resend attempts behind the `AttemptStore` seam so the
/// counter can live in an external cache in multi-process deployments. The
/// attempt cap is checked before the cooldown: an account that has burned
/// its attempts is refused even after the cooldown window has passed.
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{AuthError, Result};

pub const DEFAULT_RESEND_COOLDOWN_SECS: u64 = 60;
pub const DEFAULT_MAX_RESEND_ATTEMPTS: u32 = 3;

/// Resend counter for one account
#[derive(Debug, Clone)]
pub struct ResendState {
    pub attempts: u32,
    pub last_attempt_at: DateTime<Utc>,
}

/// Storage seam for resend counters, keyed by lowercased email
#[async_trait]
pub trait AttemptStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<ResendState>>;

    async fn put(&self, key: &str, state: ResendState) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local `AttemptStore`
#[derive(Default)]
pub struct MemoryAttemptStore {
    entries: Mutex<HashMap<String, ResendState>>,
}

impl MemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttemptStore for MemoryAttemptStore {
    async fn get(&self, key: &str) -> Result<Option<ResendState>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| AuthError::Internal("attempt store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, state: ResendState) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AuthError::Internal("attempt store lock poisoned".into()))?;
        entries.insert(key.to_string(), state);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AuthError::Internal("attempt store lock poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Cooldown and attempt-cap policy over an `AttemptStore`
pub struct ResendThrottle {
    store: Box<dyn AttemptStore>,
    cooldown_secs: u64,
    max_attempts: u32,
}

impl ResendThrottle {
    pub fn new(store: impl AttemptStore + 'static, cooldown_secs: u64, max_attempts: u32) -> Self {
        Self {
            store: Box::new(store),
            cooldown_secs,
            max_attempts,
        }
    }

    fn key(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Record a resend attempt, or refuse it.
    ///
    /// Refuses with `RateLimited { max_attempts_reached: true }` once the
    /// attempt cap is hit, and with a positive `retry_after_secs` while the
    /// cooldown from the previous attempt is still running. On success the
    /// counter is advanced and the attempt timestamp updated.
    pub async fn check(&self, email: &str) -> Result<()> {
        self.check_at(email, Utc::now()).await
    }

    /// `check` with an explicit clock, used by tests
    pub async fn check_at(&self, email: &str, now: DateTime<Utc>) -> Result<()> {
        let key = Self::key(email);
        let state = self.store.get(&key).await?;

        let next = match state {
            None => ResendState {
                attempts: 1,
                last_attempt_at: now,
            },
            Some(state) => {
                if state.attempts >= self.max_attempts {
                    tracing::warn!(email = %key, attempts = state.attempts, "resend attempt cap reached");
                    return Err(AuthError::RateLimited {
                        retry_after_secs: 0,
                        max_attempts_reached: true,
                    });
                }

                let elapsed = now - state.last_attempt_at;
                let cooldown = Duration::seconds(self.cooldown_secs as i64);
                if elapsed < cooldown {
                    let retry_after = (cooldown - elapsed).num_seconds().max(1) as u64;
                    tracing::debug!(email = %key, retry_after_secs = retry_after, "resend inside cooldown window");
                    return Err(AuthError::RateLimited {
                        retry_after_secs: retry_after,
                        max_attempts_reached: false,
                    });
                }

                ResendState {
                    attempts: state.attempts + 1,
                    last_attempt_at: now,
                }
            }
        };

        self.store.put(&key, next).await
    }

    /// Drop the counter for an account, typically after successful verification
    pub async fn reset(&self, email: &str) -> Result<()> {
        self.store.remove(&Self::key(email)).await
    }
}
