/// Persistence collaborator for identity records
///
/// The flows depend only on this contract, never on a storage engine. Emails
/// are the natural key and are matched case-insensitively.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::User;

pub mod memory;

pub use memory::MemoryUserStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new record. Fails `EmailAlreadyExists` on a duplicate email.
    async fn create(&self, user: User) -> Result<User>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Replace the stored record (matched by id). Fails `UserNotFound` when missing.
    async fn update(&self, user: &User) -> Result<User>;

    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Install a pending code and expiry, overwriting any prior code.
    async fn set_pending_code(
        &self,
        email: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Atomically redeem a pending code: when the record exists, the code
    /// matches exactly and has not expired, clear the code and expiry, mark
    /// the record verified, and return true. Otherwise leave the record
    /// untouched and return false.
    async fn verify_code(&self, email: &str, code: &str) -> Result<bool>;
}
