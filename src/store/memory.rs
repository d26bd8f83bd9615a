/// In-memory `UserStore` for single-process deployments and tests
///
/// Records live in one map keyed by lowercased email; every read-modify-write
/// runs under a single write lock, which is what gives `verify_code` its
/// per-record atomicity.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AuthError, Result};
use crate::models::User;
use crate::security::otp;
use crate::store::UserStore;

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, mut user: User) -> Result<User> {
        let key = Self::key(&user.email);
        let mut users = self.users.write().await;
        if users.contains_key(&key) {
            return Err(AuthError::EmailAlreadyExists);
        }
        user.email = key.clone();
        users.insert(key, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&Self::key(email)).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.phone == phone).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.id == id).cloned())
    }

    async fn update(&self, user: &User) -> Result<User> {
        let mut users = self.users.write().await;
        let key = users
            .iter()
            .find(|(_, u)| u.id == user.id)
            .map(|(k, _)| k.clone())
            .ok_or(AuthError::UserNotFound)?;

        let mut updated = user.clone();
        updated.email = key.clone();
        updated.updated_at = Utc::now();
        users.insert(key, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut users = self.users.write().await;
        let key = users
            .iter()
            .find(|(_, u)| u.id == id)
            .map(|(k, _)| k.clone())
            .ok_or(AuthError::UserNotFound)?;
        users.remove(&key);
        Ok(())
    }

    async fn set_pending_code(
        &self,
        email: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&Self::key(email))
            .ok_or(AuthError::UserNotFound)?;
        user.otp = Some(code.to_string());
        user.otp_expires_at = Some(expires_at);
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn verify_code(&self, email: &str, code: &str) -> Result<bool> {
        let mut users = self.users.write().await;
        let user = match users.get_mut(&Self::key(email)) {
            Some(user) => user,
            None => return Ok(false),
        };

        let matches = user.otp.as_deref() == Some(code);
        if !matches || otp::is_expired(user.otp_expires_at) {
            return Ok(false);
        }

        user.otp = None;
        user.otp_expires_at = None;
        user.is_verified = true;
        user.updated_at = Utc::now();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Role;

    fn sample_user(email: &str) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: email.to_string(),
            phone: "1234567890".to_string(),
            password_hash: "hash".to_string(),
            role: Role::Worker,
            is_verified: false,
            otp: None,
            otp_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email_case_insensitive() {
        let store = MemoryUserStore::new();
        store.create(sample_user("test@example.com")).await.unwrap();
        let err = store
            .create(sample_user("TEST@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailAlreadyExists));
    }

    #[tokio::test]
    async fn test_find_by_email_is_case_insensitive() {
        let store = MemoryUserStore::new();
        store.create(sample_user("Test@Example.com")).await.unwrap();
        let found = store.find_by_email("test@EXAMPLE.com").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_verify_code_clears_and_activates() {
        let store = MemoryUserStore::new();
        store.create(sample_user("test@example.com")).await.unwrap();
        let expires = Utc::now() + chrono::Duration::minutes(30);
        store
            .set_pending_code("test@example.com", "123456", expires)
            .await
            .unwrap();

        assert!(store.verify_code("test@example.com", "123456").await.unwrap());

        let user = store
            .find_by_email("test@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(user.is_verified);
        assert!(user.otp.is_none());
        assert!(user.otp_expires_at.is_none());

        // Single-use: the same code cannot be redeemed twice.
        assert!(!store.verify_code("test@example.com", "123456").await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_code_rejects_expired() {
        let store = MemoryUserStore::new();
        store.create(sample_user("test@example.com")).await.unwrap();
        let expired = Utc::now() - chrono::Duration::seconds(1);
        store
            .set_pending_code("test@example.com", "123456", expired)
            .await
            .unwrap();

        assert!(!store.verify_code("test@example.com", "123456").await.unwrap());
        let user = store
            .find_by_email("test@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(!user.is_verified);
    }

    #[tokio::test]
    async fn test_set_pending_code_overwrites_prior() {
        let store = MemoryUserStore::new();
        store.create(sample_user("test@example.com")).await.unwrap();
        let expires = Utc::now() + chrono::Duration::minutes(30);
        store
            .set_pending_code("test@example.com", "111111", expires)
            .await
            .unwrap();
        store
            .set_pending_code("test@example.com", "222222", expires)
            .await
            .unwrap();

        assert!(!store.verify_code("test@example.com", "111111").await.unwrap());
        assert!(store.verify_code("test@example.com", "222222").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_phone_and_delete() {
        let store = MemoryUserStore::new();
        let created = store.create(sample_user("test@example.com")).await.unwrap();

        let found = store.find_by_phone("1234567890").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(created.id));

        store.delete(created.id).await.unwrap();
        assert!(store.find_by_id(created.id).await.unwrap().is_none());
        assert!(matches!(
            store.delete(created.id).await,
            Err(AuthError::UserNotFound)
        ));
    }
}
