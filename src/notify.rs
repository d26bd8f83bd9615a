/// Delivery seam for verification codes
///
/// The flows hand a freshly generated code to an `OtpNotifier` and treat the
/// transport (SMTP relay, SMS gateway) as an external collaborator. Delivery
/// failures surface as `NotificationFailed`; the pending code stays persisted
/// so the account can retry through the resend path.
use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait OtpNotifier: Send + Sync {
    async fn send_code(&self, email: &str, name: &str, code: &str) -> Result<()>;
}

/// Notifier that records deliveries instead of sending them
///
/// Used in tests and in local setups without a mail relay, mirroring the
/// console transport most dev environments fall back to.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: std::sync::Mutex<Vec<SentCode>>,
}

#[derive(Debug, Clone)]
pub struct SentCode {
    pub email: String,
    pub name: String,
    pub code: String,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentCode> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Most recent code delivered to `email`, if any
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .rev()
            .find(|s| s.email.eq_ignore_ascii_case(email))
            .map(|s| s.code.clone())
    }
}

#[async_trait]
impl OtpNotifier for RecordingNotifier {
    async fn send_code(&self, email: &str, name: &str, code: &str) -> Result<()> {
        tracing::info!(email = %email, "verification code recorded");
        self.sent
            .lock()
            .map_err(|_| crate::error::AuthError::Internal("notifier lock poisoned".into()))?
            .push(SentCode {
                email: email.to_string(),
                name: name.to_string(),
                code: code.to_string(),
            });
        Ok(())
    }
}

/// Notifier whose transport is permanently down, for failure-path tests
pub struct FailingNotifier;

#[async_trait]
impl OtpNotifier for FailingNotifier {
    async fn send_code(&self, email: &str, _name: &str, _code: &str) -> Result<()> {
        tracing::warn!(email = %email, "verification code delivery failed");
        Err(crate::error::AuthError::NotificationFailed(
            "smtp relay unreachable".to_string(),
        ))
    }
}
