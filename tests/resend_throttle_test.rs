/// Integration tests for the code resend path and its throttle
use std::sync::Arc;

use workforce_auth::config::Config;
use workforce_auth::error::AuthError;
use workforce_auth::models::{SignupRequest, VerifyOtpRequest};
use workforce_auth::notify::RecordingNotifier;
use workforce_auth::roles::RoleInput;
use workforce_auth::services::AuthService;
use workforce_auth::store::MemoryUserStore;
use workforce_auth::throttle::MemoryAttemptStore;

fn build_service(config: Config) -> (AuthService, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let service = AuthService::new(
        Arc::new(MemoryUserStore::new()),
        notifier.clone(),
        MemoryAttemptStore::new(),
        config,
    );
    (service, notifier)
}

fn bob_signup() -> SignupRequest {
    SignupRequest {
        name: "Bob".to_string(),
        email: "bob@example.com".to_string(),
        phone: "+1 555 987 6543".to_string(),
        password: "pw123456".to_string(),
        role: Some(RoleInput::One("worker".to_string())),
    }
}

#[tokio::test]
async fn test_resend_overwrites_the_prior_code() {
    // Zero cooldown keeps this test off the wall clock.
    let mut config = Config::for_secret("test-secret");
    config.resend_cooldown_secs = 0;
    let (service, notifier) = build_service(config);

    service.signup(bob_signup()).await.unwrap();
    let first = notifier.last_code_for("bob@example.com").unwrap();

    service.resend_otp("bob@example.com").await.unwrap();
    let second = notifier.last_code_for("bob@example.com").unwrap();

    if first != second {
        let err = service
            .verify_otp(VerifyOtpRequest {
                email: "bob@example.com".to_string(),
                otp: first,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::OtpMismatch));
    }

    service
        .verify_otp(VerifyOtpRequest {
            email: "bob@example.com".to_string(),
            otp: second,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_resend_inside_cooldown_is_rate_limited() {
    let (service, _notifier) = build_service(Config::for_secret("test-secret"));

    service.signup(bob_signup()).await.unwrap();
    service.resend_otp("bob@example.com").await.unwrap();

    let err = service.resend_otp("bob@example.com").await.unwrap_err();
    match err {
        AuthError::RateLimited {
            retry_after_secs,
            max_attempts_reached,
        } => {
            assert!(!max_attempts_reached);
            assert!(retry_after_secs > 0 && retry_after_secs <= 60);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_fourth_resend_reports_the_attempt_cap() {
    let mut config = Config::for_secret("test-secret");
    config.resend_cooldown_secs = 0;
    let (service, _notifier) = build_service(config);

    service.signup(bob_signup()).await.unwrap();
    for _ in 0..3 {
        service.resend_otp("bob@example.com").await.unwrap();
    }

    let err = service.resend_otp("bob@example.com").await.unwrap_err();
    assert!(matches!(
        err,
        AuthError::RateLimited {
            max_attempts_reached: true,
            ..
        }
    ));
}

#[tokio::test]
async fn test_resend_for_unknown_account_fails_before_the_throttle() {
    let (service, _notifier) = build_service(Config::for_secret("test-secret"));

    let err = service.resend_otp("nobody@example.com").await.unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));
}

#[tokio::test]
async fn test_resend_after_verification_has_nothing_to_send() {
    let (service, notifier) = build_service(Config::for_secret("test-secret"));

    service.signup(bob_signup()).await.unwrap();
    let code = notifier.last_code_for("bob@example.com").unwrap();
    service
        .verify_otp(VerifyOtpRequest {
            email: "bob@example.com".to_string(),
            otp: code,
        })
        .await
        .unwrap();

    let err = service.resend_otp("bob@example.com").await.unwrap_err();
    assert!(matches!(err, AuthError::NoPendingCode));
}
