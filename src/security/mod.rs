/// Security primitives: password hashing, one-time codes, session tokens
pub mod jwt;
pub mod otp;
pub mod password;

pub use jwt::{issue_token, verify_token, Claims};
pub use otp::{generate_otp, is_expired};
pub use password::{hash_password, verify_password};
