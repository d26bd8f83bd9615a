// Workforce Auth Library

pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod roles;
pub mod security;
pub mod services;
pub mod store;
pub mod telemetry;
pub mod throttle;
pub mod validators;

pub use error::{AuthError, Result};

// Re-export commonly used types
pub use config::Config;
pub use models::{
    AuthResponse, LoginRequest, SignupRequest, SignupResponse, UpdateProfileRequest, User,
    UserSummary, VerifyOtpRequest,
};
pub use roles::{Role, RoleInput};
pub use services::AuthService;
