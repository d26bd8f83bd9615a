pub mod user;

pub use user::{
    AuthResponse, LoginRequest, SignupRequest, SignupResponse, UpdateProfileRequest, User,
    UserSummary, VerifyOtpRequest,
};
