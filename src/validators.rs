/// Input validation for signup and profile payloads
use validator::ValidateEmail;

/// Validates email format according to RFC 5322
pub fn validate_email(email: &str) -> bool {
    email.validate_email()
}

/// Validates password length (minimum 8 characters)
pub fn validate_password(password: &str) -> bool {
    password.len() >= 8
}

/// Validates a display name (non-empty after trimming)
pub fn validate_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Validates a contact phone number
/// Requirements:
/// - Non-empty after trimming
/// - Only digits, spaces, and + - ( ) separators
pub fn validate_phone(phone: &str) -> bool {
    let trimmed = phone.trim();
    if trimmed.is_empty() {
        return false;
    }
    trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '(' | ')'))
}
