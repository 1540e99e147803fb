//! Account registration and profile input validation.

use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::timezone::is_common_timezone;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Sign-up form. New accounts start inactive.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_passwords_match"))]
pub struct Registration {
    #[validate(length(min = 1, max = 30), custom(function = "validate_username"))]
    pub username: String,
    #[validate(length(min = 8))]
    pub password1: String,
    pub password2: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "validate_common_timezone"))]
    pub timezone: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub skype: String,
}

/// Editable account details.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserDetails {
    #[serde(default)]
    #[validate(length(max = 30))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 30))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
}

/// Editable profile settings. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileSettings {
    pub is_public: Option<bool>,
    pub in_search: Option<bool>,
    /// Empty string clears the timezone.
    #[validate(custom(function = "validate_optional_timezone"))]
    pub timezone: Option<String>,
    #[validate(length(max = 20))]
    pub skype: Option<String>,
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
    if username.chars().all(allowed) {
        Ok(())
    } else {
        Err(error(
            "username",
            "Username may contain only letters, digits and @/./+/-/_ characters.",
        ))
    }
}

fn validate_common_timezone(timezone: &str) -> Result<(), ValidationError> {
    if is_common_timezone(timezone) {
        Ok(())
    } else {
        Err(error("timezone", "Select a valid timezone."))
    }
}

fn validate_optional_timezone(timezone: &str) -> Result<(), ValidationError> {
    if timezone.is_empty() {
        return Ok(());
    }
    validate_common_timezone(timezone)
}

fn validate_passwords_match(form: &Registration) -> Result<(), ValidationError> {
    if form.password1 == form.password2 {
        Ok(())
    } else {
        Err(error("password_mismatch", "The two password fields didn't match."))
    }
}
