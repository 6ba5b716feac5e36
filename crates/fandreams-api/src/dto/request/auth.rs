//! Registration, login, and password reset bodies.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::validation::{ValidatedPayload, non_null};

/// Minimum age, in whole years, to open an account.
pub const MINIMUM_AGE_YEARS: u32 = 18;

/// Registration request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Unique handle.
    #[validate(length(min = 3, max = 50), custom(function = "validate_username"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 8), custom(function = "validate_password_strength"))]
    pub password: String,
    /// Display name.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,
    /// Birth date, `YYYY-MM-DD` or RFC 3339.
    #[validate(custom(function = "validate_adult"))]
    pub date_of_birth: String,
}

impl ValidatedPayload for RegisterRequest {
    const SCHEMA: &'static str = "register";
}

/// Login request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl ValidatedPayload for LoginRequest {
    const SCHEMA: &'static str = "login";
}

/// Forgot password request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    /// Email address of the account.
    #[validate(email)]
    pub email: String,
}

impl ValidatedPayload for ForgotPasswordRequest {
    const SCHEMA: &'static str = "forgot-password";
}

/// Reset password request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// Reset token sent by email.
    #[validate(length(min = 1))]
    pub token: String,
    /// New password.
    #[validate(length(min = 8), custom(function = "validate_password_strength"))]
    pub password: String,
}

impl ValidatedPayload for ResetPasswordRequest {
    const SCHEMA: &'static str = "reset-password";
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Ok(());
    }
    Err(ValidationError::new("invalid_username").with_message(Cow::Borrowed(
        "Username may only contain letters, digits and _",
    )))
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::new("missing_uppercase").with_message(Cow::Borrowed(
            "Password must contain at least one uppercase letter",
        )));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("missing_digit").with_message(Cow::Borrowed(
            "Password must contain at least one digit",
        )));
    }
    Ok(())
}

fn validate_adult(date_of_birth: &str) -> Result<(), ValidationError> {
    let Some(birth) = parse_birth_date(date_of_birth) else {
        return Err(ValidationError::new("invalid_date")
            .with_message(Cow::Borrowed("Invalid date of birth")));
    };

    let today = Utc::now().date_naive();
    match today.years_since(birth) {
        Some(age) if age >= MINIMUM_AGE_YEARS => Ok(()),
        _ => Err(ValidationError::new("underage")
            .with_message(Cow::Borrowed("You must be at least 18 years old"))),
    }
}

fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}
