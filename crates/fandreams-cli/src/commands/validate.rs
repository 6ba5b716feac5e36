//! Payload validation against the API request schemas.

use std::io::Read;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use fandreams_api::ValidatedPayload;
use fandreams_api::ValidationFailure;
use fandreams_api::dto::request::{
    CreateCommentRequest, CreatePostRequest, CreateSubscriptionRequest, CreateTierRequest,
    ForgotPasswordRequest, LoginRequest, PurchaseFancoinsRequest, RegisterRequest,
    ResetPasswordRequest, TipRequest, UpdatePostRequest, UpdateProfileRequest,
    UpdateSettingsRequest,
};
use fandreams_core::error::{AppError, ErrorKind};

/// Request schemas known to the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Schema {
    /// Profile update
    UpdateProfile,
    /// Settings update
    UpdateSettings,
    /// Account registration
    Register,
    /// Login
    Login,
    /// Forgot password
    ForgotPassword,
    /// Reset password
    ResetPassword,
    /// Subscribe to a creator
    CreateSubscription,
    /// Tip a creator
    Tip,
    /// Buy FanCoins
    PurchaseFancoins,
    /// Create a subscription tier
    CreateTier,
    /// Create a post
    CreatePost,
    /// Update a post
    UpdatePost,
    /// Create a comment
    CreateComment,
}

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Schema to validate against
    #[arg(value_enum)]
    pub schema: Schema,

    /// JSON file to read; stdin when omitted
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Violation row for table output
#[derive(Debug, Serialize, Tabled)]
struct ViolationRow {
    /// Field path
    field: String,
    /// Constraint code
    code: String,
    /// Message
    message: String,
}

/// Execute the validate command
pub fn execute(args: &ValidateArgs, format: OutputFormat) -> Result<(), AppError> {
    let raw = read_input(args.file.as_ref())?;
    let value: Value = serde_json::from_str(&raw)?;

    let outcome = validate_value(args.schema, value);
    match outcome {
        Ok(normalized) => {
            output::print_success("Payload is valid");
            output::print_json(&normalized);
            Ok(())
        }
        Err(failure) => {
            output::print_error(&format!("Payload is invalid: {}", failure));
            output::print_list(&violation_rows(&failure), format);
            Err(AppError::from(failure))
        }
    }
}

/// Validate `value` against `schema`, returning the normalized payload.
pub fn validate_value(schema: Schema, value: Value) -> Result<Value, ValidationFailure> {
    match schema {
        Schema::UpdateProfile => normalize::<UpdateProfileRequest>(value),
        Schema::UpdateSettings => normalize::<UpdateSettingsRequest>(value),
        Schema::Register => normalize::<RegisterRequest>(value),
        Schema::Login => normalize::<LoginRequest>(value),
        Schema::ForgotPassword => normalize::<ForgotPasswordRequest>(value),
        Schema::ResetPassword => normalize::<ResetPasswordRequest>(value),
        Schema::CreateSubscription => normalize::<CreateSubscriptionRequest>(value),
        Schema::Tip => normalize::<TipRequest>(value),
        Schema::PurchaseFancoins => normalize::<PurchaseFancoinsRequest>(value),
        Schema::CreateTier => normalize::<CreateTierRequest>(value),
        Schema::CreatePost => normalize::<CreatePostRequest>(value),
        Schema::UpdatePost => normalize::<UpdatePostRequest>(value),
        Schema::CreateComment => normalize::<CreateCommentRequest>(value),
    }
}

fn normalize<T: ValidatedPayload>(value: Value) -> Result<Value, ValidationFailure> {
    let payload = T::from_json(value)?;
    tracing::debug!(schema = T::SCHEMA, "Payload validated");
    // Re-serializing a value we just deserialized cannot fail for these DTOs.
    Ok(serde_json::to_value(&payload).unwrap_or(Value::Null))
}

fn violation_rows(failure: &ValidationFailure) -> Vec<ViolationRow> {
    failure
        .fields()
        .iter()
        .flat_map(|(field, violations)| {
            violations.iter().map(move |v| ViolationRow {
                field: if field.is_empty() {
                    "<root>".to_string()
                } else {
                    field.clone()
                },
                code: v.code.clone(),
                message: v.message.clone(),
            })
        })
        .collect()
}

fn read_input(file: Option<&PathBuf>) -> Result<String, AppError> {
    match file {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            AppError::with_source(
                ErrorKind::Io,
                format!("Failed to read '{}': {}", path.display(), e),
                e,
            )
        }),
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}
