//! Profile and settings update bodies.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{ValidatedPayload, non_null};

/// Update profile request. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// Display name.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,
    /// Free-form biography.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    #[validate(length(equal = 2))]
    pub country: Option<String>,
    /// Language tag, e.g. `pt-BR`.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 5))]
    pub language: Option<String>,
    /// IANA timezone name.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 50))]
    pub timezone: Option<String>,
}

impl ValidatedPayload for UpdateProfileRequest {
    const SCHEMA: &'static str = "update-profile";
}

/// UI color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
    /// Follow the operating system.
    Auto,
}

/// Update settings request. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    /// Email notifications.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub notification_email: Option<bool>,
    /// Push notifications.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub notification_push: Option<bool>,
    /// Direct-message notifications.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub notification_messages: Option<bool>,
    /// Show online status to others.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub privacy_show_online: Option<bool>,
    /// Show activity to others.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub privacy_show_activity: Option<bool>,
    /// Theme.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl ValidatedPayload for UpdateSettingsRequest {
    const SCHEMA: &'static str = "update-settings";
}
