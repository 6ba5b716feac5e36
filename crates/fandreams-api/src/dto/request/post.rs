//! Post and comment bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{ValidatedPayload, non_null};

/// Kind of post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    /// Plain post.
    #[default]
    Regular,
    /// Poll.
    Poll,
    /// Published at `scheduled_at`.
    Scheduled,
    /// Pay-per-view unlock.
    Ppv,
}

/// Audience of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Everyone.
    Public,
    /// Active subscribers.
    #[default]
    Subscribers,
    /// Buyers of the pay-per-view unlock.
    Ppv,
}

/// Uploaded media attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMedia {
    /// Storage key returned by the upload endpoint.
    pub key: String,
    /// MIME type or media category.
    pub media_type: String,
}

/// Create post request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    /// Body text.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 5000))]
    pub content_text: Option<String>,
    /// Post type.
    #[serde(default)]
    pub post_type: PostType,
    /// Audience.
    #[serde(default)]
    pub visibility: Visibility,
    /// Restrict to a tier.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub tier_id: Option<Uuid>,
    /// Unlock price for PPV posts.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1.0, max = 10000.0))]
    pub ppv_price: Option<f64>,
    /// Publication time for scheduled posts.
    #[serde(default, deserialize_with = "utc_timestamp", skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Attached media.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<PostMedia>>,
}

impl ValidatedPayload for CreatePostRequest {
    const SCHEMA: &'static str = "create-post";
}

/// Update post request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    /// Body text.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 5000))]
    pub content_text: Option<String>,
    /// Audience.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// Pin on the creator's profile.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
    /// Hide from feeds.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl ValidatedPayload for UpdatePostRequest {
    const SCHEMA: &'static str = "update-post";
}

/// Create comment request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    /// Comment text.
    #[validate(length(min = 1, max = 1000))]
    pub content: String,
    /// Comment being replied to.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
}

impl ValidatedPayload for CreateCommentRequest {
    const SCHEMA: &'static str = "create-comment";
}

/// Present timestamps must be RFC 3339 in UTC with a trailing `Z`.
fn utc_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_utc_timestamp(&raw)
        .map(Some)
        .ok_or_else(|| de::Error::custom("Invalid datetime, expected UTC like 2030-01-01T09:00:00Z"))
}

fn parse_utc_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if !raw.ends_with('Z') || raw.as_bytes().get(10) != Some(&b'T') {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_post_defaults() {
        let post = CreatePostRequest::from_json(json!({ "contentText": "bom dia" }))
            .expect("valid post");
        assert_eq!(post.post_type, PostType::Regular);
        assert_eq!(post.visibility, Visibility::Subscribers);
        assert!(post.media.is_none());
    }

    #[test]
    fn test_create_post_ppv_price_bounds() {
        let failure = CreatePostRequest::from_json(json!({ "postType": "ppv", "ppvPrice": 10001 }))
            .expect_err("too expensive");
        assert!(failure.has_violation("ppvPrice", "too_big"));
    }

    #[test]
    fn test_create_post_scheduled_at_must_be_datetime() {
        let failure = CreatePostRequest::from_json(json!({ "scheduledAt": "tomorrow" }))
            .expect_err("not a datetime");
        assert!(failure.field("scheduledAt").is_some());

        let post = CreatePostRequest::from_json(json!({
            "postType": "scheduled",
            "scheduledAt": "2030-01-01T09:00:00Z",
            "media": [{ "key": "posts/a.jpg", "mediaType": "image/jpeg" }],
        }))
        .expect("valid scheduled post");
        assert_eq!(post.post_type, PostType::Scheduled);
        assert_eq!(post.media.map(|m| m.len()), Some(1));
    }

    #[test]
    fn test_create_post_scheduled_at_requires_utc() {
        let failure =
            CreatePostRequest::from_json(json!({ "scheduledAt": "2030-01-01T09:00:00+02:00" }))
                .expect_err("offset timestamp");
        assert!(failure.has_violation("scheduledAt", "invalid_format"));

        let failure = CreatePostRequest::from_json(json!({ "scheduledAt": null }))
            .expect_err("null timestamp");
        assert!(failure.has_violation("scheduledAt", "invalid_type"));

        let post = CreatePostRequest::from_json(json!({ "scheduledAt": "2030-01-01T09:00:00.250Z" }))
            .expect("fractional seconds");
        assert!(post.scheduled_at.is_some());
        assert!(parse_utc_timestamp("2030-01-01 09:00:00Z").is_none());
    }

    #[test]
    fn test_create_post_media_item_needs_key() {
        let failure = CreatePostRequest::from_json(json!({ "media": [{ "mediaType": "video" }] }))
            .expect_err("media without key");
        assert!(failure.has_violation("media[0].key", "required"));
    }

    #[test]
    fn test_update_post_visibility_enum() {
        let failure = UpdatePostRequest::from_json(json!({ "visibility": "friends" }))
            .expect_err("unknown visibility");
        assert!(failure.has_violation("visibility", "invalid_enum_value"));

        let update = UpdatePostRequest::from_json(json!({ "isPinned": true })).expect("valid");
        assert_eq!(update.is_pinned, Some(true));
    }

    #[test]
    fn test_comment_length() {
        let failure =
            CreateCommentRequest::from_json(json!({ "content": "" })).expect_err("empty comment");
        assert!(failure.has_violation("content", "min_length"));
        assert!(CreateCommentRequest::from_json(json!({ "content": "a".repeat(1000) })).is_ok());
    }
}
