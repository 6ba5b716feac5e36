//! JSON body extractor that runs the payload schema.

use axum::Json;
use axum::extract::{FromRequest, Request};

use crate::error::ApiError;
use crate::validation::ValidatedPayload;

/// Extracts a JSON body and validates it as `T`.
///
/// Rejects with `400 VALIDATION_ERROR` and per-field details when the body
/// violates the schema, or with `INVALID_JSON` when it cannot be parsed.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: ValidatedPayload,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<serde_json::Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(schema = T::SCHEMA, error = %rejection, "Rejected request body");
                ApiError::invalid_json(&rejection)
            })?;

        let payload = T::from_json(value)?;
        Ok(Self(payload))
    }
}
