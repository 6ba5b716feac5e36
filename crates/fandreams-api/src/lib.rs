//! # fandreams-api
//!
//! Request/response contract of the FanDreams HTTP API: validated request
//! DTOs, the field-addressable [`ValidationFailure`], response envelopes,
//! and the Axum glue handlers use to consume them.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod validation;

pub use error::ApiError;
pub use extractors::ValidatedJson;
pub use validation::{FieldViolation, ValidatedPayload, ValidationFailure};
