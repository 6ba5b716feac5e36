//! # fandreams-core
//!
//! Core crate for the FanDreams API. Contains the unified error system,
//! configuration schemas, and the read-only pricing and limit tables
//! consumed by billing and payout logic.
//!
//! This crate has **no** internal dependencies on other FanDreams crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
