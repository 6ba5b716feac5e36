//! Request DTOs with validation.

pub mod auth;
pub mod payment;
pub mod post;
pub mod user;

pub use auth::{ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest};
pub use payment::{
    CreateSubscriptionRequest, CreateTierRequest, FancoinPaymentMethod, PurchaseFancoinsRequest,
    SubscriptionPaymentMethod, TipRequest,
};
pub use post::{
    CreateCommentRequest, CreatePostRequest, PostMedia, PostType, UpdatePostRequest, Visibility,
};
pub use user::{Theme, UpdateProfileRequest, UpdateSettingsRequest};
