//! Subscription, tip, FanCoin, and tier bodies.
//!
//! Amount bounds come from the shared pricing constants so the schemas and
//! billing code cannot drift apart.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use fandreams_core::constants::{PaymentMethod, SUBSCRIPTION_LIMITS, TIP_LIMITS};

use crate::validation::{ValidatedPayload, non_null};

/// Payment methods accepted for subscriptions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPaymentMethod {
    /// PIX.
    #[default]
    Pix,
    /// Credit card.
    CreditCard,
    /// Cryptocurrency.
    Crypto,
}

impl From<SubscriptionPaymentMethod> for PaymentMethod {
    fn from(method: SubscriptionPaymentMethod) -> Self {
        match method {
            SubscriptionPaymentMethod::Pix => Self::Pix,
            SubscriptionPaymentMethod::CreditCard => Self::CreditCard,
            SubscriptionPaymentMethod::Crypto => Self::Crypto,
        }
    }
}

/// Payment methods accepted for FanCoin purchases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FancoinPaymentMethod {
    /// PIX.
    #[default]
    Pix,
    /// Credit card.
    CreditCard,
}

impl From<FancoinPaymentMethod> for PaymentMethod {
    fn from(method: FancoinPaymentMethod) -> Self {
        match method {
            FancoinPaymentMethod::Pix => Self::Pix,
            FancoinPaymentMethod::CreditCard => Self::CreditCard,
        }
    }
}

/// Subscribe to a creator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    /// Creator being subscribed to.
    pub creator_id: Uuid,
    /// Tier; the creator's default tier when absent.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub tier_id: Option<Uuid>,
    /// Payment method.
    #[serde(default)]
    pub payment_method: SubscriptionPaymentMethod,
}

impl ValidatedPayload for CreateSubscriptionRequest {
    const SCHEMA: &'static str = "create-subscription";
}

/// Send a tip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TipRequest {
    /// Creator receiving the tip.
    pub creator_id: Uuid,
    /// Tip amount.
    #[validate(custom(function = "validate_tip_amount"))]
    pub amount: f64,
    /// Post the tip was sent from.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub post_id: Option<Uuid>,
    /// Message shown to the creator.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 200))]
    pub message: Option<String>,
}

impl ValidatedPayload for TipRequest {
    const SCHEMA: &'static str = "tip";
}

/// Buy a FanCoin package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseFancoinsRequest {
    /// Package identifier, e.g. `pack_500`.
    pub package_id: String,
    /// Payment method.
    #[serde(default)]
    pub payment_method: FancoinPaymentMethod,
}

impl ValidatedPayload for PurchaseFancoinsRequest {
    const SCHEMA: &'static str = "purchase-fancoins";
}

/// Create a subscription tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTierRequest {
    /// Tier name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Monthly price.
    #[validate(custom(function = "validate_tier_price"))]
    pub price: f64,
    /// Description.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500))]
    pub description: Option<String>,
    /// Benefit bullet points.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub benefits: Option<Vec<String>>,
    /// Subscriber cap.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub max_slots: Option<i64>,
}

impl ValidatedPayload for CreateTierRequest {
    const SCHEMA: &'static str = "create-tier";
}

fn validate_tip_amount(amount: f64) -> Result<(), ValidationError> {
    within_bounds(amount, TIP_LIMITS.min_tip, TIP_LIMITS.max_tip)
}

fn validate_tier_price(price: f64) -> Result<(), ValidationError> {
    within_bounds(
        price,
        SUBSCRIPTION_LIMITS.min_price,
        SUBSCRIPTION_LIMITS.max_price,
    )
}

/// Inclusive bounds check reported as a `range` error.
fn within_bounds(value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if value >= min && value <= max {
        return Ok(());
    }
    let mut error = ValidationError::new("range");
    error.add_param(Cow::Borrowed("min"), &min);
    error.add_param(Cow::Borrowed("max"), &max);
    error.add_param(Cow::Borrowed("value"), &value);
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CREATOR: &str = "2f1b6a52-3c1e-4c3a-9d6e-0b8f6d1a7e11";

    #[test]
    fn test_subscription_defaults_to_pix() {
        let request = CreateSubscriptionRequest::from_json(json!({ "creatorId": CREATOR }))
            .expect("valid subscription");
        assert_eq!(request.payment_method, SubscriptionPaymentMethod::Pix);
        assert!(request.tier_id.is_none());
        assert_eq!(PaymentMethod::from(request.payment_method), PaymentMethod::Pix);
    }

    #[test]
    fn test_subscription_rejects_bad_uuid_and_method() {
        let failure = CreateSubscriptionRequest::from_json(json!({ "creatorId": "creator-1" }))
            .expect_err("not a uuid");
        assert!(failure.field("creatorId").is_some());

        let failure = CreateSubscriptionRequest::from_json(json!({
            "creatorId": CREATOR,
            "paymentMethod": "paypal",
        }))
        .expect_err("paypal not accepted");
        assert!(failure.has_violation("paymentMethod", "invalid_enum_value"));
    }

    #[test]
    fn test_tip_amount_uses_tip_limits() {
        let failure = TipRequest::from_json(json!({ "creatorId": CREATOR, "amount": 0.5 }))
            .expect_err("below minimum");
        assert!(failure.has_violation("amount", "too_small"));

        let failure = TipRequest::from_json(json!({ "creatorId": CREATOR, "amount": 50000.01 }))
            .expect_err("above maximum");
        assert!(failure.has_violation("amount", "too_big"));

        let tip = TipRequest::from_json(json!({
            "creatorId": CREATOR,
            "amount": 50000,
            "message": "valeu!",
        }))
        .expect("maximum is inclusive");
        assert_eq!(tip.amount, TIP_LIMITS.max_tip);
    }

    #[test]
    fn test_fancoin_purchase_method_subset() {
        let request = PurchaseFancoinsRequest::from_json(json!({ "packageId": "pack_500" }))
            .expect("valid purchase");
        assert_eq!(request.payment_method, FancoinPaymentMethod::Pix);

        let failure = PurchaseFancoinsRequest::from_json(json!({
            "packageId": "pack_500",
            "paymentMethod": "crypto",
        }))
        .expect_err("crypto not accepted");
        assert!(failure.has_violation("paymentMethod", "invalid_enum_value"));
    }

    #[test]
    fn test_tier_price_and_slots() {
        let failure = CreateTierRequest::from_json(json!({
            "name": "VIP",
            "price": 4.99,
            "maxSlots": 0,
        }))
        .expect_err("cheap tier without slots");
        assert!(failure.has_violation("price", "too_small"));
        assert!(failure.has_violation("maxSlots", "too_small"));

        let failure = CreateTierRequest::from_json(json!({ "name": "VIP", "price": 10, "maxSlots": 2.5 }))
            .expect_err("fractional slots");
        assert!(failure.has_violation("maxSlots", "invalid_type"));

        let tier = CreateTierRequest::from_json(json!({
            "name": "VIP",
            "price": 29.9,
            "benefits": ["DMs", "Lives"],
        }))
        .expect("valid tier");
        assert_eq!(tier.benefits.as_deref().map(<[String]>::len), Some(2));
    }

    #[test]
    fn test_tier_slots_are_positive_integers() {
        let tier = CreateTierRequest::from_json(json!({
            "name": "VIP",
            "price": 10,
            "maxSlots": 5_000_000_000_i64,
        }))
        .expect("large cap");
        assert_eq!(tier.max_slots, Some(5_000_000_000));

        let failure = CreateTierRequest::from_json(json!({ "name": "VIP", "price": 10, "maxSlots": -1 }))
            .expect_err("negative cap");
        assert!(failure.has_violation("maxSlots", "too_small"));
        assert_eq!(failure.violation_count(), 1);
    }

    #[test]
    fn test_tip_reports_bad_creator_and_amount_together() {
        let failure = TipRequest::from_json(json!({ "creatorId": 7, "amount": 0.5, "postId": null }))
            .expect_err("three bad fields");
        assert!(failure.has_violation("creatorId", "invalid_type"));
        assert!(failure.has_violation("postId", "invalid_type"));
        assert!(failure.has_violation("amount", "too_small"));
    }
}
