//! Read-only business parameters.
//!
//! Monetary amounts are in the platform currency ([`SUBSCRIPTION_LIMITS`]'s
//! `currency`) and stored as `f64`. They are display and bounds values;
//! ledger arithmetic belongs to the billing services that consume them.

pub mod fancoins;
pub mod gamification;
pub mod pricing;

pub use fancoins::{FANCOIN_PACKAGES, FancoinPackage, fancoin_package};
pub use gamification::{
    FAN_TIERS, FanTier, FanTierInfo, LevelThreshold, MAX_LEVEL, VIRTUAL_GIFTS, VirtualGift,
    XpAction, level_for_xp, level_thresholds, virtual_gift, xp_required,
};
pub use pricing::{
    PAYMENT_PROVIDERS, PAYOUT_CONFIG, PLATFORM_FEES, PaymentMethod, PaymentProvider, PayoutConfig,
    PlatformFees, SUBSCRIPTION_LIMITS, SubscriptionLimits, TIP_LIMITS, TOP_CREATOR_THRESHOLD,
    TipLimits, TransactionCategory, WITHDRAWAL_METHODS, WithdrawalMethod, WithdrawalMethodInfo,
    withdrawal_method,
};
