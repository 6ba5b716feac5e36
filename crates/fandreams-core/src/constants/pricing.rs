//! Platform fees, payout policy, and subscription/tip limits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Transaction categories that carry a platform fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCategory {
    /// Recurring subscription payment.
    Subscription,
    /// One-off tip to a creator.
    Tip,
    /// Pay-per-view unlock.
    Ppv,
    /// Purchase of FanCoins.
    FancoinPurchase,
    /// Marketplace sale.
    Marketplace,
    /// Subscription to a creator above [`TOP_CREATOR_THRESHOLD`].
    TopCreatorSubscription,
    /// Introductory-offer subscription.
    Introductory,
}

impl TransactionCategory {
    /// Every category, in fee-table order.
    pub const ALL: [Self; 7] = [
        Self::Subscription,
        Self::Tip,
        Self::Ppv,
        Self::FancoinPurchase,
        Self::Marketplace,
        Self::TopCreatorSubscription,
        Self::Introductory,
    ];

    /// Return the snake_case key of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subscription => "subscription",
            Self::Tip => "tip",
            Self::Ppv => "ppv",
            Self::FancoinPurchase => "fancoin_purchase",
            Self::Marketplace => "marketplace",
            Self::TopCreatorSubscription => "top_creator_subscription",
            Self::Introductory => "introductory",
        }
    }
}

impl fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::not_found(format!("Unknown fee category '{s}'")))
    }
}

/// Fractional platform fee per transaction category.
///
/// Every rate lies in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlatformFees {
    /// Subscription fee.
    pub subscription: f64,
    /// Tip fee.
    pub tip: f64,
    /// Pay-per-view fee.
    pub ppv: f64,
    /// FanCoin purchase fee.
    pub fancoin_purchase: f64,
    /// Marketplace fee.
    pub marketplace: f64,
    /// Reduced subscription fee for top creators.
    pub top_creator_subscription: f64,
    /// Introductory-offer fee.
    pub introductory: f64,
}

impl PlatformFees {
    /// Look up the rate for a category.
    pub fn rate(&self, category: TransactionCategory) -> f64 {
        match category {
            TransactionCategory::Subscription => self.subscription,
            TransactionCategory::Tip => self.tip,
            TransactionCategory::Ppv => self.ppv,
            TransactionCategory::FancoinPurchase => self.fancoin_purchase,
            TransactionCategory::Marketplace => self.marketplace,
            TransactionCategory::TopCreatorSubscription => self.top_creator_subscription,
            TransactionCategory::Introductory => self.introductory,
        }
    }

    /// Iterate `(category, rate)` pairs in fee-table order.
    pub fn entries(self) -> impl Iterator<Item = (TransactionCategory, f64)> {
        TransactionCategory::ALL
            .into_iter()
            .map(move |category| (category, self.rate(category)))
    }
}

/// Platform fee schedule applied to every settled transaction.
pub const PLATFORM_FEES: PlatformFees = PlatformFees {
    subscription: 0.12,
    tip: 0.08,
    ppv: 0.12,
    fancoin_purchase: 0.10,
    marketplace: 0.15,
    top_creator_subscription: 0.10,
    introductory: 0.10,
};

/// Destination types for creator withdrawals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalMethod {
    /// Brazilian instant payment.
    Pix,
    /// Bank wire.
    BankTransfer,
    /// Stablecoin transfer.
    Crypto,
}

impl WithdrawalMethod {
    /// Every withdrawal method.
    pub const ALL: [Self; 3] = [Self::Pix, Self::BankTransfer, Self::Crypto];

    /// Return the snake_case key of this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pix => "pix",
            Self::BankTransfer => "bank_transfer",
            Self::Crypto => "crypto",
        }
    }
}

impl fmt::Display for WithdrawalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WithdrawalMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::not_found(format!("Unknown withdrawal method '{s}'")))
    }
}

/// Payout scheduling and withdrawal safety limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayoutConfig {
    /// Minimum accumulated balance before a payout is issued.
    pub min_payout: f64,
    /// Days of the month on which scheduled payouts run.
    pub payout_days: &'static [u32],
    /// Processing time shown for PIX payouts.
    pub pix_processing_time: &'static str,
    /// Processing time shown for bank transfers.
    pub bank_transfer_processing_time: &'static str,
    /// Processing time shown for crypto payouts.
    pub crypto_processing_time: &'static str,
    /// Withdrawals above this amount need an admin approval.
    pub manual_approval_threshold: f64,
    /// Minimum gap between two withdrawals, in hours.
    pub cooldown_hours: u32,
    /// Maximum withdrawals per creator per day.
    pub max_daily_withdrawals: u32,
    /// Maximum withdrawn amount per creator per day.
    pub max_daily_amount: f64,
    /// Value of one FanCoin in the platform currency.
    pub fancoin_to_brl: f64,
}

impl PayoutConfig {
    /// Processing-time descriptor for a payout method.
    pub fn processing_time(&self, method: WithdrawalMethod) -> &'static str {
        match method {
            WithdrawalMethod::Pix => self.pix_processing_time,
            WithdrawalMethod::BankTransfer => self.bank_transfer_processing_time,
            WithdrawalMethod::Crypto => self.crypto_processing_time,
        }
    }

    /// Whether scheduled payouts run on the given day of the month.
    pub fn is_payout_day(&self, day_of_month: u32) -> bool {
        self.payout_days.contains(&day_of_month)
    }
}

/// Creator payout policy.
pub const PAYOUT_CONFIG: PayoutConfig = PayoutConfig {
    min_payout: 50.0,
    payout_days: &[1, 15],
    pix_processing_time: "instant",
    bank_transfer_processing_time: "1-3 business days",
    crypto_processing_time: "10-30 minutes",
    manual_approval_threshold: 500.0,
    cooldown_hours: 24,
    max_daily_withdrawals: 3,
    max_daily_amount: 10000.0,
    fancoin_to_brl: 0.01,
};

/// Payment methods accepted at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// PIX instant payment.
    Pix,
    /// Credit card.
    CreditCard,
    /// Cryptocurrency.
    Crypto,
    /// PayPal balance or card.
    Paypal,
}

impl PaymentMethod {
    /// Return the snake_case key of this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pix => "pix",
            Self::CreditCard => "credit_card",
            Self::Crypto => "crypto",
            Self::Paypal => "paypal",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An external payment gateway and the methods it processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentProvider {
    /// Provider key.
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Methods routed through this provider.
    pub methods: &'static [PaymentMethod],
}

impl PaymentProvider {
    /// Whether this provider processes `method`.
    pub fn supports(&self, method: PaymentMethod) -> bool {
        self.methods.contains(&method)
    }

    /// Find the provider that processes `method`.
    pub fn for_method(method: PaymentMethod) -> Option<&'static PaymentProvider> {
        PAYMENT_PROVIDERS.iter().find(|p| p.supports(method))
    }
}

/// Payment gateways, in routing preference order.
pub const PAYMENT_PROVIDERS: &[PaymentProvider] = &[
    PaymentProvider {
        key: "mercadopago",
        label: "MercadoPago",
        methods: &[PaymentMethod::Pix, PaymentMethod::CreditCard],
    },
    PaymentProvider {
        key: "nowpayments",
        label: "Crypto",
        methods: &[PaymentMethod::Crypto],
    },
    PaymentProvider {
        key: "paypal",
        label: "PayPal",
        methods: &[PaymentMethod::Paypal],
    },
];

/// Withdrawal method as shown to creators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WithdrawalMethodInfo {
    /// Method key.
    pub method: WithdrawalMethod,
    /// Display label.
    pub label: &'static str,
    /// Minimum amount per withdrawal.
    pub min_amount: f64,
    /// Localized processing-time descriptor.
    pub processing_time: &'static str,
}

/// Withdrawal methods offered to creators.
pub static WITHDRAWAL_METHODS: [WithdrawalMethodInfo; 3] = [
    WithdrawalMethodInfo {
        method: WithdrawalMethod::Pix,
        label: "PIX",
        min_amount: 10.0,
        processing_time: "Instantaneo",
    },
    WithdrawalMethodInfo {
        method: WithdrawalMethod::BankTransfer,
        label: "Transferencia Bancaria",
        min_amount: 50.0,
        processing_time: "1-3 dias uteis",
    },
    WithdrawalMethodInfo {
        method: WithdrawalMethod::Crypto,
        label: "Crypto (USDT)",
        min_amount: 20.0,
        processing_time: "10-30 minutos",
    },
];

/// Look up the display entry for a withdrawal method.
pub fn withdrawal_method(method: WithdrawalMethod) -> &'static WithdrawalMethodInfo {
    match method {
        WithdrawalMethod::Pix => &WITHDRAWAL_METHODS[0],
        WithdrawalMethod::BankTransfer => &WITHDRAWAL_METHODS[1],
        WithdrawalMethod::Crypto => &WITHDRAWAL_METHODS[2],
    }
}

/// Bounds on creator-defined subscription tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubscriptionLimits {
    /// Lowest allowed tier price.
    pub min_price: f64,
    /// Highest allowed tier price.
    pub max_price: f64,
    /// Maximum tiers per creator.
    pub max_tiers: u32,
    /// ISO 4217 currency code of every amount on the platform.
    pub currency: &'static str,
}

impl SubscriptionLimits {
    /// Whether `price` lies within `[min_price, max_price]`.
    pub fn allows_price(&self, price: f64) -> bool {
        price >= self.min_price && price <= self.max_price
    }
}

/// Bounds for creator-defined subscription tiers.
pub const SUBSCRIPTION_LIMITS: SubscriptionLimits = SubscriptionLimits {
    min_price: 5.0,
    max_price: 5000.0,
    max_tiers: 5,
    currency: "BRL",
};

/// Bounds on a single tip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TipLimits {
    /// Smallest tip.
    pub min_tip: f64,
    /// Largest tip.
    pub max_tip: f64,
}

impl TipLimits {
    /// Whether `amount` lies within `[min_tip, max_tip]`.
    pub fn allows(&self, amount: f64) -> bool {
        amount >= self.min_tip && amount <= self.max_tip
    }
}

/// Bounds for a single tip.
pub const TIP_LIMITS: TipLimits = TipLimits {
    min_tip: 1.0,
    max_tip: 50000.0,
};

/// Cumulative earnings above which a creator gets the top-creator fee.
pub const TOP_CREATOR_THRESHOLD: f64 = 50000.0;
