//! Pricing and limits tables.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat, money, percent};
use fandreams_core::constants::{
    FAN_TIERS, FANCOIN_PACKAGES, PAYMENT_PROVIDERS, PAYOUT_CONFIG, PLATFORM_FEES,
    SUBSCRIPTION_LIMITS, TIP_LIMITS, TOP_CREATOR_THRESHOLD, VIRTUAL_GIFTS, WITHDRAWAL_METHODS,
    WithdrawalMethod, XpAction, level_thresholds,
};
use fandreams_core::error::AppError;

/// Arguments for pricing commands
#[derive(Debug, Args)]
pub struct PricingArgs {
    /// Pricing subcommand
    #[command(subcommand)]
    pub command: PricingCommand,
}

/// Pricing subcommands
#[derive(Debug, Subcommand)]
pub enum PricingCommand {
    /// Platform fee per transaction category
    Fees,
    /// Payout schedule and withdrawal limits
    Payout,
    /// Subscription, tip, and top-creator limits
    Limits,
    /// Withdrawal methods
    Withdrawals,
    /// Payment providers
    Providers,
    /// FanCoin packages
    Packages,
    /// Fan tiers and their XP thresholds
    Tiers,
    /// XP granted per action
    Xp,
    /// XP required per level
    Levels,
    /// Virtual gift catalogue
    Gifts,
}

/// Fee table row
#[derive(Debug, Serialize, Tabled)]
struct FeeRow {
    /// Category key
    category: String,
    /// Rate as a fraction
    rate: f64,
    /// Rate as a percentage
    percent: String,
}

/// Key/value row for single-record tables
#[derive(Debug, Serialize, Tabled)]
struct SettingRow {
    /// Setting name
    setting: String,
    /// Setting value
    value: String,
}

/// Withdrawal method row
#[derive(Debug, Serialize, Tabled)]
struct WithdrawalRow {
    /// Method key
    method: String,
    /// Display label
    label: String,
    /// Minimum amount
    min_amount: f64,
    /// Processing time shown to creators
    processing_time: String,
}

/// Payment provider row
#[derive(Debug, Serialize, Tabled)]
struct ProviderRow {
    /// Provider key
    provider: String,
    /// Display label
    label: String,
    /// Supported methods
    methods: String,
}

/// FanCoin package row
#[derive(Debug, Serialize, Tabled)]
struct PackageRow {
    /// Package ID
    id: String,
    /// Coins credited
    coins: u32,
    /// Bonus coins
    bonus: u32,
    /// Price
    price: f64,
    /// Display label
    label: String,
}

/// Fan tier row
#[derive(Debug, Serialize, Tabled)]
struct TierRow {
    /// Tier key
    tier: String,
    /// Display name
    name: String,
    /// XP threshold
    min_xp: u64,
    /// Badge color
    color: String,
}

/// XP reward row
#[derive(Debug, Serialize, Tabled)]
struct XpRow {
    /// Action key
    action: String,
    /// XP granted
    xp: u64,
}

/// Level curve row
#[derive(Debug, Serialize, Tabled)]
struct LevelRow {
    /// Level
    level: u32,
    /// Cumulative XP required
    xp_required: u128,
}

/// Virtual gift row
#[derive(Debug, Serialize, Tabled)]
struct GiftRow {
    /// Gift ID
    id: String,
    /// Display name
    name: String,
    /// Icon name
    icon: String,
    /// Cost in FanCoins
    cost: u32,
}

/// Execute pricing commands
pub fn execute(args: &PricingArgs, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        PricingCommand::Fees => output::print_list(&fee_rows(), format),
        PricingCommand::Payout => output::print_list(&payout_rows(), format),
        PricingCommand::Limits => output::print_list(&limit_rows(), format),
        PricingCommand::Withdrawals => {
            let rows: Vec<WithdrawalRow> = WITHDRAWAL_METHODS
                .iter()
                .map(|m| WithdrawalRow {
                    method: m.method.to_string(),
                    label: m.label.to_string(),
                    min_amount: m.min_amount,
                    processing_time: m.processing_time.to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        PricingCommand::Providers => {
            let rows: Vec<ProviderRow> = PAYMENT_PROVIDERS
                .iter()
                .map(|p| ProviderRow {
                    provider: p.key.to_string(),
                    label: p.label.to_string(),
                    methods: p
                        .methods
                        .iter()
                        .map(|m| m.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                })
                .collect();
            output::print_list(&rows, format);
        }
        PricingCommand::Packages => {
            let rows: Vec<PackageRow> = FANCOIN_PACKAGES
                .iter()
                .map(|p| PackageRow {
                    id: p.id.to_string(),
                    coins: p.coins,
                    bonus: p.bonus,
                    price: p.price,
                    label: p.label.to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        PricingCommand::Tiers => {
            let rows: Vec<TierRow> = FAN_TIERS
                .iter()
                .map(|t| TierRow {
                    tier: t.tier.to_string(),
                    name: t.name.to_string(),
                    min_xp: t.min_xp,
                    color: t.color.to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        PricingCommand::Xp => output::print_list(&xp_rows(), format),
        PricingCommand::Levels => {
            let rows: Vec<LevelRow> = level_thresholds()
                .into_iter()
                .map(|t| LevelRow {
                    level: t.level,
                    xp_required: t.xp_required,
                })
                .collect();
            output::print_list(&rows, format);
        }
        PricingCommand::Gifts => {
            let rows: Vec<GiftRow> = VIRTUAL_GIFTS
                .iter()
                .map(|g| GiftRow {
                    id: g.id.to_string(),
                    name: g.name.to_string(),
                    icon: g.icon.to_string(),
                    cost: g.cost,
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}

fn fee_rows() -> Vec<FeeRow> {
    PLATFORM_FEES
        .entries()
        .map(|(category, rate)| FeeRow {
            category: category.to_string(),
            rate,
            percent: percent(rate),
        })
        .collect()
}

fn xp_rows() -> Vec<XpRow> {
    XpAction::ALL
        .into_iter()
        .map(|action| XpRow {
            action: action.to_string(),
            xp: action.xp(),
        })
        .collect()
}

fn payout_rows() -> Vec<SettingRow> {
    let currency = SUBSCRIPTION_LIMITS.currency;
    let days = PAYOUT_CONFIG
        .payout_days
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let mut rows = vec![
        setting("min_payout", money(PAYOUT_CONFIG.min_payout, currency)),
        setting("payout_days", days),
    ];
    for method in WithdrawalMethod::ALL {
        rows.push(setting(
            &format!("{method}_processing_time"),
            PAYOUT_CONFIG.processing_time(method).to_string(),
        ));
    }
    rows.extend([
        setting(
            "manual_approval_threshold",
            money(PAYOUT_CONFIG.manual_approval_threshold, currency),
        ),
        setting("cooldown_hours", PAYOUT_CONFIG.cooldown_hours.to_string()),
        setting(
            "max_daily_withdrawals",
            PAYOUT_CONFIG.max_daily_withdrawals.to_string(),
        ),
        setting(
            "max_daily_amount",
            money(PAYOUT_CONFIG.max_daily_amount, currency),
        ),
        setting("fancoin_to_brl", PAYOUT_CONFIG.fancoin_to_brl.to_string()),
    ]);
    rows
}

fn limit_rows() -> Vec<SettingRow> {
    let currency = SUBSCRIPTION_LIMITS.currency;
    vec![
        setting("currency", currency.to_string()),
        setting(
            "subscription_min_price",
            money(SUBSCRIPTION_LIMITS.min_price, currency),
        ),
        setting(
            "subscription_max_price",
            money(SUBSCRIPTION_LIMITS.max_price, currency),
        ),
        setting(
            "subscription_max_tiers",
            SUBSCRIPTION_LIMITS.max_tiers.to_string(),
        ),
        setting("tip_min", money(TIP_LIMITS.min_tip, currency)),
        setting("tip_max", money(TIP_LIMITS.max_tip, currency)),
        setting(
            "top_creator_threshold",
            money(TOP_CREATOR_THRESHOLD, currency),
        ),
    ]
}

fn setting(name: &str, value: String) -> SettingRow {
    SettingRow {
        setting: name.to_string(),
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_rows_cover_every_category() {
        let rows = fee_rows();
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0].category, "subscription");
        assert_eq!(rows[0].percent, "12%");
    }

    #[test]
    fn test_payout_rows_list_processing_times() {
        let rows = payout_rows();
        let pix = rows
            .iter()
            .find(|r| r.setting == "pix_processing_time")
            .expect("pix row");
        assert_eq!(pix.value, "instant");
        assert!(rows.iter().any(|r| r.setting == "payout_days" && r.value == "1, 15"));
    }

    #[test]
    fn test_xp_rows_follow_reward_table() {
        let rows = xp_rows();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].action, "daily_login");
        assert_eq!(rows[0].xp, 10);
        assert!(rows.iter().any(|r| r.action == "referral_subscription" && r.xp == 200));
    }

    #[test]
    fn test_gamification_tables_print() {
        for command in [
            PricingCommand::Tiers,
            PricingCommand::Xp,
            PricingCommand::Levels,
            PricingCommand::Gifts,
        ] {
            let args = PricingArgs { command };
            execute(&args, OutputFormat::Json).expect("print table");
        }
    }

    #[test]
    fn test_limit_rows_use_currency() {
        let rows = limit_rows();
        let tip_max = rows.iter().find(|r| r.setting == "tip_max").expect("tip_max row");
        assert_eq!(tip_max.value, "BRL 50000.00");
    }
}
