//! Fan tiers, XP rewards, level curve, and virtual gifts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Fan loyalty tier, earned by accumulating XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanTier {
    /// Entry tier.
    Bronze,
    /// Silver.
    Silver,
    /// Gold.
    Gold,
    /// Diamond.
    Diamond,
    /// Top tier.
    Obsidian,
}

impl FanTier {
    /// Every tier, lowest first.
    pub const ALL: [Self; 5] = [
        Self::Bronze,
        Self::Silver,
        Self::Gold,
        Self::Diamond,
        Self::Obsidian,
    ];

    /// Return the snake_case key of this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Diamond => "diamond",
            Self::Obsidian => "obsidian",
        }
    }

    /// Display data for this tier.
    pub fn info(&self) -> &'static FanTierInfo {
        &FAN_TIERS[*self as usize]
    }

    /// Highest tier whose threshold `xp` reaches.
    pub fn for_xp(xp: u64) -> Self {
        FAN_TIERS
            .iter()
            .rev()
            .find(|t| xp >= t.min_xp)
            .map_or(Self::Bronze, |t| t.tier)
    }
}

impl fmt::Display for FanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FanTier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::not_found(format!("Unknown fan tier '{s}'")))
    }
}

/// Threshold and display data of a fan tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FanTierInfo {
    /// Tier key.
    pub tier: FanTier,
    /// Display name.
    pub name: &'static str,
    /// XP needed to reach the tier.
    pub min_xp: u64,
    /// Badge color, `#RRGGBB`.
    pub color: &'static str,
}

/// Fan tiers, lowest first.
pub static FAN_TIERS: [FanTierInfo; 5] = [
    FanTierInfo {
        tier: FanTier::Bronze,
        name: "Bronze",
        min_xp: 0,
        color: "#CD7F32",
    },
    FanTierInfo {
        tier: FanTier::Silver,
        name: "Prata",
        min_xp: 1000,
        color: "#C0C0C0",
    },
    FanTierInfo {
        tier: FanTier::Gold,
        name: "Ouro",
        min_xp: 5000,
        color: "#FFD700",
    },
    FanTierInfo {
        tier: FanTier::Diamond,
        name: "Diamante",
        min_xp: 25000,
        color: "#B9F2FF",
    },
    FanTierInfo {
        tier: FanTier::Obsidian,
        name: "Obsidian",
        min_xp: 100000,
        color: "#1A1A2E",
    },
];

/// Actions that earn XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XpAction {
    /// First login of the day.
    DailyLogin,
    /// Per day of an ongoing login streak.
    StreakBonusPerDay,
    /// Liking a post.
    LikePost,
    /// Commenting on a post.
    CommentPost,
    /// Sending a tip.
    TipSent,
    /// Subscribing to a creator.
    SubscriptionMade,
    /// Sharing a post.
    SharePost,
    /// Completing a mission.
    CompleteMission,
    /// Watching a battle.
    WatchBattle,
    /// Tipping during a battle.
    TipBattle,
    /// A referred user signed up.
    ReferralSignup,
    /// A referred user subscribed.
    ReferralSubscription,
}

impl XpAction {
    /// Every action, in reward-table order.
    pub const ALL: [Self; 12] = [
        Self::DailyLogin,
        Self::StreakBonusPerDay,
        Self::LikePost,
        Self::CommentPost,
        Self::TipSent,
        Self::SubscriptionMade,
        Self::SharePost,
        Self::CompleteMission,
        Self::WatchBattle,
        Self::TipBattle,
        Self::ReferralSignup,
        Self::ReferralSubscription,
    ];

    /// Return the snake_case key of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DailyLogin => "daily_login",
            Self::StreakBonusPerDay => "streak_bonus_per_day",
            Self::LikePost => "like_post",
            Self::CommentPost => "comment_post",
            Self::TipSent => "tip_sent",
            Self::SubscriptionMade => "subscription_made",
            Self::SharePost => "share_post",
            Self::CompleteMission => "complete_mission",
            Self::WatchBattle => "watch_battle",
            Self::TipBattle => "tip_battle",
            Self::ReferralSignup => "referral_signup",
            Self::ReferralSubscription => "referral_subscription",
        }
    }

    /// XP granted for this action.
    pub fn xp(&self) -> u64 {
        match self {
            Self::DailyLogin => 10,
            Self::StreakBonusPerDay => 5,
            Self::LikePost => 2,
            Self::CommentPost => 5,
            Self::TipSent => 10,
            Self::SubscriptionMade => 50,
            Self::SharePost => 3,
            Self::CompleteMission => 25,
            Self::WatchBattle => 15,
            Self::TipBattle => 20,
            Self::ReferralSignup => 100,
            Self::ReferralSubscription => 200,
        }
    }

    /// Daily login reward including the streak bonus.
    pub fn daily_login_xp(streak_days: u64) -> u64 {
        Self::DailyLogin.xp() + streak_days * Self::StreakBonusPerDay.xp()
    }
}

impl fmt::Display for XpAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for XpAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::not_found(format!("Unknown XP action '{s}'")))
    }
}

/// Number of levels on the XP curve.
pub const MAX_LEVEL: u32 = 100;

/// XP needed to reach a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelThreshold {
    /// Level, starting at 1.
    pub level: u32,
    /// Cumulative XP required.
    pub xp_required: u128,
}

/// Cumulative XP required for `level`: `floor(100 * 1.5^(level - 1))`.
///
/// Returns `None` outside `1..=MAX_LEVEL`. The last level exceeds `u64::MAX`.
pub fn xp_required(level: u32) -> Option<u128> {
    if !(1..=MAX_LEVEL).contains(&level) {
        return None;
    }
    let exponent = i32::try_from(level - 1).ok()?;
    Some((100.0 * 1.5_f64.powi(exponent)).floor() as u128)
}

/// The full level curve, level 1 first.
pub fn level_thresholds() -> Vec<LevelThreshold> {
    (1..=MAX_LEVEL)
        .filter_map(|level| {
            xp_required(level).map(|xp_required| LevelThreshold { level, xp_required })
        })
        .collect()
}

/// Highest level whose threshold `xp` reaches; level 1 below the curve.
pub fn level_for_xp(xp: u64) -> u32 {
    let xp = u128::from(xp);
    (1..=MAX_LEVEL)
        .rev()
        .find(|&level| xp_required(level).is_some_and(|required| xp >= required))
        .unwrap_or(1)
}

/// A gift fans can send during lives and battles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualGift {
    /// Gift identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Icon name.
    pub icon: &'static str,
    /// Cost in FanCoins.
    pub cost: u32,
}

/// Gift catalogue, cheapest first.
pub static VIRTUAL_GIFTS: [VirtualGift; 6] = [
    VirtualGift {
        id: "gift_heart",
        name: "Coracao",
        icon: "heart",
        cost: 10,
    },
    VirtualGift {
        id: "gift_fire",
        name: "Fogo",
        icon: "flame",
        cost: 50,
    },
    VirtualGift {
        id: "gift_star",
        name: "Estrela",
        icon: "star",
        cost: 100,
    },
    VirtualGift {
        id: "gift_crown",
        name: "Coroa",
        icon: "crown",
        cost: 500,
    },
    VirtualGift {
        id: "gift_diamond",
        name: "Diamante",
        icon: "diamond",
        cost: 1000,
    },
    VirtualGift {
        id: "gift_rocket",
        name: "Foguete",
        icon: "rocket",
        cost: 5000,
    },
];

/// Find a gift by its identifier.
pub fn virtual_gift(id: &str) -> Option<&'static VirtualGift> {
    VIRTUAL_GIFTS.iter().find(|g| g.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_tiers_ascend() {
        for pair in FAN_TIERS.windows(2) {
            assert!(pair[0].min_xp < pair[1].min_xp);
        }
        assert_eq!(FAN_TIERS[0].min_xp, 0);
        for tier in FanTier::ALL {
            assert_eq!(tier.info().tier, tier);
        }
    }

    #[test]
    fn test_fan_tier_for_xp() {
        assert_eq!(FanTier::for_xp(0), FanTier::Bronze);
        assert_eq!(FanTier::for_xp(999), FanTier::Bronze);
        assert_eq!(FanTier::for_xp(1000), FanTier::Silver);
        assert_eq!(FanTier::for_xp(24_999), FanTier::Gold);
        assert_eq!(FanTier::for_xp(u64::MAX), FanTier::Obsidian);
        assert_eq!("diamond".parse::<FanTier>().expect("known"), FanTier::Diamond);
        assert!("platinum".parse::<FanTier>().is_err());
    }

    #[test]
    fn test_xp_rewards() {
        assert_eq!(XpAction::SubscriptionMade.xp(), 50);
        assert_eq!(XpAction::daily_login_xp(3), 25);
        for action in XpAction::ALL {
            assert!(action.xp() > 0);
            assert_eq!(action.as_str().parse::<XpAction>().expect("round trip"), action);
        }
    }

    #[test]
    fn test_level_curve() {
        let curve = level_thresholds();
        assert_eq!(curve.len(), MAX_LEVEL as usize);
        assert_eq!(curve[0], LevelThreshold { level: 1, xp_required: 100 });
        assert_eq!(curve[1].xp_required, 150);
        assert_eq!(curve[2].xp_required, 225);
        assert_eq!(curve[3].xp_required, 337);
        for pair in curve.windows(2) {
            assert_eq!(pair[1].level, pair[0].level + 1);
            assert!(pair[1].xp_required > pair[0].xp_required);
        }
        assert!(curve[99].xp_required > u128::from(u64::MAX));
        assert!(xp_required(0).is_none());
        assert!(xp_required(MAX_LEVEL + 1).is_none());
    }

    #[test]
    fn test_level_for_xp() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(149), 1);
        assert_eq!(level_for_xp(150), 2);
        assert_eq!(level_for_xp(337), 4);
        assert_eq!(level_for_xp(u64::MAX), 99);
    }

    #[test]
    fn test_virtual_gifts() {
        for pair in VIRTUAL_GIFTS.windows(2) {
            assert!(pair[0].cost < pair[1].cost);
        }
        assert_eq!(virtual_gift("gift_crown").map(|g| g.cost), Some(500));
        assert!(virtual_gift("gift_unicorn").is_none());
    }
}
