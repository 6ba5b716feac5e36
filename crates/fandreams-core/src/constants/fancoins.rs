//! FanCoin packages sold in the wallet.

use serde::Serialize;

/// A purchasable bundle of FanCoins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FancoinPackage {
    /// Package identifier referenced by purchase requests.
    pub id: &'static str,
    /// Coins credited, bonus included.
    pub coins: u32,
    /// Price in the platform currency.
    pub price: f64,
    /// Bonus coins on top of the base rate.
    pub bonus: u32,
    /// Display label.
    pub label: &'static str,
}

impl FancoinPackage {
    /// Coins credited before the bonus.
    pub fn base_coins(&self) -> u32 {
        self.coins - self.bonus
    }
}

/// Packages on sale, cheapest first.
pub static FANCOIN_PACKAGES: [FancoinPackage; 5] = [
    FancoinPackage {
        id: "pack_100",
        coins: 100,
        price: 1.0,
        bonus: 0,
        label: "100 FanCoins",
    },
    FancoinPackage {
        id: "pack_500",
        coins: 550,
        price: 5.0,
        bonus: 50,
        label: "550 FanCoins (+10%)",
    },
    FancoinPackage {
        id: "pack_1000",
        coins: 1200,
        price: 10.0,
        bonus: 200,
        label: "1.200 FanCoins (+20%)",
    },
    FancoinPackage {
        id: "pack_5000",
        coins: 6500,
        price: 50.0,
        bonus: 1500,
        label: "6.500 FanCoins (+30%)",
    },
    FancoinPackage {
        id: "pack_10000",
        coins: 15000,
        price: 100.0,
        bonus: 5000,
        label: "15.000 FanCoins (+50%)",
    },
];

/// Find a package by its identifier.
pub fn fancoin_package(id: &str) -> Option<&'static FancoinPackage> {
    FANCOIN_PACKAGES.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PAYOUT_CONFIG;

    #[test]
    fn test_lookup() {
        let pack = fancoin_package("pack_1000").expect("known package");
        assert_eq!(pack.coins, 1200);
        assert_eq!(pack.base_coins(), 1000);
        assert!(fancoin_package("pack_42").is_none());
    }

    #[test]
    fn test_base_rate_matches_payout_conversion() {
        for pack in &FANCOIN_PACKAGES {
            let base_value = pack.base_coins() as f64 * PAYOUT_CONFIG.fancoin_to_brl;
            assert!(
                (base_value - pack.price).abs() < 1e-9,
                "{} base coins are worth {base_value}, priced {}",
                pack.id,
                pack.price
            );
        }
    }
}
