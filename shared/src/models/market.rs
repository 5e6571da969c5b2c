//! Sales commitment models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{round_half_up, whole_u32};

/// Share of subscription baskets sold in each size
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BasketMix {
    pub small: Decimal,
    pub medium: Decimal,
    pub large: Decimal,
}

impl BasketMix {
    pub fn total(&self) -> Decimal {
        self.small + self.medium + self.large
    }
}

impl Default for BasketMix {
    fn default() -> Self {
        Self {
            small: Decimal::new(30, 2),
            medium: Decimal::new(50, 2),
            large: Decimal::new(20, 2),
        }
    }
}

/// Weekly sales commitments of the farm
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MarketConfiguration {
    /// Subscription baskets delivered every week
    pub basket_count: u32,
    pub basket_mix: BasketMix,
    /// Clients served at the market stall every week
    pub stall_clients: u32,
    pub restaurant_accounts: u32,
}

impl MarketConfiguration {
    /// Baskets, stall clients and restaurant accounts added together
    pub fn total_market_units(&self) -> u64 {
        u64::from(self.basket_count)
            + u64::from(self.stall_clients)
            + u64::from(self.restaurant_accounts)
    }

    pub fn is_empty(&self) -> bool {
        self.total_market_units() == 0
    }

    /// Same configuration with every market-unit field scaled and rounded
    /// to the nearest integer independently. The basket mix is kept.
    pub fn scaled(&self, factor: Decimal) -> Self {
        let scale = |count: u32| whole_u32(round_half_up(Decimal::from(count) * factor));
        Self {
            basket_count: scale(self.basket_count),
            basket_mix: self.basket_mix,
            stall_clients: scale(self.stall_clients),
            restaurant_accounts: scale(self.restaurant_accounts),
        }
    }
}
