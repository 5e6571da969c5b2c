//! Weekly demand: the oracle seam and seasonal aggregation
//!
//! The oracle turns a market configuration into per-crop quantities for one
//! week. A crop missing from a week's answer needs nothing that week.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{BasketMix, MarketConfiguration, SeasonWindow, WeekWindow};

/// Quantity needed per sales channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ChannelBreakdown {
    pub baskets: Decimal,
    pub stall: Decimal,
    pub restaurants: Decimal,
}

impl ChannelBreakdown {
    pub fn total(&self) -> Decimal {
        self.baskets
            .saturating_add(self.stall)
            .saturating_add(self.restaurants)
    }
}

/// One crop's need for one week
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CropNeed {
    pub channels: ChannelBreakdown,
    pub total: Decimal,
}

impl From<ChannelBreakdown> for CropNeed {
    fn from(channels: ChannelBreakdown) -> Self {
        Self {
            channels,
            total: channels.total(),
        }
    }
}

/// Needs of one week, keyed by crop id
pub type WeeklyNeeds = BTreeMap<String, CropNeed>;

/// Source of weekly per-crop demand for a market configuration
pub trait DemandOracle {
    fn need_for(&self, market: &MarketConfiguration, week: u32) -> WeeklyNeeds;
}

impl<F> DemandOracle for F
where
    F: Fn(&MarketConfiguration, u32) -> WeeklyNeeds,
{
    fn need_for(&self, market: &MarketConfiguration, week: u32) -> WeeklyNeeds {
        self(market, week)
    }
}

/// What one crop contributes to each channel while it is available
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompositionEntry {
    pub crop_id: String,
    /// Weeks the crop goes into baskets and onto the stall
    pub available: WeekWindow,
    pub per_small_basket: Decimal,
    pub per_medium_basket: Decimal,
    pub per_large_basket: Decimal,
    pub per_stall_client: Decimal,
    pub per_restaurant: Decimal,
}

/// Seasonal composition lookup used as the default oracle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct CompositionTable {
    entries: Vec<CompositionEntry>,
}

impl CompositionTable {
    pub fn new(entries: Vec<CompositionEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CompositionEntry] {
        &self.entries
    }
}

impl DemandOracle for CompositionTable {
    fn need_for(&self, market: &MarketConfiguration, week: u32) -> WeeklyNeeds {
        let mix = &market.basket_mix;
        let baskets = Decimal::from(market.basket_count);
        let stall = Decimal::from(market.stall_clients);
        let restaurants = Decimal::from(market.restaurant_accounts);

        let mut needs = WeeklyNeeds::new();
        for entry in self.entries.iter().filter(|e| e.available.contains(week)) {
            let Some(channels) = entry_channels(entry, mix, baskets, stall, restaurants) else {
                tracing::warn!(crop_id = %entry.crop_id, week, "skipping composition entry that overflows");
                continue;
            };
            let need = needs.entry(entry.crop_id.clone()).or_default();
            need.channels.baskets = need.channels.baskets.saturating_add(channels.baskets);
            need.channels.stall = need.channels.stall.saturating_add(channels.stall);
            need.channels.restaurants = need.channels.restaurants.saturating_add(channels.restaurants);
            need.total = need.channels.total();
        }
        needs
    }
}

/// Channel quantities of one entry, `None` when they overflow
fn entry_channels(
    entry: &CompositionEntry,
    mix: &BasketMix,
    baskets: Decimal,
    stall: Decimal,
    restaurants: Decimal,
) -> Option<ChannelBreakdown> {
    let per_basket = mix
        .small
        .checked_mul(entry.per_small_basket)?
        .checked_add(mix.medium.checked_mul(entry.per_medium_basket)?)?
        .checked_add(mix.large.checked_mul(entry.per_large_basket)?)?;
    Some(ChannelBreakdown {
        baskets: baskets.checked_mul(per_basket)?,
        stall: stall.checked_mul(entry.per_stall_client)?,
        restaurants: restaurants.checked_mul(entry.per_restaurant)?,
    })
}

/// Sum the oracle's weekly answers over the season for each requested crop
///
/// The oracle is queried once per week. Absent crops count as zero and
/// negative answers are ignored.
pub fn seasonal_needs<O>(
    oracle: &O,
    market: &MarketConfiguration,
    season: &SeasonWindow,
    crop_ids: &[&str],
) -> BTreeMap<String, Decimal>
where
    O: DemandOracle + ?Sized,
{
    let mut totals: BTreeMap<String, Decimal> = crop_ids
        .iter()
        .map(|id| (id.to_string(), Decimal::ZERO))
        .collect();

    for week in season.weeks() {
        let weekly = oracle.need_for(market, week);
        for (crop_id, total) in totals.iter_mut() {
            if let Some(need) = weekly.get(crop_id) {
                *total = total.saturating_add(need.total.max(Decimal::ZERO));
            }
        }
    }

    tracing::debug!(
        weeks = season.duration_weeks(),
        crops = totals.len(),
        "aggregated seasonal needs"
    );

    totals
}
