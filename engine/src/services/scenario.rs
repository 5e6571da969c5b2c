//! What-if scenarios along the demand axis
//!
//! Capacity stays fixed; the market configuration is scaled so the plan
//! fills a target share of it, then the whole pipeline is re-run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{whole_u32, CropCatalog, MarketConfiguration, Scenario, ScenarioKind, SeasonWindow};

use super::demand::DemandOracle;
use super::pipeline::{plan, PlanInputs, PlanOutput};
use crate::config::{ChannelPrices, PlannerSettings};
use crate::error::PlannerResult;

/// Generated scenarios with the ratio they were derived from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScenarioSet {
    /// Physical beds per basket, stall client or restaurant account today
    pub beds_per_market_unit: Decimal,
    pub current_beds: u32,
    pub capacity: u32,
    /// Conservative, Balanced, Ambitious, then Current
    pub scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    pub fn get(&self, kind: ScenarioKind) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == kind)
    }
}

/// Season revenue from fixed per-channel weekly prices
pub fn estimate_revenue(
    market: &MarketConfiguration,
    season: &SeasonWindow,
    prices: &ChannelPrices,
) -> Decimal {
    let mix = &market.basket_mix;
    let basket_price = mix.small * prices.small_basket
        + mix.medium * prices.medium_basket
        + mix.large * prices.large_basket;
    let weekly = Decimal::from(market.basket_count) * basket_price
        + Decimal::from(market.stall_clients) * prices.stall_client
        + Decimal::from(market.restaurant_accounts) * prices.restaurant_account;

    (weekly * Decimal::from(season.duration_weeks())).round_dp(2)
}

fn scenario_label(kind: ScenarioKind, ratio: Option<Decimal>) -> String {
    match ratio {
        Some(ratio) => format!(
            "{} ({}% of capacity)",
            kind,
            (ratio * Decimal::ONE_HUNDRED).normalize()
        ),
        None => kind.to_string(),
    }
}

fn to_scenario(
    kind: ScenarioKind,
    ratio: Option<Decimal>,
    market: MarketConfiguration,
    output: &PlanOutput,
) -> Scenario {
    Scenario {
        id: kind,
        label: scenario_label(kind, ratio),
        market,
        total_beds: output.physical_beds_needed,
        fill_rate_percent: output.fill_rate_percent,
        estimated_revenue: output.estimated_revenue,
        viable: output.validation.viable,
    }
}

/// Produce the Conservative, Balanced, Ambitious and Current scenarios
///
/// Every market-unit field is scaled by `target_beds / current_beds`. When
/// the current configuration has no market units or needs no beds, scenarios
/// replay the unscaled configuration.
pub fn generate_scenarios<O>(
    inputs: &PlanInputs,
    catalog: &CropCatalog,
    oracle: &O,
    settings: &PlannerSettings,
) -> PlannerResult<ScenarioSet>
where
    O: DemandOracle + ?Sized,
{
    let current = plan(inputs, catalog, oracle, settings)?;
    let current_beds = current.physical_beds_needed;
    let capacity = current.capacity.total_equivalent_beds;
    let market_units = inputs.market.total_market_units();

    let beds_per_market_unit = if market_units == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(current_beds) / Decimal::from(market_units)).round_dp(4)
    };
    let scalable = market_units > 0 && current_beds > 0;

    let targets = [
        (ScenarioKind::Conservative, settings.scenarios.conservative_fill),
        (ScenarioKind::Balanced, settings.scenarios.balanced_fill),
        (ScenarioKind::Ambitious, settings.scenarios.ambitious_fill),
    ];

    let mut scenarios = Vec::with_capacity(targets.len() + 1);
    for (kind, ratio) in targets {
        let target_beds = whole_u32((Decimal::from(capacity) * ratio).floor());
        let market = if scalable {
            inputs
                .market
                .scaled(Decimal::from(target_beds) / Decimal::from(current_beds))
        } else {
            inputs.market.clone()
        };

        let scenario_inputs = PlanInputs {
            market: market.clone(),
            ..inputs.clone()
        };
        let output = plan(&scenario_inputs, catalog, oracle, settings)?;

        tracing::debug!(
            scenario = %kind,
            target_beds,
            total_beds = output.physical_beds_needed,
            "generated scenario"
        );
        scenarios.push(to_scenario(kind, Some(ratio), market, &output));
    }
    scenarios.push(to_scenario(
        ScenarioKind::Current,
        None,
        inputs.market.clone(),
        &current,
    ));

    Ok(ScenarioSet {
        beds_per_market_unit,
        current_beds,
        capacity,
        scenarios,
    })
}
