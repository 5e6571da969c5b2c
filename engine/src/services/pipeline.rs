//! The planning pipeline
//!
//! A pure function of its inputs: callers re-run it whenever the market,
//! gardens, crop selection, maturity level or bed length changes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    validate_basket_mix, validate_garden, validate_season, BedAssignment, BedLength,
    BedRequirement, CropCatalog, CropDefinition, CropSeries, CycleClass, Garden,
    MarketConfiguration, MaturityLevel, SeasonWindow, ValidationResult,
};

use super::capacity::{normalize_capacity, CapacitySummary};
use super::demand::{seasonal_needs, DemandOracle};
use super::feasibility::{physical_beds_needed, validate_plan};
use super::intercropping::{optimize_intercropping, IntercroppingResult};
use super::requirement::{compute_bed_requirement, RequirementOverrides};
use super::scenario::estimate_revenue;
use super::scheduler::schedule_series;
use crate::config::PlannerSettings;
use crate::error::{PlannerError, PlannerResult};

/// Everything a planning run depends on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanInputs {
    pub market: MarketConfiguration,
    pub gardens: Vec<Garden>,
    /// Selected crops, in display order
    pub crop_ids: Vec<String>,
    #[serde(default)]
    pub maturity: MaturityLevel,
    #[serde(default)]
    pub bed_length: BedLength,
    pub season: SeasonWindow,
    #[serde(default)]
    pub overrides: RequirementOverrides,
    #[serde(default)]
    pub assignments: Vec<BedAssignment>,
}

/// Result for one selected crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CropPlan {
    pub crop_id: String,
    pub crop_name: String,
    pub cycle_class: CycleClass,
    pub seasonal_need: Decimal,
    /// Seasonal need at the crop's unit price
    pub market_value: Decimal,
    pub requirement: BedRequirement,
    pub series: Vec<CropSeries>,
}

/// Full output of a planning run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanOutput {
    pub capacity: CapacitySummary,
    pub crops: Vec<CropPlan>,
    pub intercropping: IntercroppingResult,
    /// Beds to physically assign after intercropping, in 15m-equivalent beds
    pub physical_beds_needed: u32,
    pub fill_rate_percent: Decimal,
    pub estimated_revenue: Decimal,
    pub validation: ValidationResult,
}

impl PlanOutput {
    pub fn crop(&self, crop_id: &str) -> Option<&CropPlan> {
        self.crops.iter().find(|c| c.crop_id == crop_id)
    }
}

/// Share of capacity used, as a percentage with two decimals
pub fn fill_rate_percent(beds: u32, capacity: u32) -> Decimal {
    if capacity == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(beds) * Decimal::ONE_HUNDRED / Decimal::from(capacity)).round_dp(2)
}

fn check_inputs(inputs: &PlanInputs) -> PlannerResult<()> {
    validate_season(&inputs.season).map_err(|message| PlannerError::InvalidSeason {
        start_week: inputs.season.start_week,
        end_week: inputs.season.end_week,
        message,
    })?;
    validate_basket_mix(&inputs.market.basket_mix).map_err(PlannerError::InvalidMarket)?;
    for garden in &inputs.gardens {
        validate_garden(garden)?;
    }
    Ok(())
}

/// Resolve selected ids against the catalog, dropping repeats
fn select_crops<'a>(
    catalog: &'a CropCatalog,
    crop_ids: &[String],
) -> PlannerResult<Vec<&'a CropDefinition>> {
    let mut selected: Vec<&CropDefinition> = Vec::with_capacity(crop_ids.len());
    for id in crop_ids {
        let crop = catalog
            .get(id)
            .ok_or_else(|| PlannerError::UnknownCrop(id.clone()))?;
        if !selected.iter().any(|c| c.id == crop.id) {
            selected.push(crop);
        }
    }
    Ok(selected)
}

/// Run the whole pipeline for one set of inputs
pub fn plan<O>(
    inputs: &PlanInputs,
    catalog: &CropCatalog,
    oracle: &O,
    settings: &PlannerSettings,
) -> PlannerResult<PlanOutput>
where
    O: DemandOracle + ?Sized,
{
    check_inputs(inputs)?;
    let selected = select_crops(catalog, &inputs.crop_ids)?;

    let capacity = normalize_capacity(&inputs.gardens);

    let ids: Vec<&str> = selected.iter().map(|c| c.id.as_str()).collect();
    let needs = seasonal_needs(oracle, &inputs.market, &inputs.season, &ids);

    let crops: Vec<CropPlan> = selected
        .iter()
        .map(|crop| {
            let seasonal_need = needs.get(&crop.id).copied().unwrap_or(Decimal::ZERO);
            let requirement = compute_bed_requirement(
                crop,
                seasonal_need,
                &inputs.season,
                inputs.maturity,
                inputs.bed_length,
                inputs.overrides.get(&crop.id),
            );
            let series = schedule_series(
                crop,
                &requirement,
                &inputs.season,
                settings.scheduling.max_staggered_series,
            );
            CropPlan {
                crop_id: crop.id.clone(),
                crop_name: crop.name.clone(),
                cycle_class: crop.cycle_class,
                seasonal_need,
                market_value: seasonal_need.saturating_mul(crop.unit_price).round_dp(2),
                requirement,
                series,
            }
        })
        .collect();

    let requirements: Vec<BedRequirement> = crops.iter().map(|c| c.requirement.clone()).collect();
    let intercropping = optimize_intercropping(&requirements, &settings.intercropping);

    let physical = physical_beds_needed(&crops, &intercropping, inputs.bed_length);
    let validation = validate_plan(
        &crops,
        catalog,
        &capacity,
        &intercropping,
        &inputs.assignments,
        inputs.bed_length,
    );
    let fill_rate = fill_rate_percent(physical, capacity.total_equivalent_beds);
    let revenue = estimate_revenue(&inputs.market, &inputs.season, &settings.pricing);

    tracing::info!(
        crops = crops.len(),
        physical_beds_needed = physical,
        capacity = capacity.total_equivalent_beds,
        viable = validation.viable,
        "planning run complete"
    );

    Ok(PlanOutput {
        capacity,
        crops,
        intercropping,
        physical_beds_needed: physical,
        fill_rate_percent: fill_rate,
        estimated_revenue: revenue,
        validation,
    })
}
