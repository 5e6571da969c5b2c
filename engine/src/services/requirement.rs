//! Bed requirement calculation
//!
//! Converts a crop's seasonal need into a bed count. Long-duration crops use
//! the continuous regime, rotation crops the series regime.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    whole_u32, BedLength, BedRequirement, CropDefinition, MaturityLevel, RegimeFigures,
    SeasonWindow, SizingRegime,
};

/// Manual per-crop adjustments made by the grower
///
/// Yield and rotation overrides replace the catalog figures before sizing;
/// a beds override replaces the computed result.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CropOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_per_bed: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rotations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beds_needed: Option<u32>,
}

/// Overrides keyed by crop id
pub type RequirementOverrides = BTreeMap<String, CropOverride>;

/// Compute the beds a crop needs for the season
pub fn compute_bed_requirement(
    crop: &CropDefinition,
    seasonal_need: Decimal,
    season: &SeasonWindow,
    maturity: MaturityLevel,
    bed_length: BedLength,
    adjustment: Option<&CropOverride>,
) -> BedRequirement {
    let catalog_yield = crop.yield_per_bed(bed_length);
    let raw_yield = match adjustment.and_then(|a| a.yield_per_bed) {
        Some(y) if y > Decimal::ZERO => y,
        Some(y) => {
            tracing::warn!(crop_id = %crop.id, yield_per_bed = %y, "ignoring non-positive yield override");
            catalog_yield
        }
        None => catalog_yield,
    };
    let max_rotations = adjustment
        .and_then(|a| a.max_rotations)
        .unwrap_or(crop.max_rotations)
        .max(1);

    let need = seasonal_need.max(Decimal::ZERO);
    let derated_yield = raw_yield * maturity.coefficient();
    let duration = season.duration_weeks();

    let (computed_beds, rotations_used, figures) = match crop.regime() {
        SizingRegime::Continuous => {
            let (beds, figures) =
                continuous_beds(need, duration, derated_yield, crop.harvest_window_weeks);
            (beds, 1, figures)
        }
        SizingRegime::Series => {
            // Rotation crops are sized on theoretical yield: the maturity
            // coefficient only derates continuous crops. Kept as is pending
            // product review.
            series_beds(need, duration, raw_yield, max_rotations, crop.rotation_weeks())
        }
    };

    let beds_override = adjustment.and_then(|a| a.beds_needed);
    let beds_needed = beds_override.unwrap_or(computed_beds);

    tracing::debug!(
        crop_id = %crop.id,
        regime = ?figures.regime(),
        unit = crop.unit.as_str(),
        seasonal_need = %need,
        computed_beds,
        beds_needed,
        rotations_used,
        "computed bed requirement"
    );

    BedRequirement {
        crop_id: crop.id.clone(),
        bed_length,
        beds_needed,
        computed_beds,
        rotations_used,
        raw_yield_per_bed: raw_yield,
        derated_yield_per_bed: derated_yield,
        figures,
        overridden: beds_override.is_some(),
    }
}

/// Continuous regime: average weekly need against derated weekly yield
fn continuous_beds(
    need: Decimal,
    season_weeks: u32,
    derated_yield: Decimal,
    harvest_window_weeks: u32,
) -> (u32, RegimeFigures) {
    let net_weekly_yield_per_bed = derated_yield / Decimal::from(harvest_window_weeks.max(1));

    if need <= Decimal::ZERO || season_weeks == 0 || net_weekly_yield_per_bed <= Decimal::ZERO {
        return (
            0,
            RegimeFigures::Continuous {
                weekly_average_need: Decimal::ZERO,
                net_weekly_yield_per_bed,
            },
        );
    }

    let weekly_average_need = need / Decimal::from(season_weeks);
    let beds = weekly_average_need
        .checked_div(net_weekly_yield_per_bed)
        .map_or(u32::MAX, |beds| whole_u32(beds.ceil()));

    (
        beds,
        RegimeFigures::Continuous {
            weekly_average_need,
            net_weekly_yield_per_bed,
        },
    )
}

/// Rotations a bed can go through in the season, at least one
pub fn effective_rotations(season_weeks: u32, max_rotations: u32, rotation_weeks: u32) -> u32 {
    let fitting = season_weeks / rotation_weeks.max(1);
    max_rotations.min(fitting).max(1)
}

/// Series regime: plantings needed spread over the rotations of one bed
fn series_beds(
    need: Decimal,
    season_weeks: u32,
    raw_yield: Decimal,
    max_rotations: u32,
    rotation_weeks: u32,
) -> (u32, u32, RegimeFigures) {
    let rotations = effective_rotations(season_weeks, max_rotations, rotation_weeks);

    let number_of_series = if need <= Decimal::ZERO || raw_yield <= Decimal::ZERO {
        0
    } else {
        need
            .checked_div(raw_yield)
            .map_or(u32::MAX, |series| whole_u32(series.ceil()))
    };
    let beds = number_of_series.div_ceil(rotations);

    (
        beds,
        rotations,
        RegimeFigures::Series {
            effective_rotations: rotations,
            number_of_series,
        },
    )
}
