//! Series scheduling: staggered sow, transplant and harvest weeks

use rust_decimal::Decimal;
use shared::{
    clamp_week, round_half_up, whole_u32, BedRequirement, CropDefinition, CropSeries,
    SeasonWindow,
};

/// Expand a bed requirement into dated planting series
///
/// Harvest starts are spaced `harvest_window / beds_needed` weeks apart from
/// the season start; series whose harvest would start after the season ends
/// are dropped. Transplant and sowing are back-planned from the harvest start
/// using the nursery duration for both offsets.
pub fn schedule_series(
    crop: &CropDefinition,
    requirement: &BedRequirement,
    season: &SeasonWindow,
    max_staggered_series: u32,
) -> Vec<CropSeries> {
    let beds_needed = requirement.beds_needed;
    if beds_needed == 0 || season.duration_weeks() == 0 {
        return Vec::new();
    }

    let spacing = Decimal::from(crop.harvest_window_weeks) / Decimal::from(beds_needed);
    let series_count = requirement
        .rotations_used
        .min(max_staggered_series)
        .max(1);
    let beds_per_series = beds_needed.div_ceil(series_count);
    let nursery = i64::from(crop.nursery_weeks);

    let mut series = Vec::with_capacity(series_count as usize);
    for index in 0..series_count {
        let offset = Decimal::from(index) * spacing;
        let raw_start = whole_u32(round_half_up(Decimal::from(season.start_week) + offset));
        if raw_start > season.end_week {
            break;
        }
        let harvest_start = clamp_week(i64::from(raw_start));
        let harvest_end = clamp_week(i64::from(
            (harvest_start + crop.harvest_window_weeks).min(season.end_week),
        ))
        .max(harvest_start);
        let transplant_week = clamp_week(i64::from(harvest_start) - nursery);
        let sow_week = clamp_week(i64::from(transplant_week) - nursery);

        series.push(CropSeries {
            id: index + 1,
            beds: beds_per_series,
            sow_week,
            transplant_week,
            harvest_start_week: harvest_start,
            harvest_end_week: harvest_end,
            occupation_weeks: crop.occupation_weeks,
        });
    }

    tracing::debug!(
        crop_id = %crop.id,
        series = series.len(),
        beds_per_series,
        "scheduled planting series"
    );

    series
}
