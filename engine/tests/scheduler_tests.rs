//! Series scheduling tests
//!
//! Tests for staggered planting series including:
//! - Harvest-start spacing and back-planning
//! - The cap on staggered series
//! - Week ordering invariants

use engine::schedule_series;
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    BedLength, BedRequirement, CropCategory, CropDefinition, CropSeries, CycleClass,
    RegimeFigures, SaleUnit, SeasonWindow, WeekWindow,
};

fn crop(cycle_class: CycleClass, harvest_window_weeks: u32, nursery_weeks: u32) -> CropDefinition {
    CropDefinition {
        id: "test_crop".to_string(),
        name: "Test crop".to_string(),
        category: CropCategory::LeafyGreen,
        cycle_class,
        unit: SaleUnit::Kg,
        yield_per_bed_15m: Decimal::from(100),
        yield_per_bed_30m: Decimal::from(200),
        harvest_window_weeks,
        nursery_weeks,
        occupation_weeks: 8,
        max_rotations: 4,
        intercalary_rest_weeks: 1,
        unit_price: Decimal::from(3),
        sowing_window: WeekWindow::new(1, 52),
    }
}

fn requirement(beds_needed: u32, rotations_used: u32) -> BedRequirement {
    BedRequirement {
        crop_id: "test_crop".to_string(),
        bed_length: BedLength::Fifteen,
        beds_needed,
        computed_beds: beds_needed,
        rotations_used,
        raw_yield_per_bed: Decimal::from(100),
        derated_yield_per_bed: Decimal::from(100),
        figures: RegimeFigures::Series {
            effective_rotations: rotations_used,
            number_of_series: beds_needed * rotations_used,
        },
        overridden: false,
    }
}

fn assert_ordered(series: &CropSeries) {
    assert!(series.sow_week <= series.transplant_week, "{:?}", series);
    assert!(series.transplant_week <= series.harvest_start_week, "{:?}", series);
    assert!(series.harvest_start_week <= series.harvest_end_week, "{:?}", series);
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_long_duration_single_series() {
        let crop = crop(CycleClass::LongDuration, 12, 6);
        let series = schedule_series(&crop, &requirement(3, 1), &SeasonWindow::new(18, 37), 4);

        assert_eq!(series.len(), 1);
        let first = &series[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.beds, 3);
        assert_eq!(first.harvest_start_week, 18);
        assert_eq!(first.harvest_end_week, 30);
        assert_eq!(first.transplant_week, 12);
        assert_eq!(first.sow_week, 6);
        assert_eq!(first.occupation_weeks, 8);
    }

    #[test]
    fn test_harvest_starts_are_staggered() {
        // spacing = 2 / 3 weeks: 18, 18.67, 19.33, 20
        let crop = crop(CycleClass::FastRotation, 2, 1);
        let series = schedule_series(&crop, &requirement(3, 4), &SeasonWindow::new(18, 37), 4);

        let starts: Vec<u32> = series.iter().map(|s| s.harvest_start_week).collect();
        assert_eq!(starts, vec![18, 19, 19, 20]);
        // ceil(3 / 4)
        assert!(series.iter().all(|s| s.beds == 1));
        let ids: Vec<u32> = series.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_series_count_capped_at_four() {
        let crop = crop(CycleClass::FastRotation, 8, 1);
        let series = schedule_series(&crop, &requirement(12, 6), &SeasonWindow::new(10, 40), 4);
        assert_eq!(series.len(), 4);
        // ceil(12 / 4)
        assert!(series.iter().all(|s| s.beds == 3));
    }

    #[test]
    fn test_series_cap_is_configurable() {
        let crop = crop(CycleClass::FastRotation, 8, 1);
        let series = schedule_series(&crop, &requirement(12, 6), &SeasonWindow::new(10, 40), 2);
        assert_eq!(series.len(), 2);
        assert!(series.iter().all(|s| s.beds == 6));
    }

    #[test]
    fn test_series_past_season_end_are_dropped() {
        // spacing 12 weeks: the second series would start in week 62
        let crop = crop(CycleClass::MediumRotation, 12, 2);
        let series = schedule_series(&crop, &requirement(1, 4), &SeasonWindow::new(50, 52), 4);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].harvest_start_week, 50);
        assert_eq!(series[0].harvest_end_week, 52);
    }

    #[test]
    fn test_back_planning_clamped_to_week_one() {
        let crop = crop(CycleClass::LongDuration, 10, 6);
        let series = schedule_series(&crop, &requirement(2, 1), &SeasonWindow::new(3, 30), 4);

        assert_eq!(series[0].transplant_week, 1);
        assert_eq!(series[0].sow_week, 1);
        assert_ordered(&series[0]);
    }

    #[test]
    fn test_zero_beds_gives_no_series() {
        let crop = crop(CycleClass::FastRotation, 2, 1);
        let series = schedule_series(&crop, &requirement(0, 4), &SeasonWindow::new(18, 37), 4);
        assert!(series.is_empty());
    }

    #[test]
    fn test_harvest_end_bounded_by_season() {
        let crop = crop(CycleClass::LongDuration, 20, 4);
        let series = schedule_series(&crop, &requirement(1, 1), &SeasonWindow::new(30, 40), 4);
        assert_eq!(series[0].harvest_end_week, 40);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn cycle_class_strategy() -> impl Strategy<Value = CycleClass> {
        prop_oneof![
            Just(CycleClass::LongDuration),
            Just(CycleClass::MediumRotation),
            Just(CycleClass::FastRotation),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// sow <= transplant <= harvest start <= harvest end, inside the calendar,
        /// and no harvest starts after the season
        #[test]
        fn prop_series_weeks_ordered(
            cycle_class in cycle_class_strategy(),
            start in 1u32..=52u32,
            length in 0u32..=51u32,
            harvest_window in 1u32..=20u32,
            nursery in 1u32..=10u32,
            beds in 0u32..=30u32,
            rotations in 1u32..=8u32
        ) {
            let season = SeasonWindow::new(start, (start + length).min(52));
            let crop = crop(cycle_class, harvest_window, nursery);
            let series = schedule_series(&crop, &requirement(beds, rotations), &season, 4);

            prop_assert!(series.len() as u32 <= rotations.min(4));
            for (index, s) in series.iter().enumerate() {
                prop_assert_eq!(s.id, index as u32 + 1);
                prop_assert!(s.sow_week >= 1);
                prop_assert!(s.sow_week <= s.transplant_week);
                prop_assert!(s.transplant_week <= s.harvest_start_week);
                prop_assert!(s.harvest_start_week <= s.harvest_end_week);
                prop_assert!(s.harvest_end_week <= 52);
                prop_assert!(s.harvest_start_week <= season.end_week);
            }
        }

        /// Scheduled beds cover the requirement whenever every series fits
        #[test]
        fn prop_series_cover_requirement(
            beds in 1u32..=30u32,
            rotations in 1u32..=4u32
        ) {
            // harvest window 1 week keeps every series inside a long season
            let crop = crop(CycleClass::FastRotation, 1, 1);
            let series = schedule_series(&crop, &requirement(beds, rotations), &SeasonWindow::new(10, 40), 4);
            let total: u32 = series.iter().map(|s| s.beds).sum();
            prop_assert!(total >= beds);
        }
    }
}
