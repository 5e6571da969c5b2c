//! Validation utilities for the market-garden planner
//!
//! Catalog definitions are checked once, when the catalog is loaded, so the
//! calculation pipeline never sees a malformed crop.

use rust_decimal::Decimal;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::models::{BasketMix, CropDefinition, Garden, SeasonWindow};
use crate::types::BedLength;

/// Tolerance on the basket mix adding up to 1
pub const BASKET_MIX_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// A crop definition the catalog refuses to load
#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("Crop '{crop_id}' has a non-positive yield for {bed_length} beds")]
    NonPositiveYield {
        crop_id: String,
        bed_length: BedLength,
    },

    #[error("Crop '{crop_id}' has a negative unit price")]
    NegativePrice { crop_id: String },

    #[error("Crop '{crop_id}' is malformed: {source}")]
    Malformed {
        crop_id: String,
        #[source]
        source: ValidationErrors,
    },

    #[error("Crop '{0}' is defined more than once")]
    DuplicateCrop(String),

    #[error("Catalog could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

// ============================================================================
// Catalog Validations
// ============================================================================

/// Validate a crop definition before it enters the catalog
///
/// Rejects non-positive yields, harvest windows, nursery and occupation
/// durations, rotation counts, and sowing windows outside weeks 1-52.
pub fn validate_crop_definition(crop: &CropDefinition) -> Result<(), DefinitionError> {
    crop.validate().map_err(|source| DefinitionError::Malformed {
        crop_id: crop.id.clone(),
        source,
    })?;

    for bed_length in [BedLength::Fifteen, BedLength::Thirty] {
        if crop.yield_per_bed(bed_length) <= Decimal::ZERO {
            return Err(DefinitionError::NonPositiveYield {
                crop_id: crop.id.clone(),
                bed_length,
            });
        }
    }

    if crop.unit_price < Decimal::ZERO {
        return Err(DefinitionError::NegativePrice {
            crop_id: crop.id.clone(),
        });
    }

    Ok(())
}

// ============================================================================
// Planning Input Validations
// ============================================================================

/// Validate that basket size fractions are non-negative and sum to about 1
pub fn validate_basket_mix(mix: &BasketMix) -> Result<(), &'static str> {
    if mix.small < Decimal::ZERO || mix.medium < Decimal::ZERO || mix.large < Decimal::ZERO {
        return Err("Basket size fractions cannot be negative");
    }
    if (mix.total() - Decimal::ONE).abs() > BASKET_MIX_TOLERANCE {
        return Err("Basket size fractions must sum to 1");
    }
    Ok(())
}

/// Validate that a season lies within weeks 1-52 and does not end before it starts
pub fn validate_season(season: &SeasonWindow) -> Result<(), &'static str> {
    if season.validate().is_err() {
        return Err("Season weeks must be between 1 and 52");
    }
    if season.end_week < season.start_week {
        return Err("Season cannot end before it starts");
    }
    Ok(())
}

/// Validate a garden record
pub fn validate_garden(garden: &Garden) -> Result<(), ValidationErrors> {
    garden.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropCategory, CycleClass, WeekWindow};
    use crate::types::SaleUnit;

    fn carrot() -> CropDefinition {
        CropDefinition {
            id: "carrot".to_string(),
            name: "Carrot".to_string(),
            category: CropCategory::Root,
            cycle_class: CycleClass::MediumRotation,
            unit: SaleUnit::Kg,
            yield_per_bed_15m: Decimal::from(100),
            yield_per_bed_30m: Decimal::from(200),
            harvest_window_weeks: 4,
            nursery_weeks: 2,
            occupation_weeks: 14,
            max_rotations: 2,
            intercalary_rest_weeks: 2,
            unit_price: Decimal::new(250, 2),
            sowing_window: WeekWindow::new(12, 26),
        }
    }

    // ========================================================================
    // Catalog Validation Tests
    // ========================================================================

    #[test]
    fn test_valid_definition() {
        assert!(validate_crop_definition(&carrot()).is_ok());
    }

    #[test]
    fn test_zero_yield_rejected() {
        let mut crop = carrot();
        crop.yield_per_bed_30m = Decimal::ZERO;
        assert!(matches!(
            validate_crop_definition(&crop),
            Err(DefinitionError::NonPositiveYield {
                bed_length: BedLength::Thirty,
                ..
            })
        ));
    }

    #[test]
    fn test_negative_yield_rejected() {
        let mut crop = carrot();
        crop.yield_per_bed_15m = Decimal::from(-5);
        assert!(validate_crop_definition(&crop).is_err());
    }

    #[test]
    fn test_zero_harvest_window_rejected() {
        let mut crop = carrot();
        crop.harvest_window_weeks = 0;
        assert!(matches!(
            validate_crop_definition(&crop),
            Err(DefinitionError::Malformed { .. })
        ));
    }

    #[test]
    fn test_zero_nursery_rejected() {
        let mut crop = carrot();
        crop.nursery_weeks = 0;
        assert!(validate_crop_definition(&crop).is_err());
    }

    #[test]
    fn test_zero_rotations_rejected() {
        let mut crop = carrot();
        crop.max_rotations = 0;
        assert!(validate_crop_definition(&crop).is_err());
    }

    #[test]
    fn test_rest_longer_than_a_year_rejected() {
        let mut crop = carrot();
        crop.intercalary_rest_weeks = u32::MAX;
        assert!(matches!(
            validate_crop_definition(&crop),
            Err(DefinitionError::Malformed { .. })
        ));

        crop.intercalary_rest_weeks = 52;
        assert!(validate_crop_definition(&crop).is_ok());
    }

    #[test]
    fn test_sowing_window_out_of_calendar_rejected() {
        let mut crop = carrot();
        crop.sowing_window = WeekWindow::new(0, 60);
        assert!(validate_crop_definition(&crop).is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut crop = carrot();
        crop.unit_price = Decimal::from(-1);
        assert!(matches!(
            validate_crop_definition(&crop),
            Err(DefinitionError::NegativePrice { .. })
        ));
    }

    #[test]
    fn test_error_message_names_crop() {
        let mut crop = carrot();
        crop.yield_per_bed_15m = Decimal::ZERO;
        let message = validate_crop_definition(&crop).unwrap_err().to_string();
        assert!(message.contains("carrot"));
        assert!(message.contains("15m"));
    }

    // ========================================================================
    // Planning Input Validation Tests
    // ========================================================================

    #[test]
    fn test_basket_mix_valid() {
        assert!(validate_basket_mix(&BasketMix::default()).is_ok());
        let nearly_one = BasketMix {
            small: Decimal::new(33, 2),
            medium: Decimal::new(33, 2),
            large: Decimal::new(33, 2),
        };
        assert!(validate_basket_mix(&nearly_one).is_ok());
    }

    #[test]
    fn test_basket_mix_invalid() {
        let too_much = BasketMix {
            small: Decimal::new(50, 2),
            medium: Decimal::new(50, 2),
            large: Decimal::new(50, 2),
        };
        assert!(validate_basket_mix(&too_much).is_err());

        let negative = BasketMix {
            small: Decimal::new(-20, 2),
            medium: Decimal::new(70, 2),
            large: Decimal::new(50, 2),
        };
        assert!(validate_basket_mix(&negative).is_err());
    }

    #[test]
    fn test_season_validation() {
        assert!(validate_season(&SeasonWindow::new(18, 37)).is_ok());
        assert!(validate_season(&SeasonWindow::new(37, 18)).is_err());
        assert!(validate_season(&SeasonWindow::new(0, 18)).is_err());
    }

    #[test]
    fn test_garden_validation() {
        assert!(validate_garden(&Garden::new("North", 20, BedLength::Fifteen)).is_ok());
        assert!(validate_garden(&Garden::new("", 20, BedLength::Fifteen)).is_err());
    }
}
