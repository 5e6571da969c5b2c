//! Immutable crop catalog

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{CropCategory, CropDefinition, CycleClass, WeekWindow};
use crate::types::SaleUnit;
use crate::validation::{validate_crop_definition, DefinitionError};

/// Validated crop definitions, in catalog order
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct CropCatalog {
    crops: Vec<CropDefinition>,
}

impl CropCatalog {
    /// Load a catalog, rejecting malformed or duplicate definitions
    pub fn load(crops: Vec<CropDefinition>) -> Result<Self, DefinitionError> {
        let mut seen = HashSet::new();
        for crop in &crops {
            validate_crop_definition(crop)?;
            if !seen.insert(crop.id.as_str()) {
                return Err(DefinitionError::DuplicateCrop(crop.id.clone()));
            }
        }
        Ok(Self { crops })
    }

    /// Parse a JSON array of crop definitions and load it
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let crops: Vec<CropDefinition> = serde_json::from_str(json)?;
        Self::load(crops)
    }

    pub fn get(&self, crop_id: &str) -> Option<&CropDefinition> {
        self.crops.iter().find(|c| c.id == crop_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CropDefinition> {
        self.crops.iter()
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn crop(
    id: &str,
    name: &str,
    category: CropCategory,
    cycle_class: CycleClass,
    unit: SaleUnit,
    yield_15m: i64,
    harvest_window_weeks: u32,
    nursery_weeks: u32,
    occupation_weeks: u32,
    max_rotations: u32,
    intercalary_rest_weeks: u32,
    unit_price_cents: i64,
    sowing_window: (u32, u32),
) -> CropDefinition {
    CropDefinition {
        id: id.to_string(),
        name: name.to_string(),
        category,
        cycle_class,
        unit,
        yield_per_bed_15m: Decimal::from(yield_15m),
        yield_per_bed_30m: Decimal::from(yield_15m * 2),
        harvest_window_weeks,
        nursery_weeks,
        occupation_weeks,
        max_rotations,
        intercalary_rest_weeks,
        unit_price: Decimal::new(unit_price_cents, 2),
        sowing_window: WeekWindow::new(sowing_window.0, sowing_window.1),
    }
}

/// Stock catalog of common market-garden crops
///
/// Yields are per 15m bed; a 30m bed yields twice as much.
pub fn default_catalog() -> CropCatalog {
    use CropCategory::*;
    use CycleClass::*;

    let crops = vec![
        // Hosts
        crop("tomato", "Tomato", FruitingVegetable, LongDuration, SaleUnit::Kg, 180, 12, 6, 24, 1, 0, 450, (8, 14)),
        crop("eggplant", "Eggplant", FruitingVegetable, LongDuration, SaleUnit::Kg, 120, 10, 8, 22, 1, 0, 400, (7, 12)),
        crop("cucumber", "Cucumber", Cucurbit, LongDuration, SaleUnit::Kg, 200, 10, 4, 16, 1, 0, 300, (12, 20)),
        crop("pepper", "Sweet pepper", FruitingVegetable, LongDuration, SaleUnit::Kg, 100, 10, 8, 24, 1, 0, 500, (6, 11)),
        // Intercalables
        crop("radish", "Radish", Root, FastRotation, SaleUnit::Bunch, 150, 2, 1, 5, 6, 1, 150, (10, 36)),
        crop("salad_mix", "Salad mix", LeafyGreen, FastRotation, SaleUnit::Kg, 25, 3, 2, 6, 5, 1, 1600, (8, 34)),
        crop("baby_greens", "Baby greens", LeafyGreen, FastRotation, SaleUnit::Kg, 20, 2, 1, 5, 6, 1, 1800, (10, 36)),
        crop("spinach", "Spinach", LeafyGreen, FastRotation, SaleUnit::Kg, 40, 3, 2, 7, 4, 1, 800, (8, 36)),
        // Others
        crop("carrot", "Carrot", Root, MediumRotation, SaleUnit::Kg, 100, 4, 2, 14, 2, 2, 250, (12, 26)),
        crop("beet", "Beetroot", Root, MediumRotation, SaleUnit::Bunch, 120, 4, 4, 12, 2, 2, 250, (14, 28)),
        crop("lettuce", "Lettuce", LeafyGreen, MediumRotation, SaleUnit::Piece, 180, 2, 4, 8, 3, 1, 120, (8, 32)),
        crop("zucchini", "Zucchini", Cucurbit, MediumRotation, SaleUnit::Kg, 250, 8, 4, 14, 2, 1, 280, (14, 24)),
        crop("onion", "Onion", Allium, MediumRotation, SaleUnit::Kg, 150, 3, 8, 20, 1, 2, 220, (6, 12)),
        crop("leek", "Leek", Allium, LongDuration, SaleUnit::Kg, 180, 8, 10, 26, 1, 0, 320, (8, 16)),
    ];

    CropCatalog { crops }
}
