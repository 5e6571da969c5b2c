//! Crop catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{BedLength, SaleUnit};

/// How long a crop holds its bed, which decides how its beds are sized
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CycleClass {
    /// Occupies a bed for essentially the whole season
    LongDuration,
    MediumRotation,
    FastRotation,
}

impl CycleClass {
    pub fn regime(&self) -> SizingRegime {
        match self {
            CycleClass::LongDuration => SizingRegime::Continuous,
            CycleClass::MediumRotation | CycleClass::FastRotation => SizingRegime::Series,
        }
    }
}

impl std::fmt::Display for CycleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CycleClass::LongDuration => write!(f, "Long duration"),
            CycleClass::MediumRotation => write!(f, "Medium rotation"),
            CycleClass::FastRotation => write!(f, "Fast rotation"),
        }
    }
}

/// Bed sizing regime
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SizingRegime {
    /// Beds sized from the average weekly need against derated weekly yield
    Continuous,
    /// Beds sized from the number of plantings spread over the rotations
    Series,
}

/// Botanical grouping used for display and filtering
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CropCategory {
    FruitingVegetable,
    Cucurbit,
    LeafyGreen,
    Root,
    Allium,
}

/// Inclusive range of ISO weeks
///
/// A window whose start is after its end wraps across the new year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct WeekWindow {
    #[validate(range(min = 1, max = 52))]
    pub start: u32,
    #[validate(range(min = 1, max = 52))]
    pub end: u32,
}

impl WeekWindow {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, week: u32) -> bool {
        if self.start <= self.end {
            week >= self.start && week <= self.end
        } else {
            week >= self.start || week <= self.end
        }
    }
}

/// A crop as described in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CropDefinition {
    #[validate(length(min = 1, message = "Crop id cannot be empty"))]
    pub id: String,
    #[validate(length(min = 1, message = "Crop name cannot be empty"))]
    pub name: String,
    pub category: CropCategory,
    pub cycle_class: CycleClass,
    pub unit: SaleUnit,
    /// Season yield of one 15m bed, in `unit`
    pub yield_per_bed_15m: Decimal,
    /// Season yield of one 30m bed, in `unit`
    pub yield_per_bed_30m: Decimal,
    #[validate(range(min = 1, max = 52))]
    pub harvest_window_weeks: u32,
    #[validate(range(min = 1, max = 52))]
    pub nursery_weeks: u32,
    /// Weeks a planting holds its bed
    #[validate(range(min = 1, max = 52))]
    pub occupation_weeks: u32,
    #[validate(range(min = 1))]
    pub max_rotations: u32,
    /// Mandatory fallow between two series on the same bed
    #[validate(range(max = 52))]
    pub intercalary_rest_weeks: u32,
    pub unit_price: Decimal,
    #[validate]
    pub sowing_window: WeekWindow,
}

impl CropDefinition {
    pub fn yield_per_bed(&self, bed_length: BedLength) -> Decimal {
        match bed_length {
            BedLength::Fifteen => self.yield_per_bed_15m,
            BedLength::Thirty => self.yield_per_bed_30m,
        }
    }

    pub fn regime(&self) -> SizingRegime {
        self.cycle_class.regime()
    }

    /// Weeks one rotation holds a bed, fallow included
    pub fn rotation_weeks(&self) -> u32 {
        self.occupation_weeks.saturating_add(self.intercalary_rest_weeks)
    }
}
