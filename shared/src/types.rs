//! Common types used across the planner

use chrono::{NaiveDate, Weekday};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// First and last ISO week numbers the planner works with
pub const FIRST_WEEK: u32 = 1;
pub const LAST_WEEK: u32 = 52;

/// Physical length of a growing bed
///
/// Serialized as the integer number of meters (`15` or `30`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BedLength {
    #[default]
    Fifteen,
    Thirty,
}

impl BedLength {
    /// Length of the reference bed every capacity figure is expressed in
    pub const REFERENCE_METERS: u32 = 15;

    pub fn meters(&self) -> u32 {
        match self {
            BedLength::Fifteen => 15,
            BedLength::Thirty => 30,
        }
    }

    /// Number of 15m-equivalent beds a single bed of this length counts for
    pub fn equivalent_units(&self) -> u32 {
        self.meters() / Self::REFERENCE_METERS
    }

    /// A count of beds of this length in 15m-equivalent beds, saturating
    pub fn to_equivalent(&self, beds: u32) -> u32 {
        beds.saturating_mul(self.equivalent_units())
    }
}

impl TryFrom<u32> for BedLength {
    type Error = String;

    fn try_from(meters: u32) -> Result<Self, Self::Error> {
        match meters {
            15 => Ok(BedLength::Fifteen),
            30 => Ok(BedLength::Thirty),
            other => Err(format!("Unsupported bed length: {}m (expected 15 or 30)", other)),
        }
    }
}

impl From<BedLength> for u32 {
    fn from(length: BedLength) -> Self {
        length.meters()
    }
}

impl std::fmt::Display for BedLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}m", self.meters())
    }
}

/// Unit a crop is sold and demanded in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SaleUnit {
    #[default]
    Kg,
    Bunch,
    Piece,
}

impl SaleUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleUnit::Kg => "kg",
            SaleUnit::Bunch => "bunch",
            SaleUnit::Piece => "piece",
        }
    }
}

/// Round to the nearest whole number, halves away from zero
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert an already whole, non-negative decimal to `u32`, saturating
pub fn whole_u32(value: Decimal) -> u32 {
    if value <= Decimal::ZERO {
        return 0;
    }
    value.trunc().to_u32().unwrap_or(u32::MAX)
}

/// Clamp a week number into the planner's calendar
pub fn clamp_week(week: i64) -> u32 {
    week.clamp(FIRST_WEEK as i64, LAST_WEEK as i64) as u32
}

/// Monday of the given ISO week
pub fn week_start_date(year: i32, week: u32) -> Option<NaiveDate> {
    NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
}
