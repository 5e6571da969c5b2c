//! Season and grower profile models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Contiguous range of weeks during which sales and harvest happen
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct SeasonWindow {
    #[validate(range(min = 1, max = 52))]
    pub start_week: u32,
    #[validate(range(min = 1, max = 52))]
    pub end_week: u32,
    /// Calendar year, only needed to turn weeks into dates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl SeasonWindow {
    pub fn new(start_week: u32, end_week: u32) -> Self {
        Self {
            start_week,
            end_week,
            year: None,
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Number of weeks in the season, both ends included
    pub fn duration_weeks(&self) -> u32 {
        if self.end_week < self.start_week {
            return 0;
        }
        self.end_week - self.start_week + 1
    }

    pub fn weeks(&self) -> std::ops::RangeInclusive<u32> {
        self.start_week..=self.end_week
    }
}

/// Grower experience, applied as a yield-derating safety factor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum MaturityLevel {
    Beginner,
    #[default]
    Intermediate,
    Expert,
}

impl MaturityLevel {
    pub fn coefficient(&self) -> Decimal {
        match self {
            MaturityLevel::Beginner => Decimal::new(70, 2),
            MaturityLevel::Intermediate => Decimal::new(85, 2),
            MaturityLevel::Expert => Decimal::ONE,
        }
    }
}

impl std::fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaturityLevel::Beginner => write!(f, "Beginner"),
            MaturityLevel::Intermediate => write!(f, "Intermediate"),
            MaturityLevel::Expert => write!(f, "Expert"),
        }
    }
}
