//! Planning results
//!
//! Everything here is derived data, recomputed in full on every planning run.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{MarketConfiguration, SizingRegime};
use crate::types::{week_start_date, BedLength};

/// Intermediate figures of the regime a requirement was computed with
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "regime", rename_all = "snake_case")]
pub enum RegimeFigures {
    Continuous {
        weekly_average_need: Decimal,
        net_weekly_yield_per_bed: Decimal,
    },
    Series {
        effective_rotations: u32,
        number_of_series: u32,
    },
}

impl RegimeFigures {
    pub fn regime(&self) -> SizingRegime {
        match self {
            RegimeFigures::Continuous { .. } => SizingRegime::Continuous,
            RegimeFigures::Series { .. } => SizingRegime::Series,
        }
    }
}

/// Beds a crop needs for the season
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BedRequirement {
    pub crop_id: String,
    pub bed_length: BedLength,
    /// Beds to plan, after manual overrides
    pub beds_needed: u32,
    /// Beds as computed, before manual overrides
    pub computed_beds: u32,
    pub rotations_used: u32,
    pub raw_yield_per_bed: Decimal,
    /// Yield after the maturity coefficient
    pub derated_yield_per_bed: Decimal,
    pub figures: RegimeFigures,
    pub overridden: bool,
}

impl BedRequirement {
    pub fn regime(&self) -> SizingRegime {
        self.figures.regime()
    }

    /// `beds_needed` expressed in 15m-equivalent beds
    pub fn equivalent_beds(&self) -> u32 {
        self.bed_length.to_equivalent(self.beds_needed)
    }
}

/// One staggered planting of a crop
///
/// Weeks always satisfy `sow <= transplant <= harvest_start <= harvest_end`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CropSeries {
    /// Sequential within the crop, starting at 1
    pub id: u32,
    pub beds: u32,
    pub sow_week: u32,
    pub transplant_week: u32,
    pub harvest_start_week: u32,
    pub harvest_end_week: u32,
    pub occupation_weeks: u32,
}

impl CropSeries {
    pub fn sow_date(&self, year: i32) -> Option<NaiveDate> {
        week_start_date(year, self.sow_week)
    }

    pub fn transplant_date(&self, year: i32) -> Option<NaiveDate> {
        week_start_date(year, self.transplant_week)
    }

    pub fn harvest_start_date(&self, year: i32) -> Option<NaiveDate> {
        week_start_date(year, self.harvest_start_week)
    }

    pub fn harvest_end_date(&self, year: i32) -> Option<NaiveDate> {
        week_start_date(year, self.harvest_end_week)
    }
}

/// Beds of an intercalated crop grown in the idle windows of a host crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntercroppingLink {
    pub intercalated_crop_id: String,
    pub host_crop_id: String,
    pub beds_absorbed: u32,
}

/// Alert severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    /// Blocks the plan
    Error,
    Warning,
    Info,
}

impl AlertSeverity {
    pub fn is_blocking(&self) -> bool {
        matches!(self, AlertSeverity::Error)
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertSeverity::Error => write!(f, "Error"),
            AlertSeverity::Warning => write!(f, "Warning"),
            AlertSeverity::Info => write!(f, "Info"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alert {
    pub severity: AlertSeverity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_id: Option<String>,
    pub message: String,
}

impl Alert {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: AlertSeverity::Error,
            crop_id: None,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: AlertSeverity::Warning,
            crop_id: None,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: AlertSeverity::Info,
            crop_id: None,
            message: message.into(),
        }
    }

    pub fn for_crop(mut self, crop_id: impl Into<String>) -> Self {
        self.crop_id = Some(crop_id.into());
        self
    }
}

/// Outcome of checking a plan, alerts kept in the order they were raised
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationResult {
    pub viable: bool,
    pub alerts: Vec<Alert>,
}

impl ValidationResult {
    pub fn from_alerts(alerts: Vec<Alert>) -> Self {
        let viable = !alerts.iter().any(|a| a.severity.is_blocking());
        Self { viable, alerts }
    }

    pub fn errors(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(|a| a.severity == AlertSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(|a| a.severity == AlertSeverity::Warning)
    }
}

/// Demand level a scenario explores
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Conservative,
    Balanced,
    Ambitious,
    /// The unscaled configuration, for comparison
    Current,
}

impl std::fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioKind::Conservative => write!(f, "Conservative"),
            ScenarioKind::Balanced => write!(f, "Balanced"),
            ScenarioKind::Ambitious => write!(f, "Ambitious"),
            ScenarioKind::Current => write!(f, "Current"),
        }
    }
}

/// A what-if plan for a synthetic market configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scenario {
    pub id: ScenarioKind,
    pub label: String,
    pub market: MarketConfiguration,
    /// Physical beds needed, in 15m-equivalent beds
    pub total_beds: u32,
    pub fill_rate_percent: Decimal,
    pub estimated_revenue: Decimal,
    pub viable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_result_viability() {
        let ok = ValidationResult::from_alerts(vec![Alert::warning("late sowing")]);
        assert!(ok.viable);
        assert_eq!(ok.warnings().count(), 1);

        let blocked = ValidationResult::from_alerts(vec![
            Alert::info("saved beds"),
            Alert::error("shortfall"),
        ]);
        assert!(!blocked.viable);
        assert_eq!(blocked.errors().count(), 1);
    }

    #[test]
    fn test_requirement_equivalent_beds_saturate() {
        let requirement = BedRequirement {
            crop_id: "leek".to_string(),
            bed_length: BedLength::Thirty,
            beds_needed: u32::MAX,
            computed_beds: u32::MAX,
            rotations_used: 1,
            raw_yield_per_bed: Decimal::from(360),
            derated_yield_per_bed: Decimal::from(360),
            figures: RegimeFigures::Continuous {
                weekly_average_need: Decimal::ZERO,
                net_weekly_yield_per_bed: Decimal::from(45),
            },
            overridden: true,
        };
        assert_eq!(requirement.equivalent_beds(), u32::MAX);
    }

    #[test]
    fn test_empty_validation_is_viable() {
        assert!(ValidationResult::from_alerts(Vec::new()).viable);
    }

    #[test]
    fn test_regime_figures_serialize_with_tag() {
        let figures = RegimeFigures::Series {
            effective_rotations: 4,
            number_of_series: 10,
        };
        let json = serde_json::to_value(figures).unwrap();
        assert_eq!(json["regime"], "series");
        assert_eq!(json["effective_rotations"], 4);
    }

    #[test]
    fn test_series_dates() {
        let series = CropSeries {
            id: 1,
            beds: 2,
            sow_week: 10,
            transplant_week: 14,
            harvest_start_week: 18,
            harvest_end_week: 30,
            occupation_weeks: 16,
        };
        let sow = series.sow_date(2025).unwrap();
        assert_eq!(sow, NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
        assert!(series.harvest_end_date(2025).unwrap() > sow);
    }
}
