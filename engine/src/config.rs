//! Planner settings
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration file (config/planner.toml, .yaml or .json)
//! 3. Environment variable overrides with PLANNER__ prefix

use config::{ConfigError, Environment, File, FileFormat};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Heuristics and prices the planning engine runs with
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct PlannerSettings {
    pub scheduling: SchedulingSettings,
    pub intercropping: IntercroppingSettings,
    pub scenarios: ScenarioSettings,
    pub pricing: ChannelPrices,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchedulingSettings {
    /// Upper bound on staggered series per crop, whatever the rotation math allows
    pub max_staggered_series: u32,
}

impl Default for SchedulingSettings {
    fn default() -> Self {
        Self {
            max_staggered_series: 4,
        }
    }
}

/// Static host/intercalable classification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntercroppingSettings {
    /// Long-duration crops whose idle windows can host other crops
    pub host_crops: Vec<String>,
    /// Intercalable crops in priority order, with the share of pooled host
    /// capacity each may absorb
    pub absorption: Vec<AbsorptionRule>,
    /// Idle windows a host bed offers per season (before and after its own planting)
    pub cycles_per_host_bed: u32,
}

impl IntercroppingSettings {
    pub fn is_host(&self, crop_id: &str) -> bool {
        self.host_crops.iter().any(|h| h == crop_id)
    }

    pub fn is_intercalable(&self, crop_id: &str) -> bool {
        self.absorption.iter().any(|r| r.crop_id == crop_id)
    }
}

impl Default for IntercroppingSettings {
    fn default() -> Self {
        Self {
            host_crops: ["tomato", "eggplant", "cucumber", "pepper"]
                .into_iter()
                .map(String::from)
                .collect(),
            absorption: vec![
                AbsorptionRule::new("radish", Decimal::new(40, 2)),
                AbsorptionRule::new("salad_mix", Decimal::new(30, 2)),
                AbsorptionRule::new("baby_greens", Decimal::new(20, 2)),
                AbsorptionRule::new("spinach", Decimal::ZERO),
            ],
            cycles_per_host_bed: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AbsorptionRule {
    pub crop_id: String,
    pub fraction: Decimal,
}

impl AbsorptionRule {
    pub fn new(crop_id: impl Into<String>, fraction: Decimal) -> Self {
        Self {
            crop_id: crop_id.into(),
            fraction,
        }
    }
}

/// Target fill ratios of total capacity for the generated scenarios
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScenarioSettings {
    pub conservative_fill: Decimal,
    pub balanced_fill: Decimal,
    pub ambitious_fill: Decimal,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            conservative_fill: Decimal::new(80, 2),
            balanced_fill: Decimal::new(90, 2),
            ambitious_fill: Decimal::ONE,
        }
    }
}

/// Weekly unit price of each sales channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelPrices {
    pub small_basket: Decimal,
    pub medium_basket: Decimal,
    pub large_basket: Decimal,
    pub stall_client: Decimal,
    pub restaurant_account: Decimal,
}

impl Default for ChannelPrices {
    fn default() -> Self {
        Self {
            small_basket: Decimal::from(15),
            medium_basket: Decimal::from(22),
            large_basket: Decimal::from(30),
            stall_client: Decimal::from(25),
            restaurant_account: Decimal::from(120),
        }
    }
}

impl PlannerSettings {
    /// Load settings from defaults, `config/planner.*` and `PLANNER__*` variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            // Start with default values
            .add_source(config::Config::try_from(&PlannerSettings::default())?)
            // Load the optional settings file
            .add_source(File::with_name("config/planner").required(false))
            // Override with environment variables (PLANNER__ prefix)
            .add_source(
                Environment::with_prefix("PLANNER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Layer a TOML document over the defaults
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(config::Config::try_from(&PlannerSettings::default())?)
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
