//! Error handling for the planning engine
//!
//! Only malformed input aborts a planning run. Capacity shortfalls and
//! sowing-window violations are reported as alerts in the plan itself.

use serde::Serialize;
use shared::DefinitionError;
use thiserror::Error;

/// Planner error types
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Crop catalog error: {0}")]
    Definition(#[from] DefinitionError),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] validator::ValidationErrors),

    #[error("Invalid season {start_week}-{end_week}: {message}")]
    InvalidSeason {
        start_week: u32,
        end_week: u32,
        message: &'static str,
    },

    #[error("Invalid market configuration: {0}")]
    InvalidMarket(&'static str),

    #[error("Unknown crop: {0}")]
    UnknownCrop(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlannerError {
    /// Stable machine-readable code for the UI layer
    pub fn code(&self) -> &'static str {
        match self {
            PlannerError::Definition(_) => "DEFINITION_ERROR",
            PlannerError::InvalidInput(_) => "VALIDATION_ERROR",
            PlannerError::InvalidSeason { .. } => "INVALID_SEASON",
            PlannerError::InvalidMarket(_) => "INVALID_MARKET",
            PlannerError::UnknownCrop(_) => "UNKNOWN_CROP",
            PlannerError::Configuration(_) => "CONFIGURATION_ERROR",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    pub fn to_detail(&self) -> ErrorDetail {
        ErrorDetail {
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

/// Error payload handed to the UI layer
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Result type alias for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
