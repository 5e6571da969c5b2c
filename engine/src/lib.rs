//! Capacity-planning engine for a seasonal market garden
//!
//! Turns weekly sales commitments and garden inventory into per-crop bed
//! requirements, staggered planting series, intercropping savings, a
//! feasibility check, and what-if demand scenarios.

pub mod config;
pub mod error;
pub mod services;
pub mod telemetry;

pub use crate::config::PlannerSettings;
pub use crate::error::{PlannerError, PlannerResult};
pub use crate::services::*;
