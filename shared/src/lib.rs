//! Shared types and models for the market-garden planner
//!
//! This crate contains the planning inputs, the crop catalog and the
//! derived planning results shared by the engine and the WASM bindings.

pub mod catalog;
pub mod models;
pub mod types;
pub mod validation;

pub use catalog::*;
pub use models::*;
pub use types::*;
pub use validation::*;
