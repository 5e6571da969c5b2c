//! Domain models for the market-garden planner

mod crop;
mod garden;
mod market;
mod plan;
mod season;

pub use crop::*;
pub use garden::*;
pub use market::*;
pub use plan::*;
pub use season::*;
