//! Stages of the capacity-planning pipeline

pub mod capacity;
pub mod demand;
pub mod feasibility;
pub mod intercropping;
pub mod pipeline;
pub mod requirement;
pub mod scenario;
pub mod scheduler;

pub use capacity::{normalize_capacity, to_equivalent, CapacitySummary, GardenCapacity};
pub use demand::{
    seasonal_needs, ChannelBreakdown, CompositionEntry, CompositionTable, CropNeed, DemandOracle,
    WeeklyNeeds,
};
pub use feasibility::{physical_beds_needed, validate_plan};
pub use intercropping::{optimize_intercropping, IntercropSaving, IntercroppingResult};
pub use pipeline::{fill_rate_percent, plan, CropPlan, PlanInputs, PlanOutput};
pub use requirement::{
    compute_bed_requirement, effective_rotations, CropOverride, RequirementOverrides,
};
pub use scenario::{estimate_revenue, generate_scenarios, ScenarioSet};
pub use scheduler::schedule_series;
