//! Plan validation against capacity and agronomic sowing windows

use shared::{Alert, BedAssignment, BedLength, CropCatalog, ValidationResult};

use super::capacity::{to_equivalent, CapacitySummary};
use super::intercropping::IntercroppingResult;
use super::pipeline::CropPlan;

/// Physical beds the grower must assign, in 15m-equivalent beds
///
/// All requirements minus the beds intercropping saves.
pub fn physical_beds_needed(
    crops: &[CropPlan],
    intercropping: &IntercroppingResult,
    bed_length: BedLength,
) -> u32 {
    let total = crops
        .iter()
        .fold(0u32, |sum, c| sum.saturating_add(c.requirement.beds_needed));
    to_equivalent(total.saturating_sub(intercropping.beds_saved), bed_length)
}

/// Check a computed plan; blocking errors make it non-viable
pub fn validate_plan(
    crops: &[CropPlan],
    catalog: &CropCatalog,
    capacity: &CapacitySummary,
    intercropping: &IntercroppingResult,
    assignments: &[BedAssignment],
    bed_length: BedLength,
) -> ValidationResult {
    let mut alerts = Vec::new();

    let needed = physical_beds_needed(crops, intercropping, bed_length);
    let available = capacity.total_equivalent_beds;
    if needed > available {
        alerts.push(Alert::error(format!(
            "Capacity shortfall: {} equivalent beds needed but only {} available (short by {})",
            needed,
            available,
            needed - available
        )));
    }

    for assignment in assignments {
        if capacity.garden(assignment.garden_id).is_none() {
            alerts.push(
                Alert::error(format!(
                    "Beds assigned to unknown garden {}",
                    assignment.garden_id
                ))
                .for_crop(assignment.crop_id.clone()),
            );
        }
    }
    for garden in &capacity.gardens {
        if let Some(remaining) = capacity.available_in_garden(garden.garden_id, assignments, None) {
            if remaining < 0 {
                alerts.push(Alert::error(format!(
                    "Garden '{}' is over-assigned by {} equivalent beds",
                    garden.name, -remaining
                )));
            }
        }
    }

    for plan in crops {
        let Some(crop) = catalog.get(&plan.crop_id) else {
            continue;
        };
        let off_window = plan
            .series
            .iter()
            .filter(|s| !crop.sowing_window.contains(s.sow_week))
            .count();
        if off_window > 0 {
            alerts.push(
                Alert::warning(format!(
                    "{}: {} series sown outside the recommended window (weeks {}-{})",
                    crop.name, off_window, crop.sowing_window.start, crop.sowing_window.end
                ))
                .for_crop(crop.id.clone()),
            );
        }
    }

    if intercropping.beds_saved > 0 {
        alerts.push(Alert::info(format!(
            "Intercropping saves {} dedicated beds",
            intercropping.beds_saved
        )));
    }

    let result = ValidationResult::from_alerts(alerts);
    if !result.viable {
        tracing::warn!(
            needed,
            available,
            errors = result.errors().count(),
            "plan is not viable"
        );
    }
    result
}
