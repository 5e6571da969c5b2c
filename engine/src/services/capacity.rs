//! Capacity normalization: beds of different lengths in comparable units

use serde::{Deserialize, Serialize};
use shared::{BedAssignment, BedLength, Garden};
use uuid::Uuid;

/// One garden's contribution to total capacity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GardenCapacity {
    pub garden_id: Uuid,
    pub name: String,
    pub bed_count: u32,
    pub bed_length: BedLength,
    pub equivalent_beds: u32,
}

/// Total growing capacity in 15m-equivalent beds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CapacitySummary {
    pub total_equivalent_beds: u32,
    pub gardens: Vec<GardenCapacity>,
}

impl CapacitySummary {
    pub fn garden(&self, garden_id: Uuid) -> Option<&GardenCapacity> {
        self.gardens.iter().find(|g| g.garden_id == garden_id)
    }

    /// Equivalent beds left in a garden once other crops' assignments are taken out
    ///
    /// Assignments to `for_crop` itself are not subtracted. The figure is not
    /// clamped: an over-assigned garden reports a negative number. Returns
    /// `None` for an unknown garden.
    pub fn available_in_garden(
        &self,
        garden_id: Uuid,
        assignments: &[BedAssignment],
        for_crop: Option<&str>,
    ) -> Option<i64> {
        let garden = self.garden(garden_id)?;
        let assigned: i64 = assignments
            .iter()
            .filter(|a| a.garden_id == garden_id)
            .filter(|a| for_crop.map_or(true, |crop| a.crop_id != crop))
            .map(|a| i64::from(to_equivalent(a.beds, garden.bed_length)))
            .sum();
        Some(i64::from(garden.equivalent_beds) - assigned)
    }
}

/// Convert a bed count of the given length to 15m-equivalent beds
pub fn to_equivalent(beds: u32, bed_length: BedLength) -> u32 {
    bed_length.to_equivalent(beds)
}

/// Compute per-garden and total equivalent capacity
pub fn normalize_capacity(gardens: &[Garden]) -> CapacitySummary {
    let gardens: Vec<GardenCapacity> = gardens
        .iter()
        .map(|g| GardenCapacity {
            garden_id: g.id,
            name: g.name.clone(),
            bed_count: g.bed_count,
            bed_length: g.bed_length,
            equivalent_beds: to_equivalent(g.bed_count, g.bed_length),
        })
        .collect();

    let total_equivalent_beds = gardens
        .iter()
        .fold(0u32, |total, g| total.saturating_add(g.equivalent_beds));

    tracing::debug!(
        gardens = gardens.len(),
        total_equivalent_beds,
        "normalized garden capacity"
    );

    CapacitySummary {
        total_equivalent_beds,
        gardens,
    }
}
