//! Garden inventory models

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::BedLength;

/// A named growing area made of identical beds
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Garden {
    pub id: Uuid,
    #[validate(length(min = 1, message = "Garden name cannot be empty"))]
    pub name: String,
    pub bed_count: u32,
    pub bed_length: BedLength,
}

impl Garden {
    pub fn new(name: impl Into<String>, bed_count: u32, bed_length: BedLength) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            bed_count,
            bed_length,
        }
    }

    /// Capacity of this garden in 15m-equivalent beds
    pub fn equivalent_beds(&self) -> u32 {
        self.bed_length.to_equivalent(self.bed_count)
    }
}

/// Physical beds of a garden already given to a crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BedAssignment {
    pub garden_id: Uuid,
    pub crop_id: String,
    pub beds: u32,
}
