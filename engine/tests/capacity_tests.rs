//! Capacity normalization tests
//!
//! Tests for garden capacity including:
//! - 15m-equivalent conversion of 30m beds
//! - Totals across gardens
//! - Remaining beds per garden after assignments

use engine::{normalize_capacity, to_equivalent};
use proptest::prelude::*;
use shared::{BedAssignment, BedLength, Garden};
use uuid::Uuid;

fn assignment(garden: &Garden, crop_id: &str, beds: u32) -> BedAssignment {
    BedAssignment {
        garden_id: garden.id,
        crop_id: crop_id.to_string(),
        beds,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_mixed_bed_lengths() {
        let gardens = vec![
            Garden::new("North field", 20, BedLength::Fifteen),
            Garden::new("Tunnel", 10, BedLength::Thirty),
        ];
        let capacity = normalize_capacity(&gardens);

        assert_eq!(capacity.total_equivalent_beds, 40);
        assert_eq!(capacity.gardens.len(), 2);
        assert_eq!(capacity.gardens[0].equivalent_beds, 20);
        assert_eq!(capacity.gardens[1].equivalent_beds, 20);
        assert_eq!(capacity.gardens[1].name, "Tunnel");
    }

    #[test]
    fn test_thirty_meter_bed_counts_double() {
        assert_eq!(to_equivalent(1, BedLength::Fifteen), 1);
        assert_eq!(to_equivalent(1, BedLength::Thirty), 2);
        assert_eq!(to_equivalent(7, BedLength::Thirty), 14);
        assert_eq!(to_equivalent(0, BedLength::Thirty), 0);
    }

    #[test]
    fn test_no_gardens_is_zero_capacity() {
        let capacity = normalize_capacity(&[]);
        assert_eq!(capacity.total_equivalent_beds, 0);
        assert!(capacity.gardens.is_empty());
    }

    #[test]
    fn test_garden_lookup() {
        let garden = Garden::new("Orchard", 5, BedLength::Fifteen);
        let capacity = normalize_capacity(std::slice::from_ref(&garden));

        assert!(capacity.garden(garden.id).is_some());
        assert!(capacity.garden(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_available_in_garden_excludes_own_crop() {
        let garden = Garden::new("Tunnel", 5, BedLength::Thirty);
        let capacity = normalize_capacity(std::slice::from_ref(&garden));
        let assignments = vec![
            assignment(&garden, "tomato", 2),
            assignment(&garden, "pepper", 1),
        ];

        // 10 - 2 (pepper, one 30m bed)
        assert_eq!(
            capacity.available_in_garden(garden.id, &assignments, Some("tomato")),
            Some(8)
        );
        // 10 - 4 (tomato)
        assert_eq!(
            capacity.available_in_garden(garden.id, &assignments, Some("pepper")),
            Some(6)
        );
        assert_eq!(
            capacity.available_in_garden(garden.id, &assignments, None),
            Some(4)
        );
    }

    #[test]
    fn test_available_in_garden_goes_negative() {
        let garden = Garden::new("Small plot", 4, BedLength::Fifteen);
        let capacity = normalize_capacity(std::slice::from_ref(&garden));
        let assignments = vec![
            assignment(&garden, "carrot", 3),
            assignment(&garden, "beet", 3),
        ];

        assert_eq!(
            capacity.available_in_garden(garden.id, &assignments, None),
            Some(-2)
        );
    }

    #[test]
    fn test_available_in_unknown_garden() {
        let garden = Garden::new("Small plot", 4, BedLength::Fifteen);
        let capacity = normalize_capacity(std::slice::from_ref(&garden));
        assert_eq!(capacity.available_in_garden(Uuid::new_v4(), &[], None), None);
    }

    #[test]
    fn test_assignments_to_other_gardens_ignored() {
        let first = Garden::new("First", 6, BedLength::Fifteen);
        let second = Garden::new("Second", 6, BedLength::Fifteen);
        let capacity = normalize_capacity(&[first.clone(), second.clone()]);
        let assignments = vec![assignment(&second, "leek", 5)];

        assert_eq!(
            capacity.available_in_garden(first.id, &assignments, None),
            Some(6)
        );
        assert_eq!(
            capacity.available_in_garden(second.id, &assignments, None),
            Some(1)
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn bed_length_strategy() -> impl Strategy<Value = BedLength> {
        prop_oneof![Just(BedLength::Fifteen), Just(BedLength::Thirty)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Total capacity is the sum of per-garden equivalents
        #[test]
        fn prop_total_is_sum_of_gardens(
            specs in prop::collection::vec((0u32..=200u32, bed_length_strategy()), 0..8)
        ) {
            let gardens: Vec<Garden> = specs
                .iter()
                .enumerate()
                .map(|(i, (count, length))| Garden::new(format!("Garden {}", i + 1), *count, *length))
                .collect();
            let capacity = normalize_capacity(&gardens);

            let expected: u32 = gardens.iter().map(|g| g.equivalent_beds()).sum();
            prop_assert_eq!(capacity.total_equivalent_beds, expected);
            prop_assert!(capacity.total_equivalent_beds >= gardens.iter().map(|g| g.bed_count).sum::<u32>());
        }

        /// A 30m garden always provides twice the capacity of a 15m garden
        #[test]
        fn prop_thirty_is_double_fifteen(count in 0u32..=10_000u32) {
            prop_assert_eq!(
                to_equivalent(count, BedLength::Thirty),
                2 * to_equivalent(count, BedLength::Fifteen)
            );
        }
    }
}
