//! Intercropping: fast crops grown in the idle windows of host crops
//!
//! Each host bed offers a window before and after its own planting. Every
//! intercalable crop may absorb a fixed share of the pooled host windows,
//! capped by its own bed requirement. Savings are reported separately and
//! never change the intercalable crop's own requirement.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{whole_u32, BedRequirement, IntercroppingLink};

use crate::config::IntercroppingSettings;

/// Beds an intercalable crop no longer needs dedicated beds for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntercropSaving {
    pub crop_id: String,
    pub fraction: Decimal,
    /// `floor(fraction × host_capacity_cycles)`
    pub cap: u32,
    pub beds_saved: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct IntercroppingResult {
    /// Host beds times the windows each offers
    pub host_capacity_cycles: u32,
    pub savings: Vec<IntercropSaving>,
    pub links: Vec<IntercroppingLink>,
    pub beds_saved: u32,
}

impl IntercroppingResult {
    pub fn saved_for(&self, crop_id: &str) -> u32 {
        self.savings
            .iter()
            .filter(|s| s.crop_id == crop_id)
            .map(|s| s.beds_saved)
            .sum()
    }
}

/// Compute economized beds and the host each absorbed bed goes to
pub fn optimize_intercropping(
    requirements: &[BedRequirement],
    settings: &IntercroppingSettings,
) -> IntercroppingResult {
    // (host id, windows still free)
    let mut hosts: Vec<(&str, u32)> = requirements
        .iter()
        .filter(|r| r.beds_needed > 0 && settings.is_host(&r.crop_id))
        .map(|r| {
            (
                r.crop_id.as_str(),
                r.beds_needed.saturating_mul(settings.cycles_per_host_bed),
            )
        })
        .collect();
    let host_capacity_cycles = hosts
        .iter()
        .fold(0u32, |total, (_, cycles)| total.saturating_add(*cycles));

    let mut result = IntercroppingResult {
        host_capacity_cycles,
        ..Default::default()
    };
    if host_capacity_cycles == 0 {
        return result;
    }

    for rule in &settings.absorption {
        let Some(requirement) = requirements
            .iter()
            .find(|r| r.crop_id == rule.crop_id && r.beds_needed > 0)
        else {
            continue;
        };

        let cap = whole_u32((rule.fraction * Decimal::from(host_capacity_cycles)).floor());
        let wanted = requirement.beds_needed.min(cap);

        let mut absorbed = 0;
        for (host_id, free) in hosts.iter_mut() {
            if absorbed == wanted {
                break;
            }
            let take = (wanted - absorbed).min(*free);
            if take == 0 {
                continue;
            }
            *free -= take;
            absorbed += take;
            result.links.push(IntercroppingLink {
                intercalated_crop_id: rule.crop_id.clone(),
                host_crop_id: host_id.to_string(),
                beds_absorbed: take,
            });
        }

        tracing::debug!(
            crop_id = %rule.crop_id,
            cap,
            beds_saved = absorbed,
            "intercropped into host windows"
        );

        result.beds_saved += absorbed;
        result.savings.push(IntercropSaving {
            crop_id: rule.crop_id.clone(),
            fraction: rule.fraction,
            cap,
            beds_saved: absorbed,
        });
    }

    result
}
