//! Benefit sub-limit records used for limit-change simulation

use serde::{Deserialize, Serialize};

use super::service::ServiceCategory;

/// A benefit-specific annual cap with its historical utilization statistics
///
/// `current_limit_sar` is the cap in force today; simulated changes are
/// expected to stay within `[min_limit_sar, max_limit_sar]`, though the
/// calculators degrade proportionally rather than fail outside that range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubLimit {
    /// Unique sub-limit identifier
    pub id: u32,

    /// English benefit name
    pub benefit: String,

    /// Arabic benefit name
    pub benefit_ar: String,

    /// Clinical category of the capped benefit
    pub category: ServiceCategory,

    /// Annual cap currently in force, SAR
    pub current_limit_sar: f64,

    /// Lowest cap considered in simulation, SAR
    pub min_limit_sar: f64,

    /// Highest cap considered in simulation, SAR
    pub max_limit_sar: f64,

    /// Current cost-share percentage borne by the insured (0 when n/a)
    pub copayment_percent: f64,

    /// Fraction of members using the benefit per year
    pub utilization_rate: f64,

    /// Mean claim amount per utilizing member, SAR
    pub avg_claim_sar: f64,
}

impl SubLimit {
    /// Clamp a proposed new limit into the simulation bounds
    pub fn clamp_limit(&self, new_limit_sar: f64) -> f64 {
        new_limit_sar.clamp(self.min_limit_sar, self.max_limit_sar)
    }

    /// Expected insurer-paid cost per utilizing member under a given cap
    /// and copayment: `min(avg_claim, limit) * (1 - copay/100)`.
    pub fn paid_per_utilizer(&self, limit_sar: f64, copayment_percent: f64) -> f64 {
        let covered = self.avg_claim_sar.min(limit_sar.max(0.0));
        let copay = copayment_percent.clamp(0.0, 100.0);
        covered * (1.0 - copay / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn optical_limit() -> SubLimit {
        SubLimit {
            id: 1,
            benefit: "Optical lenses and frames".to_string(),
            benefit_ar: "النظارات والعدسات".to_string(),
            category: ServiceCategory::Optical,
            current_limit_sar: 400.0,
            min_limit_sar: 0.0,
            max_limit_sar: 1_500.0,
            copayment_percent: 20.0,
            utilization_rate: 0.18,
            avg_claim_sar: 650.0,
        }
    }

    #[test]
    fn test_paid_per_utilizer_caps_at_limit() {
        let sl = optical_limit();
        // Claim (650) exceeds the cap (400): insurer pays 400 * 0.8
        assert_eq!(sl.paid_per_utilizer(400.0, 20.0), 320.0);
        // Cap above the claim: insurer pays the full claim net of copay
        assert_eq!(sl.paid_per_utilizer(1_000.0, 20.0), 520.0);
    }

    #[test]
    fn test_paid_per_utilizer_clamps_inputs() {
        let sl = optical_limit();
        // Negative limit behaves as zero coverage
        assert_eq!(sl.paid_per_utilizer(-100.0, 20.0), 0.0);
        // Copay above 100% cannot turn the paid amount negative
        assert_eq!(sl.paid_per_utilizer(400.0, 150.0), 0.0);
    }

    #[test]
    fn test_clamp_limit() {
        let sl = optical_limit();
        assert_eq!(sl.clamp_limit(2_000.0), 1_500.0);
        assert_eq!(sl.clamp_limit(-50.0), 0.0);
        assert_eq!(sl.clamp_limit(800.0), 800.0);
    }
}
