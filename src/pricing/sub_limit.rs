//! Premium effect of changing a benefit sub-limit or its copayment
//!
//! The insurer-paid cost per utilizing member is `min(avg_claim, limit)`
//! net of copayment; the impact of a change is the difference between the
//! new and current paid cost, scaled by the benefit's utilization rate.
//! Raising the cap or lowering the copayment increases expected paid
//! claims; the reverse decreases them.

use serde::{Deserialize, Serialize};

use crate::catalog::SubLimit;
use super::assumptions::PortfolioParams;
use super::sensitivity::{SensitivityBand, SensitivityPoint};

/// Sign of a premium impact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactDirection {
    Increase,
    Decrease,
    Neutral,
}

impl ImpactDirection {
    /// Direction from the sign of an annual SAR delta
    pub fn from_delta(delta_sar: f64) -> Self {
        if delta_sar > 0.0 {
            ImpactDirection::Increase
        } else if delta_sar < 0.0 {
            ImpactDirection::Decrease
        } else {
            ImpactDirection::Neutral
        }
    }
}

/// A simulated change to one sub-limit's cap and copayment
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SubLimitChange {
    /// Proposed annual cap, SAR
    pub new_limit_sar: f64,

    /// Proposed cost-share percentage borne by the insured
    pub new_copayment_percent: f64,
}

impl SubLimitChange {
    pub fn new(new_limit_sar: f64, new_copayment_percent: f64) -> Self {
        Self {
            new_limit_sar,
            new_copayment_percent,
        }
    }

    /// A change that keeps the sub-limit as it stands today
    pub fn unchanged(sub_limit: &SubLimit) -> Self {
        Self {
            new_limit_sar: sub_limit.current_limit_sar,
            new_copayment_percent: sub_limit.copayment_percent,
        }
    }
}

/// Premium effect of one sub-limit change, per insured member
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SubLimitImpactResult {
    /// Which sub-limit was changed
    pub sub_limit_id: u32,

    /// Sign of the impact; always matches the sign of `premium_impact_sar`
    pub direction: ImpactDirection,

    /// Monthly per-member cost delta, SAR
    pub pmpm_cost: f64,

    /// Annual per-member premium delta, SAR (negative for savings)
    pub premium_impact_sar: f64,

    /// Delta as a percentage of base premium (0 when base premium is 0)
    pub premium_impact_percent: f64,

    /// ±25% band around the expected impact
    pub sensitivity: SensitivityBand,
}

/// Compute the premium effect of moving `sub_limit` to `change`
///
/// Out-of-range inputs degrade proportionally: the paid-cost model
/// saturates at the average claim and clamps copayments into [0, 100]
/// rather than failing.
pub fn calculate_sub_limit_impact(
    sub_limit: &SubLimit,
    change: &SubLimitChange,
    params: &PortfolioParams,
) -> SubLimitImpactResult {
    let current_paid =
        sub_limit.paid_per_utilizer(sub_limit.current_limit_sar, sub_limit.copayment_percent);
    let new_paid =
        sub_limit.paid_per_utilizer(change.new_limit_sar, change.new_copayment_percent);

    let utilization = sub_limit.utilization_rate.max(0.0);
    let annual_delta_per_member = (new_paid - current_paid) * utilization;

    let pmpm_cost = annual_delta_per_member / 12.0;
    let premium_impact_percent = params.percent_of_premium(annual_delta_per_member);

    SubLimitImpactResult {
        sub_limit_id: sub_limit.id,
        direction: ImpactDirection::from_delta(annual_delta_per_member),
        pmpm_cost,
        premium_impact_sar: annual_delta_per_member,
        premium_impact_percent,
        sensitivity: SensitivityBand::around(SensitivityPoint::new(
            premium_impact_percent,
            pmpm_cost,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ServiceCategory;
    use approx::assert_relative_eq;

    fn dental_limit() -> SubLimit {
        SubLimit {
            id: 2,
            benefit: "Dental treatment".to_string(),
            benefit_ar: "علاج الأسنان".to_string(),
            category: ServiceCategory::Dental,
            current_limit_sar: 2_000.0,
            min_limit_sar: 500.0,
            max_limit_sar: 6_000.0,
            copayment_percent: 20.0,
            utilization_rate: 0.32,
            avg_claim_sar: 1_400.0,
        }
    }

    fn params() -> PortfolioParams {
        PortfolioParams::new(1_000, 3_000.0)
    }

    #[test]
    fn test_lower_cap_decreases_premium() {
        let sl = dental_limit();
        // Cap cut below the average claim: insurer now pays 800 * 0.8
        // instead of the full 1400 * 0.8 per utilizing member
        let result =
            calculate_sub_limit_impact(&sl, &SubLimitChange::new(800.0, 20.0), &params());

        let expected_annual = (800.0 - 1_400.0) * 0.8 * 0.32;
        assert_relative_eq!(result.premium_impact_sar, expected_annual, epsilon = 1e-9);
        assert_eq!(result.direction, ImpactDirection::Decrease);
        assert!(result.premium_impact_sar < 0.0);
        assert!(result.sensitivity.is_ordered());
    }

    #[test]
    fn test_raising_cap_above_claim_is_bounded() {
        let sl = dental_limit();
        // Current cap (2000) already exceeds the average claim (1400), so
        // raising it further pays nothing extra
        let result =
            calculate_sub_limit_impact(&sl, &SubLimitChange::new(6_000.0, 20.0), &params());

        assert_eq!(result.premium_impact_sar, 0.0);
        assert_eq!(result.direction, ImpactDirection::Neutral);
    }

    #[test]
    fn test_copay_cut_increases_premium() {
        let sl = dental_limit();
        let result =
            calculate_sub_limit_impact(&sl, &SubLimitChange::new(2_000.0, 10.0), &params());

        // Insurer share rises from 80% to 90% of the 1400 average claim
        let expected_annual = 1_400.0 * 0.10 * 0.32;
        assert_relative_eq!(result.premium_impact_sar, expected_annual, epsilon = 1e-9);
        assert_eq!(result.direction, ImpactDirection::Increase);
        assert_relative_eq!(result.pmpm_cost, expected_annual / 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unchanged_is_neutral() {
        let sl = dental_limit();
        let result =
            calculate_sub_limit_impact(&sl, &SubLimitChange::unchanged(&sl), &params());

        assert_eq!(result.direction, ImpactDirection::Neutral);
        assert_eq!(result.premium_impact_sar, 0.0);
        assert_eq!(result.premium_impact_percent, 0.0);
    }

    #[test]
    fn test_direction_matches_sign() {
        let sl = dental_limit();
        let cases = [
            SubLimitChange::new(500.0, 20.0),
            SubLimitChange::new(2_000.0, 50.0),
            SubLimitChange::new(2_000.0, 0.0),
            SubLimitChange::unchanged(&sl),
        ];

        for change in cases {
            let result = calculate_sub_limit_impact(&sl, &change, &params());
            match result.direction {
                ImpactDirection::Increase => assert!(result.premium_impact_sar > 0.0),
                ImpactDirection::Decrease => assert!(result.premium_impact_sar < 0.0),
                ImpactDirection::Neutral => assert_eq!(result.premium_impact_sar, 0.0),
            }
        }
    }

    #[test]
    fn test_out_of_range_inputs_degrade_gracefully() {
        let sl = dental_limit();

        // Negative limit behaves as zero coverage, copay above 100 clamps
        let result =
            calculate_sub_limit_impact(&sl, &SubLimitChange::new(-500.0, 150.0), &params());
        assert!(result.premium_impact_sar.is_finite());
        assert_eq!(result.direction, ImpactDirection::Decrease);

        // Zero base premium never yields NaN percent
        let zero_base = PortfolioParams::new(1_000, 0.0);
        let result =
            calculate_sub_limit_impact(&sl, &SubLimitChange::new(800.0, 20.0), &zero_base);
        assert_eq!(result.premium_impact_percent, 0.0);
    }

    #[test]
    fn test_sensitivity_band_ordering_for_savings() {
        let sl = dental_limit();
        let result =
            calculate_sub_limit_impact(&sl, &SubLimitChange::new(800.0, 20.0), &params());

        // Negative expected impact: deeper saving is the best case
        assert!(result.sensitivity.best_case.percent <= result.sensitivity.expected.percent);
        assert!(result.sensitivity.expected.percent <= result.sensitivity.worst_case.percent);
        assert_relative_eq!(
            result.sensitivity.expected.percent,
            result.premium_impact_percent
        );
    }
}
