//! Portfolio-level aggregation of independent sub-limit impacts
//!
//! Impacts add linearly: the model treats cross-benefit interactions as
//! negligible, a stated simplification of the base design.

use serde::{Deserialize, Serialize};

use super::assumptions::PortfolioParams;
use super::sub_limit::{ImpactDirection, SubLimitImpactResult};

/// Combined premium effect of a set of sub-limit changes
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PortfolioImpactResult {
    /// Number of sub-limit changes aggregated
    pub changes_count: usize,

    /// Sum of annual per-member premium deltas, SAR
    pub total_premium_impact_sar: f64,

    /// Sum of the individual impact percentages
    pub total_premium_impact_percent: f64,

    /// Base premium plus the total delta, per member, SAR
    pub new_premium_per_member: f64,

    /// Sign of the total impact
    pub direction: ImpactDirection,
}

/// Aggregate independent sub-limit impacts into one portfolio summary
///
/// An empty slice yields a zero-impact result; callers normally guard
/// against invoking the aggregator with nothing selected, but it never
/// fails either way.
pub fn calculate_portfolio_impact(
    results: &[SubLimitImpactResult],
    params: &PortfolioParams,
) -> PortfolioImpactResult {
    let total_premium_impact_sar: f64 = results.iter().map(|r| r.premium_impact_sar).sum();
    let total_premium_impact_percent: f64 =
        results.iter().map(|r| r.premium_impact_percent).sum();

    PortfolioImpactResult {
        changes_count: results.len(),
        total_premium_impact_sar,
        total_premium_impact_percent,
        new_premium_per_member: params.base_premium_sar + total_premium_impact_sar,
        direction: ImpactDirection::from_delta(total_premium_impact_sar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ServiceCategory, SubLimit};
    use crate::pricing::sub_limit::{calculate_sub_limit_impact, SubLimitChange};
    use approx::assert_relative_eq;

    fn sub_limit(id: u32, current: f64, avg_claim: f64, utilization: f64) -> SubLimit {
        SubLimit {
            id,
            benefit: format!("Benefit {id}"),
            benefit_ar: format!("منفعة {id}"),
            category: ServiceCategory::Dental,
            current_limit_sar: current,
            min_limit_sar: 0.0,
            max_limit_sar: current * 3.0,
            copayment_percent: 20.0,
            utilization_rate: utilization,
            avg_claim_sar: avg_claim,
        }
    }

    #[test]
    fn test_additivity() {
        let params = PortfolioParams::new(1_000, 3_000.0);
        let a = sub_limit(1, 2_000.0, 1_400.0, 0.32);
        let b = sub_limit(2, 400.0, 650.0, 0.18);

        let impact_a = calculate_sub_limit_impact(&a, &SubLimitChange::new(800.0, 20.0), &params);
        let impact_b = calculate_sub_limit_impact(&b, &SubLimitChange::new(900.0, 20.0), &params);

        let portfolio = calculate_portfolio_impact(&[impact_a, impact_b], &params);

        assert_relative_eq!(
            portfolio.total_premium_impact_sar,
            impact_a.premium_impact_sar + impact_b.premium_impact_sar
        );
        assert_relative_eq!(
            portfolio.total_premium_impact_percent,
            impact_a.premium_impact_percent + impact_b.premium_impact_percent
        );
        assert_relative_eq!(
            portfolio.new_premium_per_member,
            3_000.0 + portfolio.total_premium_impact_sar
        );
        assert_eq!(portfolio.changes_count, 2);
    }

    #[test]
    fn test_empty_input_is_zero_impact() {
        let params = PortfolioParams::new(500, 2_500.0);
        let portfolio = calculate_portfolio_impact(&[], &params);

        assert_eq!(portfolio.changes_count, 0);
        assert_eq!(portfolio.total_premium_impact_sar, 0.0);
        assert_eq!(portfolio.total_premium_impact_percent, 0.0);
        assert_eq!(portfolio.new_premium_per_member, 2_500.0);
        assert_eq!(portfolio.direction, ImpactDirection::Neutral);
    }

    #[test]
    fn test_offsetting_changes_net_out() {
        let params = PortfolioParams::new(1_000, 3_000.0);
        let a = sub_limit(1, 1_000.0, 2_000.0, 0.10);

        // Raise then cut the same cap by the same amount
        let up = calculate_sub_limit_impact(&a, &SubLimitChange::new(1_500.0, 20.0), &params);
        let down = calculate_sub_limit_impact(&a, &SubLimitChange::new(500.0, 20.0), &params);

        let portfolio = calculate_portfolio_impact(&[up, down], &params);
        assert_relative_eq!(portfolio.total_premium_impact_sar, 0.0, epsilon = 1e-9);
    }
}
