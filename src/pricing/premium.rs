//! Premium impact of adding a health service to a benefits package
//!
//! The base model assumes utilization equal to prevalence, applies a
//! uniform risk loading for claim volatility and an administrative markup
//! on the risk-loaded cost. All functions are pure and never error:
//! negative inputs clamp to zero and a zero base premium reports a zero
//! impact percent instead of dividing.

use serde::{Deserialize, Serialize};

use crate::catalog::HealthService;
use super::assumptions::{LoadingAssumptions, PortfolioParams};

/// Premium delta attributable to adding one service, per insured member
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PremiumImpactResult {
    /// Expected claims per 1,000 lives per year (base model: = prevalence)
    pub expected_claims_per_thousand: f64,

    /// Annual claim cost per 1,000 lives, SAR
    pub annual_cost_per_thousand: f64,

    /// Risk loading factor applied
    pub risk_loading_factor: f64,

    /// Admin loading percentage applied
    pub admin_loading_percent: f64,

    /// Loaded annual premium delta per member, SAR
    pub additional_premium_per_member: f64,

    /// Delta as a percentage of base premium (0 when base premium is 0)
    pub total_impact_percent: f64,

    /// True when the service statistics are a regional proxy rather than
    /// Saudi national data
    pub regional_proxy: bool,
}

/// Compute the premium delta for adding `service` to the benefits package
pub fn calculate_premium_impact(
    service: &HealthService,
    params: &PortfolioParams,
    loadings: &LoadingAssumptions,
) -> PremiumImpactResult {
    let expected_claims_per_thousand = service.prevalence_per_thousand.max(0.0);
    let annual_cost_per_thousand =
        expected_claims_per_thousand * service.average_treatment_cost_sar.max(0.0);

    let pure_cost_per_member = annual_cost_per_thousand / 1_000.0;
    let additional_premium_per_member = pure_cost_per_member
        * loadings.risk_loading_factor
        * (1.0 + loadings.admin_loading_percent / 100.0);

    PremiumImpactResult {
        expected_claims_per_thousand,
        annual_cost_per_thousand,
        risk_loading_factor: loadings.risk_loading_factor,
        admin_loading_percent: loadings.admin_loading_percent,
        additional_premium_per_member,
        total_impact_percent: params.percent_of_premium(additional_premium_per_member),
        regional_proxy: service.regional_proxy(),
    }
}

/// Per-member premium delta split into its three loading components
///
/// The parts are a partition of `additional_premium_per_member`, not an
/// approximation: `pure_cost + risk_loading + admin_loading` reproduces it
/// to floating-point tolerance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Pure expected claim cost per member, SAR
    pub pure_cost: f64,

    /// Volatility margin on top of pure cost, SAR
    pub risk_loading: f64,

    /// Administrative markup on the risk-loaded cost, SAR
    pub admin_loading: f64,
}

impl CostBreakdown {
    /// Sum of the three components
    pub fn total(&self) -> f64 {
        self.pure_cost + self.risk_loading + self.admin_loading
    }

    /// Share of one component against the total, as a percentage
    /// (0 when the total is 0)
    pub fn share_percent(&self, part: f64) -> f64 {
        let total = self.total();
        if total > 0.0 {
            part / total * 100.0
        } else {
            0.0
        }
    }
}

/// Decompose a premium impact into pure cost, risk loading, and admin
/// loading contributions for proportional rendering
pub fn cost_breakdown(result: &PremiumImpactResult) -> CostBreakdown {
    let pure_cost = result.annual_cost_per_thousand / 1_000.0;
    let risk_loading = pure_cost * (result.risk_loading_factor - 1.0);
    let admin_loading = (pure_cost + risk_loading) * (result.admin_loading_percent / 100.0);

    CostBreakdown {
        pure_cost,
        risk_loading,
        admin_loading,
    }
}
