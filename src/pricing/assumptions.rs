//! Portfolio parameters and actuarial loading assumptions

use serde::{Deserialize, Serialize};

/// Portfolio being priced: group size and current annual premium per member
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PortfolioParams {
    /// Number of insured members (always at least 1)
    pub member_count: u32,

    /// Current annual premium per member, SAR
    pub base_premium_sar: f64,
}

impl PortfolioParams {
    /// Create sanitized parameters: a zero member count is bumped to 1 and
    /// a negative base premium is treated as 0. UI sliders already constrain
    /// these ranges; the constructor keeps the calculators total anyway.
    pub fn new(member_count: u32, base_premium_sar: f64) -> Self {
        Self {
            member_count: member_count.max(1),
            base_premium_sar: base_premium_sar.max(0.0),
        }
    }

    /// Percentage that an annual per-member SAR delta represents against
    /// the base premium. Defined as 0 when the base premium is 0 so the
    /// calculators never emit NaN or infinity.
    pub fn percent_of_premium(&self, annual_delta_sar: f64) -> f64 {
        if self.base_premium_sar > 0.0 {
            annual_delta_sar / self.base_premium_sar * 100.0
        } else {
            0.0
        }
    }
}

/// Loading assumptions applied uniformly across the catalog
///
/// The base model applies the same risk and admin loadings regardless of
/// service category; category-specific loadings would slot in here if the
/// pricing committee ever publishes them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoadingAssumptions {
    /// Multiplicative margin (>1) on pure claim cost for claim volatility
    pub risk_loading_factor: f64,

    /// Administrative markup percentage on risk-loaded cost
    pub admin_loading_percent: f64,

    /// Fraction of eligible members assumed to use a newly covered benefit
    pub uptake_fraction: f64,

    /// Fraction of a new benefit's gross cost the system already bears
    /// indirectly (deferred care, ER substitution)
    pub avoided_cost_fraction: f64,
}

impl Default for LoadingAssumptions {
    fn default() -> Self {
        Self {
            risk_loading_factor: 1.2,    // 20% volatility margin
            admin_loading_percent: 15.0, // 15% admin markup
            uptake_fraction: 0.65,
            avoided_cost_fraction: 0.08,
        }
    }
}
