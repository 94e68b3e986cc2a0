//! Pure actuarial calculators: premium impact, sub-limit changes,
//! exclusion additions, and portfolio aggregation

mod assumptions;
mod exclusion;
mod portfolio;
mod premium;
mod sensitivity;
mod sub_limit;

pub use assumptions::{LoadingAssumptions, PortfolioParams};
pub use exclusion::{calculate_exclusion_impact, ExclusionImpactResult};
pub use portfolio::{calculate_portfolio_impact, PortfolioImpactResult};
pub use premium::{calculate_premium_impact, cost_breakdown, CostBreakdown, PremiumImpactResult};
pub use sensitivity::{SensitivityBand, SensitivityPoint, SENSITIVITY_SPREAD};
pub use sub_limit::{calculate_sub_limit_impact, ImpactDirection, SubLimitChange, SubLimitImpactResult};
