//! Premium Impact Engine - Actuarial calculators for Saudi health insurance portfolios
//!
//! This library provides:
//! - Premium impact of adding a health service to a benefits package
//! - Cost decomposition into pure, risk-loading, and admin-loading parts
//! - Sub-limit and copayment change impacts with a ±25% sensitivity band
//! - Exclusion-addition impact prediction
//! - Portfolio-level aggregation across independent changes
//!
//! Every calculation is a pure function of its inputs; the reference
//! catalog is loaded once and read-only afterwards.

pub mod catalog;
pub mod pricing;
pub mod runner;

// Re-export commonly used types
pub use catalog::{Catalog, Exclusion, HealthService, SubLimit};
pub use pricing::{
    calculate_exclusion_impact, calculate_portfolio_impact, calculate_premium_impact,
    calculate_sub_limit_impact, cost_breakdown, CostBreakdown, ExclusionImpactResult,
    ImpactDirection, LoadingAssumptions, PortfolioImpactResult, PortfolioParams,
    PremiumImpactResult, SubLimitChange, SubLimitImpactResult,
};
pub use runner::ImpactRunner;
