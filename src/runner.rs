//! Pre-loaded impact runner for batch and sweep calculations
//!
//! Loads the reference catalog once, then allows running many impact
//! calculations with different portfolio parameters without re-reading
//! CSV files.

use std::path::Path;

use crate::catalog::{Catalog, CatalogError};
use crate::pricing::{
    calculate_exclusion_impact, calculate_portfolio_impact, calculate_premium_impact,
    calculate_sub_limit_impact, ExclusionImpactResult, LoadingAssumptions, PortfolioImpactResult,
    PortfolioParams, PremiumImpactResult, SubLimitChange, SubLimitImpactResult,
};

/// Pre-loaded runner over a catalog and a set of loading assumptions
///
/// # Example
/// ```
/// use premium_impact_engine::{ImpactRunner, PortfolioParams};
///
/// let runner = ImpactRunner::new();
/// let params = PortfolioParams::new(1_000, 3_000.0);
/// for (service, impact) in runner.catalog_impacts(&params) {
///     println!("{}: {:.2} SAR", service.name, impact.additional_premium_per_member);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ImpactRunner {
    catalog: Catalog,
    loadings: LoadingAssumptions,
}

impl ImpactRunner {
    /// Create a runner over the built-in reference catalog
    pub fn new() -> Self {
        Self {
            catalog: Catalog::default_reference(),
            loadings: LoadingAssumptions::default(),
        }
    }

    /// Create a runner by loading the catalog from CSV files
    pub fn from_csv() -> Result<Self, CatalogError> {
        Ok(Self {
            catalog: Catalog::from_csv()?,
            loadings: LoadingAssumptions::default(),
        })
    }

    /// Create a runner from a specific catalog directory
    pub fn from_csv_path(path: &Path) -> Result<Self, CatalogError> {
        Ok(Self {
            catalog: Catalog::from_csv_path(path)?,
            loadings: LoadingAssumptions::default(),
        })
    }

    /// Create a runner with a pre-built catalog and custom loadings
    pub fn with_catalog(catalog: Catalog, loadings: LoadingAssumptions) -> Self {
        Self { catalog, loadings }
    }

    /// Get reference to the loaded catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get the loading assumptions in force
    pub fn loadings(&self) -> &LoadingAssumptions {
        &self.loadings
    }

    /// Get mutable loading assumptions for customization
    pub fn loadings_mut(&mut self) -> &mut LoadingAssumptions {
        &mut self.loadings
    }

    /// Premium impact of adding one service, by id
    pub fn premium_impact(
        &self,
        service_id: u32,
        params: &PortfolioParams,
    ) -> Option<PremiumImpactResult> {
        self.catalog
            .service(service_id)
            .map(|service| calculate_premium_impact(service, params, &self.loadings))
    }

    /// Impact of one sub-limit change, by id
    pub fn sub_limit_impact(
        &self,
        sub_limit_id: u32,
        change: &SubLimitChange,
        params: &PortfolioParams,
    ) -> Option<SubLimitImpactResult> {
        self.catalog
            .sub_limit(sub_limit_id)
            .map(|sub_limit| calculate_sub_limit_impact(sub_limit, change, params))
    }

    /// Addition impact of one exclusion, by id; `None` when the exclusion
    /// is unknown or lacks modelling data
    pub fn exclusion_impact(
        &self,
        exclusion_id: u32,
        params: &PortfolioParams,
    ) -> Option<ExclusionImpactResult> {
        self.catalog
            .exclusion(exclusion_id)
            .and_then(|exclusion| calculate_exclusion_impact(exclusion, params, &self.loadings))
    }

    /// Premium impact of every service in the catalog
    pub fn catalog_impacts(
        &self,
        params: &PortfolioParams,
    ) -> Vec<(&crate::catalog::HealthService, PremiumImpactResult)> {
        self.catalog
            .services
            .iter()
            .map(|service| {
                (service, calculate_premium_impact(service, params, &self.loadings))
            })
            .collect()
    }

    /// Sweep one sub-limit's cap across its simulation bounds on an even
    /// grid of `steps` points (minimum 2), holding the copayment fixed.
    /// Returns the simulated limit alongside each impact.
    pub fn sweep_sub_limit(
        &self,
        sub_limit_id: u32,
        steps: usize,
        params: &PortfolioParams,
    ) -> Option<Vec<(f64, SubLimitImpactResult)>> {
        let sub_limit = self.catalog.sub_limit(sub_limit_id)?;
        let steps = steps.max(2);
        let span = sub_limit.max_limit_sar - sub_limit.min_limit_sar;

        let points = (0..steps)
            .map(|i| {
                let limit =
                    sub_limit.min_limit_sar + span * (i as f64) / ((steps - 1) as f64);
                let change = SubLimitChange::new(limit, sub_limit.copayment_percent);
                (limit, calculate_sub_limit_impact(sub_limit, &change, params))
            })
            .collect();

        Some(points)
    }

    /// Aggregate a set of sub-limit changes into a portfolio summary.
    /// Unknown sub-limit ids are skipped with a warning.
    pub fn portfolio_impact(
        &self,
        changes: &[(u32, SubLimitChange)],
        params: &PortfolioParams,
    ) -> PortfolioImpactResult {
        let results: Vec<SubLimitImpactResult> = changes
            .iter()
            .filter_map(|(id, change)| {
                let result = self.sub_limit_impact(*id, change, params);
                if result.is_none() {
                    log::warn!("skipping unknown sub-limit id {id}");
                }
                result
            })
            .collect();

        calculate_portfolio_impact(&results, params)
    }
}

impl Default for ImpactRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::ImpactDirection;
    use approx::assert_relative_eq;

    fn params() -> PortfolioParams {
        PortfolioParams::new(1_000, 3_000.0)
    }

    #[test]
    fn test_catalog_impacts_cover_all_services() {
        let runner = ImpactRunner::new();
        let impacts = runner.catalog_impacts(&params());

        assert_eq!(impacts.len(), runner.catalog().services.len());
        for (service, impact) in &impacts {
            assert!(impact.additional_premium_per_member >= 0.0);
            assert_eq!(impact.regional_proxy, service.regional_proxy());
        }
    }

    #[test]
    fn test_unknown_ids_return_none() {
        let runner = ImpactRunner::new();
        assert!(runner.premium_impact(9_999, &params()).is_none());
        assert!(runner.exclusion_impact(9_999, &params()).is_none());
        assert!(runner.sweep_sub_limit(9_999, 5, &params()).is_none());
    }

    #[test]
    fn test_sweep_spans_bounds_monotonically() {
        let runner = ImpactRunner::new();
        // Sub-limit 2: dental, 500..6000
        let sweep = runner.sweep_sub_limit(2, 12, &params()).unwrap();

        assert_eq!(sweep.len(), 12);
        assert_relative_eq!(sweep.first().unwrap().0, 500.0);
        assert_relative_eq!(sweep.last().unwrap().0, 6_000.0);

        // Raising the cap never lowers the premium impact
        for pair in sweep.windows(2) {
            assert!(pair[1].1.premium_impact_sar >= pair[0].1.premium_impact_sar);
        }
    }

    #[test]
    fn test_portfolio_impact_skips_unknown_ids() {
        let runner = ImpactRunner::new();
        let changes = [
            (2, SubLimitChange::new(800.0, 20.0)),
            (9_999, SubLimitChange::new(100.0, 0.0)),
        ];

        let portfolio = runner.portfolio_impact(&changes, &params());
        assert_eq!(portfolio.changes_count, 1);
        assert_eq!(portfolio.direction, ImpactDirection::Decrease);
    }

    #[test]
    fn test_custom_loadings_flow_through() {
        let mut runner = ImpactRunner::new();
        runner.loadings_mut().risk_loading_factor = 1.0;
        runner.loadings_mut().admin_loading_percent = 0.0;

        // With unit loadings the premium delta equals the pure cost
        let impact = runner.premium_impact(1, &params()).unwrap();
        let service = runner.catalog().service(1).unwrap();
        assert_relative_eq!(
            impact.additional_premium_per_member,
            service.prevalence_per_thousand * service.average_treatment_cost_sar / 1_000.0
        );
    }
}
