//! Premium effect of adding a currently excluded benefit back into coverage
//!
//! Only exclusions carrying both prevalence and cost statistics can be
//! modelled; the predictor returns `None` otherwise so callers can guard
//! at the call site instead of handling a guessed number.

use serde::{Deserialize, Serialize};

use crate::catalog::Exclusion;
use super::assumptions::{LoadingAssumptions, PortfolioParams};
use super::sensitivity::{SensitivityBand, SensitivityPoint};

/// Predicted premium effect of covering an excluded benefit, per member
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExclusionImpactResult {
    /// Which exclusion was modelled
    pub exclusion_id: u32,

    /// Monthly per-member cost of the newly covered benefit, SAR
    pub pmpm_cost: f64,

    /// Annualized gross cost per member, SAR
    pub gross_cost_increase: f64,

    /// Gross cost net of the avoided-cost offset, SAR
    pub net_cost_impact: f64,

    /// Alias of `net_cost_impact` kept for summary-card consumers
    pub cost_per_insured: f64,

    /// Annual per-member premium delta, SAR
    pub premium_impact_sar: f64,

    /// Delta as a percentage of base premium (0 when base premium is 0)
    pub premium_impact_percent: f64,

    /// Band from re-running the pipeline at 0.75x and 1.25x cost
    pub sensitivity: SensitivityBand,
}

/// One full run of the addition-cost pipeline at a given cost per case
fn pipeline(
    prevalence_per_thousand: f64,
    potential_cost_sar: f64,
    params: &PortfolioParams,
    loadings: &LoadingAssumptions,
) -> SensitivityPoint {
    let pmpm_cost = (prevalence_per_thousand.max(0.0) / 1_000.0)
        * potential_cost_sar.max(0.0)
        * loadings.uptake_fraction
        / 12.0;
    let gross_cost_increase = pmpm_cost * 12.0;
    let net_cost_impact = gross_cost_increase * (1.0 - loadings.avoided_cost_fraction);

    SensitivityPoint::new(params.percent_of_premium(net_cost_impact), pmpm_cost)
}

/// Predict the premium effect of adding `exclusion` back into coverage
///
/// Returns `None` when the exclusion lacks prevalence or cost data.
pub fn calculate_exclusion_impact(
    exclusion: &Exclusion,
    params: &PortfolioParams,
    loadings: &LoadingAssumptions,
) -> Option<ExclusionImpactResult> {
    let (prevalence, cost) = exclusion.model_inputs()?;

    let pmpm_cost = (prevalence.max(0.0) / 1_000.0) * cost.max(0.0) * loadings.uptake_fraction / 12.0;
    let gross_cost_increase = pmpm_cost * 12.0;
    let net_cost_impact = gross_cost_increase * (1.0 - loadings.avoided_cost_fraction);
    let premium_impact_percent = params.percent_of_premium(net_cost_impact);

    // Best and worst case re-run the full pipeline at scaled cost per case;
    // each run satisfies the same guards as the expected case
    let sensitivity = SensitivityBand::from_points(
        pipeline(prevalence, cost * 0.75, params, loadings),
        SensitivityPoint::new(premium_impact_percent, pmpm_cost),
        pipeline(prevalence, cost * 1.25, params, loadings),
    );

    Some(ExclusionImpactResult {
        exclusion_id: exclusion.id,
        pmpm_cost,
        gross_cost_increase,
        net_cost_impact,
        cost_per_insured: net_cost_impact,
        premium_impact_sar: net_cost_impact,
        premium_impact_percent,
        sensitivity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EstimatedDemand, ServiceCategory};
    use approx::assert_relative_eq;

    fn exclusion(cost: Option<f64>, prevalence: Option<f64>) -> Exclusion {
        Exclusion {
            id: 9,
            name: "Test exclusion".to_string(),
            name_ar: "استثناء تجريبي".to_string(),
            description: "Test".to_string(),
            description_ar: "تجربة".to_string(),
            category: ServiceCategory::Maternity,
            estimated_demand: EstimatedDemand::High,
            potential_cost_sar: cost,
            prevalence_per_thousand: prevalence,
        }
    }

    #[test]
    fn test_worked_example() {
        // prevalence 10, cost 15000, uptake 0.65, avoided 0.08, base 4000
        let result = calculate_exclusion_impact(
            &exclusion(Some(15_000.0), Some(10.0)),
            &PortfolioParams::new(1_000, 4_000.0),
            &LoadingAssumptions::default(),
        )
        .unwrap();

        assert_relative_eq!(result.gross_cost_increase, 97.5);
        assert_relative_eq!(result.net_cost_impact, 89.7, epsilon = 1e-9);
        assert_relative_eq!(result.premium_impact_percent, 2.2425, epsilon = 1e-9);
        assert_relative_eq!(result.pmpm_cost, 97.5 / 12.0);
        assert_eq!(result.premium_impact_sar, result.net_cost_impact);
        assert_eq!(result.cost_per_insured, result.net_cost_impact);
    }

    #[test]
    fn test_missing_data_returns_none() {
        let params = PortfolioParams::new(1_000, 4_000.0);
        let loadings = LoadingAssumptions::default();

        assert!(calculate_exclusion_impact(&exclusion(None, Some(10.0)), &params, &loadings).is_none());
        assert!(calculate_exclusion_impact(&exclusion(Some(15_000.0), None), &params, &loadings).is_none());
        assert!(calculate_exclusion_impact(&exclusion(None, None), &params, &loadings).is_none());
    }

    #[test]
    fn test_sensitivity_ordering() {
        let result = calculate_exclusion_impact(
            &exclusion(Some(15_000.0), Some(10.0)),
            &PortfolioParams::new(1_000, 4_000.0),
            &LoadingAssumptions::default(),
        )
        .unwrap();

        let band = result.sensitivity;
        assert!(band.best_case.percent <= band.expected.percent);
        assert!(band.expected.percent <= band.worst_case.percent);

        // The band is the same linear pipeline at scaled cost
        assert_relative_eq!(band.best_case.percent, band.expected.percent * 0.75, epsilon = 1e-9);
        assert_relative_eq!(band.worst_case.percent, band.expected.percent * 1.25, epsilon = 1e-9);
        assert_relative_eq!(band.best_case.pmpm, result.pmpm_cost * 0.75, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_premium_guard() {
        let result = calculate_exclusion_impact(
            &exclusion(Some(15_000.0), Some(10.0)),
            &PortfolioParams::new(1_000, 0.0),
            &LoadingAssumptions::default(),
        )
        .unwrap();

        assert_eq!(result.premium_impact_percent, 0.0);
        assert!(result.net_cost_impact > 0.0);
        assert!(result.sensitivity.is_ordered());
    }
}
