//! Coverage exclusion records and their modelability rules

use serde::{Deserialize, Serialize};

use super::service::ServiceCategory;

/// Qualitative demand estimate for an excluded benefit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstimatedDemand {
    Low,
    Medium,
    High,
}

impl EstimatedDemand {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "low" => Some(EstimatedDemand::Low),
            "medium" => Some(EstimatedDemand::Medium),
            "high" => Some(EstimatedDemand::High),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            EstimatedDemand::Low => "low",
            EstimatedDemand::Medium => "medium",
            EstimatedDemand::High => "high",
        }
    }
}

/// A currently excluded benefit from the standard policy wording
///
/// The cost fields are optional: only exclusions with enough published
/// data carry them, and only those can be run through the addition-impact
/// predictor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exclusion {
    /// Unique exclusion identifier
    pub id: u32,

    /// English display name
    pub name: String,

    /// Arabic display name
    pub name_ar: String,

    /// English description of the excluded benefit
    pub description: String,

    /// Arabic description
    pub description_ar: String,

    /// Clinical category
    pub category: ServiceCategory,

    /// Qualitative demand estimate
    pub estimated_demand: EstimatedDemand,

    /// Mean cost per case if covered, SAR (when data exists)
    #[serde(default)]
    pub potential_cost_sar: Option<f64>,

    /// Expected incidence per 1,000 insured lives (when data exists)
    #[serde(default)]
    pub prevalence_per_thousand: Option<f64>,
}

impl Exclusion {
    /// Cost and prevalence inputs for the addition-impact predictor,
    /// present only when both statistics are available.
    pub fn model_inputs(&self) -> Option<(f64, f64)> {
        match (self.prevalence_per_thousand, self.potential_cost_sar) {
            (Some(prevalence), Some(cost)) => Some((prevalence, cost)),
            _ => None,
        }
    }

    /// Whether this exclusion has enough data to model addition impact
    pub fn is_modelable(&self) -> bool {
        self.model_inputs().is_some()
    }
}
