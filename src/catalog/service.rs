//! Health service reference records matching the CHI benefit catalog format

use serde::{Deserialize, Serialize};

/// Clinical category of a health service or benefit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceCategory {
    Preventive,
    Chronic,
    Maternity,
    Dental,
    Optical,
    MentalHealth,
    Rehabilitation,
    Surgical,
    HomeHealthcare,
}

impl ServiceCategory {
    /// Parse from the catalog CSV tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "preventive" => Some(ServiceCategory::Preventive),
            "chronic" => Some(ServiceCategory::Chronic),
            "maternity" => Some(ServiceCategory::Maternity),
            "dental" => Some(ServiceCategory::Dental),
            "optical" => Some(ServiceCategory::Optical),
            "mental_health" => Some(ServiceCategory::MentalHealth),
            "rehabilitation" => Some(ServiceCategory::Rehabilitation),
            "surgical" => Some(ServiceCategory::Surgical),
            "home_healthcare" => Some(ServiceCategory::HomeHealthcare),
            _ => None,
        }
    }

    /// Get the string representation matching the catalog CSV format
    pub fn as_tag(&self) -> &'static str {
        match self {
            ServiceCategory::Preventive => "preventive",
            ServiceCategory::Chronic => "chronic",
            ServiceCategory::Maternity => "maternity",
            ServiceCategory::Dental => "dental",
            ServiceCategory::Optical => "optical",
            ServiceCategory::MentalHealth => "mental_health",
            ServiceCategory::Rehabilitation => "rehabilitation",
            ServiceCategory::Surgical => "surgical",
            ServiceCategory::HomeHealthcare => "home_healthcare",
        }
    }
}

/// Provenance of the prevalence and cost statistics behind a service record
///
/// Anything other than `Saudi` means the figures are a regional proxy and
/// downstream results carry a caveat flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    /// Saudi national claims data
    Saudi,
    /// Gulf Cooperation Council regional data
    Gcc,
    /// Middle East / North Africa regional data
    Mena,
}

impl DataSource {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "saudi" => Some(DataSource::Saudi),
            "gcc" => Some(DataSource::Gcc),
            "mena" => Some(DataSource::Mena),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            DataSource::Saudi => "saudi",
            DataSource::Gcc => "gcc",
            DataSource::Mena => "mena",
        }
    }
}

/// A single health service record from the reference catalog
///
/// Records are immutable after load; prevalence is expressed per 1,000
/// insured lives per year, costs in SAR per treated case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthService {
    /// Unique service identifier
    pub id: u32,

    /// English display name
    pub name: String,

    /// Arabic display name
    pub name_ar: String,

    /// Clinical category
    pub category: ServiceCategory,

    /// ICD-10 diagnosis code
    pub icd10_code: String,

    /// Expected incidence per 1,000 insured lives per year
    pub prevalence_per_thousand: f64,

    /// Mean cost per treated case in SAR
    pub average_treatment_cost_sar: f64,

    /// Provenance of the underlying statistics
    pub data_source: DataSource,

    /// Source country when the data is a regional proxy
    #[serde(default)]
    pub source_country: Option<String>,
}

impl HealthService {
    /// Whether the record's statistics are a regional proxy rather than
    /// Saudi national data. Saudi-sourced records never raise the caveat.
    pub fn regional_proxy(&self) -> bool {
        self.data_source != DataSource::Saudi
    }
}
