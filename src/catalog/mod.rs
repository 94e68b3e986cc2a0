//! Reference catalog: health services, benefit sub-limits, and exclusions

mod exclusion;
mod service;
mod sub_limit;
pub mod loader;

pub use exclusion::{EstimatedDemand, Exclusion};
pub use loader::{CatalogError, LoadedCatalog, DEFAULT_CATALOG_PATH};
pub use service::{DataSource, HealthService, ServiceCategory};
pub use sub_limit::SubLimit;

use std::path::Path;

/// Container for all reference tables
///
/// Loaded once at startup and read-only afterwards; the calculators only
/// ever borrow records out of it.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub services: Vec<HealthService>,
    pub sub_limits: Vec<SubLimit>,
    pub exclusions: Vec<Exclusion>,
}

impl Catalog {
    /// Built-in Saudi reference tables matching data/catalog/*.csv
    pub fn default_reference() -> Self {
        Self {
            services: default_services(),
            sub_limits: default_sub_limits(),
            exclusions: default_exclusions(),
        }
    }

    /// Load the catalog from CSV files in the default location (data/catalog/)
    pub fn from_csv() -> Result<Self, CatalogError> {
        Self::from_csv_path(Path::new(DEFAULT_CATALOG_PATH))
    }

    /// Load the catalog from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, CatalogError> {
        let loaded = LoadedCatalog::load_from(path)?;
        Ok(Self {
            services: loaded.services,
            sub_limits: loaded.sub_limits,
            exclusions: loaded.exclusions,
        })
    }

    /// Look up a service by id
    pub fn service(&self, id: u32) -> Option<&HealthService> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Look up a sub-limit by id
    pub fn sub_limit(&self, id: u32) -> Option<&SubLimit> {
        self.sub_limits.iter().find(|s| s.id == id)
    }

    /// Look up an exclusion by id
    pub fn exclusion(&self, id: u32) -> Option<&Exclusion> {
        self.exclusions.iter().find(|e| e.id == id)
    }

    /// All services in a clinical category
    pub fn services_in(&self, category: ServiceCategory) -> Vec<&HealthService> {
        self.services.iter().filter(|s| s.category == category).collect()
    }

    /// Exclusions with enough data to model addition impact
    pub fn modelable_exclusions(&self) -> Vec<&Exclusion> {
        self.exclusions.iter().filter(|e| e.is_modelable()).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::default_reference()
    }
}

fn default_services() -> Vec<HealthService> {
    fn saudi(
        id: u32,
        name: &str,
        name_ar: &str,
        category: ServiceCategory,
        icd10: &str,
        prevalence: f64,
        cost: f64,
    ) -> HealthService {
        HealthService {
            id,
            name: name.to_string(),
            name_ar: name_ar.to_string(),
            category,
            icd10_code: icd10.to_string(),
            prevalence_per_thousand: prevalence,
            average_treatment_cost_sar: cost,
            data_source: DataSource::Saudi,
            source_country: None,
        }
    }

    fn regional(
        id: u32,
        name: &str,
        name_ar: &str,
        category: ServiceCategory,
        icd10: &str,
        prevalence: f64,
        cost: f64,
        data_source: DataSource,
        country: &str,
    ) -> HealthService {
        HealthService {
            id,
            name: name.to_string(),
            name_ar: name_ar.to_string(),
            category,
            icd10_code: icd10.to_string(),
            prevalence_per_thousand: prevalence,
            average_treatment_cost_sar: cost,
            data_source,
            source_country: Some(country.to_string()),
        }
    }

    vec![
        saudi(1, "Type 2 diabetes management", "علاج السكري من النوع الثاني",
            ServiceCategory::Chronic, "E11.9", 140.0, 2_800.0),
        saudi(2, "Hypertension management", "علاج ارتفاع ضغط الدم",
            ServiceCategory::Chronic, "I10", 180.0, 1_900.0),
        saudi(3, "Normal delivery package", "باقة الولادة الطبيعية",
            ServiceCategory::Maternity, "O80", 45.0, 12_000.0),
        saudi(4, "Restorative dental care", "علاج الأسنان الترميمي",
            ServiceCategory::Dental, "K02.9", 220.0, 900.0),
        saudi(5, "Bariatric surgery", "جراحة السمنة",
            ServiceCategory::Surgical, "E66.9", 6.0, 38_000.0),
        saudi(6, "Seasonal influenza vaccination", "تطعيم الإنفلونزا الموسمية",
            ServiceCategory::Preventive, "Z23", 310.0, 95.0),
        regional(7, "Adult ADHD assessment and treatment", "تقييم وعلاج فرط الحركة للبالغين",
            ServiceCategory::MentalHealth, "F90.9", 12.0, 4_200.0,
            DataSource::Gcc, "UAE"),
        regional(8, "Autism spectrum therapy program", "برنامج علاج طيف التوحد",
            ServiceCategory::MentalHealth, "F84.0", 4.0, 26_000.0,
            DataSource::Gcc, "UAE"),
        regional(9, "Post-stroke physiotherapy course", "برنامج العلاج الطبيعي بعد السكتة الدماغية",
            ServiceCategory::Rehabilitation, "I69.3", 9.0, 7_500.0,
            DataSource::Mena, "Egypt"),
        regional(10, "Chronic-care home nursing", "التمريض المنزلي للأمراض المزمنة",
            ServiceCategory::HomeHealthcare, "Z74.1", 11.0, 9_800.0,
            DataSource::Gcc, "Kuwait"),
    ]
}

fn default_sub_limits() -> Vec<SubLimit> {
    fn limit(
        id: u32,
        benefit: &str,
        benefit_ar: &str,
        category: ServiceCategory,
        current: f64,
        min: f64,
        max: f64,
        copay: f64,
        utilization: f64,
        avg_claim: f64,
    ) -> SubLimit {
        SubLimit {
            id,
            benefit: benefit.to_string(),
            benefit_ar: benefit_ar.to_string(),
            category,
            current_limit_sar: current,
            min_limit_sar: min,
            max_limit_sar: max,
            copayment_percent: copay,
            utilization_rate: utilization,
            avg_claim_sar: avg_claim,
        }
    }

    vec![
        limit(1, "Optical lenses and frames", "النظارات والعدسات",
            ServiceCategory::Optical, 400.0, 0.0, 1_500.0, 20.0, 0.18, 650.0),
        limit(2, "Dental treatment", "علاج الأسنان",
            ServiceCategory::Dental, 2_000.0, 500.0, 6_000.0, 20.0, 0.32, 1_400.0),
        limit(3, "Maternity delivery", "الولادة",
            ServiceCategory::Maternity, 15_000.0, 8_000.0, 30_000.0, 10.0, 0.05, 17_500.0),
        limit(4, "Physiotherapy sessions", "جلسات العلاج الطبيعي",
            ServiceCategory::Rehabilitation, 2_500.0, 1_000.0, 7_500.0, 15.0, 0.09, 3_200.0),
        limit(5, "Psychiatric outpatient care", "العيادات النفسية الخارجية",
            ServiceCategory::MentalHealth, 5_000.0, 1_500.0, 15_000.0, 25.0, 0.04, 6_800.0),
        limit(6, "Home healthcare visits", "زيارات الرعاية الصحية المنزلية",
            ServiceCategory::HomeHealthcare, 10_000.0, 5_000.0, 25_000.0, 0.0, 0.02, 14_000.0),
    ]
}

fn default_exclusions() -> Vec<Exclusion> {
    fn exclusion(
        id: u32,
        name: &str,
        name_ar: &str,
        description: &str,
        description_ar: &str,
        category: ServiceCategory,
        demand: EstimatedDemand,
        cost: Option<f64>,
        prevalence: Option<f64>,
    ) -> Exclusion {
        Exclusion {
            id,
            name: name.to_string(),
            name_ar: name_ar.to_string(),
            description: description.to_string(),
            description_ar: description_ar.to_string(),
            category,
            estimated_demand: demand,
            potential_cost_sar: cost,
            prevalence_per_thousand: prevalence,
        }
    }

    vec![
        exclusion(1, "Hearing aids", "سماعات الأذن الطبية",
            "External hearing aid devices and fitting",
            "أجهزة السمع الخارجية وتركيبها",
            ServiceCategory::Rehabilitation, EstimatedDemand::Medium,
            Some(8_000.0), Some(3.5)),
        exclusion(2, "IVF and assisted reproduction", "أطفال الأنابيب والمساعدة على الإنجاب",
            "In-vitro fertilization cycles and related medication",
            "دورات التلقيح الصناعي والأدوية المرتبطة بها",
            ServiceCategory::Maternity, EstimatedDemand::High,
            Some(22_000.0), Some(6.0)),
        exclusion(3, "Dental implants", "زراعة الأسنان",
            "Surgical placement of dental implants and crowns",
            "زراعة الأسنان الجراحية والتيجان",
            ServiceCategory::Dental, EstimatedDemand::High,
            Some(9_500.0), Some(14.0)),
        exclusion(4, "LASIK refractive surgery", "عمليات تصحيح النظر بالليزك",
            "Laser vision correction for refractive errors",
            "تصحيح النظر بالليزر لعيوب الانكسار",
            ServiceCategory::Optical, EstimatedDemand::Medium,
            Some(7_000.0), Some(10.0)),
        exclusion(5, "Growth hormone therapy", "علاج هرمون النمو",
            "Recombinant growth hormone for non-deficiency indications",
            "هرمون النمو لغير حالات النقص المرضي",
            ServiceCategory::Chronic, EstimatedDemand::Low,
            Some(45_000.0), Some(0.8)),
        exclusion(6, "Alternative medicine", "الطب البديل",
            "Cupping, herbal and other traditional therapies",
            "الحجامة والأعشاب والعلاجات التقليدية الأخرى",
            ServiceCategory::Preventive, EstimatedDemand::Medium,
            None, None),
        exclusion(7, "Cosmetic procedures", "العمليات التجميلية",
            "Procedures performed solely for appearance",
            "العمليات التي تجرى لأغراض تجميلية فقط",
            ServiceCategory::Surgical, EstimatedDemand::Low,
            None, None),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reference_integrity() {
        let catalog = Catalog::default_reference();

        assert_eq!(catalog.services.len(), 10);
        assert_eq!(catalog.sub_limits.len(), 6);
        assert_eq!(catalog.exclusions.len(), 7);

        // Ids are unique within each table
        for (i, s) in catalog.services.iter().enumerate() {
            assert!(catalog.services[i + 1..].iter().all(|o| o.id != s.id));
        }

        // Sub-limit bounds bracket the current limit
        for sl in &catalog.sub_limits {
            assert!(sl.min_limit_sar <= sl.current_limit_sar);
            assert!(sl.current_limit_sar <= sl.max_limit_sar);
        }

        // Saudi-sourced records never carry a source country
        for s in &catalog.services {
            if s.data_source == DataSource::Saudi {
                assert!(s.source_country.is_none());
                assert!(!s.regional_proxy());
            }
        }
    }

    #[test]
    fn test_lookups() {
        let catalog = Catalog::default_reference();

        assert_eq!(catalog.service(1).map(|s| s.icd10_code.as_str()), Some("E11.9"));
        assert!(catalog.service(999).is_none());

        let dental = catalog.services_in(ServiceCategory::Dental);
        assert_eq!(dental.len(), 1);

        // Two exclusions lack cost data
        assert_eq!(catalog.modelable_exclusions().len(), 5);
    }
}
