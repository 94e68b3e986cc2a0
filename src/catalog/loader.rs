//! CSV-based catalog loader
//!
//! Loads the reference catalog from CSV files in data/catalog/

use std::fs::File;
use std::path::Path;

use thiserror::Error;

use super::exclusion::{EstimatedDemand, Exclusion};
use super::service::{DataSource, HealthService, ServiceCategory};
use super::sub_limit::SubLimit;

/// Default path to the catalog directory
pub const DEFAULT_CATALOG_PATH: &str = "data/catalog";

/// Errors raised while loading the reference catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to open catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid integer in {file} row {row}: {source}")]
    ParseInt {
        file: &'static str,
        row: usize,
        source: std::num::ParseIntError,
    },

    #[error("invalid number in {file} row {row}: {source}")]
    ParseFloat {
        file: &'static str,
        row: usize,
        source: std::num::ParseFloatError,
    },

    #[error("unknown {field} tag '{value}' in {file} row {row}")]
    UnknownTag {
        file: &'static str,
        field: &'static str,
        value: String,
        row: usize,
    },

    #[error("{file} row {row} is missing column {column}")]
    MissingColumn {
        file: &'static str,
        row: usize,
        column: usize,
    },
}

fn field<'a>(
    record: &'a csv::StringRecord,
    file: &'static str,
    row: usize,
    column: usize,
) -> Result<&'a str, CatalogError> {
    record
        .get(column)
        .map(str::trim)
        .ok_or(CatalogError::MissingColumn { file, row, column })
}

fn parse_u32(
    record: &csv::StringRecord,
    file: &'static str,
    row: usize,
    column: usize,
) -> Result<u32, CatalogError> {
    field(record, file, row, column)?
        .parse()
        .map_err(|source| CatalogError::ParseInt { file, row, source })
}

fn parse_f64(
    record: &csv::StringRecord,
    file: &'static str,
    row: usize,
    column: usize,
) -> Result<f64, CatalogError> {
    field(record, file, row, column)?
        .parse()
        .map_err(|source| CatalogError::ParseFloat { file, row, source })
}

/// Optional f64 column: empty string means absent
fn parse_opt_f64(
    record: &csv::StringRecord,
    file: &'static str,
    row: usize,
    column: usize,
) -> Result<Option<f64>, CatalogError> {
    let raw = field(record, file, row, column)?;
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|source| CatalogError::ParseFloat { file, row, source })
}

/// Load health services from services.csv
///
/// Columns: id, name, name_ar, category, icd10_code,
/// prevalence_per_thousand, average_treatment_cost_sar, data_source,
/// source_country (empty when Saudi-sourced)
pub fn load_services(path: &Path) -> Result<Vec<HealthService>, CatalogError> {
    const FILE: &str = "services.csv";
    let file = File::open(path.join(FILE))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut services = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;

        let category_tag = field(&record, FILE, row, 3)?;
        let category = ServiceCategory::from_tag(category_tag).ok_or_else(|| {
            CatalogError::UnknownTag {
                file: FILE,
                field: "category",
                value: category_tag.to_string(),
                row,
            }
        })?;

        let source_tag = field(&record, FILE, row, 7)?;
        let data_source = DataSource::from_tag(source_tag).ok_or_else(|| {
            CatalogError::UnknownTag {
                file: FILE,
                field: "data_source",
                value: source_tag.to_string(),
                row,
            }
        })?;

        let source_country = field(&record, FILE, row, 8)?;

        services.push(HealthService {
            id: parse_u32(&record, FILE, row, 0)?,
            name: field(&record, FILE, row, 1)?.to_string(),
            name_ar: field(&record, FILE, row, 2)?.to_string(),
            category,
            icd10_code: field(&record, FILE, row, 4)?.to_string(),
            prevalence_per_thousand: parse_f64(&record, FILE, row, 5)?,
            average_treatment_cost_sar: parse_f64(&record, FILE, row, 6)?,
            data_source,
            source_country: if source_country.is_empty() {
                None
            } else {
                Some(source_country.to_string())
            },
        });
    }

    Ok(services)
}

/// Load benefit sub-limits from sub_limits.csv
///
/// Columns: id, benefit, benefit_ar, category, current_limit_sar,
/// min_limit_sar, max_limit_sar, copayment_percent, utilization_rate,
/// avg_claim_sar
pub fn load_sub_limits(path: &Path) -> Result<Vec<SubLimit>, CatalogError> {
    const FILE: &str = "sub_limits.csv";
    let file = File::open(path.join(FILE))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut sub_limits = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;

        let category_tag = field(&record, FILE, row, 3)?;
        let category = ServiceCategory::from_tag(category_tag).ok_or_else(|| {
            CatalogError::UnknownTag {
                file: FILE,
                field: "category",
                value: category_tag.to_string(),
                row,
            }
        })?;

        sub_limits.push(SubLimit {
            id: parse_u32(&record, FILE, row, 0)?,
            benefit: field(&record, FILE, row, 1)?.to_string(),
            benefit_ar: field(&record, FILE, row, 2)?.to_string(),
            category,
            current_limit_sar: parse_f64(&record, FILE, row, 4)?,
            min_limit_sar: parse_f64(&record, FILE, row, 5)?,
            max_limit_sar: parse_f64(&record, FILE, row, 6)?,
            copayment_percent: parse_f64(&record, FILE, row, 7)?,
            utilization_rate: parse_f64(&record, FILE, row, 8)?,
            avg_claim_sar: parse_f64(&record, FILE, row, 9)?,
        });
    }

    Ok(sub_limits)
}

/// Load coverage exclusions from exclusions.csv
///
/// Columns: id, name, name_ar, description, description_ar, category,
/// estimated_demand, potential_cost_sar (optional), prevalence_per_thousand
/// (optional)
pub fn load_exclusions(path: &Path) -> Result<Vec<Exclusion>, CatalogError> {
    const FILE: &str = "exclusions.csv";
    let file = File::open(path.join(FILE))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut exclusions = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;

        let category_tag = field(&record, FILE, row, 5)?;
        let category = ServiceCategory::from_tag(category_tag).ok_or_else(|| {
            CatalogError::UnknownTag {
                file: FILE,
                field: "category",
                value: category_tag.to_string(),
                row,
            }
        })?;

        let demand_tag = field(&record, FILE, row, 6)?;
        let estimated_demand = EstimatedDemand::from_tag(demand_tag).ok_or_else(|| {
            CatalogError::UnknownTag {
                file: FILE,
                field: "estimated_demand",
                value: demand_tag.to_string(),
                row,
            }
        })?;

        exclusions.push(Exclusion {
            id: parse_u32(&record, FILE, row, 0)?,
            name: field(&record, FILE, row, 1)?.to_string(),
            name_ar: field(&record, FILE, row, 2)?.to_string(),
            description: field(&record, FILE, row, 3)?.to_string(),
            description_ar: field(&record, FILE, row, 4)?.to_string(),
            category,
            estimated_demand,
            potential_cost_sar: parse_opt_f64(&record, FILE, row, 7)?,
            prevalence_per_thousand: parse_opt_f64(&record, FILE, row, 8)?,
        });
    }

    Ok(exclusions)
}

/// All reference tables loaded from a catalog directory
pub struct LoadedCatalog {
    pub services: Vec<HealthService>,
    pub sub_limits: Vec<SubLimit>,
    pub exclusions: Vec<Exclusion>,
}

impl LoadedCatalog {
    /// Load all tables from the default path
    pub fn load_default() -> Result<Self, CatalogError> {
        Self::load_from(Path::new(DEFAULT_CATALOG_PATH))
    }

    /// Load all tables from a specific directory
    pub fn load_from(path: &Path) -> Result<Self, CatalogError> {
        let loaded = Self {
            services: load_services(path)?,
            sub_limits: load_sub_limits(path)?,
            exclusions: load_exclusions(path)?,
        };
        log::info!(
            "loaded catalog from {}: {} services, {} sub-limits, {} exclusions",
            path.display(),
            loaded.services.len(),
            loaded.sub_limits.len(),
            loaded.exclusions.len()
        );
        Ok(loaded)
    }
}
