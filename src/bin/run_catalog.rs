//! Run premium impacts for the entire reference catalog
//!
//! Outputs per-service impacts plus a portfolio summary for comparison
//! with the published rate sheets

use anyhow::Context;
use premium_impact_engine::{
    calculate_premium_impact, cost_breakdown, ImpactRunner, PortfolioParams,
};
use rayon::prelude::*;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let start = Instant::now();
    println!("Loading catalog from data/catalog/...");

    let runner = ImpactRunner::from_csv().context("failed to load reference catalog")?;
    println!(
        "Loaded {} services, {} sub-limits, {} exclusions in {:?}",
        runner.catalog().services.len(),
        runner.catalog().sub_limits.len(),
        runner.catalog().exclusions.len(),
        start.elapsed()
    );

    let params = PortfolioParams::new(1_000, 3_000.0);
    let loadings = *runner.loadings();

    println!("Running catalog impacts...");
    let calc_start = Instant::now();

    // Each service is independent; compute in parallel
    let impacts: Vec<_> = runner
        .catalog()
        .services
        .par_iter()
        .map(|service| {
            let impact = calculate_premium_impact(service, &params, &loadings);
            let parts = cost_breakdown(&impact);
            (service, impact, parts)
        })
        .collect();

    println!("Calculations complete in {:?}", calc_start.elapsed());

    let output_path = "catalog_impact_output.csv";
    let mut file =
        File::create(output_path).with_context(|| format!("failed to create {output_path}"))?;

    writeln!(
        file,
        "ServiceId,Name,Category,ICD10,Prevalence,AvgCostSAR,PureCost,RiskLoading,AdminLoading,PremiumPerMember,ImpactPercent,RegionalProxy"
    )?;

    for (service, impact, parts) in &impacts {
        writeln!(
            file,
            "{},{},{},{},{:.2},{:.2},{:.4},{:.4},{:.4},{:.4},{:.4},{}",
            service.id,
            service.name,
            service.category.as_tag(),
            service.icd10_code,
            service.prevalence_per_thousand,
            service.average_treatment_cost_sar,
            parts.pure_cost,
            parts.risk_loading,
            parts.admin_loading,
            impact.additional_premium_per_member,
            impact.total_impact_percent,
            impact.regional_proxy,
        )?;
    }

    println!("Output written to {}", output_path);

    // Portfolio summary: all services added at once
    let total_per_member: f64 = impacts
        .iter()
        .map(|(_, impact, _)| impact.additional_premium_per_member)
        .sum();
    let total_percent: f64 = impacts
        .iter()
        .map(|(_, impact, _)| impact.total_impact_percent)
        .sum();
    let proxy_count = impacts.iter().filter(|(_, impact, _)| impact.regional_proxy).count();

    println!("\nCatalog Summary:");
    println!("  Services: {}", impacts.len());
    println!("  Total premium delta per member: SAR {:.2}", total_per_member);
    println!("  Total impact on base premium: {:.2}%", total_percent);
    println!("  Portfolio total (x{} members): SAR {:.0}",
        params.member_count, total_per_member * params.member_count as f64);
    println!("  Regional-proxy services: {}", proxy_count);

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
