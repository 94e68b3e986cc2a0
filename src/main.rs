//! Premium Impact Engine CLI
//!
//! Walk-through of a single service impact, its cost breakdown, and a
//! sub-limit what-if against the built-in reference catalog

use premium_impact_engine::{
    cost_breakdown, ImpactRunner, PortfolioParams, SubLimitChange,
};
use std::fs::File;
use std::io::Write;

fn main() {
    env_logger::init();

    println!("Premium Impact Engine v0.1.0");
    println!("============================\n");

    let runner = ImpactRunner::new();

    // Reference portfolio: 1,000 members at SAR 3,000 annual premium
    let params = PortfolioParams::new(1_000, 3_000.0);
    println!("Portfolio: {} members, base premium SAR {:.2}\n", params.member_count, params.base_premium_sar);

    // Service 1: Type 2 diabetes management
    let service = runner.catalog().service(1).expect("built-in catalog has service 1");
    let impact = runner.premium_impact(1, &params).expect("service 1 exists");

    println!("Service: {} ({})", service.name, service.name_ar);
    println!("  ICD-10: {}", service.icd10_code);
    println!("  Prevalence: {:.1} per 1,000 lives", service.prevalence_per_thousand);
    println!("  Avg treatment cost: SAR {:.2}", service.average_treatment_cost_sar);
    if impact.regional_proxy {
        println!("  NOTE: regional proxy data ({})",
            service.source_country.as_deref().unwrap_or("unknown"));
    }
    println!();

    println!("Premium impact:");
    println!("  Annual cost per 1,000: SAR {:.2}", impact.annual_cost_per_thousand);
    println!("  Additional premium per member: SAR {:.2}", impact.additional_premium_per_member);
    println!("  Impact on base premium: {:.2}%", impact.total_impact_percent);

    let parts = cost_breakdown(&impact);
    println!("\nCost breakdown:");
    println!("  {:<16} {:>10} {:>8}", "Component", "SAR", "Share");
    println!("  {}", "-".repeat(36));
    println!("  {:<16} {:>10.2} {:>7.1}%", "Pure cost", parts.pure_cost, parts.share_percent(parts.pure_cost));
    println!("  {:<16} {:>10.2} {:>7.1}%", "Risk loading", parts.risk_loading, parts.share_percent(parts.risk_loading));
    println!("  {:<16} {:>10.2} {:>7.1}%", "Admin loading", parts.admin_loading, parts.share_percent(parts.admin_loading));

    // Sub-limit what-if: cut the dental cap to SAR 800
    let sub_limit = runner.catalog().sub_limit(2).expect("built-in catalog has sub-limit 2");
    let change = SubLimitChange::new(800.0, sub_limit.copayment_percent);
    let sl_impact = runner
        .sub_limit_impact(2, &change, &params)
        .expect("sub-limit 2 exists");

    println!("\nSub-limit what-if: {} ({})", sub_limit.benefit, sub_limit.benefit_ar);
    println!("  Cap: SAR {:.0} -> SAR {:.0}, copay {:.0}%",
        sub_limit.current_limit_sar, change.new_limit_sar, change.new_copayment_percent);
    println!("  Direction: {:?}", sl_impact.direction);
    println!("  PMPM: SAR {:.2}", sl_impact.pmpm_cost);
    println!("  Annual per member: SAR {:.2} ({:.2}%)",
        sl_impact.premium_impact_sar, sl_impact.premium_impact_percent);
    println!("  Sensitivity: best {:.2}% / expected {:.2}% / worst {:.2}%",
        sl_impact.sensitivity.best_case.percent,
        sl_impact.sensitivity.expected.percent,
        sl_impact.sensitivity.worst_case.percent);

    // Write the full catalog's impacts to CSV for chart consumers
    let csv_path = "premium_impact_output.csv";
    let mut file = File::create(csv_path).expect("Unable to create CSV file");

    writeln!(file, "ServiceId,Name,Category,ICD10,Prevalence,AvgCostSAR,AnnualCostPerThousand,PremiumPerMember,ImpactPercent,RegionalProxy").unwrap();

    for (service, impact) in runner.catalog_impacts(&params) {
        writeln!(file, "{},{},{},{},{:.2},{:.2},{:.2},{:.4},{:.4},{}",
            service.id,
            service.name,
            service.category.as_tag(),
            service.icd10_code,
            service.prevalence_per_thousand,
            service.average_treatment_cost_sar,
            impact.annual_cost_per_thousand,
            impact.additional_premium_per_member,
            impact.total_impact_percent,
            impact.regional_proxy,
        ).unwrap();
    }

    println!("\nFull catalog impacts written to: {}", csv_path);
}
