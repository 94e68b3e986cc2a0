//! Sweep every sub-limit across its simulation bounds
//!
//! Produces the grid behind the limit-adjustment sliders: one impact row
//! per (sub-limit, simulated cap) pair, plus an optional JSON summary for
//! report consumers.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use premium_impact_engine::{ImpactRunner, PortfolioParams};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sweep_limits", about = "Sub-limit sensitivity sweep over the reference catalog")]
struct Args {
    /// Number of insured members in the portfolio
    #[arg(long, default_value_t = 1_000)]
    member_count: u32,

    /// Annual base premium per member, SAR
    #[arg(long, default_value_t = 3_000.0)]
    base_premium: f64,

    /// Grid points per sub-limit (minimum 2)
    #[arg(long, default_value_t = 11)]
    steps: usize,

    /// Catalog directory (defaults to the built-in reference tables)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Emit a JSON summary to stdout instead of the text report
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SweepSummary {
    generated_at: chrono::DateTime<Utc>,
    member_count: u32,
    base_premium_sar: f64,
    steps: usize,
    sub_limits: Vec<SubLimitSweep>,
}

#[derive(Serialize)]
struct SubLimitSweep {
    sub_limit_id: u32,
    benefit: String,
    benefit_ar: String,
    current_limit_sar: f64,
    min_impact_percent: f64,
    max_impact_percent: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let runner = match &args.catalog {
        Some(path) => ImpactRunner::from_csv_path(path)
            .with_context(|| format!("failed to load catalog from {}", path.display()))?,
        None => ImpactRunner::new(),
    };

    let params = PortfolioParams::new(args.member_count, args.base_premium);

    let output_path = "sub_limit_sweep_output.csv";
    let mut file =
        File::create(output_path).with_context(|| format!("failed to create {output_path}"))?;

    writeln!(file, "# generated_at={}", Utc::now().to_rfc3339())?;
    writeln!(
        file,
        "SubLimitId,Benefit,SimulatedLimitSAR,Direction,PMPM,AnnualPerMember,ImpactPercent,BestCasePercent,WorstCasePercent"
    )?;

    let mut summaries = Vec::new();

    for sub_limit in &runner.catalog().sub_limits {
        let sweep = runner
            .sweep_sub_limit(sub_limit.id, args.steps, &params)
            .expect("sweeping a catalog sub-limit");

        for (limit, impact) in &sweep {
            writeln!(
                file,
                "{},{},{:.2},{:?},{:.4},{:.4},{:.4},{:.4},{:.4}",
                sub_limit.id,
                sub_limit.benefit,
                limit,
                impact.direction,
                impact.pmpm_cost,
                impact.premium_impact_sar,
                impact.premium_impact_percent,
                impact.sensitivity.best_case.percent,
                impact.sensitivity.worst_case.percent,
            )?;
        }

        let min_impact = sweep
            .iter()
            .map(|(_, i)| i.premium_impact_percent)
            .fold(f64::INFINITY, f64::min);
        let max_impact = sweep
            .iter()
            .map(|(_, i)| i.premium_impact_percent)
            .fold(f64::NEG_INFINITY, f64::max);

        summaries.push(SubLimitSweep {
            sub_limit_id: sub_limit.id,
            benefit: sub_limit.benefit.clone(),
            benefit_ar: sub_limit.benefit_ar.clone(),
            current_limit_sar: sub_limit.current_limit_sar,
            min_impact_percent: min_impact,
            max_impact_percent: max_impact,
        });
    }

    if args.json {
        let summary = SweepSummary {
            generated_at: Utc::now(),
            member_count: params.member_count,
            base_premium_sar: params.base_premium_sar,
            steps: args.steps.max(2),
            sub_limits: summaries,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Sub-limit sweep ({} members, base premium SAR {:.2}):",
            params.member_count, params.base_premium_sar);
        println!("{:<4} {:<32} {:>12} {:>12} {:>12}",
            "Id", "Benefit", "Current", "MinImpact%", "MaxImpact%");
        println!("{}", "-".repeat(76));
        for s in &summaries {
            println!("{:<4} {:<32} {:>12.0} {:>12.3} {:>12.3}",
                s.sub_limit_id, s.benefit, s.current_limit_sar,
                s.min_impact_percent, s.max_impact_percent);
        }
        println!("\nFull grid written to {}", output_path);
    }

    Ok(())
}
