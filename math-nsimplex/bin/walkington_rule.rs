//! Print a Walkington quadrature rule
//!
//! Usage:
//!     cargo run --bin walkington-rule -- --dim 3 --scheme 5
//!     cargo run --bin walkington-rule -- --dim 2 --scheme 2 --exact --format json

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use math_audio_nsimplex::{AnyRule, ArithmeticMode, Scheme, try_walkington};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(about = "Walkington quadrature rules on the d-simplex")]
struct Args {
    /// Spatial dimension d
    #[arg(short, long)]
    dim: usize,

    /// Scheme index (1, 2, 3, 5 or 7)
    #[arg(short, long)]
    scheme: usize,

    /// Use exact rational arithmetic
    #[arg(long)]
    exact: bool,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleReport {
    pub name: String,
    pub dim: usize,
    pub degree: usize,
    pub arithmetic: ArithmeticMode,
    pub num_points: usize,
    pub bary: Vec<Vec<f64>>,
    pub weights: Vec<f64>,
    /// Exact values as strings, exact mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_bary: Option<Vec<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_weights: Option<Vec<String>>,
}

impl RuleReport {
    fn from_rule(rule: &AnyRule) -> Self {
        let float = rule.to_f64();
        let (exact_bary, exact_weights) = match rule {
            AnyRule::Exact(r) => (
                Some(
                    r.bary
                        .rows()
                        .into_iter()
                        .map(|row| row.iter().map(|x| x.to_string()).collect())
                        .collect(),
                ),
                Some(r.weights.iter().map(|w| w.to_string()).collect()),
            ),
            AnyRule::Float(_) => (None, None),
        };

        Self {
            name: float.name.clone(),
            dim: float.dim,
            degree: float.degree,
            arithmetic: rule.mode(),
            num_points: float.num_points(),
            bary: float.bary.rows().into_iter().map(|row| row.to_vec()).collect(),
            weights: float.weights.to_vec(),
            exact_bary,
            exact_weights,
        }
    }
}

fn print_table(report: &RuleReport) {
    println!(
        "{}  d={}  degree={}  points={}",
        report.name, report.dim, report.degree, report.num_points
    );
    println!("{}", "=".repeat(20 + 12 * (report.dim + 1)));
    for (i, (row, w)) in report.bary.iter().zip(&report.weights).enumerate() {
        let coords: Vec<String> = row.iter().map(|x| format!("{x:>11.8}")).collect();
        println!("{i:>4}  {:>14.10}  {}", w, coords.join(" "));
    }

    if let (Some(bary), Some(weights)) = (&report.exact_bary, &report.exact_weights) {
        println!("\nExact values:");
        for (i, (row, w)) in bary.iter().zip(weights).enumerate() {
            println!("{i:>4}  {w}  [{}]", row.join(", "));
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let mode = ArithmeticMode::from_exact_flag(args.exact);

    if Scheme::from_index(args.scheme).is_none() {
        bail!(
            "scheme must be one of {:?}",
            Scheme::ALL.map(|s| s.index())
        );
    }

    let rule = try_walkington(args.dim, args.scheme, mode)
        .with_context(|| format!("building Walkington({}) in d={}", args.scheme, args.dim))?;
    log::info!(
        "{}: {} points in dimension {}",
        rule.name(),
        rule.num_points(),
        rule.dim()
    );

    let report = RuleReport::from_rule(&rule);
    match args.format {
        OutputFormat::Table => print_table(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
