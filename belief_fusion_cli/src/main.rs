//! belief-fusion
//!
//! Console front end: loads flat mass-table files and runs the combination
//! rules and reduction strategies over them; results are written back as
//! mass tables, with product tables and chart payloads on request.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use belief_fusion_cli::adapter;
use belief_fusion_combinator::{
    combine_all, combine_all_lns, combine_pairwise_tree, ComparisonGraphData,
};
use belief_fusion_core::BeliefSystem;

#[derive(Parser, Debug)]
#[command(name = "belief-fusion")]
#[command(about = "Dempster-Shafer combination of belief mass tables", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the mass records of one or more belief systems
    Show {
        /// Mass-table files to load
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Also print the chart payload (labels/data lines)
        #[arg(long)]
        chart: bool,
        /// Print the chart payload as JSON and nothing else
        #[arg(long)]
        json: bool,
    },
    /// Combine belief systems into one consensus system and store it
    Combine {
        /// Mass-table files to combine, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Combination rule
        #[arg(long, value_enum, default_value = "dempster")]
        rule: Rule,
        /// Reduction strategy (dempster rule only)
        #[arg(long, value_enum, default_value = "fold")]
        reduction: Reduction,
        /// Use only the first N input systems
        #[arg(long)]
        limit: Option<usize>,
        /// Output directory (defaults to the first input's directory)
        #[arg(short, long, env = "BELIEF_FUSION_OUT_DIR")]
        out_dir: Option<PathBuf>,
        /// Also write the pairwise product table (exactly two inputs)
        #[arg(long)]
        trace: bool,
    },
    /// Compare two belief systems by squared distance and fuzzy membership
    Compare {
        file_a: PathBuf,
        file_b: PathBuf,
        /// Print the comparison as JSON and nothing else
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Rule {
    /// Dempster's normalized rule
    Dempster,
    /// Smets' open-world rule (conflict kept on an ignorance record)
    Smets,
    /// Averaging multi-source rule
    LnsCr,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Reduction {
    /// Left fold over the inputs in order
    Fold,
    /// Binary tree of adjacent pairs
    Pairwise,
}

#[derive(Debug, Serialize)]
struct CompareReport {
    delta_squared: f64,
    fuzzy_membership: f64,
    chart: ComparisonGraphData,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Args::parse().command {
        Command::Show { files, chart, json } => run_show(&files, chart, json),
        Command::Combine {
            files,
            rule,
            reduction,
            limit,
            out_dir,
            trace,
        } => run_combine(&files, rule, reduction, limit, out_dir, trace),
        Command::Compare {
            file_a,
            file_b,
            json,
        } => run_compare(&file_a, &file_b, json),
    }
}

fn load_all(files: &[PathBuf]) -> Result<Vec<BeliefSystem>> {
    files
        .iter()
        .map(|path| {
            adapter::load_system(path)
                .with_context(|| format!("failed to load {}", path.display()))
        })
        .collect()
}

fn print_system(system: &BeliefSystem) {
    println!("{}:", system.name);
    print!("{}", system);
}

fn run_show(files: &[PathBuf], chart: bool, json: bool) -> Result<()> {
    let systems = load_all(files)?;
    let payload = if systems.len() == 1 {
        ComparisonGraphData::single(&systems[0])
    } else {
        ComparisonGraphData::many(&systems)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    for system in &systems {
        print_system(system);
    }
    if chart {
        println!("{}", payload.labels);
        for series in &payload.data {
            println!("{}", series);
        }
    }
    Ok(())
}

fn run_combine(
    files: &[PathBuf],
    rule: Rule,
    reduction: Reduction,
    limit: Option<usize>,
    out_dir: Option<PathBuf>,
    trace: bool,
) -> Result<()> {
    let systems = load_all(files)?;
    let dir = match out_dir {
        Some(dir) => dir,
        None => default_out_dir(&files[0]),
    };

    if trace {
        if systems.len() != 2 {
            bail!("--trace writes a pairwise product table and needs exactly two inputs");
        }
        adapter::write_combination_trace(&systems[0], &systems[1], &dir)
            .context("failed to write the combination trace")?;
    }

    if !matches!(rule, Rule::Dempster) && !matches!(reduction, Reduction::Fold) {
        bail!("--reduction applies to the dempster rule only");
    }

    info!("combining {} systems ({:?})", systems.len(), rule);
    let combined = match rule {
        Rule::Dempster => match reduction {
            Reduction::Fold => combine_all(&systems, limit),
            Reduction::Pairwise => combine_pairwise_tree(&systems, limit),
        },
        Rule::Smets => {
            if systems.len() != 2 {
                bail!("the smets rule combines exactly two systems");
            }
            Some(systems[0].combine_smets(&systems[1]))
        }
        Rule::LnsCr => combine_all_lns(&systems, limit),
    };
    let combined = combined.context("no input systems left to combine")?;

    print_system(&combined);
    adapter::store_system(&combined, &dir)
        .with_context(|| format!("failed to store {}", combined.name))?;
    Ok(())
}

fn run_compare(file_a: &Path, file_b: &Path, json: bool) -> Result<()> {
    let a = adapter::load_system(file_a)
        .with_context(|| format!("failed to load {}", file_a.display()))?;
    let b = adapter::load_system(file_b)
        .with_context(|| format!("failed to load {}", file_b.display()))?;

    let report = CompareReport {
        delta_squared: a.compare(&b),
        fuzzy_membership: a.fuzzy_membership(&b),
        chart: ComparisonGraphData::pair(&a, &b),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_system(&a);
    print_system(&b);
    println!("delta_squared = {}", report.delta_squared);
    println!("fuzzy_membership = {}", report.fuzzy_membership);
    println!("{}", report.chart.labels);
    for series in &report.chart.data {
        println!("{}", series);
    }
    Ok(())
}

fn default_out_dir(first_input: &Path) -> PathBuf {
    match first_input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
