use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};

mod batching;
mod config;
mod error;
mod models;
mod output;
mod pipeline;
mod report;
mod rotation;
mod roster;
mod tiers;

use config::PlanConfig;
use models::Tier;

#[derive(Parser)]
#[command(name = "batch-rotation")]
#[command(about = "Balanced study batches with weekly topic rotation for Group Scholar", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct PlanArgs {
    /// Roster CSV with Name and Marks columns
    #[arg(long)]
    csv: PathBuf,
    /// TOML file with topics, weeks, quota and seed
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    weeks: Option<u32>,
    /// Shuffle seed; input order is kept when unset
    #[arg(long, env = "BATCH_ROTATION_SEED")]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Build batches and weekly topics, one row per student
    Schedule {
        #[command(flatten)]
        plan: PlanArgs,
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show batch membership only
    Batches {
        #[command(flatten)]
        plan: PlanArgs,
    },
    /// Generate a markdown report
    Report {
        #[command(flatten)]
        plan: PlanArgs,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// List the topic pool
    Topics {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_plan(args: &PlanArgs) -> anyhow::Result<(PlanConfig, pipeline::Plan)> {
    let config = PlanConfig::load(args.config.as_deref())?
        .with_overrides(args.weeks, args.seed)
        .context("invalid command-line overrides")?;
    let students = roster::load_csv(&args.csv)
        .with_context(|| format!("failed to load roster {}", args.csv.display()))?;
    let plan = pipeline::run(&students, &config)?;
    Ok((config, plan))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Schedule { plan, format, out } => {
            let (_, result) = load_plan(&plan)?;
            let weeks = result.weeks as usize;

            let mut buffer = Vec::new();
            match format {
                Format::Csv => output::write_csv(&mut buffer, &result.rows, weeks)?,
                Format::Json => {
                    serde_json::to_writer_pretty(&mut buffer, &result)?;
                    buffer.push(b'\n');
                }
            }

            match out {
                Some(path) => {
                    std::fs::write(&path, &buffer)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Wrote {} rows to {}.", result.rows.len(), path.display());
                }
                None => {
                    use std::io::Write;
                    std::io::stdout().lock().write_all(&buffer)?;
                }
            }
        }
        Commands::Batches { plan } => {
            let (_, result) = load_plan(&plan)?;

            if result.batches.is_empty() {
                println!("No students in this roster.");
                return Ok(());
            }

            for batch in result.batches.iter() {
                let members: Vec<&str> = batch.members.iter().map(|m| m.name.as_str()).collect();
                println!(
                    "- {} ({} high, {} mid, {} low): {}",
                    batch.label(),
                    batch.count(Tier::High),
                    batch.count(Tier::Mid),
                    batch.count(Tier::Low),
                    members.join(", ")
                );
            }
        }
        Commands::Report { plan, out } => {
            let (config, result) = load_plan(&plan)?;
            let source = plan.csv.display().to_string();
            let report = report::build_report(Some(&source), &result, config.seed);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
        Commands::Topics { config } => {
            let config = PlanConfig::load(config.as_deref())?;
            for (i, topic) in config.topics.iter().enumerate() {
                if topic.description.is_empty() {
                    println!("{}. {}", i + 1, topic.name);
                } else {
                    println!("{}. {}: {}", i + 1, topic.name, topic.description);
                }
            }
        }
    }

    Ok(())
}
