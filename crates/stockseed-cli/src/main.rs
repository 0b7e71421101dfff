mod config;
mod registry;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use uuid::Uuid;

use config::{ConfigError, FileConfig, load_file_config, resolve_database};
use registry::{
    RUN_LOG_TARGET, RunContext, RunOptions, RunPaths, init_logging, start_run, write_report,
};
use stockseed_core::DatabaseConfig;
use stockseed_generate::{
    FlatOptions, GenerationContext, Pipeline, SeedReport, StructuredOptions, random_seed,
};
use stockseed_load::{LoadError, connect, seed_flat, seed_structured};

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Load(#[from] LoadError),
}

#[derive(Parser, Debug)]
#[command(
    name = "stockseed",
    version,
    about = "Populate an inventory database with synthetic data"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seed products, sizes, inventory and inventory transactions.
    Structured(StructuredArgs),
    /// Seed the single-table product model.
    Flat(FlatArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// TOML config file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Database connection string; overrides the environment and config file.
    #[arg(long, value_name = "CONNECTION_STRING")]
    database_url: Option<String>,
    /// Seed for the random generator. A fresh one is drawn when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Keep existing rows instead of truncating the target tables.
    #[arg(long, default_value_t = false)]
    no_clear: bool,
    /// Directory receiving per-run config, logs and report.
    #[arg(long, value_name = "DIR")]
    run_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StructuredArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Number of products to generate.
    #[arg(long)]
    products: Option<usize>,
    /// Number of inventory transactions to generate.
    #[arg(long)]
    transactions: Option<usize>,
}

#[derive(Args, Debug)]
struct FlatArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Number of products to generate.
    #[arg(long)]
    products: Option<usize>,
}

/// Everything a run needs once flags, environment and config file are merged.
struct Prepared {
    database: DatabaseConfig,
    seed: u64,
    run_dir: Option<PathBuf>,
    options: RunOptions,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(report) => {
            print_summary(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(target: RUN_LOG_TARGET, event = "run_failed", error = %err);
            println!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<SeedReport, CliError> {
    let prepared = match cli.command {
        Command::Structured(args) => prepare_structured(args)?,
        Command::Flat(args) => prepare_flat(args)?,
    };
    let pipeline = match prepared.options {
        RunOptions::Structured(_) => Pipeline::Structured,
        RunOptions::Flat(_) => Pipeline::Flat,
    };

    let run_id = Uuid::new_v4().to_string();
    let run_paths: Option<RunPaths> = match &prepared.run_dir {
        Some(run_dir) => {
            let run_ctx = RunContext {
                run_id: run_id.clone(),
                started_at: chrono::Utc::now(),
                pipeline,
                seed: prepared.seed,
                run_dir: run_dir.clone(),
                options: prepared.options.clone(),
                connection: prepared.database.redacted(),
            };
            Some(start_run(&run_ctx)?)
        }
        None => None,
    };
    init_logging(run_paths.as_ref().map(|paths| paths.logs_path.as_path()))?;

    tracing::info!(
        event = "run_started",
        run_id = %run_id,
        pipeline = %pipeline,
        seed = prepared.seed
    );
    if let Some(paths) = &run_paths {
        tracing::info!(event = "run_dir_created", path = %paths.root.display());
    }

    let mut ctx = GenerationContext::from_clock(prepared.seed);
    let mut report = SeedReport::new(run_id, pipeline, prepared.seed);
    let mut conn = connect(&prepared.database).await?;

    match &prepared.options {
        RunOptions::Structured(options) => {
            seed_structured(&mut conn, &mut ctx, options, &mut report).await?
        }
        RunOptions::Flat(options) => seed_flat(&mut conn, &mut ctx, options, &mut report).await?,
    }

    if let Some(paths) = &run_paths {
        write_report(paths, &report)?;
        tracing::info!(event = "report_written", path = %paths.report_path.display());
    }
    tracing::info!(
        event = "run_finished",
        status = "success",
        duration_ms = report.duration_ms
    );
    Ok(report)
}

fn load_config(common: &CommonArgs) -> Result<FileConfig, ConfigError> {
    match &common.config {
        Some(path) => load_file_config(path),
        None => Ok(FileConfig::default()),
    }
}

fn resolve_common(common: &CommonArgs, file: &FileConfig) -> Result<(DatabaseConfig, u64), CliError> {
    let database = resolve_database(
        common.database_url.as_deref(),
        |key| std::env::var(key).ok(),
        &file.database,
    )?;
    let seed = common.seed.or(file.seed).unwrap_or_else(random_seed);
    Ok((database, seed))
}

fn prepare_structured(args: StructuredArgs) -> Result<Prepared, CliError> {
    let file = load_config(&args.common)?;
    let (database, seed) = resolve_common(&args.common, &file)?;

    let mut options: StructuredOptions = file.structured;
    if let Some(products) = args.products {
        options.products = products;
    }
    if let Some(transactions) = args.transactions {
        options.transactions = transactions;
    }
    if args.common.no_clear {
        options.clear_existing = false;
    }

    Ok(Prepared {
        database,
        seed,
        run_dir: args.common.run_dir,
        options: RunOptions::Structured(options),
    })
}

fn prepare_flat(args: FlatArgs) -> Result<Prepared, CliError> {
    let file = load_config(&args.common)?;
    let (database, seed) = resolve_common(&args.common, &file)?;

    let mut options: FlatOptions = file.flat;
    if let Some(products) = args.products {
        options.products = products;
    }
    if args.common.no_clear {
        options.clear_existing = false;
    }

    Ok(Prepared {
        database,
        seed,
        run_dir: args.common.run_dir,
        options: RunOptions::Flat(options),
    })
}

fn print_summary(report: &SeedReport) {
    println!(
        "{} seeding finished in {} ms (seed {})",
        report.pipeline, report.duration_ms, report.seed
    );
    for table in &report.tables {
        println!("  {:<24} {:>8} rows", table.table, table.rows_inserted);
    }
    let uniqueness = &report.uniqueness;
    if uniqueness.style_code_duplicates > 0 || uniqueness.model_name_duplicates > 0 {
        println!(
            "  accepted duplicates: {} style codes, {} model names",
            uniqueness.style_code_duplicates, uniqueness.model_name_duplicates
        );
    }
}
