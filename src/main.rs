use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::Table;
use configuration::{PanelColumns, Settings, load_config};
use core_types::{IndexMethod, Period};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the price index toolkit.
fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();
    let settings = load_config(cli.config.as_deref()).context("Failed to load settings")?;

    // Execute the appropriate command
    match cli.command {
        Commands::Compute(args) => handle_compute(args, settings),
        Commands::Table(args) => handle_table(args, settings),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Bilateral price indices from a tidy panel of prices and quantities.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Optional TOML settings file (normalization and column names).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a single index method.
    Compute(ComputeArgs),
    /// Compute every method the panel has data for and print them side by side.
    Table(PanelArgs),
}

#[derive(Args)]
struct ComputeArgs {
    /// The index method (e.g. "jevons", "fisher", "sato_vartia").
    #[arg(long, value_parser = parse_method)]
    method: IndexMethod,

    #[command(flatten)]
    panel: PanelArgs,
}

#[derive(Args)]
struct PanelArgs {
    /// Path to a CSV file in long format: one row per product and period.
    #[arg(long, short)]
    input: PathBuf,

    /// The base period. Integers are matched numerically, anything else as a label.
    #[arg(long, value_parser = parse_period)]
    base: Period,

    /// The compared period.
    #[arg(long, value_parser = parse_period)]
    compared: Period,

    /// Overrides the configured normalization value.
    #[arg(long)]
    normalization: Option<f64>,

    #[arg(long)]
    price_col: Option<String>,

    #[arg(long)]
    quantity_col: Option<String>,

    #[arg(long)]
    product_id_col: Option<String>,

    #[arg(long)]
    time_period_col: Option<String>,

    /// Print the result as JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl PanelArgs {
    /// Command-line values win over the settings file.
    fn resolve(&self, settings: Settings) -> Result<(PanelColumns, f64)> {
        let mut columns = settings.columns;
        if let Some(name) = &self.price_col {
            columns = columns.with_price(name);
        }
        if let Some(name) = &self.quantity_col {
            columns = columns.with_quantity(name);
        }
        if let Some(name) = &self.product_id_col {
            columns = columns.with_product_id(name);
        }
        if let Some(name) = &self.time_period_col {
            columns = columns.with_time_period(name);
        }
        let resolved = Settings {
            normalization: self.normalization.unwrap_or(settings.normalization),
            columns,
        };
        resolved.validate()?;
        Ok((resolved.columns, resolved.normalization))
    }
}

fn parse_method(raw: &str) -> Result<IndexMethod, String> {
    raw.parse::<IndexMethod>().map_err(|e| e.to_string())
}

fn parse_period(raw: &str) -> Result<Period, String> {
    Ok(Period::parse_lenient(raw))
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_compute(args: ComputeArgs, settings: Settings) -> Result<()> {
    let panel_args = &args.panel;
    let (columns, normalization) = panel_args.resolve(settings)?;
    let df = read_panel(&panel_args.input)?;

    let report = panel::report_from_df(
        args.method,
        &df,
        panel_args.base.clone(),
        panel_args.compared.clone(),
        &columns,
        normalization,
    )
    .with_context(|| {
        format!(
            "Failed to compute the {} index for {} -> {}",
            args.method, panel_args.base, panel_args.compared
        )
    })?;

    if panel_args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.value);
    }
    Ok(())
}

fn handle_table(args: PanelArgs, settings: Settings) -> Result<()> {
    let (columns, normalization) = args.resolve(settings)?;
    let df = read_panel(&args.input)?;

    let results = panel::report_all_from_df(
        &df,
        args.base.clone(),
        args.compared.clone(),
        &columns,
        normalization,
    )
    .with_context(|| format!("Failed to read periods {} and {}", args.base, args.compared))?;

    if args.json {
        let rows: Vec<serde_json::Value> = results
            .iter()
            .map(|(m, r)| match r {
                Ok(report) => serde_json::to_value(report).unwrap_or(serde_json::Value::Null),
                Err(e) => serde_json::json!({ "method": m, "error": e.to_string() }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Method", "Index", "Change %", "Products"]);
    for (method, result) in &results {
        match result {
            Ok(report) => table.add_row(vec![
                method.to_string(),
                format!("{:.4}", report.value),
                format!("{:+.2}", report.change_pct()),
                report.matched_products.to_string(),
            ]),
            Err(e) => table.add_row(vec![
                method.to_string(),
                "-".to_string(),
                "-".to_string(),
                e.to_string(),
            ]),
        };
    }

    println!(
        "Price indices for {} -> {} (normalized to {}):",
        args.base, args.compared, normalization
    );
    println!("{table}");
    Ok(())
}

/// Loads a panel CSV with a header row.
fn read_panel(path: &Path) -> Result<DataFrame> {
    let df = CsvReader::from_path(path)
        .with_context(|| format!("Failed to open panel file {}", path.display()))?
        .has_header(true)
        .finish()
        .with_context(|| format!("Failed to parse panel file {}", path.display()))?;

    tracing::debug!(rows = df.height(), columns = df.width(), "Loaded panel.");
    Ok(df)
}
