//! Rank catalog products for a savings goal
//!
//! Supply two of --target, --monthly and --term; the third is derived.
//!
//!   search --monthly 500000 --term 12
//!   search --target 10000000 --monthly 300000 --format json

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use savings_ranker::product::DEFAULT_CATALOG_PATH;
use savings_ranker::search::{ProjectionMode, ScoringMode};
use savings_ranker::{EngineConfig, InMemoryCatalog, RateWeights, SearchEngine, SearchPage, SearchRequest};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "search", about = "Rank installment-savings products for a savings goal")]
struct Args {
    /// Product catalog (JSON array)
    #[arg(long, default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,

    /// Engine configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Amount to reach at maturity
    #[arg(long)]
    target: Option<u64>,

    /// Deposit per month
    #[arg(long)]
    monthly: Option<u64>,

    /// Term in months
    #[arg(long)]
    term: Option<u32>,

    #[arg(long, default_value_t = 0.3)]
    w_base: f64,

    #[arg(long, default_value_t = 0.3)]
    w_max: f64,

    #[arg(long, default_value_t = 0.4)]
    w_intermediate: f64,

    #[arg(long, default_value_t = savings_ranker::query::DEFAULT_TOP_K)]
    top_k: usize,

    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Score on base and max rates only
    #[arg(long)]
    two_band: bool,

    /// Attach projections for every rate band
    #[arg(long)]
    all_bands: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

/// Flat row for CSV output
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    rank: usize,
    product_id: String,
    name: &'a str,
    institution: &'a str,
    score: f64,
    base_rate: f64,
    max_rate: f64,
    intermediate_rate: f64,
    base_rate_rank: u32,
    max_rate_rank: u32,
    intermediate_rate_rank: u32,
    principal: Option<u64>,
    interest: Option<f64>,
    maturity_amount: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading engine config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if args.two_band {
        config.scoring = ScoringMode::TwoBand;
    }
    if args.all_bands {
        config.projection = ProjectionMode::AllBands;
    }

    let start = Instant::now();
    let catalog = InMemoryCatalog::from_path(&args.catalog)
        .with_context(|| format!("loading catalog {}", args.catalog.display()))?;
    log::info!("Loaded {} products in {:?}", catalog.len(), start.elapsed());

    let request = SearchRequest {
        weights: RateWeights::new(args.w_base, args.w_max, args.w_intermediate),
        target_amount: args.target,
        monthly_deposit: args.monthly,
        total_term_months: args.term,
        top_k: args.top_k,
        offset: args.offset,
    };

    let engine = SearchEngine::with_config(catalog, config);
    let page = engine.search(&request).context("search failed")?;

    match args.format {
        OutputFormat::Table => print_table(&page),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&page)?),
        OutputFormat::Csv => write_csv(&page)?,
    }

    Ok(())
}

fn print_table(page: &SearchPage) {
    let r = &page.resolved;
    println!(
        "Monthly {} x {} months -> target {} (derived {:?})",
        r.monthly_deposit, r.total_term_months, r.target_amount, r.derived
    );
    println!(
        "Weights: base {:.3}, max {:.3}, intermediate {:.3}",
        page.weights.base, page.weights.max, page.weights.intermediate
    );
    println!("{} eligible, showing {} from offset {}", page.total, page.results.len(), page.offset);
    println!();

    println!("{:<4} {:<28} {:<12} {:>7} {:>7} {:>7} {:>7} {:>14} {:>14}",
             "#", "Product", "Institution", "Score", "Base", "Max", "Mid", "Interest", "Maturity");

    for (i, result) in page.results.iter().enumerate() {
        let fmt_amount = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.0}", v));
        println!("{:<4} {:<28} {:<12} {:>7.4} {:>6.2}% {:>6.2}% {:>6.2}% {:>14} {:>14}",
                 page.offset + i + 1,
                 result.product.name,
                 result.product.institution.as_str(),
                 result.score,
                 result.rates.base,
                 result.rates.max,
                 result.rates.intermediate,
                 fmt_amount(result.interest),
                 fmt_amount(result.maturity_amount));
    }

    if page.results.is_empty() {
        println!("(no matching products)");
    }
    for exclusion in &page.excluded {
        println!("excluded: {} ({})", exclusion.product_name, exclusion.reason);
    }
    if let Some(next) = page.next_offset() {
        println!("\nMore results: --offset {}", next);
    }
}

fn write_csv(page: &SearchPage) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    for (i, result) in page.results.iter().enumerate() {
        writer.serialize(CsvRow {
            rank: page.offset + i + 1,
            product_id: result.product.id.to_string(),
            name: &result.product.name,
            institution: result.product.institution.as_str(),
            score: result.score,
            base_rate: result.rates.base,
            max_rate: result.rates.max,
            intermediate_rate: result.rates.intermediate,
            base_rate_rank: result.base_rate_rank,
            max_rate_rank: result.max_rate_rank,
            intermediate_rate_rank: result.intermediate_rate_rank,
            principal: result.principal,
            interest: result.interest,
            maturity_amount: result.maturity_amount,
        })?;
    }
    writer.flush()?;
    Ok(())
}
