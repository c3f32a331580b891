//! Report catalog integrity issues
//!
//! Exits with status 1 when any product breaks a catalog invariant.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process;

use savings_ranker::product::{load_catalog, DEFAULT_CATALOG_PATH};

#[derive(Debug, Parser)]
#[command(name = "check_catalog", about = "Validate a savings product catalog")]
struct Args {
    /// Product catalog (JSON array)
    #[arg(long, default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let products = load_catalog(&args.catalog)
        .with_context(|| format!("loading catalog {}", args.catalog.display()))?;

    let mut issue_count = 0;
    for product in &products {
        let issues = product.validate();
        if issues.is_empty() {
            continue;
        }
        println!("{} [{}] {}", product.name, product.institution, product.id);
        for issue in &issues {
            println!("  - {}", issue);
        }
        issue_count += issues.len();
    }

    println!("{} products checked, {} issues", products.len(), issue_count);
    if issue_count > 0 {
        process::exit(1);
    }
    Ok(())
}
