//! Load product catalogs from JSON documents

use log::{info, warn};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::data::SavingsProduct;
use crate::error::CatalogError;

/// Catalog bundled with the repository
pub const DEFAULT_CATALOG_PATH: &str = "data/savings_catalog.json";

/// Load products from a JSON array file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<SavingsProduct>, CatalogError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let products = load_catalog_from_reader(BufReader::new(file))?;
    info!("Loaded {} products from {}", products.len(), path.display());
    Ok(products)
}

/// Load products from any reader producing a JSON array
///
/// Records that break catalog invariants are kept but reported at warn level.
pub fn load_catalog_from_reader<R: Read>(reader: R) -> Result<Vec<SavingsProduct>, CatalogError> {
    let products: Vec<SavingsProduct> = serde_json::from_reader(reader)?;

    for product in &products {
        for issue in product.validate() {
            warn!("Catalog integrity: {} ({}): {}", product.name, product.id, issue);
        }
    }

    Ok(products)
}

/// Load the bundled catalog
pub fn load_default_catalog() -> Result<Vec<SavingsProduct>, CatalogError> {
    load_catalog(DEFAULT_CATALOG_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{BaseInterestRate, TermPolicy};

    const SAMPLE: &str = r#"[
        {
            "_id": "00000000-0000-0000-0000-000000000001",
            "name": "Tiered Savings",
            "institution": "하나은행",
            "term": { "policy_type": "RANGE", "min_term": 6, "max_term": 36 },
            "amount": { "policy_type": "RANGE", "min_amount": 10000, "max_amount": 500000 },
            "base_interest_rate": [
                { "min_term": 6, "max_term": 12, "interest_rate": 2.0 },
                { "min_term": 12, "max_term": null, "interest_rate": 2.8 }
            ],
            "preferential_rates": [
                {
                    "description": "salary transfer",
                    "rate_type": "pre_condition",
                    "tiers": [ { "condition": "salary account", "interest_rate": 0.3 } ]
                }
            ],
            "max_interest_rate": 3.1
        },
        {
            "_id": "00000000-0000-0000-0000-000000000002",
            "name": "Dated Savings",
            "institution": "부산은행",
            "term": { "policy_type": "FIXED_DATE", "maturity_date": "2027-12-31" },
            "amount": { "policy_type": "FIXED_AMOUNT", "fixed_amount": 100000 },
            "base_interest_rate": 3.0,
            "max_interest_rate": 3.0
        }
    ]"#;

    #[test]
    fn test_load_from_reader() {
        let products = load_catalog_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(products.len(), 2);
        assert!(matches!(products[0].base_interest_rate, BaseInterestRate::Tiered(ref t) if t.len() == 2));
        assert!(matches!(products[1].term, TermPolicy::FixedDate { .. }));
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let err = load_catalog_from_reader(r#"[{"name": "missing fields"}]"#.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_catalog("does/not/exist.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
