//! Engine configuration

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::ConfigError;

/// Which rate bands enter the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Base, max and intermediate bands, each min-max normalized
    #[default]
    ThreeBand,
    /// Base and max bands only; the intermediate weight is ignored
    TwoBand,
}

/// Eligibility of products that mature on a calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedDateRule {
    /// Always term-eligible
    #[default]
    AlwaysEligible,
    /// Eligible when the months from `as_of` to maturity equal the requested term
    ImpliedTerm,
}

/// Which projections are attached to results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    Off,
    /// Principal and interest at the maximum rate
    #[default]
    MaxRate,
    /// Max-rate projection plus one per rate band
    AllBands,
}

fn default_parallel() -> bool { true }

/// Search engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub scoring: ScoringMode,

    #[serde(default)]
    pub fixed_date: FixedDateRule,

    #[serde(default)]
    pub projection: ProjectionMode,

    /// Evaluate eligibility and rates across a rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Reference date for implied terms (defaults to today)
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringMode::ThreeBand,
            fixed_date: FixedDateRule::AlwaysEligible,
            projection: ProjectionMode::MaxRate,
            parallel: true,
            as_of: None,
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reference date for date-based maturity
    pub fn reference_date(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = EngineConfig::from_reader("{}".as_bytes()).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(config.parallel);
    }

    #[test]
    fn test_partial_document() {
        let config = EngineConfig::from_reader(
            r#"{"scoring": "two_band", "fixed_date": "implied_term", "as_of": "2025-01-15"}"#.as_bytes(),
        )
        .unwrap();
        assert_eq!(config.scoring, ScoringMode::TwoBand);
        assert_eq!(config.fixed_date, FixedDateRule::ImpliedTerm);
        assert_eq!(config.projection, ProjectionMode::MaxRate);
        assert_eq!(config.reference_date(), NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(EngineConfig::from_reader(r#"{"scoring": "rrf"}"#.as_bytes()).is_err());
    }
}
