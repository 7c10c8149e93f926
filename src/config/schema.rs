use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::record::{Medium, Unit};
use crate::scoring::ConversionTable;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Page-equivalent multipliers; the pinned built-in table when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion: Option<ConversionTable>,

    #[serde(default)]
    pub source: SourceConfig,

    /// Default snapshot file for `fetch` and `rank`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PathBuf>,
}

impl Config {
    /// Conversion table to rank with
    pub fn effective_conversion(&self) -> ConversionTable {
        self.conversion.clone().unwrap_or_default()
    }
}

/// Where contest results are scraped from.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct SourceConfig {
    pub base_url: String,

    /// Language codes to pull ranking pages for
    pub languages: Vec<String>,

    /// Per-request timeout, humantime format ("10s", "1m")
    pub timeout: String,

    /// Maximum number of user pages fetched at once
    pub concurrency: usize,

    /// Native unit the source reports for each medium; `pages` when absent
    #[serde(deserialize_with = "crate::scoring::config::deserialize_medium_keys")]
    pub units: BTreeMap<Medium, Unit>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://readmod.com".to_string(),
            languages: vec!["ja".to_string()],
            timeout: "10s".to_string(),
            concurrency: 4,
            units: BTreeMap::new(),
        }
    }
}

impl SourceConfig {
    pub fn unit_for(&self, medium: Medium) -> Unit {
        self.units.get(&medium).cloned().unwrap_or(Unit::Pages)
    }
}
