use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::record::RawEntry;

pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk capture of one contest pull.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    pub version: u32,

    /// When the entries were fetched, if known
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,

    /// Version of the conversion table in effect when the snapshot was taken
    #[serde(default)]
    pub conversion_version: Option<String>,

    #[serde(default)]
    pub entries: Vec<RawEntry>,

    /// Per participant, the site's daily points series ("Overall" and one per
    /// language). Informational only; ranking never reads it.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub daily: BTreeMap<String, BTreeMap<String, Vec<f64>>>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Snapshot {
    pub fn new(entries: Vec<RawEntry>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            fetched_at: None,
            conversion_version: None,
            entries,
            daily: BTreeMap::new(),
        }
    }

    pub fn fetched_at(mut self, at: DateTime<Utc>) -> Self {
        self.fetched_at = Some(at);
        self
    }

    pub fn conversion_version(mut self, version: &str) -> Self {
        self.conversion_version = Some(version.to_string());
        self
    }

    pub fn daily(mut self, daily: BTreeMap<String, BTreeMap<String, Vec<f64>>>) -> Self {
        self.daily = daily;
        self
    }

    /// Whether this snapshot was recorded under a different conversion table
    pub fn conversion_mismatch(&self, current: &str) -> bool {
        matches!(self.conversion_version.as_deref(), Some(v) if v != current)
    }

    /// Distinct participants in the snapshot
    pub fn participant_count(&self) -> usize {
        let mut names: Vec<&str> = self.entries.iter().map(|e| e.participant()).collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    }
}
