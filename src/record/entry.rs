use serde::{Deserialize, Serialize};

use super::types::{Medium, Unit};
use crate::error::RankingError;

/// One participant's logged amount for one medium in the contest period.
///
/// Only constructible through [`RawEntry::new`] (or deserialization, which
/// goes through the same checks), so a value in hand is always well-shaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEntryRecord", into = "RawEntryRecord")]
pub struct RawEntry {
    participant: String,
    medium: Medium,
    language: String,
    quantity: f64,
    unit: Unit,
}

/// Wire shape of a [`RawEntry`] in snapshot files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntryRecord {
    participant: String,
    medium: Medium,
    language: String,
    quantity: f64,
    unit: Unit,
}

impl RawEntry {
    /// Validate and build an entry.
    ///
    /// Fails with `MalformedRecord` when the participant is empty, the quantity
    /// is negative or not a finite number, or the unit is blank. The language
    /// code is trimmed and lowercased, and the unit is brought to its canonical
    /// spelling so a saved entry reads back identical.
    pub fn new(
        participant: impl Into<String>,
        medium: impl Into<Medium>,
        language: &str,
        quantity: f64,
        unit: impl Into<Unit>,
    ) -> Result<Self, RankingError> {
        let participant = participant.into();
        let unit = unit.into().canonical();

        if participant.trim().is_empty() {
            return Err(RankingError::malformed("participant is empty"));
        }
        if !quantity.is_finite() {
            return Err(RankingError::malformed(format!(
                "quantity for '{}' is not a finite number",
                participant
            )));
        }
        if quantity < 0.0 {
            return Err(RankingError::malformed(format!(
                "quantity for '{}' is negative ({})",
                participant, quantity
            )));
        }
        if unit.is_blank() {
            return Err(RankingError::malformed(format!(
                "unit for '{}' is empty",
                participant
            )));
        }

        Ok(Self {
            participant,
            medium: medium.into(),
            language: language.trim().to_lowercase(),
            quantity,
            unit,
        })
    }

    pub fn participant(&self) -> &str {
        &self.participant
    }

    pub fn medium(&self) -> Medium {
        self.medium
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }
}

impl TryFrom<RawEntryRecord> for RawEntry {
    type Error = RankingError;

    fn try_from(record: RawEntryRecord) -> Result<Self, Self::Error> {
        RawEntry::new(
            record.participant,
            record.medium,
            &record.language,
            record.quantity,
            record.unit,
        )
    }
}

impl From<RawEntry> for RawEntryRecord {
    fn from(entry: RawEntry) -> Self {
        Self {
            participant: entry.participant,
            medium: entry.medium,
            language: entry.language,
            quantity: entry.quantity,
            unit: entry.unit,
        }
    }
}

/// A [`RawEntry`] with its page-equivalent score attached.
///
/// Always created fresh by the normalizer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEntry {
    entry: RawEntry,
    score: f64,
}

impl NormalizedEntry {
    pub(crate) fn new(entry: RawEntry, score: f64) -> Self {
        Self { entry, score }
    }

    pub fn entry(&self) -> &RawEntry {
        &self.entry
    }

    pub fn participant(&self) -> &str {
        self.entry.participant()
    }

    pub fn medium(&self) -> Medium {
        self.entry.medium()
    }

    pub fn language(&self) -> &str {
        self.entry.language()
    }

    pub fn score(&self) -> f64 {
        self.score
    }
}
