use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::aggregate::ParticipantTotal;
use crate::record::Medium;

/// Per-medium tables keep only the top three participants
pub const MEDIUM_TABLE_SIZE: usize = 3;

/// Per-language tables keep only the top ten participants
pub const LANGUAGE_TABLE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedParticipant {
    pub participant: String,
    pub score: f64,
}

/// Participants of one view, best first.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct RankingTable {
    pub rows: Vec<RankedParticipant>,
}

impl RankingTable {
    /// Build a table from `(participant, score)` pairs.
    ///
    /// Zero scores are dropped, the rest sorted by score descending with
    /// participant name ascending as tie-break, then cut to `limit` rows.
    pub fn build<'a, I>(scores: I, limit: Option<usize>) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut rows: Vec<RankedParticipant> = scores
            .into_iter()
            .filter(|(_, score)| *score > 0.0)
            .map(|(participant, score)| RankedParticipant {
                participant: participant.to_string(),
                score,
            })
            .collect();

        rows.sort_by(compare_rows);

        if let Some(limit) = limit {
            rows.truncate(limit);
        }

        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedParticipant> {
        self.rows.iter()
    }
}

fn compare_rows(a: &RankedParticipant, b: &RankedParticipant) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.participant.cmp(&b.participant))
}

/// Every table produced by one ranking run.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RankingSet {
    pub overall: RankingTable,
    pub by_medium: BTreeMap<Medium, RankingTable>,
    pub by_language: BTreeMap<String, RankingTable>,
}

impl RankingSet {
    pub fn is_empty(&self) -> bool {
        self.overall.is_empty() && self.by_medium.is_empty() && self.by_language.is_empty()
    }
}

/// Produce the overall, per-medium and per-language tables.
///
/// Categories where nobody scored above zero get no table at all.
pub fn rank(totals: &BTreeMap<String, ParticipantTotal>) -> RankingSet {
    let overall = RankingTable::build(
        totals
            .values()
            .map(|t| (t.participant.as_str(), t.overall_score)),
        None,
    );

    let mut media: Vec<Medium> = totals
        .values()
        .flat_map(|t| t.by_medium.keys().copied())
        .collect();
    media.sort();
    media.dedup();

    let mut by_medium = BTreeMap::new();
    for medium in media {
        let table = RankingTable::build(
            totals.values().filter_map(|t| {
                t.by_medium
                    .get(&medium)
                    .map(|score| (t.participant.as_str(), *score))
            }),
            Some(MEDIUM_TABLE_SIZE),
        );
        if !table.is_empty() {
            by_medium.insert(medium, table);
        }
    }

    let mut languages: Vec<&str> = totals
        .values()
        .flat_map(|t| t.by_language.keys().map(String::as_str))
        .collect();
    languages.sort();
    languages.dedup();

    let mut by_language = BTreeMap::new();
    for language in languages {
        let table = RankingTable::build(
            totals.values().filter_map(|t| {
                t.by_language
                    .get(language)
                    .map(|score| (t.participant.as_str(), *score))
            }),
            Some(LANGUAGE_TABLE_SIZE),
        );
        if !table.is_empty() {
            by_language.insert(language.to_string(), table);
        }
    }

    RankingSet {
        overall,
        by_medium,
        by_language,
    }
}
