use std::collections::BTreeMap;

use crate::record::{Medium, NormalizedEntry};

/// Running totals for one participant over a single ranking run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParticipantTotal {
    pub participant: String,
    pub overall_score: f64,
    pub by_medium: BTreeMap<Medium, f64>,
    pub by_language: BTreeMap<String, f64>,
}

impl ParticipantTotal {
    fn new(participant: &str) -> Self {
        Self {
            participant: participant.to_string(),
            ..Default::default()
        }
    }

    fn add(&mut self, entry: &NormalizedEntry) {
        let score = entry.score();
        self.overall_score += score;
        *self.by_medium.entry(entry.medium()).or_insert(0.0) += score;
        *self
            .by_language
            .entry(entry.language().to_string())
            .or_insert(0.0) += score;
    }
}

/// Fold normalized entries into one total per participant.
///
/// Scores are summed in input order so the same snapshot always produces
/// bit-identical totals. Participants with no entries never appear.
pub fn aggregate(entries: &[NormalizedEntry]) -> BTreeMap<String, ParticipantTotal> {
    let mut totals: BTreeMap<String, ParticipantTotal> = BTreeMap::new();

    for entry in entries {
        totals
            .entry(entry.participant().to_string())
            .or_insert_with(|| ParticipantTotal::new(entry.participant()))
            .add(entry);
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawEntry;
    use crate::scoring::{normalize_all, ConversionTable};

    fn normalized(raw: &[(&str, &str, &str, f64, &str)]) -> Vec<NormalizedEntry> {
        let table = ConversionTable::from_pairs(
            "test",
            [("book", "pages", 1.0), ("game", "minutes", 0.5), ("manga", "pages", 0.2)],
        );
        let entries: Vec<RawEntry> = raw
            .iter()
            .map(|(p, m, l, q, u)| RawEntry::new(*p, *m, l, *q, *u).unwrap())
            .collect();
        normalize_all(&entries, &table).unwrap()
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_aggregate_sums_per_view() {
        let entries = normalized(&[
            ("alice", "book", "en", 100.0, "pages"),
            ("bob", "book", "en", 50.0, "pages"),
            ("alice", "game", "ja", 60.0, "minutes"),
        ]);
        let totals = aggregate(&entries);
        assert_eq!(totals.len(), 2);

        let alice = &totals["alice"];
        assert_eq!(alice.overall_score, 130.0);
        assert_eq!(alice.by_medium[&Medium::Book], 100.0);
        assert_eq!(alice.by_medium[&Medium::Game], 30.0);
        assert_eq!(alice.by_language["en"], 100.0);
        assert_eq!(alice.by_language["ja"], 30.0);

        let bob = &totals["bob"];
        assert_eq!(bob.overall_score, 50.0);
        assert!(!bob.by_medium.contains_key(&Medium::Game));
    }

    #[test]
    fn test_same_medium_entries_accumulate() {
        let entries = normalized(&[
            ("alice", "manga", "ja", 10.0, "pages"),
            ("alice", "manga", "ja", 15.0, "pages"),
        ]);
        let totals = aggregate(&entries);
        assert!((totals["alice"].by_medium[&Medium::Manga] - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_entries_create_zero_buckets() {
        let entries = normalized(&[("carol", "book", "fr", 0.0, "pages")]);
        let totals = aggregate(&entries);
        let carol = &totals["carol"];
        assert_eq!(carol.overall_score, 0.0);
        assert_eq!(carol.by_medium[&Medium::Book], 0.0);
        assert_eq!(carol.by_language["fr"], 0.0);
    }

    #[test]
    fn test_totals_are_reproducible() {
        let raw = [
            ("alice", "manga", "ja", 0.1, "pages"),
            ("alice", "manga", "ja", 0.7, "pages"),
            ("alice", "book", "ja", 0.3, "pages"),
        ];
        let first = aggregate(&normalized(&raw));
        let second = aggregate(&normalized(&raw));
        assert_eq!(first, second);
    }
}
