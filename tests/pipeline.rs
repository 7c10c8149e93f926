use tadoku_stats::ranking::{LANGUAGE_TABLE_SIZE, MEDIUM_TABLE_SIZE};
use tadoku_stats::snapshot::{read_snapshot, write_snapshot, Snapshot};
use tadoku_stats::{
    run, ConversionTable, Medium, RankingError, RankingSet, RankingTable, RawEntry, Unit,
};

fn entry(participant: &str, medium: &str, language: &str, quantity: f64, unit: &str) -> RawEntry {
    RawEntry::new(participant, medium, language, quantity, unit).unwrap()
}

fn contest_table() -> ConversionTable {
    ConversionTable::from_pairs("test", [("book", "pages", 1.0), ("game", "minutes", 0.5)])
}

fn rows(table: &RankingTable) -> Vec<(&str, f64)> {
    table
        .iter()
        .map(|r| (r.participant.as_str(), r.score))
        .collect()
}

fn all_tables(set: &RankingSet) -> Vec<&RankingTable> {
    std::iter::once(&set.overall)
        .chain(set.by_medium.values())
        .chain(set.by_language.values())
        .collect()
}

/// A larger mixed snapshot with ties, zeros and several languages
fn busy_snapshot() -> Vec<RawEntry> {
    let media = ["book", "manga", "game", "anime", "drama"];
    let units = ["pages", "pages", "minutes", "episodes", "episodes"];
    let languages = ["ja", "zh", "ko", "en"];
    let mut entries = Vec::new();
    for i in 0..40 {
        let participant = format!("reader{:02}", i % 17);
        let m = i % media.len();
        let quantity = if i % 7 == 0 { 0.0 } else { ((i * 13) % 50) as f64 };
        entries.push(entry(
            &participant,
            media[m],
            languages[i % languages.len()],
            quantity,
            units[m],
        ));
    }
    entries
}

#[test]
fn scenario_two_participants_two_media() {
    let entries = vec![
        entry("alice", "book", "en", 100.0, "pages"),
        entry("bob", "book", "en", 50.0, "pages"),
        entry("alice", "game", "ja", 60.0, "minutes"),
    ];
    let set = run(&entries, &contest_table()).unwrap();

    assert_eq!(rows(&set.overall), vec![("alice", 130.0), ("bob", 50.0)]);
    assert_eq!(set.by_medium.len(), 2);
    assert_eq!(
        rows(&set.by_medium[&Medium::Book]),
        vec![("alice", 100.0), ("bob", 50.0)]
    );
    assert_eq!(rows(&set.by_medium[&Medium::Game]), vec![("alice", 30.0)]);
    assert_eq!(set.by_language.len(), 2);
    assert_eq!(
        rows(&set.by_language["en"]),
        vec![("alice", 100.0), ("bob", 50.0)]
    );
    assert_eq!(rows(&set.by_language["ja"]), vec![("alice", 30.0)]);
}

#[test]
fn scenario_zero_quantity_never_listed() {
    let entries = vec![
        entry("alice", "book", "en", 100.0, "pages"),
        entry("zoe", "book", "en", 0.0, "pages"),
        entry("zoe", "game", "fr", 0.0, "minutes"),
    ];
    let set = run(&entries, &contest_table()).unwrap();

    for table in all_tables(&set) {
        assert!(table.iter().all(|r| r.participant != "zoe"));
    }
    assert!(!set.by_medium.contains_key(&Medium::Game));
    assert!(!set.by_language.contains_key("fr"));
}

#[test]
fn scenario_unknown_conversion_fails_whole_run() {
    let entries = vec![
        entry("alice", "book", "en", 100.0, "pages"),
        entry("bob", "boardgame", "en", 4.0, "sessions"),
    ];
    let err = run(&entries, &contest_table()).unwrap_err();
    assert!(matches!(err, RankingError::UnknownConversion { .. }));
}

#[test]
fn runs_are_deterministic() {
    let entries = busy_snapshot();
    let table = ConversionTable::default();
    let first = run(&entries, &table).unwrap();
    let second = run(&entries, &table).unwrap();
    assert_eq!(first, second);
}

#[test]
fn tables_are_ordered_with_name_tie_break() {
    let set = run(&busy_snapshot(), &ConversionTable::default()).unwrap();
    for table in all_tables(&set) {
        for pair in table.rows.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.score >= b.score);
            if a.score == b.score {
                assert!(a.participant < b.participant);
            }
        }
    }
}

#[test]
fn tables_respect_filters_and_caps() {
    let set = run(&busy_snapshot(), &ConversionTable::default()).unwrap();
    for table in all_tables(&set) {
        assert!(!table.is_empty());
        assert!(table.iter().all(|r| r.score > 0.0));
    }
    for table in set.by_medium.values() {
        assert!(table.len() <= MEDIUM_TABLE_SIZE);
    }
    for table in set.by_language.values() {
        assert!(table.len() <= LANGUAGE_TABLE_SIZE);
    }
}

#[test]
fn overall_table_is_not_capped() {
    let entries: Vec<RawEntry> = (0..25)
        .map(|i| entry(&format!("p{:02}", i), "book", "ja", 1.0 + i as f64, "pages"))
        .collect();
    let set = run(&entries, &contest_table()).unwrap();
    assert_eq!(set.overall.len(), 25);
    assert_eq!(set.by_medium[&Medium::Book].len(), MEDIUM_TABLE_SIZE);
    assert_eq!(set.by_language["ja"].len(), LANGUAGE_TABLE_SIZE);
}

#[test]
fn equal_scores_sorted_by_name() {
    let entries = vec![
        entry("mika", "book", "ja", 10.0, "pages"),
        entry("aiko", "book", "ja", 10.0, "pages"),
        entry("kenji", "book", "ja", 10.0, "pages"),
        entry("yuki", "book", "ja", 10.0, "pages"),
    ];
    let set = run(&entries, &contest_table()).unwrap();
    let names: Vec<&str> = set.overall.iter().map(|r| r.participant.as_str()).collect();
    assert_eq!(names, vec!["aiko", "kenji", "mika", "yuki"]);
    let book: Vec<&str> = set.by_medium[&Medium::Book]
        .iter()
        .map(|r| r.participant.as_str())
        .collect();
    assert_eq!(book, vec!["aiko", "kenji", "mika"]);
}

#[test]
fn snapshot_roundtrip_reranks_identically() {
    let entries = busy_snapshot();
    let snapshot = Snapshot::new(entries.clone()).conversion_version("2017.1");

    let mut buf = Vec::new();
    write_snapshot(&mut buf, &snapshot).unwrap();
    let restored = read_snapshot(buf.as_slice()).unwrap();

    assert_eq!(restored.entries, entries);
    let table = ConversionTable::default();
    assert_eq!(
        run(&restored.entries, &table).unwrap(),
        run(&entries, &table).unwrap()
    );
}

#[test]
fn empty_snapshot_roundtrips_and_ranks_empty() {
    let mut buf = Vec::new();
    write_snapshot(&mut buf, &Snapshot::default()).unwrap();
    let restored = read_snapshot(buf.as_slice()).unwrap();
    assert!(restored.entries.is_empty());
    assert!(run(&restored.entries, &ConversionTable::default())
        .unwrap()
        .is_empty());
}

#[test]
fn non_canonical_units_survive_a_snapshot_reload() {
    let entries = vec![
        RawEntry::new("alice", "book", "en", 10.0, Unit::Custom("Pages".to_string())).unwrap(),
        RawEntry::new("bob", "game", "ja", 40.0, Unit::Custom(" MIN ".to_string())).unwrap(),
        RawEntry::new("carol", "boardgame", "de", 2.0, Unit::Custom("Sessions".to_string()))
            .unwrap(),
    ];
    let table = ConversionTable::from_pairs(
        "test",
        [("book", "pages", 1.0), ("game", "minutes", 0.5), ("other", "sessions", 3.0)],
    );

    let mut buf = Vec::new();
    write_snapshot(&mut buf, &Snapshot::new(entries.clone())).unwrap();
    let restored = read_snapshot(buf.as_slice()).unwrap();

    assert_eq!(restored.entries, entries);
    let before = run(&entries, &table).unwrap();
    assert_eq!(run(&restored.entries, &table).unwrap(), before);
    assert_eq!(
        rows(&before.overall),
        vec![("bob", 20.0), ("alice", 10.0), ("carol", 6.0)]
    );
}

#[test]
fn config_with_colliding_medium_keys_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        r#"
conversion:
  version: "club"
  media:
    other:
      pages: 1.0
    lyric:
      pages: 5.0
    book:
      pages: 1.0
    books:
      pages: 2.0
"#,
    )
    .unwrap();

    let err = tadoku_stats::config::load_config(Some(path)).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("unknown medium 'lyric'"));
    assert!(message.contains("'book' and 'books'"));
}
