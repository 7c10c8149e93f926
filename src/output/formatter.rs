use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::ranking::{RankingSet, RankingTable, LANGUAGE_TABLE_SIZE, MEDIUM_TABLE_SIZE};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with one decimal place (1234.5, 30.0)
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format the rows of one table.
/// Index column: 3 chars (fits "99."), right-aligned
/// Score column is right-aligned to the widest score in the table
fn format_rows(table: &RankingTable, use_colors: bool, term_width: Option<usize>) -> String {
    let score_width = table
        .iter()
        .map(|row| format_score(row.score).len())
        .max()
        .unwrap_or(0);
    let separator = "  ";

    table
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            // 1-based index, right-aligned with trailing dot
            let index_str = format!("{:>2}.", idx + 1);
            let score_padded = format!("{:>width$}", format_score(row.score), width = score_width);

            let fixed_width = index_str.len() + 1 + score_width + separator.len();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&row.participant, width - fixed_width)
                }
                // Very narrow terminal, show truncated
                Some(_) => truncate_name(&row.participant, 20),
                // No terminal (pipe), don't truncate
                None => row.participant.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    name.cyan()
                )
            } else {
                format!("{} {}{}{}", index_str, score_padded, separator, name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_heading(title: &str, use_colors: bool) -> String {
    if use_colors {
        title.bold().underline().to_string()
    } else {
        title.to_string()
    }
}

/// Format every table as text sections: overall first, then each medium,
/// then each language.
pub fn format_ranking_tables(set: &RankingSet, use_colors: bool) -> String {
    if set.is_empty() {
        return "No ranked participants.".to_string();
    }

    let term_width = get_terminal_width();
    let mut sections = Vec::new();

    sections.push(format!(
        "{}\n{}",
        format_heading("Overall", use_colors),
        format_rows(&set.overall, use_colors, term_width)
    ));

    for (medium, table) in &set.by_medium {
        let title = format!("{} (top {})", medium.title(), MEDIUM_TABLE_SIZE);
        sections.push(format!(
            "{}\n{}",
            format_heading(&title, use_colors),
            format_rows(table, use_colors, term_width)
        ));
    }

    for (language, table) in &set.by_language {
        let title = format!("Language: {} (top {})", language, LANGUAGE_TABLE_SIZE);
        sections.push(format!(
            "{}\n{}",
            format_heading(&title, use_colors),
            format_rows(table, use_colors, term_width)
        ));
    }

    sections.join("\n\n")
}

/// One-line overview of a ranking run
pub fn format_summary(set: &RankingSet) -> String {
    let total: f64 = set.overall.iter().map(|row| row.score).sum();
    format!(
        "{} participants ranked, {} total, {} media, {} languages",
        set.overall.len(),
        format_score(total),
        set.by_medium.len(),
        set.by_language.len()
    )
}

/// Tabs and line breaks inside a field would split it; flatten them to spaces
fn tsv_field(text: &str) -> String {
    text.replace(['\t', '\n', '\r'], " ")
}

/// Format tables as tab-separated values for scripting
/// Columns: view, key, rank, participant, score (no headers, no colors)
pub fn format_tsv(set: &RankingSet) -> String {
    let mut lines = Vec::new();

    let mut push_table = |view: &str, key: &str, table: &RankingTable| {
        for (idx, row) in table.iter().enumerate() {
            lines.push(format!(
                "{}\t{}\t{}\t{}\t{}",
                view,
                tsv_field(key),
                idx + 1,
                tsv_field(&row.participant),
                row.score
            ));
        }
    };

    push_table("overall", "", &set.overall);
    for (medium, table) in &set.by_medium {
        push_table("medium", medium.as_str(), table);
    }
    for (language, table) in &set.by_language {
        push_table("language", language.as_str(), table);
    }

    lines.join("\n")
}

/// Format tables as pretty JSON
pub fn format_json(set: &RankingSet) -> serde_json::Result<String> {
    serde_json::to_string_pretty(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::RankedParticipant;
    use crate::record::Medium;

    fn table(rows: &[(&str, f64)]) -> RankingTable {
        RankingTable {
            rows: rows
                .iter()
                .map(|(p, s)| RankedParticipant {
                    participant: p.to_string(),
                    score: *s,
                })
                .collect(),
        }
    }

    fn sample_set() -> RankingSet {
        let mut set = RankingSet {
            overall: table(&[("alice", 130.0), ("bob", 50.0)]),
            ..Default::default()
        };
        set.by_medium
            .insert(Medium::Book, table(&[("alice", 100.0), ("bob", 50.0)]));
        set.by_medium.insert(Medium::Game, table(&[("alice", 30.0)]));
        set.by_language
            .insert("en".to_string(), table(&[("alice", 100.0), ("bob", 50.0)]));
        set.by_language.insert("ja".to_string(), table(&[("alice", 30.0)]));
        set
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(130.0), "130.0");
        assert_eq!(format_score(12.34), "12.3");
        assert_eq!(format_score(1234.56), "1234.6");
    }

    #[test]
    fn test_format_ranking_tables_empty() {
        let result = format_ranking_tables(&RankingSet::default(), false);
        assert_eq!(result, "No ranked participants.");
    }

    #[test]
    fn test_format_ranking_tables_sections_in_order() {
        let result = format_ranking_tables(&sample_set(), false);
        let overall = result.find("Overall").unwrap();
        let book = result.find("Book (top 3)").unwrap();
        let game = result.find("Game (top 3)").unwrap();
        let en = result.find("Language: en (top 10)").unwrap();
        let ja = result.find("Language: ja (top 10)").unwrap();
        assert!(overall < book && book < game && game < en && en < ja);
    }

    #[test]
    fn test_format_rows_alignment() {
        let rows = format_rows(&table(&[("alice", 130.0), ("bob", 50.0)]), false, None);
        let lines: Vec<&str> = rows.lines().collect();
        assert_eq!(lines[0], " 1. 130.0  alice");
        assert_eq!(lines[1], " 2.  50.0  bob");
    }

    #[test]
    fn test_format_rows_truncates_on_narrow_terminal() {
        let rows = format_rows(
            &table(&[("a_participant_with_a_really_long_name", 1.0)]),
            false,
            Some(12),
        );
        assert!(rows.ends_with("..."));
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Short", 20), "Short");
        assert_eq!(truncate_name("Exact", 5), "Exact");
        assert_eq!(truncate_name("A very long participant", 10), "A very ...");
        assert_eq!(truncate_name("読書家の山田さん", 5), "読書...");
        assert_eq!(truncate_name("Hello world", 3), "Hel");
    }

    #[test]
    fn test_format_summary() {
        let summary = format_summary(&sample_set());
        assert_eq!(summary, "2 participants ranked, 180.0 total, 2 media, 2 languages");
    }

    #[test]
    fn test_format_tsv() {
        let result = format_tsv(&sample_set());
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "overall\t\t1\talice\t130");
        assert_eq!(lines[2], "medium\tbook\t1\talice\t100");
        assert_eq!(lines[4], "medium\tgame\t1\talice\t30");
        assert_eq!(lines[7], "language\tja\t1\talice\t30");
    }

    #[test]
    fn test_format_tsv_flattens_tabs_and_newlines() {
        let set = RankingSet {
            overall: table(&[("ali\tce", 2.0), ("bo\r\nb", 1.0)]),
            ..Default::default()
        };
        let result = format_tsv(&set);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines, vec!["overall\t\t1\tali ce\t2", "overall\t\t2\tbo  b\t1"]);
    }

    #[test]
    fn test_format_tsv_empty() {
        assert_eq!(format_tsv(&RankingSet::default()), "");
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&sample_set()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["overall"][1]["participant"], "bob");
        assert_eq!(value["by_medium"]["book"].as_array().unwrap().len(), 2);
    }
}
