pub mod formatter;

pub use formatter::{
    format_json, format_ranking_tables, format_score, format_summary, format_tsv,
    should_use_colors,
};
