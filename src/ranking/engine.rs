use super::aggregate::aggregate;
use super::rank::{rank, RankingSet};
use crate::error::RankingError;
use crate::record::RawEntry;
use crate::scoring::{normalize_all, ConversionTable};

/// Run the full normalize, aggregate, rank pipeline over one snapshot.
///
/// Any entry that cannot be converted aborts the run; no partial result is
/// returned.
pub fn run(entries: &[RawEntry], table: &ConversionTable) -> Result<RankingSet, RankingError> {
    let normalized = normalize_all(entries, table)?;
    tracing::debug!(
        entries = normalized.len(),
        conversion = %table.version,
        "normalized entries"
    );

    let totals = aggregate(&normalized);
    tracing::debug!(participants = totals.len(), "aggregated totals");

    let set = rank(&totals);
    tracing::debug!(
        overall = set.overall.len(),
        media = set.by_medium.len(),
        languages = set.by_language.len(),
        "built ranking tables"
    );

    Ok(set)
}
