use super::config::ConversionTable;
use crate::error::RankingError;
use crate::record::{NormalizedEntry, RawEntry};

/// Convert a raw entry into its page-equivalent score.
///
/// Pure: the same entry and table always give the same score.
pub fn normalize(entry: &RawEntry, table: &ConversionTable) -> Result<NormalizedEntry, RankingError> {
    let multiplier = table
        .multiplier(entry.medium(), entry.unit())
        .ok_or_else(|| RankingError::UnknownConversion {
            medium: entry.medium(),
            unit: entry.unit().clone(),
        })?;

    Ok(NormalizedEntry::new(entry.clone(), entry.quantity() * multiplier))
}

/// Normalize a whole snapshot, stopping at the first entry that cannot be converted
pub fn normalize_all(
    entries: &[RawEntry],
    table: &ConversionTable,
) -> Result<Vec<NormalizedEntry>, RankingError> {
    entries.iter().map(|entry| normalize(entry, table)).collect()
}
