pub mod client;
pub mod scraper;

pub use client::ContestClient;
pub use scraper::{ContestPageScraper, RankingRow, UserPage};

use anyhow::{Context, Result};
use chrono::Utc;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::BTreeMap;

use crate::config::SourceConfig;
use crate::record::{Medium, RawEntry};
use crate::scoring::{normalize_all, ConversionTable};
use crate::snapshot::Snapshot;

/// How far the site's points total may drift from ours before it is reported
const POINTS_TOLERANCE: f64 = 0.1;

/// Install the rustls crypto provider (required for rustls 0.23+).
///
/// Safe to call more than once; later calls are no-ops.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Turn one participant's page into raw entries.
///
/// Zero counts are left out. Each category is recorded in the unit the
/// source reports for its medium.
pub fn entries_from_user_page(
    page: &UserPage,
    language: &str,
    source: &SourceConfig,
) -> Result<Vec<RawEntry>> {
    page.counts
        .iter()
        .filter(|(_, count)| *count != 0.0)
        .map(|(heading, count)| {
            let medium = Medium::parse(heading);
            RawEntry::new(
                page.name.as_str(),
                medium,
                language,
                *count,
                source.unit_for(medium),
            )
            .with_context(|| format!("Invalid '{}' count for {}", heading, page.name))
        })
        .collect()
}

/// Compare the site's points total for a page with what `table` makes of the
/// same entries.
///
/// Returns `(site, computed)` when they differ by more than a rounding step.
/// Pages without a total, or whose entries the table cannot convert, are not
/// compared.
pub fn points_discrepancy(
    page: &UserPage,
    entries: &[RawEntry],
    table: &ConversionTable,
) -> Option<(f64, f64)> {
    let site = page.total_points?;
    let computed: f64 = match normalize_all(entries, table) {
        Ok(normalized) => normalized.iter().map(|e| e.score()).sum(),
        Err(e) => {
            tracing::debug!("not checking points for {}: {}", page.name, e);
            return None;
        }
    };
    ((site - computed).abs() > POINTS_TOLERANCE).then_some((site, computed))
}

/// Pull every configured language from the contest site into a snapshot.
///
/// User pages are fetched with bounded concurrency but kept in ranking-page
/// order, so the same site state always yields the same snapshot. Any page
/// that fails to load or parse fails the whole fetch.
pub async fn fetch_snapshot(source: &SourceConfig, table: &ConversionTable) -> Result<Snapshot> {
    let client = ContestClient::new(source)?;
    let mut entries = Vec::new();
    let mut daily: BTreeMap<String, BTreeMap<String, Vec<f64>>> = BTreeMap::new();

    for language in &source.languages {
        let language = language.trim();
        let rows = client.fetch_ranking(language).await?;
        tracing::info!("{} participants listed for '{}'", rows.len(), language);

        let pages: Vec<UserPage> = stream::iter(rows.iter())
            .map(|row| client.fetch_user(&row.user_id, language))
            .buffered(source.concurrency.max(1))
            .try_collect()
            .await?;

        for page in pages {
            let page_entries = entries_from_user_page(&page, language, source)?;
            if let Some((site, computed)) = points_discrepancy(&page, &page_entries, table) {
                tracing::warn!(
                    "{} ({}): site reports {} points, conversion table gives {}",
                    page.name,
                    language,
                    site,
                    computed
                );
            }
            entries.extend(page_entries);
            if !page.daily.is_empty() {
                daily.entry(page.name).or_insert(page.daily);
            }
        }
    }

    tracing::info!("fetched {} entries", entries.len());

    Ok(Snapshot::new(entries)
        .fetched_at(Utc::now())
        .conversion_version(&table.version)
        .daily(daily))
}
