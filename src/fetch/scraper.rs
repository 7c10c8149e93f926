use anyhow::{anyhow, bail, Context, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

/// One row of a contest ranking page.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingRow {
    pub user_id: String,
    pub score: f64,
}

/// Raw per-category counts shown on a participant's page.
#[derive(Debug, Clone, PartialEq)]
pub struct UserPage {
    pub name: String,
    /// (category heading, raw count) in page order
    pub counts: Vec<(String, f64)>,
    /// Points total the site itself computed, if the page shows one
    pub total_points: Option<f64>,
    /// Daily points per series ("Overall" plus one per language) from the
    /// progress chart
    pub daily: BTreeMap<String, Vec<f64>>,
}

/// Extracts ranking rows and user pages from contest HTML.
pub struct ContestPageScraper {
    ranking_rows: Selector,
    td: Selector,
    link: Selector,
    avatar: Selector,
    counts_head: Selector,
    counts_rows: Selector,
    script: Selector,
    user_href: Regex,
    series_name: Regex,
    series_data: Regex,
}

impl Default for ContestPageScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl ContestPageScraper {
    pub fn new() -> Self {
        Self {
            ranking_rows: selector(".ranking tbody tr"),
            td: selector("td"),
            link: selector("a"),
            avatar: selector(".avatar"),
            counts_head: selector(".table-bordered thead th"),
            counts_rows: selector(".table-bordered tbody tr"),
            script: selector("script"),
            user_href: Regex::new(r"/users/([^/?#]+)").expect("valid user link regex"),
            series_name: Regex::new(r#"name:\s*"([^"]*)""#).expect("valid series name regex"),
            series_data: Regex::new(r"data:\s*\[([^\]]*)\]").expect("valid series data regex"),
        }
    }

    /// Extract participants from a ranking page.
    ///
    /// Rows listing a zero score are skipped; they have nothing to contribute.
    pub fn extract_ranking(&self, html: &str) -> Result<Vec<RankingRow>> {
        let document = Html::parse_document(html);
        let mut rows = Vec::new();

        for (i, tr) in document.select(&self.ranking_rows).enumerate() {
            let href = tr
                .select(&self.link)
                .next()
                .and_then(|a| a.value().attr("href"))
                .ok_or_else(|| anyhow!("ranking row {} has no user link", i))?;
            let user_id = self
                .user_href
                .captures(href)
                .map(|caps| caps[1].to_string())
                .ok_or_else(|| anyhow!("ranking row {}: unexpected user link '{}'", i, href))?;

            let score_text = tr
                .select(&self.td)
                .nth(3)
                .map(element_text)
                .ok_or_else(|| anyhow!("ranking row {} has no score column", i))?;
            let score: f64 = score_text
                .parse()
                .with_context(|| format!("ranking row {}: invalid score '{}'", i, score_text))?;

            if score > 0.0 {
                rows.push(RankingRow { user_id, score });
            } else {
                tracing::debug!("skipping user {} with zero score", user_id);
            }
        }

        Ok(rows)
    }

    /// Extract the display name, raw category counts, points total and daily
    /// progress series from a user page.
    ///
    /// Headings come from the count table head (minus the leading blank cell);
    /// counts from the first body row, the points total from the last cell of
    /// the second.
    pub fn extract_user_page(&self, html: &str) -> Result<UserPage> {
        let document = Html::parse_document(html);

        let name = document
            .select(&self.avatar)
            .next()
            .and_then(|img| img.value().attr("alt"))
            .map(|alt| alt.trim().to_string())
            .filter(|alt| !alt.is_empty())
            .ok_or_else(|| anyhow!("user page has no avatar name"))?;

        // Columns stay aligned by position: a blank count cell is a zero,
        // and the "Total" column is dropped wherever it sits.
        let headings: Vec<String> = document
            .select(&self.counts_head)
            .map(element_text)
            .skip(1)
            .collect();

        let mut rows = document.select(&self.counts_rows);
        let first_row = rows
            .next()
            .ok_or_else(|| anyhow!("user page for {} has no count table", name))?;
        let cells: Vec<String> = first_row.select(&self.td).map(element_text).skip(1).collect();

        let mut counts = Vec::new();
        for (i, heading) in headings.iter().enumerate() {
            if heading == "Total" {
                continue;
            }
            let cell = cells.get(i).ok_or_else(|| {
                anyhow!("user page for {}: no count for '{}'", name, heading)
            })?;
            let count = parse_number(cell)
                .with_context(|| format!("user page for {}: invalid count '{}'", name, cell))?;
            counts.push((heading.clone(), count));
        }

        // The points row ends with the site's own total
        let total_points = match rows.next().and_then(|tr| tr.select(&self.td).last()) {
            Some(td) => {
                let text = element_text(td);
                if text.is_empty() {
                    None
                } else {
                    Some(text.parse::<f64>().with_context(|| {
                        format!("user page for {}: invalid points total '{}'", name, text)
                    })?)
                }
            }
            None => None,
        };

        let daily = self
            .extract_daily_series(&document)
            .with_context(|| format!("user page for {}: unreadable progress chart", name))?;

        Ok(UserPage {
            name,
            counts,
            total_points,
            daily,
        })
    }

    /// Pull the per-day series out of the `progress_chart` script, pairing each
    /// `name: "..."` with the `data: [...]` array that follows it.
    fn extract_daily_series(&self, document: &Html) -> Result<BTreeMap<String, Vec<f64>>> {
        let Some(js) = document
            .select(&self.script)
            .map(|script| script.text().collect::<String>())
            .find(|text| text.contains("progress_chart"))
        else {
            return Ok(BTreeMap::new());
        };

        let names: Vec<String> = self
            .series_name
            .captures_iter(&js)
            .map(|caps| caps[1].to_string())
            .collect();
        let arrays: Vec<Vec<f64>> = self
            .series_data
            .captures_iter(&js)
            .map(|caps| {
                caps[1]
                    .split(',')
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(|value| {
                        value
                            .parse::<f64>()
                            .with_context(|| format!("invalid series value '{}'", value))
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<_>>()?;

        if names.len() != arrays.len() {
            bail!("{} series names but {} data arrays", names.len(), arrays.len());
        }

        Ok(names.into_iter().zip(arrays).collect())
    }
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid CSS selector")
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn parse_number(text: &str) -> Result<f64> {
    if text.is_empty() {
        return Ok(0.0);
    }
    Ok(text.parse::<f64>()?)
}
