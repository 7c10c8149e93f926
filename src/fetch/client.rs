use anyhow::{anyhow, Context, Result};
use reqwest::{Client, Url};
use tokio_retry::{strategy::ExponentialBackoff, Retry};

use super::scraper::{ContestPageScraper, RankingRow, UserPage};
use crate::config::{request_timeout, SourceConfig};

/// HTTP access to the contest site.
pub struct ContestClient {
    client: Client,
    base_url: Url,
    scraper: ContestPageScraper,
}

impl ContestClient {
    pub fn new(source: &SourceConfig) -> Result<Self> {
        let base_url = Url::parse(source.base_url.trim())
            .with_context(|| format!("Invalid source base_url '{}'", source.base_url))?;
        let timeout = request_timeout(source)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tadoku-stats/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            scraper: ContestPageScraper::new(),
        })
    }

    fn page_url(&self, path: &str, language: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path)
            .with_context(|| format!("Invalid page path '{}'", path))?;
        url.query_pairs_mut().append_pair("language", language);
        Ok(url)
    }

    /// GET a page body, retrying transient failures
    async fn get_text(&self, url: Url) -> Result<String> {
        // Retry strategy: exponential backoff with 3 attempts
        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(std::time::Duration::from_secs(5))
            .take(3);

        Retry::spawn(retry_strategy, || async {
            let response = self
                .client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| anyhow!("Request to {} failed: {}", url, e))?;

            let response = response
                .error_for_status()
                .map_err(|e| anyhow!("{} returned an error status: {}", url, e))?;

            response
                .text()
                .await
                .map_err(|e| anyhow!("Failed to read body of {}: {}", url, e))
        })
        .await
    }

    /// Fetch and parse the ranking page for one language
    pub async fn fetch_ranking(&self, language: &str) -> Result<Vec<RankingRow>> {
        let url = self.page_url("ranking", language)?;
        tracing::info!("fetching ranking page {}", url);
        let html = self.get_text(url).await?;
        self.scraper
            .extract_ranking(&html)
            .with_context(|| format!("Failed to parse ranking page for language '{}'", language))
    }

    /// Fetch and parse one participant's page for one language
    pub async fn fetch_user(&self, user_id: &str, language: &str) -> Result<UserPage> {
        let url = self.page_url(&format!("users/{}", user_id), language)?;
        tracing::debug!("fetching user page {}", url);
        let html = self.get_text(url).await?;
        self.scraper
            .extract_user_page(&html)
            .with_context(|| format!("Failed to parse user page for user {}", user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_adds_language() {
        crate::fetch::install_crypto_provider();
        let client = ContestClient::new(&SourceConfig::default()).unwrap();
        let url = client.page_url("ranking", "ja").unwrap();
        assert_eq!(url.as_str(), "http://readmod.com/ranking?language=ja");

        let url = client.page_url("users/801", "zh").unwrap();
        assert_eq!(url.as_str(), "http://readmod.com/users/801?language=zh");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let source = SourceConfig {
            base_url: "not a url".to_string(),
            ..SourceConfig::default()
        };
        assert!(ContestClient::new(&source).is_err());
    }
}
