pub mod error;
pub mod types;

pub use error::{HnError, Result};
pub use types::{SearchResponse, Story};

const BASE_URL: &str = "https://hn.algolia.com/api/v1";

/// Stories fetched per search query.
pub const HITS_PER_PAGE: u32 = 20;

pub struct HnClient {
    client: reqwest::Client,
    base_url: String,
}

impl HnClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint (test servers).
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Search the story index for a keyword query. Returns up to
    /// [`HITS_PER_PAGE`] story hits ranked by Algolia relevance.
    pub async fn search_stories(&self, query: &str) -> Result<Vec<Story>> {
        let url = format!("{}/search", self.base_url);

        tracing::debug!(query, "HN search request");

        let hits_per_page = HITS_PER_PAGE.to_string();
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("query", query),
                ("tags", "story"),
                ("hitsPerPage", hits_per_page.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(HnError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let search: SearchResponse = resp.json().await?;
        Ok(search.hits)
    }
}

impl Default for HnClient {
    fn default() -> Self {
        Self::new()
    }
}
