// Trait abstraction for the external trend feed.
//
// SignalSource replaces a concrete HnClient so discovery can run against a
// mock: no network, deterministic fixtures, `cargo test` in seconds.

use anyhow::Result;
use async_trait::async_trait;

use hn_client::{HnClient, Story};

#[async_trait]
pub trait SignalSource: Send + Sync {
    /// Run one keyword search against the feed. Best-effort: callers treat
    /// any error as "this query produced nothing".
    async fn search(&self, query: &str) -> Result<Vec<Story>>;
}

#[async_trait]
impl SignalSource for HnClient {
    async fn search(&self, query: &str) -> Result<Vec<Story>> {
        Ok(self.search_stories(query).await?)
    }
}
