// Persistence contract for the studio.
//
// Every write is one batched operation against the document: replace for
// discovery batches, prepend-and-cap for the auto-post log. Callers never
// read-modify-write entities individually.

mod json_file;

pub use json_file::JsonFileStore;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use trendpress_common::{AutoPost, CreatorSource, LeadMagnetDraft, Platform, ReferencePost, ViralTopic};

/// Most-recent auto posts retained in the log.
pub const AUTO_POST_CAP: usize = 400;

#[async_trait]
pub trait ContentStore: Send + Sync {
    // --- Reference library ---

    /// List reference posts, most recent first, optionally for one platform.
    async fn list_reference_posts(&self, platform: Option<Platform>) -> Result<Vec<ReferencePost>>;

    /// Add a reference post to the library.
    async fn add_reference_post(
        &self,
        platform: Platform,
        text: &str,
        source: Option<&str>,
    ) -> Result<ReferencePost>;

    /// Remove a reference post. Returns false when the id is unknown.
    async fn remove_reference_post(&self, id: Uuid) -> Result<bool>;

    // --- Creators ---

    /// List creator sources, most recent first.
    async fn list_creators(&self) -> Result<Vec<CreatorSource>>;

    /// Add a creator. Idempotent by case-insensitive URL: a duplicate URL
    /// returns the existing record unchanged.
    async fn add_creator(&self, name: &str, url: &str, platform: Platform)
        -> Result<CreatorSource>;

    /// Remove a creator. Returns false when the id is unknown.
    async fn remove_creator(&self, id: Uuid) -> Result<bool>;

    // --- Discovery batches ---

    /// List topics, score descending, ties broken by recency.
    async fn list_topics(&self) -> Result<Vec<ViralTopic>>;

    /// Replace the whole topic set with a fresh discovery batch.
    async fn replace_topics(&self, topics: Vec<ViralTopic>) -> Result<()>;

    /// List lead magnets, most recent first.
    async fn list_lead_magnets(&self) -> Result<Vec<LeadMagnetDraft>>;

    /// Replace the whole lead-magnet set with a fresh batch.
    async fn replace_lead_magnets(&self, magnets: Vec<LeadMagnetDraft>) -> Result<()>;

    // --- Auto-post log ---

    /// List auto posts, most recent first, optionally for one platform.
    async fn list_auto_posts(&self, platform: Option<Platform>) -> Result<Vec<AutoPost>>;

    /// Prepend a batch of new posts to the log, keeping at most
    /// [`AUTO_POST_CAP`] entries.
    async fn append_auto_posts(&self, posts: Vec<AutoPost>) -> Result<()>;
}
