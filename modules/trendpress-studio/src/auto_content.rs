//! Auto-content orchestration: refresh discovery, rotate the fresh batch,
//! pair topics with lead magnets, and generate one draft per pair for each
//! platform.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use trendpress_common::{AutoPost, LeadMagnetDraft, Platform, ViralTopic};

use crate::brief::build_brief;
use crate::discovery::DiscoveryEngine;
use crate::generate::{GenerateInput, PostGenerator};
use crate::store::ContentStore;

/// Posts requested per platform when the caller does not say.
pub const DEFAULT_COUNT_PER_PLATFORM: u32 = 3;

/// Upper bound on posts per platform per call.
pub const MAX_COUNT_PER_PLATFORM: u32 = 8;

#[derive(Debug, Clone, Serialize)]
pub struct AutoContentResult {
    pub viral_topics: Vec<ViralTopic>,
    pub lead_magnets: Vec<LeadMagnetDraft>,
    pub fetched_at: DateTime<Utc>,
    /// Posts produced by this call. Empty for reads.
    pub new_posts: Vec<AutoPost>,
    /// The full persisted log, most recent first.
    pub auto_posts: Vec<AutoPost>,
}

pub struct AutoContent {
    store: Arc<dyn ContentStore>,
    discovery: DiscoveryEngine,
    generator: PostGenerator,
}

impl AutoContent {
    pub fn new(
        store: Arc<dyn ContentStore>,
        discovery: DiscoveryEngine,
        generator: PostGenerator,
    ) -> Self {
        Self {
            store,
            discovery,
            generator,
        }
    }

    /// Read the last persisted state without recomputing anything.
    pub async fn current(&self) -> Result<AutoContentResult> {
        let discovery = self.discovery.current().await?;
        let auto_posts = self.store.list_auto_posts(None).await?;

        Ok(AutoContentResult {
            viral_topics: discovery.viral_topics,
            lead_magnets: discovery.lead_magnets,
            fetched_at: discovery.fetched_at,
            new_posts: Vec::new(),
            auto_posts,
        })
    }

    /// Refresh discovery and generate up to `count` posts per platform.
    ///
    /// `rotation_offset` varies which topics get picked between calls; it
    /// defaults to the current unix-millis timestamp and is injectable so
    /// tests can pin the selection.
    pub async fn generate(
        &self,
        requested_count: Option<u32>,
        rotation_offset: Option<u64>,
    ) -> Result<AutoContentResult> {
        let count = requested_count
            .unwrap_or(DEFAULT_COUNT_PER_PLATFORM)
            .clamp(1, MAX_COUNT_PER_PLATFORM) as usize;

        let discovery = self.discovery.refresh().await?;
        let offset =
            rotation_offset.unwrap_or_else(|| Utc::now().timestamp_millis().max(0) as u64);

        let (short_form, long_form) = tokio::join!(
            self.generate_for_platform(
                Platform::ShortForm,
                &discovery.viral_topics,
                &discovery.lead_magnets,
                count,
                offset,
            ),
            self.generate_for_platform(
                Platform::LongForm,
                &discovery.viral_topics,
                &discovery.lead_magnets,
                count,
                offset,
            ),
        );

        let mut new_posts = short_form?;
        new_posts.extend(long_form?);

        self.store.append_auto_posts(new_posts.clone()).await?;
        let auto_posts = self.store.list_auto_posts(None).await?;

        info!(new_posts = new_posts.len(), "Auto-content batch complete");

        Ok(AutoContentResult {
            viral_topics: discovery.viral_topics,
            lead_magnets: discovery.lead_magnets,
            fetched_at: discovery.fetched_at,
            new_posts,
            auto_posts,
        })
    }

    async fn generate_for_platform(
        &self,
        platform: Platform,
        topics: &[ViralTopic],
        magnets: &[LeadMagnetDraft],
        count: usize,
        offset: u64,
    ) -> Result<Vec<AutoPost>> {
        let references = self.store.list_reference_posts(Some(platform)).await?;

        let rotated_topics = rotate(topics, offset);
        let rotated_magnets = rotate(magnets, offset);
        let fallback = fallback_magnet();

        let selected = &rotated_topics[..count.min(rotated_topics.len())];

        let drafts = join_all(selected.iter().enumerate().map(|(index, topic)| {
            let magnet = rotated_magnets
                .get(index % rotated_magnets.len().max(1))
                .unwrap_or(&fallback);
            let brief = build_brief(topic, magnet, platform);
            let references = &references;

            async move {
                let input = GenerateInput {
                    platform,
                    brief,
                    audience: Some(
                        "AI and AI automation founders, operators, and creators".to_string(),
                    ),
                    goal: Some(
                        "Generate qualified inbound leads for AI automation services and education"
                            .to_string(),
                    ),
                    call_to_action: Some(
                        "Reply \"SYSTEM\" to get the full lead magnet and implementation template"
                            .to_string(),
                    ),
                    variants: 1,
                };

                let draft = self
                    .generator
                    .generate_posts(&input, references)
                    .await
                    .into_iter()
                    .next();
                (topic, magnet, draft)
            }
        }))
        .await;

        let posts = drafts
            .into_iter()
            .filter_map(|(topic, magnet, draft)| {
                let draft = draft.filter(|d| !d.post.is_empty())?;
                let hook = if draft.hook.is_empty() {
                    topic.title.clone()
                } else {
                    draft.hook
                };

                Some(AutoPost {
                    id: Uuid::new_v4(),
                    platform,
                    hook,
                    post: draft.post,
                    based_on_topic_id: Some(topic.id),
                    based_on_lead_magnet_id: Some(magnet.id),
                    created_at: Utc::now(),
                })
            })
            .collect();

        Ok(posts)
    }
}

/// Rotate a list left by `offset` positions. Empty lists are a no-op; the
/// modulo guards against zero-length division.
fn rotate<T: Clone>(items: &[T], offset: u64) -> Vec<T> {
    if items.is_empty() {
        return Vec::new();
    }
    let split = (offset % items.len() as u64) as usize;
    let mut rotated = items[split..].to_vec();
    rotated.extend_from_slice(&items[..split]);
    rotated
}

/// Pairing target when a batch somehow carries no lead magnets.
fn fallback_magnet() -> LeadMagnetDraft {
    LeadMagnetDraft {
        id: Uuid::new_v4(),
        title: "AI Automation Playbook".to_string(),
        magnet_type: "Playbook".to_string(),
        target_audience: "AI builders and operators".to_string(),
        assigned_to: "All Team Members".to_string(),
        hook: "Turn trends into executable systems".to_string(),
        outline: vec![
            "Problem".to_string(),
            "System".to_string(),
            "Execution".to_string(),
        ],
        call_to_action: "Reply SYSTEM for the full version".to_string(),
        based_on_topic_id: None,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonFileStore;
    use crate::testing::MockSignalSource;
    use hn_client::Story;

    fn story(title: &str, url: &str, points: i64) -> Story {
        Story {
            title: Some(title.to_string()),
            url: Some(url.to_string()),
            points: Some(points),
            num_comments: Some(10),
            ..Story::default()
        }
    }

    fn pipeline(source: MockSignalSource, dir: &tempfile::TempDir) -> AutoContent {
        let store = Arc::new(JsonFileStore::new(dir.path().join("studio.json")));
        let discovery = DiscoveryEngine::new(
            Arc::new(source),
            store.clone(),
            vec!["Ana".to_string()],
        );
        AutoContent::new(store, discovery, PostGenerator::offline())
    }

    fn many_topics() -> MockSignalSource {
        let stories: Vec<Story> = (0..12)
            .map(|i| {
                story(
                    &format!("AI agents automation push {i}"),
                    &format!("https://example.com/{i}"),
                    600 + i,
                )
            })
            .collect();
        MockSignalSource::new().on_any(stories)
    }

    #[tokio::test]
    async fn current_on_an_empty_store_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline(MockSignalSource::new(), &dir);

        let result = pipeline.current().await.unwrap();

        assert!(result.viral_topics.is_empty());
        assert!(result.new_posts.is_empty());
        assert!(result.auto_posts.is_empty());
        assert_eq!(result.fetched_at, DateTime::UNIX_EPOCH);
    }

    #[tokio::test]
    async fn generate_produces_posts_for_both_platforms() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline(many_topics(), &dir);

        let result = pipeline.generate(Some(3), Some(0)).await.unwrap();

        assert_eq!(result.new_posts.len(), 6);
        let short: Vec<_> = result
            .new_posts
            .iter()
            .filter(|p| p.platform == Platform::ShortForm)
            .collect();
        assert_eq!(short.len(), 3);
        assert!(result
            .new_posts
            .iter()
            .all(|p| p.based_on_topic_id.is_some() && p.based_on_lead_magnet_id.is_some()));
        assert_eq!(result.auto_posts.len(), 6);
        // Short-form posts come first in the new-posts batch.
        assert_eq!(result.new_posts[0].platform, Platform::ShortForm);
        assert_eq!(result.new_posts[5].platform, Platform::LongForm);
    }

    #[tokio::test]
    async fn read_after_generate_returns_the_same_batch() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline(many_topics(), &dir);

        let generated = pipeline.generate(None, Some(0)).await.unwrap();
        let read = pipeline.current().await.unwrap();

        assert_eq!(read.viral_topics.len(), generated.viral_topics.len());
        assert_eq!(read.auto_posts.len(), generated.auto_posts.len());
        assert!(read.new_posts.is_empty());
    }

    #[tokio::test]
    async fn count_is_clamped_per_platform() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline(many_topics(), &dir);

        let result = pipeline.generate(Some(50), Some(0)).await.unwrap();
        assert_eq!(
            result.new_posts.len(),
            2 * MAX_COUNT_PER_PLATFORM as usize
        );

        let result = pipeline.generate(Some(0), Some(0)).await.unwrap();
        assert_eq!(result.new_posts.len(), 2);
    }

    #[tokio::test]
    async fn rotation_offset_shifts_topic_selection() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline(many_topics(), &dir);

        let unrotated = pipeline.generate(Some(1), Some(0)).await.unwrap();
        let rotated = pipeline.generate(Some(1), Some(2)).await.unwrap();

        let first_topic = |r: &AutoContentResult| {
            r.new_posts
                .first()
                .and_then(|p| p.based_on_topic_id)
                .unwrap()
        };
        assert_eq!(first_topic(&unrotated), unrotated.viral_topics[0].id);
        assert_eq!(first_topic(&rotated), rotated.viral_topics[2].id);
    }

    #[tokio::test]
    async fn log_accumulates_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline(many_topics(), &dir);

        pipeline.generate(Some(2), Some(0)).await.unwrap();
        let second = pipeline.generate(Some(2), Some(0)).await.unwrap();

        assert_eq!(second.new_posts.len(), 4);
        assert_eq!(second.auto_posts.len(), 8);
    }

    #[test]
    fn rotate_handles_empty_and_wraps() {
        let empty: Vec<u8> = Vec::new();
        assert!(rotate(&empty, 7).is_empty());

        let items = vec![1, 2, 3];
        assert_eq!(rotate(&items, 0), vec![1, 2, 3]);
        assert_eq!(rotate(&items, 4), vec![2, 3, 1]);
    }
}
