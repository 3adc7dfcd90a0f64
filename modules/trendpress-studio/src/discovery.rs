//! Topic discovery: fan out the query list against the trend feed, score and
//! dedupe the hits, and derive the lead-magnet batch.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use hn_client::Story;
use trendpress_common::{LeadMagnetDraft, ViralTopic};

use crate::magnets::build_lead_magnets;
use crate::scoring::score_topic;
use crate::store::ContentStore;
use crate::traits::SignalSource;

/// Seed queries, one feed search each per refresh.
pub const DISCOVERY_QUERIES: &[&str] = &[
    "AI automation",
    "AI agents",
    "Claude Code",
    "OpenClaw",
    "workflow automation AI",
    "LLM automation",
];

/// Hits scoring below this are dropped.
pub const RELEVANCE_FLOOR: f64 = 6.0;

/// Per-query cap applied before the batches are merged.
const PER_QUERY_LIMIT: usize = 10;

/// Size bound on the merged, deduplicated topic batch.
pub const MAX_TOPICS: usize = 18;

/// Pre-authored topics used when every query comes back empty.
const FALLBACK_TOPIC_TITLES: &[&str] = &[
    "How teams are shipping AI automation agents in production",
    "OpenClaw workflows that save 10+ hours per week",
    "AI operations playbooks for service businesses",
    "Practical Claude Code automations that drive pipeline",
];

#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryResult {
    pub viral_topics: Vec<ViralTopic>,
    pub lead_magnets: Vec<LeadMagnetDraft>,
    pub fetched_at: DateTime<Utc>,
}

/// Runs discovery refreshes and serves the last persisted batch.
pub struct DiscoveryEngine {
    source: Arc<dyn SignalSource>,
    store: Arc<dyn ContentStore>,
    assignees: Vec<String>,
}

impl DiscoveryEngine {
    pub fn new(
        source: Arc<dyn SignalSource>,
        store: Arc<dyn ContentStore>,
        assignees: Vec<String>,
    ) -> Self {
        Self {
            source,
            store,
            assignees,
        }
    }

    /// Run every discovery query, merge what succeeded, and replace the
    /// persisted topic and lead-magnet batches. Query failures degrade to a
    /// partial batch; a fully empty batch degrades to the fallback topics.
    pub async fn refresh(&self) -> Result<DiscoveryResult> {
        let fetched_at = Utc::now();

        let searches = DISCOVERY_QUERIES
            .iter()
            .map(|query| async move { (*query, self.source.search(query).await) });
        let settled = join_all(searches).await;

        let mut collected = Vec::new();
        for (query, result) in settled {
            match result {
                Ok(stories) => {
                    collected.extend(topics_from_stories(&stories, query, fetched_at));
                }
                Err(e) => {
                    warn!(query, error = %e, "Discovery query failed");
                }
            }
        }

        // Sort before dedup so the best-scored occurrence of a duplicate
        // survives. The same story can arrive under several queries and only
        // the matching query carries the query-match bonus.
        collected.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| b.engagement.total_cmp(&a.engagement))
        });
        let mut topics = dedupe_topics(collected);
        topics.truncate(MAX_TOPICS);
        for topic in &mut topics {
            topic.created_at = fetched_at;
        }

        if topics.is_empty() {
            warn!("All discovery queries came back empty, using fallback topics");
            topics = fallback_topics(fetched_at);
        }

        let lead_magnets = build_lead_magnets(&topics, &self.assignees, fetched_at);

        self.store.replace_topics(topics.clone()).await?;
        self.store.replace_lead_magnets(lead_magnets.clone()).await?;

        info!(
            topics = topics.len(),
            lead_magnets = lead_magnets.len(),
            "Discovery refresh complete"
        );

        Ok(DiscoveryResult {
            viral_topics: topics,
            lead_magnets,
            fetched_at,
        })
    }

    /// Return the last persisted batch without recomputation.
    pub async fn current(&self) -> Result<DiscoveryResult> {
        let viral_topics = self.store.list_topics().await?;
        let lead_magnets = self.store.list_lead_magnets().await?;

        let fetched_at = viral_topics
            .first()
            .map(|t| t.created_at)
            .or_else(|| lead_magnets.first().map(|m| m.created_at))
            .unwrap_or(DateTime::UNIX_EPOCH);

        Ok(DiscoveryResult {
            viral_topics,
            lead_magnets,
            fetched_at,
        })
    }
}

/// Map one query's hits to scored topics: drop hits without a usable title
/// and link, drop scores below the floor, keep the query's best ten.
fn topics_from_stories(stories: &[Story], query: &str, now: DateTime<Utc>) -> Vec<ViralTopic> {
    let mut topics: Vec<ViralTopic> = stories
        .iter()
        .filter_map(|story| {
            let title = story.best_title()?;
            let url = story.best_url()?;

            let engagement = story.engagement();
            let scored = score_topic(title, engagement, query);
            if scored.score < RELEVANCE_FLOOR {
                return None;
            }

            let reasons = if scored.reasons.is_empty() {
                vec!["AI/automation keyword match".to_string()]
            } else {
                scored.reasons
            };

            Some(ViralTopic {
                id: Uuid::new_v4(),
                title: title.to_string(),
                url: url.to_string(),
                source: "Hacker News".to_string(),
                published_at: story.created_at.unwrap_or(now),
                score: scored.score,
                engagement,
                relevance_reasons: reasons,
                summary: format!(
                    "Trend signal from Hacker News: {} points, {} comments. Query seed: {query}.",
                    story.points(),
                    story.comments()
                ),
                created_at: now,
            })
        })
        .collect();

    topics.sort_by(|a, b| b.score.total_cmp(&a.score));
    topics.truncate(PER_QUERY_LIMIT);
    topics
}

/// Drop duplicates by case-insensitive (url, title); first occurrence wins.
fn dedupe_topics(topics: Vec<ViralTopic>) -> Vec<ViralTopic> {
    let mut seen = HashSet::new();
    topics
        .into_iter()
        .filter(|topic| {
            seen.insert(format!(
                "{}|{}",
                topic.url.to_lowercase(),
                topic.title.to_lowercase()
            ))
        })
        .collect()
}

fn fallback_topics(fetched_at: DateTime<Utc>) -> Vec<ViralTopic> {
    FALLBACK_TOPIC_TITLES
        .iter()
        .enumerate()
        .map(|(index, title)| ViralTopic {
            id: Uuid::new_v4(),
            title: title.to_string(),
            url: "https://news.ycombinator.com/".to_string(),
            source: "Fallback Trend Feed".to_string(),
            published_at: fetched_at,
            score: 8.0 - index as f64 * 0.5,
            engagement: 60.0 - index as f64 * 5.0,
            relevance_reasons: vec![
                "AI automation relevance".to_string(),
                "OpenClaw/agentic workflow fit".to_string(),
            ],
            summary: "Fallback trend used because live feed returned no results.".to_string(),
            created_at: fetched_at,
        })
        .collect()
}
