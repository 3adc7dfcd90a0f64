use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use trendpress_common::{AutoPost, CreatorSource, LeadMagnetDraft, Platform, ReferencePost, ViralTopic};

use super::{ContentStore, AUTO_POST_CAP};

/// The single JSON document backing the store.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    reference_posts: Vec<ReferencePost>,
    #[serde(default)]
    creators: Vec<CreatorSource>,
    #[serde(default)]
    topics: Vec<ViralTopic>,
    #[serde(default)]
    lead_magnets: Vec<LeadMagnetDraft>,
    #[serde(default)]
    auto_posts: Vec<AutoPost>,
}

/// File-backed store: one JSON document, one async mutex. Every operation is
/// a full read-modify-write under the lock, so a logical operation is never
/// interleaved with another writer in this process.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_document(&self) -> Result<StoreDocument> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) if raw.trim().is_empty() => Ok(StoreDocument::default()),
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("corrupt store document at {}", self.path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StoreDocument::default()),
            Err(e) => Err(e).with_context(|| format!("reading {}", self.path.display())),
        }
    }

    async fn write_document(&self, doc: &StoreDocument) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| *d != Path::new("")) {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let raw = serde_json::to_string_pretty(doc)?;
        tokio::fs::write(&self.path, raw)
            .await
            .with_context(|| format!("writing {}", self.path.display()))
    }
}

#[async_trait]
impl ContentStore for JsonFileStore {
    async fn list_reference_posts(&self, platform: Option<Platform>) -> Result<Vec<ReferencePost>> {
        let _guard = self.lock.lock().await;
        let doc = self.read_document().await?;

        let mut posts: Vec<ReferencePost> = doc
            .reference_posts
            .into_iter()
            .filter(|p| platform.is_none_or(|wanted| p.platform == wanted))
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn add_reference_post(
        &self,
        platform: Platform,
        text: &str,
        source: Option<&str>,
    ) -> Result<ReferencePost> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;

        let post = ReferencePost {
            id: Uuid::new_v4(),
            platform,
            text: text.to_string(),
            source: source.map(str::to_string),
            created_at: Utc::now(),
        };
        doc.reference_posts.push(post.clone());
        self.write_document(&doc).await?;
        Ok(post)
    }

    async fn remove_reference_post(&self, id: Uuid) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;

        let before = doc.reference_posts.len();
        doc.reference_posts.retain(|p| p.id != id);
        if doc.reference_posts.len() == before {
            return Ok(false);
        }
        self.write_document(&doc).await?;
        Ok(true)
    }

    async fn list_creators(&self) -> Result<Vec<CreatorSource>> {
        let _guard = self.lock.lock().await;
        let mut creators = self.read_document().await?.creators;
        creators.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(creators)
    }

    async fn add_creator(
        &self,
        name: &str,
        url: &str,
        platform: Platform,
    ) -> Result<CreatorSource> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;

        let normalized = url.trim();
        if let Some(existing) = doc
            .creators
            .iter()
            .find(|c| c.url.eq_ignore_ascii_case(normalized))
        {
            return Ok(existing.clone());
        }

        let creator = CreatorSource {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            platform,
            url: normalized.to_string(),
            created_at: Utc::now(),
        };
        doc.creators.push(creator.clone());
        self.write_document(&doc).await?;
        Ok(creator)
    }

    async fn remove_creator(&self, id: Uuid) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;

        let before = doc.creators.len();
        doc.creators.retain(|c| c.id != id);
        if doc.creators.len() == before {
            return Ok(false);
        }
        self.write_document(&doc).await?;
        Ok(true)
    }

    async fn list_topics(&self) -> Result<Vec<ViralTopic>> {
        let _guard = self.lock.lock().await;
        let mut topics = self.read_document().await?.topics;
        topics.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(topics)
    }

    async fn replace_topics(&self, topics: Vec<ViralTopic>) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;
        doc.topics = topics;
        self.write_document(&doc).await
    }

    async fn list_lead_magnets(&self) -> Result<Vec<LeadMagnetDraft>> {
        let _guard = self.lock.lock().await;
        let mut magnets = self.read_document().await?.lead_magnets;
        magnets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(magnets)
    }

    async fn replace_lead_magnets(&self, magnets: Vec<LeadMagnetDraft>) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;
        doc.lead_magnets = magnets;
        self.write_document(&doc).await
    }

    async fn list_auto_posts(&self, platform: Option<Platform>) -> Result<Vec<AutoPost>> {
        let _guard = self.lock.lock().await;
        let doc = self.read_document().await?;

        let mut posts: Vec<AutoPost> = doc
            .auto_posts
            .into_iter()
            .filter(|p| platform.is_none_or(|wanted| p.platform == wanted))
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn append_auto_posts(&self, posts: Vec<AutoPost>) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_document().await?;

        let mut log = posts;
        log.extend(doc.auto_posts);
        log.truncate(AUTO_POST_CAP);
        doc.auto_posts = log;
        self.write_document(&doc).await
    }
}
