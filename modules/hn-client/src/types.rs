use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Top-level Algolia search response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<Story>,
}

/// One story hit from the Algolia search index.
///
/// Comment hits carry the parent story's title/url in the `story_*` fields,
/// so both variants are kept and resolved through [`Story::best_title`] and
/// [`Story::best_url`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Story {
    #[serde(default, rename = "objectID")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub story_title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub story_url: Option<String>,
    #[serde(default)]
    pub points: Option<i64>,
    #[serde(default)]
    pub num_comments: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Story {
    /// Trimmed title, preferring the direct field over the parent-story one.
    /// `None` when both are missing or blank.
    pub fn best_title(&self) -> Option<&str> {
        pick_non_empty(self.title.as_deref(), self.story_title.as_deref())
    }

    /// Trimmed link, preferring the direct field over the parent-story one.
    pub fn best_url(&self) -> Option<&str> {
        pick_non_empty(self.url.as_deref(), self.story_url.as_deref())
    }

    pub fn points(&self) -> i64 {
        self.points.unwrap_or(0).max(0)
    }

    pub fn comments(&self) -> i64 {
        self.num_comments.unwrap_or(0).max(0)
    }

    /// Combined engagement signal: points plus comments weighted 1.5x.
    pub fn engagement(&self) -> f64 {
        self.points() as f64 + self.comments() as f64 * 1.5
    }
}

fn pick_non_empty<'a>(first: Option<&'a str>, second: Option<&'a str>) -> Option<&'a str> {
    [first, second]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
}
