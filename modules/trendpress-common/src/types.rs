use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Platforms ---

/// Target surface for a post. Short-form is punchy and character-budgeted;
/// long-form is story-led with room for paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "short-form")]
    ShortForm,
    #[serde(rename = "long-form")]
    LongForm,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::ShortForm, Platform::LongForm];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::ShortForm => "short-form",
            Platform::LongForm => "long-form",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = crate::error::StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short-form" => Ok(Platform::ShortForm),
            "long-form" => Ok(Platform::LongForm),
            other => Err(crate::error::StudioError::Validation(format!(
                "unknown platform: {other}"
            ))),
        }
    }
}

// --- Reference library ---

/// A sample post collected into the reference library. Immutable once added;
/// steers the tone of generated drafts for its platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferencePost {
    pub id: Uuid,
    pub platform: Platform,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A creator account worth watching. Unique by case-insensitive profile URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatorSource {
    pub id: Uuid,
    pub name: String,
    pub platform: Platform,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

// --- Discovery ---

/// A scored trend signal pulled from the external feed during one discovery
/// refresh. The whole topic set is replaced on each refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViralTopic {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub score: f64,
    pub engagement: f64,
    /// Human-readable reasons this topic scored as relevant. At most 3.
    pub relevance_reasons: Vec<String>,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// A templated marketing-asset draft derived from one topic of a discovery
/// batch. Replaced wholesale alongside the topics, never mutated on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadMagnetDraft {
    pub id: Uuid,
    pub title: String,
    /// One of a fixed rotation of asset types ("Prompt Pack", "Checklist", ...).
    pub magnet_type: String,
    pub target_audience: String,
    pub assigned_to: String,
    pub hook: String,
    pub outline: Vec<String>,
    pub call_to_action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on_topic_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

// --- Generated content ---

/// A post produced by the auto-content pipeline. Append-only; the log keeps
/// the most recent entries up to a fixed cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoPost {
    pub id: Uuid,
    pub platform: Platform,
    pub hook: String,
    pub post: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on_topic_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on_lead_magnet_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// One draft returned by the post generator. Transient — callers decide
/// whether it becomes an [`AutoPost`] or goes straight to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPost {
    pub hook: String,
    pub post: String,
}
