//! Relevance scoring for raw trend candidates. Pure — no I/O, no clock.

/// Terms that mark a title as relevant to the AI-automation niche.
/// "claude" and "openclaw" are the product-specific terms.
const RELEVANCE_TERMS: &[&str] = &[
    "ai",
    "automation",
    "agent",
    "agents",
    "claude",
    "openclaw",
    "llm",
    "prompt",
    "workflow",
    "autonomous",
    "assistant",
];

/// Engagement contributes at most this many points.
pub const ENGAGEMENT_CAP: f64 = 20.0;

/// Keyword/query relevance contributes at most this many points.
pub const RELEVANCE_CAP: f64 = 35.0;

/// At most this many qualitative reasons are emitted per topic.
const MAX_REASONS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct TopicScore {
    pub score: f64,
    pub reasons: Vec<String>,
}

/// Score a candidate title against the relevance vocabulary and its
/// originating query. Engagement is the combined upvote/comment signal.
pub fn score_topic(title: &str, engagement: f64, query: &str) -> TopicScore {
    let lower_title = title.to_lowercase();

    let relevance_hits = RELEVANCE_TERMS
        .iter()
        .filter(|term| lower_title.contains(*term))
        .count();

    let mut reasons = Vec::new();
    if lower_title.contains("openclaw") {
        reasons.push("Direct OpenClaw relevance".to_string());
    }
    if lower_title.contains("claude") {
        reasons.push("Claude/agentic coding relevance".to_string());
    }
    if lower_title.contains("automation") {
        reasons.push("Automation-specific topic".to_string());
    }
    if relevance_hits >= 3 {
        reasons.push("Strong AI keyword density".to_string());
    }
    reasons.truncate(MAX_REASONS);

    let query_match = if lower_title.contains(&query.to_lowercase()) {
        1.0
    } else {
        0.0
    };

    let engagement_score = (engagement / 60.0).clamp(0.0, ENGAGEMENT_CAP);
    let relevance_score = (relevance_hits as f64 * 2.0 + query_match * 3.0).clamp(0.0, RELEVANCE_CAP);

    TopicScore {
        score: round2(engagement_score + relevance_score),
        reasons,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
