//! Lead-magnet synthesis. Deterministic mapping from a ranked topic batch to
//! a bounded set of drafts — no generation call involved.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use trendpress_common::config::DEFAULT_ASSIGNEE;
use trendpress_common::{LeadMagnetDraft, ViralTopic};

/// Asset types, rotated round-robin across the batch.
pub const LEAD_MAGNET_TYPES: &[&str] = &[
    "Prompt Pack",
    "Checklist",
    "Playbook",
    "Template Bundle",
    "Teardown",
    "Mini Course",
];

/// Drafts produced per batch, at most.
pub const MAX_LEAD_MAGNETS: usize = 12;

/// Topic titles longer than this are shortened in the draft title.
const TITLE_LIMIT: usize = 92;

/// Build one draft per topic (first [`MAX_LEAD_MAGNETS`] topics, in order),
/// rotating asset type and assignee round-robin. `assignees` must be
/// non-empty — callers use [`StudioConfig::assignees`] which applies the
/// placeholder fallback.
///
/// [`StudioConfig::assignees`]: trendpress_common::StudioConfig::assignees
pub fn build_lead_magnets(
    topics: &[ViralTopic],
    assignees: &[String],
    fetched_at: DateTime<Utc>,
) -> Vec<LeadMagnetDraft> {
    topics
        .iter()
        .take(MAX_LEAD_MAGNETS)
        .enumerate()
        .map(|(index, topic)| {
            let magnet_type = LEAD_MAGNET_TYPES[index % LEAD_MAGNET_TYPES.len()];
            let assigned_to = assignees
                .get(index % assignees.len().max(1))
                .cloned()
                .unwrap_or_else(|| DEFAULT_ASSIGNEE.to_string());

            LeadMagnetDraft {
                id: Uuid::new_v4(),
                title: format!("{magnet_type}: {}", short_title(&topic.title)),
                magnet_type: magnet_type.to_string(),
                target_audience: "AI builders, automation freelancers, and technical founders"
                    .to_string(),
                assigned_to,
                hook: format!(
                    "Use this to turn the {} trend into inbound leads for AI/automation services.",
                    topic.source
                ),
                outline: vec![
                    "Problem framing: what changed and why teams are paying attention now"
                        .to_string(),
                    "3-step implementation plan with real tooling examples".to_string(),
                    "Common failure points and how to avoid them".to_string(),
                    "CTA section that invites readers into your community or call".to_string(),
                ],
                call_to_action: "Reply with \"SYSTEM\" to get the full version + templates."
                    .to_string(),
                based_on_topic_id: Some(topic.id),
                created_at: fetched_at,
            }
        })
        .collect()
}

/// Collapse runs of whitespace and cut over-long titles to 89 chars + "...".
fn short_title(title: &str) -> String {
    let stripped = title.split_whitespace().collect::<Vec<_>>().join(" ");
    if stripped.chars().count() > TITLE_LIMIT {
        let head: String = stripped.chars().take(TITLE_LIMIT - 3).collect();
        format!("{head}...")
    } else {
        stripped
    }
}
