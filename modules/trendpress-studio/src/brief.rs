//! Generation-brief composition. Pure string work.

use trendpress_common::{LeadMagnetDraft, Platform, ViralTopic};

/// Compose the natural-language brief handed to the post generator for one
/// topic/magnet pair.
pub fn build_brief(topic: &ViralTopic, magnet: &LeadMagnetDraft, platform: Platform) -> String {
    let platform_angle = match platform {
        Platform::ShortForm => {
            "Make it punchy with one clear contrarian angle and one practical takeaway."
        }
        Platform::LongForm => {
            "Make it story-led with practical business context and a strong closing insight."
        }
    };

    [
        format!("Topic: {}", topic.title),
        format!("Lead magnet angle: {}", magnet.title),
        "Audience: AI automation builders, OpenClaw users, agency operators".to_string(),
        "Value: show a clear implementation path and why this matters now".to_string(),
        platform_angle.to_string(),
    ]
    .join(" ")
}
