//! Post generation: one model call per request, strict structured output,
//! and a deterministic fallback that never fails. Callers of
//! [`PostGenerator::generate_posts`] always get `variants` drafts back.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{bail, Result};
use serde::Deserialize;
use tracing::warn;

use ai_client::{strip_code_fences, GenerationRequest, TextGenerator};
use trendpress_common::{GeneratedPost, Platform, ReferencePost};

/// Upper bound on drafts per request.
pub const MAX_VARIANTS: usize = 10;

/// Reference samples embedded in the prompt, at most.
const MAX_REFERENCE_SAMPLES: usize = 20;

const GENERATION_TEMPERATURE: f32 = 0.9;

#[derive(Debug, Clone)]
pub struct GenerateInput {
    pub platform: Platform,
    pub brief: String,
    pub audience: Option<String>,
    pub goal: Option<String>,
    pub call_to_action: Option<String>,
    pub variants: usize,
}

/// Structured shape the model is required to return.
#[derive(Debug, Deserialize)]
struct PostsPayload {
    #[serde(default)]
    posts: Vec<RawPost>,
}

#[derive(Debug, Deserialize)]
struct RawPost {
    #[serde(default)]
    hook: Option<String>,
    #[serde(default)]
    post: Option<String>,
}

/// Produces platform-appropriate drafts. With no generator configured the
/// model call is skipped entirely and every request takes the fallback path.
pub struct PostGenerator {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl PostGenerator {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    /// A generator with no model behind it — deterministic drafts only.
    pub fn offline() -> Self {
        Self::new(None)
    }

    /// Generate exactly `variants` drafts (clamped to [1, 10]). Model
    /// failures of any kind — network, bad status, unparsable or empty
    /// output — degrade to the deterministic fallback. Never fails.
    pub async fn generate_posts(
        &self,
        input: &GenerateInput,
        references: &[ReferencePost],
    ) -> Vec<GeneratedPost> {
        let variants = input.variants.clamp(1, MAX_VARIANTS);

        let Some(generator) = &self.generator else {
            return fallback_generate(input, references, variants);
        };

        match generate_via_model(generator.as_ref(), input, references, variants).await {
            Ok(posts) => posts,
            Err(e) => {
                warn!(platform = %input.platform, error = %e, "Model generation failed, using fallback");
                fallback_generate(input, references, variants)
            }
        }
    }
}

async fn generate_via_model(
    generator: &dyn TextGenerator,
    input: &GenerateInput,
    references: &[ReferencePost],
    variants: usize,
) -> Result<Vec<GeneratedPost>> {
    let request = build_prompts(input, references, variants);
    let raw = generator.generate(&request).await?;
    parse_model_output(&raw, variants)
}

fn build_prompts(
    input: &GenerateInput,
    references: &[ReferencePost],
    variants: usize,
) -> GenerationRequest {
    let platform_rule = match input.platform {
        Platform::ShortForm => {
            "Short-form output must be concise, skimmable, and ideally under 280 characters \
             unless a short thread style is clearly better."
        }
        Platform::LongForm => {
            "Long-form output should be professional, story-led, and readable with short \
             paragraphs and concrete business value."
        }
    };

    let count_rule = format!("Return exactly {variants} posts.");
    let system = [
        "You are an elite social media strategist for an AI education business.",
        "Your job is to generate high-performing organic posts from a rough brief.",
        "Do not copy sample posts verbatim. Learn style patterns and create original posts.",
        platform_rule,
        "Return strict JSON only with this shape: {\"posts\":[{\"hook\":\"...\",\"post\":\"...\"}]}.",
        count_rule.as_str(),
    ]
    .join(" ");

    let samples = references
        .iter()
        .take(MAX_REFERENCE_SAMPLES)
        .enumerate()
        .map(|(index, item)| format!("Sample {}: {}", index + 1, item.text))
        .collect::<Vec<_>>()
        .join("\n");

    let user = [
        format!("Platform: {}", input.platform),
        format!(
            "Goal: {}",
            input
                .goal
                .as_deref()
                .unwrap_or("Generate leads for paid AI school/community")
        ),
        format!(
            "Audience: {}",
            input
                .audience
                .as_deref()
                .unwrap_or("Aspiring AI learners, professionals, and founders")
        ),
        format!(
            "Call to action: {}",
            input
                .call_to_action
                .as_deref()
                .unwrap_or("Invite people to learn more or join the community")
        ),
        format!("Brief: {}", input.brief),
        "Reference style library:".to_string(),
        if samples.is_empty() {
            "No references yet. Use proven social writing patterns.".to_string()
        } else {
            samples
        },
    ]
    .join("\n\n");

    GenerationRequest {
        system,
        user,
        temperature: GENERATION_TEMPERATURE,
    }
}

/// Validate the model's structured output. Any shape violation is an `Err`
/// so the caller can branch to the fallback.
fn parse_model_output(raw: &str, variants: usize) -> Result<Vec<GeneratedPost>> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        bail!("no text returned from model");
    }

    let payload: PostsPayload = serde_json::from_str(cleaned)?;

    let mut posts: Vec<GeneratedPost> = payload
        .posts
        .into_iter()
        .map(|item| GeneratedPost {
            hook: item.hook.unwrap_or_default().trim().to_string(),
            post: item.post.unwrap_or_default().trim().to_string(),
        })
        .filter(|item| !item.post.is_empty())
        .collect();
    posts.truncate(variants);

    if posts.is_empty() {
        bail!("no posts parsed from model output");
    }

    Ok(posts)
}

// ---------------------------------------------------------------------------
// Deterministic fallback — no I/O, cannot fail
// ---------------------------------------------------------------------------

fn fallback_generate(
    input: &GenerateInput,
    references: &[ReferencePost],
    variants: usize,
) -> Vec<GeneratedPost> {
    let corpus = references.iter().fold(input.brief.clone(), |mut acc, r| {
        acc.push(' ');
        acc.push_str(&r.text);
        acc
    });
    let keywords = pick_keywords(&corpus);
    let keyword_chunk = if keywords.is_empty() {
        String::new()
    } else {
        format!(" Keywords: {}.", keywords.join(", "))
    };

    let hook_prefix = match input.platform {
        Platform::ShortForm => "Hot take:",
        Platform::LongForm => "Most teams miss this:",
    };

    let first_sentence = input
        .brief
        .split('.')
        .next()
        .filter(|s| !s.is_empty())
        .map(|s| s.chars().take(90).collect::<String>())
        .unwrap_or_else(|| "AI education content can convert better than ads.".to_string());
    let hook = format!("{hook_prefix} {first_sentence}");

    let post = match input.platform {
        Platform::ShortForm => format!(
            "{hook}\n\n1) {}\n2) Show a real outcome\n3) End with one sharp CTA: {}{keyword_chunk}",
            input.brief,
            input
                .call_to_action
                .as_deref()
                .unwrap_or("Reply \"AI\" and I will share the framework.")
        ),
        Platform::LongForm => format!(
            "{hook}\n\n{}\n\nWhat works better for AI education content:\n\
             - Start with one painful problem\n- Share one real framework\n- Add one proof point\n\n\
             CTA: {}{keyword_chunk}",
            input.brief,
            input
                .call_to_action
                .as_deref()
                .unwrap_or("Comment AI and I will send the playbook.")
        ),
    };

    (1..=variants)
        .map(|n| GeneratedPost {
            hook: format!("{hook} ({n})"),
            post: post.clone(),
        })
        .collect()
}

/// Keyword candidates from the brief plus reference texts: lowercased,
/// alphanumeric-only tokens longer than 4 chars, first-seen order, first 8.
fn pick_keywords(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();

    let mut seen = HashSet::new();
    normalized
        .split_whitespace()
        .filter(|word| word.len() > 4)
        .filter(|word| seen.insert(word.to_string()))
        .map(str::to_string)
        .take(8)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTextGenerator;
    use chrono::Utc;
    use uuid::Uuid;

    fn input(platform: Platform, brief: &str, variants: usize) -> GenerateInput {
        GenerateInput {
            platform,
            brief: brief.to_string(),
            audience: None,
            goal: None,
            call_to_action: None,
            variants,
        }
    }

    fn reference(platform: Platform, text: &str) -> ReferencePost {
        ReferencePost {
            id: Uuid::new_v4(),
            platform,
            text: text.to_string(),
            source: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn offline_generator_produces_indexed_variants() {
        let generator = PostGenerator::offline();
        let posts = generator
            .generate_posts(&input(Platform::ShortForm, "Ship AI agents faster", 2), &[])
            .await;

        assert_eq!(posts.len(), 2);
        assert!(posts[0].hook.ends_with(" (1)"));
        assert!(posts[1].hook.ends_with(" (2)"));
        assert!(posts.iter().all(|p| p.post.contains("Ship AI agents faster")));
        assert!(posts[0].hook.starts_with("Hot take:"));
    }

    #[tokio::test]
    async fn model_failure_degrades_to_fallback() {
        let generator = PostGenerator::new(Some(Arc::new(MockTextGenerator::failing("boom"))));
        let posts = generator
            .generate_posts(&input(Platform::LongForm, "Automation briefs win", 3), &[])
            .await;

        assert_eq!(posts.len(), 3);
        assert!(posts.iter().all(|p| !p.post.is_empty()));
        assert!(posts[0].hook.starts_with("Most teams miss this:"));
    }

    #[tokio::test]
    async fn garbage_output_degrades_to_fallback() {
        let generator = PostGenerator::new(Some(Arc::new(MockTextGenerator::returning(
            "this is not json at all",
        ))));
        let posts = generator
            .generate_posts(&input(Platform::ShortForm, "A brief", 1), &[])
            .await;

        assert_eq!(posts.len(), 1);
        assert!(posts[0].hook.starts_with("Hot take:"));
    }

    #[tokio::test]
    async fn empty_posts_array_degrades_to_fallback() {
        let generator = PostGenerator::new(Some(Arc::new(MockTextGenerator::returning(
            r#"{"posts":[]}"#,
        ))));
        let posts = generator
            .generate_posts(&input(Platform::ShortForm, "A brief", 2), &[])
            .await;

        assert_eq!(posts.len(), 2);
    }

    #[tokio::test]
    async fn valid_fenced_output_is_parsed() {
        let generator = PostGenerator::new(Some(Arc::new(MockTextGenerator::returning(
            "```json\n{\"posts\":[{\"hook\":\" H \",\"post\":\" body \"}]}\n```",
        ))));
        let posts = generator
            .generate_posts(&input(Platform::ShortForm, "A brief", 1), &[])
            .await;

        assert_eq!(
            posts,
            vec![GeneratedPost {
                hook: "H".to_string(),
                post: "body".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn model_output_is_filtered_and_truncated() {
        let generator = PostGenerator::new(Some(Arc::new(MockTextGenerator::returning(
            r#"{"posts":[{"hook":"a","post":""},{"hook":"b","post":"one"},{"hook":"c","post":"two"},{"hook":"d","post":"three"}]}"#,
        ))));
        let posts = generator
            .generate_posts(&input(Platform::ShortForm, "A brief", 2), &[])
            .await;

        // The empty-bodied entry is dropped, then the list is cut to 2.
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].post, "one");
        assert_eq!(posts[1].post, "two");
    }

    #[tokio::test]
    async fn prompts_embed_brief_samples_and_variant_count() {
        let mock = Arc::new(MockTextGenerator::returning(r#"{"posts":[{"hook":"h","post":"p"}]}"#));
        let generator = PostGenerator::new(Some(mock.clone()));
        let references = vec![
            reference(Platform::ShortForm, "first sample"),
            reference(Platform::ShortForm, "second sample"),
        ];

        generator
            .generate_posts(&input(Platform::ShortForm, "The brief text", 2), &references)
            .await;

        let requests = mock.seen_requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].system.contains("Return exactly 2 posts."));
        assert!(requests[0].system.contains("under 280 characters"));
        assert!(requests[0].user.contains("Brief: The brief text"));
        assert!(requests[0].user.contains("Sample 1: first sample"));
        assert!(requests[0].user.contains("Sample 2: second sample"));
    }

    #[tokio::test]
    async fn fallback_variants_differ_only_in_index_suffix() {
        let generator = PostGenerator::offline();
        let req = input(Platform::LongForm, "Keep briefs short. Then iterate.", 2);
        let posts = generator.generate_posts(&req, &[]).await;
        let again = generator.generate_posts(&req, &[]).await;

        assert_eq!(posts[0].post, posts[1].post);
        assert_eq!(posts[0].hook.trim_end_matches(" (1)"), posts[1].hook.trim_end_matches(" (2)"));
        assert_eq!(posts, again);
    }

    #[tokio::test]
    async fn fallback_keywords_come_from_brief_and_references() {
        let generator = PostGenerator::offline();
        let references = vec![reference(Platform::ShortForm, "pipeline pipeline outreach")];
        let posts = generator
            .generate_posts(
                &input(Platform::ShortForm, "Automation compounds fast", 1),
                &references,
            )
            .await;

        // Tokens of 4 chars or less ("fast") are skipped and duplicates
        // ("pipeline") appear once, in first-seen order.
        assert!(posts[0]
            .post
            .contains("Keywords: automation, compounds, pipeline, outreach."));
    }

    #[tokio::test]
    async fn empty_brief_gets_the_generic_hook() {
        let generator = PostGenerator::offline();
        let posts = generator
            .generate_posts(&input(Platform::ShortForm, "", 1), &[])
            .await;

        assert!(posts[0]
            .hook
            .contains("AI education content can convert better than ads."));
    }

    #[tokio::test]
    async fn long_first_sentence_is_cut_to_ninety_chars() {
        let generator = PostGenerator::offline();
        let brief = "x".repeat(200);
        let posts = generator
            .generate_posts(&input(Platform::ShortForm, &brief, 1), &[])
            .await;

        let hook_body = posts[0]
            .hook
            .trim_start_matches("Hot take: ")
            .trim_end_matches(" (1)");
        assert_eq!(hook_body.chars().count(), 90);
    }

    #[tokio::test]
    async fn variant_count_is_clamped() {
        let generator = PostGenerator::offline();
        let posts = generator
            .generate_posts(&input(Platform::ShortForm, "brief", 50), &[])
            .await;
        assert_eq!(posts.len(), MAX_VARIANTS);

        let posts = generator
            .generate_posts(&input(Platform::ShortForm, "brief", 0), &[])
            .await;
        assert_eq!(posts.len(), 1);
    }
}
