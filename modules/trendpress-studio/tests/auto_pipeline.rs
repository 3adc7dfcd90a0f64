// End-to-end pipeline tests: mock feed, no credential, real file store.

use std::sync::Arc;

use hn_client::Story;
use trendpress_common::Platform;
use trendpress_studio::auto_content::AutoContent;
use trendpress_studio::discovery::DiscoveryEngine;
use trendpress_studio::generate::{GenerateInput, PostGenerator};
use trendpress_studio::store::{ContentStore, JsonFileStore};
use trendpress_studio::testing::MockSignalSource;

fn studio(
    source: MockSignalSource,
    dir: &tempfile::TempDir,
) -> (AutoContent, Arc<JsonFileStore>) {
    let store = Arc::new(JsonFileStore::new(dir.path().join("studio.json")));
    let discovery = DiscoveryEngine::new(
        Arc::new(source),
        store.clone(),
        vec!["Ana".to_string(), "Badri".to_string()],
    );
    let pipeline = AutoContent::new(store.clone(), discovery, PostGenerator::offline());
    (pipeline, store)
}

#[tokio::test]
async fn single_feed_hit_flows_through_to_posts() {
    let dir = tempfile::tempdir().unwrap();
    let hit = Story {
        title: Some("OpenClaw automation playbook".to_string()),
        url: Some("https://example.com/a".to_string()),
        points: Some(120),
        num_comments: Some(40),
        ..Story::default()
    };
    let (pipeline, store) = studio(MockSignalSource::new().on_any(vec![hit]), &dir);

    let result = pipeline.generate(Some(2), Some(0)).await.unwrap();

    // One deduplicated topic with the documented score, one Prompt Pack
    // magnet assigned to the first team member.
    assert_eq!(result.viral_topics.len(), 1);
    assert_eq!(result.viral_topics[0].title, "OpenClaw automation playbook");
    assert_eq!(result.viral_topics[0].score, 10.0);
    assert_eq!(result.lead_magnets.len(), 1);
    assert_eq!(result.lead_magnets[0].magnet_type, "Prompt Pack");
    assert_eq!(result.lead_magnets[0].assigned_to, "Ana");

    // One topic available, so each platform yields one post even though
    // two were requested.
    assert_eq!(result.new_posts.len(), 2);
    for post in &result.new_posts {
        assert_eq!(post.based_on_topic_id, Some(result.viral_topics[0].id));
        assert_eq!(
            post.based_on_lead_magnet_id,
            Some(result.lead_magnets[0].id)
        );
        assert!(post.post.contains("OpenClaw automation playbook"));
    }

    // Everything landed in the persisted store.
    assert_eq!(store.list_topics().await.unwrap().len(), 1);
    assert_eq!(store.list_auto_posts(None).await.unwrap().len(), 2);
    assert_eq!(
        store
            .list_auto_posts(Some(Platform::ShortForm))
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn dead_feed_still_yields_a_full_batch() {
    let dir = tempfile::tempdir().unwrap();
    let (pipeline, _) = studio(MockSignalSource::new().failing_by_default(), &dir);

    let result = pipeline.generate(None, Some(0)).await.unwrap();

    // Fallback topics carry the pipeline: 4 topics, 4 magnets, and the
    // default 3 posts per platform.
    assert_eq!(result.viral_topics.len(), 4);
    assert_eq!(result.viral_topics[0].score, 8.0);
    assert_eq!(result.lead_magnets.len(), 4);
    assert_eq!(result.new_posts.len(), 6);
    assert!(result.new_posts.iter().all(|p| !p.post.is_empty()));
}

#[tokio::test]
async fn credential_less_manual_generation_matches_the_brief() {
    let generator = PostGenerator::offline();
    let input = GenerateInput {
        platform: Platform::ShortForm,
        brief: "Ship AI agents faster".to_string(),
        audience: None,
        goal: None,
        call_to_action: None,
        variants: 2,
    };

    let posts = generator.generate_posts(&input, &[]).await;

    assert_eq!(posts.len(), 2);
    assert!(posts[0].hook.ends_with(" (1)"));
    assert!(posts[1].hook.ends_with(" (2)"));
    assert!(posts
        .iter()
        .all(|p| p.post.contains("Ship AI agents faster")));
}
