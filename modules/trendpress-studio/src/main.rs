use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ai_client::{OpenAiGenerator, TextGenerator};
use hn_client::HnClient;
use trendpress_common::{Platform, StudioConfig};
use trendpress_studio::auto_content::AutoContent;
use trendpress_studio::discovery::DiscoveryEngine;
use trendpress_studio::generate::{GenerateInput, PostGenerator, MAX_VARIANTS};
use trendpress_studio::store::{ContentStore, JsonFileStore};

#[derive(Parser)]
#[command(name = "trendpress", about = "Content-operations studio: trend discovery and post generation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Refresh the discovery batch (topics + lead magnets) and print it.
    Discover,
    /// Print the current auto-content state without recomputing.
    Feed,
    /// Refresh discovery and auto-generate posts for both platforms.
    Auto {
        /// Posts per platform (clamped to 1-8).
        #[arg(long)]
        count: Option<u32>,
    },
    /// Generate post drafts for one platform from a brief.
    Generate {
        #[arg(long)]
        platform: Platform,
        #[arg(long)]
        brief: String,
        #[arg(long, default_value_t = 1)]
        variants: usize,
        #[arg(long)]
        audience: Option<String>,
        #[arg(long)]
        goal: Option<String>,
        #[arg(long)]
        cta: Option<String>,
    },
    /// Manage the reference post library.
    #[command(subcommand)]
    Library(LibraryCommand),
    /// Manage tracked creator sources.
    #[command(subcommand)]
    Creators(CreatorsCommand),
}

#[derive(Subcommand)]
enum LibraryCommand {
    Add {
        #[arg(long)]
        platform: Platform,
        #[arg(long)]
        text: String,
        #[arg(long)]
        source: Option<String>,
    },
    List {
        #[arg(long)]
        platform: Option<Platform>,
    },
}

#[derive(Subcommand)]
enum CreatorsCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        url: String,
        #[arg(long, default_value = "long-form")]
        platform: Platform,
    },
    List,
}

/// Workspace crates logged at info by default; `RUST_LOG` still overrides.
const LOG_TARGETS: &[&str] = &["trendpress_studio", "trendpress_common", "hn_client", "ai_client"];

fn log_filter() -> Result<EnvFilter> {
    let mut filter = EnvFilter::from_default_env();
    for target in LOG_TARGETS {
        filter = filter.add_directive(format!("{target}=info").parse()?);
    }
    Ok(filter)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(log_filter()?).init();

    let cli = Cli::parse();
    let config = StudioConfig::from_env();

    let store = Arc::new(JsonFileStore::new(config.store_path.clone()));
    let discovery = DiscoveryEngine::new(
        Arc::new(HnClient::new()),
        store.clone(),
        config.assignees(),
    );
    let model: Option<Arc<dyn TextGenerator>> = config
        .openai_api_key
        .as_deref()
        .map(|key| Arc::new(OpenAiGenerator::new(key)) as Arc<dyn TextGenerator>);
    let generator = PostGenerator::new(model);

    match cli.command {
        Command::Discover => {
            let result = discovery.refresh().await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Feed => {
            let pipeline = AutoContent::new(store, discovery, generator);
            let result = pipeline.current().await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Auto { count } => {
            let pipeline = AutoContent::new(store, discovery, generator);
            let result = pipeline.generate(count, None).await?;
            info!(new_posts = result.new_posts.len(), "Generated auto content");
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Generate {
            platform,
            brief,
            variants,
            audience,
            goal,
            cta,
        } => {
            if brief.trim().is_empty() {
                bail!("brief must not be empty");
            }
            let references = store.list_reference_posts(Some(platform)).await?;
            let input = GenerateInput {
                platform,
                brief,
                audience,
                goal,
                call_to_action: cta,
                variants: variants.clamp(1, MAX_VARIANTS),
            };
            let posts = generator.generate_posts(&input, &references).await;
            println!("{}", serde_json::to_string_pretty(&posts)?);
        }
        Command::Library(cmd) => match cmd {
            LibraryCommand::Add {
                platform,
                text,
                source,
            } => {
                if text.trim().is_empty() {
                    bail!("post text must not be empty");
                }
                let post = store
                    .add_reference_post(platform, &text, source.as_deref())
                    .await?;
                println!("{}", serde_json::to_string_pretty(&post)?);
            }
            LibraryCommand::List { platform } => {
                let posts = store.list_reference_posts(platform).await?;
                println!("{}", serde_json::to_string_pretty(&posts)?);
            }
        },
        Command::Creators(cmd) => match cmd {
            CreatorsCommand::Add {
                name,
                url,
                platform,
            } => {
                if name.trim().is_empty() || url.trim().is_empty() {
                    bail!("creator name and url must not be empty");
                }
                let creator = store.add_creator(&name, &url, platform).await?;
                println!("{}", serde_json::to_string_pretty(&creator)?);
            }
            CreatorsCommand::List => {
                let creators = store.list_creators().await?;
                println!("{}", serde_json::to_string_pretty(&creators)?);
            }
        },
    }

    Ok(())
}
