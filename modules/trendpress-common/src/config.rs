use std::env;
use std::path::PathBuf;

/// Studio configuration loaded from environment variables.
///
/// All generation and discovery logic receives this at construction time —
/// nothing deeper in the engine reads the environment.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// OpenAI API key. When absent, generation uses the deterministic
    /// fallback path and never touches the network.
    pub openai_api_key: Option<String>,

    /// Team members eligible for lead-magnet assignment, in rotation order.
    pub team_members: Vec<String>,

    /// Path of the JSON content store document.
    pub store_path: PathBuf,
}

/// Assignee used when no team members are configured.
pub const DEFAULT_ASSIGNEE: &str = "All Team Members";

impl StudioConfig {
    /// Load configuration from environment variables. Every variable is
    /// optional; a missing key just enables the relevant fallback.
    pub fn from_env() -> Self {
        Self {
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            team_members: parse_team_members(env::var("TEAM_MEMBERS").ok().as_deref()),
            store_path: env::var("STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/trendpress.json")),
        }
    }

    /// Team members with the single-placeholder fallback applied.
    pub fn assignees(&self) -> Vec<String> {
        if self.team_members.is_empty() {
            vec![DEFAULT_ASSIGNEE.to_string()]
        } else {
            self.team_members.clone()
        }
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            team_members: Vec::new(),
            store_path: PathBuf::from("data/trendpress.json"),
        }
    }
}

fn parse_team_members(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_members_parse_and_trim() {
        let members = parse_team_members(Some(" Ana , , Badri,Chen "));
        assert_eq!(members, vec!["Ana", "Badri", "Chen"]);
    }

    #[test]
    fn assignees_fall_back_to_placeholder() {
        let config = StudioConfig::default();
        assert_eq!(config.assignees(), vec![DEFAULT_ASSIGNEE.to_string()]);
    }
}
