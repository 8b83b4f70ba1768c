use anyhow::{anyhow, Context, Result};

/// Everything the query collaborator needs, injected per skill
/// instance rather than read from a process-wide default.
#[derive(Debug, Clone)]
pub struct JiraConfig {
    /// Application id the dispatcher validates inbound events against.
    pub application_id: String,
    /// Search endpoint, e.g. `https://issues.example.org/rest/api/2/search`.
    pub endpoint: String,
    pub username: String,
    pub password: String,
    pub max_results: u32,
}

const DEFAULT_MAX_RESULTS: u32 = 10;

impl JiraConfig {
    /// Load from the environment, falling back to a `.env` file at or
    /// near the working directory (best-effort, never overrides
    /// variables that are already set).
    pub fn from_env() -> Result<Self> {
        load_dotenv();
        Ok(JiraConfig {
            application_id: require("SKILL_APPLICATION_ID")?,
            endpoint: require("JIRA_ENDPOINT")?,
            username: require("JIRA_USERNAME")?,
            password: require("JIRA_PASSWORD")?,
            max_results: match std::env::var("JIRA_MAX_RESULTS") {
                Ok(raw) => raw
                    .parse()
                    .with_context(|| format!("JIRA_MAX_RESULTS is not a number: {raw}"))?,
                Err(_) => DEFAULT_MAX_RESULTS,
            },
        })
    }
}

fn require(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| anyhow!("{key} not set; export it or add it to .env"))
}

/// Load environment variables from a `.env` file (best-effort).
/// Tries the current directory and two parents, so workspace members
/// can share one file at the repo root.
pub fn load_dotenv() {
    load_env_file_if_present(".env");
    load_env_file_if_present("../.env");
    load_env_file_if_present("../../.env");
}

fn load_env_file_if_present(path: &str) {
    if let Ok(content) = std::fs::read_to_string(path) {
        parse_env_file(&content);
    }
}

fn parse_env_file(content: &str) {
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = parse_key_value(trimmed) {
            set_env_if_unset(key, value);
        }
    }
}

fn parse_key_value(line: &str) -> Option<(String, String)> {
    let mut parts = line.splitn(2, '=');
    let key = parts.next()?.trim();
    let value = parts.next()?.trim().trim_matches('"').trim_matches('\'');
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}

fn set_env_if_unset(key: String, value: String) {
    if std::env::var(&key).is_err() {
        std::env::set_var(key, value);
    }
}
