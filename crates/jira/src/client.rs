use crate::config::JiraConfig;
use crate::query::{Jql, SearchResult};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client as Http;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

/// Failures of a query execution. Handlers recover these into an
/// apology utterance; raw transport detail never reaches the end user.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search returned status {0}")]
    Status(u16),
}

/// Abstract query executor the skill handlers depend on. The network
/// round trip behind it is the single suspension point of a dispatch.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, jql: &Jql) -> Result<SearchResult, QueryError>;
}

/// Issue-tracker search client: one POST of `{jql, maxResults}` with
/// basic auth against the configured search endpoint.
#[derive(Clone, Debug)]
pub struct JiraClient {
    http: Http,
    endpoint: String,
    username: String,
    password: String,
    max_results: u32,
}

impl JiraClient {
    pub fn new(config: &JiraConfig) -> Result<Self> {
        Ok(JiraClient {
            http: Http::builder().pool_max_idle_per_host(8).build()?,
            endpoint: config.endpoint.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            max_results: config.max_results,
        })
    }
}

#[async_trait]
impl QueryExecutor for JiraClient {
    async fn execute(&self, jql: &Jql) -> Result<SearchResult, QueryError> {
        debug!(%jql, "executing search");

        let resp = self
            .http
            .post(&self.endpoint)
            .basic_auth(&self.username, Some(&self.password))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&json!({ "jql": jql.as_str(), "maxResults": self.max_results }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "search rejected");
            return Err(QueryError::Status(status.as_u16()));
        }

        let result: SearchResult = resp.json().await?;
        debug!(total = result.total, "search completed");
        Ok(result)
    }
}
