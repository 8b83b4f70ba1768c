pub mod client;
pub mod config;
pub mod query;

pub use client::{JiraClient, QueryError, QueryExecutor};
pub use config::JiraConfig;
pub use query::{build_query, Issue, IssueFields, Jql, Named, QueryCriteria, SearchResult};

// Simple in-crate mocks for demo/testing
pub mod mocks {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Always returns a clone of the configured result, recording every
    /// query it saw.
    pub struct FixedExecutor {
        pub result: SearchResult,
        pub seen: Mutex<Vec<String>>,
    }

    impl FixedExecutor {
        pub fn returning(result: SearchResult) -> Self {
            FixedExecutor { result, seen: Mutex::new(Vec::new()) }
        }

        pub fn queries(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl QueryExecutor for FixedExecutor {
        async fn execute(&self, jql: &Jql) -> Result<SearchResult, QueryError> {
            self.seen.lock().unwrap().push(jql.as_str().to_string());
            Ok(self.result.clone())
        }
    }

    /// Fails every query with a remote status error.
    pub struct FailingExecutor;

    #[async_trait]
    impl QueryExecutor for FailingExecutor {
        async fn execute(&self, _jql: &Jql) -> Result<SearchResult, QueryError> {
            Err(QueryError::Status(503))
        }
    }
}
