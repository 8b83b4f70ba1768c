use serde::{Deserialize, Serialize};
use std::fmt;

/// A rendered JQL query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jql(String);

impl Jql {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Jql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Structured search criteria extracted from intent slots.
#[derive(Debug, Clone, Default)]
pub struct QueryCriteria {
    pub project: String,
    pub ticket_number: Option<String>,
    pub assignee: Option<String>,
    pub status: Option<String>,
    pub range_days: Option<String>,
}

impl QueryCriteria {
    pub fn for_project(project: &str) -> Self {
        QueryCriteria { project: project.to_string(), ..Default::default() }
    }

    pub fn ticket(mut self, number: &str) -> Self {
        self.ticket_number = Some(number.to_string());
        self
    }

    pub fn assignee(mut self, username: &str) -> Self {
        self.assignee = Some(username.to_string());
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn range_days(mut self, days: &str) -> Self {
        self.range_days = Some(days.to_string());
        self
    }
}

const OPEN_STATUSES: &str = "status in (Open, \"In Progress\", Reopened)";

/// Render criteria into JQL.
///
/// Precedence: a ticket number makes the query key-exact and ignores
/// everything else; otherwise an assignee scopes the search to that
/// user (with an exact status filter when one is given); otherwise a
/// range restricts by resolution date relative to today; otherwise the
/// query is the project-wide open-ticket search.
pub fn build_query(criteria: &QueryCriteria) -> Jql {
    let project = criteria.project.to_uppercase();

    if let Some(number) = &criteria.ticket_number {
        return Jql(format!("key={}-{}", project, number));
    }

    if let Some(assignee) = &criteria.assignee {
        return match &criteria.status {
            Some(status) => Jql(format!(
                "project={} AND status = '{}' AND assignee = '{}'",
                project, status, assignee
            )),
            None => Jql(format!(
                "project={} AND {} AND assignee = '{}' ORDER BY created DESC",
                project, OPEN_STATUSES, assignee
            )),
        };
    }

    if let Some(days) = &criteria.range_days {
        return Jql(format!(
            "project={} AND resolutiondate >= startOfDay(-{})",
            project, days
        ));
    }

    Jql(format!("project={} AND {} ORDER BY created DESC", project, OPEN_STATUSES))
}

/// Search response body, reduced to the fields the skill speaks about.
/// `issues` may be empty even when `total` is nonzero (pagination), and
/// individual fields may be absent on restricted projects, so every
/// consumer goes through `Option` accessors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub total: u64,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl SearchResult {
    pub fn empty() -> Self {
        SearchResult { total: 0, issues: Vec::new() }
    }

    pub fn first_issue(&self) -> Option<&Issue> {
        self.issues.first()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub priority: Option<Named>,
    #[serde(default)]
    pub reporter: Option<Named>,
    #[serde(default, rename = "issuetype")]
    pub issue_type: Option<Named>,
    #[serde(default)]
    pub status: Option<Named>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Named {
    pub name: String,
}
