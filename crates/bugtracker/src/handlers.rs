use crate::utterances;
use anyhow::Result;
use async_trait::async_trait;
use jira::{build_query, QueryCriteria, QueryExecutor};
use protocol::{Intent, RequestBody};
use serde_json::json;
use skill_core::{IntentHandler, LaunchHandler, ResponseSink, Session};
use std::sync::Arc;
use tracing::warn;

/// Welcome `ask` on launch; the turn stays open.
pub struct WelcomeLaunch;

#[async_trait]
impl LaunchHandler for WelcomeLaunch {
    async fn handle(
        &self,
        _request: &RequestBody,
        _session: &mut Session,
        sink: &mut ResponseSink,
    ) -> Result<()> {
        sink.ask(utterances::welcome(), utterances::welcome_reprompt())?;
        Ok(())
    }
}

pub struct HelpHandler;

#[async_trait]
impl IntentHandler for HelpHandler {
    async fn handle(
        &self,
        _intent: &Intent,
        _session: &mut Session,
        sink: &mut ResponseSink,
    ) -> Result<()> {
        sink.ask(utterances::help(), utterances::help_reprompt())?;
        Ok(())
    }
}

/// Stop and Cancel share this terminal goodbye.
pub struct GoodbyeHandler;

#[async_trait]
impl IntentHandler for GoodbyeHandler {
    async fn handle(
        &self,
        _intent: &Intent,
        _session: &mut Session,
        sink: &mut ResponseSink,
    ) -> Result<()> {
        sink.tell(utterances::goodbye())?;
        Ok(())
    }
}

/// Ticket status lookups: a specific ticket when a number is given, a
/// recently-resolved count when a range is given, the open-ticket count
/// otherwise.
pub struct TicketStatusHandler {
    executor: Arc<dyn QueryExecutor>,
}

impl TicketStatusHandler {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        TicketStatusHandler { executor }
    }
}

#[async_trait]
impl IntentHandler for TicketStatusHandler {
    async fn handle(
        &self,
        intent: &Intent,
        session: &mut Session,
        sink: &mut ResponseSink,
    ) -> Result<()> {
        let Some(project) = intent.slot_value("Project") else {
            sink.tell(utterances::not_understood())?;
            return Ok(());
        };
        let project = project.to_uppercase();
        let ticket_number = intent.slot_value("TicketNumber");

        let mut criteria = QueryCriteria::for_project(&project);
        if let Some(number) = ticket_number {
            criteria = criteria.ticket(number);
        } else if let Some(days) = intent.slot_value("Range") {
            criteria = criteria.range_days(days);
        }

        session.set("lastProject", json!(project.clone()));

        let jql = build_query(&criteria);
        let result = match self.executor.execute(&jql).await {
            Ok(result) => result,
            Err(err) => {
                warn!(%jql, error = %err, "ticket search failed");
                let apology = match ticket_number {
                    Some(number) => utterances::ticket_lookup_failed(&project, number),
                    None => utterances::project_lookup_failed(&project),
                };
                sink.tell(apology)?;
                return Ok(());
            }
        };

        match ticket_number {
            Some(number) => match result.first_issue() {
                Some(issue) => sink.tell(utterances::ticket_summary(&project, number, issue))?,
                None => sink.tell(utterances::ticket_not_found(&project, number))?,
            },
            None => sink.tell(utterances::tickets_found(result.total))?,
        }
        Ok(())
    }
}

/// Per-assignee ticket counts, optionally filtered to an exact status.
pub struct DeveloperStatusHandler {
    executor: Arc<dyn QueryExecutor>,
}

impl DeveloperStatusHandler {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        DeveloperStatusHandler { executor }
    }
}

#[async_trait]
impl IntentHandler for DeveloperStatusHandler {
    async fn handle(
        &self,
        intent: &Intent,
        session: &mut Session,
        sink: &mut ResponseSink,
    ) -> Result<()> {
        let (Some(username), Some(project)) =
            (intent.slot_value("Username"), intent.slot_value("Project"))
        else {
            sink.tell(utterances::not_understood())?;
            return Ok(());
        };
        let project = project.to_uppercase();
        let status = intent.slot_value("Status");

        let mut criteria = QueryCriteria::for_project(&project).assignee(username);
        if let Some(status) = status {
            criteria = criteria.status(status);
        }

        session.set("lastProject", json!(project.clone()));

        let jql = build_query(&criteria);
        match self.executor.execute(&jql).await {
            Ok(result) => sink.tell(utterances::tickets_found(result.total))?,
            Err(err) => {
                warn!(%jql, error = %err, "assignee search failed");
                sink.tell(utterances::assignee_lookup_failed(username, &project, status))?;
            }
        }
        Ok(())
    }
}
