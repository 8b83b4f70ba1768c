//! Bug-tracker status skill: answers spoken questions about ticket and
//! assignee status by querying an issue tracker's search API.

pub mod handlers;
pub mod utterances;

use handlers::{
    DeveloperStatusHandler, GoodbyeHandler, HelpHandler, TicketStatusHandler, WelcomeLaunch,
};
use jira::QueryExecutor;
use skill_core::{SkillDefinition, SkillDispatcher};
use std::sync::Arc;

/// Assemble the skill around an injected query executor.
pub fn build_skill(
    application_id: impl Into<String>,
    executor: Arc<dyn QueryExecutor>,
) -> SkillDefinition {
    let goodbye = Arc::new(GoodbyeHandler);
    SkillDefinition::new(application_id, Arc::new(WelcomeLaunch))
        .register_intent("GetTicketStatus", Arc::new(TicketStatusHandler::new(executor.clone())))
        .register_intent("GetDeveloperStatus", Arc::new(DeveloperStatusHandler::new(executor)))
        .register_intent("AMAZON.HelpIntent", Arc::new(HelpHandler))
        .register_intent("AMAZON.StopIntent", goodbye.clone())
        .register_intent("AMAZON.CancelIntent", goodbye)
}

/// Convenience wiring for the hosting runtime: configuration in, a
/// ready dispatcher out.
pub fn build_dispatcher(config: &jira::JiraConfig) -> anyhow::Result<SkillDispatcher> {
    let executor = Arc::new(jira::JiraClient::new(config)?);
    Ok(SkillDispatcher::new(build_skill(config.application_id.clone(), executor)))
}
