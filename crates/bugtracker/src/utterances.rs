//! Everything the skill says, in one place. Markup goes through the
//! `Ssml` templating helpers so no handler splices raw strings.

use jira::Issue;
use skill_core::{SpeechOutput, Ssml};

pub fn welcome() -> SpeechOutput {
    SpeechOutput::plain(
        "Welcome to the Bug Tracker. You can ask a question like, what's the number of \
         open tickets for Kafka?... Now, what can I help you with.",
    )
}

pub fn welcome_reprompt() -> SpeechOutput {
    SpeechOutput::plain("For instructions on what you can say, please say help me.")
}

pub fn help() -> SpeechOutput {
    SpeechOutput::plain(
        "You can ask questions about ticket status such as, what's the number of open \
         tickets for Kafka, or, you can say exit... Now, what can I help you with?",
    )
}

pub fn help_reprompt() -> SpeechOutput {
    SpeechOutput::plain(
        "You can say things like, what's the number of open tickets for Kafka, or you \
         can say exit... Now, what can I help you with?",
    )
}

pub fn goodbye() -> SpeechOutput {
    SpeechOutput::plain("Goodbye")
}

/// Required slots were missing or empty.
pub fn not_understood() -> SpeechOutput {
    Ssml::new()
        .text("I'm sorry, I couldn't find the information you were looking for.")
        .into_output()
}

pub fn ticket_lookup_failed(project: &str, number: &str) -> SpeechOutput {
    Ssml::new()
        .text(&format!(
            "I'm sorry, I couldn't find the status for the ticket: {} - ",
            project
        ))
        .digits(number)
        .into_output()
}

pub fn project_lookup_failed(project: &str) -> SpeechOutput {
    Ssml::new()
        .text(&format!(
            "I'm sorry, I couldn't find the status for the project: {}",
            project
        ))
        .into_output()
}

pub fn ticket_not_found(project: &str, number: &str) -> SpeechOutput {
    Ssml::new()
        .text(&format!(
            "I'm sorry, I couldn't find the status for the ticket {} - ",
            project
        ))
        .digits(number)
        .into_output()
}

pub fn ticket_summary(project: &str, number: &str, issue: &Issue) -> SpeechOutput {
    Ssml::new()
        .paragraph(
            Ssml::new()
                .text(&format!("The summary for ticket {} ", project))
                .digits(number)
                .text(" is the following:"),
        )
        .paragraph(field("Description", issue.fields.summary.as_deref()))
        .paragraph(field("Priority", named(&issue.fields.priority)))
        .paragraph(field("Reporter", named(&issue.fields.reporter)))
        .paragraph(field("Type", named(&issue.fields.issue_type)))
        .paragraph(field("Status", named(&issue.fields.status)))
        .into_output()
}

pub fn tickets_found(total: u64) -> SpeechOutput {
    Ssml::new()
        .text("There are")
        .pause_strength("medium")
        .text(&format!("{} tickets found with the specified criteria", total))
        .into_output()
}

pub fn assignee_lookup_failed(
    username: &str,
    project: &str,
    status: Option<&str>,
) -> SpeechOutput {
    let text = match status {
        Some(status) => format!(
            "I'm sorry, I couldn't find tickets related to the user {} and project {} \
             with status {}",
            username, project, status
        ),
        None => format!(
            "I'm sorry, I couldn't find tickets related to the user {} and project {}",
            username, project
        ),
    };
    Ssml::new().text(&text).into_output()
}

fn field(label: &str, value: Option<&str>) -> Ssml {
    Ssml::new()
        .text(&format!("{}:", label))
        .pause_secs(0.5)
        .text(value.unwrap_or("unknown"))
}

fn named(value: &Option<jira::Named>) -> Option<&str> {
    value.as_ref().map(|n| n.name.as_str())
}
