use crate::error::ResponseError;
use protocol::{OutputSpeech, Reprompt, Response, ResponseEnvelope};
use serde_json::Value;
use std::collections::HashMap;

/// Speech a handler wants spoken, before protocol rendering.
/// Markup fragments are opaque payload here; the `<speak>` root element
/// is added exactly once at the rendering boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechOutput {
    Plain(String),
    Ssml(String),
}

impl SpeechOutput {
    pub fn plain(text: impl Into<String>) -> Self {
        SpeechOutput::Plain(text.into())
    }

    pub fn ssml(fragment: impl Into<String>) -> Self {
        SpeechOutput::Ssml(fragment.into())
    }

    fn render(self) -> OutputSpeech {
        match self {
            SpeechOutput::Plain(text) => OutputSpeech::PlainText { text },
            SpeechOutput::Ssml(fragment) => OutputSpeech::Ssml { ssml: wrap_speak(fragment) },
        }
    }
}

fn wrap_speak(fragment: String) -> String {
    if fragment.trim_start().starts_with("<speak>") {
        fragment
    } else {
        format!("<speak>{}</speak>", fragment)
    }
}

/// Exactly one terminal decision per turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Speak and end the session.
    Tell(SpeechOutput),
    /// Speak, keep listening, and reprompt if the user stays silent.
    Ask {
        speech: SpeechOutput,
        reprompt: SpeechOutput,
    },
}

impl Action {
    pub fn render(self, session_attributes: HashMap<String, Value>) -> ResponseEnvelope {
        let response = match self {
            Action::Tell(speech) => Response {
                output_speech: speech.render(),
                reprompt: None,
                should_end_session: true,
            },
            Action::Ask { speech, reprompt } => Response {
                output_speech: speech.render(),
                reprompt: Some(Reprompt { output_speech: reprompt.render() }),
                should_end_session: false,
            },
        };
        ResponseEnvelope::new(response, session_attributes)
    }
}

/// Collects the single Action a handler is allowed to produce.
///
/// A second `tell` or `ask` after a response has been issued is a
/// handler bug (typically a missing early return after a validation
/// failure) and fails fast instead of silently overwriting the turn.
#[derive(Debug, Default)]
pub struct ResponseSink {
    action: Option<Action>,
}

impl ResponseSink {
    pub fn new() -> Self {
        ResponseSink { action: None }
    }

    pub fn tell(&mut self, speech: SpeechOutput) -> Result<(), ResponseError> {
        self.put(Action::Tell(speech))
    }

    pub fn ask(
        &mut self,
        speech: SpeechOutput,
        reprompt: SpeechOutput,
    ) -> Result<(), ResponseError> {
        self.put(Action::Ask { speech, reprompt })
    }

    fn put(&mut self, action: Action) -> Result<(), ResponseError> {
        if self.action.is_some() {
            return Err(ResponseError::AlreadyResponded);
        }
        self.action = Some(action);
        Ok(())
    }

    pub fn into_action(self) -> Option<Action> {
        self.action
    }
}
