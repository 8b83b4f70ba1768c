use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Interface version echoed back in every response envelope.
pub const VERSION: &str = "1.0";

/// Inbound event envelope as delivered by the voice platform.
/// Field names must match the platform JSON exactly; unknown fields
/// (user profile, device context, locale) are ignored on parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default = "default_version")]
    pub version: String,
    pub session: SessionEnvelope,
    pub request: Request,
}

fn default_version() -> String {
    VERSION.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEnvelope {
    pub new: bool,
    pub session_id: String,
    pub application: Application,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

/// Request discriminated on the platform's `type` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    LaunchRequest(RequestBody),
    IntentRequest(IntentRequestBody),
    SessionEndedRequest(SessionEndedBody),
}

impl Request {
    /// Stable name of the request kind, for logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Request::LaunchRequest(_) => "LaunchRequest",
            Request::IntentRequest(_) => "IntentRequest",
            Request::SessionEndedRequest(_) => "SessionEndedRequest",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequestBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub intent: Intent,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEndedBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Why the platform ended the session (user exit, error, timeout).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A resolved user request: intent name plus its extracted slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub slots: HashMap<String, Slot>,
}

impl Intent {
    pub fn new(name: impl Into<String>) -> Self {
        Intent { name: name.into(), slots: HashMap::new() }
    }

    pub fn with_slot(mut self, name: impl Into<String>, value: Option<&str>) -> Self {
        let name = name.into();
        self.slots.insert(
            name.clone(),
            Slot { name, value: value.map(|v| v.to_string()) },
        );
        self
    }

    /// Slot value, only when the slot is present *and* non-empty.
    /// An absent slot and a present-but-empty slot both yield None here;
    /// handlers that need to distinguish them can inspect `slots` directly.
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots.get(name).and_then(Slot::filled)
    }
}

/// A named, optionally-filled argument extracted from the utterance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Slot {
    /// Present-but-empty slots count as unfilled.
    pub fn filled(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}

/// Outbound response envelope returned to the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub session_attributes: HashMap<String, Value>,
    pub response: Response,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub output_speech: OutputSpeech,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// Rendered speech, discriminated on `type` the way the platform expects:
/// plain text carries a `text` key, markup carries an `ssml` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

impl ResponseEnvelope {
    pub fn new(response: Response, session_attributes: HashMap<String, Value>) -> Self {
        ResponseEnvelope {
            version: VERSION.to_string(),
            session_attributes,
            response,
        }
    }
}
