use protocol::RequestEnvelope;
use serde_json::Value;
use std::collections::HashMap;

/// Turn-scoped conversational state.
///
/// Built from the inbound envelope at dispatch entry, mutated only by
/// the handlers of that one dispatch, and rendered back out as
/// `sessionAttributes` when the turn ends. Nothing here survives the
/// turn; cross-invocation persistence is an external concern.
#[derive(Debug, Clone)]
pub struct Session {
    session_id: String,
    is_new: bool,
    attributes: HashMap<String, Value>,
}

impl Session {
    pub fn from_envelope(envelope: &RequestEnvelope) -> Self {
        Session {
            session_id: envelope.session.session_id.clone(),
            is_new: envelope.session.new,
            attributes: envelope.session.attributes.clone(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.attributes.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.attributes.remove(key)
    }

    pub fn into_attributes(self) -> HashMap<String, Value> {
        self.attributes
    }
}
