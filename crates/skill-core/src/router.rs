use crate::session::Session;
use crate::speech::{ResponseSink, SpeechOutput};
use anyhow::Result;
use async_trait::async_trait;
use protocol::Intent;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A named intent handler. Implementations must issue exactly one
/// `tell` or `ask` on the sink before returning, converting any failure
/// of their own collaborators into an utterance rather than an error.
#[async_trait]
pub trait IntentHandler: Send + Sync {
    async fn handle(
        &self,
        intent: &Intent,
        session: &mut Session,
        sink: &mut ResponseSink,
    ) -> Result<()>;
}

/// Maps intent names to handlers. The registry is fixed at skill
/// construction time; lookups are exact and case-sensitive.
pub struct IntentRouter {
    handlers: HashMap<String, Arc<dyn IntentHandler>>,
    fallback: Arc<dyn IntentHandler>,
}

impl IntentRouter {
    pub fn new() -> Self {
        IntentRouter {
            handlers: HashMap::new(),
            fallback: Arc::new(UnhandledIntent),
        }
    }

    /// Registering the same name twice replaces the earlier handler.
    pub fn register(&mut self, name: impl Into<String>, handler: Arc<dyn IntentHandler>) {
        self.handlers.insert(name.into(), handler);
    }

    /// Replace the default fallback for unrecognized intent names.
    pub fn with_fallback(mut self, handler: Arc<dyn IntentHandler>) -> Self {
        self.fallback = handler;
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// An unrecognized name is an expected runtime occurrence (the
    /// platform grammar can route intents this skill version does not
    /// implement yet), so it falls through to the fallback handler
    /// instead of failing the dispatch.
    pub async fn dispatch(
        &self,
        intent: &Intent,
        session: &mut Session,
        sink: &mut ResponseSink,
    ) -> Result<()> {
        match self.handlers.get(&intent.name) {
            Some(handler) => handler.handle(intent, session, sink).await,
            None => {
                debug!(intent = %intent.name, "no handler registered, using fallback");
                self.fallback.handle(intent, session, sink).await
            }
        }
    }
}

impl Default for IntentRouter {
    fn default() -> Self {
        Self::new()
    }
}

/// Default fallback: a generic apology that ends the turn.
struct UnhandledIntent;

#[async_trait]
impl IntentHandler for UnhandledIntent {
    async fn handle(
        &self,
        _intent: &Intent,
        _session: &mut Session,
        sink: &mut ResponseSink,
    ) -> Result<()> {
        sink.tell(SpeechOutput::plain(
            "I'm sorry, I didn't understand that. For instructions on what you can say, \
             please say help me.",
        ))?;
        Ok(())
    }
}
