pub mod dispatcher;
pub mod error;
pub mod router;
pub mod session;
pub mod speech;
pub mod ssml;

pub use dispatcher::{
    LaunchHandler, SessionEndedHook, SessionStartedHook, SkillDefinition, SkillDispatcher,
};
pub use error::{DispatchError, ResponseError};
pub use router::{IntentHandler, IntentRouter};
pub use session::Session;
pub use speech::{Action, ResponseSink, SpeechOutput};
pub use ssml::Ssml;

// Simple in-crate mocks for demo/testing
pub mod mocks {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use protocol::{Intent, RequestBody, SessionEndedBody};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Counts invocations and tells a fixed utterance.
    pub struct RecordingHandler {
        pub calls: Arc<AtomicUsize>,
        pub speech: String,
    }

    impl RecordingHandler {
        pub fn new(speech: impl Into<String>) -> (Arc<Self>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let handler = Arc::new(RecordingHandler { calls: calls.clone(), speech: speech.into() });
            (handler, calls)
        }
    }

    #[async_trait]
    impl IntentHandler for RecordingHandler {
        async fn handle(
            &self,
            _intent: &Intent,
            _session: &mut Session,
            sink: &mut ResponseSink,
        ) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            sink.tell(SpeechOutput::plain(self.speech.clone()))?;
            Ok(())
        }
    }

    /// Violates the one-response contract by never responding.
    pub struct SilentHandler;

    #[async_trait]
    impl IntentHandler for SilentHandler {
        async fn handle(
            &self,
            _intent: &Intent,
            _session: &mut Session,
            _sink: &mut ResponseSink,
        ) -> Result<()> {
            Ok(())
        }
    }

    /// Reproduces the missing-early-return bug class: issues a terminal
    /// response, then keeps going and tries to respond again.
    pub struct DoubleTellHandler;

    #[async_trait]
    impl IntentHandler for DoubleTellHandler {
        async fn handle(
            &self,
            _intent: &Intent,
            _session: &mut Session,
            sink: &mut ResponseSink,
        ) -> Result<()> {
            sink.tell(SpeechOutput::plain("first"))?;
            sink.tell(SpeechOutput::plain("second"))?;
            Ok(())
        }
    }

    /// Launch hook that keeps the session open with a fixed welcome.
    pub struct AskingLaunch {
        pub speech: String,
        pub reprompt: String,
    }

    #[async_trait]
    impl LaunchHandler for AskingLaunch {
        async fn handle(
            &self,
            _request: &RequestBody,
            _session: &mut Session,
            sink: &mut ResponseSink,
        ) -> Result<()> {
            sink.ask(
                SpeechOutput::plain(self.speech.clone()),
                SpeechOutput::plain(self.reprompt.clone()),
            )?;
            Ok(())
        }
    }

    /// Records lifecycle hook invocations in order.
    #[derive(Default)]
    pub struct LifecycleLog {
        pub events: Mutex<Vec<String>>,
    }

    impl LifecycleLog {
        pub fn push(&self, event: &str) {
            self.events.lock().unwrap().push(event.to_string());
        }

        pub fn snapshot(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    pub struct LoggingStartedHook(pub Arc<LifecycleLog>);

    #[async_trait]
    impl SessionStartedHook for LoggingStartedHook {
        async fn on_started(&self, _session: &mut Session) -> Result<()> {
            self.0.push("session_started");
            Ok(())
        }
    }

    pub struct LoggingEndedHook(pub Arc<LifecycleLog>);

    #[async_trait]
    impl SessionEndedHook for LoggingEndedHook {
        async fn on_ended(&self, _request: &SessionEndedBody, _session: &mut Session) -> Result<()> {
            self.0.push("session_ended");
            Ok(())
        }
    }

    /// Intent handler that records its invocation into a lifecycle log
    /// before telling, for ordering assertions.
    pub struct LoggingIntentHandler(pub Arc<LifecycleLog>);

    #[async_trait]
    impl IntentHandler for LoggingIntentHandler {
        async fn handle(
            &self,
            intent: &Intent,
            _session: &mut Session,
            sink: &mut ResponseSink,
        ) -> Result<()> {
            self.0.push(&format!("intent:{}", intent.name));
            sink.tell(SpeechOutput::plain("ok"))?;
            Ok(())
        }
    }
}
