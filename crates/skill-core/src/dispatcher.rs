use crate::error::DispatchError;
use crate::router::IntentRouter;
use crate::session::Session;
use crate::speech::ResponseSink;
use anyhow::Result;
use async_trait::async_trait;
use protocol::{Request, RequestBody, RequestEnvelope, ResponseEnvelope, SessionEndedBody};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Hook invoked for a launch request. Launch behavior is expected to
/// keep the session open with a welcome `ask`.
#[async_trait]
pub trait LaunchHandler: Send + Sync {
    async fn handle(
        &self,
        request: &RequestBody,
        session: &mut Session,
        sink: &mut ResponseSink,
    ) -> Result<()>;
}

/// Hook invoked when the platform reports a fresh session, before the
/// type-specific handler runs. Distinct from launch: an intent request
/// can also arrive on a brand-new session (one-shot invocation).
#[async_trait]
pub trait SessionStartedHook: Send + Sync {
    async fn on_started(&self, session: &mut Session) -> Result<()>;
}

/// Hook invoked when the platform ends the session. No response is
/// rendered for this request type.
#[async_trait]
pub trait SessionEndedHook: Send + Sync {
    async fn on_ended(&self, request: &SessionEndedBody, session: &mut Session) -> Result<()>;
}

/// A skill as a capability set: identity, lifecycle hooks, and the
/// intent registry. Explicitly constructed per instance with injected
/// configuration; there is no process-wide default.
pub struct SkillDefinition {
    application_id: String,
    on_launch: Arc<dyn LaunchHandler>,
    on_session_started: Option<Arc<dyn SessionStartedHook>>,
    on_session_ended: Option<Arc<dyn SessionEndedHook>>,
    router: IntentRouter,
}

impl SkillDefinition {
    pub fn new(application_id: impl Into<String>, on_launch: Arc<dyn LaunchHandler>) -> Self {
        SkillDefinition {
            application_id: application_id.into(),
            on_launch,
            on_session_started: None,
            on_session_ended: None,
            router: IntentRouter::new(),
        }
    }

    pub fn with_router(mut self, router: IntentRouter) -> Self {
        self.router = router;
        self
    }

    pub fn with_session_started(mut self, hook: Arc<dyn SessionStartedHook>) -> Self {
        self.on_session_started = Some(hook);
        self
    }

    pub fn with_session_ended(mut self, hook: Arc<dyn SessionEndedHook>) -> Self {
        self.on_session_ended = Some(hook);
        self
    }

    pub fn register_intent(mut self, name: impl Into<String>, handler: Arc<dyn crate::router::IntentHandler>) -> Self {
        self.router.register(name, handler);
        self
    }
}

/// Single entry point, invoked once per inbound event.
///
/// The definition is read-only after construction, so one dispatcher
/// may serve concurrent dispatches for different events.
pub struct SkillDispatcher {
    skill: SkillDefinition,
}

impl SkillDispatcher {
    pub fn new(skill: SkillDefinition) -> Self {
        SkillDispatcher { skill }
    }

    /// Returns `Ok(None)` only for `SessionEndedRequest`; every other
    /// request type yields exactly one rendered response.
    pub async fn dispatch(
        &self,
        envelope: &RequestEnvelope,
    ) -> Result<Option<ResponseEnvelope>, DispatchError> {
        let received = &envelope.session.application.application_id;
        if received != &self.skill.application_id {
            warn!(application_id = %received, "rejecting event from foreign application");
            return Err(DispatchError::InvalidApplication { received: received.clone() });
        }

        info!(
            session_id = %envelope.session.session_id,
            request = envelope.request.kind(),
            new_session = envelope.session.new,
            "dispatching event"
        );

        let mut session = Session::from_envelope(envelope);
        if session.is_new() {
            if let Some(hook) = &self.skill.on_session_started {
                hook.on_started(&mut session).await?;
            }
        }

        let mut sink = ResponseSink::new();
        match &envelope.request {
            Request::LaunchRequest(body) => {
                self.skill.on_launch.handle(body, &mut session, &mut sink).await?;
            }
            Request::IntentRequest(body) => {
                debug!(intent = %body.intent.name, "routing intent");
                self.skill
                    .router
                    .dispatch(&body.intent, &mut session, &mut sink)
                    .await?;
            }
            Request::SessionEndedRequest(body) => {
                if let Some(hook) = &self.skill.on_session_ended {
                    hook.on_ended(body, &mut session).await?;
                }
                return Ok(None);
            }
        }

        let action = sink
            .into_action()
            .ok_or(DispatchError::NoResponse { request: envelope.request.kind() })?;
        Ok(Some(action.render(session.into_attributes())))
    }
}
