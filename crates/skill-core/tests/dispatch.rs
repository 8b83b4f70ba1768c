use protocol::RequestEnvelope;
use serde_json::json;
use skill_core::mocks::{
    AskingLaunch, LifecycleLog, LoggingEndedHook, LoggingIntentHandler, LoggingStartedHook,
    RecordingHandler, SilentHandler,
};
use skill_core::{Action, DispatchError, IntentRouter, SkillDefinition, SkillDispatcher};
use std::sync::atomic::Ordering;
use std::sync::Arc;

const APP_ID: &str = "amzn1.ask.skill.bugtracker";

fn launch() -> Arc<AskingLaunch> {
    Arc::new(AskingLaunch {
        speech: "Welcome to the Bug Tracker.".into(),
        reprompt: "What can I help you with?".into(),
    })
}

fn envelope(app_id: &str, new_session: bool, request: serde_json::Value) -> RequestEnvelope {
    serde_json::from_value(json!({
        "version": "1.0",
        "session": {
            "new": new_session,
            "sessionId": "session-1",
            "application": { "applicationId": app_id }
        },
        "request": request,
    }))
    .unwrap()
}

fn intent_request(name: &str) -> serde_json::Value {
    json!({ "type": "IntentRequest", "intent": { "name": name } })
}

#[tokio::test]
async fn foreign_application_is_rejected_before_any_handler() {
    let (handler, calls) = RecordingHandler::new("hello");
    let skill = SkillDefinition::new(APP_ID, launch()).register_intent("Greet", handler);
    let dispatcher = SkillDispatcher::new(skill);

    let event = envelope("amzn1.ask.skill.other", false, intent_request("Greet"));
    let err = dispatcher.dispatch(&event).await.unwrap_err();

    match err {
        DispatchError::InvalidApplication { received } => {
            assert_eq!(received, "amzn1.ask.skill.other");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_intent_falls_through_to_fallback() {
    let skill = SkillDefinition::new(APP_ID, launch());
    let dispatcher = SkillDispatcher::new(skill);

    let event = envelope(APP_ID, false, intent_request("NotRegistered"));
    let rendered = dispatcher.dispatch(&event).await.unwrap().unwrap();

    // Default fallback ends the turn with an apology, never an error.
    assert!(rendered.response.should_end_session);
    match rendered.response.output_speech {
        protocol::OutputSpeech::PlainText { text } => {
            assert!(text.contains("I'm sorry"), "unexpected fallback text: {text}");
        }
        other => panic!("expected plain text fallback, got {other:?}"),
    }
}

#[tokio::test]
async fn launch_keeps_the_session_open() {
    let dispatcher = SkillDispatcher::new(SkillDefinition::new(APP_ID, launch()));

    let event = envelope(APP_ID, true, json!({ "type": "LaunchRequest" }));
    let rendered = dispatcher.dispatch(&event).await.unwrap().unwrap();

    assert!(!rendered.response.should_end_session);
    assert!(rendered.response.reprompt.is_some());
}

#[tokio::test]
async fn session_started_hook_runs_before_the_intent_handler() {
    let log = Arc::new(LifecycleLog::default());
    let skill = SkillDefinition::new(APP_ID, launch())
        .with_session_started(Arc::new(LoggingStartedHook(log.clone())))
        .register_intent("Greet", Arc::new(LoggingIntentHandler(log.clone())));
    let dispatcher = SkillDispatcher::new(skill);

    // A one-shot invocation: intent request on a brand-new session.
    let event = envelope(APP_ID, true, intent_request("Greet"));
    dispatcher.dispatch(&event).await.unwrap();
    assert_eq!(log.snapshot(), vec!["session_started", "intent:Greet"]);

    // An existing session does not re-fire the hook.
    let event = envelope(APP_ID, false, intent_request("Greet"));
    dispatcher.dispatch(&event).await.unwrap();
    assert_eq!(
        log.snapshot(),
        vec!["session_started", "intent:Greet", "intent:Greet"]
    );
}

#[tokio::test]
async fn session_ended_produces_no_response() {
    let log = Arc::new(LifecycleLog::default());
    let skill = SkillDefinition::new(APP_ID, launch())
        .with_session_ended(Arc::new(LoggingEndedHook(log.clone())));
    let dispatcher = SkillDispatcher::new(skill);

    let event = envelope(
        APP_ID,
        false,
        json!({ "type": "SessionEndedRequest", "reason": "USER_INITIATED" }),
    );
    let rendered = dispatcher.dispatch(&event).await.unwrap();

    assert!(rendered.is_none());
    assert_eq!(log.snapshot(), vec!["session_ended"]);
}

#[tokio::test]
async fn handler_that_never_responds_is_a_defect() {
    let skill = SkillDefinition::new(APP_ID, launch())
        .register_intent("Quiet", Arc::new(SilentHandler));
    let dispatcher = SkillDispatcher::new(skill);

    let event = envelope(APP_ID, false, intent_request("Quiet"));
    let err = dispatcher.dispatch(&event).await.unwrap_err();
    assert!(matches!(err, DispatchError::NoResponse { request: "IntentRequest" }));
}

#[tokio::test]
async fn responding_twice_surfaces_as_a_handler_failure() {
    let skill = SkillDefinition::new(APP_ID, launch())
        .register_intent("Chatty", Arc::new(skill_core::mocks::DoubleTellHandler));
    let dispatcher = SkillDispatcher::new(skill);

    let event = envelope(APP_ID, false, intent_request("Chatty"));
    let err = dispatcher.dispatch(&event).await.unwrap_err();
    match err {
        DispatchError::Handler(source) => {
            assert!(source.to_string().contains("already issued"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn dispatch_is_idempotent_for_side_effect_free_handlers() {
    let (handler, _calls) = RecordingHandler::new("same answer");
    let skill = SkillDefinition::new(APP_ID, launch()).register_intent("Greet", handler);
    let dispatcher = SkillDispatcher::new(skill);

    let event = envelope(APP_ID, false, intent_request("Greet"));
    let first = dispatcher.dispatch(&event).await.unwrap();
    let second = dispatcher.dispatch(&event).await.unwrap();

    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[tokio::test]
async fn duplicate_registration_overwrites() {
    let (first, first_calls) = RecordingHandler::new("first");
    let (second, second_calls) = RecordingHandler::new("second");

    let mut router = IntentRouter::new();
    router.register("Greet", first);
    router.register("Greet", second);
    assert!(router.contains("Greet"));

    let skill = SkillDefinition::new(APP_ID, launch()).with_router(router);
    let dispatcher = SkillDispatcher::new(skill);

    let event = envelope(APP_ID, false, intent_request("Greet"));
    let rendered = dispatcher.dispatch(&event).await.unwrap().unwrap();

    assert_eq!(first_calls.load(Ordering::SeqCst), 0);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    match rendered.response.output_speech {
        protocol::OutputSpeech::PlainText { text } => assert_eq!(text, "second"),
        other => panic!("expected plain text, got {other:?}"),
    }
}

#[tokio::test]
async fn intent_lookup_is_case_sensitive() {
    let (handler, calls) = RecordingHandler::new("hello");
    let skill = SkillDefinition::new(APP_ID, launch()).register_intent("Greet", handler);
    let dispatcher = SkillDispatcher::new(skill);

    let event = envelope(APP_ID, false, intent_request("greet"));
    let rendered = dispatcher.dispatch(&event).await.unwrap().unwrap();

    // Routed to the fallback, not the handler.
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(rendered.response.should_end_session);
}

#[tokio::test]
async fn actions_render_the_expected_envelope() {
    let (handler, _calls) = RecordingHandler::new("There are 3 tickets");
    let skill = SkillDefinition::new(APP_ID, launch()).register_intent("Count", handler);
    let dispatcher = SkillDispatcher::new(skill);

    let event = envelope(APP_ID, false, intent_request("Count"));
    let rendered = dispatcher.dispatch(&event).await.unwrap().unwrap();
    let value = serde_json::to_value(&rendered).unwrap();

    assert_eq!(value["version"], "1.0");
    assert_eq!(value["response"]["outputSpeech"]["type"], "PlainText");
    assert_eq!(value["response"]["shouldEndSession"], true);

    // Tell renders as the Tell action.
    let action = Action::Tell(skill_core::SpeechOutput::plain("There are 3 tickets"));
    let direct = serde_json::to_value(action.render(Default::default())).unwrap();
    assert_eq!(direct["response"], value["response"]);
}
