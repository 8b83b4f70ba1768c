use thiserror::Error;

/// Failures the dispatcher surfaces to its caller.
///
/// `InvalidApplication` is the only condition raised before any handler
/// runs. `NoResponse` and `Handler` are defect classes: handlers are
/// expected to convert their own failures into an utterance before
/// returning, so neither should occur in a correctly written skill.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("event for application {received:?} does not belong to this skill")]
    InvalidApplication { received: String },

    #[error("{request} handler completed without producing a response")]
    NoResponse { request: &'static str },

    #[error("handler failed: {0}")]
    Handler(#[from] anyhow::Error),
}

/// Contract violations on the response sink.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseError {
    #[error("a response was already issued for this turn")]
    AlreadyResponded,
}
