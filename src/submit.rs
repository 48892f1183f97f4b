use crate::client::{ErrorSink, GroqClient};
use crate::session::Session;
use crate::validation::{validate, ValidationError};
use tracing::debug;

/// How one form submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Inputs failed validation; no request was sent.
    Rejected(ValidationError),
    Solved(String),
    /// The call failed or came back empty. Failures were already reported
    /// to the sink.
    NoSolution,
}

/// Validates the session key and `description`, and only when both pass
/// sends a single completion request for the session's model.
pub async fn submit(
    client: &GroqClient,
    session: &Session,
    description: &str,
    sink: &mut dyn ErrorSink,
) -> Outcome {
    let submission = match validate(&session.credential, description) {
        Ok(submission) => submission,
        Err(err) => {
            debug!(?err, "submission rejected");
            return Outcome::Rejected(err);
        }
    };

    let solution = client
        .request_solution(
            &submission.description,
            &submission.credential,
            session.model.model_id(),
            sink,
        )
        .await;

    match solution.filter(|s| !s.trim().is_empty()) {
        Some(solution) => Outcome::Solved(solution),
        None => Outcome::NoSolution,
    }
}
