use lexiscan_types::{DisplayState, Failure, RequestOutcome};

use crate::interpret::interpret;

/// Classify a settled request into the state the renderer should show.
///
/// Transport failures and malformed bodies become a single error; the
/// underlying detail only goes to the log.
pub fn settle(outcome: RequestOutcome) -> DisplayState {
    match outcome {
        RequestOutcome::TransportFailure(failure) => {
            tracing::debug!("Request failed: {}", failure);
            DisplayState::Error(failure)
        }
        RequestOutcome::Delivered { status, body } => match interpret(&body) {
            Ok(result) => {
                tracing::debug!(
                    "Status {} with {} word(s), error: {:?}",
                    status,
                    result.words.len(),
                    result.error
                );
                DisplayState::from(result)
            }
            Err(e) => {
                tracing::warn!("Malformed response (status {}): {}", status, e);
                DisplayState::Error(Failure::Malformed)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delivered(body: &str) -> RequestOutcome {
        RequestOutcome::Delivered {
            status: 200,
            body: body.to_string(),
        }
    }

    #[test]
    fn application_error_is_kept_apart_from_transport() {
        let state = settle(delivered(r#"{ "error": "bad file", "definitions": [ { "word": "x" } ] }"#));
        assert_eq!(state, DisplayState::Error(Failure::Application("bad file".to_string())));

        let state = settle(RequestOutcome::TransportFailure(Failure::Status(500)));
        assert_eq!(state, DisplayState::Error(Failure::Status(500)));
    }

    #[test]
    fn empty_list_is_empty_result() {
        assert_eq!(settle(delivered(r#"{ "words": [] }"#)), DisplayState::EmptyResult);
    }

    #[test]
    fn populated_result_keeps_words() {
        let state = settle(delivered(r#"{ "definitions": [ { "word": "a" }, { "word": "b" } ] }"#));
        let DisplayState::PopulatedResult(words) = state else {
            panic!("expected populated result, got {state:?}");
        };
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].word, "a");
        assert_eq!(words[1].word, "b");
    }

    #[test]
    fn unparseable_body_is_malformed() {
        assert_eq!(settle(delivered("not json")), DisplayState::Error(Failure::Malformed));
        assert_eq!(settle(delivered(r#"{ "words": 3 }"#)), DisplayState::Error(Failure::Malformed));
    }
}
