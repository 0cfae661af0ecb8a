use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Shown for a flat-shape entry that carries no definition text.
pub const DEFAULT_DEFINITION: &str = "Definition not found.";

/// Shown for a word whose lookup failed without an explanation.
pub const DEFAULT_LOOKUP_ERROR: &str = "Could not find definition";

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A file selection from an input source. `None` means nothing was selected.
    Submit(Option<PathBuf>),
    /// A submission's request finished and was classified
    Settled { seq: u64, state: DisplayState },
    Render(DisplayState),
    /// The input source reached end of stream
    InputClosed,
    Shutdown,
}

/// Normalized analysis result, independent of the wire shape it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub error: Option<String>,
    pub words: Vec<WordEntry>,
}

impl AnalysisResult {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            words: vec![],
        }
    }

    pub fn with_words(words: Vec<WordEntry>) -> Self {
        Self { error: None, words }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub lookup_succeeded: bool,
    pub meanings: Vec<Meaning>,
    pub lookup_error: Option<String>,
}

impl WordEntry {
    pub fn found(word: impl Into<String>, meanings: Vec<Meaning>) -> Self {
        Self {
            word: word.into(),
            lookup_succeeded: true,
            meanings,
            lookup_error: None,
        }
    }

    /// A failed lookup never carries meanings; a missing or blank reason
    /// falls back to [`DEFAULT_LOOKUP_ERROR`].
    pub fn not_found(word: impl Into<String>, error: Option<String>) -> Self {
        let error = error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOOKUP_ERROR.to_string());

        Self {
            word: word.into(),
            lookup_succeeded: false,
            meanings: vec![],
            lookup_error: Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meaning {
    pub part_of_speech: String,
    pub definitions: Vec<String>,
}

impl Meaning {
    pub fn new(part_of_speech: impl Into<String>, definitions: Vec<String>) -> Self {
        Self {
            part_of_speech: part_of_speech.into(),
            definitions,
        }
    }
}

/// User-visible failure taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Failure {
    /// Rejected on the client before any network call
    #[error("{0}")]
    Validation(String),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("{0}")]
    Network(String),

    /// 2xx response whose body carried an `error` field
    #[error("{0}")]
    Application(String),

    #[error("Unexpected response from the analysis service")]
    Malformed,
}

/// What the transport layer produced for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A 2xx response; the body has not been interpreted yet.
    Delivered { status: u16, body: String },
    TransportFailure(Failure),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum DisplayState {
    #[default]
    Idle,
    Processing,
    Error(Failure),
    EmptyResult,
    PopulatedResult(Vec<WordEntry>),
}

impl DisplayState {
    pub fn name(&self) -> &'static str {
        match self {
            DisplayState::Idle => "idle",
            DisplayState::Processing => "processing",
            DisplayState::Error(_) => "error",
            DisplayState::EmptyResult => "empty_result",
            DisplayState::PopulatedResult(_) => "populated_result",
        }
    }

    /// Edges of the display state machine.
    ///
    /// Submitting is allowed from every state. Terminal states are only
    /// reachable from `Processing`. Nothing leads back to `Idle`.
    pub fn can_transition_to(&self, next: &DisplayState) -> bool {
        match next {
            DisplayState::Processing => true,
            DisplayState::Idle => matches!(self, DisplayState::Idle),
            _ => matches!(self, DisplayState::Processing),
        }
    }
}

impl From<AnalysisResult> for DisplayState {
    fn from(result: AnalysisResult) -> Self {
        if let Some(error) = result.error {
            return DisplayState::Error(Failure::Application(error));
        }

        if result.words.is_empty() {
            DisplayState::EmptyResult
        } else {
            DisplayState::PopulatedResult(result.words)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_error_wins_over_words() {
        let result = AnalysisResult {
            error: Some("bad file".to_string()),
            words: vec![WordEntry::found("cat", vec![])],
        };

        assert_eq!(
            DisplayState::from(result),
            DisplayState::Error(Failure::Application("bad file".to_string()))
        );
    }

    #[test]
    fn empty_words_is_not_an_error() {
        let state = DisplayState::from(AnalysisResult::with_words(vec![]));
        assert_eq!(state, DisplayState::EmptyResult);
    }

    #[test]
    fn failed_lookup_uses_default_reason() {
        let entry = WordEntry::not_found("zyx", None);
        assert!(!entry.lookup_succeeded);
        assert!(entry.meanings.is_empty());
        assert_eq!(entry.lookup_error.as_deref(), Some(DEFAULT_LOOKUP_ERROR));

        let blank = WordEntry::not_found("zyx", Some("  ".to_string()));
        assert_eq!(blank.lookup_error.as_deref(), Some(DEFAULT_LOOKUP_ERROR));
    }

    #[test]
    fn state_machine_edges() {
        let populated = DisplayState::PopulatedResult(vec![WordEntry::found("a", vec![])]);
        let error = DisplayState::Error(Failure::Status(500));

        assert!(DisplayState::Idle.can_transition_to(&DisplayState::Processing));
        assert!(DisplayState::Processing.can_transition_to(&populated));
        assert!(DisplayState::Processing.can_transition_to(&DisplayState::EmptyResult));
        assert!(DisplayState::Processing.can_transition_to(&error));
        assert!(populated.can_transition_to(&DisplayState::Processing));
        assert!(error.can_transition_to(&DisplayState::Processing));

        assert!(!DisplayState::Idle.can_transition_to(&populated));
        assert!(!error.can_transition_to(&DisplayState::EmptyResult));
        assert!(!populated.can_transition_to(&DisplayState::Idle));
    }

    #[test]
    fn status_failure_message_mentions_code() {
        let failure = Failure::Status(500);
        assert_eq!(failure.to_string(), "HTTP error! status: 500");
    }

    #[test]
    fn display_state_serializes_with_tag() {
        let json = serde_json::to_value(DisplayState::Error(Failure::Application(
            "bad file".to_string(),
        )))
        .unwrap();

        assert_eq!(json["state"], "error");
        assert_eq!(json["data"]["kind"], "application");
        assert_eq!(json["data"]["detail"], "bad file");
    }
}
