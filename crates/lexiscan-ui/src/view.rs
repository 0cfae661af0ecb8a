use lexiscan_types::{DisplayState, Failure, Meaning, WordEntry};

pub const PROCESSING_TITLE: &str = "Processing...";
pub const PROCESSING_TEXT: &str = "Detecting and analyzing underlined words...";
pub const ERROR_TITLE: &str = "Error";
pub const RESULTS_TITLE: &str = "Detected Words and Definitions:";
pub const NO_WORDS_TEXT: &str = "No underlined words were detected in the image.";
pub const NO_WORDS_HINT: &str =
    "Try uploading a different image or make sure the words are clearly underlined.";

/// Output-independent layout of one display state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Text { tone: Tone, text: String },
    /// Ordered list
    List(Vec<String>),
    Group { kind: GroupKind, children: Vec<Block> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    /// Part-of-speech label
    Label,
    Notice,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    WordList,
    Word,
    Meaning,
}

pub fn build_view(state: &DisplayState) -> Vec<Block> {
    match state {
        DisplayState::Idle => vec![],
        DisplayState::Processing => vec![
            heading(2, PROCESSING_TITLE),
            text(Tone::Plain, PROCESSING_TEXT),
        ],
        DisplayState::Error(failure) => vec![
            heading(2, ERROR_TITLE),
            text(Tone::Error, error_text(failure)),
        ],
        DisplayState::EmptyResult => vec![
            heading(2, RESULTS_TITLE),
            text(Tone::Notice, NO_WORDS_TEXT),
            text(Tone::Plain, NO_WORDS_HINT),
        ],
        DisplayState::PopulatedResult(words) => vec![
            heading(2, RESULTS_TITLE),
            Block::Group {
                kind: GroupKind::WordList,
                children: words.iter().map(word_block).collect(),
            },
        ],
    }
}

/// Application and validation messages are shown as-is; everything else is
/// wrapped in the generic processing error.
pub fn error_text(failure: &Failure) -> String {
    match failure {
        Failure::Application(_) | Failure::Validation(_) => failure.to_string(),
        _ => format!("An error occurred while processing your image: {failure}"),
    }
}

fn word_block(entry: &WordEntry) -> Block {
    let mut children = vec![heading(3, &entry.word)];

    if entry.lookup_succeeded {
        children.extend(entry.meanings.iter().map(meaning_block));
    } else {
        let reason = entry
            .lookup_error
            .as_deref()
            .unwrap_or(lexiscan_types::DEFAULT_LOOKUP_ERROR);
        children.push(text(Tone::Error, reason));
    }

    Block::Group {
        kind: GroupKind::Word,
        children,
    }
}

fn meaning_block(meaning: &Meaning) -> Block {
    Block::Group {
        kind: GroupKind::Meaning,
        children: vec![
            text(Tone::Label, &meaning.part_of_speech),
            Block::List(meaning.definitions.clone()),
        ],
    }
}

fn heading(level: u8, text: impl Into<String>) -> Block {
    Block::Heading {
        level,
        text: text.into(),
    }
}

fn text(tone: Tone, text: impl Into<String>) -> Block {
    Block::Text {
        tone,
        text: text.into(),
    }
}
