use lexiscan_types::{AnalysisResult, DEFAULT_DEFINITION, Meaning, WordEntry};
use serde_json::{Map, Value};

use crate::wire::{FlatEntry, NestedEntry, WireShape};

#[derive(Debug, thiserror::Error)]
pub enum InterpretError {
    #[error("Response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response body is not a JSON object")]
    NotAnObject,

    #[error("`error` field is not a string")]
    ErrorField,

    #[error("`{field}` does not match the expected layout: {source}")]
    Shape {
        field: &'static str,
        source: serde_json::Error,
    },

    #[error("Entry {index} has an empty word")]
    EmptyWord { index: usize },
}

/// Turn a 2xx response body into an [`AnalysisResult`].
///
/// A non-empty `error` field takes precedence over everything else in the
/// body. Otherwise the nested `words` layout is preferred over the flat
/// `definitions` layout when both are present.
pub fn interpret(body: &str) -> Result<AnalysisResult, InterpretError> {
    let value: Value = serde_json::from_str(body)?;
    let Value::Object(object) = value else {
        return Err(InterpretError::NotAnObject);
    };

    if let Some(error) = application_error(&object)? {
        return Ok(AnalysisResult::failed(error));
    }

    let shape = detect_shape(object)?;
    tracing::debug!("Detected {} response layout", shape.name());

    let words = match shape {
        WireShape::Flat(entries) => from_flat(entries)?,
        WireShape::Nested(entries) => from_nested(entries)?,
        WireShape::Absent => vec![],
    };

    Ok(AnalysisResult::with_words(words))
}

fn application_error(object: &Map<String, Value>) -> Result<Option<String>, InterpretError> {
    match object.get("error") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(error)) if error.is_empty() => Ok(None),
        Some(Value::String(error)) => Ok(Some(error.clone())),
        Some(_) => Err(InterpretError::ErrorField),
    }
}

fn detect_shape(mut object: Map<String, Value>) -> Result<WireShape, InterpretError> {
    if let Some(words) = object.remove("words").filter(|v| !v.is_null()) {
        let entries = serde_json::from_value(words)
            .map_err(|source| InterpretError::Shape { field: "words", source })?;
        return Ok(WireShape::Nested(entries));
    }

    if let Some(definitions) = object.remove("definitions").filter(|v| !v.is_null()) {
        let entries = serde_json::from_value(definitions).map_err(|source| {
            InterpretError::Shape {
                field: "definitions",
                source,
            }
        })?;
        return Ok(WireShape::Flat(entries));
    }

    Ok(WireShape::Absent)
}

fn from_flat(entries: Vec<FlatEntry>) -> Result<Vec<WordEntry>, InterpretError> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            ensure_word(&entry.word, index)?;

            let definition = entry
                .definition
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| DEFAULT_DEFINITION.to_string());

            // The flat layout has no lookup status; every entry counts as found.
            Ok(WordEntry::found(entry.word, vec![Meaning::new("", vec![definition])]))
        })
        .collect()
}

fn from_nested(entries: Vec<NestedEntry>) -> Result<Vec<WordEntry>, InterpretError> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            ensure_word(&entry.word, index)?;

            let data = entry.definition_data;
            if !data.success {
                return Ok(WordEntry::not_found(entry.word, data.error));
            }

            let meanings = data
                .meanings
                .unwrap_or_default()
                .into_iter()
                .map(|m| Meaning::new(m.part_of_speech, m.definitions))
                .collect();

            Ok(WordEntry::found(entry.word, meanings))
        })
        .collect()
}

fn ensure_word(word: &str, index: usize) -> Result<(), InterpretError> {
    if word.trim().is_empty() {
        return Err(InterpretError::EmptyWord { index });
    }
    Ok(())
}
