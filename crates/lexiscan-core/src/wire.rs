//! Response layouts the analysis service has used over time.
//!
//! Older deployments answer with a flat `definitions` list, current ones with
//! nested `words` entries that carry a per-word lookup status.

use serde::Deserialize;

/// `{ "definitions": [ { "word": ..., "definition": ... } ] }`
#[derive(Debug, Deserialize)]
pub struct FlatEntry {
    pub word: String,
    #[serde(default)]
    pub definition: Option<String>,
}

/// `{ "words": [ { "word": ..., "definition_data": { ... } } ] }`
#[derive(Debug, Deserialize)]
pub struct NestedEntry {
    pub word: String,
    pub definition_data: DefinitionData,
}

#[derive(Debug, Deserialize)]
pub struct DefinitionData {
    pub success: bool,
    #[serde(default)]
    pub meanings: Option<Vec<WireMeaning>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireMeaning {
    #[serde(default)]
    pub part_of_speech: String,
    pub definitions: Vec<String>,
}

#[derive(Debug)]
pub enum WireShape {
    Flat(Vec<FlatEntry>),
    Nested(Vec<NestedEntry>),
    /// Neither list was sent
    Absent,
}

impl WireShape {
    pub fn name(&self) -> &'static str {
        match self {
            WireShape::Flat(_) => "flat",
            WireShape::Nested(_) => "nested",
            WireShape::Absent => "absent",
        }
    }
}
