use crate::ir::{BracketInput, Match};
use anyhow::Result;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum BracketDocument {
    Wrapped(BracketInput),
    Bare(Vec<Match>),
}

impl From<BracketDocument> for BracketInput {
    fn from(doc: BracketDocument) -> Self {
        match doc {
            BracketDocument::Wrapped(input) => input,
            BracketDocument::Bare(matches) => BracketInput::from(matches),
        }
    }
}

/// Parses a bracket from `{ "matches": [...] }` or a bare match array.
/// Strict JSON is tried first, then JSON5 (comments, trailing commas,
/// unquoted keys).
pub fn parse_bracket(input: &str) -> Result<BracketInput> {
    let trimmed = input.trim_start_matches('\u{feff}');
    if trimmed.trim().is_empty() {
        return Err(anyhow::anyhow!("bracket input is empty"));
    }
    let doc: BracketDocument = match serde_json::from_str(trimmed) {
        Ok(doc) => doc,
        Err(json_err) => json5::from_str(trimmed).map_err(|json5_err| {
            anyhow::anyhow!("invalid bracket input: {json_err} (as JSON5: {json5_err})")
        })?,
    };
    let input = BracketInput::from(doc);
    tracing::debug!(matches = input.len(), "parsed bracket input");
    Ok(input)
}
