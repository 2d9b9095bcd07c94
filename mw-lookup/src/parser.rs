use crate::types::{DictionaryEntry, LookupError, Result};
use serde_json::Value;
use tracing::debug;

/// One step into a JSON document.
#[derive(Debug, Clone, Copy)]
enum Step {
    Key(&'static str),
    Index(usize),
}

/// Pronunciation audio lives in one of two places. The headword pronunciation is
/// listed first and wins when both are present.
const AUDIO_PATHS: &[&[Step]] = &[
    &[
        Step::Key("hwi"),
        Step::Key("prs"),
        Step::Index(0),
        Step::Key("sound"),
        Step::Key("audio"),
    ],
    &[
        Step::Key("uros"),
        Step::Index(0),
        Step::Key("prs"),
        Step::Index(0),
        Step::Key("sound"),
        Step::Key("audio"),
    ],
];

const IMAGE_PATHS: &[&[Step]] = &[&[Step::Key("art"), Step::Key("artid")]];

fn dig<'a>(value: &'a Value, path: &[Step]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, step| match step {
        Step::Key(key) => current.get(*key),
        Step::Index(index) => current.get(*index),
    })
}

/// First candidate path that holds a non-empty string.
fn first_string(value: &Value, candidates: &[&[Step]]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|path| dig(value, path))
        .filter_map(Value::as_str)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parses a collegiate API payload into entries, keeping array order.
pub fn parse_entries(word: &str, payload: &[u8]) -> Result<Vec<DictionaryEntry>> {
    let document: Value =
        serde_json::from_slice(payload).map_err(|e| LookupError::LookupFailure {
            word: word.to_string(),
            reason: format!("malformed JSON: {}", e),
        })?;

    let items = document.as_array().ok_or_else(|| LookupError::LookupFailure {
        word: word.to_string(),
        reason: "response is not a JSON array".to_string(),
    })?;

    // Unknown words come back as a list of spelling suggestions.
    if !items.is_empty() && items.iter().all(Value::is_string) {
        let suggestions: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
        return Err(LookupError::LookupFailure {
            word: word.to_string(),
            reason: format!("no entry found, did you mean: {}", suggestions.join(", ")),
        });
    }

    let entries = items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_entry(word, index, item))
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} entries for '{}'", entries.len(), word);
    Ok(entries)
}

fn parse_entry(word: &str, index: usize, item: &Value) -> Result<DictionaryEntry> {
    let malformed = |reason: &str| LookupError::LookupFailure {
        word: word.to_string(),
        reason: format!("entry {}: {}", index, reason),
    };

    if !item.is_object() {
        return Err(malformed("not a JSON object"));
    }

    let id = dig(item, &[Step::Key("meta"), Step::Key("id")])
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("missing meta.id"))?
        .to_string();

    let short_definitions = match item.get("shortdef") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(defs)) => defs
            .iter()
            .map(|d| d.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| malformed("shortdef holds a non-string value"))?,
        Some(_) => return Err(malformed("shortdef is not an array")),
    };

    Ok(DictionaryEntry {
        id,
        short_definitions,
        audio_id: first_string(item, AUDIO_PATHS),
        image_id: first_string(item, IMAGE_PATHS),
    })
}
