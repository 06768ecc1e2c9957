use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

/// Stable note identity. Display position is never used to address a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value).ok().map(Self)
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub category: String,
    /// Creation time in epoch milliseconds. Never changed by edits.
    pub timestamp: i64,
}

impl Note {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }

    /// `category • date`, or just the date when there is no category.
    pub fn meta_line(&self) -> String {
        let date = DateTime::from_timestamp_millis(self.timestamp)
            .map(|dt| dt.with_timezone(&Local).format("%x").to_string())
            .unwrap_or_default();
        if self.category.is_empty() {
            date
        } else {
            format!("{} • {}", self.category, date)
        }
    }

    pub(crate) fn matches(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.content.to_lowercase().contains(needle_lower)
            || self.category.to_lowercase().contains(needle_lower)
    }
}

/// Outcome of decoding the persisted note array.
#[derive(Debug, Default)]
pub struct Decoded {
    pub notes: Vec<Note>,
    /// Entries that were not well-formed note objects and had to be coerced.
    pub coerced: usize,
}

/// Decodes persisted notes, coercing anything malformed instead of rejecting it.
///
/// `raw` is whatever the store held under the notes key; `None` and any value
/// that is not a JSON array decode to an empty collection.
pub fn decode_notes(raw: Option<&str>, now: i64) -> Decoded {
    let Some(raw) = raw else {
        return Decoded::default();
    };
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(Value::Null) => return Decoded::default(),
        Ok(other) => {
            warn!(kind = value_kind(&other), "persisted notes are not an array; starting empty");
            return Decoded::default();
        }
        Err(err) => {
            warn!(error = %err, "persisted notes are not valid JSON; starting empty");
            return Decoded::default();
        }
    };

    let mut seen = HashSet::with_capacity(entries.len());
    let mut decoded = Decoded::default();
    for entry in entries {
        let (mut note, well_formed) = coerce_entry(entry, now);
        if !seen.insert(note.id) {
            note.id = NoteId::new();
            seen.insert(note.id);
        }
        if !well_formed {
            decoded.coerced += 1;
        }
        decoded.notes.push(note);
    }
    decoded
}

fn coerce_entry(entry: Value, now: i64) -> (Note, bool) {
    match entry {
        Value::Object(fields) => {
            let title = fields.get("title").map(text_or_empty);
            let content = fields.get("content").map(text_or_empty);
            let category = fields.get("category").map(text_or_empty);
            let timestamp = fields.get("timestamp").and_then(millis);
            let id = fields
                .get("id")
                .and_then(Value::as_str)
                .and_then(NoteId::parse);
            let well_formed = [&title, &content, &category].iter().all(|f| f.is_some())
                && timestamp.is_some()
                && id.is_some();
            let note = Note {
                id: id.unwrap_or_default(),
                title: title.unwrap_or_default(),
                content: content.unwrap_or_default(),
                category: category.unwrap_or_default(),
                timestamp: timestamp.unwrap_or(now),
            };
            (note, well_formed)
        }
        // arrays are objects without note fields
        Value::Array(_) => (blank(String::new(), now), false),
        other => (blank(text_or_empty(&other), now), false),
    }
}

fn blank(content: String, now: i64) -> Note {
    Note {
        id: NoteId::new(),
        title: String::new(),
        content,
        category: String::new(),
        timestamp: now,
    }
}

/// Falsy values become empty text, strings are kept, other scalars stringified.
fn text_or_empty(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn millis(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(ms) = n.as_i64() {
        return (ms != 0).then_some(ms);
    }
    // any non-zero number is kept; truncation comes after the check
    let ms = n.as_f64()?;
    (ms != 0.0).then_some(ms as i64)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn missing_or_garbage_payload_is_empty() {
        assert!(decode_notes(None, NOW).notes.is_empty());
        assert!(decode_notes(Some("not json"), NOW).notes.is_empty());
        assert!(decode_notes(Some("null"), NOW).notes.is_empty());
        assert!(decode_notes(Some(r#"{"title":"x"}"#), NOW).notes.is_empty());
    }

    #[test]
    fn scalar_entries_become_content() {
        let decoded = decode_notes(Some(r#"["buy milk", 42, null, 0, false, true]"#), NOW);
        let contents: Vec<_> = decoded.notes.iter().map(|n| n.content.as_str()).collect();
        assert_eq!(contents, ["buy milk", "42", "", "", "", "true"]);
        assert_eq!(decoded.coerced, 6);
        for note in &decoded.notes {
            assert_eq!(note.title, "");
            assert_eq!(note.category, "");
            assert_eq!(note.timestamp, NOW);
        }
    }

    #[test]
    fn missing_fields_default() {
        let decoded = decode_notes(Some(r#"[{"title":"only title"}, {"timestamp":0}, []]"#), NOW);
        assert_eq!(decoded.notes.len(), 3);
        assert_eq!(decoded.notes[0].title, "only title");
        assert_eq!(decoded.notes[0].content, "");
        assert_eq!(decoded.notes[0].timestamp, NOW);
        assert_eq!(decoded.notes[1].timestamp, NOW);
        assert_eq!(decoded.notes[2].title, "");
    }

    #[test]
    fn fractional_timestamps_are_kept_truncated() {
        let decoded = decode_notes(
            Some(r#"[{"timestamp":0.5}, {"timestamp":1234.9}, {"timestamp":-0.0}]"#),
            NOW,
        );
        let stamps: Vec<_> = decoded.notes.iter().map(|n| n.timestamp).collect();
        assert_eq!(stamps, [0, 1234, NOW]);
    }

    #[test]
    fn well_formed_entries_keep_their_identity() {
        let id = NoteId::new();
        let raw = format!(
            r#"[{{"id":"{id}","title":"t","content":"c","category":"k","timestamp":5}}]"#
        );
        let decoded = decode_notes(Some(&raw), NOW);
        assert_eq!(decoded.coerced, 0);
        assert_eq!(decoded.notes[0].id, id);
        assert_eq!(decoded.notes[0].timestamp, 5);
    }

    #[test]
    fn duplicate_ids_are_reassigned() {
        let id = NoteId::new();
        let raw = format!(
            r#"[{{"id":"{id}","title":"a","content":"","category":"","timestamp":1}},
               {{"id":"{id}","title":"b","content":"","category":"","timestamp":2}}]"#
        );
        let decoded = decode_notes(Some(&raw), NOW);
        assert_eq!(decoded.notes[0].id, id);
        assert_ne!(decoded.notes[1].id, id);
    }

    #[test]
    fn untitled_fallback_and_meta_line() {
        let mut note = blank("body".into(), NOW);
        assert_eq!(note.display_title(), "Untitled");
        assert!(!note.meta_line().contains('•'));
        note.category = "work".into();
        assert!(note.meta_line().starts_with("work • "));
    }
}
