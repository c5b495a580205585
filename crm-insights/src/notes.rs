//! Flattening of raw CRM note payloads into fixed-shape rows.
//!
//! Raw notes are first normalised into dotted column names
//! (`id.note_id`, `created_by_actor.id`, ...) and the columns listed on
//! [`NoteRow`] are then projected out. Everything else is dropped.

use crate::error::{InsightsError, InsightsResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

pub const COMPANIES_OBJECT: &str = "companies";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParentObject {
    Companies,
    Other(String)
}

impl From<String> for ParentObject {
    fn from(value: String) -> Self {
        if value == COMPANIES_OBJECT {
            Self::Companies
        } else {
            Self::Other(value)
        }
    }
}

impl From<ParentObject> for String {
    fn from(value: ParentObject) -> Self {
        match value {
            ParentObject::Companies => COMPANIES_OBJECT.to_string(),
            ParentObject::Other(other) => other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRow {
    pub id: String,
    pub title: Option<String>,
    /// Markdown body, falling back to the plaintext body.
    pub content: String,
    pub created_at: Option<String>,
    pub parent_object: Option<ParentObject>,
    pub parent_record_id: Option<String>,
    pub creator: Option<String>
}

impl NoteRow {
    /// Parent company id when the note hangs off a company record.
    pub fn company_id(&self) -> Option<&str> {
        match self.parent_object {
            Some(ParentObject::Companies) => self
                .parent_record_id
                .as_deref()
                .filter(|id| !id.is_empty()),
            _ => None
        }
    }
}

/// Normalises nested objects into dotted keys. Arrays are kept as leaf values.
pub fn flatten_value(value: &Value) -> BTreeMap<String, Value> {
    let mut columns = BTreeMap::new();
    if let Value::Object(map) = value {
        flatten_into(&mut columns, "", map);
    }
    columns
}

fn flatten_into(columns: &mut BTreeMap<String, Value>, prefix: &str, map: &Map<String, Value>) {
    for (key, value) in map {
        let column = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(inner) if !inner.is_empty() => flatten_into(columns, &column, inner),
            other => {
                columns.insert(column, other.clone());
            }
        }
    }
}

fn text(columns: &BTreeMap<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match columns.get(*key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None
    })
}

/// Projects one raw note into a [`NoteRow`]. Only a missing identifier is fatal.
pub fn flatten_note(raw: &Value) -> InsightsResult<NoteRow> {
    let columns = flatten_value(raw);

    let id = text(&columns, &["id.note_id", "id"])
        .ok_or_else(|| InsightsError::malformed("<unknown>", "note has no identifier"))?;

    Ok(NoteRow {
        id,
        title: text(&columns, &["title"]),
        content: text(&columns, &["content_markdown", "content_plaintext", "content"])
            .unwrap_or_default(),
        created_at: text(&columns, &["created_at"]),
        parent_object: text(&columns, &["parent_object"]).map(ParentObject::from),
        parent_record_id: text(&columns, &["parent_record_id"]),
        creator: text(
            &columns,
            &["created_by_actor.name", "created_by_actor.id", "creator"]
        )
    })
}

/// Flattens a batch, skipping records that cannot be identified.
pub fn flatten_notes(raw: &[Value]) -> Vec<NoteRow> {
    raw.iter()
        .filter_map(|note| match flatten_note(note) {
            Ok(row) => Some(row),
            Err(e) => {
                warn!(error = %e, "Skipping malformed note");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attio_note() -> Value {
        json!({
            "id": { "workspace_id": "ws-1", "note_id": "note-1" },
            "parent_object": "companies",
            "parent_record_id": "comp-1",
            "title": "Kickoff",
            "content_plaintext": "plain body",
            "content_markdown": "**md body**",
            "tags": [],
            "created_by_actor": { "type": "workspace-member", "id": "member-7" },
            "created_at": "2024-01-05T10:00:00.000000000Z"
        })
    }

    #[test]
    fn test_flatten_value_uses_dotted_keys() {
        let columns = flatten_value(&attio_note());
        assert_eq!(columns["id.note_id"], json!("note-1"));
        assert_eq!(columns["created_by_actor.type"], json!("workspace-member"));
        assert_eq!(columns["tags"], json!([]));
        assert!(!columns.contains_key("id"));
    }

    #[test]
    fn test_flatten_attio_note() {
        let row = flatten_note(&attio_note()).unwrap();
        assert_eq!(row.id, "note-1");
        assert_eq!(row.title.as_deref(), Some("Kickoff"));
        assert_eq!(row.content, "**md body**");
        assert_eq!(row.created_at.as_deref(), Some("2024-01-05T10:00:00.000000000Z"));
        assert_eq!(row.parent_object, Some(ParentObject::Companies));
        assert_eq!(row.company_id(), Some("comp-1"));
        assert_eq!(row.creator.as_deref(), Some("member-7"));
    }

    #[test]
    fn test_numeric_id_and_missing_optionals() {
        let row = flatten_note(&json!({ "id": 1, "created_at": "2024-01-05", "extra": { "x": 1 } }))
            .unwrap();
        assert_eq!(row.id, "1");
        assert!(row.title.is_none());
        assert!(row.parent_object.is_none());
        assert_eq!(row.content, "");
        assert_eq!(row.company_id(), None);
    }

    #[test]
    fn test_plaintext_fallback() {
        let row = flatten_note(&json!({ "id": "n", "content_plaintext": "hello" })).unwrap();
        assert_eq!(row.content, "hello");
    }

    #[test]
    fn test_non_company_parent_has_no_company_id() {
        let row = flatten_note(&json!({
            "id": "n",
            "parent_object": "people",
            "parent_record_id": "person-1"
        }))
        .unwrap();
        assert_eq!(row.parent_object, Some(ParentObject::Other("people".to_string())));
        assert_eq!(row.company_id(), None);
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let note = attio_note();
        assert_eq!(flatten_note(&note).unwrap(), flatten_note(&note).unwrap());
    }

    #[test]
    fn test_flatten_notes_skips_unidentified() {
        let rows = flatten_notes(&[json!({ "title": "orphan" }), json!({ "id": "ok" })]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "ok");
    }

    #[test]
    fn test_parent_object_serde() {
        assert_eq!(
            serde_json::to_value(ParentObject::Companies).unwrap(),
            json!("companies")
        );
        let parsed: ParentObject = serde_json::from_value(json!("deals")).unwrap();
        assert_eq!(parsed, ParentObject::Other("deals".to_string()));
    }
}
