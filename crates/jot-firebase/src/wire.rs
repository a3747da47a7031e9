//! Codec for the Firestore typed-value document representation and the
//! shared Google error-body shape.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use jot_core::{note::RawNoteDocument, timestamp::RawTimestamp};

use crate::error::{Error, Result};

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
  error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
  message: String,
}

/// Extract the provider's message field from an error body, or fall back to
/// a fixed string when the body is not the structured shape.
pub(crate) fn error_message(body: &[u8], fallback: &str) -> String {
  serde_json::from_slice::<ApiErrorBody>(body)
    .map(|b| b.error.message)
    .unwrap_or_else(|_| fallback.to_string())
}

// ─── Documents ───────────────────────────────────────────────────────────────

/// Encode optional title/content as typed Firestore fields; absent fields
/// are omitted entirely (not written as null).
pub(crate) fn encode_fields(title: Option<&str>, content: Option<&str>) -> Value {
  let mut fields = Map::new();
  if let Some(title) = title {
    fields.insert("title".into(), json!({ "stringValue": title }));
  }
  if let Some(content) = content {
    fields.insert("content".into(), json!({ "stringValue": content }));
  }
  Value::Object(fields)
}

/// Decode a Firestore `Document` resource into a raw note.
///
/// The document id is the last segment of the resource name.
pub(crate) fn decode_document(doc: &Value) -> Result<RawNoteDocument> {
  let name = doc
    .get("name")
    .and_then(Value::as_str)
    .ok_or_else(|| Error::Decode("document missing resource name".into()))?;
  let id = name.rsplit('/').next().unwrap_or(name).to_string();

  let empty = Value::Object(Map::new());
  let fields = doc.get("fields").unwrap_or(&empty);
  let string_field = |key: &str| {
    fields
      .get(key)
      .and_then(|f| f.get("stringValue"))
      .and_then(Value::as_str)
      .map(str::to_string)
  };

  Ok(RawNoteDocument {
    id,
    title: string_field("title"),
    content: string_field("content"),
    created_at: decode_timestamp(fields.get("createdAt")),
    updated_at: decode_timestamp(fields.get("updatedAt")),
  })
}

/// Decode a timestamp field into the raw union. Three shapes are recognized;
/// anything else is absent, never guessed at.
pub(crate) fn decode_timestamp(field: Option<&Value>) -> RawTimestamp {
  let Some(field) = field else {
    return RawTimestamp::Absent;
  };

  // The backend's native representation.
  if let Some(ts) = field.get("timestampValue").and_then(Value::as_str) {
    return match ts.parse::<DateTime<Utc>>() {
      Ok(dt) => RawTimestamp::Native(dt),
      Err(_) => RawTimestamp::Absent,
    };
  }

  // Duck-typed `{seconds, nanoseconds}` map, as written by clients that
  // serialized a timestamp object instead of using a server transform.
  if let Some(pair) = field.get("mapValue").and_then(|m| m.get("fields")) {
    let seconds = integer_field(pair, "seconds");
    let nanoseconds = integer_field(pair, "nanoseconds");
    if let (Some(seconds), Some(nanoseconds)) = (seconds, nanoseconds) {
      return RawTimestamp::Structural {
        seconds,
        nanoseconds: nanoseconds as u32,
      };
    }
    return RawTimestamp::Absent;
  }

  // An already-serialized string.
  if let Some(text) = field.get("stringValue").and_then(Value::as_str) {
    return RawTimestamp::Text(text.to_string());
  }

  RawTimestamp::Absent
}

fn integer_field(fields: &Value, key: &str) -> Option<i64> {
  let value = fields.get(key)?;
  // integerValue arrives as a JSON string; doubleValue as a number.
  if let Some(s) = value.get("integerValue").and_then(Value::as_str) {
    return s.parse().ok();
  }
  value.get("doubleValue").and_then(Value::as_f64).map(|f| f as i64)
}

#[cfg(test)]
mod tests {
  use super::*;

  const FALLBACK: &str = "fallback message";

  #[test]
  fn error_message_extracts_the_provider_field() {
    let body = br#"{"error":{"code":400,"message":"EMAIL_EXISTS","status":"INVALID_ARGUMENT"}}"#;
    assert_eq!(error_message(body, FALLBACK), "EMAIL_EXISTS");
  }

  #[test]
  fn error_message_falls_back_on_unstructured_bodies() {
    assert_eq!(error_message(b"<html>502</html>", FALLBACK), FALLBACK);
    assert_eq!(error_message(br#"{"weird":true}"#, FALLBACK), FALLBACK);
  }

  #[test]
  fn encode_skips_absent_fields() {
    let fields = encode_fields(Some("T"), None);
    assert_eq!(fields["title"]["stringValue"], "T");
    assert!(fields.get("content").is_none());
  }

  #[test]
  fn decode_document_maps_fields_and_id() {
    let doc = json!({
      "name": "projects/demo/databases/(default)/documents/users/u1/notes/n1",
      "fields": {
        "title": { "stringValue": "T" },
        "content": { "stringValue": "C" },
        "createdAt": { "timestampValue": "2024-03-01T12:00:00.000Z" },
        "updatedAt": { "timestampValue": "2024-03-01T12:00:00.000Z" }
      }
    });

    let raw = decode_document(&doc).unwrap();
    assert_eq!(raw.id, "n1");
    assert_eq!(raw.title.as_deref(), Some("T"));
    assert_eq!(raw.content.as_deref(), Some("C"));
    assert_eq!(
      raw.created_at.to_iso8601().as_deref(),
      Some("2024-03-01T12:00:00.000Z")
    );
  }

  #[test]
  fn decode_document_without_fields_yields_absent_values() {
    let doc = json!({ "name": "projects/p/databases/(default)/documents/users/u/notes/n2" });
    let raw = decode_document(&doc).unwrap();
    assert_eq!(raw.id, "n2");
    assert!(raw.title.is_none());
    assert_eq!(raw.created_at, RawTimestamp::Absent);
  }

  #[test]
  fn decode_document_requires_a_resource_name() {
    assert!(decode_document(&json!({ "fields": {} })).is_err());
  }

  #[test]
  fn timestamp_structural_shape_is_recognized() {
    let field = json!({
      "mapValue": {
        "fields": {
          "seconds": { "integerValue": "1709294400" },
          "nanoseconds": { "integerValue": "0" }
        }
      }
    });
    let ts = decode_timestamp(Some(&field));
    assert_eq!(
      ts,
      RawTimestamp::Structural { seconds: 1_709_294_400, nanoseconds: 0 }
    );
  }

  #[test]
  fn timestamp_string_shape_passes_through() {
    let field = json!({ "stringValue": "2023-11-05T08:00:00.000Z" });
    assert_eq!(
      decode_timestamp(Some(&field)),
      RawTimestamp::Text("2023-11-05T08:00:00.000Z".into())
    );
  }

  #[test]
  fn timestamp_unrecognized_shapes_are_absent() {
    assert_eq!(decode_timestamp(None), RawTimestamp::Absent);
    assert_eq!(
      decode_timestamp(Some(&json!({ "booleanValue": true }))),
      RawTimestamp::Absent
    );
    assert_eq!(
      decode_timestamp(Some(&json!({ "timestampValue": "not a date" }))),
      RawTimestamp::Absent
    );
    // A map without both components is not a structural timestamp.
    assert_eq!(
      decode_timestamp(Some(&json!({ "mapValue": { "fields": { "seconds": { "integerValue": "1" } } } }))),
      RawTimestamp::Absent
    );
  }
}
