//! Timestamp normalization.
//!
//! The document store may hand back a timestamp in several shapes depending
//! on how the document was written: the backend's native timestamp type, a
//! structural `{seconds, nanoseconds}` pair, or an already-serialized string.
//! Each shape gets an explicit conversion arm; anything unrecognized decodes
//! to [`RawTimestamp::Absent`] and propagates as a missing value rather than
//! a guess.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A timestamp as the store backend reported it, before normalization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RawTimestamp {
  /// The backend's native timestamp type.
  Native(DateTime<Utc>),
  /// A duck-typed `{seconds, nanoseconds}` pair.
  Structural { seconds: i64, nanoseconds: u32 },
  /// A pre-serialized string; passed through unchanged.
  Text(String),
  /// Missing or unrecognized.
  #[default]
  Absent,
}

impl RawTimestamp {
  /// Convert to an ISO-8601 string, or `None` for absent/unconvertible
  /// values. `Text` passes through without re-parsing.
  pub fn to_iso8601(&self) -> Option<String> {
    match self {
      Self::Native(dt) => Some(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
      Self::Structural { seconds, nanoseconds } => {
        DateTime::from_timestamp(*seconds, *nanoseconds)
          .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
      }
      Self::Text(s) => Some(s.clone()),
      Self::Absent => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn native_formats_with_millis_and_z() {
    let dt = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap();
    let ts = RawTimestamp::Native(dt);
    assert_eq!(ts.to_iso8601().unwrap(), "2024-03-01T12:30:45.000Z");
  }

  #[test]
  fn structural_converts_through_epoch() {
    let ts = RawTimestamp::Structural { seconds: 1_709_294_400, nanoseconds: 500_000_000 };
    assert_eq!(ts.to_iso8601().unwrap(), "2024-03-01T12:00:00.500Z");
  }

  #[test]
  fn structural_out_of_range_is_absent() {
    let ts = RawTimestamp::Structural { seconds: i64::MAX, nanoseconds: 0 };
    assert_eq!(ts.to_iso8601(), None);
  }

  #[test]
  fn text_passes_through_unchanged() {
    let ts = RawTimestamp::Text("2023-11-05T08:00:00.000Z".into());
    assert_eq!(ts.to_iso8601().unwrap(), "2023-11-05T08:00:00.000Z");
  }

  #[test]
  fn absent_yields_none() {
    assert_eq!(RawTimestamp::Absent.to_iso8601(), None);
  }
}
