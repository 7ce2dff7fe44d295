//! Whole-state snapshots and their on-disk envelope.
//!
//! Each store serializes its entire state under one fixed key as
//! `{"state": …, "version": n}`. Blobs written by a newer schema are refused;
//! older ones are read as-is and then normalized.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Error, Result};

/// A state container that is persisted as a single blob.
pub trait Snapshot:
  Clone + Serialize + DeserializeOwned + Default + Send + Sync + 'static
{
  /// Fixed storage key, e.g. `"user-storage"`.
  const STORAGE_KEY: &'static str;

  /// Schema version written into the envelope.
  const VERSION: u32 = 1;

  /// Restore invariants that a hand-edited or older blob may violate.
  fn normalize(&mut self) {}
}

#[derive(Serialize)]
struct Outgoing<'a, T> {
  state:   &'a T,
  version: u32,
}

#[derive(Deserialize)]
struct Incoming<T> {
  state:   T,
  #[serde(default)]
  version: u32,
}

pub fn encode<S: Snapshot>(state: &S) -> Result<String> {
  Ok(serde_json::to_string(&Outgoing { state, version: S::VERSION })?)
}

pub fn decode<S: Snapshot>(raw: &str) -> Result<S> {
  let value: serde_json::Value = serde_json::from_str(raw)?;
  let found = value
    .get("version")
    .and_then(serde_json::Value::as_u64)
    .unwrap_or(0);
  if found > u64::from(S::VERSION) {
    return Err(Error::UnsupportedVersion {
      key:       S::STORAGE_KEY,
      found:     u32::try_from(found).unwrap_or(u32::MAX),
      supported: S::VERSION,
    });
  }

  let Incoming { mut state, .. } = serde_json::from_value::<Incoming<S>>(value)?;
  state.normalize();
  Ok(state)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    annotation::{AiAction, AnnotationBook, NewAnnotation},
    note::{NewNote, NoteBook},
  };

  #[test]
  fn annotations_roundtrip_in_order() {
    let mut book = AnnotationBook::new();
    book.add(NewAnnotation::note("l", 1, "first", "h", "c")).unwrap();
    book
      .add(NewAnnotation::ai("l", 2, "second", AiAction::Summary, "short"))
      .unwrap();

    let raw = encode(&book).unwrap();
    let back: AnnotationBook = decode(&raw).unwrap();
    assert_eq!(back.all(), book.all());
  }

  #[test]
  fn envelope_carries_state_and_version() {
    let mut notes = NoteBook::new();
    notes.add(NewNote::new("t", "c")).unwrap();
    let json: serde_json::Value =
      serde_json::from_str(&encode(&notes).unwrap()).unwrap();
    assert_eq!(json["version"], 1);
    assert_eq!(json["state"]["notes"][0]["title"], "t");
  }

  #[test]
  fn newer_version_is_refused() {
    let raw = r#"{"state":{"notes":[]},"version":7}"#;
    let err = decode::<NoteBook>(raw).unwrap_err();
    assert!(matches!(
      err,
      Error::UnsupportedVersion { key: "notes-storage", found: 7, supported: 1 }
    ));
  }

  #[test]
  fn unversioned_blob_is_accepted() {
    let back: NoteBook = decode(r#"{"state":{"notes":[]}}"#).unwrap();
    assert!(back.is_empty());
  }

  #[test]
  fn garbage_is_a_serialization_error() {
    assert!(matches!(
      decode::<NoteBook>("not json"),
      Err(Error::Serialization(_))
    ));
  }
}
