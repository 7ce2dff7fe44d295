//! Free-standing notes, not tied to any lesson page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result, ValidationError, annotation::unique_id, snapshot::Snapshot,
};

/// Where a note came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteSource {
  /// Typed in by the user directly.
  #[default]
  Manual,
  /// Copied out of a page annotation.
  Annotation,
  /// Saved from an AI chat answer.
  AiChat,
  /// Captured while reading a lesson.
  Lesson,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
  pub id:         Uuid,
  pub title:      String,
  pub content:    String,
  #[serde(default)]
  pub source:     NoteSource,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Note {
  /// Case-insensitive substring match over title or content.
  /// `needle` must already be lowercased.
  fn matches(&self, needle: &str) -> bool {
    self.title.to_lowercase().contains(needle)
      || self.content.to_lowercase().contains(needle)
  }
}

/// Input to [`NoteBook::add`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewNote {
  pub title:   String,
  pub content: String,
  pub source:  NoteSource,
}

impl NewNote {
  pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
    Self { title: title.into(), content: content.into(), source: NoteSource::Manual }
  }

  pub fn from_source(mut self, source: NoteSource) -> Self {
    self.source = source;
    self
  }
}

/// Partial edit; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteUpdate {
  pub title:   Option<String>,
  pub content: Option<String>,
}

fn check_not_blank(title: &str, content: &str) -> Result<(), ValidationError> {
  if title.trim().is_empty() && content.trim().is_empty() {
    Err(ValidationError::EmptyNote)
  } else {
    Ok(())
  }
}

// ─── NoteBook ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteBook {
  notes: Vec<Note>,
}

impl NoteBook {
  pub fn new() -> Self { Self::default() }

  pub fn add(&mut self, input: NewNote) -> Result<Note, ValidationError> {
    check_not_blank(&input.title, &input.content)?;
    let now = Utc::now();
    let note = Note {
      id:         unique_id(|id| self.get(id).is_some()),
      title:      input.title,
      content:    input.content,
      source:     input.source,
      created_at: now,
      updated_at: now,
    };
    self.notes.push(note.clone());
    Ok(note)
  }

  pub fn get(&self, id: Uuid) -> Option<&Note> {
    self.notes.iter().find(|n| n.id == id)
  }

  pub fn all(&self) -> &[Note] { &self.notes }

  pub fn len(&self) -> usize { self.notes.len() }

  pub fn is_empty(&self) -> bool { self.notes.is_empty() }

  pub fn by_source(&self, source: NoteSource) -> Vec<&Note> {
    self.notes.iter().filter(|n| n.source == source).collect()
  }

  pub fn update(&mut self, id: Uuid, changes: NoteUpdate) -> Result<Note> {
    let note = self
      .notes
      .iter_mut()
      .find(|n| n.id == id)
      .ok_or(Error::NoteNotFound(id))?;

    let title = changes.title.unwrap_or_else(|| note.title.clone());
    let content = changes.content.unwrap_or_else(|| note.content.clone());
    check_not_blank(&title, &content)?;

    note.title = title;
    note.content = content;
    note.updated_at = Utc::now();
    Ok(note.clone())
  }

  pub fn delete(&mut self, id: Uuid) -> Option<Note> {
    let idx = self.notes.iter().position(|n| n.id == id)?;
    Some(self.notes.remove(idx))
  }

  /// Notes whose title or content contains `query`, ignoring case.
  /// A blank query matches everything.
  pub fn search(&self, query: &str) -> Vec<&Note> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
      return self.notes.iter().collect();
    }
    self.notes.iter().filter(|n| n.matches(&needle)).collect()
  }
}

impl Snapshot for NoteBook {
  const STORAGE_KEY: &'static str = "notes-storage";

  fn normalize(&mut self) {
    let mut seen = std::collections::HashSet::new();
    self.notes.retain(|n| seen.insert(n.id));
  }
}
