//! Annotations: notes and AI responses anchored to a page of a lesson.
//!
//! An annotation is created once, read through page- and lesson-scoped
//! queries, and eventually deleted. It is never edited in place and never
//! moves to another page: the `(lesson_id, page_number)` pair fixed at
//! creation is the annotation's address for its whole life.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::warn;
use uuid::Uuid;

use crate::{ValidationError, snapshot::Snapshot};

// ─── AI actions ──────────────────────────────────────────────────────────────

/// What the AI panel was asked to do with the selected excerpt.
///
/// The `Display`/`FromStr` form is the snake_case wire name shared with the
/// backend (`stick_flow`, `summary`, …).
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AiAction {
  Define,
  Elaborate,
  StickFlow,
  Simple,
  Meaning,
  Example,
  Story,
  Summary,
}

impl AiAction {
  /// Human-facing button label.
  pub fn label(self) -> &'static str {
    match self {
      Self::Define => "Define",
      Self::Elaborate => "Elaborate",
      Self::StickFlow => "Stick Flow",
      Self::Simple => "Simplify",
      Self::Meaning => "Meaning",
      Self::Example => "Example",
      Self::Story => "Story",
      Self::Summary => "Summary",
    }
  }
}

// ─── Geometry ────────────────────────────────────────────────────────────────

/// A point on the rendered page, in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
  pub x: f64,
  pub y: f64,
}

// ─── Body ────────────────────────────────────────────────────────────────────

/// The variant-specific payload. The variant name is the `type` tag in the
/// persisted JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnnotationBody {
  Note { heading: String, content: String },
  Ai { action: AiAction, response: String },
}

/// Discriminant of [`AnnotationBody`], for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
  Note,
  Ai,
}

impl AnnotationBody {
  pub fn kind(&self) -> AnnotationKind {
    match self {
      Self::Note { .. } => AnnotationKind::Note,
      Self::Ai { .. } => AnnotationKind::Ai,
    }
  }
}

// ─── Annotation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
  pub id:          Uuid,
  /// The excerpt the user selected.
  pub text:        String,
  pub lesson_id:   String,
  /// 1-based.
  pub page_number: u32,
  /// `None` means "lay me out on the fallback grid"; see [`crate::layout`].
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub position:    Option<Position>,
  /// Store-assigned creation time; never changes.
  pub timestamp:   DateTime<Utc>,
  #[serde(flatten)]
  pub body:        AnnotationBody,
}

impl Annotation {
  /// Validate `draft` and stamp it with an identity.
  pub fn from_draft(
    draft: NewAnnotation,
    id: Uuid,
    timestamp: DateTime<Utc>,
  ) -> Result<Self, ValidationError> {
    draft.validate()?;
    Ok(Self {
      id,
      text: draft.text,
      lesson_id: draft.lesson_id,
      page_number: draft.page_number,
      position: draft.position,
      timestamp,
      body: draft.body,
    })
  }

  pub fn kind(&self) -> AnnotationKind { self.body.kind() }

  /// The same checks a draft passes on the way in.
  pub fn validate(&self) -> Result<(), ValidationError> {
    check_fields(&self.text, &self.lesson_id, self.page_number, &self.body)
  }

  pub fn is_on(&self, lesson_id: &str, page_number: u32) -> bool {
    self.lesson_id == lesson_id && self.page_number == page_number
  }
}

// ─── NewAnnotation ───────────────────────────────────────────────────────────

/// Input to [`AnnotationBook::add`]. `id` and `timestamp` are always set by
/// the store; they are not accepted from callers.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnnotation {
  pub text:        String,
  pub lesson_id:   String,
  pub page_number: u32,
  pub position:    Option<Position>,
  pub body:        AnnotationBody,
}

impl NewAnnotation {
  /// A manual note on `text`.
  pub fn note(
    lesson_id: impl Into<String>,
    page_number: u32,
    text: impl Into<String>,
    heading: impl Into<String>,
    content: impl Into<String>,
  ) -> Self {
    Self {
      text: text.into(),
      lesson_id: lesson_id.into(),
      page_number,
      position: None,
      body: AnnotationBody::Note {
        heading: heading.into(),
        content: content.into(),
      },
    }
  }

  /// A saved AI response for `action` on `text`.
  pub fn ai(
    lesson_id: impl Into<String>,
    page_number: u32,
    text: impl Into<String>,
    action: AiAction,
    response: impl Into<String>,
  ) -> Self {
    Self {
      text: text.into(),
      lesson_id: lesson_id.into(),
      page_number,
      position: None,
      body: AnnotationBody::Ai { action, response: response.into() },
    }
  }

  pub fn at(mut self, position: Position) -> Self {
    self.position = Some(position);
    self
  }

  pub fn validate(&self) -> Result<(), ValidationError> {
    check_fields(&self.text, &self.lesson_id, self.page_number, &self.body)
  }
}

fn check_fields(
  text: &str,
  lesson_id: &str,
  page_number: u32,
  body: &AnnotationBody,
) -> Result<(), ValidationError> {
  if text.trim().is_empty() {
    return Err(ValidationError::EmptyText);
  }
  if lesson_id.trim().is_empty() {
    return Err(ValidationError::MissingLessonId);
  }
  if page_number == 0 {
    return Err(ValidationError::InvalidPageNumber(page_number));
  }
  if let AnnotationBody::Note { heading, content } = body
    && heading.trim().is_empty()
    && content.trim().is_empty()
  {
    return Err(ValidationError::EmptyNote);
  }
  Ok(())
}

// ─── UI focus ────────────────────────────────────────────────────────────────

/// Which side panel the reader has open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
  Notes,
  Ai,
}

/// Transient focus state. Lives next to the collection but is never
/// persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Focus {
  pub viewing:      Option<Uuid>,
  pub active_panel: Option<Panel>,
}

// ─── AnnotationBook ──────────────────────────────────────────────────────────

/// The authoritative annotation collection for one client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationBook {
  annotations: Vec<Annotation>,
  #[serde(skip)]
  focus:       Focus,
}

impl AnnotationBook {
  pub fn new() -> Self { Self::default() }

  /// Validate `draft`, assign a collection-unique id and the current time,
  /// and append it.
  pub fn add(
    &mut self,
    draft: NewAnnotation,
  ) -> Result<Annotation, ValidationError> {
    let id = unique_id(|id| self.get(id).is_some());
    let annotation = Annotation::from_draft(draft, id, Utc::now())?;
    self.annotations.push(annotation.clone());
    Ok(annotation)
  }

  pub fn get(&self, id: Uuid) -> Option<&Annotation> {
    self.annotations.iter().find(|a| a.id == id)
  }

  /// Every annotation in insertion order.
  pub fn all(&self) -> &[Annotation] { &self.annotations }

  pub fn len(&self) -> usize { self.annotations.len() }

  pub fn is_empty(&self) -> bool { self.annotations.is_empty() }

  /// Annotations on one page of one lesson, in insertion order.
  pub fn by_page(&self, lesson_id: &str, page_number: u32) -> Vec<&Annotation> {
    self
      .annotations
      .iter()
      .filter(|a| a.is_on(lesson_id, page_number))
      .collect()
  }

  /// Annotations anywhere in a lesson, in insertion order.
  pub fn by_lesson(&self, lesson_id: &str) -> Vec<&Annotation> {
    self
      .annotations
      .iter()
      .filter(|a| a.lesson_id == lesson_id)
      .collect()
  }

  /// Remove the annotation with `id`. Absent ids are not an error.
  pub fn delete(&mut self, id: Uuid) -> Option<Annotation> {
    let idx = self.annotations.iter().position(|a| a.id == id)?;
    if self.focus.viewing == Some(id) {
      self.focus.viewing = None;
    }
    Some(self.annotations.remove(idx))
  }

  pub fn focus(&self) -> Focus { self.focus }

  pub fn set_viewing(&mut self, id: Option<Uuid>) { self.focus.viewing = id; }

  pub fn set_active_panel(&mut self, panel: Option<Panel>) {
    self.focus.active_panel = panel;
  }
}

impl Snapshot for AnnotationBook {
  const STORAGE_KEY: &'static str = "annotation-storage";

  /// Drop entries that would not pass validation, and later entries that
  /// reuse an earlier id.
  fn normalize(&mut self) {
    let mut seen = std::collections::HashSet::new();
    self.annotations.retain(|a| {
      if let Err(e) = a.validate() {
        warn!(id = %a.id, error = %e, "dropping invalid stored annotation");
        return false;
      }
      seen.insert(a.id)
    });
  }
}

/// Split a lesson's annotations into `(notes, ai)` keeping order.
pub fn partition_by_kind<'a>(
  annotations: impl IntoIterator<Item = &'a Annotation>,
) -> (Vec<&'a Annotation>, Vec<&'a Annotation>) {
  annotations
    .into_iter()
    .partition(|a| a.kind() == AnnotationKind::Note)
}

/// Draw a time-ordered id that `taken` does not already claim.
pub(crate) fn unique_id(taken: impl Fn(Uuid) -> bool) -> Uuid {
  loop {
    let id = Uuid::now_v7();
    if !taken(id) {
      return id;
    }
  }
}
