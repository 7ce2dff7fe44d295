//! Store traits the front ends talk to.
//!
//! Implemented by `scholia-store` on top of any
//! [`KeyValueStorage`](crate::storage::KeyValueStorage). Every write persists
//! the whole snapshot before returning, so a successful call is durable.
//!
//! All methods return `Send` futures so the traits can be used from a
//! multi-threaded tokio runtime.

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  annotation::{Annotation, Focus, NewAnnotation, Panel},
  doubt::{Doubt, NewDoubt},
  note::{NewNote, Note, NoteUpdate},
  profile::{
    Academics, CalendarEvent, EventKind, PrivacySettings, User, UserState,
  },
};

// ─── Annotations ─────────────────────────────────────────────────────────────

pub trait AnnotationStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Validate and persist a new annotation. `id` and `timestamp` are set by
  /// the store.
  fn add_annotation(
    &self,
    draft: NewAnnotation,
  ) -> impl Future<Output = Result<Annotation, Self::Error>> + Send + '_;

  fn get_annotation(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Annotation>, Self::Error>> + Send + '_;

  /// Annotations on one page, insertion order.
  fn get_annotations_by_page<'a>(
    &'a self,
    lesson_id: &'a str,
    page_number: u32,
  ) -> impl Future<Output = Result<Vec<Annotation>, Self::Error>> + Send + 'a;

  /// Annotations anywhere in a lesson, insertion order.
  fn get_annotations_by_lesson<'a>(
    &'a self,
    lesson_id: &'a str,
  ) -> impl Future<Output = Result<Vec<Annotation>, Self::Error>> + Send + 'a;

  /// Hard-delete. Returns the removed annotation, `None` if it was absent.
  fn delete_annotation(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Annotation>, Self::Error>> + Send + '_;

  // ── UI focus (never persisted) ────────────────────────────────────────

  fn set_viewing_annotation(
    &self,
    id: Option<Uuid>,
  ) -> impl Future<Output = ()> + Send + '_;

  fn set_active_panel(
    &self,
    panel: Option<Panel>,
  ) -> impl Future<Output = ()> + Send + '_;

  fn focus(&self) -> impl Future<Output = Focus> + Send + '_;
}

// ─── Notes ───────────────────────────────────────────────────────────────────

pub trait NoteStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn add_note(
    &self,
    input: NewNote,
  ) -> impl Future<Output = Result<Note, Self::Error>> + Send + '_;

  fn get_note(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Note>, Self::Error>> + Send + '_;

  fn list_notes(
    &self,
  ) -> impl Future<Output = Result<Vec<Note>, Self::Error>> + Send + '_;

  fn update_note(
    &self,
    id: Uuid,
    changes: NoteUpdate,
  ) -> impl Future<Output = Result<Note, Self::Error>> + Send + '_;

  fn delete_note(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Note>, Self::Error>> + Send + '_;

  /// Case-insensitive substring search over title and content.
  fn search_notes<'a>(
    &'a self,
    query: &'a str,
  ) -> impl Future<Output = Result<Vec<Note>, Self::Error>> + Send + 'a;
}

// ─── Doubts ──────────────────────────────────────────────────────────────────

pub trait DoubtStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn add_doubt(
    &self,
    input: NewDoubt,
  ) -> impl Future<Output = Result<Doubt, Self::Error>> + Send + '_;

  fn list_doubts(
    &self,
  ) -> impl Future<Output = Result<Vec<Doubt>, Self::Error>> + Send + '_;

  fn pending_doubts(
    &self,
  ) -> impl Future<Output = Result<Vec<Doubt>, Self::Error>> + Send + '_;

  fn answer_doubt(
    &self,
    id: Uuid,
    answer: String,
  ) -> impl Future<Output = Result<Doubt, Self::Error>> + Send + '_;

  fn delete_doubt(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Doubt>, Self::Error>> + Send + '_;
}

// ─── Profile ─────────────────────────────────────────────────────────────────

pub trait ProfileStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn profile(
    &self,
  ) -> impl Future<Output = Result<UserState, Self::Error>> + Send + '_;

  fn sign_in(
    &self,
    user: User,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Clears the whole profile, not just the session flag.
  fn sign_out(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn set_academics(
    &self,
    academics: Academics,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn set_privacy(
    &self,
    settings: PrivacySettings,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn add_event(
    &self,
    title: String,
    date: NaiveDate,
    kind: EventKind,
  ) -> impl Future<Output = Result<CalendarEvent, Self::Error>> + Send + '_;

  fn remove_event(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<CalendarEvent>, Self::Error>> + Send + '_;

  fn upcoming_events(
    &self,
    from: NaiveDate,
  ) -> impl Future<Output = Result<Vec<CalendarEvent>, Self::Error>> + Send + '_;
}
