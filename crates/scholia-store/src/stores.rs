//! Store-trait implementations for each [`Persisted`] snapshot.

use chrono::NaiveDate;
use scholia_core::{
  annotation::{Annotation, AnnotationBook, Focus, NewAnnotation, Panel},
  doubt::{Doubt, DoubtBoard, NewDoubt},
  note::{NewNote, Note, NoteBook, NoteUpdate},
  profile::{Academics, CalendarEvent, EventKind, PrivacySettings, User, UserState},
  storage::KeyValueStorage,
  store::{AnnotationStore, DoubtStore, NoteStore, ProfileStore},
};
use uuid::Uuid;

use crate::{Error, Persisted, Result};

pub type Annotations<B> = Persisted<AnnotationBook, B>;
pub type Notes<B> = Persisted<NoteBook, B>;
pub type Doubts<B> = Persisted<DoubtBoard, B>;
pub type Profile<B> = Persisted<UserState, B>;

// ─── Annotations ─────────────────────────────────────────────────────────────

impl<B: KeyValueStorage> AnnotationStore for Persisted<AnnotationBook, B> {
  type Error = Error;

  async fn add_annotation(&self, draft: NewAnnotation) -> Result<Annotation> {
    self.try_update(|book| book.add(draft)).await
  }

  async fn get_annotation(&self, id: Uuid) -> Result<Option<Annotation>> {
    Ok(self.read(|book| book.get(id).cloned()).await)
  }

  async fn get_annotations_by_page(
    &self,
    lesson_id: &str,
    page_number: u32,
  ) -> Result<Vec<Annotation>> {
    Ok(
      self
        .read(|book| {
          book.by_page(lesson_id, page_number).into_iter().cloned().collect()
        })
        .await,
    )
  }

  async fn get_annotations_by_lesson(
    &self,
    lesson_id: &str,
  ) -> Result<Vec<Annotation>> {
    Ok(
      self
        .read(|book| book.by_lesson(lesson_id).into_iter().cloned().collect())
        .await,
    )
  }

  async fn delete_annotation(&self, id: Uuid) -> Result<Option<Annotation>> {
    // Deleting an absent id changes nothing, so skip the write.
    if self.read(|book| book.get(id).is_none()).await {
      return Ok(None);
    }
    self.update(|book| book.delete(id)).await
  }

  async fn set_viewing_annotation(&self, id: Option<Uuid>) {
    self.update_ephemeral(|book| book.set_viewing(id)).await
  }

  async fn set_active_panel(&self, panel: Option<Panel>) {
    self.update_ephemeral(|book| book.set_active_panel(panel)).await
  }

  async fn focus(&self) -> Focus { self.read(AnnotationBook::focus).await }
}

// ─── Notes ───────────────────────────────────────────────────────────────────

impl<B: KeyValueStorage> NoteStore for Persisted<NoteBook, B> {
  type Error = Error;

  async fn add_note(&self, input: NewNote) -> Result<Note> {
    self.try_update(|book| book.add(input)).await
  }

  async fn get_note(&self, id: Uuid) -> Result<Option<Note>> {
    Ok(self.read(|book| book.get(id).cloned()).await)
  }

  async fn list_notes(&self) -> Result<Vec<Note>> {
    Ok(self.read(|book| book.all().to_vec()).await)
  }

  async fn update_note(&self, id: Uuid, changes: NoteUpdate) -> Result<Note> {
    self.try_update(|book| book.update(id, changes)).await
  }

  async fn delete_note(&self, id: Uuid) -> Result<Option<Note>> {
    if self.read(|book| book.get(id).is_none()).await {
      return Ok(None);
    }
    self.update(|book| book.delete(id)).await
  }

  async fn search_notes(&self, query: &str) -> Result<Vec<Note>> {
    Ok(
      self
        .read(|book| book.search(query).into_iter().cloned().collect())
        .await,
    )
  }
}

// ─── Doubts ──────────────────────────────────────────────────────────────────

impl<B: KeyValueStorage> DoubtStore for Persisted<DoubtBoard, B> {
  type Error = Error;

  async fn add_doubt(&self, input: NewDoubt) -> Result<Doubt> {
    self.try_update(|board| board.add(input)).await
  }

  async fn list_doubts(&self) -> Result<Vec<Doubt>> {
    Ok(self.read(|board| board.all().to_vec()).await)
  }

  async fn pending_doubts(&self) -> Result<Vec<Doubt>> {
    Ok(
      self
        .read(|board| board.pending().into_iter().cloned().collect())
        .await,
    )
  }

  async fn answer_doubt(&self, id: Uuid, answer: String) -> Result<Doubt> {
    self.try_update(|board| board.answer(id, answer)).await
  }

  async fn delete_doubt(&self, id: Uuid) -> Result<Option<Doubt>> {
    if self.read(|board| board.get(id).is_none()).await {
      return Ok(None);
    }
    self.update(|board| board.delete(id)).await
  }
}

// ─── Profile ─────────────────────────────────────────────────────────────────

impl<B: KeyValueStorage> ProfileStore for Persisted<UserState, B> {
  type Error = Error;

  async fn profile(&self) -> Result<UserState> {
    Ok(self.read(UserState::clone).await)
  }

  async fn sign_in(&self, user: User) -> Result<()> {
    self.update(|state| state.sign_in(user)).await
  }

  async fn sign_out(&self) -> Result<()> { self.reset().await }

  async fn set_academics(&self, academics: Academics) -> Result<()> {
    self.update(|state| state.set_academics(academics)).await
  }

  async fn set_privacy(&self, settings: PrivacySettings) -> Result<()> {
    self.update(|state| state.set_privacy(settings)).await
  }

  async fn add_event(
    &self,
    title: String,
    date: NaiveDate,
    kind: EventKind,
  ) -> Result<CalendarEvent> {
    self.try_update(|state| state.add_event(title, date, kind)).await
  }

  async fn remove_event(&self, id: Uuid) -> Result<Option<CalendarEvent>> {
    if self.read(|state| state.calendar.iter().all(|e| e.id != id)).await {
      return Ok(None);
    }
    self.update(|state| state.remove_event(id)).await
  }

  async fn upcoming_events(&self, from: NaiveDate) -> Result<Vec<CalendarEvent>> {
    Ok(
      self
        .read(|state| state.upcoming(from).into_iter().cloned().collect())
        .await,
    )
  }
}
