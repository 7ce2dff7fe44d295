//! Error types for `scholia-core`.

use thiserror::Error;
use uuid::Uuid;

/// A draft was rejected before it reached any collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("annotation text must not be empty")]
  EmptyText,

  #[error("annotation is missing a lesson id")]
  MissingLessonId,

  #[error("page numbers start at 1, got {0}")]
  InvalidPageNumber(u32),

  #[error("a note needs a heading/title or some content")]
  EmptyNote,

  #[error("doubt question must not be empty")]
  EmptyQuestion,

  #[error("doubt is missing the student's name")]
  MissingStudentName,

  #[error("answer must not be empty")]
  EmptyAnswer,

  #[error("event title must not be empty")]
  EmptyTitle,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid input: {0}")]
  Validation(#[from] ValidationError),

  #[error("note not found: {0}")]
  NoteNotFound(Uuid),

  #[error("doubt not found: {0}")]
  DoubtNotFound(Uuid),

  #[error(
    "snapshot {key:?} has version {found}; newest supported is {supported}"
  )]
  UnsupportedVersion {
    key:       &'static str,
    found:     u32,
    supported: u32,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
