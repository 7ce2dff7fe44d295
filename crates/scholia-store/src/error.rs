//! Error type for `scholia-store`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] scholia_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// The key-value backend behind a [`Persisted`](crate::Persisted) store
  /// failed.
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn storage<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(e))
  }

  /// `true` when the caller's input was rejected, as opposed to the store
  /// failing.
  pub fn is_validation(&self) -> bool {
    matches!(self, Self::Core(scholia_core::Error::Validation(_)))
  }
}

impl From<scholia_core::ValidationError> for Error {
  fn from(e: scholia_core::ValidationError) -> Self {
    Self::Core(e.into())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
