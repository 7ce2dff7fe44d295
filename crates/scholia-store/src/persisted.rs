//! [`Persisted`], a snapshot-backed state container.

use scholia_core::{
  snapshot::{self, Snapshot},
  storage::KeyValueStorage,
};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{Error, Result};

/// Owns one store's state and mirrors it into a [`KeyValueStorage`].
///
/// The state is rehydrated once in [`Persisted::open`]. Every mutation runs
/// under the lock and rewrites the whole snapshot before the lock is
/// released, so concurrent writers are serialized and the stored blob always
/// matches some state the process actually held.
pub struct Persisted<S, B> {
  state:   Mutex<S>,
  backend: B,
}

impl<S: Snapshot, B: KeyValueStorage> Persisted<S, B> {
  /// Load the snapshot under `S::STORAGE_KEY`, or start from defaults.
  ///
  /// An unreadable blob is discarded with a warning and overwritten on the
  /// next mutation. A blob written by a newer schema is an error: silently
  /// replacing it would lose data.
  pub async fn open(backend: B) -> Result<Self> {
    let raw = backend
      .get_item(S::STORAGE_KEY)
      .await
      .map_err(Error::storage)?;

    let state = match raw {
      None => S::default(),
      Some(raw) => match snapshot::decode::<S>(&raw) {
        Ok(state) => state,
        Err(e @ scholia_core::Error::UnsupportedVersion { .. }) => {
          return Err(e.into());
        }
        Err(e) => {
          warn!(key = S::STORAGE_KEY, error = %e, "discarding unreadable snapshot");
          S::default()
        }
      },
    };

    debug!(key = S::STORAGE_KEY, "store opened");
    Ok(Self { state: Mutex::new(state), backend })
  }

  /// Run `f` against the current state.
  pub async fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
    let state = self.state.lock().await;
    f(&*state)
  }

  /// Apply `f` to a copy of the state and persist it. The copy replaces the
  /// live state only once the write has succeeded, so a failed write leaves
  /// both memory and storage as they were.
  pub async fn update<R>(&self, f: impl FnOnce(&mut S) -> R) -> Result<R> {
    let mut state = self.state.lock().await;
    let mut next = (*state).clone();
    let out = f(&mut next);
    self.flush(&next).await?;
    *state = next;
    Ok(out)
  }

  /// Like [`update`](Self::update) but only persists when `f` succeeds.
  pub async fn try_update<R, E>(
    &self,
    f: impl FnOnce(&mut S) -> Result<R, E>,
  ) -> Result<R>
  where
    E: Into<Error>,
  {
    let mut state = self.state.lock().await;
    let mut next = (*state).clone();
    let out = f(&mut next).map_err(Into::<Error>::into)?;
    self.flush(&next).await?;
    *state = next;
    Ok(out)
  }

  /// Mutate without persisting. For transient UI state only.
  pub async fn update_ephemeral<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
    let mut state = self.state.lock().await;
    f(&mut *state)
  }

  /// Restore defaults and drop the stored blob.
  pub async fn reset(&self) -> Result<()> {
    let mut state = self.state.lock().await;
    self
      .backend
      .remove_item(S::STORAGE_KEY)
      .await
      .map_err(Error::storage)?;
    *state = S::default();
    Ok(())
  }

  async fn flush(&self, state: &S) -> Result<()> {
    let raw = snapshot::encode(state)?;
    debug!(key = S::STORAGE_KEY, bytes = raw.len(), "writing snapshot");
    self
      .backend
      .set_item(S::STORAGE_KEY, raw)
      .await
      .map_err(Error::storage)
  }
}
