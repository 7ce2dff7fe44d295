//! [`MemoryStorage`], a process-local [`KeyValueStorage`] for tests and
//! throwaway sessions.

use std::{
  collections::HashMap,
  convert::Infallible,
  sync::{Arc, Mutex},
};

use scholia_core::storage::KeyValueStorage;

/// Blobs in a shared `HashMap`. Clones see the same map, which lets a test
/// "reload" by opening a second store over a clone.
#[derive(Clone, Default)]
pub struct MemoryStorage {
  items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
  pub fn new() -> Self { Self::default() }

  /// Raw blob under `key`, bypassing any store.
  pub fn peek(&self, key: &str) -> Option<String> {
    self.lock().get(key).cloned()
  }

  /// Plant a raw blob, e.g. to simulate a corrupt or foreign snapshot.
  pub fn seed(&self, key: &str, value: impl Into<String>) {
    self.lock().insert(key.to_owned(), value.into());
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
    // A poisoned map is still a valid map.
    self.items.lock().unwrap_or_else(|e| e.into_inner())
  }
}

impl KeyValueStorage for MemoryStorage {
  type Error = Infallible;

  async fn get_item(&self, key: &str) -> Result<Option<String>, Infallible> {
    Ok(self.peek(key))
  }

  async fn set_item(&self, key: &str, value: String) -> Result<(), Infallible> {
    self.lock().insert(key.to_owned(), value);
    Ok(())
  }

  async fn remove_item(&self, key: &str) -> Result<(), Infallible> {
    self.lock().remove(key);
    Ok(())
  }
}
