//! The `KeyValueStorage` trait: the persistent blob store snapshots live in.
//!
//! Implemented by `scholia-store` (SQLite, in-memory). Mirrors the browser's
//! local storage: string keys, string values, no transactions.

use std::future::Future;

pub trait KeyValueStorage: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the blob under `key`. Returns `None` if nothing was ever written.
  fn get_item<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Replace the blob under `key`.
  fn set_item<'a>(
    &'a self,
    key: &'a str,
    value: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Delete the blob under `key`; a missing key is not an error.
  fn remove_item<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
