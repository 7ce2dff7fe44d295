//! HTTP client for the Scholia learning backend.
//!
//! [`ApiClient`] covers AI annotation actions, retrieval questions, lesson
//! and document management, timed tests and doubt submission. Failures are
//! surfaced as [`ClientError`] with the backend's own message where it sent
//! one. [`Countdown`] drives the clock for a timed test.

mod client;
pub mod error;
mod timer;
pub mod types;

pub use self::{
  client::{ApiClient, ApiConfig},
  error::{ClientError, Result, error_message},
  timer::{Countdown, CountdownEnd, format_remaining},
};
