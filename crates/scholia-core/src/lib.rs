//! Core types and trait definitions for Scholia's client-local study stores.
//!
//! No HTTP, database or runtime dependencies: state containers here are
//! plain values, and persistence and transport live in `scholia-store` and
//! `scholia-client`.

pub mod annotation;
pub mod doubt;
pub mod error;
pub mod layout;
pub mod note;
pub mod profile;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use error::{Error, Result, ValidationError};
