//! Local persistence.
//!
//! A single JSON key-value store holds the response collection and the
//! theme and language preferences.

pub mod error;
pub mod kv;
pub mod prefs;
pub mod responses;

pub use kv::{FileBackend, Store};
pub use prefs::{Preferences, Theme};
pub use responses::{ResponseBook, SubmitError, RESPONSES_KEY};
