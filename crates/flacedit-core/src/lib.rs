//! Core library for flacedit.
//!
//! Holds the tag model, input validation, configuration, the injectable
//! [`Journal`] used for diagnostics, and the FLAC metadata accessor that
//! wraps `lofty`.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod accessor;
pub mod config;
pub mod error;
pub mod journal;
pub mod tags;
pub mod validate;

pub use accessor::{FlacAccessor, TagStore};
pub use config::Config;
pub use error::{AccessError, AccessResult};
pub use journal::{Journal, LogJournal, MemoryJournal};
pub use tags::{FieldValue, PendingEdits, RawTags, TagSet};
pub use validate::Validator;
