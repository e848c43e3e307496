//! Event ingestion.
//!
//! Resolves where the event table lives, reads it, validates the schema,
//! and filters rows down to one subject group.

mod loader;
mod source;

pub use loader::{RawEvent, load_events};
pub use source::{EventSource, SheetRef};
