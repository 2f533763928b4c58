//! Deadline resolution and task triage for canvas task cards.
//!
//! Pulls due dates out of structured fields or free text, buckets tactical
//! tasks against a reference day, and turns a chat message into the bucket
//! to report and the cards to highlight. No storage, no model calls.

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod triage;
pub mod types;

pub use engine::TriageEngine;
pub use error::TriageError;
