//! Deadline triage pipeline: text dates → per-task deadlines → buckets →
//! highlights.
//!
//! Everything here is a pure function of its inputs and the reference date.

pub mod classify;
pub mod deadline;
pub mod intent;
pub mod patterns;
pub mod project;

pub use classify::classify;
pub use deadline::resolve_deadline;
pub use intent::route;
pub use patterns::resolve_date;
pub use project::{project, prompt_context};
