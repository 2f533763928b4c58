//! Per-task deadline resolution.
//!
//! Structured data beats inference: the deadline field, then the title,
//! then the notes. Each step down lowers the confidence.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use super::patterns::{resolve_date_with_pattern, resolve_structured};
use crate::types::{DeadlineSource, ResolvedDeadline, Task};

fn re_structured() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Date-only, or the date part of an ISO date-time
    RE.get_or_init(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})(?:[T ].*)?$").unwrap())
}

/// Resolve the deadline for one task, or None if nothing usable is found.
pub fn resolve_deadline(task: &Task, reference: NaiveDate) -> Option<ResolvedDeadline> {
    let resolved = |date, source: DeadlineSource, pattern| ResolvedDeadline {
        task_id: task.id.clone(),
        label: task.display_label().to_string(),
        date,
        confidence: source.confidence(),
        source,
        pattern,
    };

    if let Some(raw) = task.deadline.as_deref() {
        match parse_structured_deadline(raw) {
            Some(date) => return Some(resolved(date, DeadlineSource::Structured, None)),
            None => log::debug!(
                "Task {}: ignoring non-date deadline field {:?}, falling back to text",
                task.id,
                raw
            ),
        }
    }

    let free_text = [
        (task.title.as_deref(), DeadlineSource::Title),
        (task.notes.as_deref(), DeadlineSource::Notes),
    ];

    for (text, source) in free_text {
        let Some(text) = text else { continue };
        if let Some((date, pattern)) = resolve_date_with_pattern(text, reference) {
            return Some(resolved(date, source, Some(pattern)));
        }
    }

    None
}

/// Parse a structured deadline field. ISO dates and date-times come first,
/// then the other year-bearing numeric forms (`2024/06/12`, `06/12/2024`,
/// `06-12-24`). Anything that is not a calendar date (blank, free text,
/// impossible dates) counts as absent.
pub fn parse_structured_deadline(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    re_structured()
        .captures(raw)
        .and_then(|caps| NaiveDate::parse_from_str(caps.get(1)?.as_str(), "%Y-%m-%d").ok())
        .or_else(|| resolve_structured(raw))
}
