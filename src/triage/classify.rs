//! Bucket resolved deadlines relative to a reference day.

use chrono::NaiveDate;

use crate::types::{ResolvedDeadline, TaskSummary, TriageResult};

/// Classify resolved deadlines into overdue / today / tomorrow / upcoming.
///
/// `scanned` is the number of tactical tasks examined, including those
/// whose deadline could not be resolved. Buckets keep the order the
/// deadlines were supplied in.
pub fn classify(
    deadlines: &[ResolvedDeadline],
    reference: NaiveDate,
    scanned: usize,
) -> TriageResult {
    let mut overdue = Vec::new();
    let mut today = Vec::new();
    let mut tomorrow = Vec::new();
    let mut upcoming = Vec::new();

    for deadline in deadlines {
        let days_until = (deadline.date - reference).num_days();
        let summary = TaskSummary {
            id: deadline.task_id.clone(),
            label: deadline.label.clone(),
            date: deadline.date,
            confidence: deadline.confidence,
            source: deadline.source,
            days_until,
        };

        match days_until {
            d if d < 0 => overdue.push(summary),
            0 => {
                today.push(summary.clone());
                upcoming.push(summary);
            }
            1 => {
                tomorrow.push(summary.clone());
                upcoming.push(summary);
            }
            _ => upcoming.push(summary),
        }
    }

    let summary = build_summary(
        scanned,
        overdue.len(),
        today.len(),
        tomorrow.len(),
        upcoming.len(),
    );

    TriageResult {
        reference_date: reference,
        scanned,
        overdue,
        today,
        tomorrow,
        upcoming,
        summary,
    }
}

fn build_summary(
    scanned: usize,
    overdue: usize,
    today: usize,
    tomorrow: usize,
    upcoming: usize,
) -> String {
    // today and tomorrow are subsets of upcoming, so this never underflows
    let later = upcoming.saturating_sub(today + tomorrow);

    format!(
        "Scanned {} tactical task{}: {} overdue, {} due today, {} due tomorrow, {} more coming up soon.",
        scanned,
        if scanned == 1 { "" } else { "s" },
        overdue,
        today,
        tomorrow,
        later
    )
}
