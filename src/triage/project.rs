//! Turn a triage result into canvas highlights and prompt context.

use std::collections::HashSet;

use serde_json::{json, Value};

use crate::types::{HighlightColor, HighlightDirective, Intent, TaskSummary, TriageResult};

/// Build the highlight directive for an intent. `Intent::None` highlights nothing.
pub fn project(intent: Intent, result: &TriageResult) -> Option<HighlightDirective> {
    let (buckets, color): (Vec<&[TaskSummary]>, HighlightColor) = match intent {
        Intent::Overdue => (vec![result.overdue.as_slice()], HighlightColor::Red),
        Intent::Today => (vec![result.today.as_slice()], HighlightColor::Yellow),
        Intent::Tomorrow => (vec![result.tomorrow.as_slice()], HighlightColor::Blue),
        Intent::Upcoming => (vec![result.upcoming.as_slice()], HighlightColor::Blue),
        Intent::All => (
            vec![
                result.overdue.as_slice(),
                result.today.as_slice(),
                result.tomorrow.as_slice(),
                result.upcoming.as_slice(),
            ],
            HighlightColor::Multi,
        ),
        Intent::None => return None,
    };

    // First-seen order; today/tomorrow entries reappear in upcoming
    let mut seen = HashSet::new();
    let task_ids = buckets
        .into_iter()
        .flatten()
        .filter(|s| seen.insert(s.id.as_str()))
        .map(|s| s.id.clone())
        .collect();

    Some(HighlightDirective { task_ids, color })
}

/// Serialize to a JSON object for the conversational layer.
pub fn to_value(result: &TriageResult, intent: Intent) -> Value {
    json!({
        "intent": intent,
        "referenceDate": result.reference_date,
        "scanned": result.scanned,
        "summary": result.summary,
        "overdue": result.overdue,
        "today": result.today,
        "tomorrow": result.tomorrow,
        "upcoming": result.upcoming,
    })
}

/// Context block appended to the chat prompt so the model can narrate the scan.
pub fn prompt_context(result: &TriageResult, intent: Intent) -> String {
    format!(
        "DEADLINE SCAN (reference date {}, requested: {})\n{}\n```json\n{:#}\n```",
        result.reference_date,
        intent,
        result.summary,
        to_value(result, intent)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::classify::classify;
    use crate::types::{DeadlineSource, ResolvedDeadline};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample() -> TriageResult {
        let deadline = |id: &str, date| ResolvedDeadline {
            task_id: id.to_string(),
            label: id.to_string(),
            date,
            confidence: 0.8,
            source: DeadlineSource::Title,
            pattern: None,
        };
        classify(
            &[
                deadline("t1", d(2024, 1, 1)),
                deadline("t2", d(2024, 1, 2)),
                deadline("t3", d(2023, 12, 1)),
                deadline("t4", d(2024, 2, 1)),
            ],
            d(2024, 1, 1),
            4,
        )
    }

    #[test]
    fn single_bucket_colors() {
        let result = sample();
        let overdue = project(Intent::Overdue, &result).unwrap();
        assert_eq!(overdue.task_ids, vec!["t3"]);
        assert_eq!(overdue.color, HighlightColor::Red);

        let today = project(Intent::Today, &result).unwrap();
        assert_eq!(today.task_ids, vec!["t1"]);
        assert_eq!(today.color, HighlightColor::Yellow);

        let tomorrow = project(Intent::Tomorrow, &result).unwrap();
        assert_eq!(tomorrow.task_ids, vec!["t2"]);
        assert_eq!(tomorrow.color, HighlightColor::Blue);

        let upcoming = project(Intent::Upcoming, &result).unwrap();
        assert_eq!(upcoming.task_ids, vec!["t1", "t2", "t4"]);
        assert_eq!(upcoming.color, HighlightColor::Blue);
    }

    #[test]
    fn all_dedupes_in_bucket_order() {
        let directive = project(Intent::All, &sample()).unwrap();
        assert_eq!(directive.task_ids, vec!["t3", "t1", "t2", "t4"]);
        assert_eq!(directive.color, HighlightColor::Multi);
    }

    #[test]
    fn none_highlights_nothing() {
        assert!(project(Intent::None, &sample()).is_none());
    }

    #[test]
    fn prompt_context_embeds_json() {
        let result = sample();
        let context = prompt_context(&result, Intent::All);
        assert!(context.starts_with("DEADLINE SCAN (reference date 2024-01-01, requested: all)"));
        assert!(context.contains(&result.summary));

        let json_start = context.find("```json\n").unwrap() + "```json\n".len();
        let json_end = context.rfind("\n```").unwrap();
        let value: Value = serde_json::from_str(&context[json_start..json_end]).unwrap();
        assert_eq!(value["scanned"], 4);
        assert_eq!(value["intent"], "all");
        assert_eq!(value["overdue"][0]["id"], "t3");
        assert_eq!(value["today"][0]["daysUntil"], 0);
    }
}
