use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A task card as stored on the canvas graph.
///
/// Accepts both the canvas export format (`structuredDeadline`, `body`) and
/// the older node format (`deadline`, `dueDate`, `notes`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Node kind tag ("tactical", "strategic", "resource", ...). Absent on
    /// lists the caller already filtered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(
        default,
        alias = "structuredDeadline",
        alias = "dueDate",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, alias = "body", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Task {
    /// Display label: explicit label, then title, then id.
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .or_else(|| self.title.as_deref().filter(|t| !t.trim().is_empty()))
            .unwrap_or(&self.id)
    }
}

/// Which task field produced a resolved date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineSource {
    Structured,
    Title,
    Notes,
}

impl DeadlineSource {
    /// Confidence assigned to dates coming from this source.
    pub fn confidence(self) -> f32 {
        match self {
            DeadlineSource::Structured => 1.0,
            DeadlineSource::Title => 0.8,
            DeadlineSource::Notes => 0.6,
        }
    }
}

/// The text strategy that matched a free-text date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePattern {
    IsoDate,
    DayMonthFullYear,
    DayMonthShortYear,
    DayMonth,
    MonthName,
    NextWeekday,
    RelativeDay,
}

/// A date resolved for one task. Recomputed on every triage call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDeadline {
    pub task_id: String,
    pub label: String,
    pub date: NaiveDate,
    pub confidence: f32,
    pub source: DeadlineSource,
    /// None for structured deadlines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<DatePattern>,
}

/// One entry in a triage bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub id: String,
    pub label: String,
    pub date: NaiveDate,
    pub confidence: f32,
    pub source: DeadlineSource,
    /// Days from the reference date; negative when overdue.
    pub days_until: i64,
}

/// Buckets plus the summary sentence for one triage call.
///
/// `today` and `tomorrow` are always subsets of `upcoming`; `overdue` never
/// shares a task with `upcoming`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageResult {
    pub reference_date: NaiveDate,
    pub scanned: usize,
    pub overdue: Vec<TaskSummary>,
    pub today: Vec<TaskSummary>,
    pub tomorrow: Vec<TaskSummary>,
    pub upcoming: Vec<TaskSummary>,
    pub summary: String,
}

/// What a chat message asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Overdue,
    Today,
    Tomorrow,
    Upcoming,
    All,
    None,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::Overdue => write!(f, "overdue"),
            Intent::Today => write!(f, "today"),
            Intent::Tomorrow => write!(f, "tomorrow"),
            Intent::Upcoming => write!(f, "upcoming"),
            Intent::All => write!(f, "all"),
            Intent::None => write!(f, "none"),
        }
    }
}

/// Canvas highlight color. `Multi` leaves per-task coloring to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightColor {
    Red,
    Yellow,
    Blue,
    Multi,
}

/// Which task cards the canvas should emphasize, and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightDirective {
    pub task_ids: Vec<String>,
    pub color: HighlightColor,
}

/// Where the reference "now" came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceSource {
    Client,
    Server,
}

/// One chat message plus the canvas tasks it may ask about.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    pub message: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Requester's local wall-clock time, ISO-8601.
    #[serde(default, alias = "now", skip_serializing_if = "Option::is_none")]
    pub reference_time: Option<String>,
}

/// Everything the chat layer needs after handling one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageOutcome {
    pub intent: Intent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triage: Option<TriageResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HighlightDirective>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_source: Option<ReferenceSource>,
}

impl TriageOutcome {
    /// Outcome for a message that does not ask about deadlines.
    pub fn untouched() -> Self {
        TriageOutcome {
            intent: Intent::None,
            triage: None,
            highlight: None,
            prompt_context: None,
            reference_source: None,
        }
    }
}
