//! Message-level entry point: agent gate → intent → triage → highlights.

use chrono::NaiveDate;

use crate::clock::resolve_reference;
use crate::config::TriageConfig;
use crate::triage::{classify, project, prompt_context, resolve_deadline, route};
use crate::types::{Intent, Task, TriageOutcome, TriageRequest, TriageResult};

/// Stateless triage engine holding only its configuration.
#[derive(Debug, Clone, Default)]
pub struct TriageEngine {
    config: TriageConfig,
}

impl TriageEngine {
    pub fn new(config: TriageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    /// Whether messages to this agent may trigger triage. Requests with no
    /// agent id are treated as addressed to the deadline agent.
    pub fn is_deadline_agent(&self, agent_id: Option<&str>) -> bool {
        match agent_id {
            None => true,
            Some(id) => self
                .config
                .deadline_agents
                .iter()
                .any(|a| a.eq_ignore_ascii_case(id.trim())),
        }
    }

    /// Tasks that take part in triage, in input order.
    ///
    /// Tasks with a kind tag must match a configured tactical kind; untagged
    /// tasks are kept when `include_untagged` is set.
    pub fn tactical_tasks<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks
            .iter()
            .filter(|task| match task.kind.as_deref() {
                Some(kind) => self.config.is_tactical_kind(kind),
                None => self.config.include_untagged,
            })
            .collect()
    }

    /// Resolve deadlines for the tactical tasks and bucket them.
    pub fn triage(&self, tasks: &[Task], reference: NaiveDate) -> TriageResult {
        let tactical = self.tactical_tasks(tasks);
        let deadlines: Vec<_> = tactical
            .iter()
            .filter_map(|task| resolve_deadline(task, reference))
            .collect();

        log::debug!(
            "Resolved {} of {} tactical tasks ({} on canvas)",
            deadlines.len(),
            tactical.len(),
            tasks.len()
        );

        classify(&deadlines, reference, tactical.len())
    }

    /// Handle one chat message end to end.
    pub fn handle(&self, request: &TriageRequest) -> TriageOutcome {
        if !self.is_deadline_agent(request.agent_id.as_deref()) {
            return TriageOutcome::untouched();
        }

        let intent = route(&request.message);
        if intent == Intent::None {
            return TriageOutcome::untouched();
        }

        let reference = resolve_reference(request.reference_time.as_deref());
        let result = self.triage(&request.tasks, reference.date);
        let highlight = project(intent, &result);
        let context = prompt_context(&result, intent);

        log::info!(
            "Deadline triage ({}): {} overdue, {} today, {} tomorrow, {} upcoming",
            intent,
            result.overdue.len(),
            result.today.len(),
            result.tomorrow.len(),
            result.upcoming.len()
        );

        TriageOutcome {
            intent,
            triage: Some(result),
            highlight,
            prompt_context: Some(context),
            reference_source: Some(reference.source),
        }
    }
}
