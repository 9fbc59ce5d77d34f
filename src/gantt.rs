use crate::error::{Error, Result};
use crate::models::{
    IterationStatus, ScheduledTask, TaskStatus, TimelineDocument, ITERATION_NAMES, now,
};
use crate::store::{DocumentStore, JsonFileStore};
use chrono::Local;
use std::path::Path;
use tracing::{info, warn};

/// Optional fields of a new timeline task
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub dependencies: Vec<String>,
    pub assignee: Option<String>,
    pub iteration: Option<i64>,
}

/// Gantt-style planner: tasks with durations and dependencies, grouped into
/// three fixed iterations.
pub struct GanttPlanner<S> {
    store: S,
}

impl GanttPlanner<JsonFileStore<TimelineDocument>> {
    pub fn open_at<P: AsRef<Path>>(path: P) -> Self {
        GanttPlanner::new(JsonFileStore::new(path))
    }
}

impl<S: DocumentStore<TimelineDocument>> GanttPlanner<S> {
    pub fn new(store: S) -> Self {
        GanttPlanner { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace the timeline with a fresh project. `start_date` defaults to today.
    pub fn create_project(&self, project_name: &str, start_date: Option<&str>) -> Result<String> {
        let start = match start_date {
            Some(date) => date.to_string(),
            None => Local::now().format("%Y-%m-%d").to_string(),
        };

        let doc = TimelineDocument::created(project_name, &start);
        self.store.save(&doc)?;

        info!(project = project_name, start = %start, "timeline created");
        Ok(format!("Project '{project_name}' timeline created. Start: {start}"))
    }

    pub fn create_task(&self, name: &str, duration_hours: i64, opts: NewTask) -> Result<String> {
        let mut doc = self.store.load()?;
        let id = doc.next_task_id();

        doc.tasks.push(ScheduledTask {
            id: id.clone(),
            name: name.to_string(),
            duration_hours,
            dependencies: opts.dependencies,
            assignee: opts.assignee.unwrap_or_else(|| "unassigned".to_string()),
            iteration: opts.iteration.unwrap_or(1),
            status: TaskStatus::Pending,
            start_time: None,
            end_time: None,
            actual_hours: None,
        });
        self.store.save(&doc)?;

        info!(task_id = %id, duration_hours, "timeline task created");
        Ok(format!("Task {id} created: {name} ({duration_hours}h)"))
    }

    /// Set a task's status. Any transition is allowed.
    ///
    /// The first move to `in_progress` stamps `start_time`; every move to
    /// `complete` stamps `end_time`. A zero `actual_hours` is ignored.
    pub fn update_task(
        &self,
        task_id: &str,
        status: TaskStatus,
        actual_hours: Option<i64>,
    ) -> Result<String> {
        let mut doc = self.store.load()?;

        let Some(task) = doc.task_mut(task_id) else {
            warn!(task_id, "update_task: task not found");
            return Ok(format!("Task {task_id} not found."));
        };

        task.status = status;
        if let Some(hours) = actual_hours.filter(|h| *h != 0) {
            task.actual_hours = Some(hours);
        }
        if status == TaskStatus::InProgress && task.start_time.is_none() {
            task.start_time = Some(now());
        }
        if status == TaskStatus::Complete {
            task.end_time = Some(now());
        }
        self.store.save(&doc)?;

        info!(task_id, status = %status, "timeline task updated");
        Ok(format!("Task {task_id} updated to {status}"))
    }

    /// Extend the duration of every direct dependent of `from_task_id` by `delay_hours`.
    ///
    /// Not transitive, and `from_task_id` itself need not exist. If any shifted
    /// duration would overflow, nothing is changed or saved.
    pub fn shift_tasks(&self, from_task_id: &str, delay_hours: i64) -> Result<String> {
        let mut doc = self.store.load()?;

        let mut shifted = Vec::new();
        for (idx, task) in doc.tasks.iter().enumerate() {
            if !task.dependencies.iter().any(|d| d == from_task_id) {
                continue;
            }
            let hours = task.duration_hours.checked_add(delay_hours).ok_or_else(|| {
                Error::DurationOverflow {
                    task_id: task.id.clone(),
                    delay_hours,
                }
            })?;
            shifted.push((idx, hours));
        }

        let mut affected = Vec::with_capacity(shifted.len());
        for (idx, hours) in shifted {
            let task = &mut doc.tasks[idx];
            task.duration_hours = hours;
            affected.push(task.id.clone());
        }
        self.store.save(&doc)?;

        info!(from_task_id, delay_hours, affected = affected.len(), "tasks shifted");
        Ok(format!(
            "Shifted {} tasks by {delay_hours}h: {}",
            affected.len(),
            affected.join(", ")
        ))
    }

    /// Formatted timeline report. Never saves.
    pub fn get_timeline(&self) -> Result<String> {
        let doc = self.store.load()?;
        Ok(render_timeline(&doc))
    }

    pub fn complete_iteration(&self, iteration: i64) -> Result<String> {
        let mut doc = self.store.load()?;

        let Some(it) = doc.iteration_mut(iteration) else {
            warn!(iteration, "complete_iteration: iteration not found");
            return Ok(format!("Iteration {iteration} not found."));
        };
        it.status = IterationStatus::Complete;
        self.store.save(&doc)?;

        info!(iteration, "iteration completed");
        Ok(format!("Iteration {iteration} marked complete."))
    }
}

/// Render the timeline as markdown-ish text: iterations first, then tasks
/// grouped under iterations 1-3. Tasks in any other iteration are not listed.
pub fn render_timeline(doc: &TimelineDocument) -> String {
    let name = doc.project_name.as_deref().unwrap_or("Unknown");
    let mut lines = vec![format!("# Project: {name}"), String::new()];

    lines.push("## Iterations".to_string());
    for it in &doc.iterations {
        lines.push(format!(
            "- {} Iteration {}: {} ({})",
            it.status.icon(),
            it.number,
            it.name,
            it.status
        ));
    }

    lines.push(String::new());
    lines.push("## Tasks".to_string());
    for (number, _) in ITERATION_NAMES {
        let tasks: Vec<&ScheduledTask> =
            doc.tasks.iter().filter(|t| t.iteration == number).collect();
        if tasks.is_empty() {
            continue;
        }

        lines.push(String::new());
        lines.push(format!("### Iteration {number}"));
        for task in tasks {
            let deps = if task.dependencies.is_empty() {
                String::new()
            } else {
                format!(" (deps: {})", task.dependencies.join(", "))
            };
            lines.push(format!(
                "- {} [{}] {} ({}h, {}){deps}",
                task.status.icon(),
                task.id,
                task.name,
                task.duration_hours,
                task.assignee
            ));
        }
    }

    lines.join("\n")
}
