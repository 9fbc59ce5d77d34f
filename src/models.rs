use chrono::{Local, NaiveDateTime};
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wall-clock timestamp as stored in both documents (local time, no offset).
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Canonical names of the three fixed iterations.
pub const ITERATION_NAMES: [(i64, &str); 3] =
    [(1, "Planning"), (2, "Development"), (3, "Verification")];

/// Phase name for iterations 1-3, a generic label otherwise
pub fn iteration_label(number: i64) -> String {
    ITERATION_NAMES
        .iter()
        .find(|(n, _)| *n == number)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("Iteration {number}"))
}

/// Format a sequential record ID such as `TASK-001`.
pub fn sequential_id(prefix: &str, position: usize) -> String {
    format!("{prefix}-{position:03}")
}

// ==================== Project-management document ====================

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of an assigned task; `complete` is only reachable through `complete_task`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Assigned,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedTask {
    pub id: String,
    pub agent: String,
    pub description: String,
    pub priority: Priority,
    pub status: AssignmentStatus,
    pub assigned_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDateTime>,
}

/// Hand-off of context from one agent to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextTransfer {
    pub from: String,
    pub to: String,
    pub summary: String,
    #[serde(default)]
    pub artifact: Option<String>,
    pub transferred_at: NaiveDateTime,
}

/// Persisted state of the project-management service.
///
/// The `Default` value is the shape of a service that has never been initialized:
/// every scalar is `null` and both sequences are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDocument {
    pub project_name: Option<String>,
    pub current_iteration: Option<i64>,
    pub current_phase: Option<String>,
    pub tasks: Vec<AssignedTask>,
    pub context_transfers: Vec<ContextTransfer>,
    pub created_at: Option<NaiveDateTime>,
}

impl ProjectDocument {
    /// Fresh shape written by `initialize_project`.
    pub fn initialized(project_name: &str) -> Self {
        ProjectDocument {
            project_name: Some(project_name.to_string()),
            current_iteration: Some(0),
            current_phase: Some("initialization".to_string()),
            tasks: Vec::new(),
            context_transfers: Vec::new(),
            created_at: Some(now()),
        }
    }

    pub fn next_task_id(&self) -> String {
        sequential_id("TASK", self.tasks.len() + 1)
    }

    pub fn task_mut(&mut self, id: &str) -> Option<&mut AssignedTask> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }
}

// ==================== Gantt document ====================

/// Gantt task status. Any status may be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Complete,
    Blocked,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Complete => "complete",
            TaskStatus::Blocked => "blocked",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "⬜",
            TaskStatus::InProgress => "🔵",
            TaskStatus::Complete => "✅",
            TaskStatus::Blocked => "🔴",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IterationStatus {
    Pending,
    InProgress,
    Complete,
}

impl IterationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IterationStatus::Pending => "pending",
            IterationStatus::InProgress => "in_progress",
            IterationStatus::Complete => "complete",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            IterationStatus::Pending => "⏳",
            IterationStatus::InProgress => "🔄",
            IterationStatus::Complete => "✅",
        }
    }
}

impl fmt::Display for IterationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Iteration {
    pub number: i64,
    pub name: String,
    pub status: IterationStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub id: String,
    pub name: String,
    pub duration_hours: i64,
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub assignee: String,
    pub iteration: i64,
    pub status: TaskStatus,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub actual_hours: Option<i64>,
}

/// Persisted state of the Gantt service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineDocument {
    pub project_name: Option<String>,
    pub start_date: Option<String>,
    pub tasks: Vec<ScheduledTask>,
    pub iterations: Vec<Iteration>,
}

impl TimelineDocument {
    /// Fresh shape written by `create_project`, seeded with the three fixed iterations.
    pub fn created(project_name: &str, start_date: &str) -> Self {
        let iterations = ITERATION_NAMES
            .iter()
            .map(|(number, name)| Iteration {
                number: *number,
                name: name.to_string(),
                status: IterationStatus::Pending,
            })
            .collect();

        TimelineDocument {
            project_name: Some(project_name.to_string()),
            start_date: Some(start_date.to_string()),
            tasks: Vec::new(),
            iterations,
        }
    }

    pub fn next_task_id(&self) -> String {
        sequential_id("GT", self.tasks.len() + 1)
    }

    pub fn task_mut(&mut self, id: &str) -> Option<&mut ScheduledTask> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn iteration_mut(&mut self, number: i64) -> Option<&mut Iteration> {
        self.iterations.iter_mut().find(|it| it.number == number)
    }
}
