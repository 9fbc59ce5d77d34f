//! Tool arguments. Deserialization is the validation boundary: a missing
//! required field or an unknown enum value is rejected before any handler runs.

use crate::models::{Priority, TaskStatus};
use rmcp::schemars;
use serde::{Deserialize, Serialize};

// ==================== Project-management tools ====================

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct InitializeProjectInput {
    /// Name of the project to initialize
    pub project_name: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AssignTaskInput {
    /// Agent identifier (e.g., 'RE', 'AN', 'AR', 'BD')
    pub agent: String,
    /// Description of the task to assign
    pub task_description: String,
    /// Task priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PassContextInput {
    /// Source agent identifier
    pub from_agent: String,
    /// Target agent identifier
    pub to_agent: String,
    /// Summary of the context being transferred
    pub context_summary: String,
    /// Optional path to artifact file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateIterationInput {
    /// Iteration number (1=Planning, 2=Development, 3=Verification)
    pub iteration: i64,
    /// Current phase within iteration
    pub phase: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CompleteTaskInput {
    /// ID of the task to complete
    pub task_id: String,
    /// Summary of task output/deliverables
    pub output_summary: String,
}

// ==================== Gantt tools ====================

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CreateProjectInput {
    /// Name of the project
    pub project_name: String,
    /// Project start date (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CreateTaskInput {
    /// Task name
    pub name: String,
    /// Estimated duration in hours
    pub duration_hours: i64,
    /// List of task IDs this task depends on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
    /// Agent assigned to this task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Iteration number (1, 2, or 3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateTaskInput {
    /// ID of the task to update
    pub task_id: String,
    /// New status
    pub status: TaskStatus,
    /// Actual hours spent (if complete)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ShiftTasksInput {
    /// ID of the delayed task
    pub from_task_id: String,
    /// Hours of delay to propagate
    pub delay_hours: i64,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CompleteIterationInput {
    /// Iteration number to complete
    pub iteration: i64,
}

impl From<CreateTaskInput> for crate::gantt::NewTask {
    fn from(input: CreateTaskInput) -> Self {
        crate::gantt::NewTask {
            dependencies: input.dependencies.unwrap_or_default(),
            assignee: input.assignee,
            iteration: input.iteration,
        }
    }
}
