use crate::error::Result;
use crate::models::{
    AssignedTask, AssignmentStatus, ContextTransfer, Priority, ProjectDocument, iteration_label,
    now,
};
use crate::store::{DocumentStore, JsonFileStore};
use std::path::Path;
use tracing::{info, warn};

/// Project-management tracker: agent task assignments and context hand-offs.
///
/// Each operation is one load → mutate → save cycle against the store and
/// answers with human-readable text.
pub struct ProjectManager<S> {
    store: S,
}

impl ProjectManager<JsonFileStore<ProjectDocument>> {
    /// Open the tracker backed by a JSON file
    pub fn open_at<P: AsRef<Path>>(path: P) -> Self {
        ProjectManager::new(JsonFileStore::new(path))
    }
}

impl<S: DocumentStore<ProjectDocument>> ProjectManager<S> {
    pub fn new(store: S) -> Self {
        ProjectManager { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The whole document as pretty-printed JSON. Never saves.
    pub fn get_project_status(&self) -> Result<String> {
        let doc = self.store.load()?;
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Discard all prior state and start a new project.
    pub fn initialize_project(&self, project_name: &str) -> Result<String> {
        let doc = ProjectDocument::initialized(project_name);
        self.store.save(&doc)?;
        info!(project = project_name, "project initialized");
        Ok(format!("Project '{project_name}' initialized successfully."))
    }

    pub fn assign_task(
        &self,
        agent: &str,
        task_description: &str,
        priority: Option<Priority>,
    ) -> Result<String> {
        let mut doc = self.store.load()?;
        let id = doc.next_task_id();

        doc.tasks.push(AssignedTask {
            id: id.clone(),
            agent: agent.to_string(),
            description: task_description.to_string(),
            priority: priority.unwrap_or_default(),
            status: AssignmentStatus::Assigned,
            assigned_at: now(),
            output: None,
            completed_at: None,
        });
        self.store.save(&doc)?;

        info!(task_id = %id, agent, "task assigned");
        Ok(format!("Task {id} assigned to {agent}: {task_description}"))
    }

    pub fn pass_context(
        &self,
        from_agent: &str,
        to_agent: &str,
        context_summary: &str,
        artifact_path: Option<&str>,
    ) -> Result<String> {
        let mut doc = self.store.load()?;
        doc.context_transfers.push(ContextTransfer {
            from: from_agent.to_string(),
            to: to_agent.to_string(),
            summary: context_summary.to_string(),
            artifact: artifact_path.map(str::to_string),
            transferred_at: now(),
        });
        self.store.save(&doc)?;

        info!(from = from_agent, to = to_agent, "context passed");
        Ok(format!("Context passed from {from_agent} to {to_agent}"))
    }

    /// Overwrite iteration and phase. No range or ordering checks.
    pub fn update_iteration(&self, iteration: i64, phase: &str) -> Result<String> {
        let mut doc = self.store.load()?;
        doc.current_iteration = Some(iteration);
        doc.current_phase = Some(phase.to_string());
        self.store.save(&doc)?;

        info!(iteration, phase, "iteration updated");
        Ok(format!(
            "Updated to {} - Phase: {phase}",
            iteration_label(iteration)
        ))
    }

    /// Mark a task complete. An unknown ID is reported in the text and nothing is saved.
    pub fn complete_task(&self, task_id: &str, output_summary: &str) -> Result<String> {
        let mut doc = self.store.load()?;

        let Some(task) = doc.task_mut(task_id) else {
            warn!(task_id, "complete_task: task not found");
            return Ok(format!("Task {task_id} not found."));
        };
        task.status = AssignmentStatus::Complete;
        task.output = Some(output_summary.to_string());
        task.completed_at = Some(now());
        self.store.save(&doc)?;

        info!(task_id, "task completed");
        Ok(format!("Task {task_id} marked complete."))
    }
}
