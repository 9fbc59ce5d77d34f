//! Name-based operation dispatch, independent of any transport.

use crate::error::{Error, Result};
use crate::gantt::GanttPlanner;
use crate::models::{ProjectDocument, TimelineDocument};
use crate::params::*;
use crate::pm::ProjectManager;
use crate::store::DocumentStore;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

pub const PM_TOOLS: [&str; 6] = [
    "get_project_status",
    "initialize_project",
    "assign_task",
    "pass_context",
    "update_iteration",
    "complete_task",
];

pub const GANTT_TOOLS: [&str; 6] = [
    "create_project",
    "create_task",
    "update_task",
    "shift_tasks",
    "get_timeline",
    "complete_iteration",
];

fn parse<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T> {
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(args).map_err(|source| Error::InvalidArguments {
        tool: tool.to_string(),
        source,
    })
}

fn unknown_tool(name: &str) -> String {
    warn!(tool = name, "unknown tool");
    format!("Unknown tool: {name}")
}

/// Run one project-management operation by name.
pub fn dispatch_pm<S>(pm: &ProjectManager<S>, name: &str, args: Value) -> Result<String>
where
    S: DocumentStore<ProjectDocument>,
{
    info!(tool = name, "pm call");
    match name {
        "get_project_status" => pm.get_project_status(),
        "initialize_project" => {
            let p: InitializeProjectInput = parse(name, args)?;
            pm.initialize_project(&p.project_name)
        }
        "assign_task" => {
            let p: AssignTaskInput = parse(name, args)?;
            pm.assign_task(&p.agent, &p.task_description, p.priority)
        }
        "pass_context" => {
            let p: PassContextInput = parse(name, args)?;
            pm.pass_context(
                &p.from_agent,
                &p.to_agent,
                &p.context_summary,
                p.artifact_path.as_deref(),
            )
        }
        "update_iteration" => {
            let p: UpdateIterationInput = parse(name, args)?;
            pm.update_iteration(p.iteration, &p.phase)
        }
        "complete_task" => {
            let p: CompleteTaskInput = parse(name, args)?;
            pm.complete_task(&p.task_id, &p.output_summary)
        }
        _ => Ok(unknown_tool(name)),
    }
}

/// Run one Gantt operation by name.
pub fn dispatch_gantt<S>(gantt: &GanttPlanner<S>, name: &str, args: Value) -> Result<String>
where
    S: DocumentStore<TimelineDocument>,
{
    info!(tool = name, "gantt call");
    match name {
        "create_project" => {
            let p: CreateProjectInput = parse(name, args)?;
            gantt.create_project(&p.project_name, p.start_date.as_deref())
        }
        "create_task" => {
            let p: CreateTaskInput = parse(name, args)?;
            let task_name = p.name.clone();
            let hours = p.duration_hours;
            gantt.create_task(&task_name, hours, p.into())
        }
        "update_task" => {
            let p: UpdateTaskInput = parse(name, args)?;
            gantt.update_task(&p.task_id, p.status, p.actual_hours)
        }
        "shift_tasks" => {
            let p: ShiftTasksInput = parse(name, args)?;
            gantt.shift_tasks(&p.from_task_id, p.delay_hours)
        }
        "get_timeline" => gantt.get_timeline(),
        "complete_iteration" => {
            let p: CompleteIterationInput = parse(name, args)?;
            gantt.complete_iteration(p.iteration)
        }
        _ => Ok(unknown_tool(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssignmentStatus, TaskStatus};
    use crate::store::MemoryStore;
    use serde_json::json;

    fn pm() -> ProjectManager<MemoryStore<ProjectDocument>> {
        ProjectManager::new(MemoryStore::new())
    }

    fn gantt() -> GanttPlanner<MemoryStore<TimelineDocument>> {
        GanttPlanner::new(MemoryStore::new())
    }

    #[test]
    fn test_pm_scenario() {
        let pm = pm();
        dispatch_pm(&pm, "initialize_project", json!({"project_name": "Demo"})).unwrap();

        let first = dispatch_pm(
            &pm,
            "assign_task",
            json!({"agent": "AR", "task_description": "Design API"}),
        )
        .unwrap();
        assert!(first.contains("TASK-001"));
        let second = dispatch_pm(
            &pm,
            "assign_task",
            json!({"agent": "BD", "task_description": "Build API", "priority": "LOW"}),
        )
        .unwrap();
        assert!(second.contains("TASK-002"));

        dispatch_pm(
            &pm,
            "complete_task",
            json!({"task_id": "TASK-001", "output_summary": "done"}),
        )
        .unwrap();

        let doc = pm.store().load().unwrap();
        assert_eq!(doc.tasks[0].status, AssignmentStatus::Complete);
        assert_eq!(doc.tasks[1].status, AssignmentStatus::Assigned);
    }

    #[test]
    fn test_missing_required_argument_is_rejected() {
        let pm = pm();
        let result = dispatch_pm(&pm, "assign_task", json!({"agent": "AR"}));
        assert!(matches!(
            result,
            Err(Error::InvalidArguments { ref tool, .. }) if tool == "assign_task"
        ));
        assert_eq!(pm.store().saves(), 0);

        let result = dispatch_pm(&pm, "initialize_project", Value::Null);
        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_invalid_enum_values_are_rejected() {
        let pm = pm();
        let result = dispatch_pm(
            &pm,
            "assign_task",
            json!({"agent": "AR", "task_description": "x", "priority": "URGENT"}),
        );
        assert!(result.unwrap_err().is_validation());
        assert_eq!(pm.store().saves(), 0);

        let gantt = gantt();
        dispatch_gantt(&gantt, "create_project", json!({"project_name": "Demo"})).unwrap();
        dispatch_gantt(&gantt, "create_task", json!({"name": "A", "duration_hours": 1})).unwrap();
        let result = dispatch_gantt(
            &gantt,
            "update_task",
            json!({"task_id": "GT-001", "status": "done"}),
        );
        assert!(result.unwrap_err().is_validation());
        assert_eq!(gantt.store().load().unwrap().tasks[0].status, TaskStatus::Pending);
    }

    #[test]
    fn test_wrong_argument_type_is_rejected() {
        let gantt = gantt();
        let result = dispatch_gantt(
            &gantt,
            "create_task",
            json!({"name": "A", "duration_hours": "eight"}),
        );
        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_unknown_tool_is_text() {
        let pm = pm();
        assert_eq!(
            dispatch_pm(&pm, "delete_task", json!({})).unwrap(),
            "Unknown tool: delete_task"
        );
        // Gantt tools are not part of the project-management catalog
        assert_eq!(
            dispatch_pm(&pm, "get_timeline", Value::Null).unwrap(),
            "Unknown tool: get_timeline"
        );
    }

    #[test]
    fn test_gantt_scenario() {
        let gantt = gantt();
        dispatch_gantt(&gantt, "create_project", json!({"project_name": "Demo"})).unwrap();
        dispatch_gantt(&gantt, "create_task", json!({"name": "Design", "duration_hours": 8}))
            .unwrap();
        dispatch_gantt(
            &gantt,
            "create_task",
            json!({"name": "Build", "duration_hours": 16, "dependencies": ["GT-001"]}),
        )
        .unwrap();

        let text = dispatch_gantt(
            &gantt,
            "shift_tasks",
            json!({"from_task_id": "GT-001", "delay_hours": 3}),
        )
        .unwrap();
        assert_eq!(text, "Shifted 1 tasks by 3h: GT-002");

        let timeline = dispatch_gantt(&gantt, "get_timeline", Value::Null).unwrap();
        assert!(timeline.contains("### Iteration 1"));
        assert!(timeline.contains("[GT-002] Build (19h, unassigned) (deps: GT-001)"));
    }

    #[test]
    fn test_catalogs_are_disjoint() {
        assert!(PM_TOOLS.iter().all(|t| !GANTT_TOOLS.contains(t)));
    }
}
