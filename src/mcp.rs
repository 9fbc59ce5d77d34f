use crate::config::Config;
use crate::gantt::GanttPlanner;
use crate::models::{ProjectDocument, TimelineDocument};
use crate::params::{
    AssignTaskInput, CompleteIterationInput, CompleteTaskInput, CreateProjectInput,
    CreateTaskInput, InitializeProjectInput, PassContextInput, ShiftTasksInput,
    UpdateIterationInput, UpdateTaskInput,
};
use crate::pm::ProjectManager;
use crate::store::JsonFileStore;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt, handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters, model::*, tool, tool_handler, tool_router,
    transport::stdio,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

type FileProjectManager = ProjectManager<JsonFileStore<ProjectDocument>>;
type FileGanttPlanner = GanttPlanner<JsonFileStore<TimelineDocument>>;

/// Turn a handler outcome into a tool result. Lookup misses are already plain
/// text by now; only hard failures reach the error channel.
fn to_text(result: crate::error::Result<String>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) if e.is_validation() => Err(McpError::invalid_params(e.to_string(), None)),
        Err(e) => {
            error!(error = %e, "tool call failed");
            Err(McpError::internal_error(e.to_string(), None))
        }
    }
}

fn server_info(name: &str, instructions: &str) -> ServerInfo {
    ServerInfo {
        instructions: Some(instructions.to_string()),
        capabilities: ServerCapabilities::builder().enable_tools().build(),
        server_info: Implementation {
            name: name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

// ==================== Project-management server ====================

/// Project-management MCP server
#[derive(Clone)]
pub struct PmServer {
    manager: Arc<Mutex<FileProjectManager>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PmServer {
    pub fn new(config: &Config) -> Self {
        Self {
            manager: Arc::new(Mutex::new(ProjectManager::open_at(config.pm_state_path()))),
            tool_router: Self::tool_router(),
        }
    }

    /// Tools advertised by this server
    pub fn catalog() -> Vec<Tool> {
        Self::tool_router().list_all()
    }

    #[tool(
        description = "Get the current project status including iteration, phase, and active tasks."
    )]
    async fn get_project_status(&self) -> Result<CallToolResult, McpError> {
        let manager = self.manager.lock().await;
        to_text(manager.get_project_status())
    }

    #[tool(description = "Initialize a new project with the given name.")]
    async fn initialize_project(
        &self,
        params: Parameters<InitializeProjectInput>,
    ) -> Result<CallToolResult, McpError> {
        let manager = self.manager.lock().await;
        to_text(manager.initialize_project(&params.0.project_name))
    }

    #[tool(description = "Assign a task to a specific agent.")]
    async fn assign_task(
        &self,
        params: Parameters<AssignTaskInput>,
    ) -> Result<CallToolResult, McpError> {
        let manager = self.manager.lock().await;
        let p = params.0;
        to_text(manager.assign_task(&p.agent, &p.task_description, p.priority))
    }

    #[tool(description = "Transfer context/output from one agent to another.")]
    async fn pass_context(
        &self,
        params: Parameters<PassContextInput>,
    ) -> Result<CallToolResult, McpError> {
        let manager = self.manager.lock().await;
        let p = params.0;
        to_text(manager.pass_context(
            &p.from_agent,
            &p.to_agent,
            &p.context_summary,
            p.artifact_path.as_deref(),
        ))
    }

    #[tool(description = "Update the current iteration and phase.")]
    async fn update_iteration(
        &self,
        params: Parameters<UpdateIterationInput>,
    ) -> Result<CallToolResult, McpError> {
        let manager = self.manager.lock().await;
        to_text(manager.update_iteration(params.0.iteration, &params.0.phase))
    }

    #[tool(description = "Mark a task as complete.")]
    async fn complete_task(
        &self,
        params: Parameters<CompleteTaskInput>,
    ) -> Result<CallToolResult, McpError> {
        let manager = self.manager.lock().await;
        to_text(manager.complete_task(&params.0.task_id, &params.0.output_summary))
    }
}

#[tool_handler]
impl ServerHandler for PmServer {
    fn get_info(&self) -> ServerInfo {
        server_info(
            "project-manager",
            "Project Manager - orchestration state for a multi-agent workflow. \
             Start with initialize_project, hand work out with assign_task, record \
             hand-offs with pass_context, move between iterations (1=Planning, \
             2=Development, 3=Verification) with update_iteration, and close work with \
             complete_task. get_project_status returns the full state as JSON.",
        )
    }
}

// ==================== Gantt server ====================

/// Gantt timeline MCP server
#[derive(Clone)]
pub struct GanttServer {
    planner: Arc<Mutex<FileGanttPlanner>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GanttServer {
    pub fn new(config: &Config) -> Self {
        Self {
            planner: Arc::new(Mutex::new(GanttPlanner::open_at(config.gantt_state_path()))),
            tool_router: Self::tool_router(),
        }
    }

    pub fn catalog() -> Vec<Tool> {
        Self::tool_router().list_all()
    }

    #[tool(description = "Initialize a new project timeline with iterations.")]
    async fn create_project(
        &self,
        params: Parameters<CreateProjectInput>,
    ) -> Result<CallToolResult, McpError> {
        let planner = self.planner.lock().await;
        let p = params.0;
        to_text(planner.create_project(&p.project_name, p.start_date.as_deref()))
    }

    #[tool(description = "Create a new task in the timeline.")]
    async fn create_task(
        &self,
        params: Parameters<CreateTaskInput>,
    ) -> Result<CallToolResult, McpError> {
        let planner = self.planner.lock().await;
        let p = params.0;
        let name = p.name.clone();
        let hours = p.duration_hours;
        to_text(planner.create_task(&name, hours, p.into()))
    }

    #[tool(description = "Update a task's status or actual time.")]
    async fn update_task(
        &self,
        params: Parameters<UpdateTaskInput>,
    ) -> Result<CallToolResult, McpError> {
        let planner = self.planner.lock().await;
        let p = params.0;
        to_text(planner.update_task(&p.task_id, p.status, p.actual_hours))
    }

    #[tool(description = "Shift dependent tasks when a task is delayed.")]
    async fn shift_tasks(
        &self,
        params: Parameters<ShiftTasksInput>,
    ) -> Result<CallToolResult, McpError> {
        let planner = self.planner.lock().await;
        to_text(planner.shift_tasks(&params.0.from_task_id, params.0.delay_hours))
    }

    #[tool(description = "Get the current project timeline as formatted text.")]
    async fn get_timeline(&self) -> Result<CallToolResult, McpError> {
        let planner = self.planner.lock().await;
        to_text(planner.get_timeline())
    }

    #[tool(description = "Mark an iteration as complete.")]
    async fn complete_iteration(
        &self,
        params: Parameters<CompleteIterationInput>,
    ) -> Result<CallToolResult, McpError> {
        let planner = self.planner.lock().await;
        to_text(planner.complete_iteration(params.0.iteration))
    }
}

#[tool_handler]
impl ServerHandler for GanttServer {
    fn get_info(&self) -> ServerInfo {
        server_info(
            "gantt-tools",
            "Gantt Tools - project timeline and scheduling. Call create_project first; it \
             seeds the Planning, Development and Verification iterations. Add work with \
             create_task, report progress with update_task, propagate a delay to direct \
             dependents with shift_tasks, and review everything with get_timeline.",
        )
    }
}

pub async fn run_pm_server(config: &Config) -> anyhow::Result<()> {
    info!(path = %config.pm_state_path().display(), "starting project-manager MCP server");
    let service = PmServer::new(config).serve(stdio()).await.inspect_err(|e| {
        error!("Error starting MCP server: {e}");
    })?;

    service.waiting().await?;
    Ok(())
}

pub async fn run_gantt_server(config: &Config) -> anyhow::Result<()> {
    info!(path = %config.gantt_state_path().display(), "starting gantt-tools MCP server");
    let service = GanttServer::new(config).serve(stdio()).await.inspect_err(|e| {
        error!("Error starting MCP server: {e}");
    })?;

    service.waiting().await?;
    Ok(())
}
