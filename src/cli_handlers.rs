use crate::config::Config;
use crate::dispatch::{dispatch_gantt, dispatch_pm};
use crate::gantt::GanttPlanner;
use crate::mcp::{GanttServer, PmServer, run_gantt_server, run_pm_server};
use crate::pm::ProjectManager;
use anyhow::Context;
use rmcp::model::Tool;
use serde_json::Value;

fn parse_args(args: &str) -> anyhow::Result<Value> {
    serde_json::from_str(args).with_context(|| format!("--args is not valid JSON: {args}"))
}

fn print_catalog(tools: &[Tool]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(tools)?);
    Ok(())
}

/// Handle `taskdeck pm call`
pub fn handle_pm_call(config: &Config, operation: &str, args: &str) -> anyhow::Result<()> {
    let args = parse_args(args)?;
    let manager = ProjectManager::open_at(config.pm_state_path());
    let text = dispatch_pm(&manager, operation, args)?;
    println!("{text}");
    Ok(())
}

/// Handle `taskdeck gantt call`
pub fn handle_gantt_call(config: &Config, operation: &str, args: &str) -> anyhow::Result<()> {
    let args = parse_args(args)?;
    let planner = GanttPlanner::open_at(config.gantt_state_path());
    let text = dispatch_gantt(&planner, operation, args)?;
    println!("{text}");
    Ok(())
}

pub fn handle_pm_tools() -> anyhow::Result<()> {
    print_catalog(&PmServer::catalog())
}

pub fn handle_gantt_tools() -> anyhow::Result<()> {
    print_catalog(&GanttServer::catalog())
}

pub async fn handle_pm_serve(config: &Config) -> anyhow::Result<()> {
    run_pm_server(config).await
}

pub async fn handle_gantt_serve(config: &Config) -> anyhow::Result<()> {
    run_gantt_server(config).await
}
