use crate::config::DEFAULT_STATE_DIR;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "Project-management tracker and Gantt scheduler MCP servers")]
#[command(version)]
pub struct Cli {
    /// Directory holding the state files
    #[arg(long, global = true, env = "TASKDECK_STATE_DIR", default_value = DEFAULT_STATE_DIR)]
    pub state_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project-management tracker
    Pm {
        #[command(subcommand)]
        action: Action,
    },

    /// Gantt timeline scheduler
    Gantt {
        #[command(subcommand)]
        action: Action,
    },
}

#[derive(Subcommand)]
pub enum Action {
    /// Start the MCP server on stdio
    Serve,

    /// Print the tool catalog as JSON
    Tools,

    /// Run a single operation and print its response
    Call {
        /// Operation name (e.g. assign_task)
        operation: String,
        /// Arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
}
