pub mod cli;
pub mod cli_handlers;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod gantt;
pub mod mcp;
pub mod models;
pub mod params;
pub mod pm;
pub mod store;

pub use error::{Error, Result};
pub use models::*;
