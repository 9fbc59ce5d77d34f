//! Location of the state files.

use std::path::{Path, PathBuf};

/// Default state directory, relative to the working directory.
pub const DEFAULT_STATE_DIR: &str = ".context";

const PM_STATE_FILE: &str = "pm_state.json";
const GANTT_STATE_FILE: &str = "gantt_state.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub state_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
        }
    }
}

impl Config {
    pub fn new<P: AsRef<Path>>(state_dir: P) -> Self {
        Config {
            state_dir: state_dir.as_ref().to_path_buf(),
        }
    }

    pub fn pm_state_path(&self) -> PathBuf {
        self.state_dir.join(PM_STATE_FILE)
    }

    pub fn gantt_state_path(&self) -> PathBuf {
        self.state_dir.join(GANTT_STATE_FILE)
    }
}
