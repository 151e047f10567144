// biosig-fhir-core/src/errors.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while invoking one of the BioSig tools.
#[derive(Error, Debug)]
pub enum InvokeError {
    /// The input file does not exist or is not a regular file.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The input file exists but cannot be opened for reading.
    #[error("Input file is not readable: {}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external executable could not be located.
    #[error("External tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// The external executable was found but could not be started.
    #[error("Failed to spawn external tool '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool exited unsuccessfully (strict failure policy only).
    #[error("External tool '{tool}' failed with status {}: {stderr}", display_status(*status))]
    ToolFailed {
        tool: String,
        status: Option<i32>,
        stderr: String,
    },
}

fn display_status(status: Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "<signal>".to_string(),
    }
}

impl InvokeError {
    /// True when the failure happened before or while starting the tool.
    pub fn is_spawn_failure(&self) -> bool {
        matches!(self, InvokeError::ToolNotFound { .. } | InvokeError::Spawn { .. })
    }
}
