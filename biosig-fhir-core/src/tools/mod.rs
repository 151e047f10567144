// biosig-fhir-core/src/tools/mod.rs

//! Execution of the external BioSig executables.
//!
//! Every call spawns exactly one process, drains its standard output and
//! standard error completely, waits for it to exit, and hands the captured
//! bytes back untouched. Nothing here parses or validates what the tools
//! print; see [`crate::header`] for the one decoding step that exists.

pub mod invoker;

pub use invoker::ToolInvoker;

/// Represents the captured result of one external tool run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub status: Option<i32>,
    /// Everything the tool wrote to standard output, byte for byte.
    pub stdout: Vec<u8>,
    /// Everything the tool wrote to standard error.
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Checks if the tool exited with status 0.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }

    /// Consumes the output, keeping only the data channel.
    pub fn into_stdout(self) -> Vec<u8> {
        self.stdout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_requires_zero_status() {
        let mut output = CommandOutput {
            status: Some(0),
            stdout: b"ok".to_vec(),
            stderr: Vec::new(),
        };
        assert!(output.success());
        output.status = Some(1);
        assert!(!output.success());
        output.status = None;
        assert!(!output.success());
    }

    #[test]
    fn test_text_views_are_lossy() {
        let output = CommandOutput {
            status: Some(0),
            stdout: vec![b'a', 0xff, b'b'],
            stderr: b"warn".to_vec(),
        };
        assert_eq!(output.stdout_text(), "a\u{fffd}b");
        assert_eq!(output.stderr_text(), "warn");
        assert_eq!(output.into_stdout(), vec![b'a', 0xff, b'b']);
    }
}
