// biosig-fhir-core/src/tools/invoker.rs

use super::CommandOutput;
use crate::config::{FailurePolicy, ToolsConfig};
use crate::errors::InvokeError;
use crate::header::decode_header;
use crate::request::{ConversionRequest, ToolMode};
use serde_json::Value;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Runs the BioSig executables named by a [`ToolsConfig`].
///
/// The invoker holds configuration only, so it is cheap to clone and safe to
/// share; each call is independent and blocks until the tool has exited.
#[derive(Debug, Clone, Default)]
pub struct ToolInvoker {
    config: ToolsConfig,
}

impl ToolInvoker {
    pub fn new(config: ToolsConfig) -> Self {
        Self { config }
    }

    /// Runs `<tool><suffix> <flag> <filename>` and captures its output.
    ///
    /// `flag` and `filename` are handed to the process as separate arguments,
    /// never through a shell, so the filename reaches the tool verbatim
    /// whatever characters it contains.
    ///
    /// With [`FailurePolicy::Passthrough`] a non-zero exit is logged and the
    /// captured bytes are still returned; with [`FailurePolicy::Strict`] it
    /// becomes [`InvokeError::ToolFailed`].
    pub fn invoke(
        &self,
        tool_name: &str,
        flag: &str,
        filename: &Path,
    ) -> Result<CommandOutput, InvokeError> {
        let program = self.config.program_path(tool_name);
        let args = vec![OsString::from(flag), filename.as_os_str().to_os_string()];
        debug!(program = %program.display(), args = ?args, "Executing tool");

        let expression = if self.config.tool_dir.is_some() {
            if !program.is_file() {
                warn!(tool = tool_name, path = %program.display(), "Tool executable does not exist");
                return Err(InvokeError::ToolNotFound {
                    tool: tool_name.to_string(),
                });
            }
            duct::cmd(&program, args.clone())
        } else {
            // A plain string keeps duct's PATH lookup.
            duct::cmd(program.to_string_lossy().into_owned(), args.clone())
        };

        let output_result = expression
            .stdin_null()
            .stdout_capture()
            .stderr_capture()
            .unchecked() // Exit status is handled below
            .run();

        let output = match output_result {
            Ok(output) => output,
            Err(e) => {
                warn!(program = %program.display(), args = ?args, error = %e, "Failed to spawn tool process");
                return Err(spawn_error(tool_name, e));
            }
        };

        let result = CommandOutput {
            status: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        };

        debug!(
            "{} exit status: {:?}, stdout: {} bytes, stderr: {} bytes",
            tool_name,
            result.status,
            result.stdout.len(),
            result.stderr.len()
        );

        if !result.success() {
            let stderr_preview = result
                .stderr_text()
                .lines()
                .take(3)
                .collect::<Vec<_>>()
                .join("\n");
            warn!(
                program = %program.display(),
                args = ?args,
                status = ?result.status,
                "Tool exited unsuccessfully: {}",
                stderr_preview
            );
            if self.config.failure_policy == FailurePolicy::Strict {
                return Err(InvokeError::ToolFailed {
                    tool: tool_name.to_string(),
                    status: result.status,
                    stderr: result.stderr_text().trim_end().to_string(),
                });
            }
        }

        Ok(result)
    }

    /// Validates the request's input file, then runs the tool its mode selects.
    pub fn fetch(&self, request: &ConversionRequest) -> Result<CommandOutput, InvokeError> {
        request.validate()?;
        let tool_name = self.config.tool_name(request.mode.tool_kind());
        self.invoke(tool_name, request.mode.flag(), &request.filename)
    }

    fn fetch_stdout(&self, filename: &Path, mode: ToolMode) -> Result<Vec<u8>, InvokeError> {
        self.fetch(&ConversionRequest::new(filename, mode))
            .map(CommandOutput::into_stdout)
    }

    /// The file as a base64-encoded GDF stream.
    pub fn fhir_base64(&self, filename: &Path) -> Result<Vec<u8>, InvokeError> {
        self.fetch_stdout(filename, ToolMode::Base64)
    }

    /// A FHIR `Binary` JSON template for the file.
    pub fn fhir_json(&self, filename: &Path) -> Result<Vec<u8>, InvokeError> {
        self.fetch_stdout(filename, ToolMode::Json)
    }

    /// A FHIR `Binary` XML template for the file.
    pub fn fhir_xml(&self, filename: &Path) -> Result<Vec<u8>, InvokeError> {
        self.fetch_stdout(filename, ToolMode::Xml)
    }

    /// The raw JSON header export.
    pub fn json_header(&self, filename: &Path) -> Result<Vec<u8>, InvokeError> {
        self.fetch_stdout(filename, ToolMode::Header)
    }

    /// The decoded header, `None` if the export was not valid JSON.
    pub fn header(&self, filename: &Path) -> Result<Option<Value>, InvokeError> {
        Ok(decode_header(&self.json_header(filename)?))
    }

    pub fn tool_for(&self, mode: ToolMode) -> &str {
        self.config.tool_name(mode.tool_kind())
    }
}

fn spawn_error(tool_name: &str, e: io::Error) -> InvokeError {
    if e.kind() == io::ErrorKind::NotFound {
        InvokeError::ToolNotFound {
            tool: tool_name.to_string(),
        }
    } else {
        InvokeError::Spawn {
            tool: tool_name.to_string(),
            source: e,
        }
    }
}
