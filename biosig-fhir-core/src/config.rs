// biosig-fhir-core/src/config.rs

//! Configuration for locating and running the BioSig tools.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::platform::fetch_platform_suffix;
use crate::request::ToolKind;

pub const DEFAULT_FHIR_TOOL: &str = "biosig_fhir";
pub const DEFAULT_HEADER_TOOL: &str = "save2gdf";

/// How a tool that ran but exited unsuccessfully is reported.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Return whatever the tool printed; the exit status is only recorded.
    #[default]
    Passthrough,
    /// Turn a non-zero exit into an error.
    Strict,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub fhir_tool: String,
    pub header_tool: String,
    /// Directory holding the executables. `PATH` lookup is used when unset.
    pub tool_dir: Option<PathBuf>,
    pub failure_policy: FailurePolicy,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            fhir_tool: DEFAULT_FHIR_TOOL.to_string(),
            header_tool: DEFAULT_HEADER_TOOL.to_string(),
            tool_dir: None,
            failure_policy: FailurePolicy::Passthrough,
        }
    }
}

impl ToolsConfig {
    pub fn from_toml_str(config_toml_content: &str) -> Result<ToolsConfig> {
        let config: ToolsConfig = match toml::from_str(config_toml_content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::error!(error = %e, "Failed to parse TOML content");
                return Err(anyhow!(e))
                    .context("Failed to parse configuration TOML content. Check TOML syntax.");
            }
        };
        config.validate()?;
        tracing::info!("Successfully parsed and validated tool configuration.");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<ToolsConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration in {:?}", path))
    }

    pub fn validate(&self) -> Result<()> {
        if self.fhir_tool.trim().is_empty() {
            return Err(anyhow!("'fhir_tool' in config is empty."));
        }
        if self.header_tool.trim().is_empty() {
            return Err(anyhow!("'header_tool' in config is empty."));
        }
        if let Some(dir) = &self.tool_dir {
            if !dir.is_dir() {
                return Err(anyhow!(
                    "'tool_dir' ({}) is not a directory.",
                    dir.display()
                ));
            }
        }
        Ok(())
    }

    pub fn tool_name(&self, kind: ToolKind) -> &str {
        match kind {
            ToolKind::Fhir => &self.fhir_tool,
            ToolKind::Header => &self.header_tool,
        }
    }

    /// Resolves a tool name to the program that gets spawned: the name plus
    /// the host's executable suffix, inside `tool_dir` when one is set.
    pub fn program_path(&self, tool_name: &str) -> PathBuf {
        let file_name = format!("{}{}", tool_name, fetch_platform_suffix());
        match &self.tool_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}
