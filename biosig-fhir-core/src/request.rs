// biosig-fhir-core/src/request.rs

use crate::errors::InvokeError;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which representation to ask the BioSig tools for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolMode {
    /// Base64-encoded GDF v3 stream (`biosig_fhir -base64`).
    Base64,
    /// FHIR `Binary` resource as JSON (`biosig_fhir -json`).
    Json,
    /// FHIR `Binary` resource as XML (`biosig_fhir -xml`).
    Xml,
    /// Header metadata as JSON (`save2gdf -JSON`).
    Header,
}

/// Which of the two configured executables a mode runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Fhir,
    Header,
}

impl ToolMode {
    pub const ALL: [ToolMode; 4] = [
        ToolMode::Header,
        ToolMode::Base64,
        ToolMode::Json,
        ToolMode::Xml,
    ];

    /// The command-line flag passed to the tool.
    pub fn flag(self) -> &'static str {
        match self {
            ToolMode::Base64 => "-base64",
            ToolMode::Json => "-json",
            ToolMode::Xml => "-xml",
            ToolMode::Header => "-JSON",
        }
    }

    pub fn tool_kind(self) -> ToolKind {
        match self {
            ToolMode::Header => ToolKind::Header,
            _ => ToolKind::Fhir,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToolMode::Base64 => "base64",
            ToolMode::Json => "json",
            ToolMode::Xml => "xml",
            ToolMode::Header => "header",
        }
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base64" => Ok(ToolMode::Base64),
            "json" => Ok(ToolMode::Json),
            "xml" => Ok(ToolMode::Xml),
            "header" => Ok(ToolMode::Header),
            other => Err(format!(
                "unknown mode '{}', expected one of: base64, json, xml, header",
                other
            )),
        }
    }
}

/// A single conversion: one input file, one output mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub filename: PathBuf,
    pub mode: ToolMode,
}

impl ConversionRequest {
    pub fn new(filename: impl Into<PathBuf>, mode: ToolMode) -> Self {
        Self {
            filename: filename.into(),
            mode,
        }
    }

    /// Checks that `filename` names an existing, readable regular file.
    pub fn validate(&self) -> Result<(), InvokeError> {
        check_readable(&self.filename)
    }
}

fn check_readable(path: &Path) -> Result<(), InvokeError> {
    if !path.is_file() {
        return Err(InvokeError::InputNotFound(path.to_path_buf()));
    }
    File::open(path)
        .map(|_| ())
        .map_err(|source| InvokeError::InputUnreadable {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_flags_match_tool_contract() {
        assert_eq!(ToolMode::Base64.flag(), "-base64");
        assert_eq!(ToolMode::Json.flag(), "-json");
        assert_eq!(ToolMode::Xml.flag(), "-xml");
        assert_eq!(ToolMode::Header.flag(), "-JSON");
        assert_eq!(ToolMode::Header.tool_kind(), ToolKind::Header);
        assert_eq!(ToolMode::Xml.tool_kind(), ToolKind::Fhir);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("JSON".parse::<ToolMode>(), Ok(ToolMode::Json));
        assert_eq!(" header ".parse::<ToolMode>(), Ok(ToolMode::Header));
        let err = "edf".parse::<ToolMode>().unwrap_err();
        assert!(err.contains("unknown mode 'edf'"));
        for mode in ToolMode::ALL {
            assert_eq!(mode.to_string().parse::<ToolMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_validate_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.gdf");
        fs::write(&path, b"GDF 3.00").unwrap();
        let request = ConversionRequest::new(&path, ToolMode::Header);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_file() {
        let dir = tempdir().unwrap();
        let request = ConversionRequest::new(dir.path().join("missing.bdf"), ToolMode::Json);
        match request.validate() {
            Err(InvokeError::InputNotFound(p)) => assert!(p.ends_with("missing.bdf")),
            other => panic!("expected InputNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_directory_is_rejected() {
        let dir = tempdir().unwrap();
        let request = ConversionRequest::new(dir.path(), ToolMode::Base64);
        assert!(matches!(request.validate(), Err(InvokeError::InputNotFound(_))));
    }
}
