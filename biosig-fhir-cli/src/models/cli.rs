use biosig_fhir_core::{ToolMode, DEMO_FILE};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// BioSig FHIR demo: exports a biosignal file through the BioSig tools.
///
/// Without options it prints the decoded header of the sample recording,
/// then its base64 stream, then its FHIR JSON template.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase message verbosity.
    ///
    /// Specify multiple times for more verbose output:
    ///  -v:  INFO level
    ///  -vv: DEBUG level
    ///  -vvv: TRACE level (most verbose)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Biosignal file to export.
    #[arg(default_value = DEMO_FILE)]
    pub file: PathBuf,

    /// Outputs to produce, in order (header, base64, json, xml).
    /// Repeat the flag for several outputs. Defaults to header, base64, json.
    #[arg(short, long = "mode", value_parser = parse_mode)]
    pub modes: Vec<ToolMode>,

    /// Path to a BiosigFhir.toml file. Searched upwards from the current directory if omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Treat a non-zero exit of an external tool as an error.
    #[arg(long)]
    pub strict: bool,
}

fn parse_mode(s: &str) -> Result<ToolMode, String> {
    s.parse()
}

impl Cli {
    /// The modes to run, falling back to the demo sequence.
    pub fn selected_modes(&self) -> Vec<ToolMode> {
        if self.modes.is_empty() {
            vec![ToolMode::Header, ToolMode::Base64, ToolMode::Json]
        } else {
            self.modes.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reproduce_demo() {
        let cli = Cli::try_parse_from(["biosig-fhir-demo"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("data/Newtest17-256.bdf"));
        assert_eq!(
            cli.selected_modes(),
            vec![ToolMode::Header, ToolMode::Base64, ToolMode::Json]
        );
        assert_eq!(cli.verbose, 0);
        assert!(!cli.strict);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_explicit_modes_keep_order() {
        let cli = Cli::try_parse_from([
            "biosig-fhir-demo",
            "-vv",
            "-m",
            "xml",
            "--mode",
            "HEADER",
            "--strict",
            "recording.gdf",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.strict);
        assert_eq!(cli.file, PathBuf::from("recording.gdf"));
        assert_eq!(cli.selected_modes(), vec![ToolMode::Xml, ToolMode::Header]);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["biosig-fhir-demo", "-m", "edf"]).is_err());
    }
}
