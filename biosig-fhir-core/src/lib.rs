// biosig-fhir-core/src/lib.rs

#![doc = include_str!("../../README.md")]

pub mod config;
pub mod errors;
pub mod header;
pub mod platform;
pub mod request;
pub mod tools;

pub use config::{FailurePolicy, ToolsConfig};
pub use errors::InvokeError;
pub use header::{decode_header, HeaderSummary};
pub use platform::{fetch_platform_suffix, platform_suffix, system_identification};
pub use request::{ConversionRequest, ToolKind, ToolMode};
pub use tools::{CommandOutput, ToolInvoker};

/// Sample recording used by the demo front end.
pub const DEMO_FILE: &str = "data/Newtest17-256.bdf";
