// biosig-fhir-core/src/platform.rs

//! Host platform detection for executable names.

use lazy_static::lazy_static;
use regex::Regex;
use std::env::consts;

/// Executable suffix used on Windows hosts.
pub const WINDOWS_EXE_SUFFIX: &str = ".exe";

lazy_static! {
    static ref WINDOWS_RE: Regex = Regex::new(r"(?i)windows").unwrap();
}

/// Returns a string identifying the host system, e.g. `"linux unix x86_64"`.
pub fn system_identification() -> String {
    format!("{} {} {}", consts::OS, consts::FAMILY, consts::ARCH)
}

/// Maps a system identification string to the executable suffix for that host.
pub fn platform_suffix(system_id: &str) -> &'static str {
    if WINDOWS_RE.is_match(system_id) {
        WINDOWS_EXE_SUFFIX
    } else {
        ""
    }
}

/// Suffix appended to tool names on the current host.
pub fn fetch_platform_suffix() -> &'static str {
    platform_suffix(&system_identification())
}
