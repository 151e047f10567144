// biosig-fhir-cli/src/rendering.rs
use anyhow::Result;
use biosig_fhir_core::HeaderSummary;
use colored::*;
use serde_json::Value;
use std::io::Write;

/// Prints a decoded header as indented JSON, or `NULL` when decoding failed.
pub fn write_header<W: Write>(writer: &mut W, header: Option<&Value>) -> Result<()> {
    match header {
        Some(value) => {
            serde_json::to_writer_pretty(&mut *writer, value)?;
            writeln!(writer)?;
        }
        None => writeln!(writer, "NULL")?,
    }
    Ok(())
}

/// Prints tool output exactly as received, followed by a blank line.
pub fn write_template<W: Write>(writer: &mut W, bytes: &[u8]) -> Result<()> {
    writer.write_all(bytes)?;
    writer.write_all(b"\n\n")?;
    writer.flush()?;
    Ok(())
}

/// One-line description of a header for stderr.
pub fn summary_line(summary: &HeaderSummary) -> String {
    fn field<T: ToString>(value: &Option<T>) -> ColoredString {
        match value {
            Some(v) => v.to_string().bold(),
            None => "?".dimmed(),
        }
    }
    format!(
        "{} {} | channels: {} | records: {} | sampling rate: {} Hz",
        "Header:".cyan().bold(),
        summary.file_type.as_deref().unwrap_or("unknown type"),
        field(&summary.number_of_channels),
        field(&summary.number_of_records),
        field(&summary.sampling_rate),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_header_pretty() {
        let mut out = Vec::new();
        write_header(&mut out, Some(&json!({ "NumberOfChannels": 17 }))).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"NumberOfChannels\": 17\n}\n");
    }

    #[test]
    fn test_write_header_null() {
        let mut out = Vec::new();
        write_header(&mut out, None).unwrap();
        assert_eq!(out, b"NULL\n".to_vec());
    }

    #[test]
    fn test_write_template_keeps_bytes() {
        let mut out = Vec::new();
        write_template(&mut out, b"\xffR0RG").unwrap();
        assert_eq!(out, b"\xffR0RG\n\n".to_vec());
    }

    #[test]
    fn test_summary_line_marks_missing_fields() {
        colored::control::set_override(false);
        let summary = HeaderSummary {
            file_type: Some("GDF".to_string()),
            number_of_channels: Some(3),
            ..HeaderSummary::default()
        };
        let line = summary_line(&summary);
        assert_eq!(
            line,
            "Header: GDF | channels: 3 | records: ? | sampling rate: ? Hz"
        );
    }
}
