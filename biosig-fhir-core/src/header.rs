// biosig-fhir-core/src/header.rs

//! Decoding of the JSON header export produced by `save2gdf -JSON`.
//!
//! The export's schema belongs to libbiosig and is not fixed here, so the
//! decoded header stays a generic [`serde_json::Value`]. [`HeaderSummary`]
//! picks out the handful of fields most callers want.

use serde_json::Value;
use tracing::debug;

/// Parses raw tool output as a JSON document.
///
/// Returns `None` for empty input, invalid JSON, or a document that is just `null`.
pub fn decode_header(bytes: &[u8]) -> Option<Value> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Null) => {
            debug!("Header export decoded to null");
            None
        }
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, len = bytes.len(), "Header export is not valid JSON");
            None
        }
    }
}

/// Typed view over the commonly used header fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderSummary {
    pub file_type: Option<String>,
    pub filename: Option<String>,
    pub number_of_channels: Option<u64>,
    pub number_of_records: Option<u64>,
    pub sampling_rate: Option<f64>,
}

impl HeaderSummary {
    pub fn from_value(header: &Value) -> Self {
        Self {
            file_type: header.get("TYPE").and_then(Value::as_str).map(str::to_string),
            filename: header.get("Filename").and_then(Value::as_str).map(str::to_string),
            number_of_channels: header.get("NumberOfChannels").and_then(as_count),
            number_of_records: header.get("NumberOfRecords").and_then(as_count),
            sampling_rate: header.get("Samplingrate").and_then(Value::as_f64),
        }
    }

    /// True when channel count, record count and sampling rate are all present.
    pub fn is_complete(&self) -> bool {
        self.number_of_channels.is_some()
            && self.number_of_records.is_some()
            && self.sampling_rate.is_some()
    }
}

// libbiosig occasionally writes integral counts as floats ("60.000000").
fn as_count(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as u64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE_HEADER: &str = r#"{
        "TYPE": "BDF",
        "VERSION": "-1",
        "Filename": "data/Newtest17-256.bdf",
        "NumberOfChannels": 17,
        "NumberOfRecords": 60,
        "SamplesPerRecords": 256,
        "Samplingrate": 256.000000,
        "CHANNEL": [ { "ChannelNumber": 1, "Label": "A1" } ]
    }"#;

    #[test]
    fn test_decode_valid_header() {
        let value = decode_header(SAMPLE_HEADER.as_bytes()).expect("header should decode");
        assert_eq!(value["TYPE"], "BDF");
        assert_eq!(value["CHANNEL"][0]["Label"], "A1");
    }

    #[test]
    fn test_decode_invalid_json_is_none() {
        assert!(decode_header(b"not json {").is_none());
        assert!(decode_header(b"").is_none());
        assert!(decode_header(b"null").is_none());
        assert!(decode_header(&[0xff, 0xfe, 0x00]).is_none());
    }

    #[test]
    fn test_decode_keeps_non_object_documents() {
        assert_eq!(decode_header(b"[1, 2]"), Some(json!([1, 2])));
    }

    #[test]
    fn test_summary_extracts_domain_fields() {
        let value = decode_header(SAMPLE_HEADER.as_bytes()).unwrap();
        let summary = HeaderSummary::from_value(&value);
        assert_eq!(summary.file_type.as_deref(), Some("BDF"));
        assert_eq!(summary.filename.as_deref(), Some("data/Newtest17-256.bdf"));
        assert_eq!(summary.number_of_channels, Some(17));
        assert_eq!(summary.number_of_records, Some(60));
        assert_eq!(summary.sampling_rate, Some(256.0));
        assert!(summary.is_complete());
    }

    #[test]
    fn test_summary_accepts_float_counts() {
        let summary = HeaderSummary::from_value(&json!({
            "NumberOfChannels": 4.0,
            "NumberOfRecords": 10.5,
        }));
        assert_eq!(summary.number_of_channels, Some(4));
        assert_eq!(summary.number_of_records, None);
        assert!(!summary.is_complete());
    }

    #[test]
    fn test_summary_of_unrelated_value_is_empty() {
        assert_eq!(HeaderSummary::from_value(&json!("text")), HeaderSummary::default());
    }
}
