//! Output modes and structured serialization.
//!
//! [`OutputMode::Text`] renders the result table. The structured modes
//! serialize a [`Report`] directly.

use clap::ValueEnum;
use screener_core::{Record, ScreenView, SortState};
use serde::Serialize;
use thiserror::Error;

/// Controls how the result is written.
///
/// This is the user-facing enum for the `--output` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// Column-aligned table
    #[default]
    Text,
    /// JSON report
    Json,
    /// YAML report
    Yaml,
    /// XML report
    Xml,
    /// One CSV row per matching record
    Csv,
}

impl OutputMode {
    /// Returns true if this is a structured output mode (JSON, YAML, XML, CSV).
    pub fn is_structured(&self) -> bool {
        !matches!(self, OutputMode::Text)
    }
}

/// Errors that can occur during serialization.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("XML serialization failed: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Not a structured output mode")]
    NotStructured,
}

/// Serializable summary of a derived view.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    /// Records in the source collection.
    pub total: usize,
    /// Records in the view.
    pub matched: usize,
    /// Current ordering, e.g. `cup_depth desc`.
    pub sort: String,
    /// Matching records in display order.
    pub records: Vec<&'a Record>,
}

impl<'a> Report<'a> {
    /// Builds a report from a view and the state that produced it.
    pub fn new(view: &ScreenView<'a>, sort: SortState) -> Self {
        Report {
            total: view.total(),
            matched: view.len(),
            sort: sort.to_string(),
            records: view.records().to_vec(),
        }
    }
}

/// Serializes a report to the specified structured format.
///
/// Returns an error if the output mode is not a structured mode.
pub fn serialize_report(report: &Report<'_>, mode: OutputMode) -> Result<String, SerializeError> {
    match mode {
        OutputMode::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputMode::Yaml => Ok(serde_yaml::to_string(report)?),
        OutputMode::Xml => Ok(quick_xml::se::to_string_with_root("report", report)?),
        OutputMode::Csv => records_to_csv(&report.records),
        OutputMode::Text => Err(SerializeError::NotStructured),
    }
}

/// Writes one CSV row per record, with a header row using the file's
/// field names.
pub fn records_to_csv(records: &[&Record]) -> Result<String, SerializeError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    if records.is_empty() {
        wtr.write_record(HEADERS)?;
    }
    for record in records {
        wtr.serialize(record)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

const HEADERS: [&str; 7] = [
    "code",
    "name",
    "price",
    "detectionDate",
    "cupDepth",
    "handleDays",
    "volumeRatio",
];

#[cfg(test)]
mod tests {
    use super::*;
    use screener_core::{derive_view, Field, ScreenParams};

    fn records() -> Vec<Record> {
        vec![Record {
            code: "A".into(),
            name: "Alpha".into(),
            price: 100.0,
            detection_date: "2024-01-02".into(),
            cup_depth: 10.0,
            handle_days: 5.0,
            volume_ratio: 1.2,
        }]
    }

    #[test]
    fn test_json_report() {
        let source = records();
        let sort = SortState::asc(Field::Price);
        let view = derive_view(&source, &ScreenParams::new().sort(sort));
        let result = serialize_report(&Report::new(&view, sort), OutputMode::Json).unwrap();

        assert!(result.contains("\"total\": 1"));
        assert!(result.contains("\"matched\": 1"));
        assert!(result.contains("\"sort\": \"price asc\""));
        assert!(result.contains("\"cupDepth\": 10.0"));
    }

    #[test]
    fn test_yaml_report() {
        let source = records();
        let view = derive_view(&source, &ScreenParams::new());
        let result =
            serialize_report(&Report::new(&view, SortState::Unsorted), OutputMode::Yaml).unwrap();

        assert!(result.contains("sort: unsorted"));
        assert!(result.contains("code: A"));
    }

    #[test]
    fn test_xml_report() {
        let source = records();
        let view = derive_view(&source, &ScreenParams::new());
        let result =
            serialize_report(&Report::new(&view, SortState::Unsorted), OutputMode::Xml).unwrap();

        assert!(result.starts_with("<report>"));
        assert!(result.contains("<code>A</code>"));
    }

    #[test]
    fn test_csv_rows() {
        let source = records();
        let refs: Vec<&Record> = source.iter().collect();
        let result = records_to_csv(&refs).unwrap();

        let mut lines = result.lines();
        assert_eq!(
            lines.next(),
            Some("code,name,price,detectionDate,cupDepth,handleDays,volumeRatio")
        );
        assert_eq!(lines.next(), Some("A,Alpha,100.0,2024-01-02,10.0,5.0,1.2"));
    }

    #[test]
    fn test_csv_empty_still_has_header() {
        let result = records_to_csv(&[]).unwrap();
        assert_eq!(result.trim(), HEADERS.join(","));
    }

    #[test]
    fn test_text_is_not_structured() {
        let source = records();
        let view = derive_view(&source, &ScreenParams::new());
        let result = serialize_report(&Report::new(&view, SortState::Unsorted), OutputMode::Text);
        assert!(matches!(result, Err(SerializeError::NotStructured)));
        assert!(!OutputMode::Text.is_structured());
        assert!(OutputMode::Csv.is_structured());
    }
}
