//! Loading detection results into a validated snapshot.
//!
//! The detection-result file is a JSON array with one object per record:
//!
//! ```json
//! [
//!   {
//!     "code": "7203",
//!     "name": "トヨタ自動車",
//!     "price": 2850.5,
//!     "detectionDate": "2024-01-15",
//!     "cupDepth": 22.4,
//!     "handleDays": 8,
//!     "volumeRatio": 1.75
//!   }
//! ]
//! ```
//!
//! Every numeric field must be finite and non-negative and every code must
//! be unique. The engine assumes both once records leave this module.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, ScreenerError};
use crate::record::{Field, Record};

/// Parses and validates records from a JSON string.
pub fn from_json_str(json: &str) -> Result<Vec<Record>> {
    let records: Vec<Record> = serde_json::from_str(json)?;
    validate(&records)?;
    debug!(count = records.len(), "loaded detection results");
    Ok(records)
}

/// Parses and validates records from a reader.
pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Record>> {
    let records: Vec<Record> = serde_json::from_reader(reader)?;
    validate(&records)?;
    debug!(count = records.len(), "loaded detection results");
    Ok(records)
}

/// Reads, parses and validates a detection-result file.
pub fn load_path(path: &Path) -> Result<Vec<Record>> {
    debug!(path = %path.display(), "reading detection results");
    let file = File::open(path)?;
    from_reader(BufReader::new(file))
}

/// Checks the loader-level invariants: finite, non-negative numbers and
/// unique codes.
pub fn validate(records: &[Record]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        for field in [
            Field::Price,
            Field::CupDepth,
            Field::HandleDays,
            Field::VolumeRatio,
        ] {
            let value = record.number(field).unwrap_or_default();
            if !value.is_finite() || value < 0.0 {
                warn!(code = %record.code, %field, value, "rejecting record");
                return Err(ScreenerError::InvalidMetric {
                    code: record.code.clone(),
                    field,
                    value,
                });
            }
        }
        if !seen.insert(record.code.as_str()) {
            warn!(code = %record.code, "duplicate record code");
            return Err(ScreenerError::DuplicateCode(record.code.clone()));
        }
    }
    Ok(())
}

/// Built-in demonstration data set.
pub fn sample_records() -> Vec<Record> {
    [
        ("7203", "トヨタ自動車", 2850.5, "2024-01-15", 22.4, 8.0, 1.75),
        ("6758", "ソニーグループ", 13250.0, "2024-01-16", 18.9, 12.0, 2.10),
        ("9984", "ソフトバンクグループ", 6820.0, "2024-01-12", 31.5, 6.0, 3.42),
        ("6861", "キーエンス", 64500.0, "2024-01-18", 15.2, 10.0, 1.18),
        ("8035", "東京エレクトロン", 26300.0, "2024-01-10", 27.8, 15.0, 2.65),
        ("4063", "信越化学工業", 5620.0, "2024-01-17", 12.6, 5.0, 1.42),
        ("6098", "リクルートホールディングス", 5930.0, "2024-01-11", 24.1, 9.0, 1.96),
        ("9432", "日本電信電話", 178.3, "2024-01-19", 9.8, 4.0, 0.88),
        ("7974", "任天堂", 7720.0, "2024-01-15", 19.7, 11.0, 2.31),
        ("4519", "中外製薬", 5310.0, "2024-01-14", 33.2, 18.0, 1.54),
    ]
    .into_iter()
    .map(
        |(code, name, price, date, cup_depth, handle_days, volume_ratio)| Record {
            code: code.to_string(),
            name: name.to_string(),
            price,
            detection_date: date.to_string(),
            cup_depth,
            handle_days,
            volume_ratio,
        },
    )
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO: &str = r#"[
        {"code": "A", "name": "Alpha", "price": 10, "detectionDate": "2024-01-01",
         "cupDepth": 10, "handleDays": 5, "volumeRatio": 1.2},
        {"code": "B", "name": "Beta", "price": 20, "detectionDate": "2024-01-02",
         "cupDepth": 50, "handleDays": 20, "volumeRatio": 3.0}
    ]"#;

    #[test]
    fn parses_file_field_names() {
        let records = from_json_str(TWO).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].detection_date, "2024-01-01");
        assert_eq!(records[1].handle_days, 20.0);
    }

    #[test]
    fn rejects_duplicate_codes() {
        let json = TWO.replace(r#""code": "B""#, r#""code": "A""#);
        assert!(matches!(
            from_json_str(&json),
            Err(ScreenerError::DuplicateCode(code)) if code == "A"
        ));
    }

    #[test]
    fn rejects_negative_metric() {
        let json = TWO.replace(r#""cupDepth": 50"#, r#""cupDepth": -1"#);
        assert!(matches!(
            from_json_str(&json),
            Err(ScreenerError::InvalidMetric { field: Field::CupDepth, code, .. }) if code == "B"
        ));
    }

    #[test]
    fn rejects_missing_field() {
        let json = r#"[{"code": "A", "name": "Alpha"}]"#;
        assert!(matches!(from_json_str(json), Err(ScreenerError::Parse(_))));
    }

    #[test]
    fn validate_rejects_nan() {
        let mut records = sample_records();
        records[3].volume_ratio = f64::NAN;
        assert!(matches!(
            validate(&records),
            Err(ScreenerError::InvalidMetric {
                field: Field::VolumeRatio,
                ..
            })
        ));
    }

    #[test]
    fn sample_is_valid() {
        let records = sample_records();
        assert_eq!(records.len(), 10);
        assert!(validate(&records).is_ok());
    }
}
