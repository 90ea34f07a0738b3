//! Record model and field access.
//!
//! A [`Record`] is one detection result. Columns are named by the closed
//! [`Field`] enum, and [`Record::value`] extracts a column as a borrowed
//! [`Value`] for comparison.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScreenerError;

/// One screened stock with its detected cup-with-handle metrics.
///
/// Field names on the wire follow the detection-result file
/// (`detectionDate`, `cupDepth`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Stock code. Unique within a collection.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Last price.
    pub price: f64,
    /// Detection date, compared lexically (e.g. `2024-01-15`).
    pub detection_date: String,
    /// Depth of the cup, in percent.
    pub cup_depth: f64,
    /// Length of the handle, in trading days.
    pub handle_days: f64,
    /// Volume relative to the trailing average.
    pub volume_ratio: f64,
}

impl Record {
    /// Returns the value of `field` for comparison.
    pub fn value(&self, field: Field) -> Value<'_> {
        match field {
            Field::Code => Value::Text(&self.code),
            Field::Name => Value::Text(&self.name),
            Field::DetectionDate => Value::Text(&self.detection_date),
            Field::Price => Value::Number(self.price),
            Field::CupDepth => Value::Number(self.cup_depth),
            Field::HandleDays => Value::Number(self.handle_days),
            Field::VolumeRatio => Value::Number(self.volume_ratio),
        }
    }

    /// Returns the numeric value of `field`, or `None` for text columns.
    pub fn number(&self, field: Field) -> Option<f64> {
        self.value(field).as_number()
    }

    /// Returns the text value of `field`, or `None` for numeric columns.
    pub fn text(&self, field: Field) -> Option<&str> {
        self.value(field).as_text()
    }
}

/// A sortable column of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Code,
    Name,
    Price,
    #[serde(alias = "detectionDate")]
    DetectionDate,
    #[serde(alias = "cupDepth")]
    CupDepth,
    #[serde(alias = "handleDays")]
    HandleDays,
    #[serde(alias = "volumeRatio")]
    VolumeRatio,
}

/// How values of a [`Field`] are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Collated string ordering.
    Text,
    /// Numeric ordering.
    Numeric,
}

impl Field {
    /// All columns, in table order.
    pub const ALL: [Field; 7] = [
        Field::Code,
        Field::Name,
        Field::Price,
        Field::DetectionDate,
        Field::CupDepth,
        Field::HandleDays,
        Field::VolumeRatio,
    ];

    /// The three pattern metrics that range conditions apply to.
    pub const METRICS: [Field; 3] = [Field::CupDepth, Field::HandleDays, Field::VolumeRatio];

    /// Returns the comparison kind of this column.
    pub fn kind(self) -> FieldKind {
        match self {
            Field::Code | Field::Name | Field::DetectionDate => FieldKind::Text,
            Field::Price | Field::CupDepth | Field::HandleDays | Field::VolumeRatio => {
                FieldKind::Numeric
            }
        }
    }

    /// Returns `true` if range conditions apply to this column.
    pub fn is_metric(self) -> bool {
        matches!(self, Field::CupDepth | Field::HandleDays | Field::VolumeRatio)
    }

    /// Returns the canonical name of this column.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Code => "code",
            Field::Name => "name",
            Field::Price => "price",
            Field::DetectionDate => "detection_date",
            Field::CupDepth => "cup_depth",
            Field::HandleDays => "handle_days",
            Field::VolumeRatio => "volume_ratio",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Field {
    type Err = ScreenerError;

    /// Parses a canonical name, the camelCase file spelling, or a
    /// dashed variant (`cup-depth`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        let field = match normalized.as_str() {
            "code" => Field::Code,
            "name" => Field::Name,
            "price" => Field::Price,
            "detection_date" | "detectionDate" => Field::DetectionDate,
            "cup_depth" | "cupDepth" => Field::CupDepth,
            "handle_days" | "handleDays" => Field::HandleDays,
            "volume_ratio" | "volumeRatio" => Field::VolumeRatio,
            _ => return Err(ScreenerError::UnknownField(s.to_string())),
        };
        Ok(field)
    }
}

/// Runtime value of a column, borrowed from the record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// String column.
    Text(&'a str),
    /// Numeric column.
    Number(f64),
}

impl<'a> Value<'a> {
    /// Extracts the string value, if present.
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Number(_) => None,
        }
    }

    /// Extracts the numeric value, if present.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }
}
