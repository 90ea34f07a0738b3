//! Range conditions over the pattern metrics.
//!
//! A [`RangeConditions`] holds one inclusive [`Bounds`] per metric. A record
//! passes when every metric lies within its bounds:
//!
//! ```text
//! match = cup_depth ∈ [min, max] ∧ handle_days ∈ [min, max] ∧ volume_ratio ∈ [min, max]
//! ```
//!
//! Bounds are not required to be ordered. An inverted pair (`min > max`)
//! matches nothing, so every record fails that field.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScreenerError};
use crate::record::{Field, Record};

/// Inclusive `[min, max]` interval for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Default interval, `[0, 100]`.
    pub const DEFAULT: Bounds = Bounds {
        min: 0.0,
        max: 100.0,
    };

    /// Creates bounds without validation.
    ///
    /// A NaN bound never compares true, so it excludes every record.
    pub const fn new(min: f64, max: f64) -> Self {
        Bounds { min, max }
    }

    /// Creates bounds for `field`, rejecting NaN and infinite values.
    pub fn try_new(field: Field, min: f64, max: f64) -> Result<Self> {
        for value in [min, max] {
            if !value.is_finite() {
                return Err(ScreenerError::NonFiniteBound { field, value });
            }
        }
        Ok(Bounds { min, max })
    }

    /// Returns `true` if `value` lies within the interval, both ends included.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Returns `true` if `min > max`.
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::DEFAULT
    }
}

/// The six-bound filter configuration.
///
/// Missing entries in a serialized condition set fall back to the default
/// `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConditions {
    #[serde(alias = "cupDepth")]
    pub cup_depth: Bounds,
    #[serde(alias = "handleDays")]
    pub handle_days: Bounds,
    #[serde(alias = "volumeRatio")]
    pub volume_ratio: Bounds,
}

impl RangeConditions {
    /// Creates the default condition set.
    pub fn new() -> Self {
        RangeConditions::default()
    }

    /// Returns the bounds configured for a metric.
    pub fn bounds(&self, field: Field) -> Option<Bounds> {
        match field {
            Field::CupDepth => Some(self.cup_depth),
            Field::HandleDays => Some(self.handle_days),
            Field::VolumeRatio => Some(self.volume_ratio),
            _ => None,
        }
    }

    /// Replaces the bounds of one metric.
    ///
    /// Returns [`ScreenerError::NotAMetric`] for non-metric columns.
    pub fn with(mut self, field: Field, bounds: Bounds) -> Result<Self> {
        let slot = match field {
            Field::CupDepth => &mut self.cup_depth,
            Field::HandleDays => &mut self.handle_days,
            Field::VolumeRatio => &mut self.volume_ratio,
            other => return Err(ScreenerError::NotAMetric(other)),
        };
        *slot = bounds;
        Ok(self)
    }

    /// Tests a single record against every metric.
    pub fn matches(&self, record: &Record) -> bool {
        self.cup_depth.contains(record.cup_depth)
            && self.handle_days.contains(record.handle_days)
            && self.volume_ratio.contains(record.volume_ratio)
    }

    /// Filters a slice, preserving order. See [`filter_by_range`].
    pub fn filter<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        filter_by_range(records, self)
    }
}

/// Keeps the records whose metrics all satisfy `conditions`.
///
/// The input is never modified; relative order is preserved.
pub fn filter_by_range<'a>(
    records: &'a [Record],
    conditions: &RangeConditions,
) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| conditions.matches(record))
        .collect()
}
