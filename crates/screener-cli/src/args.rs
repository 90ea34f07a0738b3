//! Command-line arguments.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use screener_core::{Bounds, Field, RangeConditions, SortState};

use crate::output::OutputMode;

/// Screen cup-with-handle detection results by metric ranges, text and column order.
#[derive(Debug, Clone, Parser)]
#[command(name = "screener", version, about)]
pub struct Cli {
    /// Detection-result JSON file. Uses the built-in sample when omitted.
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// YAML or JSON file with a saved condition set.
    #[arg(long, value_name = "PATH")]
    pub conditions: Option<PathBuf>,

    /// Minimum cup depth (%).
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub min_depth: Option<f64>,

    /// Maximum cup depth (%).
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub max_depth: Option<f64>,

    /// Minimum handle length in days.
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub min_handle: Option<f64>,

    /// Maximum handle length in days.
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub max_handle: Option<f64>,

    /// Minimum volume ratio.
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub min_volume: Option<f64>,

    /// Maximum volume ratio.
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub max_volume: Option<f64>,

    /// Case-insensitive text matched against code and name.
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Column selection; repeat to cycle asc → desc → unsorted.
    #[arg(short, long = "sort", value_name = "FIELD", value_parser = parse_field)]
    pub sort: Vec<Field>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputMode::Text)]
    pub output: OutputMode,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_field(s: &str) -> Result<Field, String> {
    s.parse::<Field>().map_err(|e| e.to_string())
}

impl Cli {
    /// Builds the condition set: defaults, then the conditions file, then
    /// explicit flags.
    pub fn range_conditions(&self) -> anyhow::Result<RangeConditions> {
        let mut conditions = match &self.conditions {
            Some(path) => read_conditions(path)?,
            None => RangeConditions::default(),
        };

        let overrides = [
            (Field::CupDepth, self.min_depth, self.max_depth),
            (Field::HandleDays, self.min_handle, self.max_handle),
            (Field::VolumeRatio, self.min_volume, self.max_volume),
        ];
        for (field, min, max) in overrides {
            let current = conditions.bounds(field).unwrap_or_default();
            let bounds = Bounds::try_new(
                field,
                min.unwrap_or(current.min),
                max.unwrap_or(current.max),
            )?;
            if bounds.is_inverted() {
                tracing::warn!(%field, min = bounds.min, max = bounds.max, "inverted bounds match nothing");
            }
            conditions = conditions.with(field, bounds)?;
        }
        Ok(conditions)
    }

    /// Folds the `--sort` selections through the sort state machine.
    pub fn sort_state(&self) -> SortState {
        self.sort
            .iter()
            .fold(SortState::Unsorted, |state, field| state.select(*field))
    }
}

/// Reads a condition set, choosing the format by extension.
pub fn read_conditions(path: &Path) -> anyhow::Result<RangeConditions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read conditions from {}", path.display()))?;

    let conditions: RangeConditions = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&text)
            .with_context(|| format!("invalid YAML in {}", path.display()))?,
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("invalid JSON in {}", path.display()))?,
        _ => bail!(
            "unsupported conditions file {} (expected .yaml, .yml or .json)",
            path.display()
        ),
    };

    for field in Field::METRICS {
        if let Some(bounds) = conditions.bounds(field) {
            Bounds::try_new(field, bounds.min, bounds.max)?;
        }
    }
    Ok(conditions)
}
