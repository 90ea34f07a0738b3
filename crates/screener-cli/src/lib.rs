//! Command-line front end for the screener engine.
//!
//! Loads detection results, derives the view for the requested conditions,
//! query and column selections, and renders it as a table or as
//! structured data.

pub mod args;
pub mod output;
pub mod table;

use anyhow::Context;
use screener_core::{derive_view, loader, Record, ScreenParams};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use args::Cli;
pub use output::{OutputMode, Report, SerializeError};

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects the level.
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Loads the records named by the arguments.
pub fn load_records(cli: &Cli) -> anyhow::Result<Vec<Record>> {
    match &cli.data {
        Some(path) => loader::load_path(path)
            .with_context(|| format!("failed to load {}", path.display())),
        None => {
            info!("no --data given, using the built-in sample");
            Ok(loader::sample_records())
        }
    }
}

/// Runs one screening pass and returns the rendered output.
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    let records = load_records(cli)?;
    let params = ScreenParams::new()
        .conditions(cli.range_conditions()?)
        .query(cli.query.as_str())
        .sort(cli.sort_state());

    let view = derive_view(&records, &params);
    info!(
        matched = view.len(),
        total = view.total(),
        sort = %params.sort,
        "screening complete"
    );

    match cli.output {
        OutputMode::Text => Ok(table::render(&view, params.sort)),
        mode => {
            let report = Report::new(&view, params.sort);
            let mut out = output::serialize_report(&report, mode)?;
            if !out.ends_with('\n') {
                out.push('\n');
            }
            Ok(out)
        }
    }
}
