//! CLI command implementations for wellknown.
//!
//! Each submodule implements a specific command:
//!
//! - [`generate`] - Render and publish every resource to the public root
//! - [`check`] - Dry run: report what a publish would do, writing nothing
//! - [`new`] - Scaffold a starter `wellknown.toml`

pub mod check;
pub mod generate;
pub mod new;

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::EngineConfig;
use crate::constants;
use crate::engine::PublishReport;

/// Load and validate the configuration, printing any warnings.
///
/// Used by `generate` and `check`; validation errors abort the command.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::load_from(path)?,
        None => EngineConfig::load().with_context(|| {
            format!(
                "No {} found in the current directory. Run 'wellknown new' first.",
                constants::CONFIG_FILENAME
            )
        })?,
    };

    let validation = config.validate()?;
    for warning in &validation.warnings {
        eprintln!("Warning: {warning}");
    }
    if validation.has_warnings() {
        eprintln!();
    }

    Ok(config)
}

/// Print one progress line per resource, mirroring the report order.
pub(crate) fn print_report(report: &PublishReport) {
    for resource in &report.resources {
        if resource.outcome.is_written() {
            println!("  + {} -> {}", resource.kind, resource.path.display());
        } else {
            println!("  - {} ({})", resource.kind, resource.outcome);
        }
    }
    println!();
}
