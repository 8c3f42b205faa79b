//! Publish the well-known resources to the public root.
//!
//! Loads `wellknown.toml`, runs the publish pipeline once per resource and
//! prints one progress line per resource plus a summary. The engine itself
//! stays silent; all reporting lives here.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use crate::engine::Publisher;

/// Run the publish pipeline against the configured public root.
pub fn execute(config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    debug!(
        public_dir = %config.public_dir.display(),
        override_existing = config.override_existing,
        alias_to_public = config.alias_to_public,
        "starting publish run"
    );

    println!("Publishing well-known resources to {}", config.public_dir.display());
    println!();

    let report = Publisher::new(&config)
        .publish_all()
        .context("Publish run aborted")?;

    super::print_report(&report);

    let written = report.written_count();
    if written == 0 {
        println!("Nothing to write");
    } else {
        println!("Wrote {written} resource{}", if written == 1 { "" } else { "s" });
    }

    if report.has_failures() {
        anyhow::bail!("One or more resources failed to publish");
    }

    Ok(())
}
