//! Dry-run the publish pipeline.
//!
//! Renders every resource and reports what a real run would write or skip,
//! without touching the public root (no files, no directories, no links).

use anyhow::{Context, Result};
use std::path::Path;

use crate::engine::Publisher;

/// Report what `generate` would do, writing nothing.
pub fn execute(config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;

    println!(
        "Checking well-known resources against {} (dry run)",
        config.public_dir.display()
    );
    println!();

    let report = Publisher::new(&config)
        .preview_all()
        .context("Check run failed")?;

    super::print_report(&report);

    println!("Would write {} resource(s); nothing was changed", report.written_count());

    if report.has_failures() {
        anyhow::bail!("One or more resources would fail to publish");
    }

    Ok(())
}
