//! wellknown: generate the standardized static text resources of a website.
//!
//! Renders `security.txt`, `robots.txt`, `humans.txt`, `ads.txt` and an
//! `.htaccess` access-control file from a typed TOML configuration, writes
//! them under the public document root's well-known directory and
//! optionally symlinks each one into the public root itself.
//!
//! The [`engine`] module is the core: reference resolution, write-target
//! safety policy, expiry handling, renderers and the publish pipeline. The
//! [`commands`] module carries the CLI surface built on top of it.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
pub mod config;
pub mod constants;
pub mod engine;
pub mod ui;

/// Command-line interface definition.
#[derive(Debug, Parser)]
#[command(
    name = "wellknown",
    version,
    about = "Generate well-known site resources from typed configuration",
    propagate_version = true
)]
pub struct Cli {
    /// Path to the configuration file (defaults to ./wellknown.toml).
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render and publish every resource to the public root.
    Generate,
    /// Dry run: report what a publish would do without writing anything.
    Check,
    /// Scaffold a starter wellknown.toml in the current directory.
    New {
        /// Overwrite an existing wellknown.toml.
        #[arg(long)]
        force: bool,
    },
}
