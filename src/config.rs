//! Configuration types for the wellknown engine.
//!
//! This module provides the typed configuration tree loaded from
//! `wellknown.toml`. It includes:
//!
//! - [`EngineConfig`] - Root configuration struct
//! - [`SecurityTxtConfig`] - `security.txt` field values
//! - [`RobotsGroup`] - one `robots.txt` rule group
//!
//! All configuration types support serde deserialization and are built once
//! at startup; the engine never mutates them. Field presence is a
//! type-system concern here (`Option`/`Vec`), not a runtime key lookup.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;

/// Result of configuration validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Non-fatal warnings that should be logged but don't prevent operation.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// wellknown.toml configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Master switch for the generated resources. `.htaccess` is exempt.
    #[serde(default = "default_true")]
    pub enable: bool,
    /// Overwrite resources that already exist on disk.
    #[serde(default)]
    pub override_existing: bool,
    /// Symlink each generated file into the public root.
    #[serde(default = "default_true")]
    pub alias_to_public: bool,
    /// The public document root.
    pub public_dir: PathBuf,
    /// Sub-directory of the public root holding the generated resources.
    #[serde(default = "default_location_uri")]
    pub location_uri: String,
    #[serde(default)]
    pub security_txt: SecurityTxtConfig,
    /// `robots.txt` rule groups, in emission order.
    #[serde(default)]
    pub robots_txt: Vec<RobotsGroup>,
    /// Source file whose contents become `humans.txt`, copied verbatim.
    #[serde(default)]
    pub humans_txt: Option<PathBuf>,
    /// `ads.txt` entries: one record per entry, field tokens in order
    /// (exchange domain, publisher ID, relationship, certification ID).
    #[serde(default)]
    pub ads_txt: Vec<Vec<String>>,
    /// Redirect target for the `/.well-known/change-password` probe,
    /// emitted into `.htaccess`.
    #[serde(default)]
    pub change_password: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_location_uri() -> String {
    constants::DEFAULT_LOCATION_URI.to_string()
}

/// `security.txt` field values. Absent fields are omitted from the output
/// entirely; there are no empty-valued field lines.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityTxtConfig {
    pub canonical: Option<String>,
    pub encryption: Option<String>,
    /// Expiry expression: literal RFC 3339 or relative offset like `+1y`.
    pub expires: Option<String>,
    #[serde(default)]
    pub contacts: Vec<String>,
    #[serde(default)]
    pub preferred_languages: Vec<String>,
    pub acknowledgements: Option<String>,
    pub policy: Option<String>,
    pub hiring: Option<String>,
}

impl SecurityTxtConfig {
    /// True when no field would produce output.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.canonical.is_none()
            && self.encryption.is_none()
            && self.expires.is_none()
            && self.contacts.is_empty()
            && self.preferred_languages.is_empty()
            && self.acknowledgements.is_none()
            && self.policy.is_none()
            && self.hiring.is_none()
    }
}

/// One `robots.txt` rule group: a block of directives scoped to one or
/// more user-agent tokens.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RobotsGroup {
    /// User-agent tokens; an empty list means `*`.
    #[serde(default)]
    pub user_agent: Vec<String>,
    #[serde(default)]
    pub allow: Vec<String>,
    #[serde(default)]
    pub disallow: Vec<String>,
    #[serde(default)]
    pub sitemap: Vec<String>,
}

impl EngineConfig {
    /// Load configuration from wellknown.toml in the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if wellknown.toml cannot be read or contains
    /// invalid TOML.
    pub fn load() -> Result<Self> {
        Self::load_from(constants::CONFIG_FILENAME)
    }

    /// Load configuration from the specified path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (IO error)
    /// - The file contains invalid TOML syntax
    /// - Required fields are missing or have invalid types
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: EngineConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration with comprehensive checks.
    ///
    /// Returns a `ValidationResult` containing any non-fatal warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails with one or more errors:
    /// - Empty public directory
    /// - Absolute or traversing `location_uri`
    /// - Empty ads.txt records
    pub fn validate(&self) -> Result<ValidationResult> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.public_dir.as_os_str().is_empty() {
            errors.push("public_dir cannot be empty".to_string());
        }

        let location = self.location_uri.trim_start_matches('/');
        if location.is_empty() {
            errors.push("location_uri cannot be empty".to_string());
        }
        if location.split('/').any(|segment| segment == "..") {
            errors.push(format!(
                "location_uri must stay under public_dir (got: '{}')",
                self.location_uri
            ));
        }

        if self.enable && self.security_txt.is_empty() {
            warnings.push(
                "security.txt is enabled but has no fields configured; nothing will be published"
                    .to_string(),
            );
        }
        if self.enable && !self.security_txt.is_empty() && self.security_txt.contacts.is_empty() {
            warnings.push(
                "security.txt has no contacts; the Contact field is required by RFC 9116"
                    .to_string(),
            );
        }

        for (i, group) in self.robots_txt.iter().enumerate() {
            for path in group.allow.iter().chain(&group.disallow) {
                if !path.starts_with('/') && !path.contains("://") {
                    warnings.push(format!(
                        "robots.txt group {} has a relative rule path '{}'; \
                         crawlers expect rule paths to start with '/'",
                        i + 1,
                        path
                    ));
                }
            }
        }

        for (i, entry) in self.ads_txt.iter().enumerate() {
            if entry.is_empty() {
                errors.push(format!("ads.txt entry {} has no fields", i + 1));
            } else if entry.len() < 3 {
                warnings.push(format!(
                    "ads.txt entry {} has {} fields; records usually carry \
                     domain, publisher ID and relationship",
                    i + 1,
                    entry.len()
                ));
            }
        }

        if !errors.is_empty() {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }

        Ok(ValidationResult { warnings })
    }
}
