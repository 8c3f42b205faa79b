//! Publish pipeline: per-resource state machine and orchestration.
//!
//! Each resource runs the same gate sequence: disabled check, existence
//! check, safety check, render, write, optional alias link. The five
//! resources are independent; a skip or per-resource failure never blocks
//! the others. The one exception is the alias-slot conflict, which is a
//! configuration error severe enough to abort the whole run (fail-fast).

use crate::config::EngineConfig;
use crate::constants;
use crate::engine::alias::AliasLinker;
use crate::engine::error::{Error, Result};
use crate::engine::render;
use crate::engine::resolver::{PathResolver, Resolved};
use crate::engine::safety::SafetyGuard;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// The five resource kinds the engine owns, in publish order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    SecurityTxt,
    RobotsTxt,
    HumansTxt,
    AdsTxt,
    Htaccess,
}

impl ResourceKind {
    /// All kinds, in publish order.
    pub const ALL: [Self; 5] = [
        Self::SecurityTxt,
        Self::RobotsTxt,
        Self::HumansTxt,
        Self::AdsTxt,
        Self::Htaccess,
    ];

    /// The canonical filename for this resource.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::SecurityTxt => constants::SECURITY_TXT,
            Self::RobotsTxt => constants::ROBOTS_TXT,
            Self::HumansTxt => constants::HUMANS_TXT,
            Self::AdsTxt => constants::ADS_TXT,
            Self::Htaccess => constants::HTACCESS,
        }
    }

    /// Whether the global `enable` flag gates this resource. The
    /// access-control file is generated regardless.
    #[must_use]
    pub fn gated_by_enable(self) -> bool {
        !matches!(self, Self::Htaccess)
    }

    /// Whether this resource gets an alias link at the public root.
    /// `.htaccess` already lives there.
    #[must_use]
    pub fn aliasable(self) -> bool {
        !matches!(self, Self::Htaccess)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Terminal state of one resource's pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The rendered body was persisted (or would be, in a dry run).
    Written,
    /// The governing feature flag is off.
    SkippedDisabled,
    /// The target exists and `override_existing` is off.
    SkippedExists,
    /// The write target failed the safety policy.
    SkippedUnsafe,
    /// The rendered body was empty.
    SkippedEmpty,
    /// Rendering or writing failed; siblings are unaffected.
    Failed(String),
}

impl Outcome {
    #[must_use]
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Written => f.write_str("written"),
            Self::SkippedDisabled => f.write_str("skipped (disabled)"),
            Self::SkippedExists => f.write_str("skipped (already exists)"),
            Self::SkippedUnsafe => f.write_str("skipped (unsafe target)"),
            Self::SkippedEmpty => f.write_str("skipped (nothing to write)"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// One resource's result within a single pipeline run.
#[derive(Debug, Clone)]
pub struct GeneratedResource {
    pub kind: ResourceKind,
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Results of a full pipeline run, one entry per resource kind.
#[derive(Debug, Default)]
pub struct PublishReport {
    pub resources: Vec<GeneratedResource>,
}

impl PublishReport {
    /// Paths actually written, for the caller's cache-priming step.
    #[must_use]
    pub fn written_paths(&self) -> Vec<&Path> {
        self.resources
            .iter()
            .filter(|r| r.outcome.is_written())
            .map(|r| r.path.as_path())
            .collect()
    }

    /// Number of resources written.
    #[must_use]
    pub fn written_count(&self) -> usize {
        self.written_paths().len()
    }

    /// True if any resource failed (non-fatally).
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.resources
            .iter()
            .any(|r| matches!(r.outcome, Outcome::Failed(_)))
    }
}

/// Orchestrates the per-resource pipelines against one [`EngineConfig`].
pub struct Publisher<'a> {
    config: &'a EngineConfig,
    paths: PathResolver,
    guard: SafetyGuard,
    linker: AliasLinker,
}

impl<'a> Publisher<'a> {
    #[must_use]
    pub fn new(config: &'a EngineConfig) -> Self {
        Self {
            config,
            paths: PathResolver::new(&config.public_dir, &config.location_uri),
            guard: SafetyGuard::new(&config.public_dir),
            linker: AliasLinker::new(&config.public_dir),
        }
    }

    /// Run all five resource pipelines and persist the results.
    ///
    /// # Errors
    ///
    /// Only the alias-slot conflict escalates; per-resource failures are
    /// recorded in the report instead.
    pub fn publish_all(&self) -> Result<PublishReport> {
        let mut report = PublishReport::default();
        for kind in ResourceKind::ALL {
            report.resources.push(self.run(kind, true)?);
        }
        Ok(report)
    }

    /// Run all five pipelines without touching the public root, reporting
    /// what a real run would do.
    ///
    /// # Errors
    ///
    /// Dry runs perform no alias linking, so the fatal path cannot occur
    /// in practice; the signature mirrors [`Publisher::publish_all`].
    pub fn preview_all(&self) -> Result<PublishReport> {
        let mut report = PublishReport::default();
        for kind in ResourceKind::ALL {
            report.resources.push(self.run(kind, false)?);
        }
        Ok(report)
    }

    /// The per-resource state machine. `commit` selects a real run over a
    /// dry run; only real runs write, create directories, or alias-link.
    fn run(&self, kind: ResourceKind, commit: bool) -> Result<GeneratedResource> {
        let done = |path: PathBuf, outcome: Outcome| {
            Ok(GeneratedResource {
                kind,
                path,
                outcome,
            })
        };

        let reference = match kind {
            // `.htaccess` sits at the public root, not in the well-known dir.
            ResourceKind::Htaccess => "/.htaccess",
            _ => kind.file_name(),
        };
        let path = match self.paths.locate(reference) {
            Resolved::File(path) => path,
            // Resource filenames never classify as pass-through values.
            Resolved::Mailto(value) | Resolved::Url(value) => PathBuf::from(value),
        };

        if kind.gated_by_enable() && !self.config.enable {
            return done(path, Outcome::SkippedDisabled);
        }
        if path.exists() && !self.config.override_existing {
            return done(path, Outcome::SkippedExists);
        }
        if !self.guard.is_safe_path(&path) {
            return done(path, Outcome::SkippedUnsafe);
        }

        let body = match self.render(kind) {
            Ok(body) => body,
            Err(e) => return done(path, Outcome::Failed(e.to_string())),
        };
        if body.is_empty() {
            return done(path, Outcome::SkippedEmpty);
        }

        if !commit {
            return done(path, Outcome::Written);
        }

        // Full resolution creates the well-known directory for bare
        // filenames; deferred to here so skipped resources leave no trace.
        if let Err(e) = self.paths.resolve(reference) {
            return done(path, Outcome::Failed(e.to_string()));
        }
        if let Err(e) = write_file(&path, &body) {
            return done(path, Outcome::Failed(e.to_string()));
        }

        if kind.aliasable() && self.config.alias_to_public {
            match self.linker.link(&path) {
                Ok(()) => {},
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    return done(path, Outcome::Failed(format!("written, but {e}")));
                },
            }
        }

        done(path, Outcome::Written)
    }

    fn render(&self, kind: ResourceKind) -> Result<String> {
        match kind {
            ResourceKind::SecurityTxt => {
                Ok(render::security_txt(&self.config.security_txt, &self.paths))
            },
            ResourceKind::RobotsTxt => Ok(render::robots_txt(&self.config.robots_txt, &self.paths)),
            ResourceKind::HumansTxt => render::humans_txt(self.config.humans_txt.as_deref()),
            ResourceKind::AdsTxt => Ok(render::ads_txt(&self.config.ads_txt)),
            ResourceKind::Htaccess => {
                Ok(render::htaccess(self.config.change_password.as_deref(), &self.paths))
            },
        }
    }
}

/// Persist a rendered body, creating parent directories as needed.
fn write_file(path: &Path, body: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::io(format!("creating {}", parent.display()), e))?;
    }
    fs::write(path, body).map_err(|e| Error::io(format!("writing {}", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecurityTxtConfig;

    fn config_for(public_dir: &Path) -> EngineConfig {
        EngineConfig {
            enable: true,
            override_existing: false,
            alias_to_public: false,
            public_dir: public_dir.to_path_buf(),
            location_uri: ".well-known".to_string(),
            security_txt: SecurityTxtConfig {
                contacts: vec!["security@example.com".to_string()],
                ..Default::default()
            },
            robots_txt: Vec::new(),
            humans_txt: None,
            ads_txt: Vec::new(),
            change_password: Some("/account/password".to_string()),
        }
    }

    #[test]
    fn test_publish_writes_only_non_empty_resources() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_for(tmp.path());
        let report = Publisher::new(&config).publish_all().unwrap();

        assert!(tmp.path().join(".well-known/security.txt").is_file());
        assert!(tmp.path().join(".htaccess").is_file());
        assert!(!tmp.path().join(".well-known/robots.txt").exists());
        assert_eq!(report.written_count(), 2);

        let robots = report
            .resources
            .iter()
            .find(|r| r.kind == ResourceKind::RobotsTxt)
            .unwrap();
        assert_eq!(robots.outcome, Outcome::SkippedEmpty);
    }

    #[test]
    fn test_disabled_skips_everything_except_htaccess() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = config_for(tmp.path());
        config.enable = false;
        let report = Publisher::new(&config).publish_all().unwrap();

        assert!(!tmp.path().join(".well-known/security.txt").exists());
        assert!(tmp.path().join(".htaccess").is_file());
        assert_eq!(report.written_count(), 1);
        let security = report
            .resources
            .iter()
            .find(|r| r.kind == ResourceKind::SecurityTxt)
            .unwrap();
        assert_eq!(security.outcome, Outcome::SkippedDisabled);
    }

    #[test]
    fn test_second_run_skips_existing_without_override() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_for(tmp.path());
        let publisher = Publisher::new(&config);
        publisher.publish_all().unwrap();

        let second = publisher.publish_all().unwrap();
        assert_eq!(second.written_count(), 0);
        for resource in &second.resources {
            if matches!(
                resource.kind,
                ResourceKind::SecurityTxt | ResourceKind::Htaccess
            ) {
                assert_eq!(resource.outcome, Outcome::SkippedExists);
            }
        }
    }

    #[test]
    fn test_override_rewrites_idempotently() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = config_for(tmp.path());
        config.override_existing = true;
        config.alias_to_public = true;
        let publisher = Publisher::new(&config);
        publisher.publish_all().unwrap();
        let second = publisher.publish_all().unwrap();
        assert_eq!(second.written_count(), 2);
        assert!(
            fs::symlink_metadata(tmp.path().join("security.txt"))
                .unwrap()
                .is_symlink()
        );
    }

    #[test]
    fn test_unsafe_location_is_skipped_silently() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = config_for(tmp.path());
        config.location_uri = "bundles".to_string();
        let report = Publisher::new(&config).publish_all().unwrap();

        assert!(!tmp.path().join("bundles").exists());
        let security = report
            .resources
            .iter()
            .find(|r| r.kind == ResourceKind::SecurityTxt)
            .unwrap();
        assert_eq!(security.outcome, Outcome::SkippedUnsafe);
        // .htaccess resolves to the public root itself and stays safe.
        assert!(tmp.path().join(".htaccess").is_file());
    }

    #[test]
    fn test_alias_conflict_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = config_for(tmp.path());
        config.alias_to_public = true;
        fs::write(tmp.path().join("security.txt"), "not ours").unwrap();

        let err = Publisher::new(&config).publish_all().unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(
            fs::read_to_string(tmp.path().join("security.txt")).unwrap(),
            "not ours"
        );
    }

    #[test]
    fn test_preview_touches_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_for(tmp.path());
        let report = Publisher::new(&config).preview_all().unwrap();

        assert_eq!(report.written_count(), 2);
        assert!(!tmp.path().join(".well-known").exists());
        assert!(!tmp.path().join(".htaccess").exists());
    }

    #[test]
    fn test_failed_resource_does_not_block_siblings() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = config_for(tmp.path());
        // A humans.txt source that exists but is not valid UTF-8 fails the
        // read, while the other resources still publish.
        let source = tmp.path().join("humans.source.txt");
        fs::write(&source, [0xff, 0xfe, 0x00]).unwrap();
        config.humans_txt = Some(source);

        let report = Publisher::new(&config).publish_all().unwrap();
        assert!(report.has_failures());
        assert!(tmp.path().join(".well-known/security.txt").is_file());
        assert_eq!(report.written_count(), 2);
    }
}
