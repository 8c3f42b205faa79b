//! Shared constants for the wellknown CLI and engine.

/// Configuration filename searched for in the current directory.
pub const CONFIG_FILENAME: &str = "wellknown.toml";

/// Default sub-directory of the public root that holds generated resources.
pub const DEFAULT_LOCATION_URI: &str = ".well-known";

/// First-level directories under the public root that the engine must never
/// write into. These are owned by the host framework (compiled bundles,
/// asset pipelines, uploaded storage).
pub const RESERVED_DIRS: [&str; 3] = ["bundles", "assets", "storage"];

/// Well-known path that browsers probe for password-change redirects.
pub const CHANGE_PASSWORD_URI: &str = "/.well-known/change-password";

/// Canonical resource filenames.
pub const SECURITY_TXT: &str = "security.txt";
pub const ROBOTS_TXT: &str = "robots.txt";
pub const HUMANS_TXT: &str = "humans.txt";
pub const ADS_TXT: &str = "ads.txt";
pub const HTACCESS: &str = ".htaccess";
