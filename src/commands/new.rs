//! Scaffold a starter `wellknown.toml`.

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::constants;

/// Commented starter configuration covering every resource.
const STARTER_CONFIG: &str = r#"# wellknown.toml - well-known resource configuration
#
# Resources are generated under <public_dir>/<location_uri>/ and, when
# alias_to_public is on, symlinked into the public root itself.

# enable = true
# override_existing = false
# alias_to_public = true
public_dir = "public"
# location_uri = ".well-known"

# Copied verbatim into humans.txt when the file exists.
# humans_txt = "humans.source.txt"

# One record per entry: domain, publisher ID, relationship, certification ID.
# ads_txt = [["google.com", "pub-0000000000000000", "DIRECT", "f08c47fec0942fa0"]]

# Emits a Redirect directive for /.well-known/change-password into .htaccess.
# change_password = "/account/password"

[security_txt]
contacts = ["security@example.com"]
# Literal RFC 3339 timestamp or a relative offset applied at publish time.
expires = "+1y"
# canonical = "security.txt"
# encryption = "pgp.asc"
# preferred_languages = ["en"]
# acknowledgements = "/hall-of-fame.html"
# policy = "/security-policy.html"
# hiring = "https://example.com/jobs"

[[robots_txt]]
user_agent = ["*"]
disallow = []
# allow = ["/"]
# sitemap = ["https://example.com/sitemap.xml"]
"#;

/// Write a starter config into the current directory.
pub fn execute(force: bool) -> Result<()> {
    let path = Path::new(constants::CONFIG_FILENAME);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            constants::CONFIG_FILENAME
        );
    }

    fs::write(path, STARTER_CONFIG)?;
    println!("Created {}", constants::CONFIG_FILENAME);
    println!();
    println!("Next steps:");
    println!("  1. Edit {} for your site", constants::CONFIG_FILENAME);
    println!("  2. Run 'wellknown check' to preview");
    println!("  3. Run 'wellknown generate' to publish");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    #[test]
    fn test_starter_config_parses_and_validates() {
        let config: EngineConfig = toml::from_str(STARTER_CONFIG).unwrap();
        let result = config.validate().unwrap();
        assert!(!result.has_warnings());
        assert_eq!(config.security_txt.contacts, vec!["security@example.com"]);
        assert_eq!(config.robots_txt.len(), 1);
    }
}
