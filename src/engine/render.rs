//! Resource renderers.
//!
//! One pure function per resource kind, from typed configuration to the
//! exact wire text. An empty result means "do not publish this resource".
//! References embedded in bodies go through [`PathResolver::format_ref`] so
//! they come out root-relative or as pass-through URLs/mailto values.

use crate::config::{RobotsGroup, SecurityTxtConfig};
use crate::constants::CHANGE_PASSWORD_URI;
use crate::engine::error::{Error, Result};
use crate::engine::expiry;
use crate::engine::resolver::PathResolver;
use std::fs;
use std::path::Path;

/// Render `security.txt` per RFC 9116 field order.
///
/// Fields are emitted in a fixed order, each terminated by a blank line;
/// absent fields are omitted entirely. The trailing `Preferred-Languages:`
/// line is not blank-line-terminated.
#[must_use]
pub fn security_txt(config: &SecurityTxtConfig, paths: &PathResolver) -> String {
    let mut body = String::new();

    if let Some(canonical) = &config.canonical {
        body.push_str(&format!("Canonical: {}\n\n", paths.format_ref(canonical)));
    }
    if let Some(encryption) = &config.encryption {
        body.push_str(&format!("Encryption: {}\n\n", paths.format_ref(encryption)));
    }
    if let Some(expires) = expiry::resolve(config.expires.as_deref()) {
        body.push_str(&format!("Expires: {expires}\n\n"));
    }
    for contact in &config.contacts {
        body.push_str(&format!("Contact: {}\n", paths.format_ref(contact)));
    }
    if !config.contacts.is_empty() {
        body.push('\n');
    }
    if let Some(acknowledgements) = &config.acknowledgements {
        body.push_str(&format!(
            "Acknowledgements: {}\n\n",
            paths.format_ref(acknowledgements)
        ));
    }
    if let Some(policy) = &config.policy {
        body.push_str(&format!("Policy: {}\n\n", paths.format_ref(policy)));
    }
    if let Some(hiring) = &config.hiring {
        body.push_str(&format!("Hiring: {}\n\n", paths.format_ref(hiring)));
    }
    if !config.preferred_languages.is_empty() {
        body.push_str(&format!(
            "Preferred-Languages: {}",
            config.preferred_languages.join(",")
        ));
    }

    body
}

/// Render `robots.txt` from rule groups, in order.
///
/// A group without user-agent tokens scopes to `*`. Every directive line is
/// followed by a blank line.
#[must_use]
pub fn robots_txt(groups: &[RobotsGroup], paths: &PathResolver) -> String {
    let default_agents = [String::from("*")];
    let mut body = String::new();

    for group in groups {
        let agents: &[String] = if group.user_agent.is_empty() {
            &default_agents
        } else {
            &group.user_agent
        };
        for agent in agents {
            body.push_str(&format!("User-Agent: {agent}\n\n"));
        }
        for rule in &group.allow {
            body.push_str(&format!("Allow: {}\n\n", paths.format_ref(rule)));
        }
        for rule in &group.disallow {
            body.push_str(&format!("Disallow: {}\n\n", paths.format_ref(rule)));
        }
        for sitemap in &group.sitemap {
            body.push_str(&format!("Sitemap: {}\n\n", paths.format_ref(sitemap)));
        }
    }

    body
}

/// Render `humans.txt`: a verbatim copy of the configured source file.
///
/// An unset or missing source renders empty (nothing published); any other
/// read failure is an error.
pub fn humans_txt(source: Option<&Path>) -> Result<String> {
    let Some(source) = source else {
        return Ok(String::new());
    };
    if !source.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(source)
        .map_err(|e| Error::io(format!("reading {}", source.display()), e))
}

/// Render `ads.txt`: one record per entry, field tokens space-joined.
#[must_use]
pub fn ads_txt(entries: &[Vec<String>]) -> String {
    let mut body = String::new();
    for entry in entries {
        body.push_str(&entry.join(" "));
        body.push('\n');
    }
    body
}

/// Render the `.htaccess` access-control file: a single permanent redirect
/// for the change-password well-known path, when a target is configured.
#[must_use]
pub fn htaccess(change_password: Option<&str>, paths: &PathResolver) -> String {
    match change_password {
        Some(target) => format!(
            "Redirect 301 {CHANGE_PASSWORD_URI} {}\n",
            paths.format_ref(target)
        ),
        None => String::new(),
    }
}
