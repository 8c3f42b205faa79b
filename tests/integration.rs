//! End-to-end publish runs against a temporary public root.
//!
//! Exercises the full pipeline through the public library API: config from
//! TOML, rendering, safety policy, writes and alias links.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use wellknown::config::EngineConfig;
use wellknown::engine::{Outcome, Publisher, ResourceKind};

fn config_from_toml(public_dir: &Path, body: &str) -> EngineConfig {
    let toml = format!("public_dir = {:?}\n{body}", public_dir.display().to_string());
    toml::from_str(&toml).expect("test config should parse")
}

#[test]
fn test_security_txt_end_to_end_with_alias() {
    let tmp = TempDir::new().unwrap();
    let config = config_from_toml(
        tmp.path(),
        r#"
        override_existing = true

        [security_txt]
        contacts = ["a@x.com"]
        preferred_languages = ["en", "fr"]
        "#,
    );

    let report = Publisher::new(&config).publish_all().unwrap();

    let target = tmp.path().join(".well-known/security.txt");
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "Contact: mailto: a@x.com\n\nPreferred-Languages: en,fr"
    );

    let alias = tmp.path().join("security.txt");
    assert!(fs::symlink_metadata(&alias).unwrap().is_symlink());
    assert_eq!(fs::read_link(&alias).unwrap(), target);
    // The alias serves the generated content.
    assert!(fs::read_to_string(&alias).unwrap().contains("Contact:"));

    assert_eq!(report.written_paths(), vec![target.as_path()]);
}

#[test]
fn test_full_site_publish() {
    let tmp = TempDir::new().unwrap();
    let humans_source = tmp.path().join("humans.source.txt");
    fs::write(&humans_source, "/* TEAM */\nChef: Jane Doe\n").unwrap();

    let config = config_from_toml(
        tmp.path(),
        &format!(
            r#"
            humans_txt = {:?}
            ads_txt = [["google.com", "pub-1234", "DIRECT", "f08c47fec0942fa0"]]
            change_password = "/account/password"

            [security_txt]
            contacts = ["security@example.com"]
            policy = "/security-policy.html"

            [[robots_txt]]
            disallow = ["/admin"]
            sitemap = ["https://example.com/sitemap.xml"]
            "#,
            humans_source.display().to_string()
        ),
    );
    config.validate().unwrap();

    let report = Publisher::new(&config).publish_all().unwrap();
    assert_eq!(report.written_count(), 5);
    assert!(!report.has_failures());

    let well_known = tmp.path().join(".well-known");
    assert_eq!(
        fs::read_to_string(well_known.join("robots.txt")).unwrap(),
        "User-Agent: *\n\nDisallow: /admin\n\nSitemap: https://example.com/sitemap.xml\n\n"
    );
    assert_eq!(
        fs::read_to_string(well_known.join("humans.txt")).unwrap(),
        "/* TEAM */\nChef: Jane Doe\n"
    );
    assert_eq!(
        fs::read_to_string(well_known.join("ads.txt")).unwrap(),
        "google.com pub-1234 DIRECT f08c47fec0942fa0\n"
    );
    // .htaccess lands at the public root, with no alias link.
    assert_eq!(
        fs::read_to_string(tmp.path().join(".htaccess")).unwrap(),
        "Redirect 301 /.well-known/change-password /account/password\n"
    );
    assert!(
        !fs::symlink_metadata(tmp.path().join(".htaccess"))
            .unwrap()
            .is_symlink()
    );

    // Every aliasable resource is linked at the root.
    for name in ["security.txt", "robots.txt", "humans.txt", "ads.txt"] {
        assert!(
            fs::symlink_metadata(tmp.path().join(name)).unwrap().is_symlink(),
            "missing alias for {name}"
        );
    }
}

#[test]
fn test_rerun_without_override_skips_everything() {
    let tmp = TempDir::new().unwrap();
    let config = config_from_toml(
        tmp.path(),
        r#"
        change_password = "/account/password"

        [security_txt]
        contacts = ["a@x.com"]
        "#,
    );

    let publisher = Publisher::new(&config);
    let first = publisher.publish_all().unwrap();
    assert_eq!(first.written_count(), 2);

    let second = publisher.publish_all().unwrap();
    assert_eq!(second.written_count(), 0);
    for resource in &second.resources {
        match resource.kind {
            ResourceKind::SecurityTxt | ResourceKind::Htaccess => {
                assert_eq!(resource.outcome, Outcome::SkippedExists);
            },
            _ => assert_eq!(resource.outcome, Outcome::SkippedEmpty),
        }
    }
}

#[test]
fn test_occupied_alias_slot_aborts_the_run() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("security.txt"), "hand-maintained").unwrap();

    let config = config_from_toml(
        tmp.path(),
        r#"
        [security_txt]
        contacts = ["a@x.com"]
        "#,
    );

    let err = Publisher::new(&config).publish_all().unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("security.txt"));
    assert_eq!(
        fs::read_to_string(tmp.path().join("security.txt")).unwrap(),
        "hand-maintained"
    );
}

#[test]
fn test_check_is_side_effect_free() {
    let tmp = TempDir::new().unwrap();
    let config = config_from_toml(
        tmp.path(),
        r#"
        change_password = "/account/password"

        [security_txt]
        contacts = ["a@x.com"]
        "#,
    );

    let report = Publisher::new(&config).preview_all().unwrap();
    assert_eq!(report.written_count(), 2);
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn test_expiry_field_published_for_relative_offset() {
    let tmp = TempDir::new().unwrap();
    let config = config_from_toml(
        tmp.path(),
        r#"
        [security_txt]
        contacts = ["a@x.com"]
        expires = "+1y"
        "#,
    );

    Publisher::new(&config).publish_all().unwrap();
    let body = fs::read_to_string(tmp.path().join(".well-known/security.txt")).unwrap();
    let expires = body
        .lines()
        .find_map(|line| line.strip_prefix("Expires: "))
        .expect("Expires field should be present");
    let parsed = chrono::DateTime::parse_from_rfc3339(expires).unwrap();
    assert!(parsed > chrono::Utc::now());
}
