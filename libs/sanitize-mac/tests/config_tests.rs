//! Configuration loading and validation tests

use sanitize_mac::{CaseRule, ConfigurationError, SanitizeMacConfig, Separator};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_config_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sanitize_mac.json");
    fs::write(
        &path,
        r#"{
            "match": {"client_mac": "client_mac_sanitized"},
            "separator": ".",
            "fixcase": "upper",
            "add_tag": ["mac_sanitized"]
        }"#,
    )
    .unwrap();

    let config = SanitizeMacConfig::from_file(&path).unwrap();
    let sanitizer = config.build().unwrap();
    assert_eq!(sanitizer.separator(), Separator::Dot);
    assert_eq!(sanitizer.case_rule(), CaseRule::Upper);
    assert_eq!(sanitizer.field_pairs().len(), 1);
}

#[test]
fn test_missing_config_file() {
    let dir = tempdir().unwrap();
    let result = SanitizeMacConfig::from_file(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigurationError::Io { .. })));
}

#[test]
fn test_malformed_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{"match": ["client_mac"]}"#).unwrap();

    let result = SanitizeMacConfig::from_file(&path);
    assert!(matches!(result, Err(ConfigurationError::Json(_))));
}

#[test]
fn test_every_invalid_option_fails_before_use() -> anyhow::Result<()> {
    let cases = [
        (r#"{"separator": ";"}"#, "separator"),
        (r#"{"separator": "::"}"#, "separator"),
        (r#"{"fixcase": "UPPER"}"#, "fixcase"),
        (r#"{"match": null}"#, "match"),
        (r#"{"match": {"": "out"}}"#, "field"),
        (r#"{"match": {"[a": "out"}}"#, "field"),
        (r#"{"remove_field": ["[a]b"]}"#, "field"),
    ];

    for (document, expected) in cases {
        let config = SanitizeMacConfig::from_json_str(document)?;
        let err = config.build().expect_err(document);
        let matched = match expected {
            "separator" => matches!(err, ConfigurationError::InvalidSeparator { .. }),
            "fixcase" => matches!(err, ConfigurationError::InvalidFixcase { .. }),
            "match" => matches!(err, ConfigurationError::MissingMatch),
            _ => matches!(err, ConfigurationError::InvalidFieldReference { .. }),
        };
        assert!(matched, "{document} produced {err}");
    }
    Ok(())
}

#[test]
fn test_config_round_trips_through_json() {
    let config = SanitizeMacConfig::default()
        .with_field("[client][mac]", "client_mac")
        .with_tag("mac_sanitized");
    let text = serde_json::to_string(&config).unwrap();
    assert!(text.contains(r#""match""#));
    assert_eq!(SanitizeMacConfig::from_json_str(&text).unwrap(), config);
}
