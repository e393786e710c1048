//! Behavioural tests for the MAC sanitizer filter

use sanitize_mac::{Event, FieldRef, MacSanitizer, SanitizeMacConfig};
use serde_json::{json, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("sanitize_mac=trace")
        .try_init();
}

fn build(config: &str) -> MacSanitizer {
    init_tracing();
    SanitizeMacConfig::from_json_str(config)
        .unwrap()
        .build()
        .unwrap()
}

fn event(value: Value) -> Event {
    Event::from_value(value).unwrap()
}

#[test]
fn test_all_input_forms_yield_identical_output() {
    let inputs = [
        "00:1a:2b:3c:4d:5e",
        "0:1A:2b:3C:4d:5E",
        "00-1a-2b-3c-4d-5e",
        "0-1a-2b-3c-4d-5e",
        "001a.2b3c.4d5e",
        "1a.2b3c.4d5e",
        "001A2B3C4D5E",
    ];

    for (separator, expected) in [
        (":", "00:1a:2b:3c:4d:5e"),
        ("-", "00-1a-2b-3c-4d-5e"),
        (".", "001a.2b3c.4d5e"),
        ("", "001a2b3c4d5e"),
    ] {
        let sanitizer = build(&format!(
            r#"{{"match": {{"mac": "out"}}, "separator": "{separator}", "fixcase": "lower"}}"#
        ));
        for input in inputs {
            assert_eq!(
                sanitizer.sanitize(input).as_deref(),
                Some(expected),
                "input {input} with separator {separator:?}"
            );
        }
    }
}

#[test]
fn test_output_is_a_fixed_point() {
    for separator in [":", "-", ".", ""] {
        for fixcase in ["lower", "upper", ""] {
            let sanitizer = build(&format!(
                r#"{{"match": {{"mac": "mac"}}, "separator": "{separator}", "fixcase": "{fixcase}"}}"#
            ));

            let mut e = event(json!({"mac": "0:Ab:2:cD:e:F0"}));
            assert!(sanitizer.apply(&mut e));
            let once = e.clone();

            assert!(sanitizer.apply(&mut e));
            assert_eq!(e, once, "separator {separator:?} fixcase {fixcase:?}");
        }
    }
}

#[test]
fn test_recognition_is_case_insensitive() {
    let sanitizer = build(r#"{"match": {"mac": "out"}, "fixcase": "upper"}"#);
    for input in ["AA:BB:CC:DD:EE:FF", "aa:bb:cc:dd:ee:ff", "Aa:Bb:Cc:Dd:Ee:Ff"] {
        assert_eq!(
            sanitizer.sanitize(input).as_deref(),
            Some("AA:BB:CC:DD:EE:FF")
        );
    }
}

#[test]
fn test_blank_fixcase_keeps_mixed_case() {
    let sanitizer = build(r#"{"match": {"mac": "out"}, "separator": "."}"#);
    assert_eq!(
        sanitizer.sanitize("Aa:Bb:Cc:Dd:Ee:Ff").as_deref(),
        Some("AaBb.CcDd.EeFf")
    );
}

#[test]
fn test_rejected_values_leave_event_unchanged() {
    let sanitizer = build(r#"{"match": {"mac": "out"}, "fixcase": "lower"}"#);
    for input in [
        "00:11-22:33:44:55",
        "00:11:22:33:44",
        "00:11:22:33:44:55:66",
        "0011.2233",
        "00112233445",
        "00:11:22:33:44:zz",
        "not-a-mac",
        "",
    ] {
        let original = json!({"mac": input, "host": "ap-1"});
        let mut e = event(original.clone());
        assert!(!sanitizer.apply(&mut e), "{input} should not match");
        assert_eq!(e.into_value(), original);
    }
}

#[test]
fn test_missing_input_never_creates_output() {
    let sanitizer = build(r#"{"match": {"client_mac": "client_mac_sanitized"}}"#);
    let mut e = event(json!({"server_mac": "00:11:22:33:44:55"}));
    assert!(!sanitizer.apply(&mut e));
    assert!(e.get(&FieldRef::parse("client_mac_sanitized").unwrap()).is_none());
}

#[test]
fn test_in_place_and_copy_pairs() {
    let sanitizer = build(
        r#"{
            "match": {"client_mac": "client_mac_sanitized", "server_mac": "server_mac"},
            "separator": ".",
            "fixcase": "upper"
        }"#,
    );
    let mut e = event(json!({
        "client_mac": "00-11-22-aa-bb-cc",
        "server_mac": "aabbccddeeff",
        "client_mac_sanitized": "stale"
    }));

    assert!(sanitizer.apply(&mut e));
    assert_eq!(
        e.into_value(),
        json!({
            "client_mac": "00-11-22-aa-bb-cc",
            "client_mac_sanitized": "0011.22AA.BBCC",
            "server_mac": "AABB.CCDD.EEFF"
        })
    );
}

#[test]
fn test_partial_match_still_reports_match() {
    let sanitizer = build(r#"{"match": {"a": "a_out", "b": "b_out"}, "fixcase": "lower"}"#);
    let mut e = event(json!({"a": "bogus", "b": "AABBCCDDEEFF"}));
    assert!(sanitizer.apply(&mut e));
    assert!(e.get(&FieldRef::parse("a_out").unwrap()).is_none());
    assert_eq!(e.fields()["b_out"], "aa:bb:cc:dd:ee:ff");
}

#[test]
fn test_nested_field_references() {
    let sanitizer = build(
        r#"{"match": {"[client][mac]": "[normalized][client][mac]"}, "separator": "-", "fixcase": "lower"}"#,
    );
    let mut e = event(json!({"client": {"mac": "0011.22AA.BBCC", "ip": "10.0.0.7"}}));

    assert!(sanitizer.apply(&mut e));
    assert_eq!(
        e.into_value(),
        json!({
            "client": {"mac": "0011.22AA.BBCC", "ip": "10.0.0.7"},
            "normalized": {"client": {"mac": "00-11-22-aa-bb-cc"}}
        })
    );
}

#[test]
fn test_decorations_run_once_on_match() {
    let sanitizer = build(
        r#"{
            "match": {"a": "a", "b": "b"},
            "add_tag": ["mac_sanitized"],
            "remove_tag": ["raw_mac"],
            "add_field": {"[meta][mac_filter]": "applied"}
        }"#,
    );

    let mut e = event(json!({"a": "001122334455", "b": "0011.2233.4455", "tags": ["raw_mac"]}));
    assert!(sanitizer.apply(&mut e));
    assert_eq!(e.tags(), vec!["mac_sanitized"]);
    assert_eq!(e.fields()["meta"], json!({"mac_filter": "applied"}));
}

#[test]
fn test_decorations_skipped_without_match() {
    let sanitizer = build(r#"{"match": {"a": "a"}, "add_tag": ["mac_sanitized"]}"#);
    let mut e = event(json!({"a": "nope"}));
    assert!(!sanitizer.apply(&mut e));
    assert!(e.tags().is_empty());
}

#[test]
fn test_empty_match_is_a_no_op() {
    let sanitizer = build("{}");
    let mut e = event(json!({"mac": "001122334455"}));
    assert!(!sanitizer.apply(&mut e));
    assert_eq!(e.into_value(), json!({"mac": "001122334455"}));
}

#[test]
fn test_shared_across_threads() {
    let sanitizer = std::sync::Arc::new(build(r#"{"match": {"mac": "out"}, "fixcase": "upper"}"#));

    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            let sanitizer = sanitizer.clone();
            std::thread::spawn(move || {
                let mut e = event(json!({ "mac": format!("00:11:22:33:44:{i:x}") }));
                sanitizer.apply(&mut e);
                e.fields()["out"].as_str().map(str::to_string)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Some(format!("00:11:22:33:44:0{i}")));
    }
}
