#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use hostbridge_runtime::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
bridge:
  frame_teardown_msec: 200 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.bridge.plugin_url_prefix(), "ctrip://h5/plugin?jsparam=");
    assert_eq!(cfg.bridge.frame_teardown_ms, 200);
    assert_eq!(cfg.bridge.native_namespace_suffix, "_a");
    assert_eq!(cfg.detect.app_marker, "CtripWireless");
    assert_eq!(cfg.devhost.listen, "127.0.0.1:9400");
}

#[test]
fn version_is_required() {
    let err = config::load_from_str("bridge: {}\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn unsupported_version_rejected() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert!(err.to_string().contains("version"));
}

#[test]
fn teardown_out_of_range_rejected() {
    let bad = r#"
version: 1
bridge:
  frame_teardown_ms: 0
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("bridge.frame_teardown_ms"));
}

#[test]
fn scheme_with_query_rejected() {
    let bad = r#"
version: 1
bridge:
  url_scheme: "ctrip://h5/plugin?x=1"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("bridge.url_scheme"));
}

#[test]
fn bad_listen_rejected() {
    let bad = r#"
version: 1
devhost:
  listen: "localhost"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("devhost.listen"));
}

#[test]
fn zero_pending_timeout_disables_it() {
    let cfg = config::load_from_str("version: 1\nbridge:\n  pending_timeout_ms: 0\n").unwrap();
    assert!(cfg.bridge.pending_timeout().is_none());
}

#[test]
fn custom_markers_flow_into_detection() {
    let cfg = config::load_from_str(
        r#"
version: 1
detect:
  app_marker: "AcmeHost"
  ios_markers: ["iPod"]
"#,
    )
    .unwrap();
    let markers = cfg.detect.markers();
    assert_eq!(markers.app_marker, "AcmeHost");
    assert_eq!(markers.ios_markers, vec!["iPod".to_string()]);
    assert_eq!(markers.browser_marker, "Safari");
}

#[test]
fn sample_config_parses() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../hostbridge.yaml");
    let cfg = config::load_from_file(path).expect("sample config must load");
    assert_eq!(cfg.bridge.query_param, "jsparam");
}
