//! Envelope builder tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::{json, Map, Value};

use hostbridge_core::protocol::{Envelope, HostMessage};
use hostbridge_core::protocol::codec::percent_encode;

fn params(v: Value) -> Map<String, Value> {
    match v {
        Value::Object(m) => m,
        other => panic!("not an object: {other}"),
    }
}

#[test]
fn build_keeps_inputs_and_caller_params() {
    let p = params(json!({ "phone": "13800138000", "nested": { "a": [1, 2] } }));
    let env = Envelope::build("Util", "callPhone", Some(p.clone()), "call_phone").unwrap();

    let wire: Value = serde_json::from_str(&env.to_json().unwrap()).unwrap();
    assert_eq!(wire["service"], "Util");
    assert_eq!(wire["action"], "callPhone");
    assert_eq!(wire["callback_tagname"], "call_phone");
    for (k, v) in &p {
        assert_eq!(&wire[k.as_str()], v, "param {k} must survive");
    }
}

#[test]
fn absent_params_become_an_empty_map() {
    let env = Envelope::build("User", "memberLogin", None, "member_login").unwrap();
    assert!(env.params.is_empty());
    let wire: Value = serde_json::from_str(&env.to_json().unwrap()).unwrap();
    assert_eq!(wire.as_object().unwrap().len(), 3);
}

#[test]
fn empty_service_or_action_yields_nothing() {
    let some = Some(params(json!({ "x": 1 })));
    for p in [None, some] {
        for tag in ["", "t"] {
            assert!(Envelope::build("", "a", p.clone(), tag).is_none());
            assert!(Envelope::build("s", "", p.clone(), tag).is_none());
            assert!(Envelope::build("", "", p.clone(), tag).is_none());
        }
    }
}

#[test]
fn reserved_keys_override_params() {
    let p = params(json!({ "service": "Evil", "action": "x", "callback_tagname": "y", "keep": true }));
    let env = Envelope::build("Pay", "openPayAppByURL", Some(p), "open_pay_app_by_url").unwrap();
    let wire: Value = serde_json::from_str(&env.to_json().unwrap()).unwrap();
    assert_eq!(wire["service"], "Pay");
    assert_eq!(wire["action"], "openPayAppByURL");
    assert_eq!(wire["callback_tagname"], "open_pay_app_by_url");
    assert_eq!(wire["keep"], true);
}

#[test]
fn wire_form_parses_back() {
    let env = Envelope::build("File", "makeDir", Some(params(json!({ "dirName": "d" }))), "make_dir").unwrap();
    let back = Envelope::from_json(&env.to_json().unwrap()).unwrap();
    assert_eq!(back, env);
}

#[test]
fn envelope_round_trips_through_the_inbound_decoder() {
    let env = Envelope::build("Encrypt", "md5Hash", Some(params(json!({ "inString": "abc" }))), "md5_hash").unwrap();
    let encoded = percent_encode(&env.to_json().unwrap());

    let msg = HostMessage::decode(&encoded).unwrap();
    assert_eq!(msg.extra["service"], "Encrypt");
    assert_eq!(msg.extra["action"], "md5Hash");
    assert_eq!(msg.extra["callback_tagname"], "md5_hash");
}

#[test]
fn config_json_envelope() {
    let cfg = r#"{"center":[{"tagname":"title","value":"Ctrip"}],"right":[{"tagname":"click","value":"Go"}]}"#;
    let env = Envelope::from_config_json(cfg, "NavBar", "refresh", "refresh_nav_bar").unwrap();
    assert_eq!(env.service, "NavBar");
    assert_eq!(env.params["right"][0]["tagname"], "click");

    for bad in ["", "[1,2]", "{oops"] {
        let err = Envelope::from_config_json(bad, "NavBar", "refresh", "refresh_nav_bar").unwrap_err();
        assert_eq!(err.code().as_str(), "PARAM_ERROR", "input={bad:?}");
    }
}
