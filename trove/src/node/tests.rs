//! Unit tests for node navigation, typed fields, and loading.

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::ErrorKind;

#[test]
fn child_mut_turns_scalars_into_maps() {
    let mut node = json!(3);
    set(child_mut(&mut node, "value"), 3.5);
    assert_eq!(node, json!({ "value": 3.5 }));
}

#[test]
fn child_reads_missing_segments_as_absent() {
    let node = json!({ "a": 1 });
    assert!(is_absent(child(&node, "b")));
    assert!(is_absent(child(&json!([1, 2]), "a")));
    assert!(!is_absent(child(&node, "a")));
}

#[rstest]
#[case(json!(1), true)]
#[case(json!("s"), true)]
#[case(json!(false), true)]
#[case(json!(null), false)]
#[case(json!([]), false)]
#[case(json!({}), false)]
fn raw_scalar_only_matches_scalars(#[case] node: ConfigNode, #[case] expected: bool) {
    assert_eq!(raw_scalar(&node).is_some(), expected);
}

#[test]
fn typed_fields_report_their_path() {
    let node = json!({ "name": 3, "count": "many" });
    let not_string = require_str(&node, "name").expect_err("number is not a string");
    assert!(matches!(&*not_string, TroveError::Deserialization { path, .. } if path == "name"));
    let not_integer = require_i64(&node, "count").expect_err("string is not an integer");
    assert_eq!(not_integer.kind(), ErrorKind::Deserialization);
    let absent = require_f64(&node, "missing").expect_err("field is absent");
    assert!(matches!(&*absent, TroveError::MissingField { field } if field == "missing"));
}

#[test]
fn optional_fields_fall_back_to_defaults() {
    let node = json!({ "add": true });
    assert_eq!(optional_i64(&node, "weight", 1).expect("default"), 1);
    assert!(optional_bool(&node, "add", false).expect("present"));
    assert!(optional_bool(&json!({ "add": 1 }), "add", false).is_err());
    assert_eq!(optional_f64(&node, "luck", 0.5).expect("default"), 0.5);
    assert!(optional_f64(&json!({ "luck": "high" }), "luck", 0.0).is_err());
}

#[rstest]
#[case(json!({ "type": "a" }), "a")]
#[case(json!({ "type": 7 }), "7")]
#[case(json!({ "type": true }), "true")]
fn discriminator_coerces_scalars(#[case] node: ConfigNode, #[case] expected: &str) {
    assert_eq!(discriminator(&node, "type").expect("present"), expected);
}

#[test]
fn discriminator_rejects_missing_and_structured_values() {
    let missing = discriminator(&json!({}), "type").expect_err("absent");
    assert!(matches!(&*missing, TroveError::MissingField { .. }));
    let nested = discriminator(&json!({ "type": { "a": 1 } }), "type").expect_err("map");
    assert!(matches!(&*nested, TroveError::Deserialization { .. }));
}

#[test]
fn field_uses_serde() {
    let node = json!({ "tags": ["a", "b"] });
    let tags: Vec<String> = field(&node, "tags").expect("list of strings");
    assert_eq!(tags, ["a", "b"]);
    assert!(field::<Vec<u8>>(&node, "tags").is_err());
}

#[test]
fn parses_json_and_toml() {
    let from_json = parse(r#"{ "rolls": 2, "name": "x" }"#, NodeFormat::Json).expect("json");
    let from_toml = parse("rolls = 2\nname = \"x\"\n", NodeFormat::Toml).expect("toml");
    assert_eq!(from_json, json!({ "rolls": 2, "name": "x" }));
    assert_eq!(from_toml, from_json);
}

#[test]
fn load_file_rejects_unknown_extensions() {
    let err = load_file(camino::Utf8Path::new("table.yaml")).expect_err("unsupported");
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn load_file_reads_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("table.json"))
        .expect("utf8 temp path");
    std::fs::write(&path, r#"{ "pools": [] }"#).expect("write table");
    assert_eq!(load_file(&path).expect("load"), json!({ "pools": [] }));
}
