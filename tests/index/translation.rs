//! Option translation through the public API

use couchquery::{translate, Error, QueryOptions, Stale, WireOptions, WireValue};
use serde_json::{json, Map, Value};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {:?}", other),
    }
}

fn token<'a>(wire: &'a WireOptions, name: &str) -> Option<&'a str> {
    wire.get(name).and_then(WireValue::as_token)
}

#[test]
fn booleans_become_literal_tokens() {
    let wire = translate(&object(json!({"descending": true, "include_docs": false}))).unwrap();
    assert_eq!(token(&wire, "descending"), Some("true"));
    assert_eq!(token(&wire, "include_docs"), Some("false"));
}

#[test]
fn strings_and_sequences_are_json_encoded() {
    let wire = translate(&object(json!({
        "startkey": "2013",
        "endkey": ["2013", 12, "z"],
        "stale": "ok",
    })))
    .unwrap();
    assert_eq!(token(&wire, "startkey"), Some("\"2013\""));
    assert_eq!(token(&wire, "endkey"), Some("[\"2013\",12,\"z\"]"));
    assert_eq!(token(&wire, "stale"), Some("\"ok\""));
}

#[test]
fn integers_and_nulls_pass_through() {
    let wire = translate(&object(json!({"limit": null, "skip": 40, "key": 7}))).unwrap();
    assert_eq!(wire.get("limit"), Some(&WireValue::Null));
    assert_eq!(wire.get("skip"), Some(&WireValue::Int(40)));
    assert_eq!(wire.get("key"), Some(&WireValue::Int(7)));
    assert_eq!(wire.len(), 3);
    // nulls never reach a query string
    assert_eq!(wire.query_pairs().len(), 2);
}

#[test]
fn unknown_name_rejected_regardless_of_value() {
    for value in [json!(true), json!(1), json!("x"), json!(null), json!([1])] {
        let mut map = Map::new();
        map.insert("frobnicate".to_string(), value);
        match translate(&map) {
            Err(Error::InvalidOption { option }) => assert_eq!(option, "frobnicate"),
            other => panic!("Expected InvalidOption, got {:?}", other),
        }
    }
}

#[test]
fn wrong_kind_names_accepted_kinds() {
    match translate(&object(json!({"startkey": 5}))) {
        Err(Error::InvalidOptionType { option, expected }) => {
            assert_eq!(option, "startkey");
            assert_eq!(expected, "string | sequence");
        }
        other => panic!("Expected InvalidOptionType, got {:?}", other),
    }
}

#[test]
fn stale_accepts_exactly_two_values() {
    assert!(translate(&object(json!({"stale": "ok"}))).is_ok());
    assert!(translate(&object(json!({"stale": "update_after"}))).is_ok());

    match translate(&object(json!({"stale": "nope"}))) {
        Err(Error::InvalidOptionValue { option, value }) => {
            assert_eq!(option, "stale");
            assert!(value.contains("nope"));
        }
        other => panic!("Expected InvalidOptionValue, got {:?}", other),
    }
}

#[test]
fn typed_and_dynamic_forms_agree() {
    let typed = QueryOptions::new()
        .startkey(vec!["2013", "10"])
        .inclusive_end(false)
        .stale(Stale::UpdateAfter)
        .limit(None)
        .translate()
        .unwrap();
    let dynamic = translate(&object(json!({
        "startkey": ["2013", "10"],
        "inclusive_end": false,
        "stale": "update_after",
        "limit": null,
    })))
    .unwrap();
    assert_eq!(typed, dynamic);
}
