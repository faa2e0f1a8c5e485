//! Integration tests for pointers carried by accessors.

use jsonprobe::{Json, JsonPath, PathSegment};
use serde_json::json;

#[test]
fn test_accessor_pointers_match_constructed_paths() {
    let node = json!({"users": [{"address": {"city": "Utrecht"}}]});
    let city = Json::view(&node)
        .field("users")
        .unwrap()
        .nth(0)
        .unwrap()
        .field("address")
        .unwrap()
        .field("city")
        .unwrap();

    let expected = JsonPath::root()
        .field("users")
        .index(0)
        .field("address")
        .field("city");

    assert_eq!(city.pointer(), &expected);
    assert_eq!(city.pointer().to_string(), "$.users[0].address.city");
}

#[test]
fn test_consecutive_indices() {
    let path = JsonPath::root().index(0).index(1).index(2);
    assert_eq!(path.to_string(), "$[0][1][2]");
}

#[test]
fn test_segments_reflect_navigation() {
    let node = json!({"data": [[0, {"value": 1}]]});
    let value = Json::view(&node)
        .field("data")
        .unwrap()
        .nth(0)
        .unwrap()
        .nth(1)
        .unwrap()
        .field("value")
        .unwrap();

    let segments: Vec<&PathSegment> = value.pointer().segments().collect();
    assert_eq!(segments.len(), 4);

    match &segments[0] {
        PathSegment::Field(name) => assert_eq!(name, "data"),
        _ => panic!("Expected Field segment"),
    }

    match &segments[2] {
        PathSegment::Index(idx) => assert_eq!(*idx, 1),
        _ => panic!("Expected Index segment"),
    }
}

#[test]
fn test_path_hash() {
    use std::collections::HashSet;

    let mut set = HashSet::new();
    set.insert(JsonPath::root().field("a"));
    set.insert(JsonPath::root().field("b"));
    set.insert(JsonPath::root().field("a"));

    assert_eq!(set.len(), 2);
}

#[test]
fn test_default_is_root() {
    assert_eq!(JsonPath::default(), JsonPath::root());
}
