use serde_json::json;

use super::*;
use crate::schema::LegacyWallKind;

fn legacy_json() -> Value {
    json!({
        "name": "Cellar",
        "width": 1000,
        "height": 800,
        "grid": 100,
        "gridDistance": 5,
        "gridUnits": "ft",
        "walls": [
            { "c": [100, 100, 200, 100], "move": 1, "sense": 1, "door": 0, "sound": 1 },
            { "c": [200, 100, 200, 300], "door": 1 }
        ]
    })
}

fn canonical_json() -> Value {
    json!({
        "format": 0.3,
        "resolution": {
            "map_origin": { "x": 0, "y": 0 },
            "map_size": { "x": 10, "y": 8 },
            "pixels_per_grid": 70
        },
        "line_of_sight": [[{ "x": 0, "y": 0 }, { "x": 1, "y": 0 }]],
        "portals": []
    })
}

#[test]
fn detects_legacy_export() {
    assert_eq!(detect(&legacy_json()), SchemaKind::Legacy);
}

#[test]
fn detects_canonical_export() {
    assert_eq!(detect(&canonical_json()), SchemaKind::Canonical);
}

#[test]
fn canonical_needs_one_line_of_sight_array() {
    let mut v = canonical_json();
    v.as_object_mut().unwrap().remove("line_of_sight");
    assert_eq!(detect(&v), SchemaKind::Unrecognized);

    v["objects_line_of_sight"] = json!([]);
    assert_eq!(detect(&v), SchemaKind::Canonical);
}

#[test]
fn legacy_wall_must_have_four_numeric_coordinates() {
    let mut v = legacy_json();
    v["walls"][0]["c"] = json!([1, 2, 3]);
    assert_eq!(detect(&v), SchemaKind::Unrecognized);

    let mut v = legacy_json();
    v["walls"][1]["c"] = json!([1, 2, 3, "4"]);
    assert_eq!(detect(&v), SchemaKind::Unrecognized);
}

#[test]
fn non_object_documents_are_unrecognized() {
    assert_eq!(detect(&json!([1, 2, 3])), SchemaKind::Unrecognized);
    assert_eq!(detect(&json!(null)), SchemaKind::Unrecognized);
    assert_eq!(detect(&json!({ "format": 1 })), SchemaKind::Unrecognized);
}

#[test]
fn from_value_rejects_unrecognized_with_unsupported_format() {
    let err = SourceDocument::from_value(json!({ "hello": "world" })).unwrap_err();
    assert!(matches!(err, VttError::UnsupportedFormat(_)));
}

#[test]
fn from_value_builds_typed_records() {
    let SourceDocument::Legacy(doc) = SourceDocument::from_value(legacy_json()).unwrap() else {
        panic!("expected legacy document");
    };
    assert_eq!(doc.grid, 100.0);
    assert_eq!(doc.walls.len(), 2);
    assert_eq!(doc.walls[0].movement, Some(1));
    assert_eq!(doc.walls[1].kind(), LegacyWallKind::Door);

    let SourceDocument::Canonical(doc) = SourceDocument::from_value(canonical_json()).unwrap()
    else {
        panic!("expected canonical document");
    };
    assert_eq!(doc.resolution.pixels_per_grid, Some(70.0));
    assert!(doc.image_payload().is_none());
}

#[test]
fn image_probe_and_strip() {
    let mut v = canonical_json();
    assert!(!has_map_image(&v));
    v["image"] = json!("");
    assert!(!has_map_image(&v));
    v["image"] = json!("iVBORw0KGgo=");
    assert!(has_map_image(&v));

    assert!(strip_image(&mut v));
    assert!(!has_map_image(&v));
    assert!(!strip_image(&mut v));
}

#[test]
fn parse_document_rejects_invalid_json() {
    let err = parse_document(b"{ not json").unwrap_err();
    assert!(matches!(err, VttError::Json(_)));
    assert!(parse_document(br#"{"grid": 1}"#).is_ok());
}
