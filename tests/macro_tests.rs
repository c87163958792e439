//! Tests for the `zon!` literal macro through the public API.

use serde_zon::{encode_value, to_string, zon, EncodeOptions, Value};

#[test]
fn builds_a_whole_document() {
    let doc = zon!({
        "context": {"location": "Boulder", "season": "spring_2025"},
        "friends": ["ana", "luis", "sam"],
        "hikes": [
            {"id": 1, "distanceKm": 7.5, "wasSunny": true},
            {"id": 2, "distanceKm": 9.2, "wasSunny": false}
        ]
    });

    let obj = doc.as_object().unwrap();
    assert_eq!(obj.len(), 3);

    let context = obj.get("context").unwrap().as_object().unwrap();
    assert_eq!(context.get("location"), Some(&Value::from("Boulder")));

    let hikes = obj.get("hikes").unwrap().as_array().unwrap();
    assert_eq!(
        hikes[1].as_object().unwrap().get("distanceKm"),
        Some(&Value::from(9.2))
    );
}

#[test]
fn macro_output_encodes_canonically() {
    let doc = zon!({
        "trail": "Wildflower Loop",
        "elevationGain": 180,
        "companions": ["sam"]
    });
    assert_eq!(
        encode_value(&doc, &EncodeOptions::default()).unwrap(),
        "companions:\"[sam]\"\nelevationGain:180\ntrail:Wildflower Loop"
    );
}

#[test]
fn mixed_nesting() {
    let doc = zon!({
        "legs": [[5.1, 2.4], []],
        "notes": {"surface": null}
    });
    let obj = doc.as_object().unwrap();
    let legs = obj.get("legs").unwrap().as_array().unwrap();
    assert_eq!(legs[0].as_array().unwrap().len(), 2);
    assert!(legs[1].as_array().unwrap().is_empty());
    assert_eq!(
        obj.get("notes").unwrap().as_object().unwrap().get("surface"),
        Some(&Value::Null)
    );
}

#[test]
fn block_expressions_as_values() {
    let doc = zon!({ "sum": { 320 + 540 }, "half": { 9.2 / 2.0 } });
    let obj = doc.as_object().unwrap();
    assert_eq!(obj.get("sum"), Some(&Value::from(860)));
    assert_eq!(obj.get("half"), Some(&Value::from(4.6)));
}

#[test]
fn macro_values_round_trip_via_serde() {
    let doc = zon!({"zip": "00501", "big": 1000000});
    let text = to_string(&doc).unwrap();
    assert_eq!(text, "big:1000000\nzip:\"00501\"");
    let back: Value = serde_zon::from_str(&text).unwrap();
    assert_eq!(back, doc);
}
