//! End-to-end codec behavior: literal output vectors, round-trip laws,
//! strict-mode validation, and security limits.

use serde_zon::{
    decode_value, encode_value, zon, DecodeOptions, EncodeOptions, Value, ZonMap,
};

fn encode(value: &Value) -> String {
    encode_value(value, &EncodeOptions::default()).unwrap()
}

fn decode(text: &str) -> Value {
    decode_value(text, &DecodeOptions::default()).unwrap()
}

fn decode_err(text: &str) -> serde_zon::Error {
    decode_value(text, &DecodeOptions::default()).unwrap_err()
}

#[test]
fn hikes_document() {
    let value = zon!({
        "context": {
            "task": "Our favorite hikes together",
            "location": "Boulder",
            "season": "spring_2025"
        },
        "friends": ["ana", "luis", "sam"],
        "hikes": [
            {"id": 1, "name": "Blue Lake Trail", "distanceKm": 7.5,
             "elevationGain": 320, "companion": "ana", "wasSunny": true},
            {"id": 2, "name": "Ridge Overlook", "distanceKm": 9.2,
             "elevationGain": 540, "companion": "luis", "wasSunny": false},
            {"id": 3, "name": "Wildflower Loop", "distanceKm": 5.1,
             "elevationGain": 180, "companion": "sam", "wasSunny": true}
        ]
    });

    let expected = "\
context:\"{location:Boulder,season:spring_2025,task:Our favorite hikes together}\"
friends:\"[ana,luis,sam]\"
hikes:@(3):companion,distanceKm,elevationGain,id,name,wasSunny
ana,7.5,320,1,Blue Lake Trail,T
luis,9.2,540,2,Ridge Overlook,F
sam,5.1,180,3,Wildflower Loop,T";

    let text = encode(&value);
    assert_eq!(text, expected);
    assert_eq!(decode(&text), value);
}

#[test]
fn reserved_literal_strings_are_quoted() {
    let value = zon!({"flag": "T", "kind": "null"});
    let text = encode(&value);
    assert_eq!(text, "flag:\"T\"\nkind:\"null\"");

    let back = decode(&text);
    let obj = back.as_object().unwrap();
    assert_eq!(obj.get("flag"), Some(&Value::from("T")));
    assert_eq!(obj.get("kind"), Some(&Value::from("null")));
}

#[test]
fn leading_zero_strings_and_number_canonicalization() {
    let value = zon!({"zip": "00501", "big": 1000000, "x": 3.140});
    let text = encode(&value);
    assert_eq!(text, "big:1000000\nx:3.14\nzip:\"00501\"");

    let back = decode(&text);
    let obj = back.as_object().unwrap();
    assert_eq!(obj.get("zip"), Some(&Value::from("00501")));
    assert_eq!(obj.get("big"), Some(&Value::from(1_000_000)));
    assert_eq!(obj.get("x"), Some(&Value::from(3.14)));
}

#[test]
fn csv_quoted_cell_with_embedded_quotes_and_comma() {
    let value = zon!([{"id": 1, "text": "He said \"hi\", loudly"}]);
    let text = encode(&value);
    assert_eq!(text, "@(1):id,text\n1,\"He said \"\"hi\"\", loudly\"");
    assert_eq!(decode(&text), value);
}

#[test]
fn non_finite_and_signed_zero_normalization() {
    let mut map = ZonMap::new();
    map.insert("a".to_string(), Value::from(f64::NAN));
    map.insert("b".to_string(), Value::from(f64::INFINITY));
    map.insert("c".to_string(), Value::from(f64::NEG_INFINITY));
    map.insert("d".to_string(), Value::from(0.0));
    map.insert("e".to_string(), Value::from(-0.0));

    let text = encode(&Value::Object(map));
    assert_eq!(text, "a:null\nb:null\nc:null\nd:0\ne:0");
}

#[test]
fn strict_row_count_mismatch() {
    let text = "users:@(2):id,name\n1,Alice";
    let err = decode_err(text);
    assert_eq!(err.code(), "E001");

    let repaired = decode_value(text, &DecodeOptions::lenient()).unwrap();
    assert_eq!(repaired, zon!({"users": [{"id": 1, "name": "Alice"}]}));
}

#[test]
fn forbidden_keys_are_rejected() {
    assert_eq!(decode_err("__proto__:T").code(), "DecodePoisonKey");
    assert_eq!(decode_err("constructor:1").code(), "DecodePoisonKey");
    assert_eq!(decode_err("a:\"{prototype:1}\"").code(), "DecodePoisonKey");
    assert_eq!(decode_err("a.__proto__.b:1").code(), "DecodePoisonKey");
    assert_eq!(decode_err("t:@(1):__proto__\n1").code(), "DecodePoisonKey");

    let err = encode_value(&zon!({"__proto__": 1}), &EncodeOptions::default()).unwrap_err();
    assert_eq!(err.code(), "DecodePoisonKey");
}

#[test]
fn canonical_numbers_never_use_exponents() {
    assert_eq!(encode(&Value::from(1e6)), "1000000");
    assert_eq!(encode(&Value::from(1e-7)), "0.0000001");
    assert_eq!(encode(&Value::from(5.0)), "5");
    assert_eq!(encode(&Value::from(-0.0)), "0");
    assert_eq!(encode(&Value::from(i64::MIN)), "-9223372036854775808");

    // Exponent forms are accepted on input and re-encode expanded.
    assert_eq!(encode(&decode("x:1e6")), "x:1000000");
    assert_eq!(encode(&decode("x:2.5e-3")), "x:0.0025");
}

#[test]
fn quoting_is_minimal() {
    assert_eq!(encode(&zon!({"a": "hello world"})), "a:hello world");
    assert_eq!(encode(&zon!({"a": "snake_case-1.2"})), "a:snake_case-1.2");
    assert_eq!(encode(&zon!({"a": "2024-01-15"})), "a:2024-01-15");
    assert_eq!(encode(&zon!({"a": "10:30:00"})), "a:10:30:00");
    assert_eq!(
        encode(&zon!({"a": "2024-01-15T10:30:00Z"})),
        "a:2024-01-15T10:30:00Z"
    );

    assert_eq!(encode(&zon!({"a": " padded"})), "a:\" padded\"");
    assert_eq!(encode(&zon!({"a": ""})), "a:\"\"");
    assert_eq!(encode(&zon!({"a": "a:b"})), "a:\"a:b\"");
}

#[test]
fn root_scalars_that_read_as_structure_are_quoted() {
    // A bare ISO time would split at the colon; a bare @ would read as a
    // table header. Both stay bare in value positions.
    for s in ["10:30:00", "2024-01-15T10:30:00Z", "@anchor", "a:b"] {
        let value = Value::from(s);
        let text = encode(&value);
        assert!(text.starts_with('"'), "expected quoting for root {s:?}, got {text:?}");
        assert_eq!(decode(&text), value);
    }
    assert_eq!(encode(&zon!({"t": "10:30:00"})), "t:10:30:00");
}

#[test]
fn iso_looking_tokens_decode_as_strings() {
    let obj = decode("when:2024-01-15T10:30:00Z\nat:10:30:00");
    let obj = obj.as_object().unwrap();
    assert_eq!(obj.get("when"), Some(&Value::from("2024-01-15T10:30:00Z")));
    assert_eq!(obj.get("at"), Some(&Value::from("10:30:00")));
}

#[test]
fn idempotent_normalization() {
    let samples = vec![
        zon!({"a": 1, "b": [1, 2, {"c": "x,y"}], "d": {"e": null}}),
        zon!([{"id": 1, "v": 2.5}, {"id": 2, "v": 3.5}]),
        zon!({"t": "T", "n": "007", "s": "plain"}),
        Value::Null,
        zon!([]),
        zon!({}),
    ];
    for value in samples {
        let once = encode(&value);
        let twice = encode(&decode(&once));
        assert_eq!(once, twice, "normalization not idempotent for {once:?}");
    }
}

#[test]
fn key_order_does_not_affect_decoding() {
    let a = decode("x:1\ny:2\nz:3");
    let b = decode("z:3\nx:1\ny:2");
    assert_eq!(a, b);
}

#[test]
fn root_forms() {
    assert_eq!(decode(""), Value::Null);
    assert_eq!(decode("\n\n"), Value::Null);
    assert_eq!(decode("42"), Value::from(42));
    assert_eq!(decode("T"), Value::from(true));
    assert_eq!(decode("hello"), Value::from("hello"));
    assert_eq!(decode("\"00501\""), Value::from("00501"));
    assert_eq!(decode("[1,2,3]"), zon!([1, 2, 3]));
    assert_eq!(decode("{a:1}"), zon!({"a": 1}));

    assert_eq!(encode(&Value::from(42)), "42");
    assert_eq!(encode(&zon!([1, 2, 3])), "[1,2,3]");
    assert_eq!(encode(&zon!({})), "{}");
    assert_eq!(encode(&zon!([])), "[]");
}

#[test]
fn empty_collections_inline() {
    let value = zon!({"xs": [], "o": {}});
    let text = encode(&value);
    assert_eq!(text, "o:\"{}\"\nxs:\"[]\"");
    assert_eq!(decode(&text), value);
}

#[test]
fn empty_metadata_value_is_empty_string() {
    let obj = decode("k:");
    assert_eq!(obj.as_object().unwrap().get("k"), Some(&Value::from("")));

    let text = encode(&zon!({"k": ""}));
    assert_eq!(text, "k:\"\"");
    assert_eq!(decode(&text), zon!({"k": ""}));
}

#[test]
fn crlf_input_is_normalized() {
    assert_eq!(decode("a:1\r\nb:2\r\n"), zon!({"a": 1, "b": 2}));
}

#[test]
fn legacy_named_header_accepted() {
    let value = decode("@hikes(2):id,name\n1,Blue Lake\n2,Ridge");
    assert_eq!(
        value,
        zon!({"hikes": [{"id": 1, "name": "Blue Lake"}, {"id": 2, "name": "Ridge"}]})
    );
    // Canonical emission uses the key:@(N) form.
    assert_eq!(
        encode(&value),
        "hikes:@(2):id,name\n1,Blue Lake\n2,Ridge"
    );
}

#[test]
fn dotted_keys_reconstruct_nested_objects() {
    let value = decode("server.host:localhost\nserver.port:8080\nname:demo");
    assert_eq!(
        value,
        zon!({"server": {"host": "localhost", "port": 8080}, "name": "demo"})
    );

    assert_eq!(decode_err("a:1\na.b:2").code(), "DecodeKeyCollision");
}

#[test]
fn dotted_table_names_nest() {
    let value = decode("metrics.daily:@(1):hits\n42");
    assert_eq!(value, zon!({"metrics": {"daily": [{"hits": 42}]}}));
}

#[test]
fn dot_flattening_round_trips() {
    let value = zon!({"note": {"text": "He said \"hi\""}});
    let text = encode(&value);
    assert_eq!(text, "note.text:\"He said \\\"hi\\\"\"");
    assert_eq!(decode(&text), value);

    // Clean leaves stay inline.
    let clean = zon!({"ctx": {"a": "plain", "b": 2}});
    assert_eq!(encode(&clean), "ctx:\"{a:plain,b:2}\"");

    // Disabled flattening falls back to the inline payload.
    let inline = encode_value(&value, &EncodeOptions::default().with_dot_flatten(false)).unwrap();
    assert_eq!(inline, "note:\"{text:\\\"He said \\\\\\\"hi\\\\\\\"\\\"}\"");
    assert_eq!(decode(&inline), value);
}

#[test]
fn compound_lookalike_strings_survive() {
    for s in ["{a:1}", "[1,2]", "\"quoted\"", "{", "[x"] {
        let value = zon!({ "s": s });
        let text = encode(&value);
        assert_eq!(decode(&text), value, "failed for {s:?} via {text:?}");
    }
}

#[test]
fn sparse_rows_in_lenient_mode() {
    let text = "users:@(2):id,name\n1,Alice,age:30\n2";
    assert_eq!(decode_err(text).code(), "E002");

    let value = decode_value(text, &DecodeOptions::lenient()).unwrap();
    assert_eq!(
        value,
        zon!({"users": [
            {"id": 1, "name": "Alice", "age": 30},
            {"id": 2, "name": null}
        ]})
    );
}

#[test]
fn surplus_rows_rejected_in_strict_mode() {
    let text = "users:@(1):id,name\n1,Alice\n2,Bob";
    assert_eq!(decode_err(text).code(), "E001");
}

#[test]
fn escape_validation() {
    assert_eq!(decode_err("a:\"x\\qy\"").code(), "DecodeBadEscape");
    assert_eq!(decode_err("a:\"unclosed").code(), "DecodeUnterminatedString");
    assert_eq!(decode_err("t:@(1):a,b\n\"x\"y,1").code(), "DecodeBadCell");
    assert_eq!(decode_err("a:\"x\" junk").code(), "DecodeBadCell");
}

#[test]
fn escaped_content_round_trips() {
    let value = zon!({"s": "line1\nline2\ttabbed \"q\" \\slash"});
    let text = encode(&value);
    assert_eq!(decode(&text), value);

    // The same content survives a table cell.
    let row = zon!([{"id": 1, "s": "line1\nline2"}]);
    let text = encode(&row);
    assert_eq!(text, "@(1):id,s\n1,\"\"\"line1\\nline2\"\"\"");
    assert_eq!(decode(&text), row);
}

#[test]
fn malformed_headers() {
    assert_eq!(decode_err("users:@(x):id").code(), "DecodeBadHeader");
    assert_eq!(decode_err("users:@(1:id").code(), "DecodeBadHeader");
    assert_eq!(decode_err("users:@(1):").code(), "DecodeBadHeader");
    assert_eq!(decode_err("users:@(1):id,id").code(), "DecodeBadHeader");
    assert_eq!(decode_err("@(oops").code(), "DecodeBadHeader");
}

#[test]
fn bom_is_rejected() {
    assert_eq!(decode_err("\u{feff}a:1").code(), "DecodeBadUTF8");
}

#[test]
fn document_and_line_limits() {
    let options = DecodeOptions::default().with_max_document_bytes(4);
    assert_eq!(
        decode_value("a:12345", &options).unwrap_err().code(),
        "E301"
    );

    let options = DecodeOptions::default().with_max_line_bytes(8);
    assert_eq!(
        decode_value("key:a very long line", &options).unwrap_err().code(),
        "E302"
    );
}

#[test]
fn array_and_key_limits() {
    let options = DecodeOptions::default().with_max_array_len(2);
    assert_eq!(
        decode_value("xs:\"[1,2,3]\"", &options).unwrap_err().code(),
        "E303"
    );
    assert_eq!(
        decode_value("t:@(5):id\n1\n2\n3\n4\n5", &options).unwrap_err().code(),
        "E303"
    );

    let options = DecodeOptions::default().with_max_object_keys(2);
    assert_eq!(
        decode_value("a:1\nb:2\nc:3", &options).unwrap_err().code(),
        "E304"
    );
    assert_eq!(
        decode_value("o:\"{a:1,b:2,c:3}\"", &options).unwrap_err().code(),
        "E304"
    );
}

#[test]
fn depth_limit() {
    let options = DecodeOptions::default().with_max_depth(2);
    assert_eq!(
        decode_value("a:\"{b:{c:{d:1}}}\"", &options).unwrap_err().code(),
        "DecodeDepth"
    );
    assert!(decode_value("a:\"{b:{c:1}}\"", &options).is_ok());

    let options = DecodeOptions::default().with_max_depth(3);
    assert_eq!(
        decode_value("a.b.c.d:1", &options).unwrap_err().code(),
        "DecodeDepth"
    );
}

#[test]
fn error_context_is_reported() {
    let err = decode_err("ok:1\nbroken:\"x\\qy\"");
    assert_eq!(err.code(), "DecodeBadEscape");
    assert_eq!(err.line(), Some(2));
}

#[test]
fn table_cells_carry_nested_values() {
    let value = zon!([
        {"id": 1, "meta": {"k": "v"}, "tags": [1, 2]},
        {"id": 2, "meta": {}, "tags": []}
    ]);
    let text = encode(&value);
    assert_eq!(text, "@(2):id,meta,tags\n1,\"{k:v}\",\"[1,2]\"\n2,{},[]");
    assert_eq!(decode(&text), value);
}

#[test]
fn trailing_newline_option() {
    let text = encode_value(
        &zon!({"a": 1}),
        &EncodeOptions::default().with_trailing_newline(true),
    )
    .unwrap();
    assert_eq!(text, "a:1\n");
    assert_eq!(decode(&text), zon!({"a": 1}));
}

#[test]
fn unsorted_keys_option() {
    let value = zon!({"b": 1, "a": 2});
    let text = encode_value(&value, &EncodeOptions::default().with_sort_keys(false)).unwrap();
    assert_eq!(text, "b:1\na:2");
}
