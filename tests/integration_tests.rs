//! Serde integration: derived types, dynamic values, options, and the error
//! surface of the high-level API.

use serde::{Deserialize, Serialize};
use serde_zon::{
    from_slice, from_str, from_str_with_options, from_value, to_string, to_value, zon,
    DecodeOptions, Value,
};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Hike {
    id: u32,
    name: String,
    #[serde(rename = "distanceKm")]
    distance_km: f64,
    companion: String,
    #[serde(rename = "wasSunny")]
    was_sunny: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Trip {
    title: String,
    hikes: Vec<Hike>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Role {
    Admin,
    User,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Member {
    name: String,
    role: Role,
    email: Option<String>,
}

fn roundtrip<T>(value: &T) -> T
where
    T: Serialize + serde::de::DeserializeOwned,
{
    from_str(&to_string(value).unwrap()).unwrap()
}

#[test]
fn struct_with_table_field() {
    let trip = Trip {
        title: "spring".to_string(),
        hikes: vec![
            Hike {
                id: 1,
                name: "Blue Lake Trail".to_string(),
                distance_km: 7.5,
                companion: "ana".to_string(),
                was_sunny: true,
            },
            Hike {
                id: 2,
                name: "Ridge Overlook".to_string(),
                distance_km: 9.2,
                companion: "luis".to_string(),
                was_sunny: false,
            },
        ],
    };

    let text = to_string(&trip).unwrap();
    assert_eq!(
        text,
        "title:spring\n\
         hikes:@(2):companion,distanceKm,id,name,wasSunny\n\
         ana,7.5,1,Blue Lake Trail,T\n\
         luis,9.2,2,Ridge Overlook,F"
    );
    assert_eq!(roundtrip(&trip), trip);
}

#[test]
fn unit_enum_variants_as_strings() {
    let member = Member {
        name: "Ann".to_string(),
        role: Role::Admin,
        email: None,
    };
    let text = to_string(&member).unwrap();
    assert_eq!(text, "email:null\nname:Ann\nrole:Admin");
    assert_eq!(roundtrip(&member), member);
}

#[test]
fn newtype_and_struct_variants() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Shape {
        Circle(f64),
        Rect { w: i32, h: i32 },
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Drawing {
        shape: Shape,
    }

    let circle = Drawing { shape: Shape::Circle(1.5) };
    let text = to_string(&circle).unwrap();
    assert_eq!(text, "shape:\"{Circle:1.5}\"");
    assert_eq!(roundtrip(&circle), circle);

    let rect = Drawing { shape: Shape::Rect { w: 3, h: 4 } };
    let text = to_string(&rect).unwrap();
    assert_eq!(text, "shape:\"{Rect:{h:4,w:3}}\"");
    assert_eq!(roundtrip(&rect), rect);
}

#[test]
fn options_and_nested_optionals() {
    let some: Member = from_str("email:a@b.c\nname:Bo\nrole:User").unwrap();
    assert_eq!(some.email, Some("a@b.c".to_string()));

    let none: Member = from_str("email:null\nname:Bo\nrole:User").unwrap();
    assert_eq!(none.email, None);
}

#[test]
fn maps_round_trip() {
    let mut map = BTreeMap::new();
    map.insert("alpha".to_string(), 1i64);
    map.insert("beta".to_string(), 2i64);
    assert_eq!(roundtrip(&map), map);

    // Keys with dots survive through quoted-literal keys.
    let mut dotted = BTreeMap::new();
    dotted.insert("a.b".to_string(), 1i64);
    let text = to_string(&dotted).unwrap();
    assert_eq!(text, "\"a.b\":1");
    assert_eq!(roundtrip(&dotted), dotted);
}

#[test]
fn scalar_roots() {
    assert_eq!(roundtrip(&42i64), 42);
    assert_eq!(roundtrip(&-7i32), -7);
    assert_eq!(roundtrip(&true), true);
    assert_eq!(roundtrip(&3.25f64), 3.25);
    assert_eq!(roundtrip(&"plain".to_string()), "plain");
    assert_eq!(roundtrip(&"123".to_string()), "123");
    assert_eq!(roundtrip(&String::new()), "");
    assert_eq!(roundtrip(&Option::<i32>::None), None);
}

#[test]
fn tuples_and_sequences() {
    assert_eq!(roundtrip(&(1i32, true, "x".to_string())), (1, true, "x".to_string()));
    assert_eq!(roundtrip(&vec![vec![1, 2], vec![3]]), vec![vec![1, 2], vec![3]]);
}

#[test]
fn value_round_trips_through_serde() {
    let value = zon!({"a": [1, 2.5, null], "b": {"c": "x"}});
    let text = to_string(&value).unwrap();
    let back: Value = from_str(&text).unwrap();
    assert_eq!(back, value);
}

#[test]
fn from_value_conversions() {
    let v = zon!({"x": 1, "y": 2});
    #[derive(Deserialize, Debug, PartialEq)]
    struct P {
        x: i32,
        y: i32,
    }
    assert_eq!(from_value::<P>(v).unwrap(), P { x: 1, y: 2 });
}

#[test]
fn overflow_is_an_encode_error() {
    let err = to_value(&u64::MAX).unwrap_err();
    assert_eq!(err.code(), "EncodeOverflow");
    let err = to_string(&u128::MAX).unwrap_err();
    assert_eq!(err.code(), "EncodeOverflow");
}

#[test]
fn runaway_recursion_reports_a_cycle() {
    struct Cyclic;

    impl Serialize for Cyclic {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            use serde::ser::SerializeSeq;
            let mut seq = serializer.serialize_seq(Some(1))?;
            seq.serialize_element(&Cyclic)?;
            seq.end()
        }
    }

    let err = to_value(&Cyclic).unwrap_err();
    assert_eq!(err.code(), "EncodeCycle");
}

#[test]
fn invalid_utf8_input() {
    let err = from_slice::<Value>(&[0x66, 0xff, 0x66]).unwrap_err();
    assert_eq!(err.code(), "DecodeBadUTF8");
}

#[test]
fn lenient_mode_via_options() {
    let text = "users:@(3):id\n1\n2";
    assert!(from_str::<Value>(text).is_err());
    let value: Value = from_str_with_options(text, &DecodeOptions::lenient()).unwrap();
    assert_eq!(value, zon!({"users": [{"id": 1}, {"id": 2}]}));
}

#[test]
fn unicode_content() {
    let value = zon!({"greeting": "héllo wörld", "emoji": "🌲 trail"});
    let text = to_string(&value).unwrap();
    assert_eq!(text, "emoji:🌲 trail\ngreeting:héllo wörld");
    assert_eq!(from_str::<Value>(&text).unwrap(), value);
}

#[test]
fn type_mismatch_is_an_error() {
    let err = from_str::<i64>("hello").unwrap_err();
    assert!(!err.to_string().is_empty());
}
