//! Literal construction of [`Value`](crate::Value) trees.

/// Builds a [`Value`](crate::Value) from JSON-like literal syntax.
///
/// Compound arms recurse; anything that is not a literal compound or one of
/// the keyword scalars falls through to [`to_value`](crate::to_value), so
/// bindings and block expressions splice in directly.
///
/// # Examples
///
/// ```rust
/// use serde_zon::zon;
///
/// let doc = zon!({
///     "friends": ["ana", "luis", "sam"],
///     "hikes": [{"id": 1, "wasSunny": true}]
/// });
/// assert_eq!(doc.as_object().unwrap().len(), 2);
/// ```
#[macro_export]
macro_rules! zon {
    ({}) => {
        $crate::Value::Object($crate::ZonMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut fields = $crate::ZonMap::new();
        $(
            fields.insert($key.to_string(), $crate::zon!($value));
        )*
        $crate::Value::Object(fields)
    }};

    ([]) => {
        $crate::Value::Array(Vec::new())
    };

    ([ $($item:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::zon!($item)),*])
    };

    // Keyword scalars, then the expression fallback. Order matters: `true`
    // and friends parse as expressions too.
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ($scalar:expr) => {
        $crate::to_value(&$scalar).unwrap_or($crate::Value::Null)
    };
}

#[cfg(test)]
mod tests {
    use crate::{encode_value, EncodeOptions, Number, Value, ZonMap};

    #[test]
    fn keyword_scalars_and_literals() {
        assert_eq!(zon!(null), Value::Null);
        assert_eq!(zon!(true), Value::Bool(true));
        assert_eq!(zon!(false), Value::Bool(false));
        assert_eq!(zon!(320), Value::Number(Number::Integer(320)));
        assert_eq!(zon!(7.5), Value::Number(Number::Float(7.5)));
        assert_eq!(
            zon!("Blue Lake Trail"),
            Value::String("Blue Lake Trail".to_string())
        );
    }

    #[test]
    fn reserved_spellings_stay_strings() {
        assert_eq!(zon!("T"), Value::String("T".to_string()));
        assert_eq!(zon!("null"), Value::String("null".to_string()));
        assert_ne!(zon!("T"), zon!(true));
        assert_ne!(zon!("null"), zon!(null));
    }

    #[test]
    fn uniform_rows_encode_as_a_table() {
        let doc = zon!({
            "hikes": [
                {"id": 1, "wasSunny": true},
                {"id": 2, "wasSunny": false}
            ]
        });
        let text = encode_value(&doc, &EncodeOptions::default()).unwrap();
        assert_eq!(text, "hikes:@(2):id,wasSunny\n1,T\n2,F");
    }

    #[test]
    fn dotted_literal_keys_are_single_fields() {
        let doc = zon!({"server.host": "localhost"});
        let obj = doc.as_object().unwrap();
        assert_eq!(obj.get("server.host"), Some(&Value::from("localhost")));
        assert!(obj.get("server").is_none());
    }

    #[test]
    fn empty_compounds_and_trailing_commas() {
        assert_eq!(zon!({}), Value::Object(ZonMap::new()));
        assert_eq!(zon!([]), Value::Array(Vec::new()));

        let doc = zon!({"friends": ["ana", "luis",],});
        let friends = doc
            .as_object()
            .unwrap()
            .get("friends")
            .unwrap()
            .as_array()
            .unwrap();
        assert_eq!(friends.len(), 2);
    }

    #[test]
    fn bindings_splice_as_values() {
        let rows = 3;
        let label = format!("run-{rows}");
        let doc = zon!({"label": label, "rows": rows});
        let obj = doc.as_object().unwrap();
        assert_eq!(obj.get("rows"), Some(&Value::from(3)));
        assert_eq!(obj.get("label"), Some(&Value::from("run-3")));
    }
}
