//! # serde_zon
//!
//! A Serde-compatible codec for the ZON (Zero Overhead Notation) format.
//!
//! ## What is ZON?
//!
//! ZON is a compact, line-oriented text format representing the JSON data
//! model with a reduced token footprint, designed for efficient communication
//! with Large Language Models. Uniform object arrays collapse into CSV-style
//! tables, nested values ride in quoted single-line payloads, and strings
//! stay unquoted wherever the grammar allows.
//!
//! ## Key Features
//!
//! - **Token-efficient**: no block-level braces, minimal quoting, tabular
//!   arrays with a single header line
//! - **Canonical**: byte-identical output for equal values, sorted keys,
//!   normalized numbers
//! - **Serde compatible**: works with `#[derive(Serialize, Deserialize)]`
//!   types as well as the dynamic [`Value`] tree
//! - **Strict by default**: declared row counts, field counts, escapes, and
//!   security limits are validated on decode
//! - **No unsafe code**
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_zon::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User { id: 123, name: "Alice".to_string(), active: true };
//!
//! let zon = to_string(&user).unwrap();
//! assert_eq!(zon, "active:T\nid:123\nname:Alice");
//!
//! let back: User = from_str(&zon).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ## Tabular Arrays
//!
//! Arrays of structurally identical objects serialize as tables:
//!
//! ```rust
//! use serde::Serialize;
//! use serde_zon::to_string;
//!
//! #[derive(Serialize)]
//! struct Product {
//!     id: u32,
//!     name: String,
//!     price: f64,
//! }
//!
//! let products = vec![
//!     Product { id: 1, name: "Widget".to_string(), price: 9.99 },
//!     Product { id: 2, name: "Gadget".to_string(), price: 14.99 },
//! ];
//!
//! let zon = to_string(&products).unwrap();
//! assert_eq!(zon, "@(2):id,name,price\n1,Widget,9.99\n2,Gadget,14.99");
//! ```
//!
//! ## Dynamic Values
//!
//! ```rust
//! use serde_zon::{zon, Value};
//!
//! let data = zon!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["rust", "serde", "llm"]
//! });
//!
//! if let Value::Object(obj) = data {
//!     assert_eq!(obj.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```
//!
//! ## Strictness and Limits
//!
//! Decoding validates declared table shapes and enforces size limits; both
//! are configurable through [`DecodeOptions`]:
//!
//! ```rust
//! use serde_zon::{decode_value, DecodeOptions};
//!
//! let text = "users:@(2):id,name\n1,Alice";
//! let err = decode_value(text, &DecodeOptions::default()).unwrap_err();
//! assert_eq!(err.code(), "E001");
//!
//! let repaired = decode_value(text, &DecodeOptions::lenient()).unwrap();
//! assert_eq!(repaired.as_object().unwrap().get("users").unwrap().as_array().unwrap().len(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod de;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod options;
pub mod quote;
pub mod ser;
pub mod value;

pub use de::{decode_value, Decoder};
pub use error::{Error, Result};
pub use map::ZonMap;
pub use options::{DecodeOptions, EncodeOptions};
pub use ser::{Encoder, ValueSerializer};
pub use value::{Number, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Encodes a value tree to canonical ZON text.
///
/// # Examples
///
/// ```rust
/// use serde_zon::{encode_value, zon, EncodeOptions};
///
/// let value = zon!({"b": 2, "a": 1});
/// let text = encode_value(&value, &EncodeOptions::default()).unwrap();
/// assert_eq!(text, "a:1\nb:2");
/// ```
///
/// # Errors
///
/// Fails on forbidden object keys and on nesting past the encode bound.
pub fn encode_value(value: &Value, options: &EncodeOptions) -> Result<String> {
    Encoder::new(options.clone()).encode(value)
}

/// Serialize any `T: Serialize` to a ZON string.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_zon::to_string;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x:1\ny:2");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be canonicalized (unsupported types,
/// integers beyond 64 bits) or encoded (forbidden keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a ZON string with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be canonicalized or encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    encode_value(&to_value(value)?, options)
}

/// Convert any `T: Serialize` into a canonical [`Value`] tree.
///
/// This is the canonicalization boundary: non-finite floats become null,
/// integral floats become integers, bytes become base64 text.
///
/// # Examples
///
/// ```rust
/// use serde_zon::{to_value, Value};
///
/// assert_eq!(to_value(&5.0).unwrap(), Value::from(5));
/// assert_eq!(to_value(&f64::NAN).unwrap(), Value::Null);
/// ```
///
/// # Errors
///
/// Returns an error for unsupported shapes (non-string map keys) and
/// integers that do not fit in `i64`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer::new())
}

/// Serialize any `T: Serialize` to a writer in ZON format.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_zon::to_writer;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x:1\ny:2");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a writer in ZON format with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &EncodeOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))
}

/// Deserialize an instance of type `T` from a string of ZON text.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_zon::from_str;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x:1\ny:2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid ZON or cannot be deserialized
/// to type `T`. Decode errors carry line information and a stable code.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, &DecodeOptions::default())
}

/// Deserialize an instance of type `T` from ZON text with custom options.
///
/// # Errors
///
/// Returns an error if the input is not valid ZON or cannot be deserialized
/// to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: &DecodeOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(decode_value(s, options)?)
}

/// Deserialize an instance of type `T` from bytes of ZON text.
///
/// # Examples
///
/// ```rust
/// use serde_zon::from_slice;
///
/// let n: i64 = from_slice(b"42").unwrap();
/// assert_eq!(n, 42);
/// ```
///
/// # Errors
///
/// Returns `DecodeBadUTF8` if the bytes are not valid UTF-8, otherwise as
/// [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::BadUtf8(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an I/O stream of ZON.
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid ZON, or the
/// data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice(&buf)
}

/// Interpret a decoded [`Value`] as an instance of type `T`.
///
/// # Examples
///
/// ```rust
/// use serde_zon::{from_value, zon};
///
/// let pair: (i32, bool) = from_value(zon!([1, true])).unwrap();
/// assert_eq!(pair, (1, true));
/// ```
///
/// # Errors
///
/// Returns an error if the value does not match the shape of `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(value)
}
