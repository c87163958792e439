//! ZON encoding.
//!
//! Two pieces live here:
//!
//! - [`ValueSerializer`], the serde bridge that canonicalizes any `Serialize`
//!   host value into a [`Value`] tree (numbers normalized, bytes to base64,
//!   non-finite floats to null)
//! - [`Encoder`], which plans a layout for each node and emits canonical
//!   text: flat `key:value` lines, `@(N)` tables for uniform object arrays,
//!   quoted inline payloads for everything nested, and dotted keys where
//!   flattening avoids escaping
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde::Serialize;
//! use serde_zon::to_string;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: i32 }
//!
//! let zon = to_string(&Data { x: 1, y: 2 }).unwrap();
//! assert_eq!(zon, "x:1\ny:2");
//! ```
//!
//! ## Direct Encoder usage
//!
//! ```rust
//! use serde_zon::{Encoder, EncodeOptions, Value};
//!
//! let encoder = Encoder::new(EncodeOptions::default());
//! let text = encoder.encode(&Value::from(3.14)).unwrap();
//! assert_eq!(text, "3.14");
//! ```

use crate::quote::{
    csv_quote, has_control, inline_key_needs_quoting, is_poison_key, key_needs_quoting,
    needs_quoting, quoted,
};
use crate::{EncodeOptions, Error, Number, Result, Value, ZonMap};
use serde::{ser, Serialize};

/// Nesting bound for encoding and canonicalization. An owned value tree
/// cannot be cyclic, so only a pathological `Serialize` impl or a degenerate
/// tree reaches it.
const MAX_NESTING: usize = 1024;

/// The ZON encoder.
///
/// Converts a [`Value`] tree into canonical ZON text. The same input always
/// produces byte-identical output under the same options.
pub struct Encoder {
    options: EncodeOptions,
}

impl Encoder {
    #[must_use]
    pub fn new(options: EncodeOptions) -> Self {
        Encoder { options }
    }

    /// Encodes a value tree to canonical text.
    ///
    /// # Errors
    ///
    /// Fails on forbidden object keys and on nesting past the encode bound.
    pub fn encode(&self, value: &Value) -> Result<String> {
        let mut out = String::with_capacity(256);
        match value {
            Value::Object(map) if map.is_empty() => out.push_str("{}"),
            Value::Object(map) => self.write_root_object(&mut out, map)?,
            Value::Array(items) => match table_rows(items) {
                Some((cols, rows)) => self.write_table(&mut out, None, &cols, &rows)?,
                None => out.push_str(&self.inline_node(value, 0)?),
            },
            scalar => out.push_str(&self.root_scalar_value(scalar)?),
        }
        if self.options.ensure_trailing_newline && !out.is_empty() {
            out.push('\n');
        }
        Ok(out)
    }

    fn write_root_object(&self, out: &mut String, map: &ZonMap) -> Result<()> {
        // Two passes over the root: scalar-ish fields first, tables last, each
        // group in key order. Dotted expansions sort by their full path.
        let mut meta: Vec<(String, String)> = Vec::new();
        let mut tables: Vec<(&str, Vec<&str>, Vec<&ZonMap>)> = Vec::new();

        for (key, value) in map.iter() {
            check_key(key)?;
            if let Value::Array(items) = value {
                if let Some((cols, rows)) = table_rows(items) {
                    tables.push((key.as_str(), cols, rows));
                    continue;
                }
            }
            if let Value::Object(child) = value {
                if self.wants_flattening(key, child) {
                    self.flatten_into(&mut meta, key, child)?;
                    continue;
                }
            }
            let line = format!("{}:{}", key_text(key), self.block_value(value)?);
            meta.push((key.clone(), line));
        }

        if self.options.sort_keys {
            meta.sort_by(|a, b| a.0.cmp(&b.0));
            tables.sort_by(|a, b| a.0.cmp(b.0));
        }

        let mut first = true;
        for (_, line) in &meta {
            if !first {
                out.push('\n');
            }
            first = false;
            out.push_str(line);
        }
        for (key, cols, rows) in tables {
            if !first {
                out.push('\n');
            }
            first = false;
            self.write_table(out, Some(key), &cols, &rows)?;
        }
        Ok(())
    }

    /// Dot-flattening pays off only when the inline payload would need
    /// escaping. Everything else stays inline, which keeps output identical
    /// to the flat-writer dialect.
    fn wants_flattening(&self, key: &str, child: &ZonMap) -> bool {
        self.options.dot_flatten
            && !key_needs_quoting(key)
            && flatten_profile(child, 1) == Some(true)
    }

    fn flatten_into(
        &self,
        meta: &mut Vec<(String, String)>,
        prefix: &str,
        map: &ZonMap,
    ) -> Result<()> {
        for (key, value) in map.iter() {
            check_key(key)?;
            let path = format!("{prefix}.{key}");
            match value {
                Value::Object(inner) => self.flatten_into(meta, &path, inner)?,
                scalar => {
                    let line = format!("{}:{}", path, self.block_value(scalar)?);
                    meta.push((path, line));
                }
            }
        }
        Ok(())
    }

    fn write_table(
        &self,
        out: &mut String,
        key: Option<&str>,
        cols: &[&str],
        rows: &[&ZonMap],
    ) -> Result<()> {
        for col in cols {
            check_key(col)?;
        }
        if let Some(key) = key {
            out.push_str(&key_text(key));
            out.push(':');
        }
        out.push_str("@(");
        out.push_str(&rows.len().to_string());
        out.push_str("):");
        for (i, col) in cols.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&column_text(col));
        }
        for row in rows {
            out.push('\n');
            for (i, col) in cols.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                // The table predicate guarantees every column is present.
                let text = match row.get(col) {
                    Some(cell) => self.cell_value(cell)?,
                    None => "null".to_string(),
                };
                out.push_str(&text);
            }
        }
        Ok(())
    }

    /// A scalar standing alone as the whole document. The first line decides
    /// the root form, so a string with a colon (which a `key:value` reading
    /// would claim) is quoted here even when a value position would leave it
    /// bare.
    fn root_scalar_value(&self, value: &Value) -> Result<String> {
        match value {
            Value::String(s)
                if !s.starts_with('{')
                    && !s.starts_with('[')
                    && !s.starts_with('"')
                    && s.contains(':') =>
            {
                Ok(quoted(s))
            }
            other => self.block_value(other),
        }
    }

    /// The text after the colon of a `key:value` line. Strings that could be
    /// mistaken for an inline payload or a quoted literal get a second quote
    /// layer so decode sees a string.
    fn block_value(&self, value: &Value) -> Result<String> {
        Ok(match value {
            Value::Null => "null".to_string(),
            Value::Bool(true) => "T".to_string(),
            Value::Bool(false) => "F".to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => {
                if s.starts_with('{') || s.starts_with('[') || s.starts_with('"') {
                    quoted(&quoted(s))
                } else if needs_quoting(s) {
                    quoted(s)
                } else {
                    s.clone()
                }
            }
            Value::Array(_) | Value::Object(_) => quoted(&self.inline_node(value, 0)?),
        })
    }

    /// One table cell, RFC-4180 quoted as needed. Control characters force
    /// the backslash layer underneath since a raw newline would break the
    /// row.
    fn cell_value(&self, value: &Value) -> Result<String> {
        Ok(match value {
            Value::Null => "null".to_string(),
            Value::Bool(true) => "T".to_string(),
            Value::Bool(false) => "F".to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => {
                if s.starts_with('{') || s.starts_with('[') || s.starts_with('"') || has_control(s)
                {
                    csv_quote(&quoted(s))
                } else if needs_quoting(s) {
                    csv_quote(s)
                } else {
                    s.clone()
                }
            }
            Value::Array(_) | Value::Object(_) => {
                let payload = self.inline_node(value, 0)?;
                if payload.contains(',') || payload.contains('"') {
                    csv_quote(&payload)
                } else {
                    payload
                }
            }
        })
    }

    /// Recursive single-line payload: `{k:v,…}` / `[v,…]` with scalars quoted
    /// per the shared rules.
    fn inline_node(&self, value: &Value, depth: usize) -> Result<String> {
        if depth > MAX_NESTING {
            return Err(Error::Cycle);
        }
        Ok(match value {
            Value::Null => "null".to_string(),
            Value::Bool(true) => "T".to_string(),
            Value::Bool(false) => "F".to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => {
                if needs_quoting(s) {
                    quoted(s)
                } else {
                    s.clone()
                }
            }
            Value::Array(items) => {
                let mut out = String::from("[");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(&self.inline_node(item, depth + 1)?);
                }
                out.push(']');
                out
            }
            Value::Object(map) => {
                let mut entries: Vec<(&String, &Value)> = map.iter().collect();
                if self.options.sort_keys {
                    entries.sort_by(|a, b| a.0.cmp(b.0));
                }
                let mut out = String::from("{");
                for (i, (key, value)) in entries.iter().enumerate() {
                    check_key(key)?;
                    if i > 0 {
                        out.push(',');
                    }
                    if inline_key_needs_quoting(key) {
                        out.push_str(&quoted(key));
                    } else {
                        out.push_str(key);
                    }
                    out.push(':');
                    out.push_str(&self.inline_node(value, depth + 1)?);
                }
                out.push('}');
                out
            }
        })
    }
}

fn check_key(key: &str) -> Result<()> {
    if is_poison_key(key) {
        Err(Error::poison_key(key, None))
    } else {
        Ok(())
    }
}

fn key_text(key: &str) -> String {
    if key_needs_quoting(key) {
        quoted(key)
    } else {
        key.to_string()
    }
}

/// Column names never scalar-parse, so only structural conflicts force
/// quoting; control characters still need the escape layer.
fn column_text(col: &str) -> String {
    if col.starts_with('"') || has_control(col) {
        csv_quote(&quoted(col))
    } else if col.is_empty()
        || col.contains(',')
        || col.contains('"')
        || col.starts_with(' ')
        || col.ends_with(' ')
    {
        csv_quote(col)
    } else {
        col.to_string()
    }
}

/// The table predicate: non-empty, all objects, identical key sets. Returns
/// the sorted column list and the row maps.
fn table_rows(items: &[Value]) -> Option<(Vec<&str>, Vec<&ZonMap>)> {
    let first = items.first()?.as_object()?;
    if first.is_empty() {
        return None;
    }
    let mut cols: Vec<&str> = first.keys().map(String::as_str).collect();
    cols.sort_unstable();
    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let obj = item.as_object()?;
        if obj.len() != cols.len() {
            return None;
        }
        for key in obj.keys() {
            if cols.binary_search(&key.as_str()).is_err() {
                return None;
            }
        }
        rows.push(obj);
    }
    Some((cols, rows))
}

/// Walks a candidate for dot-flattening: all leaves must be scalars within
/// depth 2 and every key segment bare-safe. Returns whether any leaf string
/// would need quoting inline, or `None` when the shape disqualifies.
fn flatten_profile(map: &ZonMap, depth: usize) -> Option<bool> {
    if depth > 2 || map.is_empty() {
        return None;
    }
    let mut any_quoted = false;
    for (key, value) in map.iter() {
        if key_needs_quoting(key) {
            return None;
        }
        match value {
            Value::Object(inner) => any_quoted |= flatten_profile(inner, depth + 1)?,
            Value::Array(_) => return None,
            Value::String(s) => any_quoted |= needs_quoting(s),
            _ => {}
        }
    }
    Some(any_quoted)
}

/// Serializer that canonicalizes any `Serialize` value into a [`Value`] tree.
///
/// This is the host boundary: integers outside `i64` fail, non-finite floats
/// become null, bytes become base64 text, and recursion past the nesting
/// bound (the only way a cyclic host structure can present itself through
/// serde) fails.
pub struct ValueSerializer {
    depth: usize,
}

impl ValueSerializer {
    #[must_use]
    pub fn new() -> Self {
        ValueSerializer { depth: 0 }
    }

    fn descend(&self) -> Result<usize> {
        if self.depth >= MAX_NESTING {
            Err(Error::Cycle)
        } else {
            Ok(self.depth + 1)
        }
    }
}

impl Default for ValueSerializer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_value_at<T: Serialize + ?Sized>(value: &T, depth: usize) -> Result<Value> {
    value.serialize(ValueSerializer { depth })
}

pub struct SerializeVec {
    vec: Vec<Value>,
    depth: usize,
}

pub struct SerializeTupleVariantValue {
    name: &'static str,
    vec: Vec<Value>,
    depth: usize,
}

pub struct SerializeMapValue {
    map: ZonMap,
    current_key: Option<String>,
    depth: usize,
}

pub struct SerializeStructVariantValue {
    name: &'static str,
    map: ZonMap,
    depth: usize,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariantValue;
    type SerializeMap = SerializeMapValue;
    type SerializeStruct = SerializeMapValue;
    type SerializeStructVariant = SerializeStructVariantValue;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        match i64::try_from(v) {
            Ok(i) => Ok(Value::Number(Number::Integer(i))),
            Err(_) => Err(Error::overflow(v)),
        }
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        match i64::try_from(v) {
            Ok(i) => Ok(Value::Number(Number::Integer(i))),
            Err(_) => Err(Error::overflow(v)),
        }
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        match i64::try_from(v) {
            Ok(i) => Ok(Value::Number(Number::Integer(i))),
            Err(_) => Err(Error::overflow(v)),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(v as f64))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::from_bytes(v))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let depth = self.descend()?;
        let mut map = ZonMap::with_capacity(1);
        map.insert(variant.to_string(), to_value_at(value, depth)?);
        Ok(Value::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
            depth: self.descend()?,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariantValue> {
        Ok(SerializeTupleVariantValue {
            name: variant,
            vec: Vec::with_capacity(len),
            depth: self.descend()?,
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMapValue> {
        Ok(SerializeMapValue {
            map: ZonMap::new(),
            current_key: None,
            depth: self.descend()?,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMapValue> {
        self.serialize_map(None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeStructVariantValue> {
        Ok(SerializeStructVariantValue {
            name: variant,
            map: ZonMap::new(),
            depth: self.descend()?,
        })
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value_at(value, self.depth)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariantValue {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value_at(value, self.depth)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut map = ZonMap::with_capacity(1);
        map.insert(self.name.to_string(), Value::Array(self.vec));
        Ok(Value::Object(map))
    }
}

impl ser::SerializeMap for SerializeMapValue {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value_at(key, self.depth)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::unsupported_type("map keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value_at(value, self.depth)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMapValue {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value_at(value, self.depth)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariantValue {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value_at(value, self.depth)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut map = ZonMap::with_capacity(1);
        map.insert(self.name.to_string(), Value::Object(self.map));
        Ok(Value::Object(map))
    }
}
