//! ZON decoding.
//!
//! The decoder consumes logical lines (CRLF normalized, one physical line
//! each), reconstructing the value tree:
//!
//! - `key:value` lines populate the root object, with dotted bare keys
//!   building nested objects
//! - `key:@(N):cols` (or root `@(N):cols`, or the legacy `@key(N):cols`)
//!   headers introduce tables whose next N lines are RFC-4180 rows
//! - quoted payloads beginning with `{` or `[` re-enter the single-line
//!   inline grammar
//!
//! Strict mode (the default) rejects row/field count mismatches; non-strict
//! mode repairs them. Security limits are enforced in both modes.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_zon::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, y: i32 }
//!
//! let data: Data = from_str("x:1\ny:2").unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//! ```

use crate::quote::{is_poison_key, number_shape};
use crate::{DecodeOptions, Error, Number, Result, Value, ZonMap};
use serde::de::{self, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;

/// Decodes ZON text into a value tree.
///
/// # Errors
///
/// Returns the first syntax, validation, or limit error encountered; see the
/// error codes on [`Error`](crate::Error).
pub fn decode_value(input: &str, options: &DecodeOptions) -> Result<Value> {
    Decoder::new(input, options)?.decode()
}

#[derive(Clone, Copy)]
struct Line<'a> {
    number: usize,
    text: &'a str,
}

/// One field of a table row after CSV splitting.
#[derive(Debug)]
struct Cell {
    content: String,
    quoted: bool,
}

/// A block-line key. Quoted keys are literal; bare keys may dot-split.
struct KeyToken {
    name: String,
    quoted: bool,
}

struct Header {
    key: KeyToken,
    count: usize,
    cols: Vec<String>,
    line: usize,
}

/// The ZON decoder. Borrows the input text for the duration of one call.
pub struct Decoder<'a> {
    options: DecodeOptions,
    lines: Vec<Line<'a>>,
    index: usize,
}

impl<'a> Decoder<'a> {
    /// Prepares a decoder, enforcing the document and line size limits and
    /// rejecting a leading BOM.
    pub fn new(input: &'a str, options: &DecodeOptions) -> Result<Self> {
        if input.len() > options.max_document_bytes {
            return Err(Error::DocumentTooLarge {
                size: input.len(),
                limit: options.max_document_bytes,
            });
        }
        if input.starts_with('\u{feff}') {
            return Err(Error::BadUtf8(
                "byte order mark at start of document".to_string(),
            ));
        }
        let mut lines = Vec::new();
        for (idx, raw) in input.split('\n').enumerate() {
            if raw.len() > options.max_line_bytes {
                return Err(Error::LineTooLong {
                    line: idx + 1,
                    size: raw.len(),
                    limit: options.max_line_bytes,
                });
            }
            let text = raw.strip_suffix('\r').unwrap_or(raw).trim();
            lines.push(Line { number: idx + 1, text });
        }
        Ok(Decoder {
            options: options.clone(),
            lines,
            index: 0,
        })
    }

    /// Runs the decode. The root form follows from the first non-empty line.
    pub fn decode(mut self) -> Result<Value> {
        let first = match self.next_nonblank() {
            Some(line) => line,
            None => return Ok(Value::Null),
        };
        let t = first.text;

        if t.starts_with("@(") {
            let header = self.parse_anon_header(first)?;
            let rows = self.read_rows(&header)?;
            while let Some(line) = self.next_nonblank() {
                if self.options.strict {
                    return Err(if line.text.contains(':') {
                        Error::bad_header(line.number, "unexpected content after root table")
                    } else {
                        Error::RowCount {
                            line: header.line,
                            expected: header.count,
                            found: header.count + 1,
                        }
                    });
                }
            }
            return Ok(Value::Array(rows));
        }

        if t.starts_with('{') || t.starts_with('[') {
            let value = self.parse_inline(t, 1, first.number)?;
            if let Some(line) = self.next_nonblank() {
                return Err(Error::bad_header(
                    line.number,
                    "unexpected content after inline document",
                ));
            }
            return Ok(value);
        }

        if t.starts_with('@') || self.split_key_value(first)?.is_some() {
            return self.decode_object_root(first);
        }

        // A single remaining line with no structure is a scalar document.
        if let Some(line) = self.next_nonblank() {
            return Err(Error::bad_header(
                line.number,
                "expected key:value line or table header",
            ));
        }
        self.meta_value(t, first.number)
    }

    fn next_nonblank(&mut self) -> Option<Line<'a>> {
        while self.index < self.lines.len() {
            let line = self.lines[self.index];
            self.index += 1;
            if !line.text.is_empty() {
                return Some(line);
            }
        }
        None
    }

    fn decode_object_root(&mut self, first: Line<'a>) -> Result<Value> {
        let mut root = ZonMap::new();
        // Remembered so a surplus data row after a table reports E001 rather
        // than a generic syntax error.
        let mut last_table: Option<(usize, usize)> = None;
        let mut pending = Some(first);

        while let Some(line) = pending.take().or_else(|| self.next_nonblank()) {
            if let Some(header) = self.try_table_header(line)? {
                let rows = self.read_rows(&header)?;
                last_table = Some((header.line, header.count));
                self.assign(&mut root, header.key, Value::Array(rows), header.line)?;
                continue;
            }
            match self.split_key_value(line)? {
                Some((key, value_str)) => {
                    let value = self.meta_value(value_str, line.number)?;
                    self.assign(&mut root, key, value, line.number)?;
                    last_table = None;
                }
                None => {
                    if self.options.strict {
                        return Err(match last_table {
                            Some((header_line, expected)) => Error::RowCount {
                                line: header_line,
                                expected,
                                found: expected + 1,
                            },
                            None => Error::bad_header(
                                line.number,
                                "expected key:value line or table header",
                            ),
                        });
                    }
                }
            }
        }
        Ok(Value::Object(root))
    }

    /// Splits a line at its key colon. Quoted keys are parsed through the
    /// escape rules; bare keys end at the first `:`. Returns `None` when the
    /// line has no key shape at all.
    fn split_key_value(&self, line: Line<'a>) -> Result<Option<(KeyToken, &'a str)>> {
        let t = line.text;
        if t.starts_with('"') {
            let (content, consumed) = parse_quoted(t, line.number)?;
            match t[consumed..].strip_prefix(':') {
                Some(value) => Ok(Some((KeyToken { name: content, quoted: true }, value))),
                None => Ok(None),
            }
        } else {
            match t.find(':') {
                Some(i) => Ok(Some((
                    KeyToken {
                        name: t[..i].trim().to_string(),
                        quoted: false,
                    },
                    &t[i + 1..],
                ))),
                None => Ok(None),
            }
        }
    }

    fn parse_anon_header(&self, line: Line) -> Result<Header> {
        let (count, cols_str) = parse_count_and_cols(&line.text[1..], line.number)?;
        self.build_header(
            KeyToken { name: String::new(), quoted: false },
            count,
            cols_str,
            line.number,
        )
    }

    /// Recognizes `key:@(N):cols` and the legacy `@key(N):cols` header
    /// forms. A line starting with `@` must be a header; anything else that
    /// fails the shape is not one.
    fn try_table_header(&self, line: Line<'a>) -> Result<Option<Header>> {
        let t = line.text;
        if let Some(rest) = t.strip_prefix('@') {
            if rest.starts_with('(') {
                return Err(Error::bad_header(
                    line.number,
                    "anonymous table header is only valid as the first line",
                ));
            }
            let open = rest.find('(').ok_or_else(|| {
                Error::bad_header(line.number, "expected '(' after table name")
            })?;
            let name = &rest[..open];
            let (count, cols_str) = parse_count_and_cols(&rest[open..], line.number)?;
            let header = self.build_header(
                KeyToken { name: name.to_string(), quoted: false },
                count,
                cols_str,
                line.number,
            )?;
            return Ok(Some(header));
        }
        let (key, value) = match self.split_key_value(line)? {
            Some(kv) => kv,
            None => return Ok(None),
        };
        let v = value.trim_start();
        if let Some(tail) = v.strip_prefix('@') {
            if tail.starts_with('(') {
                let (count, cols_str) = parse_count_and_cols(tail, line.number)?;
                let header = self.build_header(key, count, cols_str, line.number)?;
                return Ok(Some(header));
            }
        }
        Ok(None)
    }

    fn build_header(
        &self,
        key: KeyToken,
        count: usize,
        cols_str: &str,
        line: usize,
    ) -> Result<Header> {
        if count > self.options.max_array_len {
            return Err(Error::ArrayTooLong { line, limit: self.options.max_array_len });
        }
        let cells = split_fields(cols_str, line)?;
        if cells.len() == 1 && !cells[0].quoted && cells[0].content.is_empty() {
            return Err(Error::bad_header(line, "missing column names"));
        }
        if cells.len() > self.options.max_object_keys {
            return Err(Error::TooManyKeys { line, limit: self.options.max_object_keys });
        }
        let mut cols: Vec<String> = Vec::with_capacity(cells.len());
        for cell in cells {
            let name = if cell.quoted {
                if cell.content.starts_with('"') {
                    full_quoted(&cell.content, line)?
                } else {
                    cell.content
                }
            } else {
                cell.content
            };
            if name.is_empty() {
                return Err(Error::bad_header(line, "empty column name"));
            }
            if is_poison_key(&name) {
                return Err(Error::poison_key(&name, Some(line)));
            }
            if cols.contains(&name) {
                return Err(Error::bad_header(line, "duplicate column name"));
            }
            cols.push(name);
        }
        Ok(Header { key, count, cols, line })
    }

    /// Consumes the table's declared rows. Short tables are `E001` in strict
    /// mode and accepted as-is otherwise.
    fn read_rows(&mut self, header: &Header) -> Result<Vec<Value>> {
        let mut rows = Vec::with_capacity(header.count.min(1024));
        while rows.len() < header.count {
            let line = match self.next_nonblank() {
                Some(line) => line,
                None => break,
            };
            let cells = split_fields(line.text, line.number)?;
            let row = self.row_object(cells, header, line.number)?;
            rows.push(Value::Object(row));
        }
        if rows.len() < header.count && self.options.strict {
            return Err(Error::RowCount {
                line: header.line,
                expected: header.count,
                found: rows.len(),
            });
        }
        Ok(rows)
    }

    fn row_object(&self, cells: Vec<Cell>, header: &Header, line: usize) -> Result<ZonMap> {
        if self.options.strict && cells.len() != header.cols.len() {
            return Err(Error::FieldCount {
                line,
                expected: header.cols.len(),
                found: cells.len(),
            });
        }
        let mut row = ZonMap::with_capacity(header.cols.len());
        for (i, col) in header.cols.iter().enumerate() {
            let value = match cells.get(i) {
                Some(cell) => self.cell_to_value(cell, line)?,
                None => Value::Null,
            };
            row.insert(col.clone(), value);
        }
        // Non-strict surplus fields: keep `k:v`-shaped extras as sparse
        // assignments, drop the rest.
        for extra in cells.iter().skip(header.cols.len()) {
            if extra.quoted {
                continue;
            }
            if let Some(i) = extra.content.find(':') {
                let key = extra.content[..i].trim();
                if key.is_empty() {
                    continue;
                }
                if is_poison_key(key) {
                    return Err(Error::poison_key(key, Some(line)));
                }
                let value = self.meta_value(&extra.content[i + 1..], line)?;
                row.insert(key.to_string(), value);
            }
        }
        Ok(row)
    }

    fn cell_to_value(&self, cell: &Cell, line: usize) -> Result<Value> {
        if cell.quoted {
            let c = cell.content.as_str();
            if c.starts_with('{') || c.starts_with('[') {
                self.parse_inline(c, 2, line)
            } else if c.starts_with('"') {
                Ok(Value::String(full_quoted(c, line)?))
            } else {
                Ok(Value::String(cell.content.clone()))
            }
        } else {
            let t = cell.content.as_str();
            if t.is_empty() {
                Ok(Value::Null)
            } else if t.starts_with('{') || t.starts_with('[') {
                self.parse_inline(t, 2, line)
            } else {
                self.classify_bare(t, line)
            }
        }
    }

    /// The value side of a `key:value` line: quoted literal, inline payload,
    /// bare scalar, or empty string.
    fn meta_value(&self, raw: &str, line: usize) -> Result<Value> {
        let v = raw.trim();
        if v.is_empty() {
            return Ok(Value::String(String::new()));
        }
        if v.starts_with('"') {
            let (content, consumed) = parse_quoted(v, line)?;
            if !v[consumed..].trim().is_empty() {
                return Err(Error::bad_cell(
                    line,
                    consumed + 1,
                    "unexpected characters after closing quote",
                ));
            }
            if content.starts_with('{') || content.starts_with('[') {
                return self.parse_inline(&content, 1, line);
            }
            if content.starts_with('"') {
                return Ok(Value::String(full_quoted(&content, line)?));
            }
            return Ok(Value::String(content));
        }
        if v.starts_with('{') || v.starts_with('[') {
            return self.parse_inline(v, 1, line);
        }
        self.classify_bare(v, line)
    }

    /// Bare-token classification: `T`/`F`, null spellings, the number
    /// grammar, then string. Leading-zero digit runs and ISO-looking tokens
    /// stay strings.
    fn classify_bare(&self, t: &str, line: usize) -> Result<Value> {
        match t {
            "T" => return Ok(Value::Bool(true)),
            "F" => return Ok(Value::Bool(false)),
            _ => {}
        }
        if t.eq_ignore_ascii_case("null")
            || t.eq_ignore_ascii_case("none")
            || t.eq_ignore_ascii_case("nil")
        {
            return Ok(Value::Null);
        }
        if let Some(shape) = number_shape(t) {
            if !shape.has_fraction && !shape.has_exponent {
                if let Ok(i) = t.parse::<i64>() {
                    return Ok(Value::Number(Number::Integer(i)));
                }
            }
            let f: f64 = t.parse().map_err(|_| Error::bad_number(line, t))?;
            if !f.is_finite() {
                return Err(Error::bad_number(line, t));
            }
            return Ok(Value::from(f));
        }
        Ok(Value::String(t.to_string()))
    }

    /// Recursive single-line grammar: `{k:v,…}`, `[v,…]`, quoted or bare
    /// scalars. Depth counts compound levels against the limit.
    fn parse_inline(&self, s: &str, depth: usize, line: usize) -> Result<Value> {
        let t = s.trim();
        if let Some(inner) = t.strip_prefix('{') {
            if depth > self.options.max_depth {
                return Err(Error::TooDeep { line, limit: self.options.max_depth });
            }
            let inner = inner
                .strip_suffix('}')
                .ok_or_else(|| Error::bad_cell(line, 1, "unbalanced braces"))?;
            if inner.trim().is_empty() {
                return Ok(Value::Object(ZonMap::new()));
            }
            let mut map = ZonMap::new();
            for pair in split_top_level(inner, line)? {
                let colon = find_top_colon(pair).ok_or_else(|| {
                    Error::bad_cell(line, 1, "missing ':' in object entry")
                })?;
                let key_str = pair[..colon].trim();
                let key = if key_str.starts_with('"') {
                    full_quoted(key_str, line)?
                } else {
                    key_str.to_string()
                };
                if is_poison_key(&key) {
                    return Err(Error::poison_key(&key, Some(line)));
                }
                if !map.contains_key(&key) && map.len() >= self.options.max_object_keys {
                    return Err(Error::TooManyKeys { line, limit: self.options.max_object_keys });
                }
                map.insert(key, self.parse_inline(&pair[colon + 1..], depth + 1, line)?);
            }
            return Ok(Value::Object(map));
        }
        if let Some(inner) = t.strip_prefix('[') {
            if depth > self.options.max_depth {
                return Err(Error::TooDeep { line, limit: self.options.max_depth });
            }
            let inner = inner
                .strip_suffix(']')
                .ok_or_else(|| Error::bad_cell(line, 1, "unbalanced brackets"))?;
            if inner.trim().is_empty() {
                return Ok(Value::Array(Vec::new()));
            }
            let parts = split_top_level(inner, line)?;
            if parts.len() > self.options.max_array_len {
                return Err(Error::ArrayTooLong { line, limit: self.options.max_array_len });
            }
            let mut items = Vec::with_capacity(parts.len());
            for part in parts {
                items.push(self.parse_inline(part, depth + 1, line)?);
            }
            return Ok(Value::Array(items));
        }
        if t.starts_with('"') {
            return Ok(Value::String(full_quoted(t, line)?));
        }
        if t.is_empty() {
            return Ok(Value::Null);
        }
        self.classify_bare(t, line)
    }

    /// Places a decoded value into the root object, expanding dotted bare
    /// keys into nested objects.
    fn assign(&self, root: &mut ZonMap, key: KeyToken, value: Value, line: usize) -> Result<()> {
        let dotted = !key.quoted
            && key.name.contains('.')
            && key.name.split('.').all(|seg| !seg.is_empty());
        if !dotted {
            if is_poison_key(&key.name) {
                return Err(Error::poison_key(&key.name, Some(line)));
            }
            return self.insert_leaf(root, key.name, value, line);
        }

        let segments: Vec<&str> = key.name.split('.').collect();
        if segments.len() > self.options.max_depth {
            return Err(Error::TooDeep { line, limit: self.options.max_depth });
        }
        for seg in &segments {
            if is_poison_key(seg) {
                return Err(Error::poison_key(seg, Some(line)));
            }
        }
        let mut current = root;
        for (idx, seg) in segments[..segments.len() - 1].iter().enumerate() {
            if !current.contains_key(seg) {
                self.check_capacity(current, line)?;
                current.insert(seg.to_string(), Value::Object(ZonMap::new()));
            }
            current = match current.get_mut(seg) {
                Some(Value::Object(map)) => map,
                _ => {
                    return Err(Error::key_collision(line, &segments[..=idx].join(".")));
                }
            };
        }
        self.insert_leaf(current, segments[segments.len() - 1].to_string(), value, line)
    }

    /// Leaf placement: duplicates overwrite, but an existing object subtree
    /// is protected (it may hold dotted siblings).
    fn insert_leaf(&self, map: &mut ZonMap, key: String, value: Value, line: usize) -> Result<()> {
        match map.get(&key) {
            Some(Value::Object(_)) => Err(Error::key_collision(line, &key)),
            Some(_) => {
                map.insert(key, value);
                Ok(())
            }
            None => {
                self.check_capacity(map, line)?;
                map.insert(key, value);
                Ok(())
            }
        }
    }

    fn check_capacity(&self, map: &ZonMap, line: usize) -> Result<()> {
        if map.len() >= self.options.max_object_keys {
            Err(Error::TooManyKeys { line, limit: self.options.max_object_keys })
        } else {
            Ok(())
        }
    }
}

/// Parses `(N):cols` after a table marker, returning the declared row count
/// and the raw column list.
fn parse_count_and_cols(tail: &str, line: usize) -> Result<(usize, &str)> {
    let inner = tail
        .strip_prefix('(')
        .ok_or_else(|| Error::bad_header(line, "expected '(' in table header"))?;
    let close = inner
        .find(')')
        .ok_or_else(|| Error::bad_header(line, "missing ')' in table header"))?;
    let digits = &inner[..close];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::bad_header(line, "invalid row count"));
    }
    let count: usize = digits
        .parse()
        .map_err(|_| Error::bad_header(line, "row count out of range"))?;
    let cols = inner[close + 1..]
        .strip_prefix(':')
        .ok_or_else(|| Error::bad_header(line, "expected ':' after row count"))?;
    Ok((count, cols))
}

/// Unescapes a quoted scalar starting at the beginning of `s`. Returns the
/// content and the number of bytes consumed including both quotes.
fn parse_quoted(s: &str, line: usize) -> Result<(String, usize)> {
    let mut out = String::new();
    let mut iter = s.char_indices();
    iter.next(); // opening quote
    while let Some((i, ch)) = iter.next() {
        match ch {
            '"' => return Ok((out, i + 1)),
            '\\' => match iter.next() {
                Some((_, '\\')) => out.push('\\'),
                Some((_, '"')) => out.push('"'),
                Some((_, 'n')) => out.push('\n'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, 't')) => out.push('\t'),
                Some((j, other)) => return Err(Error::bad_escape(line, j + 1, other)),
                None => return Err(Error::unterminated(line, i + 1)),
            },
            _ => out.push(ch),
        }
    }
    Err(Error::unterminated(line, s.len()))
}

/// Like [`parse_quoted`], but the literal must span the whole input.
fn full_quoted(s: &str, line: usize) -> Result<String> {
    if !s.starts_with('"') {
        return Err(Error::bad_cell(line, 1, "expected quoted string"));
    }
    let (content, consumed) = parse_quoted(s, line)?;
    if consumed != s.len() {
        return Err(Error::bad_cell(
            line,
            consumed + 1,
            "unexpected characters after closing quote",
        ));
    }
    Ok(content)
}

/// RFC-4180 field splitting. After a closing quote only `,` or end of line
/// may follow. Bare fields are trimmed; quoted fields are verbatim with `""`
/// collapsed.
fn split_fields(text: &str, line: usize) -> Result<Vec<Cell>> {
    let mut fields = Vec::new();
    let mut iter = text.char_indices().peekable();
    loop {
        while matches!(iter.peek(), Some((_, ' '))) {
            iter.next();
        }
        if matches!(iter.peek(), Some((_, '"'))) {
            iter.next();
            let mut content = String::new();
            let mut closed = false;
            while let Some((_, ch)) = iter.next() {
                if ch == '"' {
                    if matches!(iter.peek(), Some((_, '"'))) {
                        iter.next();
                        content.push('"');
                    } else {
                        closed = true;
                        break;
                    }
                } else {
                    content.push(ch);
                }
            }
            if !closed {
                return Err(Error::unterminated(line, text.len()));
            }
            fields.push(Cell { content, quoted: true });
            while matches!(iter.peek(), Some((_, ' '))) {
                iter.next();
            }
            match iter.next() {
                None => return Ok(fields),
                Some((_, ',')) => {}
                Some((i, _)) => {
                    return Err(Error::bad_cell(line, i + 1, "expected ',' after closing quote"));
                }
            }
        } else {
            let mut content = String::new();
            let mut saw_comma = false;
            while let Some(&(_, ch)) = iter.peek() {
                iter.next();
                if ch == ',' {
                    saw_comma = true;
                    break;
                }
                content.push(ch);
            }
            fields.push(Cell {
                content: content.trim().to_string(),
                quoted: false,
            });
            if !saw_comma {
                return Ok(fields);
            }
        }
        if iter.peek().is_none() {
            fields.push(Cell { content: String::new(), quoted: false });
            return Ok(fields);
        }
    }
}

/// Splits on top-level commas, honoring quotes (with backslash escapes) and
/// brace/bracket nesting.
fn split_top_level<'s>(s: &'s str, line: usize) -> Result<Vec<&'s str>> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut in_quote = false;
    let mut iter = s.char_indices();
    while let Some((i, ch)) = iter.next() {
        if in_quote {
            match ch {
                '\\' => {
                    iter.next();
                }
                '"' => in_quote = false,
                _ => {}
            }
        } else {
            match ch {
                '"' => in_quote = true,
                '{' | '[' => depth += 1,
                '}' | ']' => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| Error::bad_cell(line, i + 1, "unbalanced brackets"))?;
                }
                ',' if depth == 0 => {
                    parts.push(&s[start..i]);
                    start = i + 1;
                }
                _ => {}
            }
        }
    }
    if in_quote {
        return Err(Error::unterminated(line, s.len()));
    }
    if depth != 0 {
        return Err(Error::bad_cell(line, s.len(), "unbalanced brackets"));
    }
    parts.push(&s[start..]);
    Ok(parts)
}

/// First top-level colon outside quotes and nesting, if any.
fn find_top_colon(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_quote = false;
    let mut iter = s.char_indices();
    while let Some((i, ch)) = iter.next() {
        if in_quote {
            match ch {
                '\\' => {
                    iter.next();
                }
                '"' => in_quote = false,
                _ => {}
            }
        } else {
            match ch {
                '"' => in_quote = true,
                '{' | '[' => depth += 1,
                '}' | ']' => depth = depth.saturating_sub(1),
                ':' if depth == 0 => return Some(i),
                _ => {}
            }
        }
    }
    None
}

// Serde bridge: a decoded `Value` acts as a deserializer, so `from_str`
// composes the decoder with any `Deserialize` type.

impl<'de> de::Deserializer<'de> for Value {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(items) => {
                visitor.visit_seq(de::value::SeqDeserializer::new(items.into_iter()))
            }
            Value::Object(map) => {
                visitor.visit_map(de::value::MapDeserializer::new(map.into_iter()))
            }
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Object(map) => visitor.visit_enum(de::value::MapAccessDeserializer::new(
                de::value::MapDeserializer::new(map.into_iter()),
            )),
            other => Err(Error::custom(format!(
                "expected string or object for enum, found {:?}",
                other
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self::Deserializer {
        self
    }
}
