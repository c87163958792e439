//! Error types for ZON encoding and decoding.
//!
//! Every error carries a stable wire code (see [`Error::code`]) plus a display
//! message, and decode-side errors carry best-effort line/column context.
//!
//! ## Error Categories
//!
//! - **Encode errors**: unsupported host types, integer overflow, runaway
//!   recursion on cyclic value graphs
//! - **Decode syntax errors**: bad escapes, unterminated strings, malformed
//!   cells and headers, key collisions, forbidden keys
//! - **Strict-mode violations**: row-count (`E001`) and field-count (`E002`)
//!   mismatches
//! - **Resource-limit violations**: document/line size, array length, key
//!   count, nesting depth (`E301`..`E304`, `DecodeDepth`)
//!
//! ## Examples
//!
//! ```rust
//! use serde_zon::{decode_value, DecodeOptions};
//!
//! let err = decode_value("__proto__:T", &DecodeOptions::default()).unwrap_err();
//! assert_eq!(err.code(), "DecodePoisonKey");
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur during ZON encoding/decoding.
///
/// Each variant maps to a fixed wire code via [`Error::code`].
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A host type the canonicalizer cannot represent
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Nesting exceeded the encode bound; the value graph appears cyclic
    #[error("maximum encode nesting exceeded; value graph appears cyclic")]
    Cycle,

    /// An integer that does not fit in a signed 64-bit value
    #[error("integer {0} does not fit in 64 bits")]
    Overflow(String),

    /// A backslash escape outside the permitted set
    #[error("invalid escape sequence '\\{escape}' at line {line}")]
    BadEscape { line: usize, column: usize, escape: char },

    /// A quoted scalar with no closing quote
    #[error("unterminated quoted string at line {line}")]
    UnterminatedString { line: usize, column: usize },

    /// A malformed cell or inline payload
    #[error("malformed cell at line {line}: {msg}")]
    BadCell { line: usize, column: usize, msg: String },

    /// A token with number shape whose value cannot be represented
    #[error("invalid number '{token}' at line {line}")]
    BadNumber { line: usize, token: String },

    /// A malformed or misplaced table header
    #[error("invalid table header at line {line}: {msg}")]
    BadHeader { line: usize, msg: String },

    /// Conflicting assignments along a dotted key path
    #[error("conflicting assignments for key '{path}' at line {line}")]
    KeyCollision { line: usize, path: String },

    /// A key that would enable prototype pollution
    #[error("forbidden object key '{key}'")]
    PoisonKey { key: String, line: Option<usize> },

    /// Strict mode: declared and actual row counts differ
    #[error("table declares {expected} rows but {found} were found (line {line})")]
    RowCount { line: usize, expected: usize, found: usize },

    /// Strict mode: a row's field count differs from the column count
    #[error("row at line {line} has {found} fields, expected {expected}")]
    FieldCount { line: usize, expected: usize, found: usize },

    /// Document exceeds the configured byte limit
    #[error("document of {size} bytes exceeds limit of {limit} bytes")]
    DocumentTooLarge { size: usize, limit: usize },

    /// A single line exceeds the configured byte limit
    #[error("line {line} of {size} bytes exceeds limit of {limit} bytes")]
    LineTooLong { line: usize, size: usize, limit: usize },

    /// An array exceeds the configured length limit
    #[error("array at line {line} exceeds limit of {limit} elements")]
    ArrayTooLong { line: usize, limit: usize },

    /// An object exceeds the configured key-count limit
    #[error("object at line {line} exceeds limit of {limit} keys")]
    TooManyKeys { line: usize, limit: usize },

    /// Nesting exceeds the configured depth limit
    #[error("nesting at line {line} exceeds depth limit of {limit}")]
    TooDeep { line: usize, limit: usize },

    /// Input is not acceptable UTF-8 text
    #[error("invalid UTF-8 input: {0}")]
    BadUtf8(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Generic message (serde integration)
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// The stable wire code for this error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_zon::Error;
    ///
    /// assert_eq!(Error::Cycle.code(), "EncodeCycle");
    /// ```
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Error::UnsupportedType(_) => "EncodeUnsupportedType",
            Error::Cycle => "EncodeCycle",
            Error::Overflow(_) => "EncodeOverflow",
            Error::BadEscape { .. } => "DecodeBadEscape",
            Error::UnterminatedString { .. } => "DecodeUnterminatedString",
            Error::BadCell { .. } => "DecodeBadCell",
            Error::BadNumber { .. } => "DecodeBadNumber",
            Error::BadHeader { .. } => "DecodeBadHeader",
            Error::KeyCollision { .. } => "DecodeKeyCollision",
            Error::PoisonKey { .. } => "DecodePoisonKey",
            Error::RowCount { .. } => "E001",
            Error::FieldCount { .. } => "E002",
            Error::DocumentTooLarge { .. } => "E301",
            Error::LineTooLong { .. } => "E302",
            Error::ArrayTooLong { .. } => "E303",
            Error::TooManyKeys { .. } => "E304",
            Error::TooDeep { .. } => "DecodeDepth",
            Error::BadUtf8(_) => "DecodeBadUTF8",
            Error::Io(_) => "Io",
            Error::Message(_) => "Message",
        }
    }

    /// The 1-based input line the error was detected on, when known.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::BadEscape { line, .. }
            | Error::UnterminatedString { line, .. }
            | Error::BadCell { line, .. }
            | Error::BadNumber { line, .. }
            | Error::BadHeader { line, .. }
            | Error::KeyCollision { line, .. }
            | Error::RowCount { line, .. }
            | Error::FieldCount { line, .. }
            | Error::LineTooLong { line, .. }
            | Error::ArrayTooLong { line, .. }
            | Error::TooManyKeys { line, .. }
            | Error::TooDeep { line, .. } => Some(*line),
            Error::PoisonKey { line, .. } => *line,
            _ => None,
        }
    }

    /// The 1-based column, when the tokenizer could pin one down.
    #[must_use]
    pub fn column(&self) -> Option<usize> {
        match self {
            Error::BadEscape { column, .. }
            | Error::UnterminatedString { column, .. }
            | Error::BadCell { column, .. } => Some(*column),
            _ => None,
        }
    }

    pub(crate) fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    pub(crate) fn overflow(value: impl fmt::Display) -> Self {
        Error::Overflow(value.to_string())
    }

    pub(crate) fn bad_escape(line: usize, column: usize, escape: char) -> Self {
        Error::BadEscape { line, column, escape }
    }

    pub(crate) fn unterminated(line: usize, column: usize) -> Self {
        Error::UnterminatedString { line, column }
    }

    pub(crate) fn bad_cell(line: usize, column: usize, msg: &str) -> Self {
        Error::BadCell { line, column, msg: msg.to_string() }
    }

    pub(crate) fn bad_number(line: usize, token: &str) -> Self {
        Error::BadNumber { line, token: token.to_string() }
    }

    pub(crate) fn bad_header(line: usize, msg: &str) -> Self {
        Error::BadHeader { line, msg: msg.to_string() }
    }

    pub(crate) fn key_collision(line: usize, path: &str) -> Self {
        Error::KeyCollision { line, path: path.to_string() }
    }

    pub(crate) fn poison_key(key: &str, line: Option<usize>) -> Self {
        Error::PoisonKey { key: key.to_string(), line }
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
