//! Configuration options for ZON encoding and decoding.
//!
//! - [`EncodeOptions`]: key ordering, dot-flattening, trailing newline
//! - [`DecodeOptions`]: strict-mode toggle and security limits
//!
//! Options are passed explicitly per call; there is no global state.
//!
//! ## Examples
//!
//! ```rust
//! use serde_zon::{DecodeOptions, EncodeOptions};
//!
//! let enc = EncodeOptions::new().with_trailing_newline(true);
//! assert!(enc.ensure_trailing_newline);
//!
//! let dec = DecodeOptions::new().with_strict(false).with_max_depth(16);
//! assert!(!dec.strict);
//! assert_eq!(dec.max_depth, 16);
//! ```

/// Configuration options for encoding.
///
/// # Examples
///
/// ```rust
/// use serde_zon::EncodeOptions;
///
/// let options = EncodeOptions::new();
/// assert!(options.sort_keys);
/// assert!(options.dot_flatten);
/// assert!(!options.ensure_trailing_newline);
/// ```
#[derive(Clone, Debug)]
pub struct EncodeOptions {
    /// Emit object keys in ascending Unicode code-point order.
    pub sort_keys: bool,
    /// Allow dot-flattened emission of shallow all-scalar child objects.
    pub dot_flatten: bool,
    /// Terminate the document with a newline.
    pub ensure_trailing_newline: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            sort_keys: true,
            dot_flatten: true,
            ensure_trailing_newline: false,
        }
    }
}

impl EncodeOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether object keys are sorted on output.
    ///
    /// Disabling this preserves insertion order and gives up the canonical
    /// byte-identical guarantee.
    #[must_use]
    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    /// Sets whether shallow child objects may be emitted as dotted keys.
    #[must_use]
    pub fn with_dot_flatten(mut self, dot_flatten: bool) -> Self {
        self.dot_flatten = dot_flatten;
        self
    }

    /// Sets whether the output ends with a newline.
    #[must_use]
    pub fn with_trailing_newline(mut self, ensure: bool) -> Self {
        self.ensure_trailing_newline = ensure;
        self
    }
}

/// Configuration options for decoding, including the security limits.
///
/// Limits are counted as they are encountered; the decoder aborts on the
/// first violation.
///
/// # Examples
///
/// ```rust
/// use serde_zon::DecodeOptions;
///
/// let options = DecodeOptions::default();
/// assert!(options.strict);
/// assert_eq!(options.max_document_bytes, 100 * 1024 * 1024);
/// assert_eq!(options.max_line_bytes, 1024 * 1024);
/// assert_eq!(options.max_array_len, 1_000_000);
/// assert_eq!(options.max_object_keys, 100_000);
/// assert_eq!(options.max_depth, 100);
/// ```
#[derive(Clone, Debug)]
pub struct DecodeOptions {
    /// Reject row/field count mismatches instead of repairing them.
    pub strict: bool,
    /// Maximum document size in bytes.
    pub max_document_bytes: usize,
    /// Maximum size of a single line in bytes.
    pub max_line_bytes: usize,
    /// Maximum number of elements in any array.
    pub max_array_len: usize,
    /// Maximum number of keys in any object.
    pub max_object_keys: usize,
    /// Maximum nesting depth.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            strict: true,
            max_document_bytes: 100 * 1024 * 1024,
            max_line_bytes: 1024 * 1024,
            max_array_len: 1_000_000,
            max_object_keys: 100_000,
            max_depth: 100,
        }
    }
}

impl DecodeOptions {
    /// Creates the default (strict) options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates non-strict options: count mismatches are repaired by padding
    /// short rows with null and truncating long ones (sparse `k:v` extras are
    /// kept). Security limits stay enforced.
    #[must_use]
    pub fn lenient() -> Self {
        Self::default().with_strict(false)
    }

    /// Sets strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the maximum document size in bytes.
    #[must_use]
    pub fn with_max_document_bytes(mut self, bytes: usize) -> Self {
        self.max_document_bytes = bytes;
        self
    }

    /// Sets the maximum line size in bytes.
    #[must_use]
    pub fn with_max_line_bytes(mut self, bytes: usize) -> Self {
        self.max_line_bytes = bytes;
        self
    }

    /// Sets the maximum array length.
    #[must_use]
    pub fn with_max_array_len(mut self, len: usize) -> Self {
        self.max_array_len = len;
        self
    }

    /// Sets the maximum number of keys per object.
    #[must_use]
    pub fn with_max_object_keys(mut self, keys: usize) -> Self {
        self.max_object_keys = keys;
        self
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}
