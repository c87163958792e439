//! Quoting rules and lexical shape detection.
//!
//! A scalar string emits bare whenever the grammar allows it; this module
//! decides when it does not, and produces the two quoting mechanisms ZON
//! uses:
//!
//! - backslash-escaped quoting for `key:value` positions and inline payloads
//!   (escapes limited to `\\ \" \n \r \t`)
//! - RFC 4180 quoting for table cells (`"` doubled, no backslash processing)

/// Keys that would enable prototype pollution in permissive hosts.
pub(crate) const POISON_KEYS: [&str; 3] = ["__proto__", "constructor", "prototype"];

pub(crate) fn is_poison_key(key: &str) -> bool {
    POISON_KEYS.contains(&key)
}

/// Literals a bare token must not collide with: `T`/`F` exactly, and the
/// boolean/null spellings in any case.
pub(crate) fn is_reserved_literal(s: &str) -> bool {
    s == "T"
        || s == "F"
        || s.eq_ignore_ascii_case("true")
        || s.eq_ignore_ascii_case("false")
        || s.eq_ignore_ascii_case("null")
        || s.eq_ignore_ascii_case("none")
        || s.eq_ignore_ascii_case("nil")
}

/// Broad numeric shape: `-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
///
/// Wider than the decode grammar on purpose: leading-zero runs like `007`
/// decode as strings, but a bare `007` still reads as numeric, so the quoter
/// protects it too.
pub(crate) fn is_numeric_like(s: &str) -> bool {
    let b = s.as_bytes();
    let mut i = 0;
    if b.first() == Some(&b'-') {
        i = 1;
    }
    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    if i == int_start {
        return false;
    }
    if i < b.len() && b[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        if i == frac_start {
            return false;
        }
    }
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        i += 1;
        if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == b.len()
}

/// The shape of a token that matched the decode number grammar.
pub(crate) struct NumberShape {
    pub has_fraction: bool,
    pub has_exponent: bool,
}

/// Strict decode grammar: `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
///
/// Leading-zero integer parts (`007`) do not match; they classify as strings.
pub(crate) fn number_shape(s: &str) -> Option<NumberShape> {
    let b = s.as_bytes();
    let mut i = 0;
    if b.first() == Some(&b'-') {
        i = 1;
    }
    if i >= b.len() || !b[i].is_ascii_digit() {
        return None;
    }
    if b[i] == b'0' {
        i += 1;
        if i < b.len() && b[i].is_ascii_digit() {
            return None;
        }
    } else {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
    }
    let mut shape = NumberShape { has_fraction: false, has_exponent: false };
    if i < b.len() && b[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        if i == frac_start {
            return None;
        }
        shape.has_fraction = true;
    }
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        i += 1;
        if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return None;
        }
        shape.has_exponent = true;
    }
    if i == b.len() {
        Some(shape)
    } else {
        None
    }
}

fn all_digits(b: &[u8]) -> bool {
    b.iter().all(u8::is_ascii_digit)
}

fn is_iso_date(b: &[u8]) -> bool {
    b.len() == 10
        && all_digits(&b[0..4])
        && b[4] == b'-'
        && all_digits(&b[5..7])
        && b[7] == b'-'
        && all_digits(&b[8..10])
}

fn is_iso_time(b: &[u8]) -> bool {
    b.len() == 8
        && all_digits(&b[0..2])
        && b[2] == b':'
        && all_digits(&b[3..5])
        && b[5] == b':'
        && all_digits(&b[6..8])
}

/// Syntactic ISO 8601 detection: `YYYY-MM-DD`, `HH:MM:SS`, or the two joined
/// by `T` with an optional `Z` or `+HH:MM`/`-HH:MM` suffix. Not validated as
/// a calendar date.
pub(crate) fn is_iso_like(s: &str) -> bool {
    let b = s.as_bytes();
    if is_iso_date(b) || is_iso_time(b) {
        return true;
    }
    if b.len() >= 19 && is_iso_date(&b[0..10]) && b[10] == b'T' && is_iso_time(&b[11..19]) {
        let rest = &b[19..];
        return rest.is_empty()
            || rest == b"Z"
            || (rest.len() == 6
                && (rest[0] == b'+' || rest[0] == b'-')
                && all_digits(&rest[1..3])
                && rest[3] == b':'
                && all_digits(&rest[4..6]));
    }
    false
}

pub(crate) fn has_control(s: &str) -> bool {
    s.chars().any(|ch| (ch as u32) < 0x20)
}

/// Whether a scalar string must be quoted to survive a scalar position.
///
/// A colon alone does not force quoting when the whole token is
/// ISO-8601-looking; times stay bare that way.
pub(crate) fn needs_quoting(s: &str) -> bool {
    let mut chars = s.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return true,
    };
    let last = s.chars().next_back().unwrap_or(first);
    if first.is_whitespace() || last.is_whitespace() {
        return true;
    }
    // A bare leading BOM would make the whole document look BOM-prefixed; a
    // bare leading '@' collides with the table-header grammar.
    if first == '\u{feff}' || first == '@' {
        return true;
    }
    let mut has_colon = false;
    for ch in s.chars() {
        match ch {
            ',' | '[' | ']' | '{' | '}' | '"' => return true,
            ':' => has_colon = true,
            c if (c as u32) < 0x20 => return true,
            _ => {}
        }
    }
    if has_colon && !is_iso_like(s) {
        return true;
    }
    is_reserved_literal(s) || is_numeric_like(s)
}

/// Whether an object key needs the quoted form on a `key:value` line.
///
/// Quoted keys are literal on decode; bare keys dot-split, so any key with a
/// `.` must be quoted to survive. Keys starting with `@` would collide with
/// table headers.
pub(crate) fn key_needs_quoting(key: &str) -> bool {
    if key.is_empty() || key.starts_with('@') || key.starts_with('\u{feff}') {
        return true;
    }
    key.chars().any(|ch| {
        matches!(ch, '.' | ',' | ':' | '"' | '{' | '}' | '[' | ']')
            || (ch as u32) < 0x20
            || ch.is_whitespace()
    })
}

/// Whether an object key inside an inline payload needs quoting. Dots are
/// fine here: inline keys never dot-split.
pub(crate) fn inline_key_needs_quoting(key: &str) -> bool {
    if key.is_empty() {
        return true;
    }
    let first = key.chars().next().unwrap_or(' ');
    let last = key.chars().next_back().unwrap_or(' ');
    if first.is_whitespace() || last.is_whitespace() || first == '"' {
        return true;
    }
    key.chars()
        .any(|ch| matches!(ch, ',' | ':' | '"' | '{' | '}' | '[' | ']') || (ch as u32) < 0x20)
}

/// Appends `s` wrapped in double quotes with backslash escapes applied.
///
/// Only `\\ \" \n \r \t` are escaped; other C0 characters pass through raw
/// (the escape set is closed, and anything inside quotes except a newline is
/// legal input).
pub(crate) fn push_quoted(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

pub(crate) fn quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    push_quoted(&mut out, s);
    out
}

/// RFC 4180 cell quoting: wrap in double quotes, double internal quotes.
pub(crate) fn csv_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        if ch == '"' {
            out.push_str("\"\"");
        } else {
            out.push(ch);
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_literals() {
        for s in ["T", "F", "true", "False", "NULL", "None", "nil"] {
            assert!(is_reserved_literal(s), "{s}");
        }
        for s in ["t", "f", "Truthy", "nul"] {
            assert!(!is_reserved_literal(s), "{s}");
        }
    }

    #[test]
    fn numeric_shapes() {
        assert!(is_numeric_like("42"));
        assert!(is_numeric_like("-3.14"));
        assert!(is_numeric_like("007"));
        assert!(is_numeric_like("1e6"));
        assert!(is_numeric_like("1.5E-3"));
        assert!(!is_numeric_like("1.2.3"));
        assert!(!is_numeric_like(".5"));
        assert!(!is_numeric_like("+5"));
        assert!(!is_numeric_like("1e"));
        assert!(!is_numeric_like("-"));

        assert!(number_shape("0").is_some());
        assert!(number_shape("0.5").is_some());
        assert!(number_shape("-12").is_some());
        assert!(number_shape("007").is_none());
        assert!(number_shape("1e6").map_or(false, |s| s.has_exponent));
        assert!(number_shape("3.14").map_or(false, |s| s.has_fraction));
    }

    #[test]
    fn iso_shapes() {
        assert!(is_iso_like("2024-01-15"));
        assert!(is_iso_like("10:30:00"));
        assert!(is_iso_like("2024-01-15T10:30:00"));
        assert!(is_iso_like("2024-01-15T10:30:00Z"));
        assert!(is_iso_like("2024-01-15T10:30:00+05:30"));
        assert!(!is_iso_like("2024-1-15"));
        assert!(!is_iso_like("10:30"));
        assert!(!is_iso_like("2024-01-15 10:30:00"));
        assert!(!is_iso_like("2024-01-15T10:30:00+0530"));
    }

    #[test]
    fn quoting_predicate() {
        assert!(needs_quoting(""));
        assert!(needs_quoting(" padded "));
        assert!(needs_quoting("a,b"));
        assert!(needs_quoting("a:b"));
        assert!(needs_quoting("{x}"));
        assert!(needs_quoting("line\nbreak"));
        assert!(needs_quoting("T"));
        assert!(needs_quoting("true"));
        assert!(needs_quoting("42"));
        assert!(needs_quoting("00501"));
        assert!(needs_quoting("@(2):id"));

        assert!(!needs_quoting("hello world"));
        assert!(!needs_quoting("snake_case-1.2.3"));
        assert!(!needs_quoting("10:30:00"));
        assert!(!needs_quoting("2024-01-15T10:30:00Z"));
    }

    #[test]
    fn key_quoting_predicate() {
        assert!(key_needs_quoting(""));
        assert!(key_needs_quoting("a.b"));
        assert!(key_needs_quoting("a b"));
        assert!(key_needs_quoting("@table"));
        assert!(key_needs_quoting("k:v"));
        assert!(!key_needs_quoting("plain_key-1"));

        assert!(!inline_key_needs_quoting("a.b"));
        assert!(inline_key_needs_quoting("a,b"));
    }

    #[test]
    fn quote_mechanisms() {
        assert_eq!(quoted("a\"b\\c\nd"), "\"a\\\"b\\\\c\\nd\"");
        assert_eq!(csv_quote("He said \"hi\", loudly"), "\"He said \"\"hi\"\", loudly\"");
    }
}
