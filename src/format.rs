//! ZON Format Description
//!
//! This module documents the ZON (Zero Overhead Notation) text format as
//! implemented by this library.
//!
//! # Overview
//!
//! ZON is a line-oriented, UTF-8 serialization of the JSON data model,
//! designed for minimal token usage in LLM contexts. A document is a flat
//! sequence of `key:value` lines plus CSV-style tables; nesting is carried in
//! quoted single-line payloads rather than indentation.
//!
//! ## Design Philosophy
//!
//! - **Token efficiency**: one line per field, no braces at block level, bare
//!   strings wherever they survive unambiguously
//! - **Tables**: a uniform array of objects collapses into one header line
//!   plus one CSV row per element
//! - **Canonical form**: for a given value, the encoder produces exactly one
//!   byte sequence; keys are sorted, numbers are normalized
//!
//! # Objects
//!
//! Block-level objects use one `key:value` line per field, keys sorted:
//!
//! ```text
//! active:T
//! age:30
//! name:Alice
//! ```
//!
//! Keys are bare unless they are empty, begin with `@`, or contain dots,
//! structural characters (`, : " { } [ ]`), whitespace, or control
//! characters; such keys are emitted as quoted literals. A bare key
//! containing dots is a path: `server.host:local` nests `host` inside
//! `server`. A quoted key is always literal.
//!
//! # Primitives
//!
//! | Type | Syntax | Example |
//! |------|--------|---------|
//! | Null | `null` (decodes from `none`/`nil` too, any case) | `value:null` |
//! | Boolean | `T` / `F` (case-sensitive) | `active:T` |
//! | Integer | decimal digits, optional `-`, no leading zeros | `count:42` |
//! | Float | shortest round-tripping decimal, never scientific | `price:19.99` |
//! | String | bare or `"quoted"` | `name:Alice` |
//!
//! Number canonicalization: a mathematically integral value always emits as
//! an integer (`5`, never `5.0`), `-0` emits `0`, and exponent forms are
//! accepted on input (`1e6`) but re-encode expanded (`1000000`). A bare
//! token with a leading zero (`007`) is a string, as is anything
//! ISO-8601-looking (`2024-01-15`, `10:30:00`, `2024-01-15T10:30:00Z`).
//!
//! # Strings
//!
//! Strings are unquoted by default. Quoting is required when the string:
//!
//! - is empty, or has leading/trailing whitespace
//! - contains `, [ ] { } "`, or `:` (unless the whole token is ISO-looking)
//! - contains a control character or newline
//! - spells a reserved literal: `T`, `F`, or `true`/`false`/`null`/`none`/
//!   `nil` in any case
//! - looks numeric, leading zeros included: `42`, `-3.14`, `1e6`, `007`
//!
//! Escape sequences inside quoted strings are exactly:
//!
//! ```text
//! \"  quote    \\  backslash    \n  newline    \r  carriage return    \t  tab
//! ```
//!
//! Any other backslash escape is an error. Unicode is carried as literal
//! UTF-8, never `\uXXXX`.
//!
//! # Tables
//!
//! A non-empty array whose elements are objects with identical key sets
//! emits as a table: a header declaring the row count and the sorted column
//! names, then one CSV row per element.
//!
//! ```text
//! hikes:@(3):companion,distanceKm,elevationGain,id,name,wasSunny
//! ana,7.5,320,1,Blue Lake Trail,T
//! luis,9.2,540,2,Ridge Overlook,F
//! sam,5.1,180,3,Wildflower Loop,T
//! ```
//!
//! At the root, a uniform array uses the anonymous header `@(N):cols`. The
//! legacy dialect `@hikes(3):cols` is accepted on decode but never emitted.
//!
//! Row cells use RFC 4180 quoting: a cell containing `,`, `"`, or needing
//! protection per the string rules is wrapped in double quotes with internal
//! quotes doubled:
//!
//! ```text
//! @(1):id,text
//! 1,"He said ""hi"", loudly"
//! ```
//!
//! In strict mode the row count must match the header and every row must
//! have exactly one cell per column (`E001`/`E002`). In non-strict mode
//! short rows pad with null and surplus `key:value`-shaped cells attach by
//! name (sparse rows).
//!
//! # Inline payloads
//!
//! Anything nested that is not a table becomes a quoted single-line payload
//! using a recursive grammar: `{key:value,…}` with sorted keys, `[v,…]`, and
//! the same scalar rules with `:` added to the structural set.
//!
//! ```text
//! context:"{location:Boulder,season:spring_2025,task:Our favorite hikes together}"
//! friends:"[ana,luis,sam]"
//! empty:"[]"
//! ```
//!
//! A string that merely *looks* like a payload (or starts with a quote) is
//! protected with an extra quote layer, so `{a:1}`-the-string and
//! `{a:1}`-the-object stay distinct.
//!
//! # Document forms
//!
//! The first non-empty line decides the root:
//!
//! | First line | Root |
//! |---|---|
//! | `@(N):cols` | array (table) |
//! | `{…}` or `[…]` alone | the inline payload |
//! | `key:value` or a named header | object |
//! | a lone scalar | that scalar |
//! | nothing | null |
//!
//! Blank lines are ignored. Output uses LF endings, no BOM, no trailing
//! whitespace, and no final newline unless requested. CRLF input is
//! normalized. The conventional file extension is `.zonf`, media type
//! `text/zon; charset=utf-8`.
//!
//! # Security
//!
//! The keys `__proto__`, `constructor`, and `prototype` are rejected
//! everywhere, on both encode and decode. Decoding enforces configurable
//! limits: document bytes (100 MiB), line bytes (1 MiB), array length
//! (1,000,000), object keys (100,000), and nesting depth (100).
//!
//! # Format Comparison
//!
//! **JSON** (121 chars):
//!
//! ```json
//! [{"id":1,"name":"Alice","role":"admin"},{"id":2,"name":"Bob","role":"user"}]
//! ```
//!
//! **ZON** (48 chars):
//!
//! ```text
//! @(2):id,name,role
//! 1,Alice,admin
//! 2,Bob,user
//! ```

// This module contains only documentation; no implementation code
