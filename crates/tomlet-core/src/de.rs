//! Parser — reconstructs the value model from section-based text.
//!
//! The parser is total: every input yields a table. Malformed constructs
//! degrade to the least-structured reading instead of failing (a value
//! that is not a recognized literal becomes a string, an unrecognized line
//! is dropped). A malformed document is therefore never rejected, only
//! parsed into something less structured than the author may have meant.
//!
//! # Key design decisions
//!
//! - **Cursor as index path**: the "current table" is tracked as a path
//!   into the owned tree (`Cursor`) and re-resolved per assignment, not
//!   held as a `&mut Table` across lines; the root stays borrowable and
//!   each `parse` call owns its own cursor.
//! - **Two-branch literal sniffing**: interpreting the text right of `=`
//!   returns an explicit `Literal` (a structured value, or the raw text)
//!   rather than routing control flow through errors.
//! - **Single pass, strictly sequential**: every section header re-roots
//!   the lookup for all assignments until the next header. `[path]` walks
//!   dot-separated segments from the root; `[[name]]` takes its name as one
//!   literal key.
//!
//! # Example
//! ```
//! use tomlet_core::{parse, Scalar, Value};
//!
//! let table = parse("retries = 3\nmotd = not quite json\n");
//! assert_eq!(table.get("retries"), Some(&Value::Scalar(Scalar::Integer(3))));
//! assert_eq!(
//!     table.get("motd"),
//!     Some(&Value::Scalar(Scalar::String("not quite json".into())))
//! );
//! ```

use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::types::{scalar_from_number, Scalar, Table, Value};

/// Parse a text document into a table.
///
/// Total function: never fails, regardless of input. Blank lines and lines
/// whose first non-whitespace character is `#` are skipped; any other line
/// that is neither a section header nor an assignment is ignored.
pub fn parse(text: &str) -> Table {
    let mut root = Table::new();
    let mut cursor = Cursor::Path(Vec::new());

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(name) = array_header(line) {
            root.ensure_table_array(name).push(Table::new());
            cursor = Cursor::ArrayTail(name.to_string());
        } else if let Some(path) = table_header(line) {
            cursor = Cursor::Path(path.split('.').map(str::to_string).collect());
            // Create the section's tables even if no assignment follows.
            resolve(&mut root, &cursor);
        } else if let Some((key, raw)) = line.split_once('=') {
            let value = match sniff_literal(raw.trim()) {
                Literal::Structured(value) => value,
                Literal::Raw(text) => Value::Scalar(Scalar::String(text)),
            };
            resolve(&mut root, &cursor).insert(key.trim().to_string(), value);
        }
    }

    root
}

/// Parse a text document and re-serialize the result as a compact JSON
/// object string, ready to travel as a structured payload.
pub fn decode(text: &str) -> Result<String> {
    let table = parse(text);
    Ok(serde_json::to_string(&table)?)
}

/// Where assignments land until the next section header re-points it.
enum Cursor {
    /// Dotted sequence of table keys walked from the document root. Empty
    /// means the root itself.
    Path(Vec<String>),
    /// Newest element of the table array bound to this root-level key.
    ArrayTail(String),
}

/// Walk the cursor down from the root, creating tables along the way.
/// Non-table values in the path are replaced by fresh tables so the cursor
/// always lands on a real table.
fn resolve<'a>(root: &'a mut Table, cursor: &Cursor) -> &'a mut Table {
    match cursor {
        Cursor::Path(segments) => segments
            .iter()
            .fold(root, |table, segment| table.ensure_table(segment)),
        Cursor::ArrayTail(key) => {
            let elements = root.ensure_table_array(key);
            if elements.is_empty() {
                elements.push(Table::new());
            }
            let last = elements.len() - 1;
            &mut elements[last]
        }
    }
}

/// `[[name]]` — the name is taken as one literal key, no dot splitting.
fn array_header(line: &str) -> Option<&str> {
    if line.len() >= 4 && line.starts_with("[[") && line.ends_with("]]") {
        Some(&line[2..line.len() - 2])
    } else {
        None
    }
}

/// `[path]` — single brackets around a dotted path.
fn table_header(line: &str) -> Option<&str> {
    if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
        Some(&line[1..line.len() - 1])
    } else {
        None
    }
}

/// Outcome of interpreting the text right of `=`.
enum Literal {
    /// The text is a recognized literal.
    Structured(Value),
    /// Fallback: the raw text, with one surrounding quote pair stripped.
    Raw(String),
}

/// Interpret a raw value using strict JSON literal rules: numbers,
/// booleans, double-quoted strings, and single-line arrays of those.
/// Everything else takes the raw branch, including JSON objects, `null`,
/// and arrays holding non-scalars, none of which the model has a slot for.
fn sniff_literal(raw: &str) -> Literal {
    if let Ok(json) = serde_json::from_str::<JsonValue>(raw) {
        if let Some(value) = structured_value(&json) {
            return Literal::Structured(value);
        }
    }
    Literal::Raw(strip_quotes(raw).to_string())
}

fn structured_value(json: &JsonValue) -> Option<Value> {
    if let Some(scalar) = scalar_value(json) {
        return Some(Value::Scalar(scalar));
    }
    if let JsonValue::Array(items) = json {
        let scalars = items.iter().map(scalar_value).collect::<Option<Vec<_>>>()?;
        return Some(Value::Array(scalars));
    }
    None
}

fn scalar_value(json: &JsonValue) -> Option<Scalar> {
    match json {
        JsonValue::Bool(b) => Some(Scalar::Bool(*b)),
        JsonValue::Number(n) => Some(scalar_from_number(n)),
        JsonValue::String(s) => Some(Scalar::String(s.clone())),
        _ => None,
    }
}

/// Strip one leading and one trailing double quote, each independently and
/// only if present.
fn strip_quotes(raw: &str) -> &str {
    let raw = raw.strip_prefix('"').unwrap_or(raw);
    raw.strip_suffix('"').unwrap_or(raw)
}
