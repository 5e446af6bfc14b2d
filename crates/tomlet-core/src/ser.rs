//! Serializer — renders the value model as editable section-based text.
//!
//! A table renders as three groups, each preserving the table's insertion
//! order: `key = value` lines for scalars and inline arrays first, then one
//! `[key]` section per nested table, then one `[[key]]` section per element
//! of each table array. Every section header is preceded by a blank line and
//! followed by the recursive rendering of its table.
//!
//! Headers carry only the immediate key, never the dotted ancestor path, to
//! stay symmetric with the parser's root-relative `[path]` resolution. A
//! table nested two levels deep therefore renders a header identical to a
//! top-level one and re-roots on re-parse; documents are round-trip stable
//! to one level of table nesting plus one level of table array.
//!
//! # Example
//! ```
//! use tomlet_core::{serialize, Table};
//!
//! let mut table = Table::new();
//! table.insert("name", "grafana");
//! table.insert("port", 3000);
//! assert_eq!(serialize(&table), "name = \"grafana\"\nport = 3000\n");
//! ```

use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::types::{Scalar, Table, Value};

/// Render a table as a text document.
///
/// Never fails: every value has a best-effort text form. An empty table
/// renders as the empty string.
pub fn serialize(root: &Table) -> String {
    let mut out = String::new();
    write_table(root, &mut out);
    out
}

/// Convert a JSON object string directly into the text format.
///
/// Parses the input as JSON, classifies it into the value model, and
/// renders it. Returns an error if the input is not valid JSON or contains
/// values the format cannot express (see [`Table::from_json`]).
pub fn encode(json: &str) -> Result<String> {
    let value: JsonValue = serde_json::from_str(json)?;
    let table = Table::from_json(&value)?;
    Ok(serialize(&table))
}

/// Emit one table: scalar lines, then `[key]` sections, then `[[key]]`
/// sections. The partition is recomputed from value shapes on every pass.
fn write_table(table: &Table, out: &mut String) {
    for (key, value) in table.iter() {
        match value {
            Value::Scalar(scalar) => {
                out.push_str(key);
                out.push_str(" = ");
                write_scalar(scalar, out);
                out.push('\n');
            }
            Value::Array(items) => {
                out.push_str(key);
                out.push_str(" = ");
                out.push_str(&inline_array(items));
                out.push('\n');
            }
            _ => {}
        }
    }

    for (key, value) in table.iter() {
        if let Value::Table(child) = value {
            out.push_str(&format!("\n[{key}]\n"));
            write_table(child, out);
        }
    }

    for (key, value) in table.iter() {
        if let Value::TableArray(elements) = value {
            for element in elements {
                out.push_str(&format!("\n[[{key}]]\n"));
                write_table(element, out);
            }
        }
    }
}

/// Emit a bare scalar. Strings are wrapped in double quotes with no
/// escaping (see [`Scalar::String`] for the round-trip caveat); numbers and
/// booleans use their canonical `Display` form.
fn write_scalar(scalar: &Scalar, out: &mut String) {
    match scalar {
        Scalar::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Scalar::Integer(n) => out.push_str(&n.to_string()),
        Scalar::Float(n) => out.push_str(&n.to_string()),
        Scalar::String(s) => {
            out.push('"');
            out.push_str(s);
            out.push('"');
        }
    }
}

/// Render an inline array as a one-line JSON array: strings quoted (and
/// JSON-escaped), numbers and booleans bare, no spaces after commas.
fn inline_array(items: &[Scalar]) -> String {
    JsonValue::Array(items.iter().map(scalar_json).collect()).to_string()
}

fn scalar_json(scalar: &Scalar) -> JsonValue {
    match scalar {
        Scalar::Bool(b) => JsonValue::Bool(*b),
        Scalar::Integer(n) => JsonValue::Number((*n).into()),
        // Non-finite floats have no JSON form and fall back to null.
        Scalar::Float(n) => serde_json::Number::from_f64(*n)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Scalar::String(s) => JsonValue::String(s.clone()),
    }
}
