//! Value model shared by the serializer and the parser.
//!
//! Configuration data is a tree of [`Value`]s rooted at a [`Table`]. The
//! variants mirror what the text format can express: scalar leaves, single-
//! line arrays of scalars, nested tables, and repeated sections (arrays of
//! tables). Tables keep insertion order; the renderer regroups entries by
//! shape but never sorts them.
//!
//! The model also carries the JSON bridge: [`Table::from_json`] classifies a
//! `serde_json::Value` document into this shape, and the manual
//! [`serde::Serialize`] impls let a table travel back out as a structured
//! payload.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value as JsonValue;

use crate::error::{Result, TomletError};

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    /// Stored verbatim. The text form writes strings without escaping, so a
    /// string containing `"` or a newline corrupts its line and will not
    /// survive a serialize/parse cycle intact.
    String(String),
}

/// A configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    /// Inline array: an ordered sequence of scalars on a single line. Never
    /// contains tables.
    Array(Vec<Scalar>),
    Table(Table),
    /// Repeated sections bound to one key, each element a table.
    TableArray(Vec<Table>),
}

/// A keyed group of configuration entries.
///
/// Keys are unique. Insertion order is preserved and drives the output order
/// of the serializer; re-inserting an existing key replaces the value but
/// keeps the original position. Equality is deep and order-sensitive.
#[derive(Debug, Clone, Default)]
pub struct Table(IndexMap<String, Value>);

impl Table {
    pub fn new() -> Self {
        Table(IndexMap::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Insert an entry, replacing (in place) any prior entry with this key.
    /// Returns the replaced value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Get-or-create the nested table at `key`. An existing entry that is
    /// not a table is replaced by a fresh empty one.
    pub fn ensure_table(&mut self, key: &str) -> &mut Table {
        let slot = self
            .0
            .entry(key.to_string())
            .or_insert_with(|| Value::Table(Table::new()));
        if !matches!(slot, Value::Table(_)) {
            *slot = Value::Table(Table::new());
        }
        match slot {
            Value::Table(table) => table,
            _ => unreachable!("slot was just made a table"),
        }
    }

    /// Get-or-create the table array at `key`. An existing entry that is not
    /// a table array is replaced by a fresh empty one.
    pub fn ensure_table_array(&mut self, key: &str) -> &mut Vec<Table> {
        let slot = self
            .0
            .entry(key.to_string())
            .or_insert_with(|| Value::TableArray(Vec::new()));
        if !matches!(slot, Value::TableArray(_)) {
            *slot = Value::TableArray(Vec::new());
        }
        match slot {
            Value::TableArray(elements) => elements,
            _ => unreachable!("slot was just made a table array"),
        }
    }

    /// Convert a JSON document into a table.
    ///
    /// The root must be a JSON object. Arrays are classified by element
    /// shape: all objects become a [`Value::TableArray`], all scalars (or an
    /// empty array) an inline [`Value::Array`]. Anything else (mixed
    /// arrays, nested arrays, `null`) has no representation in the text
    /// format and is reported with its JSON path.
    pub fn from_json(json: &JsonValue) -> Result<Table> {
        match json {
            JsonValue::Object(map) => table_from_object(map, ""),
            other => Err(unsupported(
                "$",
                &format!("document root must be an object, got {}", json_kind(other)),
            )),
        }
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().eq(other.0.iter())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Table {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Table::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Integer(n) => serializer.serialize_i64(*n),
            Scalar::Float(n) => serializer.serialize_f64(*n),
            Scalar::String(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Scalar(scalar) => scalar.serialize(serializer),
            Value::Array(items) => items.serialize(serializer),
            Value::Table(table) => table.serialize(serializer),
            Value::TableArray(elements) => elements.serialize(serializer),
        }
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<Table> for Value {
    fn from(table: Table) -> Self {
        Value::Table(table)
    }
}

impl From<Vec<Scalar>> for Value {
    fn from(items: Vec<Scalar>) -> Self {
        Value::Array(items)
    }
}

impl From<Vec<Table>> for Value {
    fn from(elements: Vec<Table>) -> Self {
        Value::TableArray(elements)
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident ($conv:expr)),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    Scalar::$variant($conv(v))
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Scalar(Scalar::from(v))
                }
            }
        )*
    };
}

scalar_from! {
    bool => Bool(std::convert::identity),
    i32 => Integer(i64::from),
    i64 => Integer(std::convert::identity),
    f64 => Float(std::convert::identity),
    String => String(std::convert::identity),
    &str => String(str::to_string),
}

fn table_from_object(map: &serde_json::Map<String, JsonValue>, path: &str) -> Result<Table> {
    let mut table = Table::new();
    for (key, value) in map {
        let child_path = join_path(path, key);
        table.insert(key.clone(), value_from_json(value, &child_path)?);
    }
    Ok(table)
}

fn value_from_json(json: &JsonValue, path: &str) -> Result<Value> {
    match json {
        JsonValue::Bool(b) => Ok(Value::Scalar(Scalar::Bool(*b))),
        JsonValue::Number(n) => Ok(Value::Scalar(scalar_from_number(n))),
        JsonValue::String(s) => Ok(Value::Scalar(Scalar::String(s.clone()))),
        JsonValue::Array(items) => array_from_json(items, path),
        JsonValue::Object(map) => Ok(Value::Table(table_from_object(map, path)?)),
        JsonValue::Null => Err(unsupported(path, "null has no textual form")),
    }
}

fn array_from_json(items: &[JsonValue], path: &str) -> Result<Value> {
    if !items.is_empty() && items.iter().all(JsonValue::is_object) {
        let mut elements = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if let JsonValue::Object(map) = item {
                elements.push(table_from_object(map, &format!("{path}[{i}]"))?);
            }
        }
        return Ok(Value::TableArray(elements));
    }

    let mut scalars = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match item {
            JsonValue::Bool(b) => scalars.push(Scalar::Bool(*b)),
            JsonValue::Number(n) => scalars.push(scalar_from_number(n)),
            JsonValue::String(s) => scalars.push(Scalar::String(s.clone())),
            other => {
                return Err(unsupported(
                    &format!("{path}[{i}]"),
                    &format!("array mixing {} with scalars cannot be rendered", json_kind(other)),
                ))
            }
        }
    }
    Ok(Value::Array(scalars))
}

/// Integers that fit `i64` stay integers; everything else (including `u64`
/// beyond `i64::MAX`) becomes a float.
pub(crate) fn scalar_from_number(n: &serde_json::Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Integer(i)
    } else {
        Scalar::Float(n.as_f64().unwrap_or(0.0))
    }
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn json_kind(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

fn unsupported(path: &str, message: &str) -> TomletError {
    TomletError::Unsupported {
        path: path.to_string(),
        message: message.to_string(),
    }
}
