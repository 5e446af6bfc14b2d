//! Property-based tests for the codec.
//!
//! Generates random tables and random text and checks the format's load-
//! bearing guarantees: group-ordered tables round-trip exactly, serialized
//! text is a fixed point of parse → serialize, and the parser is total.
//!
//! Strategy constraints mirror the format's documented limits rather than
//! working around bugs:
//! - string scalars avoid `"`, `\` and newlines (no escaping in the text
//!   form, and the parser's JSON sniff would reinterpret backslashes);
//! - root tables are generated in scalar → table → table-array order, the
//!   order the serializer regroups into; interleaved groups round-trip as
//!   text but not as entry order;
//! - nested tables hold only leaf entries (headers are shallow by design,
//!   so deeper nesting re-roots on re-parse);
//! - floats carry a `.5` fraction so their text form stays a float (whole
//!   floats render bare and re-parse as integers).

use proptest::prelude::*;
use std::collections::BTreeMap;
use tomlet_core::{parse, serialize, Scalar, Table, Value};

// ============================================================================
// Strategies
// ============================================================================

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,11}").unwrap()
}

fn arb_safe_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 :,._/-]{0,20}",
        // Edge cases: empty, padded, and type-lookalike strings all stay
        // strings because the serializer quotes them.
        Just(String::new()),
        Just(" padded ".to_string()),
        Just("true".to_string()),
        Just("false".to_string()),
        Just("null".to_string()),
        Just("42".to_string()),
        Just("3.14".to_string()),
        Just("-1".to_string()),
        Just("caf\u{00e9}".to_string()),
        Just("\u{4f60}\u{597d}".to_string()),
    ]
}

fn arb_scalar() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        any::<bool>().prop_map(Scalar::Bool),
        any::<i64>().prop_map(Scalar::Integer),
        (-5000i32..5000).prop_map(|n| Scalar::Float(f64::from(n) + 0.5)),
        arb_safe_string().prop_map(Scalar::String),
    ]
}

fn arb_leaf_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        3 => arb_scalar().prop_map(Value::Scalar),
        1 => prop::collection::vec(arb_scalar(), 0..4).prop_map(Value::Array),
    ]
}

/// A table of leaf entries only — the shape that nests without loss.
fn arb_flat_table() -> impl Strategy<Value = Table> {
    prop::collection::btree_map(arb_key(), arb_leaf_value(), 0..5)
        .prop_map(|entries| entries.into_iter().collect())
}

/// A root table with unique keys across all three groups, assembled in the
/// serializer's group order.
fn arb_root() -> impl Strategy<Value = Table> {
    let entry = prop_oneof![
        3 => arb_leaf_value(),
        1 => arb_flat_table().prop_map(Value::Table),
        1 => prop::collection::vec(arb_flat_table(), 1..3).prop_map(Value::TableArray),
    ];
    prop::collection::btree_map(arb_key(), entry, 0..8).prop_map(group_ordered)
}

fn group_ordered(entries: BTreeMap<String, Value>) -> Table {
    let mut table = Table::new();
    for (key, value) in &entries {
        if matches!(value, Value::Scalar(_) | Value::Array(_)) {
            table.insert(key.clone(), value.clone());
        }
    }
    for (key, value) in &entries {
        if matches!(value, Value::Table(_)) {
            table.insert(key.clone(), value.clone());
        }
    }
    for (key, value) in &entries {
        if matches!(value, Value::TableArray(_)) {
            table.insert(key.clone(), value.clone());
        }
    }
    table
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// serialize → parse reproduces a group-ordered table exactly.
    #[test]
    fn group_ordered_tables_roundtrip(root in arb_root()) {
        let text = serialize(&root);
        prop_assert_eq!(parse(&text), root);
    }

    /// Serialized text is already canonical: one more parse → serialize
    /// pass changes nothing.
    #[test]
    fn serialized_text_is_two_pass_stable(root in arb_root()) {
        let text = serialize(&root);
        prop_assert_eq!(serialize(&parse(&text)), text);
    }

    /// The parser accepts anything, and whatever it makes of arbitrary
    /// text, one canonicalization pass reaches a fixed point.
    #[test]
    fn canonicalization_of_junk_reaches_a_fixed_point(
        lines in prop::collection::vec("[A-Za-z0-9 \\[\\]=#\"{},.:/_-]{0,40}", 0..20)
    ) {
        let text = lines.join("\n");
        let first = serialize(&parse(&text));
        let second = serialize(&parse(&first));
        prop_assert_eq!(second, first);
    }
}
