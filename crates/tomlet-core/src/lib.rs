//! # tomlet-core
//!
//! Codec for a deliberately reduced, TOML-like configuration dialect: a
//! serializer that renders a nested key/value model as plain, section-based
//! text an operator can edit, and a total parser that reconstructs the
//! model from that text. The two directions are independent pure functions;
//! the surrounding system moves the same documents around as JSON, so the
//! crate also bridges both directions to JSON strings.
//!
//! The dialect is not TOML: one level of `[section]` headers (resolved as a
//! dotted path from the root), repeated `[[section]]` blocks for arrays of
//! tables, single-line JSON-style arrays, and quoted strings without escape
//! sequences. It only needs to round-trip the shapes this system produces.
//!
//! ## Quick start
//!
//! ```rust
//! use tomlet_core::{decode, encode};
//!
//! // JSON → text
//! let json = r#"{"hostname":"atlas","ssh_port":22,"docker":{"network":"lab0"}}"#;
//! let text = encode(json).unwrap();
//! assert_eq!(
//!     text,
//!     "hostname = \"atlas\"\nssh_port = 22\n\n[docker]\nnetwork = \"lab0\"\n"
//! );
//!
//! // text → JSON (roundtrip)
//! let back = decode(&text).unwrap();
//! assert_eq!(back, json);
//! ```
//!
//! ## Modules
//!
//! - [`ser`] — value model → text ([`serialize`]), JSON string → text
//!   ([`encode`])
//! - [`de`] — text → value model ([`parse`]), text → JSON string
//!   ([`decode`])
//! - [`types`] — the [`Value`]/[`Table`] model and the JSON bridge
//! - [`error`] — errors for the JSON boundary (the text codec is total)

pub mod de;
pub mod error;
pub mod ser;
pub mod types;

pub use de::{decode, parse};
pub use error::{Result, TomletError};
pub use ser::{encode, serialize};
pub use types::{Scalar, Table, Value};
