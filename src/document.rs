//! Document model for indexing.
//!
//! A [`document::Document`] is an ordered list of [`field::Field`]s. Every
//! field has a name, a frozen [`field_type::FieldType`] that tells an index
//! writer how to handle it, and one value whose shape is fixed at
//! construction.
//!
//! # Core Components
//!
//! - [`document::Document`] - Multi-valued, insertion-ordered field list
//! - [`field::Field`] / [`field::IndexableField`] - A field and the writer-facing contract
//! - [`field_type::FieldType`] - Frozen indexing options, built by [`field_type::FieldTypeBuilder`]
//! - [`field_value::FieldValue`] - String, reader, bytes, token stream or number
//! - [`fields`] - Text, string, stored and numeric field kinds
//! - [`doc_values`] - Column-stride fields for sorting and faceting
//!
//! # Examples
//!
//! ```
//! use lexis::analysis::analyzer::standard::StandardAnalyzer;
//! use lexis::analysis::token::collect_tokens;
//! use lexis::document::doc_values::NumericDocValuesField;
//! use lexis::document::document::Document;
//! use lexis::document::field::{IndexableField, Store};
//!
//! let mut doc = Document::builder()
//!     .add_text("title", "The Rust Programming Language", Store::Yes)
//!     .add_field(NumericDocValuesField::new("popularity", 42))
//!     .build();
//!
//! let analyzer = StandardAnalyzer::new().unwrap();
//! let mut terms = Vec::new();
//! for field in doc.iter_mut() {
//!     if let Some(stream) = field.token_stream(&analyzer).unwrap() {
//!         terms.extend(collect_tokens(stream).unwrap().into_iter().map(|t| t.text));
//!     }
//! }
//!
//! assert_eq!(terms, vec!["rust", "programming", "language"]);
//! ```

pub mod doc_values;
#[allow(clippy::module_inception)]
pub mod document;
pub mod field;
pub mod field_type;
pub mod field_value;
pub mod fields;
