//! # Lexis
//!
//! The document and analysis core of a full-text indexer.
//!
//! ## Features
//!
//! - Attribute-based token streams that reuse their buffers token after token
//! - Tokenizers, filters and analyzers configurable from JSON
//! - Trie-encoded numeric token streams
//! - Frozen, shareable field types
//! - Fields whose value shape is fixed at construction and whose payload can
//!   be refilled for every document
//! - Doc-values fields for sorting and faceting

pub mod analysis;
pub mod document;
pub mod error;
pub mod util;

pub mod prelude {
    pub use crate::analysis::analyzer::Analyzer;
    pub use crate::analysis::analyzer::per_field::PerFieldAnalyzer;
    pub use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
    pub use crate::analysis::analyzer::standard::StandardAnalyzer;
    pub use crate::analysis::attribute::AttributeSource;
    pub use crate::analysis::token::{Token, collect_tokens};
    pub use crate::analysis::token_attributes::{
        CharTermAttribute, OffsetAttribute, PositionIncrementAttribute, TermToBytesRefAttribute,
    };
    pub use crate::analysis::token_stream::TokenStream;
    pub use crate::document::doc_values::{
        BinaryDocValuesField, DoubleDocValuesField, FloatDocValuesField, NumericDocValuesField,
        SortedDocValuesField, SortedSetDocValuesField,
    };
    pub use crate::document::document::Document;
    pub use crate::document::field::{Field, IndexableField, Store};
    pub use crate::document::field_type::{
        DocValuesType, FieldType, FieldTypeBuilder, IndexOptions, IndexableFieldType, NumericType,
    };
    pub use crate::document::fields::{
        DoubleField, FloatField, IntField, LongField, StoredField, StringField, TextField,
    };
    pub use crate::error::{LexisError, Result};
    pub use crate::util::bytes_ref::BytesRef;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
