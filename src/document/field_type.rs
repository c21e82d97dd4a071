//! Field type descriptors.
//!
//! A [`FieldTypeBuilder`] is a plain mutable configuration value. Calling
//! [`FieldTypeBuilder::freeze`] produces a [`FieldType`], which has no
//! setters at all: once frozen, a descriptor can only be read, copied and
//! shared. To derive a variation of a frozen type, go back through
//! [`FieldType::to_builder`].
//!
//! Both steps are `const`, so the predefined descriptors of the field
//! kinds (e.g. [`TextField::TYPE_STORED`](super::fields::TextField::TYPE_STORED))
//! are process-wide constants that any number of threads may read.
//!
//! # Examples
//!
//! ```
//! use lexis::document::field_type::{FieldTypeBuilder, IndexOptions};
//!
//! let field_type = FieldTypeBuilder::new()
//!     .indexed(true)
//!     .stored(true)
//!     .index_options(IndexOptions::DocsOnly)
//!     .freeze();
//!
//! assert!(field_type.indexed());
//! assert_eq!(
//!     field_type.to_string(),
//!     "stored,indexed,tokenized,indexOptions=DOCS_ONLY"
//! );
//!
//! // Derive a new descriptor; the original stays as it was.
//! let unstored = field_type.to_builder().stored(false).freeze();
//! assert!(field_type.stored());
//! assert!(!unstored.stored());
//! ```

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::error::{LexisError, Result};
use crate::util::numeric_utils::PRECISION_STEP_DEFAULT;

/// What the inverted index records for each term of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexOptions {
    /// Nothing is recorded.
    None,
    /// Only document numbers. Phrase queries fail on such fields.
    DocsOnly,
    /// Document numbers and term frequencies.
    DocsAndFreqs,
    /// Document numbers, frequencies and positions.
    #[default]
    DocsAndFreqsAndPositions,
    /// Like `DocsAndFreqsAndPositions`, plus character offsets.
    DocsAndFreqsAndPositionsAndOffsets,
}

impl IndexOptions {
    pub const fn as_str(&self) -> &'static str {
        match self {
            IndexOptions::None => "NONE",
            IndexOptions::DocsOnly => "DOCS_ONLY",
            IndexOptions::DocsAndFreqs => "DOCS_AND_FREQS",
            IndexOptions::DocsAndFreqsAndPositions => "DOCS_AND_FREQS_AND_POSITIONS",
            IndexOptions::DocsAndFreqsAndPositionsAndOffsets => {
                "DOCS_AND_FREQS_AND_POSITIONS_AND_OFFSETS"
            }
        }
    }

    pub const fn has_freqs(&self) -> bool {
        matches!(
            self,
            IndexOptions::DocsAndFreqs
                | IndexOptions::DocsAndFreqsAndPositions
                | IndexOptions::DocsAndFreqsAndPositionsAndOffsets
        )
    }

    pub const fn has_positions(&self) -> bool {
        matches!(
            self,
            IndexOptions::DocsAndFreqsAndPositions
                | IndexOptions::DocsAndFreqsAndPositionsAndOffsets
        )
    }

    pub const fn has_offsets(&self) -> bool {
        matches!(self, IndexOptions::DocsAndFreqsAndPositionsAndOffsets)
    }
}

impl fmt::Display for IndexOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column-stride storage kind of a field. The writer picks its encoding by
/// this tag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocValuesType {
    #[default]
    None,
    /// One 64-bit value per document.
    Numeric,
    /// One arbitrary byte sequence per document.
    Binary,
    /// One byte sequence per document, deduplicated and sorted.
    Sorted,
    /// Any number of byte sequences per document, deduplicated and sorted.
    SortedSet,
}

impl DocValuesType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DocValuesType::None => "NONE",
            DocValuesType::Numeric => "NUMERIC",
            DocValuesType::Binary => "BINARY",
            DocValuesType::Sorted => "SORTED",
            DocValuesType::SortedSet => "SORTED_SET",
        }
    }
}

impl fmt::Display for DocValuesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoding of a trie-indexed numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericType {
    Int,
    Long,
    Float,
    Double,
}

impl NumericType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            NumericType::Int => "INT",
            NumericType::Long => "LONG",
            NumericType::Float => "FLOAT",
            NumericType::Double => "DOUBLE",
        }
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read access to the indexing properties of a field.
///
/// This is what an index writer consults to decide how to encode postings,
/// stored values and doc values.
pub trait IndexableFieldType {
    /// Whether the field is inverted.
    fn indexed(&self) -> bool;

    /// Whether the original value is stored.
    fn stored(&self) -> bool;

    /// Whether the value is analyzed into several tokens.
    fn tokenized(&self) -> bool;

    fn store_term_vectors(&self) -> bool;

    fn store_term_vector_offsets(&self) -> bool;

    fn store_term_vector_positions(&self) -> bool;

    fn store_term_vector_payloads(&self) -> bool;

    fn omit_norms(&self) -> bool;

    fn index_options(&self) -> IndexOptions;

    fn numeric_type(&self) -> Option<NumericType>;

    fn numeric_precision_step(&self) -> NonZeroU32;

    fn doc_values_type(&self) -> DocValuesType;
}

const DEFAULT_PRECISION_STEP: NonZeroU32 = match NonZeroU32::new(PRECISION_STEP_DEFAULT) {
    Some(step) => step,
    None => NonZeroU32::MIN,
};

/// Mutable field type configuration.
///
/// Defaults: not indexed, not stored, tokenized, norms kept, index options
/// [`IndexOptions::DocsAndFreqsAndPositions`], no numeric type, precision
/// step 4 and no doc values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTypeBuilder {
    pub indexed: bool,
    pub stored: bool,
    pub tokenized: bool,
    pub store_term_vectors: bool,
    pub store_term_vector_offsets: bool,
    pub store_term_vector_positions: bool,
    pub store_term_vector_payloads: bool,
    pub omit_norms: bool,
    pub index_options: IndexOptions,
    pub numeric_type: Option<NumericType>,
    pub numeric_precision_step: NonZeroU32,
    pub doc_values_type: DocValuesType,
}

impl FieldTypeBuilder {
    pub const fn new() -> Self {
        FieldTypeBuilder {
            indexed: false,
            stored: false,
            tokenized: true,
            store_term_vectors: false,
            store_term_vector_offsets: false,
            store_term_vector_positions: false,
            store_term_vector_payloads: false,
            omit_norms: false,
            index_options: IndexOptions::DocsAndFreqsAndPositions,
            numeric_type: None,
            numeric_precision_step: DEFAULT_PRECISION_STEP,
            doc_values_type: DocValuesType::None,
        }
    }

    pub const fn indexed(mut self, value: bool) -> Self {
        self.indexed = value;
        self
    }

    pub const fn stored(mut self, value: bool) -> Self {
        self.stored = value;
        self
    }

    pub const fn tokenized(mut self, value: bool) -> Self {
        self.tokenized = value;
        self
    }

    pub const fn store_term_vectors(mut self, value: bool) -> Self {
        self.store_term_vectors = value;
        self
    }

    pub const fn store_term_vector_offsets(mut self, value: bool) -> Self {
        self.store_term_vector_offsets = value;
        self
    }

    pub const fn store_term_vector_positions(mut self, value: bool) -> Self {
        self.store_term_vector_positions = value;
        self
    }

    pub const fn store_term_vector_payloads(mut self, value: bool) -> Self {
        self.store_term_vector_payloads = value;
        self
    }

    pub const fn omit_norms(mut self, value: bool) -> Self {
        self.omit_norms = value;
        self
    }

    pub const fn index_options(mut self, value: IndexOptions) -> Self {
        self.index_options = value;
        self
    }

    pub const fn numeric_type(mut self, value: Option<NumericType>) -> Self {
        self.numeric_type = value;
        self
    }

    pub const fn numeric_precision_step(mut self, value: NonZeroU32) -> Self {
        self.numeric_precision_step = value;
        self
    }

    /// Like [`numeric_precision_step`](Self::numeric_precision_step), for an
    /// unchecked integer.
    pub fn try_numeric_precision_step(self, value: u32) -> Result<Self> {
        match NonZeroU32::new(value) {
            Some(step) => Ok(self.numeric_precision_step(step)),
            None => Err(LexisError::invalid_argument(format!(
                "precisionStep must be >= 1 (got {value})"
            ))),
        }
    }

    pub const fn doc_values_type(mut self, value: DocValuesType) -> Self {
        self.doc_values_type = value;
        self
    }

    /// Turn this configuration into an immutable [`FieldType`].
    pub const fn freeze(self) -> FieldType {
        FieldType(self)
    }
}

impl Default for FieldTypeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// An immutable field type.
///
/// `FieldType` is `Copy` and holds no interior mutability, so a single value
/// can back any number of fields across threads.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "FieldTypeBuilder", into = "FieldTypeBuilder")]
pub struct FieldType(FieldTypeBuilder);

impl FieldType {
    /// A mutable copy of this descriptor.
    pub const fn to_builder(&self) -> FieldTypeBuilder {
        self.0
    }

    /// Load a frozen descriptor from JSON. Absent keys take the defaults of
    /// [`FieldTypeBuilder::new`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub const fn indexed(&self) -> bool {
        self.0.indexed
    }

    pub const fn stored(&self) -> bool {
        self.0.stored
    }

    pub const fn tokenized(&self) -> bool {
        self.0.tokenized
    }

    pub const fn store_term_vectors(&self) -> bool {
        self.0.store_term_vectors
    }

    pub const fn store_term_vector_offsets(&self) -> bool {
        self.0.store_term_vector_offsets
    }

    pub const fn store_term_vector_positions(&self) -> bool {
        self.0.store_term_vector_positions
    }

    pub const fn store_term_vector_payloads(&self) -> bool {
        self.0.store_term_vector_payloads
    }

    pub const fn omit_norms(&self) -> bool {
        self.0.omit_norms
    }

    pub const fn index_options(&self) -> IndexOptions {
        self.0.index_options
    }

    pub const fn numeric_type(&self) -> Option<NumericType> {
        self.0.numeric_type
    }

    pub const fn numeric_precision_step(&self) -> NonZeroU32 {
        self.0.numeric_precision_step
    }

    pub const fn doc_values_type(&self) -> DocValuesType {
        self.0.doc_values_type
    }
}

impl Default for FieldType {
    fn default() -> Self {
        FieldTypeBuilder::new().freeze()
    }
}

impl From<FieldTypeBuilder> for FieldType {
    fn from(builder: FieldTypeBuilder) -> Self {
        builder.freeze()
    }
}

impl From<FieldType> for FieldTypeBuilder {
    fn from(field_type: FieldType) -> Self {
        field_type.0
    }
}

impl IndexableFieldType for FieldType {
    fn indexed(&self) -> bool {
        self.0.indexed
    }

    fn stored(&self) -> bool {
        self.0.stored
    }

    fn tokenized(&self) -> bool {
        self.0.tokenized
    }

    fn store_term_vectors(&self) -> bool {
        self.0.store_term_vectors
    }

    fn store_term_vector_offsets(&self) -> bool {
        self.0.store_term_vector_offsets
    }

    fn store_term_vector_positions(&self) -> bool {
        self.0.store_term_vector_positions
    }

    fn store_term_vector_payloads(&self) -> bool {
        self.0.store_term_vector_payloads
    }

    fn omit_norms(&self) -> bool {
        self.0.omit_norms
    }

    fn index_options(&self) -> IndexOptions {
        self.0.index_options
    }

    fn numeric_type(&self) -> Option<NumericType> {
        self.0.numeric_type
    }

    fn numeric_precision_step(&self) -> NonZeroU32 {
        self.0.numeric_precision_step
    }

    fn doc_values_type(&self) -> DocValuesType {
        self.0.doc_values_type
    }
}

impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldType").field(&self.to_string()).finish()
    }
}

/// Comma-separated list of the enabled properties, e.g.
/// `stored,indexed,tokenized,omitNorms`.
impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.0;
        let mut parts: Vec<String> = Vec::new();
        if t.stored {
            parts.push("stored".to_string());
        }
        if t.indexed {
            parts.push("indexed".to_string());
            if t.tokenized {
                parts.push("tokenized".to_string());
            }
            if t.store_term_vectors {
                parts.push("termVector".to_string());
            }
            if t.store_term_vector_offsets {
                parts.push("termVectorOffsets".to_string());
            }
            if t.store_term_vector_positions {
                parts.push("termVectorPosition".to_string());
            }
            if t.store_term_vector_payloads {
                parts.push("termVectorPayloads".to_string());
            }
            if t.omit_norms {
                parts.push("omitNorms".to_string());
            }
            if t.index_options != IndexOptions::DocsAndFreqsAndPositions {
                parts.push(format!("indexOptions={}", t.index_options));
            }
            if let Some(numeric_type) = t.numeric_type {
                parts.push(format!(
                    "numericType={numeric_type},numericPrecisionStep={}",
                    t.numeric_precision_step
                ));
            }
        }
        if t.doc_values_type != DocValuesType::None {
            parts.push(format!("docValueType={}", t.doc_values_type));
        }
        f.write_str(&parts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let field_type = FieldType::default();
        assert!(!field_type.indexed());
        assert!(!field_type.stored());
        assert!(field_type.tokenized());
        assert_eq!(
            field_type.index_options(),
            IndexOptions::DocsAndFreqsAndPositions
        );
        assert_eq!(field_type.numeric_type(), None);
        assert_eq!(field_type.numeric_precision_step().get(), 4);
        assert_eq!(field_type.doc_values_type(), DocValuesType::None);
        assert_eq!(field_type.to_string(), "");
    }

    #[test]
    fn test_to_builder_leaves_original_unchanged() {
        const BASE: FieldType = FieldTypeBuilder::new().indexed(true).freeze();

        let derived = BASE
            .to_builder()
            .stored(true)
            .omit_norms(true)
            .freeze();

        assert!(!BASE.stored());
        assert!(!BASE.omit_norms());
        assert!(derived.stored());
        assert!(derived.omit_norms());
        assert_ne!(BASE, derived);
    }

    #[test]
    fn test_display() {
        let field_type = FieldTypeBuilder::new()
            .indexed(true)
            .tokenized(false)
            .store_term_vectors(true)
            .store_term_vector_positions(true)
            .omit_norms(true)
            .numeric_type(Some(NumericType::Long))
            .doc_values_type(DocValuesType::SortedSet)
            .freeze();

        assert_eq!(
            field_type.to_string(),
            "indexed,termVector,termVectorPosition,omitNorms,\
             numericType=LONG,numericPrecisionStep=4,docValueType=SORTED_SET"
        );

        let doc_values_only = FieldTypeBuilder::new()
            .doc_values_type(DocValuesType::Numeric)
            .freeze();
        assert_eq!(doc_values_only.to_string(), "docValueType=NUMERIC");
    }

    #[test]
    fn test_precision_step_must_be_positive() {
        let builder = FieldTypeBuilder::new();
        assert!(builder.try_numeric_precision_step(0).is_err());
        assert_eq!(
            builder
                .try_numeric_precision_step(8)
                .unwrap()
                .numeric_precision_step
                .get(),
            8
        );
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let field_type = FieldType::from_json(
            r#"{"indexed": true, "stored": true, "index_options": "docs_only",
                "numeric_type": "int", "numeric_precision_step": 8}"#,
        )
        .unwrap();

        assert!(field_type.indexed());
        assert!(field_type.tokenized());
        assert_eq!(field_type.index_options(), IndexOptions::DocsOnly);
        assert_eq!(field_type.numeric_type(), Some(NumericType::Int));
        assert_eq!(field_type.numeric_precision_step().get(), 8);

        assert!(FieldType::from_json(r#"{"numeric_precision_step": 0}"#).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let field_type = FieldTypeBuilder::new()
            .stored(true)
            .doc_values_type(DocValuesType::Binary)
            .freeze();
        let json = serde_json::to_string(&field_type).unwrap();
        assert_eq!(FieldType::from_json(&json).unwrap(), field_type);
    }

    #[test]
    fn test_index_options_capabilities() {
        assert!(!IndexOptions::DocsOnly.has_freqs());
        assert!(IndexOptions::DocsAndFreqs.has_freqs());
        assert!(!IndexOptions::DocsAndFreqs.has_positions());
        assert!(IndexOptions::DocsAndFreqsAndPositionsAndOffsets.has_offsets());
    }
}
