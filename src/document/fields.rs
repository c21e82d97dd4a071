//! Convenience field kinds with predefined field types.
//!
//! Each kind exposes its frozen types as associated constants and builds
//! plain [`Field`] values:
//!
//! - [`TextField`] - Analyzed full text
//! - [`StringField`] - A single untokenized term, such as an identifier
//! - [`StoredField`] - A stored-only value of any shape
//! - [`IntField`], [`LongField`], [`FloatField`], [`DoubleField`] - Trie-indexed numbers
//!
//! # Examples
//!
//! ```
//! use lexis::document::field::{IndexableField, Store};
//! use lexis::document::fields::{IntField, StringField, TextField};
//!
//! let title = TextField::new("title", "Rust in Action", Store::Yes);
//! let isbn = StringField::new("isbn", "978-1617294556", Store::Yes);
//! let pages = IntField::new("pages", 456, Store::No);
//!
//! assert!(title.field_type().tokenized());
//! assert!(!isbn.field_type().tokenized());
//! assert_eq!(pages.numeric_value().map(|v| v.as_i32()), Some(456));
//! ```

use std::io::Read;

use crate::analysis::token_stream::TokenStream;
use crate::document::field::{Field, Store};
use crate::document::field_type::{FieldType, FieldTypeBuilder, IndexOptions, NumericType};
use crate::document::field_value::{FieldValue, NumericValue};
use crate::error::{LexisError, Result};
use crate::util::bytes_ref::BytesRef;

/// Indexed and tokenized text. Term vectors are off.
#[derive(Debug, Clone, Copy)]
pub struct TextField;

impl TextField {
    pub const TYPE_NOT_STORED: FieldType = FieldTypeBuilder::new()
        .indexed(true)
        .tokenized(true)
        .freeze();

    pub const TYPE_STORED: FieldType = FieldTypeBuilder::new()
        .indexed(true)
        .tokenized(true)
        .stored(true)
        .freeze();

    pub fn new<S, V>(name: S, value: V, store: Store) -> Field
    where
        S: Into<String>,
        V: Into<String>,
    {
        let field_type = if store.is_stored() {
            Self::TYPE_STORED
        } else {
            Self::TYPE_NOT_STORED
        };
        Field::from_parts(name, field_type, FieldValue::String(value.into()))
    }

    /// Text read at analysis time. Reader values are never stored.
    pub fn from_reader<S: Into<String>>(name: S, reader: Box<dyn Read + Send>) -> Field {
        Field::from_parts(name, Self::TYPE_NOT_STORED, FieldValue::Reader(reader))
    }

    pub fn from_token_stream<S: Into<String>>(name: S, stream: Box<dyn TokenStream>) -> Field {
        Field::from_parts(
            name,
            Self::TYPE_NOT_STORED,
            FieldValue::TokenStream(stream),
        )
    }
}

/// Indexed verbatim as one token, without norms or frequencies.
#[derive(Debug, Clone, Copy)]
pub struct StringField;

impl StringField {
    pub const TYPE_NOT_STORED: FieldType = FieldTypeBuilder::new()
        .indexed(true)
        .omit_norms(true)
        .index_options(IndexOptions::DocsOnly)
        .tokenized(false)
        .freeze();

    pub const TYPE_STORED: FieldType = StringField::TYPE_NOT_STORED
        .to_builder()
        .stored(true)
        .freeze();

    pub fn new<S, V>(name: S, value: V, store: Store) -> Field
    where
        S: Into<String>,
        V: Into<String>,
    {
        let field_type = if store.is_stored() {
            Self::TYPE_STORED
        } else {
            Self::TYPE_NOT_STORED
        };
        Field::from_parts(name, field_type, FieldValue::String(value.into()))
    }
}

/// A value that is only stored, never indexed.
#[derive(Debug, Clone, Copy)]
pub struct StoredField;

impl StoredField {
    pub const TYPE: FieldType = FieldTypeBuilder::new().stored(true).freeze();

    pub fn new<S, V>(name: S, value: V) -> Field
    where
        S: Into<String>,
        V: Into<String>,
    {
        Field::from_parts(name, Self::TYPE, FieldValue::String(value.into()))
    }

    /// The bytes are moved into the field, not copied.
    pub fn from_bytes<S, B>(name: S, bytes: B) -> Field
    where
        S: Into<String>,
        B: Into<BytesRef>,
    {
        Field::from_parts(name, Self::TYPE, FieldValue::Binary(bytes.into()))
    }

    pub fn from_int<S: Into<String>>(name: S, value: i32) -> Field {
        Field::from_parts(name, Self::TYPE, FieldValue::Numeric(NumericValue::Int(value)))
    }

    pub fn from_long<S: Into<String>>(name: S, value: i64) -> Field {
        Field::from_parts(name, Self::TYPE, FieldValue::Numeric(NumericValue::Long(value)))
    }

    pub fn from_float<S: Into<String>>(name: S, value: f32) -> Field {
        Field::from_parts(name, Self::TYPE, FieldValue::Numeric(NumericValue::Float(value)))
    }

    pub fn from_double<S: Into<String>>(name: S, value: f64) -> Field {
        Field::from_parts(name, Self::TYPE, FieldValue::Numeric(NumericValue::Double(value)))
    }
}

const fn numeric_type(numeric_type: NumericType, stored: bool) -> FieldType {
    FieldTypeBuilder::new()
        .indexed(true)
        .tokenized(true)
        .omit_norms(true)
        .index_options(IndexOptions::DocsOnly)
        .numeric_type(Some(numeric_type))
        .stored(stored)
        .freeze()
}

fn check_numeric_type(field_type: &FieldType, expected: NumericType) -> Result<()> {
    match field_type.numeric_type() {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => Err(LexisError::invalid_argument(format!(
            "type.numericType() must be {expected} but got {actual}"
        ))),
        None => Err(LexisError::invalid_argument(format!(
            "type.numericType() must be {expected} but got none"
        ))),
    }
}

macro_rules! numeric_field {
    ($(#[$doc:meta])* $name:ident, $value:ty, $numeric_type:expr, $variant:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl $name {
            pub const TYPE_NOT_STORED: FieldType = numeric_type($numeric_type, false);

            pub const TYPE_STORED: FieldType = numeric_type($numeric_type, true);

            pub fn new<S: Into<String>>(name: S, value: $value, store: Store) -> Field {
                let field_type = if store.is_stored() {
                    Self::TYPE_STORED
                } else {
                    Self::TYPE_NOT_STORED
                };
                Field::from_parts(
                    name,
                    field_type,
                    FieldValue::Numeric(NumericValue::$variant(value)),
                )
            }

            /// Build with a custom type, e.g. another precision step. The
            /// type's numeric type must match.
            pub fn with_type<S: Into<String>>(
                name: S,
                value: $value,
                field_type: FieldType,
            ) -> Result<Field> {
                check_numeric_type(&field_type, $numeric_type)?;
                Ok(Field::from_parts(
                    name,
                    field_type,
                    FieldValue::Numeric(NumericValue::$variant(value)),
                ))
            }
        }
    };
}

numeric_field!(
    /// A 32-bit integer indexed for range queries.
    IntField, i32, NumericType::Int, Int
);
numeric_field!(
    /// A 64-bit integer indexed for range queries.
    LongField, i64, NumericType::Long, Long
);
numeric_field!(
    /// A 32-bit float indexed for range queries.
    FloatField, f32, NumericType::Float, Float
);
numeric_field!(
    /// A 64-bit float indexed for range queries.
    DoubleField, f64, NumericType::Double, Double
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::keyword::KeywordAnalyzer;
    use crate::analysis::numeric_token_stream::TOKEN_TYPE_FULL_PREC;
    use crate::analysis::token::collect_tokens;
    use crate::document::field::IndexableField;
    use crate::document::field_value::FieldShape;

    #[test]
    fn test_predefined_types() {
        assert_eq!(TextField::TYPE_STORED.to_string(), "stored,indexed,tokenized");
        assert_eq!(
            StringField::TYPE_NOT_STORED.to_string(),
            "indexed,omitNorms,indexOptions=DOCS_ONLY"
        );
        assert_eq!(StoredField::TYPE.to_string(), "stored");
        assert_eq!(
            LongField::TYPE_STORED.to_string(),
            "stored,indexed,tokenized,omitNorms,indexOptions=DOCS_ONLY,\
             numericType=LONG,numericPrecisionStep=4"
        );
    }

    #[test]
    fn test_string_field_is_one_token() {
        let mut field = StringField::new("id", "New York", Store::No);
        let stream = field.token_stream(&KeywordAnalyzer::new()).unwrap().unwrap();
        let tokens = collect_tokens(stream).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "New York");
    }

    #[test]
    fn test_stored_field_shapes() {
        assert_eq!(StoredField::new("s", "v").shape(), FieldShape::String);
        assert_eq!(StoredField::from_bytes("b", vec![1u8]).shape(), FieldShape::Binary);
        assert_eq!(StoredField::from_int("i", 1).shape(), FieldShape::Int);
        assert_eq!(StoredField::from_long("l", 1).shape(), FieldShape::Long);
        assert_eq!(StoredField::from_float("f", 1.0).shape(), FieldShape::Float);
        assert_eq!(StoredField::from_double("d", 1.0).shape(), FieldShape::Double);

        let mut field = StoredField::from_int("i", 1);
        assert!(field.token_stream(&KeywordAnalyzer::new()).unwrap().is_none());
    }

    #[test]
    fn test_numeric_field_reuse() {
        let mut field = DoubleField::new("price", 9.99, Store::Yes);
        let analyzer = KeywordAnalyzer::new();

        let first = collect_tokens(field.token_stream(&analyzer).unwrap().unwrap()).unwrap();
        field.set_double_value(19.99).unwrap();
        let second = collect_tokens(field.token_stream(&analyzer).unwrap().unwrap()).unwrap();

        assert_eq!(first.len(), 16);
        assert_eq!(second.len(), 16);
        assert_eq!(first[0].token_type, TOKEN_TYPE_FULL_PREC);
        assert_eq!(field.numeric_value(), Some(NumericValue::Double(19.99)));
    }

    #[test]
    fn test_with_type_checks_numeric_type() {
        let coarse = IntField::TYPE_NOT_STORED
            .to_builder()
            .try_numeric_precision_step(8)
            .unwrap()
            .freeze();
        let mut field = IntField::with_type("n", 7, coarse).unwrap();
        let tokens =
            collect_tokens(field.token_stream(&KeywordAnalyzer::new()).unwrap().unwrap()).unwrap();
        assert_eq!(tokens.len(), 4);

        assert!(IntField::with_type("n", 7, LongField::TYPE_NOT_STORED).is_err());
        assert!(IntField::with_type("n", 7, TextField::TYPE_NOT_STORED).is_err());
    }
}
