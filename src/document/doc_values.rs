//! Doc-values fields.
//!
//! These fields skip analysis entirely. Each kind fixes the
//! [`DocValuesType`] of its frozen field type, and the column-store writer
//! picks its encoding from that tag. Convert them into a [`Field`] (or pass
//! them straight to [`Document::add`](super::document::Document::add)).
//!
//! [`FloatDocValuesField`] and [`DoubleDocValuesField`] store the raw IEEE
//! bits of their value in a numeric (`i64`) doc value. This is a bit cast,
//! not a numeric conversion:
//!
//! ```
//! use lexis::document::doc_values::{DoubleDocValuesField, FloatDocValuesField};
//!
//! assert_eq!(FloatDocValuesField::encode(1.0), 0x3f80_0000);
//! assert_eq!(FloatDocValuesField::encode(-1.0), 0xbf80_0000_u32 as i32 as i64);
//! assert_eq!(DoubleDocValuesField::encode(1.0), 0x3ff0_0000_0000_0000);
//! assert_eq!(FloatDocValuesField::decode(FloatDocValuesField::encode(0.1)), 0.1);
//! ```

use std::ops::{Deref, DerefMut};

use crate::document::field::Field;
use crate::document::field_type::{DocValuesType, FieldType, FieldTypeBuilder};
use crate::document::field_value::{FieldValue, NumericValue};
use crate::error::Result;
use crate::util::bytes_ref::BytesRef;

const fn doc_values_type(doc_values_type: DocValuesType) -> FieldType {
    FieldTypeBuilder::new()
        .doc_values_type(doc_values_type)
        .freeze()
}

macro_rules! field_wrapper {
    ($name:ident) => {
        impl $name {
            pub fn into_field(self) -> Field {
                self.0
            }
        }

        impl Deref for $name {
            type Target = Field;

            fn deref(&self) -> &Field {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Field {
                &mut self.0
            }
        }

        impl From<$name> for Field {
            fn from(field: $name) -> Field {
                field.0
            }
        }
    };
}

/// One `i64` per document, for sorting, faceting and scoring.
#[derive(Debug)]
pub struct NumericDocValuesField(Field);

impl NumericDocValuesField {
    pub const TYPE: FieldType = doc_values_type(DocValuesType::Numeric);

    pub fn new<S: Into<String>>(name: S, value: i64) -> Self {
        NumericDocValuesField(Field::from_parts(
            name,
            Self::TYPE,
            FieldValue::Numeric(NumericValue::Long(value)),
        ))
    }
}

field_wrapper!(NumericDocValuesField);

/// One `f32` per document, stored as its raw bits widened to `i64`.
#[derive(Debug)]
pub struct FloatDocValuesField(Field);

impl FloatDocValuesField {
    pub fn new<S: Into<String>>(name: S, value: f32) -> Self {
        FloatDocValuesField(NumericDocValuesField::new(name, Self::encode(value)).into_field())
    }

    /// Sign-extended raw bits of `value`.
    pub fn encode(value: f32) -> i64 {
        i64::from(value.to_bits() as i32)
    }

    /// Inverse of [`encode`](Self::encode).
    pub fn decode(bits: i64) -> f32 {
        f32::from_bits(bits as i32 as u32)
    }

    pub fn set_float_value(&mut self, value: f32) -> Result<()> {
        self.0.set_long_value(Self::encode(value))
    }
}

field_wrapper!(FloatDocValuesField);

/// One `f64` per document, stored as its raw bits.
#[derive(Debug)]
pub struct DoubleDocValuesField(Field);

impl DoubleDocValuesField {
    pub fn new<S: Into<String>>(name: S, value: f64) -> Self {
        DoubleDocValuesField(NumericDocValuesField::new(name, Self::encode(value)).into_field())
    }

    /// Raw bits of `value`.
    pub fn encode(value: f64) -> i64 {
        value.to_bits() as i64
    }

    /// Inverse of [`encode`](Self::encode).
    pub fn decode(bits: i64) -> f64 {
        f64::from_bits(bits as u64)
    }

    pub fn set_double_value(&mut self, value: f64) -> Result<()> {
        self.0.set_long_value(Self::encode(value))
    }
}

field_wrapper!(DoubleDocValuesField);

/// One arbitrary byte sequence per document.
#[derive(Debug)]
pub struct BinaryDocValuesField(Field);

impl BinaryDocValuesField {
    pub const TYPE: FieldType = doc_values_type(DocValuesType::Binary);

    /// The bytes are moved into the field, not copied.
    pub fn new<S, B>(name: S, value: B) -> Self
    where
        S: Into<String>,
        B: Into<BytesRef>,
    {
        BinaryDocValuesField(Field::from_parts(
            name,
            Self::TYPE,
            FieldValue::Binary(value.into()),
        ))
    }
}

field_wrapper!(BinaryDocValuesField);

/// One byte sequence per document, deduplicated and sorted across the
/// segment.
#[derive(Debug)]
pub struct SortedDocValuesField(Field);

impl SortedDocValuesField {
    pub const TYPE: FieldType = doc_values_type(DocValuesType::Sorted);

    pub fn new<S, B>(name: S, value: B) -> Self
    where
        S: Into<String>,
        B: Into<BytesRef>,
    {
        SortedDocValuesField(Field::from_parts(
            name,
            Self::TYPE,
            FieldValue::Binary(value.into()),
        ))
    }
}

field_wrapper!(SortedDocValuesField);

/// A set of byte sequences per document. Add one field per value, all under
/// the same name.
#[derive(Debug)]
pub struct SortedSetDocValuesField(Field);

impl SortedSetDocValuesField {
    pub const TYPE: FieldType = doc_values_type(DocValuesType::SortedSet);

    pub fn new<S, B>(name: S, value: B) -> Self
    where
        S: Into<String>,
        B: Into<BytesRef>,
    {
        SortedSetDocValuesField(Field::from_parts(
            name,
            Self::TYPE,
            FieldValue::Binary(value.into()),
        ))
    }
}

field_wrapper!(SortedSetDocValuesField);
