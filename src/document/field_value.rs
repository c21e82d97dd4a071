//! Field value representations.
//!
//! A field carries exactly one [`FieldValue`]. Its [`FieldShape`] is fixed
//! when the field is built: setters may replace the payload, never the shape.

use std::fmt;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::analysis::token_stream::TokenStream;
use crate::document::field_type::NumericType;
use crate::util::bytes_ref::BytesRef;

/// The kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldShape {
    String,
    Reader,
    Binary,
    TokenStream,
    Int,
    Long,
    Float,
    Double,
}

impl FieldShape {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldShape::String => "String",
            FieldShape::Reader => "Reader",
            FieldShape::Binary => "BytesRef",
            FieldShape::TokenStream => "TokenStream",
            FieldShape::Int => "Integer",
            FieldShape::Long => "Long",
            FieldShape::Float => "Float",
            FieldShape::Double => "Double",
        }
    }
}

impl fmt::Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A boxed number.
///
/// The `as_*` conversions follow Rust's `as` casts: floats truncate toward
/// zero and saturate, wide integers wrap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl NumericValue {
    pub const fn numeric_type(&self) -> NumericType {
        match self {
            NumericValue::Int(_) => NumericType::Int,
            NumericValue::Long(_) => NumericType::Long,
            NumericValue::Float(_) => NumericType::Float,
            NumericValue::Double(_) => NumericType::Double,
        }
    }

    pub const fn shape(&self) -> FieldShape {
        match self {
            NumericValue::Int(_) => FieldShape::Int,
            NumericValue::Long(_) => FieldShape::Long,
            NumericValue::Float(_) => FieldShape::Float,
            NumericValue::Double(_) => FieldShape::Double,
        }
    }

    pub fn as_i32(&self) -> i32 {
        match *self {
            NumericValue::Int(v) => v,
            NumericValue::Long(v) => v as i32,
            NumericValue::Float(v) => v as i32,
            NumericValue::Double(v) => v as i32,
        }
    }

    pub fn as_i64(&self) -> i64 {
        match *self {
            NumericValue::Int(v) => i64::from(v),
            NumericValue::Long(v) => v,
            NumericValue::Float(v) => v as i64,
            NumericValue::Double(v) => v as i64,
        }
    }

    pub fn as_f32(&self) -> f32 {
        match *self {
            NumericValue::Int(v) => v as f32,
            NumericValue::Long(v) => v as f32,
            NumericValue::Float(v) => v,
            NumericValue::Double(v) => v as f32,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            NumericValue::Int(v) => f64::from(v),
            NumericValue::Long(v) => v as f64,
            NumericValue::Float(v) => f64::from(v),
            NumericValue::Double(v) => v,
        }
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::Int(v) => write!(f, "{v}"),
            NumericValue::Long(v) => write!(f, "{v}"),
            NumericValue::Float(v) => write!(f, "{v}"),
            NumericValue::Double(v) => write!(f, "{v}"),
        }
    }
}

impl From<i32> for NumericValue {
    fn from(value: i32) -> Self {
        NumericValue::Int(value)
    }
}

impl From<i64> for NumericValue {
    fn from(value: i64) -> Self {
        NumericValue::Long(value)
    }
}

impl From<f32> for NumericValue {
    fn from(value: f32) -> Self {
        NumericValue::Float(value)
    }
}

impl From<f64> for NumericValue {
    fn from(value: f64) -> Self {
        NumericValue::Double(value)
    }
}

/// The value of a field.
pub enum FieldValue {
    /// Text, analyzed or indexed verbatim.
    String(String),
    /// Text read lazily by the analyzer. Never stored.
    Reader(Box<dyn Read + Send>),
    /// Raw bytes. Never indexed directly.
    Binary(BytesRef),
    /// Tokens analyzed ahead of time.
    TokenStream(Box<dyn TokenStream>),
    Numeric(NumericValue),
}

impl FieldValue {
    pub fn shape(&self) -> FieldShape {
        match self {
            FieldValue::String(_) => FieldShape::String,
            FieldValue::Reader(_) => FieldShape::Reader,
            FieldValue::Binary(_) => FieldShape::Binary,
            FieldValue::TokenStream(_) => FieldShape::TokenStream,
            FieldValue::Numeric(value) => value.shape(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bytes_ref(&self) -> Option<&BytesRef> {
        match self {
            FieldValue::Binary(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_numeric(&self) -> Option<NumericValue> {
        match self {
            FieldValue::Numeric(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(value) => f.debug_tuple("String").field(value).finish(),
            FieldValue::Reader(_) => f.write_str("Reader(..)"),
            FieldValue::Binary(value) => f.debug_tuple("Binary").field(value).finish(),
            FieldValue::TokenStream(_) => f.write_str("TokenStream(..)"),
            FieldValue::Numeric(value) => f.debug_tuple("Numeric").field(value).finish(),
        }
    }
}

/// Renders the payload; readers and token streams render as nothing.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(value) => f.write_str(value),
            FieldValue::Binary(value) => write!(f, "{value}"),
            FieldValue::Numeric(value) => write!(f, "{value}"),
            FieldValue::Reader(_) | FieldValue::TokenStream(_) => Ok(()),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<BytesRef> for FieldValue {
    fn from(value: BytesRef) -> Self {
        FieldValue::Binary(value)
    }
}

impl From<NumericValue> for FieldValue {
    fn from(value: NumericValue) -> Self {
        FieldValue::Numeric(value)
    }
}
