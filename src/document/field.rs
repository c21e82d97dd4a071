//! The general-purpose field.
//!
//! A [`Field`] binds a name, a frozen [`FieldType`] and one [`FieldValue`].
//! Constructors reject value and type combinations that make no sense for an
//! index writer, and the value setters only accept a payload of the shape the
//! field was built with. That lets a single field be refilled document after
//! document without allocating:
//!
//! ```
//! use lexis::document::field::{Field, IndexableField};
//! use lexis::document::fields::StringField;
//!
//! let mut id = Field::new("id", "doc-1", StringField::TYPE_STORED).unwrap();
//! for n in 2..4 {
//!     id.set_string_value(format!("doc-{n}")).unwrap();
//! }
//! assert_eq!(id.string_value().as_deref(), Some("doc-3"));
//!
//! // The shape is fixed: a string field cannot become a number.
//! assert!(id.set_long_value(3).is_err());
//! ```
//!
//! The convenience kinds in [`fields`](super::fields) and
//! [`doc_values`](super::doc_values) build fields with predefined types.

use std::borrow::Cow;
use std::fmt;
use std::io::{Cursor, Read};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::numeric_token_stream::NumericTokenStream;
use crate::analysis::token_stream::{StringTokenStream, TokenStream};
use crate::document::field_type::{FieldType, NumericType};
use crate::document::field_value::{FieldShape, FieldValue, NumericValue};
use crate::error::{LexisError, Result};
use crate::util::bytes_ref::BytesRef;

/// Whether a convenience field stores its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Store {
    Yes,
    No,
}

impl Store {
    pub const fn is_stored(&self) -> bool {
        matches!(self, Store::Yes)
    }
}

impl From<bool> for Store {
    fn from(stored: bool) -> Self {
        if stored { Store::Yes } else { Store::No }
    }
}

/// The contract between a document field and an index writer.
///
/// At most one of the value accessors returns a value. Fields carrying a
/// pre-analyzed token stream expose it through
/// [`token_stream_value`](IndexableField::token_stream_value) only.
pub trait IndexableField: Send {
    fn name(&self) -> &str;

    fn field_type(&self) -> &FieldType;

    /// Index-time boost, 1.0 unless set.
    fn boost(&self) -> f32;

    /// The value as text. Numbers are rendered in decimal.
    fn string_value(&self) -> Option<Cow<'_, str>>;

    fn reader_value(&mut self) -> Option<&mut (dyn Read + Send)>;

    fn binary_value(&self) -> Option<&BytesRef>;

    fn numeric_value(&self) -> Option<NumericValue>;

    fn token_stream_value(&mut self) -> Option<&mut dyn TokenStream>;

    /// The tokens to index for this field, or `None` if it is not indexed.
    ///
    /// Numeric fields yield their trie terms, untokenized fields yield their
    /// whole string as a single token, and tokenized fields yield either the
    /// token stream they were given or the analysis of their text by
    /// `analyzer`.
    fn token_stream(&mut self, analyzer: &dyn Analyzer)
    -> Result<Option<&mut dyn TokenStream>>;
}

/// A named, typed value of a document.
pub struct Field {
    name: String,
    field_type: FieldType,
    value: FieldValue,
    boost: f32,
    /// Token stream set on a field that also has a text value.
    supplied_stream: Option<Box<dyn TokenStream>>,
    numeric_stream: Option<NumericTokenStream>,
    string_stream: Option<StringTokenStream>,
    analyzed_stream: Option<Box<dyn TokenStream>>,
}

impl Field {
    /// Build a field without validating the value against the type.
    pub(crate) fn from_parts<S: Into<String>>(
        name: S,
        field_type: FieldType,
        value: FieldValue,
    ) -> Self {
        Field {
            name: name.into(),
            field_type,
            value,
            boost: 1.0,
            supplied_stream: None,
            numeric_stream: None,
            string_stream: None,
            analyzed_stream: None,
        }
    }

    fn check_not_numeric(field_type: &FieldType, shape: FieldShape) -> Result<()> {
        match field_type.numeric_type() {
            Some(numeric_type) if field_type.indexed() => Err(LexisError::invalid_argument(
                format!("type.numericType() is {numeric_type} but the value is a {shape}"),
            )),
            _ => Ok(()),
        }
    }

    /// Create a field with a string value.
    ///
    /// The type must be indexed or stored, and term vectors require indexing.
    pub fn new<S, V>(name: S, value: V, field_type: FieldType) -> Result<Self>
    where
        S: Into<String>,
        V: Into<String>,
    {
        if !field_type.stored() && !field_type.indexed() {
            return Err(LexisError::invalid_argument(
                "it doesn't make sense to have a field that is neither indexed nor stored",
            ));
        }
        if !field_type.indexed() && field_type.store_term_vectors() {
            return Err(LexisError::invalid_argument(
                "cannot store term vector information for a field that is not indexed",
            ));
        }
        Self::check_not_numeric(&field_type, FieldShape::String)?;
        Ok(Self::from_parts(
            name,
            field_type,
            FieldValue::String(value.into()),
        ))
    }

    /// Create a field whose text is read at analysis time.
    pub fn from_reader<S: Into<String>>(
        name: S,
        reader: Box<dyn Read + Send>,
        field_type: FieldType,
    ) -> Result<Self> {
        if field_type.stored() {
            return Err(LexisError::invalid_argument(
                "fields with a Reader value cannot be stored",
            ));
        }
        if field_type.indexed() && !field_type.tokenized() {
            return Err(LexisError::invalid_argument(
                "non-tokenized fields must use String values",
            ));
        }
        Self::check_not_numeric(&field_type, FieldShape::Reader)?;
        Ok(Self::from_parts(name, field_type, FieldValue::Reader(reader)))
    }

    /// Create a field from tokens analyzed ahead of time.
    pub fn from_token_stream<S: Into<String>>(
        name: S,
        stream: Box<dyn TokenStream>,
        field_type: FieldType,
    ) -> Result<Self> {
        if !field_type.indexed() || !field_type.tokenized() {
            return Err(LexisError::invalid_argument(
                "TokenStream fields must be indexed and tokenized",
            ));
        }
        if field_type.stored() {
            return Err(LexisError::invalid_argument(
                "TokenStream fields cannot be stored",
            ));
        }
        Self::check_not_numeric(&field_type, FieldShape::TokenStream)?;
        Ok(Self::from_parts(
            name,
            field_type,
            FieldValue::TokenStream(stream),
        ))
    }

    /// Create a binary field.
    ///
    /// The bytes are moved into the field, not copied. Binary values cannot
    /// be indexed.
    pub fn from_bytes<S, B>(name: S, bytes: B, field_type: FieldType) -> Result<Self>
    where
        S: Into<String>,
        B: Into<BytesRef>,
    {
        if field_type.indexed() {
            return Err(LexisError::invalid_argument(
                "Fields with BytesRef values cannot be indexed",
            ));
        }
        Ok(Self::from_parts(
            name,
            field_type,
            FieldValue::Binary(bytes.into()),
        ))
    }

    /// Create a numeric field.
    ///
    /// An indexed numeric value needs a type with a matching numeric type.
    pub fn from_numeric<S, V>(name: S, value: V, field_type: FieldType) -> Result<Self>
    where
        S: Into<String>,
        V: Into<NumericValue>,
    {
        let value = value.into();
        match field_type.numeric_type() {
            Some(numeric_type) if numeric_type != value.numeric_type() => {
                return Err(LexisError::invalid_argument(format!(
                    "type.numericType() must be {numeric_type} but got {}",
                    value.numeric_type()
                )));
            }
            None if field_type.indexed() => {
                return Err(LexisError::invalid_argument(
                    "indexed numeric values require a field type with a numeric type",
                ));
            }
            _ => {}
        }
        Ok(Self::from_parts(name, field_type, FieldValue::Numeric(value)))
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn shape(&self) -> FieldShape {
        self.value.shape()
    }

    fn check_shape(&self, requested: FieldShape) -> Result<()> {
        let existing = self.value.shape();
        if existing != requested {
            return Err(LexisError::shape_mismatch(existing, requested));
        }
        Ok(())
    }

    pub fn set_string_value<V: Into<String>>(&mut self, value: V) -> Result<()> {
        self.check_shape(FieldShape::String)?;
        self.value = FieldValue::String(value.into());
        Ok(())
    }

    pub fn set_reader_value(&mut self, reader: Box<dyn Read + Send>) -> Result<()> {
        self.check_shape(FieldShape::Reader)?;
        self.value = FieldValue::Reader(reader);
        Ok(())
    }

    pub fn set_bytes_value<B: Into<BytesRef>>(&mut self, bytes: B) -> Result<()> {
        self.check_shape(FieldShape::Binary)?;
        if self.field_type.indexed() {
            return Err(LexisError::invalid_argument(
                "cannot set a BytesRef value on an indexed field",
            ));
        }
        self.value = FieldValue::Binary(bytes.into());
        Ok(())
    }

    pub fn set_int_value(&mut self, value: i32) -> Result<()> {
        self.set_numeric_value(NumericValue::Int(value))
    }

    pub fn set_long_value(&mut self, value: i64) -> Result<()> {
        self.set_numeric_value(NumericValue::Long(value))
    }

    pub fn set_float_value(&mut self, value: f32) -> Result<()> {
        self.set_numeric_value(NumericValue::Float(value))
    }

    pub fn set_double_value(&mut self, value: f64) -> Result<()> {
        self.set_numeric_value(NumericValue::Double(value))
    }

    fn set_numeric_value(&mut self, value: NumericValue) -> Result<()> {
        self.check_shape(value.shape())?;
        self.value = FieldValue::Numeric(value);
        Ok(())
    }

    /// Supply pre-analyzed tokens, used instead of analyzing the text value.
    pub fn set_token_stream(&mut self, stream: Box<dyn TokenStream>) -> Result<()> {
        if !self.field_type.indexed() || !self.field_type.tokenized() {
            return Err(LexisError::invalid_argument(
                "TokenStream fields must be indexed and tokenized",
            ));
        }
        if self.field_type.numeric_type().is_some() {
            return Err(LexisError::invalid_argument(
                "cannot set private TokenStream on numeric fields",
            ));
        }
        match &mut self.value {
            FieldValue::TokenStream(current) => *current = stream,
            _ => self.supplied_stream = Some(stream),
        }
        Ok(())
    }

    /// Set the index-time boost.
    ///
    /// A boost other than 1.0 needs an indexed field that keeps norms.
    pub fn set_boost(&mut self, boost: f32) -> Result<()> {
        if boost != 1.0 && (!self.field_type.indexed() || self.field_type.omit_norms()) {
            return Err(LexisError::invalid_argument(
                "You cannot set an index-time boost on an unindexed field, or one that omits norms",
            ));
        }
        self.boost = boost;
        Ok(())
    }

    fn numeric_token_stream(&mut self, numeric_type: NumericType) -> Result<&mut NumericTokenStream> {
        let value = match &self.value {
            FieldValue::Numeric(value) => *value,
            other => {
                return Err(LexisError::invalid_argument(format!(
                    "numeric field {} must have a numeric value, got {}",
                    self.name,
                    other.shape()
                )));
            }
        };

        let stream = match self.numeric_stream.take() {
            Some(stream) => stream,
            None => {
                debug!("{}: creating numeric token stream", self.name);
                NumericTokenStream::new(self.field_type.numeric_precision_step().get())?
            }
        };
        let stream = self.numeric_stream.insert(stream);
        match numeric_type {
            NumericType::Int => stream.set_int_value(value.as_i32())?,
            NumericType::Long => stream.set_long_value(value.as_i64())?,
            NumericType::Float => stream.set_float_value(value.as_f32())?,
            NumericType::Double => stream.set_double_value(value.as_f64())?,
        }
        Ok(stream)
    }

    fn string_token_stream(&mut self) -> Result<&mut StringTokenStream> {
        let value = match &self.value {
            FieldValue::String(value) => value,
            _ => {
                return Err(LexisError::invalid_argument(
                    "Non-Tokenized Fields must have a String value",
                ));
            }
        };

        let stream = match self.string_stream.take() {
            Some(stream) => stream,
            None => {
                debug!("{}: creating single-token stream", self.name);
                StringTokenStream::new()?
            }
        };
        let stream = self.string_stream.insert(stream);
        stream.set_value(value);
        Ok(stream)
    }
}

impl IndexableField for Field {
    fn name(&self) -> &str {
        &self.name
    }

    fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    fn boost(&self) -> f32 {
        self.boost
    }

    fn string_value(&self) -> Option<Cow<'_, str>> {
        match &self.value {
            FieldValue::String(value) => Some(Cow::Borrowed(value)),
            FieldValue::Numeric(value) => Some(Cow::Owned(value.to_string())),
            _ => None,
        }
    }

    fn reader_value(&mut self) -> Option<&mut (dyn Read + Send)> {
        match &mut self.value {
            FieldValue::Reader(reader) => {
                let reader: &mut (dyn Read + Send) = reader.as_mut();
                Some(reader)
            }
            _ => None,
        }
    }

    fn binary_value(&self) -> Option<&BytesRef> {
        self.value.as_bytes_ref()
    }

    fn numeric_value(&self) -> Option<NumericValue> {
        self.value.as_numeric()
    }

    fn token_stream_value(&mut self) -> Option<&mut dyn TokenStream> {
        if let Some(stream) = self.supplied_stream.as_mut() {
            let stream: &mut dyn TokenStream = stream.as_mut();
            return Some(stream);
        }
        match &mut self.value {
            FieldValue::TokenStream(stream) => {
                let stream: &mut dyn TokenStream = stream.as_mut();
                Some(stream)
            }
            _ => None,
        }
    }

    fn token_stream(
        &mut self,
        analyzer: &dyn Analyzer,
    ) -> Result<Option<&mut dyn TokenStream>> {
        if !self.field_type.indexed() {
            trace!("{}: not indexed, no token stream", self.name);
            return Ok(None);
        }

        if let Some(numeric_type) = self.field_type.numeric_type() {
            trace!("{}: numeric token stream ({numeric_type})", self.name);
            let stream: &mut dyn TokenStream = self.numeric_token_stream(numeric_type)?;
            return Ok(Some(stream));
        }

        if !self.field_type.tokenized() {
            trace!("{}: single-token stream", self.name);
            let stream: &mut dyn TokenStream = self.string_token_stream()?;
            return Ok(Some(stream));
        }

        if let Some(stream) = self.supplied_stream.as_mut() {
            trace!("{}: supplied token stream", self.name);
            let stream: &mut dyn TokenStream = stream.as_mut();
            return Ok(Some(stream));
        }

        let analyzed = match &mut self.value {
            FieldValue::TokenStream(stream) => {
                trace!("{}: supplied token stream", self.name);
                let stream: &mut dyn TokenStream = stream.as_mut();
                return Ok(Some(stream));
            }
            FieldValue::Reader(reader) => {
                trace!("{}: analyzing reader value", self.name);
                analyzer.token_stream(&self.name, reader.as_mut())?
            }
            FieldValue::String(value) => {
                trace!("{}: analyzing string value", self.name);
                analyzer.token_stream(&self.name, &mut Cursor::new(value.as_bytes()))?
            }
            other => {
                return Err(LexisError::invalid_argument(format!(
                    "Field must have either TokenStream, String, Reader or Number value; \
                     field {} has a {} value",
                    self.name,
                    other.shape()
                )));
            }
        };

        let stream: &mut dyn TokenStream = self.analyzed_stream.insert(analyzed).as_mut();
        Ok(Some(stream))
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("value", &self.value)
            .field("boost", &self.boost)
            .field("supplied_stream", &self.supplied_stream.is_some())
            .finish()
    }
}

/// Renders as `type<name:value>`, e.g. `stored,indexed,tokenized<title:Rust>`.
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{}:{}>", self.field_type, self.name, self.value)
    }
}
