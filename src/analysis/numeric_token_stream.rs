//! Token stream that indexes a number as a trie of prefix-coded terms.
//!
//! For a precision step `p` the stream emits the full-precision term first
//! (type `fullPrecNumeric`, position increment 1) and then the value with
//! `p`, `2p`, ... low bits stripped (type `lowerPrecNumeric`, position
//! increment 0), until the shift reaches the bit width of the value. The
//! terms are only available in binary form through
//! [`TermToBytesRefAttribute`]; registering a [`CharTermAttribute`] on this
//! stream fails.
//!
//! # Examples
//!
//! ```
//! use lexis::analysis::numeric_token_stream::NumericTokenStream;
//! use lexis::analysis::token_stream::TokenStream;
//!
//! let mut stream = NumericTokenStream::new(8).unwrap();
//! stream.set_int_value(42).unwrap();
//! stream.reset().unwrap();
//!
//! let mut count = 0;
//! while stream.increment_token().unwrap() {
//!     count += 1;
//! }
//! assert_eq!(count, 4);
//! ```

use std::sync::Arc;

use crate::analysis::attribute::{
    AttrRef, Attribute, AttributeFactory, AttributeImpl, AttributeSource, Capability,
    DefaultAttributeFactory, downcast_target,
};
use crate::analysis::token_attributes::{
    CharTermAttribute, PositionIncrementAttribute, TermToBytesRefAttribute, TypeAttribute,
};
use crate::analysis::token_stream::TokenStream;
use crate::error::{LexisError, Result};
use crate::util::bytes_ref::BytesRef;
use crate::util::numeric_utils::{
    self, BUF_SIZE_LONG, double_to_sortable_long, float_to_sortable_int,
};

/// Type of the full-precision term.
pub const TOKEN_TYPE_FULL_PREC: &str = "fullPrecNumeric";

/// Type of the terms with low bits stripped.
pub const TOKEN_TYPE_LOWER_PREC: &str = "lowerPrecNumeric";

/// State of the numeric term being emitted.
pub trait NumericTermAttribute {
    /// Bits stripped from the current term.
    fn shift(&self) -> u32;

    /// The value as a sortable 64-bit integer (floats are already converted).
    fn raw_value(&self) -> i64;

    /// Bit width of the value: 32, 64, or 0 when no value was set.
    fn value_size(&self) -> u32;

    /// Load a value and restart the shift sequence.
    fn init(&mut self, value: i64, value_size: u32, precision_step: u32);

    /// Advance to the next shift and return it.
    fn increment_shift(&mut self) -> u32;
}

impl Attribute for dyn NumericTermAttribute {
    const NAME: &'static str = "NumericTermAttribute";

    fn create_default() -> Box<dyn AttributeImpl> {
        Box::new(NumericTermAttributeImpl::default())
    }

    fn view(imp: &dyn AttributeImpl) -> Option<&Self> {
        imp.as_any()
            .downcast_ref::<NumericTermAttributeImpl>()
            .map(|a| a as &dyn NumericTermAttribute)
    }

    fn view_mut(imp: &mut dyn AttributeImpl) -> Option<&mut Self> {
        imp.as_any_mut()
            .downcast_mut::<NumericTermAttributeImpl>()
            .map(|a| a as &mut dyn NumericTermAttribute)
    }
}

/// Default implementation of [`NumericTermAttribute`] and [`TermToBytesRefAttribute`].
#[derive(Clone, Debug)]
pub struct NumericTermAttributeImpl {
    value: i64,
    value_size: u32,
    precision_step: u32,
    // None until the first increment_shift after init
    shift: Option<u32>,
    bytes: BytesRef,
}

// `bytes` is scratch space for the encoded term.
impl PartialEq for NumericTermAttributeImpl {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.value_size == other.value_size
            && self.precision_step == other.precision_step
            && self.shift == other.shift
    }
}

impl Default for NumericTermAttributeImpl {
    fn default() -> Self {
        NumericTermAttributeImpl {
            value: 0,
            value_size: 0,
            precision_step: 0,
            shift: None,
            bytes: BytesRef::with_capacity(BUF_SIZE_LONG),
        }
    }
}

impl NumericTermAttribute for NumericTermAttributeImpl {
    fn shift(&self) -> u32 {
        self.shift.unwrap_or(0)
    }

    fn raw_value(&self) -> i64 {
        self.value
    }

    fn value_size(&self) -> u32 {
        self.value_size
    }

    fn init(&mut self, value: i64, value_size: u32, precision_step: u32) {
        self.value = value;
        self.value_size = value_size;
        self.precision_step = precision_step;
        self.shift = None;
    }

    fn increment_shift(&mut self) -> u32 {
        let next = match self.shift {
            None => 0,
            Some(shift) => shift.saturating_add(self.precision_step),
        };
        self.shift = Some(next);
        next
    }
}

impl TermToBytesRefAttribute for NumericTermAttributeImpl {
    fn fill_bytes_ref(&mut self) -> Result<()> {
        match self.value_size {
            64 => numeric_utils::long_to_prefix_coded(self.value, self.shift(), &mut self.bytes),
            32 => numeric_utils::int_to_prefix_coded(
                self.value as i32,
                self.shift(),
                &mut self.bytes,
            ),
            _ => Err(LexisError::invalid_operation(
                "call set_*_value() before usage",
            )),
        }
    }

    fn bytes_ref(&self) -> &BytesRef {
        &self.bytes
    }
}

impl AttributeImpl for NumericTermAttributeImpl {
    fn capabilities(&self) -> Vec<Capability> {
        vec![
            Capability::of::<dyn NumericTermAttribute>(),
            Capability::of::<dyn TermToBytesRefAttribute>(),
        ]
    }

    // The value and shift are driven by the stream, not by per-token clearing.
    fn clear(&mut self) {}

    fn copy_to(&self, target: &mut dyn AttributeImpl) -> Result<()> {
        let target = downcast_target::<Self>(target, <dyn NumericTermAttribute>::NAME)?;
        target.init(self.value, self.value_size, self.precision_step);
        target.shift = self.shift;
        Ok(())
    }

    fn reflect(&self, reflector: &mut dyn FnMut(&'static str, String)) {
        let mut bytes = self.bytes.clone();
        let encoded = match self.value_size {
            64 => numeric_utils::long_to_prefix_coded(self.value, self.shift(), &mut bytes),
            32 => numeric_utils::int_to_prefix_coded(self.value as i32, self.shift(), &mut bytes),
            _ => Err(LexisError::invalid_operation("no value")),
        };
        if encoded.is_err() {
            bytes.clear();
        }
        reflector("bytes", bytes.to_string());
        reflector("shift", self.shift().to_string());
        reflector("rawValue", self.value.to_string());
        reflector("valueSize", self.value_size.to_string());
    }
}

/// Factory for numeric streams: textual terms are not supported.
#[derive(Clone, Copy, Debug, Default)]
pub struct NumericAttributeFactory;

impl AttributeFactory for NumericAttributeFactory {
    fn create_attribute_impl(
        &self,
        capability: Capability,
        default: fn() -> Box<dyn AttributeImpl>,
    ) -> Result<Box<dyn AttributeImpl>> {
        if capability == Capability::of::<dyn CharTermAttribute>() {
            return Err(LexisError::invalid_argument(
                "NumericTokenStream does not support CharTermAttribute",
            ));
        }
        DefaultAttributeFactory.create_attribute_impl(capability, default)
    }
}

/// Emits the prefix-coded trie terms of one numeric value.
#[derive(Debug)]
pub struct NumericTokenStream {
    attrs: AttributeSource,
    numeric: AttrRef<dyn NumericTermAttribute>,
    type_att: AttrRef<dyn TypeAttribute>,
    pos_inc: AttrRef<dyn PositionIncrementAttribute>,
    precision_step: u32,
}

impl NumericTokenStream {
    /// Create a stream with the given precision step, which must be at least 1.
    pub fn new(precision_step: u32) -> Result<Self> {
        if precision_step < 1 {
            return Err(LexisError::invalid_argument("precisionStep must be >=1"));
        }
        let mut attrs = AttributeSource::with_factory(Arc::new(NumericAttributeFactory));
        attrs.add_attribute_impl(Box::new(NumericTermAttributeImpl::default()));
        let numeric = attrs.add_attribute::<dyn NumericTermAttribute>()?;
        let type_att = attrs.add_attribute::<dyn TypeAttribute>()?;
        let pos_inc = attrs.add_attribute::<dyn PositionIncrementAttribute>()?;

        Ok(NumericTokenStream {
            attrs,
            numeric,
            type_att,
            pos_inc,
            precision_step,
        })
    }

    pub fn precision_step(&self) -> u32 {
        self.precision_step
    }

    pub fn set_long_value(&mut self, value: i64) -> Result<()> {
        self.init(value, 64)
    }

    pub fn set_int_value(&mut self, value: i32) -> Result<()> {
        self.init(i64::from(value), 32)
    }

    pub fn set_double_value(&mut self, value: f64) -> Result<()> {
        self.init(double_to_sortable_long(value), 64)
    }

    pub fn set_float_value(&mut self, value: f32) -> Result<()> {
        self.init(i64::from(float_to_sortable_int(value)), 32)
    }

    fn init(&mut self, value: i64, value_size: u32) -> Result<()> {
        let precision_step = self.precision_step;
        self.attrs
            .get_mut(self.numeric)?
            .init(value, value_size, precision_step);
        Ok(())
    }

    fn check_value_set(&self) -> Result<u32> {
        let value_size = self.attrs.get(self.numeric)?.value_size();
        if value_size == 0 {
            return Err(LexisError::invalid_operation(
                "call set_*_value() before usage",
            ));
        }
        Ok(value_size)
    }
}

impl TokenStream for NumericTokenStream {
    fn attributes(&self) -> &AttributeSource {
        &self.attrs
    }

    fn attributes_mut(&mut self) -> &mut AttributeSource {
        &mut self.attrs
    }

    fn increment_token(&mut self) -> Result<bool> {
        let value_size = self.check_value_set()?;
        self.attrs.clear_attributes();

        let shift = self.attrs.get_mut(self.numeric)?.increment_shift();
        if shift >= value_size {
            return Ok(false);
        }

        let full_precision = shift == 0;
        self.attrs.get_mut(self.type_att)?.set_type(if full_precision {
            TOKEN_TYPE_FULL_PREC
        } else {
            TOKEN_TYPE_LOWER_PREC
        });
        self.attrs
            .get_mut(self.pos_inc)?
            .set_position_increment(if full_precision { 1 } else { 0 })?;
        Ok(true)
    }

    fn reset(&mut self) -> Result<()> {
        let value_size = self.check_value_set()?;
        let numeric = self.attrs.get_mut(self.numeric)?;
        let value = numeric.raw_value();
        numeric.init(value, value_size, self.precision_step);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::numeric_utils::{
        get_prefix_coded_int_shift, get_prefix_coded_long_shift, prefix_coded_to_int,
        prefix_coded_to_long,
    };

    fn drain(stream: &mut NumericTokenStream) -> Vec<(BytesRef, String, i32)> {
        stream.reset().unwrap();
        let bytes = stream
            .attributes_mut()
            .add_attribute::<dyn TermToBytesRefAttribute>()
            .unwrap();
        let mut out = Vec::new();
        while stream.increment_token().unwrap() {
            let attrs = stream.attributes_mut();
            let term = attrs.get_mut(bytes).unwrap();
            term.fill_bytes_ref().unwrap();
            let term = term.bytes_ref().deep_copy();
            let ty = attrs.attribute::<dyn TypeAttribute>().unwrap().token_type().to_string();
            let inc = attrs
                .attribute::<dyn PositionIncrementAttribute>()
                .unwrap()
                .position_increment();
            out.push((term, ty, inc));
        }
        out
    }

    #[test]
    fn test_long_stream() {
        let value = 0x1234_5678_9abc_def0_i64;
        let mut stream = NumericTokenStream::new(16).unwrap();
        stream.set_long_value(value).unwrap();

        let tokens = drain(&mut stream);
        assert_eq!(tokens.len(), 4);
        for (i, (term, ty, inc)) in tokens.iter().enumerate() {
            let shift = 16 * i as u32;
            assert_eq!(get_prefix_coded_long_shift(term).unwrap(), shift);
            assert_eq!(prefix_coded_to_long(term).unwrap(), (value >> shift) << shift);
            if i == 0 {
                assert_eq!((ty.as_str(), *inc), (TOKEN_TYPE_FULL_PREC, 1));
            } else {
                assert_eq!((ty.as_str(), *inc), (TOKEN_TYPE_LOWER_PREC, 0));
            }
        }
    }

    #[test]
    fn test_int_stream() {
        let mut stream = NumericTokenStream::new(4).unwrap();
        stream.set_int_value(-1234).unwrap();

        let tokens = drain(&mut stream);
        assert_eq!(tokens.len(), 8);
        assert_eq!(prefix_coded_to_int(&tokens[0].0).unwrap(), -1234);
        assert_eq!(get_prefix_coded_int_shift(&tokens[7].0).unwrap(), 28);
    }

    #[test]
    fn test_float_and_double_are_sortable() {
        let mut stream = NumericTokenStream::new(32).unwrap();
        stream.set_float_value(-1.5).unwrap();
        let low = drain(&mut stream).remove(0).0;
        stream.set_float_value(2.25).unwrap();
        let high = drain(&mut stream).remove(0).0;
        assert!(low < high);

        stream.set_double_value(1.0).unwrap();
        let tokens = drain(&mut stream);
        assert_eq!(tokens.len(), 2);
        assert_eq!(
            prefix_coded_to_long(&tokens[0].0).unwrap(),
            double_to_sortable_long(1.0)
        );
    }

    #[test]
    fn test_stream_can_be_reused() {
        let mut stream = NumericTokenStream::new(8).unwrap();
        stream.set_int_value(7).unwrap();
        let first = drain(&mut stream);
        let second = drain(&mut stream);
        assert_eq!(first, second);
    }

    #[test]
    fn test_attribute_equality_ignores_encoded_bytes() {
        let mut encoded = NumericTermAttributeImpl::default();
        encoded.init(42, 32, 4);
        encoded.increment_shift();
        let untouched = encoded.clone();
        encoded.fill_bytes_ref().unwrap();

        assert!(!encoded.bytes_ref().is_empty());
        assert_eq!(encoded, untouched);

        let mut shifted = untouched.clone();
        shifted.increment_shift();
        assert_ne!(shifted, untouched);
    }

    #[test]
    fn test_set_value_reinitializes_stream() {
        let mut stream = NumericTokenStream::new(8).unwrap();
        stream.set_int_value(7).unwrap();
        let first = drain(&mut stream);
        stream.set_long_value(7).unwrap();
        let second = drain(&mut stream);
        assert_eq!(first.len(), 4);
        assert_eq!(second.len(), 8);
    }

    #[test]
    fn test_requires_value() {
        let mut stream = NumericTokenStream::new(4).unwrap();
        assert!(matches!(
            stream.increment_token(),
            Err(LexisError::InvalidOperation(_))
        ));
        assert!(stream.reset().is_err());
    }

    #[test]
    fn test_invalid_precision_step() {
        assert!(NumericTokenStream::new(0).is_err());
    }

    #[test]
    fn test_char_term_is_rejected() {
        let mut stream = NumericTokenStream::new(4).unwrap();
        assert!(
            stream
                .attributes_mut()
                .add_attribute::<dyn CharTermAttribute>()
                .is_err()
        );
    }
}
