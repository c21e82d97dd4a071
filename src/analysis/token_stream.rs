//! The pull-based token stream contract.
//!
//! A consumer drives a [`TokenStream`] like this:
//!
//! 1. resolve the attributes it needs on [`TokenStream::attributes_mut`],
//! 2. call [`TokenStream::reset`],
//! 3. call [`TokenStream::increment_token`] until it returns `false`, reading
//!    the attributes after each `true`,
//! 4. call [`TokenStream::end`] and read the final offset and position
//!    increment.
//!
//! Filters wrap another stream and share its [`AttributeSource`]: they
//! delegate `attributes` to their input, so the tokenizer at the bottom of a
//! chain owns the only copy of the per-token state.

use crate::analysis::attribute::{AttrRef, AttributeSource};
use crate::analysis::token_attributes::{CharTermAttribute, OffsetAttribute};
use crate::error::{LexisError, Result};

/// A stream of tokens exposed through shared attributes.
pub trait TokenStream: Send {
    /// The attributes describing the current token.
    fn attributes(&self) -> &AttributeSource;

    fn attributes_mut(&mut self) -> &mut AttributeSource;

    /// Advance to the next token. Returns `false` when the stream is exhausted.
    fn increment_token(&mut self) -> Result<bool>;

    /// Prepare the stream for (re)consumption.
    fn reset(&mut self) -> Result<()> {
        Ok(())
    }

    /// Set the end-of-stream attribute values (final offset, trailing holes).
    fn end(&mut self) -> Result<()> {
        self.attributes_mut().end_attributes();
        Ok(())
    }
}

/// Convert a char count into an offset attribute value.
pub(crate) fn to_offset(chars: usize) -> Result<i32> {
    i32::try_from(chars).map_err(|_| {
        LexisError::out_of_range(format!("offset {chars} does not fit in an i32"))
    })
}

/// Emits its whole value as one token.
///
/// Used for fields that are indexed but not tokenized. The value can be
/// swapped with [`StringTokenStream::set_value`] so that one instance serves
/// a field across many documents.
#[derive(Debug)]
pub struct StringTokenStream {
    attrs: AttributeSource,
    term: AttrRef<dyn CharTermAttribute>,
    offset: AttrRef<dyn OffsetAttribute>,
    value: String,
    used: bool,
}

impl StringTokenStream {
    pub fn new() -> Result<Self> {
        let mut attrs = AttributeSource::new();
        let term = attrs.add_attribute::<dyn CharTermAttribute>()?;
        let offset = attrs.add_attribute::<dyn OffsetAttribute>()?;
        Ok(StringTokenStream {
            attrs,
            term,
            offset,
            value: String::new(),
            used: true,
        })
    }

    /// Replace the value and make the stream ready to emit it.
    pub fn set_value(&mut self, value: &str) {
        self.value.clear();
        self.value.push_str(value);
        self.used = false;
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl TokenStream for StringTokenStream {
    fn attributes(&self) -> &AttributeSource {
        &self.attrs
    }

    fn attributes_mut(&mut self) -> &mut AttributeSource {
        &mut self.attrs
    }

    fn increment_token(&mut self) -> Result<bool> {
        if self.used {
            return Ok(false);
        }
        self.attrs.clear_attributes();

        let term = self.attrs.get_mut(self.term)?;
        term.append_str(&self.value);
        let length = to_offset(term.len())?;
        self.attrs.get_mut(self.offset)?.set_offset(0, length)?;

        self.used = true;
        Ok(true)
    }

    fn reset(&mut self) -> Result<()> {
        self.used = false;
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.attrs.end_attributes();
        let final_offset = to_offset(self.value.chars().count())?;
        self.attrs
            .get_mut(self.offset)?
            .set_offset(final_offset, final_offset)
    }
}
