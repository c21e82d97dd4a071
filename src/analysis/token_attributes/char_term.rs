//! The term text of a token, held in a growable character buffer.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::analysis::attribute::{Attribute, AttributeImpl, Capability, downcast_target};
use crate::analysis::token_attributes::TermToBytesRefAttribute;
use crate::error::{LexisError, Result};
use crate::util::array_util::{self, oversize};
use crate::util::bytes_ref::BytesRef;

/// Smallest character buffer allocated for a term.
pub const MIN_BUFFER_SIZE: usize = 10;

/// The term text of a token.
///
/// The buffer is a `[char]` whose first [`len`](CharTermAttribute::len)
/// elements are the term. Capacity beyond the length is scratch space: it
/// is kept across tokens so that tokenizers can refill it without
/// allocating.
pub trait CharTermAttribute {
    /// The whole buffer, including the slots past the logical length.
    fn buffer(&self) -> &[char];

    /// Mutable access to the whole buffer.
    fn buffer_mut(&mut self) -> &mut [char];

    /// Grow the buffer to hold at least `new_size` chars, keeping its contents.
    ///
    /// The buffer never shrinks.
    fn resize_buffer(&mut self, new_size: usize) -> &mut [char];

    /// Logical length of the term.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set the logical length. Fails if `length` exceeds the buffer size.
    fn set_length(&mut self, length: usize) -> Result<()>;

    /// Set the logical length to zero.
    fn set_empty(&mut self);

    /// Replace the term with `buffer[offset..offset + length]`.
    fn copy_buffer(&mut self, buffer: &[char], offset: usize, length: usize) -> Result<()>;

    fn append_char(&mut self, c: char);

    fn append_str(&mut self, s: &str);

    /// Append `count` chars of `s`, starting at char index `start`.
    fn append_str_range(&mut self, s: &str, start: usize, count: usize) -> Result<()>;

    /// Append `chars[start..start + count]`.
    fn append_chars(&mut self, chars: &[char], start: usize, count: usize) -> Result<()>;

    /// Append the term held by another attribute.
    fn append_term(&mut self, other: &dyn CharTermAttribute);

    /// The char at `index`, which must be below the logical length.
    fn char_at(&self, index: usize) -> Result<char>;

    /// A copy of `length` chars starting at `start`.
    fn sub_sequence(&self, start: usize, length: usize) -> Result<String>;

    /// The term as a char slice.
    fn as_chars(&self) -> &[char] {
        &self.buffer()[..self.len()]
    }

    /// The term as an owned string.
    fn term(&self) -> String {
        self.as_chars().iter().collect()
    }
}

impl Attribute for dyn CharTermAttribute {
    const NAME: &'static str = "CharTermAttribute";

    fn create_default() -> Box<dyn AttributeImpl> {
        Box::new(CharTermAttributeImpl::new())
    }

    fn view(imp: &dyn AttributeImpl) -> Option<&Self> {
        imp.as_any()
            .downcast_ref::<CharTermAttributeImpl>()
            .map(|a| a as &dyn CharTermAttribute)
    }

    fn view_mut(imp: &mut dyn AttributeImpl) -> Option<&mut Self> {
        imp.as_any_mut()
            .downcast_mut::<CharTermAttributeImpl>()
            .map(|a| a as &mut dyn CharTermAttribute)
    }
}

/// Default implementation of [`CharTermAttribute`] and [`TermToBytesRefAttribute`].
#[derive(Clone)]
pub struct CharTermAttributeImpl {
    term_buffer: Vec<char>,
    term_length: usize,
    bytes: BytesRef,
}

impl CharTermAttributeImpl {
    pub fn new() -> Self {
        CharTermAttributeImpl {
            term_buffer: vec!['\0'; oversize(MIN_BUFFER_SIZE, size_of::<char>())],
            term_length: 0,
            bytes: BytesRef::with_capacity(MIN_BUFFER_SIZE),
        }
    }

    fn grow_term_buffer(&mut self, new_size: usize) {
        array_util::grow(&mut self.term_buffer, new_size);
    }

    fn check_range(source_len: usize, start: usize, count: usize) -> Result<()> {
        match start.checked_add(count) {
            Some(end) if end <= source_len => Ok(()),
            _ => Err(LexisError::out_of_range(format!(
                "start {start} + count {count} exceeds source length {source_len}"
            ))),
        }
    }

    fn push_chars(&mut self, chars: impl Iterator<Item = char>, count: usize) {
        let new_len = self.term_length + count;
        self.grow_term_buffer(new_len);
        for (slot, c) in self.term_buffer[self.term_length..new_len]
            .iter_mut()
            .zip(chars)
        {
            *slot = c;
        }
        self.term_length = new_len;
    }
}

impl Default for CharTermAttributeImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl CharTermAttribute for CharTermAttributeImpl {
    fn buffer(&self) -> &[char] {
        &self.term_buffer
    }

    fn buffer_mut(&mut self) -> &mut [char] {
        &mut self.term_buffer
    }

    fn resize_buffer(&mut self, new_size: usize) -> &mut [char] {
        self.grow_term_buffer(new_size);
        &mut self.term_buffer
    }

    fn len(&self) -> usize {
        self.term_length
    }

    fn set_length(&mut self, length: usize) -> Result<()> {
        if length > self.term_buffer.len() {
            return Err(LexisError::out_of_range(format!(
                "length {length} exceeds the size of the termBuffer ({})",
                self.term_buffer.len()
            )));
        }
        self.term_length = length;
        Ok(())
    }

    fn set_empty(&mut self) {
        self.term_length = 0;
    }

    fn copy_buffer(&mut self, buffer: &[char], offset: usize, length: usize) -> Result<()> {
        Self::check_range(buffer.len(), offset, length)?;
        self.grow_term_buffer(length);
        self.term_buffer[..length].copy_from_slice(&buffer[offset..offset + length]);
        self.term_length = length;
        Ok(())
    }

    fn append_char(&mut self, c: char) {
        self.push_chars(std::iter::once(c), 1);
    }

    fn append_str(&mut self, s: &str) {
        let count = s.chars().count();
        self.push_chars(s.chars(), count);
    }

    fn append_str_range(&mut self, s: &str, start: usize, count: usize) -> Result<()> {
        Self::check_range(s.chars().count(), start, count)?;
        self.push_chars(s.chars().skip(start), count);
        Ok(())
    }

    fn append_chars(&mut self, chars: &[char], start: usize, count: usize) -> Result<()> {
        Self::check_range(chars.len(), start, count)?;
        self.push_chars(chars[start..start + count].iter().copied(), count);
        Ok(())
    }

    fn append_term(&mut self, other: &dyn CharTermAttribute) {
        let chars = other.as_chars();
        self.push_chars(chars.iter().copied(), chars.len());
    }

    fn char_at(&self, index: usize) -> Result<char> {
        if index >= self.term_length {
            return Err(LexisError::out_of_range(format!(
                "index {index} out of bounds for term length {}",
                self.term_length
            )));
        }
        Ok(self.term_buffer[index])
    }

    fn sub_sequence(&self, start: usize, length: usize) -> Result<String> {
        Self::check_range(self.term_length, start, length)?;
        Ok(self.term_buffer[start..start + length].iter().collect())
    }
}

impl TermToBytesRefAttribute for CharTermAttributeImpl {
    fn fill_bytes_ref(&mut self) -> Result<()> {
        let utf8_len: usize = self.as_chars().iter().map(|c| c.len_utf8()).sum();
        self.bytes.clear();
        self.bytes.set_length(utf8_len);

        let buf = self.bytes.buffer_mut();
        let mut upto = 0;
        for &c in &self.term_buffer[..self.term_length] {
            upto += c.encode_utf8(&mut buf[upto..]).len();
        }
        Ok(())
    }

    fn bytes_ref(&self) -> &BytesRef {
        &self.bytes
    }
}

impl AttributeImpl for CharTermAttributeImpl {
    fn capabilities(&self) -> Vec<Capability> {
        vec![
            Capability::of::<dyn CharTermAttribute>(),
            Capability::of::<dyn TermToBytesRefAttribute>(),
        ]
    }

    fn clear(&mut self) {
        self.term_length = 0;
    }

    fn copy_to(&self, target: &mut dyn AttributeImpl) -> Result<()> {
        let target = downcast_target::<Self>(target, <dyn CharTermAttribute>::NAME)?;
        target.copy_buffer(&self.term_buffer, 0, self.term_length)
    }

    fn reflect(&self, reflector: &mut dyn FnMut(&'static str, String)) {
        let term = self.term();
        let bytes = BytesRef::from(term.as_str());
        reflector("term", term);
        reflector("bytes", bytes.to_string());
    }
}

impl PartialEq for CharTermAttributeImpl {
    fn eq(&self, other: &Self) -> bool {
        self.as_chars() == other.as_chars()
    }
}

impl Eq for CharTermAttributeImpl {}

impl Hash for CharTermAttributeImpl {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_chars().hash(state);
    }
}

impl fmt::Debug for CharTermAttributeImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharTermAttributeImpl")
            .field("term", &self.term())
            .field("capacity", &self.term_buffer.len())
            .finish()
    }
}

impl fmt::Display for CharTermAttributeImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.term())
    }
}
