//! Byte-range values for binary terms and field payloads.
//!
//! A [`BytesRef`] owns a byte buffer and exposes the window
//! `bytes[offset..offset + length]`. Constructing one from a caller-supplied
//! `Vec<u8>` takes ownership of that allocation without copying it; the
//! window can later be re-pointed with [`BytesRef::set_range`] so the same
//! buffer serves many values.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{LexisError, Result};
use crate::util::array_util;

/// An owned byte buffer with a valid window `[offset, offset + length)`.
///
/// Equality, hashing and ordering consider only the bytes inside the window.
/// Ordering is unsigned lexicographic, which matches the order of the UTF-8
/// encoded strings and of the prefix-coded numeric terms.
///
/// # Examples
///
/// ```
/// use lexis::util::bytes_ref::BytesRef;
///
/// let bytes = BytesRef::from("abc");
/// assert_eq!(bytes.as_slice(), b"abc");
///
/// let window = BytesRef::with_range(b"xabcx".to_vec(), 1, 3).unwrap();
/// assert_eq!(window, bytes);
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<u8>", into = "Vec<u8>")]
pub struct BytesRef {
    bytes: Vec<u8>,
    offset: usize,
    length: usize,
}

impl BytesRef {
    /// Create a reference over the whole buffer.
    pub fn new(bytes: Vec<u8>) -> Self {
        let length = bytes.len();
        BytesRef {
            bytes,
            offset: 0,
            length,
        }
    }

    /// Create an empty reference with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        BytesRef {
            bytes: vec![0; capacity],
            offset: 0,
            length: 0,
        }
    }

    /// Create a reference over `bytes[offset..offset + length]`.
    pub fn with_range(bytes: Vec<u8>, offset: usize, length: usize) -> Result<Self> {
        check_range(bytes.len(), offset, length)?;
        Ok(BytesRef {
            bytes,
            offset,
            length,
        })
    }

    /// Re-point the window inside the current buffer.
    pub fn set_range(&mut self, offset: usize, length: usize) -> Result<()> {
        check_range(self.bytes.len(), offset, length)?;
        self.offset = offset;
        self.length = length;
        Ok(())
    }

    /// The bytes inside the window.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[self.offset..self.offset + self.length]
    }

    /// The whole backing buffer, including bytes outside the window.
    pub fn buffer(&self) -> &[u8] {
        &self.bytes
    }

    /// Mutable access to the whole backing buffer.
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Start of the window.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes in the window.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Check if the window is empty.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Make sure the backing buffer holds at least `capacity` bytes.
    ///
    /// The window is reset to the start of the buffer and keeps its length.
    pub fn grow(&mut self, capacity: usize) {
        if self.offset != 0 {
            self.bytes.copy_within(self.offset..self.offset + self.length, 0);
            self.offset = 0;
        }
        array_util::grow(&mut self.bytes, capacity);
    }

    /// Replace the contents with a copy of `other`, reusing the buffer.
    pub fn copy_bytes(&mut self, other: &[u8]) {
        self.offset = 0;
        self.length = 0;
        array_util::grow(&mut self.bytes, other.len());
        self.bytes[..other.len()].copy_from_slice(other);
        self.length = other.len();
    }

    /// Append a copy of `other` to the window, reusing the buffer.
    pub fn append(&mut self, other: &[u8]) {
        let new_len = self.length + other.len();
        self.grow(new_len);
        self.bytes[self.length..new_len].copy_from_slice(other);
        self.length = new_len;
    }

    /// Set the window length, growing the buffer when needed.
    pub(crate) fn set_length(&mut self, length: usize) {
        self.grow(length);
        self.length = length;
    }

    /// Set the window length to zero and the offset to the start of the buffer.
    pub fn clear(&mut self) {
        self.offset = 0;
        self.length = 0;
    }

    /// A compact copy holding only the bytes inside the window.
    pub fn deep_copy(&self) -> BytesRef {
        BytesRef::new(self.as_slice().to_vec())
    }

    /// Decode the window as UTF-8.
    pub fn utf8_to_string(&self) -> Result<String> {
        String::from_utf8(self.as_slice().to_vec())
            .map_err(|e| LexisError::invalid_argument(format!("BytesRef is not valid UTF-8: {e}")))
    }

    /// Consume the reference, returning the bytes inside the window.
    pub fn into_vec(mut self) -> Vec<u8> {
        if self.offset == 0 {
            self.bytes.truncate(self.length);
            self.bytes
        } else {
            self.as_slice().to_vec()
        }
    }
}

fn check_range(buffer_len: usize, offset: usize, length: usize) -> Result<()> {
    match offset.checked_add(length) {
        Some(end) if end <= buffer_len => Ok(()),
        _ => Err(LexisError::out_of_range(format!(
            "offset {offset} + length {length} exceeds buffer length {buffer_len}"
        ))),
    }
}

impl From<Vec<u8>> for BytesRef {
    fn from(bytes: Vec<u8>) -> Self {
        BytesRef::new(bytes)
    }
}

impl From<BytesRef> for Vec<u8> {
    fn from(bytes: BytesRef) -> Self {
        bytes.into_vec()
    }
}

impl From<&[u8]> for BytesRef {
    fn from(bytes: &[u8]) -> Self {
        BytesRef::new(bytes.to_vec())
    }
}

impl From<&str> for BytesRef {
    fn from(text: &str) -> Self {
        BytesRef::new(text.as_bytes().to_vec())
    }
}

impl From<String> for BytesRef {
    fn from(text: String) -> Self {
        BytesRef::new(text.into_bytes())
    }
}

impl AsRef<[u8]> for BytesRef {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl PartialEq for BytesRef {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for BytesRef {}

impl Hash for BytesRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl PartialOrd for BytesRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BytesRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl fmt::Debug for BytesRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// Hex rendering, e.g. `[61 62 63]`.
impl fmt::Display for BytesRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, b) in self.as_slice().iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{b:x}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_equality() {
        let a = BytesRef::with_range(b"--abc--".to_vec(), 2, 3).unwrap();
        let b = BytesRef::from("abc");
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        assert_eq!(a.offset(), 2);
    }

    #[test]
    fn test_invalid_range() {
        assert!(BytesRef::with_range(vec![0; 4], 2, 3).is_err());
        assert!(BytesRef::with_range(vec![0; 4], usize::MAX, 2).is_err());

        let mut bytes = BytesRef::new(vec![1, 2, 3]);
        assert!(bytes.set_range(1, 3).is_err());
        assert_eq!(bytes.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_unsigned_ordering() {
        let low = BytesRef::new(vec![0x7f]);
        let high = BytesRef::new(vec![0x80]);
        assert!(low < high);
        assert!(BytesRef::from("ab") < BytesRef::from("abc"));
    }

    #[test]
    fn test_copy_bytes_reuses_buffer() {
        let mut bytes = BytesRef::with_capacity(16);
        bytes.copy_bytes(b"hello");
        assert_eq!(bytes.as_slice(), b"hello");
        assert_eq!(bytes.buffer().len(), 16);

        bytes.copy_bytes(b"hi");
        assert_eq!(bytes.as_slice(), b"hi");
        assert_eq!(bytes.buffer().len(), 16);
    }

    #[test]
    fn test_append() {
        let mut bytes = BytesRef::with_range(b"xab".to_vec(), 1, 2).unwrap();
        bytes.append(b"cd");
        assert_eq!(bytes.as_slice(), b"abcd");
        assert_eq!(bytes.offset(), 0);
    }

    #[test]
    fn test_deep_copy_is_compact() {
        let bytes = BytesRef::with_range(b"0123456789".to_vec(), 3, 2).unwrap();
        let copy = bytes.deep_copy();
        assert_eq!(copy.buffer(), b"34");
        assert_eq!(copy.into_vec(), b"34".to_vec());
    }

    #[test]
    fn test_utf8() {
        let bytes = BytesRef::from("héllo");
        assert_eq!(bytes.utf8_to_string().unwrap(), "héllo");
        assert!(BytesRef::new(vec![0xff, 0xfe]).utf8_to_string().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(BytesRef::from("ab").to_string(), "[61 62]");
        assert_eq!(BytesRef::default().to_string(), "[]");
    }
}
