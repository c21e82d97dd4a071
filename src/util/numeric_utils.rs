//! Sortable binary encodings of numeric values.
//!
//! Numeric fields are indexed as a small trie of terms: the full-precision
//! value plus copies with the lowest `shift` bits stripped, for
//! `shift = 0, step, 2 * step, ...`. Each term is "prefix coded": the first
//! byte records the shift and the remaining bytes carry the sign-flipped value
//! seven bits at a time, so that the unsigned byte order of the terms equals
//! the numeric order of the values.
//!
//! Floating point values are first mapped to integers with the same ordering
//! by reinterpreting their IEEE-754 bits ([`double_to_sortable_long`],
//! [`float_to_sortable_int`]).

use crate::error::{LexisError, Result};
use crate::util::bytes_ref::BytesRef;

/// Default precision step used by numeric fields.
pub const PRECISION_STEP_DEFAULT: u32 = 4;

/// First shift byte of prefix-coded 64-bit values.
pub const SHIFT_START_LONG: u8 = 0x20;

/// Maximum number of bytes of a prefix-coded 64-bit value.
pub const BUF_SIZE_LONG: usize = 63 / 7 + 2;

/// First shift byte of prefix-coded 32-bit values.
pub const SHIFT_START_INT: u8 = 0x60;

/// Maximum number of bytes of a prefix-coded 32-bit value.
pub const BUF_SIZE_INT: usize = 31 / 7 + 2;

/// Encode `val` with its lowest `shift` bits removed into `bytes`.
///
/// The buffer of `bytes` is reused when it is large enough.
///
/// # Examples
///
/// ```
/// use lexis::util::bytes_ref::BytesRef;
/// use lexis::util::numeric_utils::{long_to_prefix_coded, prefix_coded_to_long};
///
/// let mut bytes = BytesRef::default();
/// long_to_prefix_coded(-42, 0, &mut bytes).unwrap();
/// assert_eq!(prefix_coded_to_long(&bytes).unwrap(), -42);
/// ```
pub fn long_to_prefix_coded(val: i64, shift: u32, bytes: &mut BytesRef) -> Result<()> {
    if shift > 63 {
        return Err(LexisError::out_of_range(format!(
            "Illegal shift value {shift}, must be 0..63"
        )));
    }
    // i / 7 == (i * 37) >> 8 for i in 0..63
    let mut n_chars = ((((63 - shift) * 37) >> 8) + 1) as usize;
    bytes.clear();
    bytes.set_length(n_chars + 1);

    let buf = bytes.buffer_mut();
    buf[0] = SHIFT_START_LONG + shift as u8;
    let mut sortable_bits = (val as u64 ^ 0x8000_0000_0000_0000) >> shift;
    while n_chars > 0 {
        // 7 bits per byte keeps every byte a valid single-byte UTF-8 unit
        buf[n_chars] = (sortable_bits & 0x7f) as u8;
        n_chars -= 1;
        sortable_bits >>= 7;
    }
    Ok(())
}

/// Encode `val` with its lowest `shift` bits removed into `bytes`.
pub fn int_to_prefix_coded(val: i32, shift: u32, bytes: &mut BytesRef) -> Result<()> {
    if shift > 31 {
        return Err(LexisError::out_of_range(format!(
            "Illegal shift value {shift}, must be 0..31"
        )));
    }
    let mut n_chars = ((((31 - shift) * 37) >> 8) + 1) as usize;
    bytes.clear();
    bytes.set_length(n_chars + 1);

    let buf = bytes.buffer_mut();
    buf[0] = SHIFT_START_INT + shift as u8;
    let mut sortable_bits = (val as u32 ^ 0x8000_0000) >> shift;
    while n_chars > 0 {
        buf[n_chars] = (sortable_bits & 0x7f) as u8;
        n_chars -= 1;
        sortable_bits >>= 7;
    }
    Ok(())
}

/// Shift of a prefix-coded 64-bit term.
pub fn get_prefix_coded_long_shift(val: &BytesRef) -> Result<u32> {
    let first = val.as_slice().first().copied().unwrap_or(0);
    match first.checked_sub(SHIFT_START_LONG) {
        Some(shift) if shift <= 63 => Ok(shift as u32),
        _ => Err(LexisError::invalid_argument(format!(
            "Invalid shift byte {first:#x} in prefix-coded bytes (is the encoded value really a LONG?)"
        ))),
    }
}

/// Shift of a prefix-coded 32-bit term.
pub fn get_prefix_coded_int_shift(val: &BytesRef) -> Result<u32> {
    let first = val.as_slice().first().copied().unwrap_or(0);
    match first.checked_sub(SHIFT_START_INT) {
        Some(shift) if shift <= 31 => Ok(shift as u32),
        _ => Err(LexisError::invalid_argument(format!(
            "Invalid shift byte {first:#x} in prefix-coded bytes (is the encoded value really an INT?)"
        ))),
    }
}

/// Decode a prefix-coded 64-bit term. Bits stripped by the shift come back as zero.
pub fn prefix_coded_to_long(val: &BytesRef) -> Result<i64> {
    let shift = get_prefix_coded_long_shift(val)?;
    let sortable_bits = decode_payload(val)?;
    Ok(((sortable_bits << shift) ^ 0x8000_0000_0000_0000) as i64)
}

/// Decode a prefix-coded 32-bit term. Bits stripped by the shift come back as zero.
pub fn prefix_coded_to_int(val: &BytesRef) -> Result<i32> {
    let shift = get_prefix_coded_int_shift(val)?;
    let sortable_bits = decode_payload(val)? as u32;
    Ok(((sortable_bits << shift) ^ 0x8000_0000) as i32)
}

fn decode_payload(val: &BytesRef) -> Result<u64> {
    let mut sortable_bits = 0u64;
    for (i, &b) in val.as_slice().iter().enumerate().skip(1) {
        if b & 0x80 != 0 {
            return Err(LexisError::invalid_argument(format!(
                "Invalid prefix-coded numeric value (byte {b:x} at position {i} is invalid)"
            )));
        }
        sortable_bits = (sortable_bits << 7) | u64::from(b);
    }
    Ok(sortable_bits)
}

/// Map a double to a long with the same sort order.
///
/// The IEEE-754 bit layout is reinterpreted, not converted, and negative values
/// have their non-sign bits flipped.
pub fn double_to_sortable_long(val: f64) -> i64 {
    let bits = val.to_bits() as i64;
    if bits < 0 {
        bits ^ 0x7fff_ffff_ffff_ffff
    } else {
        bits
    }
}

/// Inverse of [`double_to_sortable_long`].
pub fn sortable_long_to_double(val: i64) -> f64 {
    let bits = if val < 0 {
        val ^ 0x7fff_ffff_ffff_ffff
    } else {
        val
    };
    f64::from_bits(bits as u64)
}

/// Map a float to an int with the same sort order.
pub fn float_to_sortable_int(val: f32) -> i32 {
    let bits = val.to_bits() as i32;
    if bits < 0 { bits ^ 0x7fff_ffff } else { bits }
}

/// Inverse of [`float_to_sortable_int`].
pub fn sortable_int_to_float(val: i32) -> f32 {
    let bits = if val < 0 { val ^ 0x7fff_ffff } else { val };
    f32::from_bits(bits as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_term(val: i64, shift: u32) -> BytesRef {
        let mut bytes = BytesRef::default();
        long_to_prefix_coded(val, shift, &mut bytes).unwrap();
        bytes
    }

    fn int_term(val: i32, shift: u32) -> BytesRef {
        let mut bytes = BytesRef::default();
        int_to_prefix_coded(val, shift, &mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_long_prefix_coded_preserves_order() {
        let values = [i64::MIN, -1_000_000, -1, 0, 1, 42, 1 << 40, i64::MAX];
        for pair in values.windows(2) {
            assert!(long_term(pair[0], 0) < long_term(pair[1], 0));
        }
        for &val in &values {
            assert_eq!(prefix_coded_to_long(&long_term(val, 0)).unwrap(), val);
        }
    }

    #[test]
    fn test_int_prefix_coded_preserves_order() {
        let values = [i32::MIN, -65536, -1, 0, 1, 1000, i32::MAX];
        for pair in values.windows(2) {
            assert!(int_term(pair[0], 0) < int_term(pair[1], 0));
        }
        for &val in &values {
            assert_eq!(prefix_coded_to_int(&int_term(val, 0)).unwrap(), val);
        }
    }

    #[test]
    fn test_shift_strips_low_bits() {
        let term = long_term(0x1234, 4);
        assert_eq!(get_prefix_coded_long_shift(&term).unwrap(), 4);
        assert_eq!(prefix_coded_to_long(&term).unwrap(), 0x1230);

        let term = int_term(0x1234, 8);
        assert_eq!(get_prefix_coded_int_shift(&term).unwrap(), 8);
        assert_eq!(prefix_coded_to_int(&term).unwrap(), 0x1200);
    }

    #[test]
    fn test_encoded_lengths() {
        assert_eq!(long_term(7, 0).len(), BUF_SIZE_LONG);
        assert_eq!(int_term(7, 0).len(), BUF_SIZE_INT);
        assert_eq!(long_term(7, 63).len(), 2);
        assert!(long_term(7, 0).as_slice()[1..].iter().all(|b| b & 0x80 == 0));
    }

    #[test]
    fn test_illegal_shift() {
        let mut bytes = BytesRef::default();
        assert!(long_to_prefix_coded(1, 64, &mut bytes).is_err());
        assert!(int_to_prefix_coded(1, 32, &mut bytes).is_err());
    }

    #[test]
    fn test_wrong_kind_is_rejected() {
        let term = int_term(5, 0);
        assert!(prefix_coded_to_long(&term).is_err());
        assert!(prefix_coded_to_int(&BytesRef::default()).is_err());
    }

    #[test]
    fn test_sortable_double() {
        let values = [f64::NEG_INFINITY, -2.5, -0.0, 0.0, 1e-300, 3.75, f64::INFINITY];
        for pair in values.windows(2) {
            assert!(double_to_sortable_long(pair[0]) < double_to_sortable_long(pair[1]));
        }
        for &val in &values {
            assert_eq!(
                sortable_long_to_double(double_to_sortable_long(val)).to_bits(),
                val.to_bits()
            );
        }
    }

    #[test]
    fn test_sortable_float() {
        let values = [f32::NEG_INFINITY, -1.5, -0.0, 0.0, 0.25, f32::MAX];
        for pair in values.windows(2) {
            assert!(float_to_sortable_int(pair[0]) < float_to_sortable_int(pair[1]));
        }
        for &val in &values {
            assert_eq!(
                sortable_int_to_float(float_to_sortable_int(val)).to_bits(),
                val.to_bits()
            );
        }
    }

    #[test]
    fn test_positive_double_bits_unchanged() {
        assert_eq!(double_to_sortable_long(1.0), 1.0f64.to_bits() as i64);
        assert_eq!(float_to_sortable_int(1.0), 1.0f32.to_bits() as i32);
    }
}
