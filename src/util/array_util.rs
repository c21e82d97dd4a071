//! Growth policy for reusable buffers.
//!
//! Buffers that are refilled for every token grow with a small exponential
//! factor and are rounded up for the allocator, so repeated small appends
//! amortize to a handful of reallocations.

/// Size in bytes of a pointer-aligned allocation unit.
const ALIGNMENT: usize = 8;

/// Returns a capacity of at least `min_target_size` elements, with headroom
/// for future growth.
///
/// The result grows by 1/8th (at least 3 elements) and is rounded so that
/// `result * bytes_per_element` is a multiple of eight bytes. Zero stays zero:
/// nothing is allocated until an element is requested.
///
/// # Examples
///
/// ```
/// use lexis::util::array_util::oversize;
///
/// assert_eq!(oversize(0, 4), 0);
/// assert!(oversize(10, 4) >= 10);
/// assert_eq!(oversize(10, 4) % 2, 0);
/// ```
pub fn oversize(min_target_size: usize, bytes_per_element: usize) -> usize {
    if min_target_size == 0 {
        return 0;
    }

    let extra = (min_target_size >> 3).max(3);
    let new_size = match min_target_size.checked_add(extra) {
        Some(size) => size,
        None => return usize::MAX,
    };

    match bytes_per_element {
        1 | 2 | 4 => {
            let per_unit = ALIGNMENT / bytes_per_element;
            match new_size.checked_add(per_unit - 1) {
                Some(size) => size & !(per_unit - 1),
                None => new_size,
            }
        }
        _ => new_size,
    }
}

/// Grows `buffer` so that it holds at least `min_size` elements, filling new
/// slots with `T::default()`. Existing content is preserved and the buffer is
/// never shrunk.
pub fn grow<T: Default + Clone>(buffer: &mut Vec<T>, min_size: usize) {
    if buffer.len() < min_size {
        let new_len = oversize(min_size, std::mem::size_of::<T>());
        buffer.resize(new_len, T::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversize_zero() {
        assert_eq!(oversize(0, 1), 0);
        assert_eq!(oversize(0, 8), 0);
    }

    #[test]
    fn test_oversize_small_arrays_grow_by_three() {
        // 1 + 3 = 4, rounded to a multiple of 8 bytes for 1-byte elements
        assert_eq!(oversize(1, 1), 8);
        // 10 + 3 = 13, rounded to a multiple of 2 for 4-byte elements
        assert_eq!(oversize(10, 4), 14);
        // 10 + 3 = 13, no rounding for 8-byte elements
        assert_eq!(oversize(10, 8), 13);
    }

    #[test]
    fn test_oversize_large_arrays_grow_by_an_eighth() {
        assert_eq!(oversize(800, 8), 900);
        assert!(oversize(1 << 20, 1) >= (1 << 20) + (1 << 17));
    }

    #[test]
    fn test_oversize_never_below_target() {
        for size in 1..2048 {
            for bytes in [1, 2, 4, 8, 12] {
                assert!(oversize(size, bytes) >= size);
            }
        }
    }

    #[test]
    fn test_oversize_saturates() {
        assert_eq!(oversize(usize::MAX - 1, 1), usize::MAX);
    }

    #[test]
    fn test_grow_preserves_content() {
        let mut buffer = vec![1u8, 2, 3];
        grow(&mut buffer, 10);
        assert!(buffer.len() >= 10);
        assert_eq!(&buffer[..3], &[1, 2, 3]);

        let len = buffer.len();
        grow(&mut buffer, 2);
        assert_eq!(buffer.len(), len);
    }
}
