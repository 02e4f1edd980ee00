//! Bit-packed 2D buffer for boolean masks.
//!
//! Uses 1 bit per element instead of 1 byte.

/// Number of bits per storage word.
const BITS_PER_WORD: usize = 64;

/// A 2D buffer storing boolean values packed as bits, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitBuffer2 {
    /// Packed bit storage, LSB first.
    words: Vec<u64>,
    width: usize,
    height: usize,
    /// Total number of bits (width * height).
    len: usize,
}

impl BitBuffer2 {
    /// Create a new bit buffer filled with the given value.
    pub fn new_filled(width: usize, height: usize, value: bool) -> Self {
        let len = width * height;
        let mut words = vec![if value { !0u64 } else { 0u64 }; len.div_ceil(BITS_PER_WORD)];
        // Keep the padding bits of the last word clear so `count_ones` stays exact.
        let tail = len % BITS_PER_WORD;
        if value && tail != 0 {
            if let Some(last) = words.last_mut() {
                *last = (1u64 << tail) - 1;
            }
        }
        Self {
            words,
            width,
            height,
            len,
        }
    }

    /// Create a new bit buffer from a row-major slice of booleans.
    ///
    /// The slice length must equal `width * height`.
    pub fn from_slice(width: usize, height: usize, data: &[bool]) -> Self {
        let len = width * height;
        assert_eq!(
            data.len(),
            len,
            "data length {} does not match dimensions {}x{}={}",
            data.len(),
            width,
            height,
            len
        );

        let mut buf = Self::new_filled(width, height, false);
        for (i, &value) in data.iter().enumerate() {
            if value {
                buf.words[i / BITS_PER_WORD] |= 1u64 << (i % BITS_PER_WORD);
            }
        }
        buf
    }

    /// Parse an ASCII picture: `#` is set, `.` is clear, one line per row.
    ///
    /// Leading and trailing whitespace on each line is ignored, as are blank
    /// lines. All rows must have the same length.
    pub fn from_ascii(picture: &str) -> Self {
        let rows: Vec<&str> = picture
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());

        let mut data = Vec::with_capacity(width * height);
        for row in &rows {
            assert_eq!(row.len(), width, "ragged row in mask picture: {row:?}");
            data.extend(row.bytes().map(|b| b == b'#'));
        }
        Self::from_slice(width, height, &data)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit value at the given linear index.
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        debug_assert!(idx < self.len);
        (self.words[idx / BITS_PER_WORD] >> (idx % BITS_PER_WORD)) & 1 != 0
    }

    #[inline]
    pub fn set(&mut self, idx: usize, value: bool) {
        debug_assert!(idx < self.len);
        let bit = 1u64 << (idx % BITS_PER_WORD);
        if value {
            self.words[idx / BITS_PER_WORD] |= bit;
        } else {
            self.words[idx / BITS_PER_WORD] &= !bit;
        }
    }

    #[inline]
    pub fn get_xy(&self, x: usize, y: usize) -> bool {
        debug_assert!(x < self.width && y < self.height);
        self.get(y * self.width + x)
    }

    #[inline]
    pub fn set_xy(&mut self, x: usize, y: usize, value: bool) {
        debug_assert!(x < self.width && y < self.height);
        self.set(y * self.width + x, value);
    }

    /// Number of set bits.
    #[inline]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Iterate over all bit values in row-major order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = bool> + '_ {
        (0..self.len).map(move |idx| self.get(idx))
    }
}

impl From<&BitBuffer2> for Vec<bool> {
    #[inline]
    fn from(buf: &BitBuffer2) -> Self {
        buf.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_filled_true_counts_exactly() {
        // 100 bits spans two words; padding must not be counted
        let buf = BitBuffer2::new_filled(10, 10, true);
        assert_eq!(buf.len(), 100);
        assert_eq!(buf.count_ones(), 100);
        assert!(buf.iter().all(|b| b));
    }

    #[test]
    fn test_set_get_across_word_boundary() {
        let mut buf = BitBuffer2::new_filled(64, 2, false);
        buf.set(63, true);
        buf.set(64, true);
        assert!(buf.get(63));
        assert!(buf.get(64));
        assert!(!buf.get(62));
        assert!(!buf.get(65));

        buf.set(63, false);
        assert!(!buf.get(63));
        assert_eq!(buf.count_ones(), 1);
    }

    #[test]
    fn test_xy_is_row_major() {
        let mut buf = BitBuffer2::new_filled(5, 3, false);
        buf.set_xy(4, 1, true);
        assert!(buf.get(5 + 4));
        assert!(buf.get_xy(4, 1));
        assert!(!buf.get_xy(1, 2));
    }

    #[test]
    fn test_from_slice() {
        let data = [true, false, true, false, false, true];
        let buf = BitBuffer2::from_slice(3, 2, &data);
        let back: Vec<bool> = (&buf).into();
        assert_eq!(back, data);
    }

    #[test]
    #[should_panic(expected = "data length")]
    fn test_from_slice_wrong_length() {
        BitBuffer2::from_slice(2, 2, &[true, false, true]);
    }

    #[test]
    fn test_from_ascii() {
        let buf = BitBuffer2::from_ascii(
            "
            #..
            .#.
            ",
        );
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 2);
        assert!(buf.get_xy(0, 0));
        assert!(buf.get_xy(1, 1));
        assert_eq!(buf.count_ones(), 2);
    }

    #[test]
    #[should_panic(expected = "ragged row")]
    fn test_from_ascii_ragged() {
        BitBuffer2::from_ascii("##\n#");
    }
}
