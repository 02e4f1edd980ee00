//! Read-only view of a binary image.

use std::borrow::Cow;

use common::{BitBuffer2, Buffer2};

/// A binary foreground/background grid.
///
/// Coordinates follow [`Buffer2`]: `x` is the column, `y` the row.
pub trait Mask {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Whether the pixel at `(x, y)` is foreground.
    ///
    /// Callers guarantee `x < width()` and `y < height()`.
    fn is_set(&self, x: usize, y: usize) -> bool;

    /// The mask as a flat `Buffer2<bool>`. The labelers read each pixel many
    /// times, so they work on this form; masks already stored that way lend
    /// themselves out instead of being copied.
    fn to_bool_buffer(&self) -> Cow<'_, Buffer2<bool>> {
        Cow::Owned(unpack(self))
    }
}

impl Mask for BitBuffer2 {
    #[inline]
    fn width(&self) -> usize {
        BitBuffer2::width(self)
    }

    #[inline]
    fn height(&self) -> usize {
        BitBuffer2::height(self)
    }

    #[inline]
    fn is_set(&self, x: usize, y: usize) -> bool {
        self.get_xy(x, y)
    }
}

impl Mask for Buffer2<bool> {
    #[inline]
    fn width(&self) -> usize {
        Buffer2::width(self)
    }

    #[inline]
    fn height(&self) -> usize {
        Buffer2::height(self)
    }

    #[inline]
    fn is_set(&self, x: usize, y: usize) -> bool {
        *self.get(x, y)
    }

    #[inline]
    fn to_bool_buffer(&self) -> Cow<'_, Buffer2<bool>> {
        Cow::Borrowed(self)
    }
}

/// Copy any mask into an unpacked `Buffer2<bool>` pixel by pixel.
fn unpack<M: Mask + ?Sized>(mask: &M) -> Buffer2<bool> {
    let (width, height) = (mask.width(), mask.height());
    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            pixels.push(mask.is_set(x, y));
        }
    }
    Buffer2::new(width, height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_buffer_is_borrowed() {
        let mask = Buffer2::new(3, 1, vec![true, false, true]);
        let grid = mask.to_bool_buffer();

        assert!(matches!(grid, Cow::Borrowed(_)));
        assert!(std::ptr::eq(grid.as_ref(), &mask));
    }

    #[test]
    fn bit_buffer_is_unpacked() {
        let mask = BitBuffer2::from_ascii(
            "
            #.#
            .#.
            ",
        );
        let grid = mask.to_bool_buffer();

        assert!(matches!(grid, Cow::Owned(_)));
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.pixels(), &[true, false, true, false, true, false]);
    }
}
