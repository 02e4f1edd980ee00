//! Pixel adjacency patterns.
//!
//! A [`Neighborhood`] is an odd-sized boolean kernel centered on the pixel
//! being examined. Every `true` cell of the kernel becomes a [`Neighbor`]
//! offset, enumerated in row-major kernel order. The kernel is fixed at
//! construction; shape helpers such as [`Neighborhood::cross`] or
//! [`Neighborhood::eight_connected`] build a kernel and go through
//! [`Neighborhood::new`] like any caller would.


use std::fmt;

use common::Buffer2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Offset of a neighboring pixel relative to the center pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Neighbor {
    /// Row offset (positive is down).
    pub dy: i32,
    /// Column offset (positive is right).
    pub dx: i32,
}

impl Neighbor {
    #[inline]
    pub const fn new(dy: i32, dx: i32) -> Self {
        Self { dy, dx }
    }

    /// The same offset pointing the other way.
    #[inline]
    pub const fn mirrored(self) -> Self {
        Self {
            dy: -self.dy,
            dx: -self.dx,
        }
    }
}

/// Immutable adjacency pattern over an odd-sized boolean kernel.
///
/// Serialized as a list of kernel rows where `#` marks an active cell and
/// `.` an inactive one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "KernelRows", into = "KernelRows")]
pub struct Neighborhood {
    kernel: Buffer2<bool>,
    neighbors: Vec<Neighbor>,
}

impl Neighborhood {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Build a neighborhood from a kernel with odd width and height.
    pub fn new(kernel: Buffer2<bool>) -> Result<Self> {
        let (width, height) = (kernel.width(), kernel.height());
        if width % 2 == 0 || height % 2 == 0 {
            return Err(Error::InvalidArgument(format!(
                "neighborhood kernel must have odd dimensions, got {height}x{width}"
            )));
        }

        let center_y = (height / 2) as i32;
        let center_x = (width / 2) as i32;
        let mut neighbors = Vec::new();
        for y in 0..height {
            for x in 0..width {
                if *kernel.get(x, y) {
                    neighbors.push(Neighbor::new(y as i32 - center_y, x as i32 - center_x));
                }
            }
        }

        Ok(Self { kernel, neighbors })
    }

    /// Build a neighborhood from kernel rows, top to bottom.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::InvalidArgument(
                "neighborhood kernel has no rows".to_string(),
            ));
        }
        let kernel = Buffer2::from_rows(rows).ok_or_else(|| {
            Error::InvalidArgument("neighborhood kernel rows differ in length".to_string())
        })?;
        Self::new(kernel)
    }

    /// Square kernel of `size x size` with every cell active, center included.
    pub fn square(size: usize) -> Result<Self> {
        Self::new(Buffer2::new_filled(size, size, true))
    }

    /// Single row of `width` active cells.
    pub fn horizontal(width: usize) -> Result<Self> {
        Self::new(Buffer2::new_filled(width, 1, true))
    }

    /// Single column of `height` active cells.
    pub fn vertical(height: usize) -> Result<Self> {
        Self::new(Buffer2::new_filled(1, height, true))
    }

    /// Center row and center column of a `size x size` kernel.
    pub fn cross(size: usize) -> Result<Self> {
        let center = size / 2;
        Self::new(shape_kernel(size, size, |x, y| x == center || y == center))
    }

    /// Both diagonals of a `size x size` kernel.
    pub fn saltire(size: usize) -> Result<Self> {
        Self::new(shape_kernel(size, size, |x, y| x == y || x + y + 1 == size))
    }

    /// Disk of the given odd `diameter`: every cell whose center lies within
    /// `diameter / 2` of the kernel center.
    pub fn circle(diameter: usize) -> Result<Self> {
        let radius = diameter as f64 / 2.0;
        let center = (diameter / 2) as f64;
        Self::new(shape_kernel(diameter, diameter, |x, y| {
            let dx = x as f64 - center;
            let dy = y as f64 - center;
            dx * dx + dy * dy <= radius * radius
        }))
    }

    /// The four edge-adjacent pixels (N, S, E, W).
    pub fn four_connected() -> Self {
        Self::from_unit_offsets(&[(-1, 0), (0, -1), (0, 1), (1, 0)])
    }

    /// The eight surrounding pixels, diagonals included.
    pub fn eight_connected() -> Self {
        Self::from_unit_offsets(&[
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ])
    }

    /// Only the pixel above.
    pub fn north_connected() -> Self {
        Self::from_unit_offsets(&[(-1, 0)])
    }

    /// Only the pixel below.
    pub fn south_connected() -> Self {
        Self::from_unit_offsets(&[(1, 0)])
    }

    /// Only the pixel to the right.
    pub fn east_connected() -> Self {
        Self::from_unit_offsets(&[(0, 1)])
    }

    /// Only the pixel to the left.
    pub fn west_connected() -> Self {
        Self::from_unit_offsets(&[(0, -1)])
    }

    fn from_unit_offsets(offsets: &[(i32, i32)]) -> Self {
        let mut kernel = Buffer2::new_filled(3, 3, false);
        for &(dy, dx) in offsets {
            kernel[((dx + 1) as usize, (dy + 1) as usize)] = true;
        }
        Self::new(kernel).expect("3x3 kernel has odd dimensions")
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    pub fn height(&self) -> usize {
        self.kernel.height()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.kernel.width()
    }

    /// Kernel center as `(row, col)`.
    #[inline]
    pub fn center(&self) -> (usize, usize) {
        (self.height() / 2, self.width() / 2)
    }

    /// Active offsets in row-major kernel order.
    #[inline]
    pub fn neighbors(&self) -> &[Neighbor] {
        &self.neighbors
    }

    /// `false` when the kernel has no active cell.
    #[inline]
    pub fn has_neighbors(&self) -> bool {
        !self.neighbors.is_empty()
    }

    #[inline]
    pub fn kernel(&self) -> &Buffer2<bool> {
        &self.kernel
    }

    /// Whether the kernel cell at `(row, col)` is active. Out-of-range cells
    /// are not neighbors.
    pub fn is_neighbor(&self, row: usize, col: usize) -> bool {
        row < self.height() && col < self.width() && *self.kernel.get(col, row)
    }

    // ========================================================================
    // Combinators
    // ========================================================================

    /// Logical NOT of the kernel.
    pub fn complement(&self) -> Self {
        Self::new(self.kernel.map(|&active| !active))
            .expect("complement keeps the odd kernel dimensions")
    }

    /// Union of two neighborhoods on the smallest kernel holding both, with
    /// their centers aligned.
    pub fn merge(a: &Self, b: &Self) -> Result<Self> {
        if !a.has_neighbors() || !b.has_neighbors() {
            return Err(Error::EmptyNeighborhood);
        }

        let height = a.height().max(b.height());
        let width = a.width().max(b.width());
        let mut kernel = Buffer2::new_filled(width, height, false);
        for source in [a, b] {
            // Odd minus odd is even, so the padding splits evenly.
            let pad_y = (height - source.height()) / 2;
            let pad_x = (width - source.width()) / 2;
            for y in 0..source.height() {
                for x in 0..source.width() {
                    if *source.kernel.get(x, y) {
                        kernel[(x + pad_x, y + pad_y)] = true;
                    }
                }
            }
        }

        Self::new(kernel)
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.kernel.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &active in row {
                write!(f, "{}", if active { '#' } else { '.' })?;
            }
        }
        Ok(())
    }
}

fn shape_kernel(
    width: usize,
    height: usize,
    mut active: impl FnMut(usize, usize) -> bool,
) -> Buffer2<bool> {
    let mut kernel = Buffer2::new_filled(width, height, false);
    for y in 0..height {
        for x in 0..width {
            kernel[(x, y)] = active(x, y);
        }
    }
    kernel
}

// ============================================================================
// Serde representation
// ============================================================================

#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct KernelRows(Vec<String>);

impl TryFrom<KernelRows> for Neighborhood {
    type Error = Error;

    fn try_from(rows: KernelRows) -> Result<Self> {
        let rows = rows
            .0
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        '#' => Ok(true),
                        '.' => Ok(false),
                        other => Err(Error::InvalidArgument(format!(
                            "unexpected kernel character {other:?}, expected '#' or '.'"
                        ))),
                    })
                    .collect::<Result<Vec<bool>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(&rows)
    }
}

impl From<Neighborhood> for KernelRows {
    fn from(nbr: Neighborhood) -> Self {
        KernelRows(nbr.to_string().lines().map(str::to_string).collect())
    }
}
