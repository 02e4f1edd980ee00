//! Connected component labeling.
//!
//! Three strategies share one output contract:
//! - [`label_generic`]: seeding plus iterative relaxation for any
//!   [`Neighborhood`].
//! - [`label_four_connected`] / [`label_eight_connected`]: the same relaxation
//!   hard-coded to unit offsets, sweeping fixed pixel pairs.
//! - [`label_union_find`]: a single raster pass with a disjoint-set forest.
//!
//! Every result is compacted so that labels run from 1 to the number of
//! components with 0 for background.

#[cfg(test)]
pub(crate) mod test_utils;

mod compact;
mod fast;
mod relaxation;
mod union_find;

pub use compact::compact_labels;

use std::borrow::Cow;
use std::time::Instant;

use common::Buffer2;
use serde::{Deserialize, Serialize};

use crate::config::{Config, LabelingMethod};
use crate::error::{Error, Result};
use crate::mask::Mask;
use crate::neighborhood::{Neighbor, Neighborhood};
use relaxation::{symmetric_offsets, RawLabels};

// ============================================================================
// Connectivity
// ============================================================================

/// Pixel connectivity for the fast labeling paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    /// Horizontal and vertical neighbors only.
    #[default]
    Four,
    /// Horizontal, vertical and diagonal neighbors.
    Eight,
}

impl Connectivity {
    /// Equivalent neighborhood for the generic labelers.
    pub fn neighborhood(self) -> Neighborhood {
        match self {
            Self::Four => Neighborhood::four_connected(),
            Self::Eight => Neighborhood::eight_connected(),
        }
    }
}

// ============================================================================
// LabelMap
// ============================================================================

/// A 2D label map from connected component analysis.
///
/// Each pixel holds the label of its component, `0` for background and
/// `1..=num_labels` for foreground.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    labels: Buffer2<u32>,
    num_labels: usize,
}

impl LabelMap {
    /// Compact raw labels and wrap them.
    pub fn from_raw(mut labels: Buffer2<u32>) -> Self {
        let num_labels = compact_labels(labels.pixels_mut());
        Self { labels, num_labels }
    }

    /// Number of connected components (excluding background).
    #[inline]
    pub fn num_labels(&self) -> usize {
        self.num_labels
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.labels.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.labels.height()
    }

    /// Raw labels in row-major order.
    #[inline]
    pub fn labels(&self) -> &[u32] {
        self.labels.pixels()
    }

    #[inline]
    pub fn label_at(&self, x: usize, y: usize) -> u32 {
        *self.labels.get(x, y)
    }

    #[inline]
    pub fn as_buffer(&self) -> &Buffer2<u32> {
        &self.labels
    }

    #[inline]
    pub fn into_buffer(self) -> Buffer2<u32> {
        self.labels
    }
}

impl std::ops::Index<usize> for LabelMap {
    type Output = u32;

    #[inline]
    fn index(&self, idx: usize) -> &Self::Output {
        &self.labels[idx]
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Label `mask` under an arbitrary neighborhood by seeding and relaxation.
///
/// Offsets connect in both directions: listing only "north" still joins a
/// pixel with the one below it.
pub fn label_generic(mask: &impl Mask, nbr: &Neighborhood) -> Result<LabelMap> {
    let offsets = checked_offsets(nbr)?;
    let grid = unpack_checked(mask);
    let started = Instant::now();
    let raw = relaxation::label_relaxation(&grid, &offsets);
    Ok(finish("relaxation", started, raw))
}

/// Label `mask` with 4-connectivity.
pub fn label_four_connected(mask: &impl Mask) -> LabelMap {
    let grid = unpack_checked(mask);
    let started = Instant::now();
    let raw = fast::label_fast(&grid, Connectivity::Four);
    finish("fast four", started, raw)
}

/// Label `mask` with 8-connectivity.
pub fn label_eight_connected(mask: &impl Mask) -> LabelMap {
    let grid = unpack_checked(mask);
    let started = Instant::now();
    let raw = fast::label_fast(&grid, Connectivity::Eight);
    finish("fast eight", started, raw)
}

/// Label `mask` under an arbitrary neighborhood with union-find.
///
/// Same partition and errors as [`label_generic`].
pub fn label_union_find(mask: &impl Mask, nbr: &Neighborhood) -> Result<LabelMap> {
    let offsets = checked_offsets(nbr)?;
    let grid = unpack_checked(mask);
    let started = Instant::now();
    let raw = union_find::label_union_find(&grid, &offsets);
    Ok(finish("union-find", started, raw))
}

/// Label `mask` with the adjacency and strategy chosen in `config`.
pub fn label_with_config(mask: &impl Mask, config: &Config) -> Result<LabelMap> {
    config.validate()?;

    match (&config.neighborhood, config.method) {
        (None, LabelingMethod::Auto) => Ok(match config.connectivity {
            Connectivity::Four => label_four_connected(mask),
            Connectivity::Eight => label_eight_connected(mask),
        }),
        (Some(nbr), LabelingMethod::Auto | LabelingMethod::Relaxation) => label_generic(mask, nbr),
        (None, LabelingMethod::Relaxation) => {
            label_generic(mask, &config.connectivity.neighborhood())
        }
        (Some(nbr), LabelingMethod::UnionFind) => label_union_find(mask, nbr),
        (None, LabelingMethod::UnionFind) => {
            label_union_find(mask, &config.connectivity.neighborhood())
        }
    }
}

fn checked_offsets(nbr: &Neighborhood) -> Result<Vec<Neighbor>> {
    if !nbr.has_neighbors() {
        return Err(Error::EmptyNeighborhood);
    }
    Ok(symmetric_offsets(nbr.neighbors()))
}

fn unpack_checked(mask: &impl Mask) -> Cow<'_, Buffer2<bool>> {
    assert!(
        mask.width()
            .checked_mul(mask.height())
            .is_some_and(|n| n <= u32::MAX as usize),
        "mask of {}x{} pixels cannot be labeled with u32 labels",
        mask.width(),
        mask.height()
    );
    mask.to_bool_buffer()
}

fn finish(strategy: &str, started: Instant, raw: RawLabels) -> LabelMap {
    let map = LabelMap::from_raw(raw.labels);
    tracing::debug!(
        strategy,
        width = map.width(),
        height = map.height(),
        sweeps = raw.sweeps,
        components = map.num_labels(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "labeling finished"
    );
    map
}
