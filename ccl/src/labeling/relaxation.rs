//! Labeling for arbitrary neighborhoods by seeding and iterative relaxation.
//!
//! 1. Seeding: one row-major sweep. A foreground pixel takes the smallest
//!    label among its already labeled neighbors, or a fresh label.
//! 2. Relaxation: full row-major sweeps over the same buffer. A pixel whose
//!    own label is larger than the smallest label around it takes that
//!    minimum and pushes it onto every foreground neighbor. Sweeps repeat
//!    until one changes nothing.
//!
//! Labels only ever decrease and are bounded below by 1, so the loop ends.
//! The sweep count grows with the longest chain a label must travel, which
//! for snake-like shapes is on the order of `max(width, height)`.

use common::Buffer2;

use crate::neighborhood::Neighbor;

/// Result of a raw labeling pass, before compaction.
#[derive(Debug)]
pub(super) struct RawLabels {
    pub labels: Buffer2<u32>,
    pub sweeps: usize,
}

/// Label `mask` using `offsets`, which must already be symmetric
/// (see [`symmetric_offsets`]).
pub(super) fn label_relaxation(mask: &Buffer2<bool>, offsets: &[Neighbor]) -> RawLabels {
    let mut labels = Buffer2::new_filled(mask.width(), mask.height(), 0u32);
    seed(mask, offsets, &mut labels);

    let mut sweeps = 0;
    loop {
        let changed = relax_sweep(mask, offsets, &mut labels);
        sweeps += 1;
        tracing::trace!(sweep = sweeps, changed, "relaxation sweep");
        if !changed {
            break;
        }
    }

    RawLabels { labels, sweeps }
}

/// Offsets used in both directions, with the center removed.
///
/// A pixel only pushes its minimum along its own offsets, so an offset
/// without its mirror would let the two ends of an edge settle on different
/// labels. Order is the kernel order followed by the missing mirrors.
pub(crate) fn symmetric_offsets(neighbors: &[Neighbor]) -> Vec<Neighbor> {
    let mut offsets: Vec<Neighbor> = neighbors
        .iter()
        .copied()
        .filter(|n| *n != Neighbor::new(0, 0))
        .collect();
    let mirrors: Vec<Neighbor> = offsets
        .iter()
        .map(|n| n.mirrored())
        .filter(|m| !offsets.contains(m))
        .collect();
    for mirror in mirrors {
        if !offsets.contains(&mirror) {
            offsets.push(mirror);
        }
    }
    offsets
}

/// Linear index of `(x, y) + offset`, or `None` when it leaves the buffer.
#[inline]
fn offset_index<T>(buf: &Buffer2<T>, x: usize, y: usize, offset: Neighbor) -> Option<usize> {
    buf.signed_index(x as isize + offset.dx as isize, y as isize + offset.dy as isize)
}

fn seed(mask: &Buffer2<bool>, offsets: &[Neighbor], labels: &mut Buffer2<u32>) {
    let mut next_label = 1u32;

    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if !*mask.get(x, y) {
                continue;
            }

            // Unvisited pixels are still 0, so this only sees labeled foreground.
            let smallest = offsets
                .iter()
                .filter_map(|&n| offset_index(labels, x, y, n))
                .map(|idx| labels[idx])
                .filter(|&l| l != 0)
                .min();

            labels[(x, y)] = match smallest {
                Some(label) => label,
                None => {
                    let label = next_label;
                    next_label = next_label
                        .checked_add(1)
                        .expect("label counter overflowed u32");
                    label
                }
            };
        }
    }
}

/// One full relaxation sweep. Returns whether any label changed.
fn relax_sweep(mask: &Buffer2<bool>, offsets: &[Neighbor], labels: &mut Buffer2<u32>) -> bool {
    let mut changed = false;

    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if !*mask.get(x, y) {
                continue;
            }

            let own = *labels.get(x, y);
            let smallest = offsets
                .iter()
                .filter_map(|&n| offset_index(mask, x, y, n))
                .filter(|&idx| mask[idx])
                .map(|idx| labels[idx])
                .fold(own, u32::min);

            if smallest == own {
                continue;
            }

            debug_assert!(smallest != 0, "foreground pixel relaxed to background");
            labels[(x, y)] = smallest;
            for &n in offsets {
                if let Some(idx) = offset_index(mask, x, y, n) {
                    if mask[idx] {
                        labels[idx] = smallest;
                    }
                }
            }
            changed = true;
        }
    }

    changed
}
