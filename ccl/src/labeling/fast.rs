//! Specialized relaxation for 4- and 8-connectivity.
//!
//! Seeding only looks at the left neighbor, so each horizontal run gets one
//! label. Relaxation then sweeps fixed pixel pairs (above, the two upper
//! diagonals for 8-connectivity, and left) and gives both pixels of a
//! connected pair the smaller label, until a full round changes nothing.

use common::Buffer2;

use super::relaxation::RawLabels;
use super::Connectivity;

pub(super) fn label_fast(mask: &Buffer2<bool>, connectivity: Connectivity) -> RawLabels {
    let mut labels = Buffer2::new_filled(mask.width(), mask.height(), 0u32);
    seed_runs(mask, &mut labels);

    // (dx, dy) of the partner pixel, always above or to the left.
    let pairs: &[(isize, isize)] = match connectivity {
        Connectivity::Four => &[(0, -1), (-1, 0)],
        Connectivity::Eight => &[(0, -1), (-1, -1), (1, -1), (-1, 0)],
    };

    let mut sweeps = 0;
    loop {
        let mut changed = false;
        for &(dx, dy) in pairs {
            changed |= unify_pairs(mask, &mut labels, dx, dy);
        }
        sweeps += 1;
        tracing::trace!(sweep = sweeps, changed, ?connectivity, "pair sweep");
        if !changed {
            break;
        }
    }

    RawLabels { labels, sweeps }
}

/// Row-major seeding that continues the left neighbor's label.
fn seed_runs(mask: &Buffer2<bool>, labels: &mut Buffer2<u32>) {
    let width = mask.width();
    let mut next_label = 1u32;

    for y in 0..mask.height() {
        for x in 0..width {
            if !*mask.get(x, y) {
                continue;
            }
            labels[(x, y)] = if x > 0 && *mask.get(x - 1, y) {
                *labels.get(x - 1, y)
            } else {
                let label = next_label;
                next_label = next_label
                    .checked_add(1)
                    .expect("label counter overflowed u32");
                label
            };
        }
    }
}

/// Sweep every pixel paired with its partner at `(x + dx, y + dy)`.
/// Returns whether any label changed.
fn unify_pairs(mask: &Buffer2<bool>, labels: &mut Buffer2<u32>, dx: isize, dy: isize) -> bool {
    debug_assert!(dy <= 0 && dx.abs() <= 1 && dy.abs() <= 1);
    let width = mask.width() as isize;
    let height = mask.height() as isize;

    let y_start = -dy;
    let x_start = (-dx).max(0);
    let x_end = (width - dx).min(width);

    let mut changed = false;
    for y in y_start..height {
        for x in x_start..x_end {
            let here = (y * width + x) as usize;
            let there = ((y + dy) * width + (x + dx)) as usize;
            if !mask[here] || !mask[there] {
                continue;
            }

            let (a, b) = (labels[here], labels[there]);
            if a != b {
                let smallest = a.min(b);
                labels[here] = smallest;
                labels[there] = smallest;
                changed = true;
            }
        }
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from(rows: &[&str]) -> Buffer2<bool> {
        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|r| r.bytes().map(|b| b == b'#').collect())
            .collect();
        Buffer2::from_rows(&rows).unwrap()
    }

    #[test]
    fn seeding_gives_each_run_one_label() {
        let mask = mask_from(&["##.##", ".###."]);
        let mut labels = Buffer2::new_filled(5, 2, 0u32);
        seed_runs(&mask, &mut labels);

        assert_eq!(labels.pixels(), &[1, 1, 0, 2, 2, 0, 3, 3, 3, 0]);
    }

    #[test]
    fn upper_diagonal_pairs_respect_borders() {
        // Partner to the upper right must not wrap into the previous row.
        // (2, 1) + (1, -1) would land on (0, 1) in a flat index.
        let mask = mask_from(&["...", "#.#"]);
        let mut labels = Buffer2::new(3, 2, vec![0, 0, 0, 1, 0, 2]);

        assert!(!unify_pairs(&mask, &mut labels, 1, -1));
        assert!(!unify_pairs(&mask, &mut labels, -1, -1));
        assert_eq!(labels.pixels(), &[0, 0, 0, 1, 0, 2]);
    }

    #[test]
    fn four_connected_merges_u_shape() {
        let mask = mask_from(&["#.#", "#.#", "###"]);
        let raw = label_fast(&mask, Connectivity::Four);

        assert_eq!(raw.labels.pixels(), &[1, 0, 1, 1, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn eight_connected_follows_anti_diagonal() {
        let mask = mask_from(&["..#", ".#.", "#.."]);
        let four = label_fast(&mask, Connectivity::Four);
        let eight = label_fast(&mask, Connectivity::Eight);

        assert_eq!(four.labels.pixels(), &[0, 0, 1, 0, 2, 0, 3, 0, 0]);
        assert_eq!(eight.labels.pixels(), &[0, 0, 1, 0, 1, 0, 1, 0, 0]);
    }
}
