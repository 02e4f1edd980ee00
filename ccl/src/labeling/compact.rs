//! Renumbering of provisional labels into `1..=K`.

use hashbrown::HashMap;

/// Rewrite `labels` so that foreground labels form the contiguous range
/// `1..=K`, numbered in order of first appearance. Background (0) is left
/// untouched. Returns `K`.
///
/// Only label values change; cells that shared a label still do, and cells
/// that differed still differ.
pub fn compact_labels(labels: &mut [u32]) -> usize {
    let mut remap: HashMap<u32, u32> = HashMap::new();

    for label in labels.iter_mut().filter(|l| **l != 0) {
        let next = remap.len() as u32 + 1;
        *label = *remap.entry(*label).or_insert(next);
    }

    remap.len()
}
