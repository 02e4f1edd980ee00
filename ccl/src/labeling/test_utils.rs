//! Shared helpers for labeling tests.

use common::Buffer2;
use hashbrown::HashMap;
use rand::rngs::StdRng;
use rand::Rng;

use super::LabelMap;
use crate::neighborhood::Neighbor;

/// Mask from `#`/`.` rows.
pub(crate) fn mask_from(rows: &[&str]) -> Buffer2<bool> {
    let rows: Vec<Vec<bool>> = rows
        .iter()
        .map(|r| r.bytes().map(|b| b == b'#').collect())
        .collect();
    Buffer2::from_rows(&rows).unwrap()
}

pub(crate) fn random_mask(rng: &mut StdRng, width: usize, height: usize, density: f64) -> Buffer2<bool> {
    let pixels = (0..width * height).map(|_| rng.random_bool(density)).collect();
    Buffer2::new(width, height, pixels)
}

/// Simple flood-fill reference implementation for ground truth comparison.
/// Naive and slow but obviously correct. Every offset is followed in both
/// directions.
pub(crate) fn reference_labels(mask: &Buffer2<bool>, offsets: &[Neighbor]) -> (Vec<u32>, usize) {
    let mut both_ways: Vec<Neighbor> = offsets.to_vec();
    both_ways.extend(offsets.iter().map(|n| n.mirrored()));

    let mut labels = vec![0u32; mask.len()];
    let mut current_label = 0u32;

    for start_y in 0..mask.height() {
        for start_x in 0..mask.width() {
            let start_idx = mask.index(start_x, start_y);
            if !mask[start_idx] || labels[start_idx] != 0 {
                continue;
            }

            current_label += 1;
            let mut stack = vec![(start_x, start_y)];

            while let Some((x, y)) = stack.pop() {
                let idx = mask.index(x, y);
                if labels[idx] != 0 || !mask[idx] {
                    continue;
                }
                labels[idx] = current_label;

                for n in &both_ways {
                    let nx = x as isize + n.dx as isize;
                    let ny = y as isize + n.dy as isize;
                    if mask.signed_index(nx, ny).is_some() {
                        stack.push((nx as usize, ny as usize));
                    }
                }
            }
        }
    }

    (labels, current_label as usize)
}

/// Verify two labelings have the same grouping (same pixels grouped together).
pub(crate) fn verify_same_grouping(labels_a: &[u32], labels_b: &[u32]) {
    assert_eq!(labels_a.len(), labels_b.len());
    let mut a_to_b: HashMap<u32, u32> = HashMap::new();
    let mut b_to_a: HashMap<u32, u32> = HashMap::new();

    for (i, (&la, &lb)) in labels_a.iter().zip(labels_b).enumerate() {
        if la == 0 && lb == 0 {
            continue;
        }
        assert!(
            la != 0 && lb != 0,
            "Pixel {i} has label {la} in A but {lb} in B (one is background)"
        );

        let expected_b = *a_to_b.entry(la).or_insert(lb);
        assert_eq!(
            lb, expected_b,
            "Inconsistent grouping: label {la} in A maps to both {expected_b} and {lb} in B"
        );
        let expected_a = *b_to_a.entry(lb).or_insert(la);
        assert_eq!(
            la, expected_a,
            "Inconsistent grouping: label {lb} in B maps to both {expected_a} and {la} in A"
        );
    }
}

/// Background is 0 exactly where the mask is unset, and labels are dense
/// `1..=num_labels` in first-seen row-major order.
pub(crate) fn assert_label_contract(mask: &Buffer2<bool>, map: &LabelMap) {
    assert_eq!(map.width(), mask.width());
    assert_eq!(map.height(), mask.height());

    let mut next_expected = 1u32;
    for (i, (&label, &set)) in map.labels().iter().zip(mask.iter()).enumerate() {
        assert_eq!(label != 0, set, "pixel {i}: label {label}, mask {set}");
        if label == next_expected {
            next_expected += 1;
        } else {
            assert!(
                label < next_expected,
                "pixel {i}: label {label} appears before {next_expected}"
            );
        }
    }
    assert_eq!(next_expected as usize - 1, map.num_labels());
}
