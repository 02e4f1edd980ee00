//! Single-pass labeling with a disjoint-set forest.
//!
//! Produces the same partition as relaxation for any neighborhood, without
//! repeated sweeps: each pixel is compared once with the neighbors that
//! precede it in raster order and equivalences are recorded in a union-find.

use common::Buffer2;

use super::relaxation::RawLabels;
use crate::neighborhood::Neighbor;

/// Label `mask` using symmetric `offsets`. Labels are resolved to the
/// smallest label of each set but are not compacted.
pub(super) fn label_union_find(mask: &Buffer2<bool>, offsets: &[Neighbor]) -> RawLabels {
    // With symmetric offsets every edge has one end that sees the other as
    // already visited, so the backward half is enough.
    let backward: Vec<Neighbor> = offsets
        .iter()
        .copied()
        .filter(|n| n.dy < 0 || (n.dy == 0 && n.dx < 0))
        .collect();

    let mut labels = Buffer2::new_filled(mask.width(), mask.height(), 0u32);
    let mut uf = UnionFind::new();

    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if !*mask.get(x, y) {
                continue;
            }

            let mut assigned = None;
            for n in &backward {
                let Some(idx) =
                    labels.signed_index(x as isize + n.dx as isize, y as isize + n.dy as isize)
                else {
                    continue;
                };
                let prev = labels[idx];
                if prev == 0 {
                    continue;
                }
                match assigned {
                    Some(label) if label != prev => uf.union(label, prev),
                    None => assigned = Some(prev),
                    _ => {}
                }
            }

            labels[(x, y)] = assigned.unwrap_or_else(|| uf.make_set());
        }
    }

    for label in labels.iter_mut().filter(|l| **l != 0) {
        *label = uf.find(*label);
    }

    RawLabels { labels, sweeps: 1 }
}

/// Union-find over labels `1..=n` where the smaller root always wins.
#[derive(Debug)]
struct UnionFind {
    /// `parent[label - 1]` is the parent of `label`.
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        Self {
            parent: Vec::with_capacity(256),
        }
    }

    #[inline]
    fn make_set(&mut self) -> u32 {
        let label = u32::try_from(self.parent.len() + 1).expect("label counter overflowed u32");
        self.parent.push(label);
        label
    }

    /// Find root with iterative path compression (two-pass).
    #[inline]
    fn find(&mut self, label: u32) -> u32 {
        let mut root = label;
        loop {
            let parent = self.parent[(root - 1) as usize];
            if parent == root {
                break;
            }
            root = parent;
        }

        let mut current = label;
        while current != root {
            let idx = (current - 1) as usize;
            let parent = self.parent[idx];
            self.parent[idx] = root;
            current = parent;
        }

        root
    }

    #[inline]
    fn union(&mut self, a: u32, b: u32) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            let (smaller, larger) = if root_a < root_b {
                (root_a, root_b)
            } else {
                (root_b, root_a)
            };
            self.parent[(larger - 1) as usize] = smaller;
        }
    }
}
