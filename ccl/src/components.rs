//! Per-component measurements over a [`LabelMap`].

use crate::labeling::LabelMap;

/// Axis-aligned bounding box with inclusive `usize` bounds: a pixel at
/// `(x, y)` is inside if `x_min <= x <= x_max` and `y_min <= y <= y_max`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aabb {
    pub x_min: usize,
    pub x_max: usize,
    pub y_min: usize,
    pub y_max: usize,
}

impl Aabb {
    #[inline]
    pub const fn new(x_min: usize, x_max: usize, y_min: usize, y_max: usize) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Inverted box that takes the bounds of the first included point.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            x_min: usize::MAX,
            x_max: 0,
            y_min: usize::MAX,
            y_max: 0,
        }
    }

    #[inline]
    pub fn include(&mut self, x: usize, y: usize) {
        self.x_min = self.x_min.min(x);
        self.x_max = self.x_max.max(x);
        self.y_min = self.y_min.min(y);
        self.y_max = self.y_max.max(y);
    }

    #[inline]
    pub const fn width(&self) -> usize {
        self.x_max.saturating_sub(self.x_min) + 1
    }

    #[inline]
    pub const fn height(&self) -> usize {
        self.y_max.saturating_sub(self.y_min) + 1
    }

    #[inline]
    pub const fn area(&self) -> usize {
        self.width() * self.height()
    }

    #[inline]
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

/// One connected component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    pub label: u32,
    /// Number of pixels.
    pub area: usize,
    pub bbox: Aabb,
}

impl LabelMap {
    /// All components ordered by label.
    pub fn components(&self) -> Vec<Component> {
        let mut components: Vec<Component> = (1..=self.num_labels() as u32)
            .map(|label| Component {
                label,
                area: 0,
                bbox: Aabb::empty(),
            })
            .collect();

        for y in 0..self.height() {
            for x in 0..self.width() {
                let label = self.label_at(x, y);
                if label == 0 {
                    continue;
                }
                let component = &mut components[(label - 1) as usize];
                component.area += 1;
                component.bbox.include(x, y);
            }
        }

        components
    }

    /// Pixel count of each component, indexed by `label - 1`.
    pub fn component_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.num_labels()];
        for &label in self.labels().iter().filter(|&&l| l != 0) {
            sizes[(label - 1) as usize] += 1;
        }
        sizes
    }
}
