use core::cmp::Ordering;

use super::Layer;

/// Stable sort key for scene shapes.
///
/// Ordering rules (back-to-front):
/// 1) `layer`: ascending
/// 2) `order`: ascending (insertion order for equal layers)
///
/// Within a layer, later insertions paint on top.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SortKey {
    pub layer: Layer,
    /// Insertion index within the same layer, ensuring stable ordering.
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(layer: Layer, order: u32) -> Self {
        Self { layer, order }
    }
}

impl Ord for SortKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        match self.layer.cmp(&other.layer) {
            Ordering::Equal => self.order.cmp(&other.order),
            o => o,
        }
    }
}

impl PartialOrd for SortKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
