use super::{Shape, SortKey};

/// A single scene entry: sort key + shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    pub key: SortKey,
    pub shape: Shape,
}

/// Recorded shape stream for a frame.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - ordered iteration reuses an internal index buffer; no per-frame allocation once warmed
#[derive(Debug, Default)]
pub struct SceneList {
    items: Vec<SceneItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl SceneList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded shapes. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    /// Records a shape. Paint priority comes from `shape.layer` plus insertion order.
    #[inline]
    pub fn push(&mut self, shape: Shape) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(SceneItem {
            key: SortKey::new(shape.layer, order),
            shape,
        });

        self.sorted_dirty = true;
    }

    /// Iterates shapes front-to-back: highest layer first, later insertions
    /// first within a layer.
    ///
    /// This is the order the compositor consumes. Its per-pixel scan keeps
    /// the first hit, so front shapes must come first.
    pub fn iter_front_to_back(&mut self) -> impl Iterator<Item = &Shape> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().rev().map(|&i| &self.items[i].shape)
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // Stable ordering is ensured by SortKey including insertion order.
        self.sorted_indices
            .sort_by(|&a, &b| self.items[a].key.cmp(&self.items[b].key));

        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::scene::Layer;

    fn tagged(layer: i32, tag: f32) -> Shape {
        Shape::circle(1.0)
            .with_layer(Layer::new(layer))
            .with_color(Color::new(tag, 0.0, 0.0, 1.0))
    }

    fn tags_front_to_back(list: &mut SceneList) -> Vec<f32> {
        list.iter_front_to_back().map(|s| s.color.r).collect()
    }

    // ── ordering ───────────────────────────────────────────────────────────

    #[test]
    fn higher_layers_come_first() {
        let mut list = SceneList::new();
        list.push(tagged(0, 1.0));
        list.push(tagged(5, 2.0));
        list.push(tagged(-3, 3.0));

        assert_eq!(tags_front_to_back(&mut list), vec![2.0, 1.0, 3.0]);
    }

    #[test]
    fn later_insertions_paint_in_front_within_a_layer() {
        let mut list = SceneList::new();
        list.push(tagged(0, 1.0));
        list.push(tagged(0, 2.0));
        list.push(tagged(0, 3.0));

        assert_eq!(tags_front_to_back(&mut list), vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn clear_resets_order_and_items() {
        let mut list = SceneList::new();
        list.push(tagged(1, 1.0));
        list.clear();
        assert!(list.is_empty());

        list.push(tagged(0, 4.0));
        assert_eq!(tags_front_to_back(&mut list), vec![4.0]);
    }
}
