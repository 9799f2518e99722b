use core::cmp::Ordering;

/// Paint-layer key for shapes.
///
/// Higher values appear on top of lower values.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Layer(pub i32);

impl Layer {
    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }
}

impl Ord for Layer {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for Layer {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
