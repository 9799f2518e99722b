use crate::coords::{Mat3, Vec2};
use crate::paint::Color;

use super::Layer;

/// Shape geometry in local space, centered at the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Primitive {
    Circle { radius: f32 },
    Rect { half_extent: Vec2 },
}

/// A filled primitive placed in the scene.
///
/// `transform` maps local space to scene space. The fill is a single solid
/// color; overlap is resolved by paint order, not blending.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Shape {
    pub primitive: Primitive,
    pub transform: Mat3,
    pub color: Color,
    pub layer: Layer,
}

impl Shape {
    pub fn circle(radius: f32) -> Self {
        Self {
            primitive: Primitive::Circle { radius },
            transform: Mat3::identity(),
            color: Color::WHITE,
            layer: Layer::default(),
        }
    }

    pub fn rect(width: f32, height: f32) -> Self {
        Self {
            primitive: Primitive::Rect {
                half_extent: Vec2::new(width / 2.0, height / 2.0),
            },
            transform: Mat3::identity(),
            color: Color::WHITE,
            layer: Layer::default(),
        }
    }

    pub fn with_transform(mut self, transform: Mat3) -> Self {
        self.transform = transform;
        self
    }

    /// Places the shape at `position` (replaces the whole transform).
    pub fn with_position(self, position: Vec2) -> Self {
        self.with_transform(Mat3::translate(position.x, position.y))
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }
}
