//! Drawing contract
//!
//! The simulation never rasterises anything itself. Each entity knows how to
//! describe itself to a `Surface`, which the host backs with a canvas, a GPU
//! pipeline or nothing at all.

pub mod shapes;

use glam::Vec2;

use crate::sim::Rect;

/// Straight (non-premultiplied) RGBA, each channel in 0..=1
pub type Rgba = [f32; 4];

/// Build an opaque color from a 0xRRGGBB literal
pub const fn rgb(hex: u32) -> Rgba {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
        1.0,
    ]
}

/// Same color with a different alpha
pub const fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
    [color[0], color[1], color[2], alpha]
}

/// Primitive sink the entities draw into
pub trait Surface {
    /// Start a new frame
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    /// Filled ellipse with the given half-axes, rotated by `rotation` radians
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, color: Rgba);
}

/// Something that can put itself on a surface
pub trait Draw {
    fn draw(&self, surface: &mut dyn Surface);
}

/// Surface that discards everything (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self) {}

    fn fill_rect(&mut self, _rect: Rect, _color: Rgba) {}

    fn fill_ellipse(&mut self, _center: Vec2, _radii: Vec2, _rotation: f32, _color: Rgba) {}
}
