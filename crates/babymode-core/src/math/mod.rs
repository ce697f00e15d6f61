//! Geometry primitives in CSS pixels

mod size;
mod vec2;

pub use size::Size;
pub use vec2::Vec2;
