//! Core simulation primitives.
//!
//! Plain float geometry shared by every mobile entity: vectors and
//! axis-aligned rectangles. Everything above this layer works in terms of
//! these two types.

pub mod rect;
pub mod vec2;

// Re-export core types
pub use rect::Rect;
pub use vec2::Vec2;
