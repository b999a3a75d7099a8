//! Geometry primitives and spatial indexing.

pub mod geometry;
pub mod index;

pub use geometry::{distance, is_degenerate, perpendicular_distance};
