//! Ground point storage and grid generation.

mod grid_resolution;
mod point_group;

pub use grid_resolution::grid_resolution;
pub use point_group::{GroundPoint, LatLonBounds, PointGroup};
