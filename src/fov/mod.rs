//! Field of view shapes and their containment tests.

mod fov_geometry;
mod polygon;
mod sensor_view;

pub use fov_geometry::FovGeometry;
pub use polygon::SphericalPolygon;
pub use sensor_view::SensorView;
