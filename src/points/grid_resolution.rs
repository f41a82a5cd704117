use crate::error::InputFormatError;
use crate::fov::FovGeometry;

/// Recommended grid spacing (radians) for an observer at `orbit_radius`.
///
/// The spacing is `factor` times the Earth central angle covered by the smallest
/// dimension of the scene field of view, so that a footprint always catches at least one
/// grid point. Without a field of view, or with one wider than the horizon, the full
/// horizon angle is used.
///
/// # Arguments
/// * `orbit_radius` - Orbit radius (semi-major axis) in km.
/// * `scene_fov` - Scene field of view of the instrument, if any.
/// * `factor` - Fraction of the footprint used as spacing, typically `0.9`.
/// * `earth_radius` - Sphere radius in km.
pub fn grid_resolution(
    orbit_radius: f64,
    scene_fov: Option<&FovGeometry>,
    factor: f64,
    earth_radius: f64,
) -> Result<f64, InputFormatError> {
    if !(orbit_radius > earth_radius && earth_radius > 0.0 && factor > 0.0) {
        return Err(InputFormatError::InvalidGridSpec);
    }
    let sin_rho = earth_radius / orbit_radius;
    let horizon_angle = 2.0 * sin_rho.asin();
    let fov = scene_fov.map_or(horizon_angle, smallest_dimension).min(horizon_angle);
    let half_fov = 0.5 * fov;
    let x = (half_fov.sin() / sin_rho).min(1.0);
    let elevation = x.acos();
    let lambda = std::f64::consts::FRAC_PI_2 - half_fov - elevation;
    Ok(2.0 * lambda * factor)
}

fn smallest_dimension(fov: &FovGeometry) -> f64 {
    match fov {
        FovGeometry::Conical { half_angle } => 2.0 * half_angle,
        FovGeometry::Rectangular { width, height, .. } => width.min(*height),
        FovGeometry::Custom(polygon) => {
            2.0 * polygon.cones().iter().copied().fold(f64::INFINITY, f64::min)
        }
    }
}
