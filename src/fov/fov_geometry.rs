use super::polygon::SphericalPolygon;
use crate::error::ConfigError;
use crate::geometry::{
    Vec3D, cone_clock_from_vec, diagonal_angle, rectangle_from_corner, unit_vec_from_cone_clock,
};
use std::f64::consts::{PI, TAU};
use std::fmt::{Display, Formatter};

/// Tolerance on the agreement of corner cone angles when recovering a rectangle.
const CORNER_CONE_TOLERANCE: f64 = 1e-9;

/// Sensor field of view shape, expressed in sensor cone/clock space with the boresight
/// along the sensor +Z axis.
#[derive(Debug, Clone, PartialEq)]
pub enum FovGeometry {
    /// Circular cone around the boresight.
    Conical { half_angle: f64 },
    /// Spherical rectangle, `width` spanning the sensor X axis and `height` the Y axis.
    Rectangular { width: f64, height: f64, polygon: SphericalPolygon },
    /// Arbitrary convex polygon with counter-clockwise vertices.
    Custom(SphericalPolygon),
}

impl FovGeometry {
    /// Circular field of view.
    ///
    /// # Arguments
    /// * `half_angle` - Cone half angle in radians, within `(0, pi]`.
    pub fn conical(half_angle: f64) -> Result<Self, ConfigError> {
        if half_angle > 0.0 && half_angle <= PI {
            Ok(FovGeometry::Conical { half_angle })
        } else {
            Err(ConfigError::InvalidHalfAngle { half_angle })
        }
    }

    /// Rectangular field of view from its full angular width and height in radians.
    ///
    /// The four corners sit at cone angle `acos(cos(w/2) cos(h/2))` and clock angles
    /// `c, pi - c, pi + c, 2pi - c` where `c = asin(sin(h/2) / sin(cone))`.
    pub fn rectangular(width: f64, height: f64) -> Result<Self, ConfigError> {
        let valid = |a: f64| a > 0.0 && a < PI;
        if !(valid(width) && valid(height)) {
            return Err(ConfigError::InvalidRectangle { width, height });
        }
        let corner_cone = 0.5 * diagonal_angle(width, height);
        let corner_clock = ((0.5 * height).sin() / corner_cone.sin()).clamp(-1.0, 1.0).asin();
        let clocks = vec![corner_clock, PI - corner_clock, PI + corner_clock, TAU - corner_clock];
        let polygon = SphericalPolygon::from_trusted(vec![corner_cone; 4], clocks);
        Ok(FovGeometry::Rectangular { width, height, polygon })
    }

    /// Custom polygon field of view, see [`SphericalPolygon::new`] for the vertex rules.
    pub fn custom(cones: Vec<f64>, clocks: Vec<f64>) -> Result<Self, ConfigError> {
        SphericalPolygon::new(cones, clocks).map(FovGeometry::Custom)
    }

    /// Recovers a rectangular field of view from a corner based vertex description.
    ///
    /// All corners share the same cone angle, the first corner's clock angle determines
    /// the aspect ratio. A closing fifth vertex is accepted.
    pub fn rectangular_from_corners(cones: &[f64], clocks: &[f64]) -> Result<Self, ConfigError> {
        if cones.len() != clocks.len() {
            return Err(ConfigError::VertexLengthMismatch { cones: cones.len(), clocks: clocks.len() });
        }
        if !(4..=5).contains(&cones.len()) {
            return Err(ConfigError::InvalidCornerCount { count: cones.len() });
        }
        let theta = cones[0];
        if let Some((index, cone)) = cones
            .iter()
            .copied()
            .enumerate()
            .find(|(_, c)| (c - theta).abs() > CORNER_CONE_TOLERANCE)
        {
            return Err(ConfigError::InvalidVertexCone { index, cone });
        }
        let omega = clocks[0].sin().abs().asin();
        let (height, width) = rectangle_from_corner(theta, omega);
        Self::rectangular(width, height)
    }

    /// Largest cone angle of any boundary point of the field of view.
    pub fn max_excursion_angle(&self) -> f64 {
        match self {
            FovGeometry::Conical { half_angle } => *half_angle,
            FovGeometry::Rectangular { polygon, .. } | FovGeometry::Custom(polygon) => {
                polygon.max_excursion()
            }
        }
    }

    /// Full angle of the smallest cone circumscribing the field of view.
    pub fn diagonal_angle(&self) -> f64 {
        match self {
            FovGeometry::Rectangular { width, height, .. } => diagonal_angle(*width, *height),
            _ => 2.0 * self.max_excursion_angle(),
        }
    }

    /// Solid angle in steradians.
    pub fn solid_angle(&self) -> f64 {
        match self {
            FovGeometry::Conical { half_angle } => TAU * (1.0 - half_angle.cos()),
            FovGeometry::Rectangular { polygon, .. } | FovGeometry::Custom(polygon) => {
                polygon.solid_angle()
            }
        }
    }

    /// Edge poles of a polygonal field of view, empty for a conical one.
    pub fn poles(&self) -> &[Vec3D<f64>] {
        match self {
            FovGeometry::Conical { .. } => &[],
            FovGeometry::Rectangular { polygon, .. } | FovGeometry::Custom(polygon) => {
                polygon.poles()
            }
        }
    }

    /// Checks whether the direction at `cone` and `clock` (radians) lies inside.
    pub fn contains(&self, cone: f64, clock: f64) -> bool {
        match self {
            FovGeometry::Conical { half_angle } => cone <= *half_angle,
            FovGeometry::Rectangular { polygon, .. } | FovGeometry::Custom(polygon) => {
                cone <= polygon.max_excursion()
                    && polygon.contains_unit(unit_vec_from_cone_clock(cone, clock))
            }
        }
    }

    /// Checks a direction given in sensor frame coordinates, normalized internally.
    ///
    /// Polygonal shapes test the normalized vector against their poles directly instead of
    /// going through a cone/clock round trip.
    pub fn contains_direction(&self, direction: Vec3D<f64>) -> bool {
        let Some(unit) = direction.normalize() else {
            return false;
        };
        let (cone, _) = cone_clock_from_vec(unit);
        match self {
            FovGeometry::Conical { half_angle } => cone <= *half_angle,
            FovGeometry::Rectangular { polygon, .. } | FovGeometry::Custom(polygon) => {
                cone <= polygon.max_excursion() && polygon.contains_unit(unit)
            }
        }
    }
}

impl Display for FovGeometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FovGeometry::Conical { half_angle } => {
                write!(f, "Conical(half angle {:.3} deg)", half_angle.to_degrees())
            }
            FovGeometry::Rectangular { width, height, .. } => write!(
                f,
                "Rectangular({:.3} x {:.3} deg)",
                width.to_degrees(),
                height.to_degrees()
            ),
            FovGeometry::Custom(polygon) => write!(f, "Custom({} vertices)", polygon.vertices().len()),
        }
    }
}
