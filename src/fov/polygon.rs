use crate::error::ConfigError;
use crate::geometry::{Vec3D, unit_vec_from_cone_clock};
use itertools::Itertools;
use std::f64::consts::{FRAC_PI_2, PI};

/// Tolerance used to detect a closing vertex that repeats the first one.
const CLOSING_VERTEX_TOLERANCE: f64 = 1e-12;

/// Convex spherical polygon in sensor cone/clock space.
///
/// Each edge is a great circle arc between consecutive vertices. The pole of edge `i` is
/// `v_i x v_(i+1)`, and with counter-clockwise vertices every pole points into the polygon,
/// so a direction is inside exactly when its dot product with all poles is positive.
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalPolygon {
    cones: Vec<f64>,
    clocks: Vec<f64>,
    vertices: Vec<Vec3D<f64>>,
    poles: Vec<Vec3D<f64>>,
    max_excursion: f64,
}

impl SphericalPolygon {
    /// Builds a polygon from vertices known to be convex and counter-clockwise.
    pub(super) fn from_trusted(cones: Vec<f64>, clocks: Vec<f64>) -> Self {
        let vertices = cones
            .iter()
            .zip(&clocks)
            .map(|(cone, clock)| unit_vec_from_cone_clock(*cone, *clock))
            .collect_vec();
        let poles = vertices
            .iter()
            .circular_tuple_windows()
            .map(|(a, b)| a.cross(*b))
            .collect_vec();
        let max_excursion = cones.iter().copied().fold(0.0, f64::max);
        Self { cones, clocks, vertices, poles, max_excursion }
    }

    /// Builds a validated polygon from parallel cone and clock lists in radians.
    ///
    /// A trailing vertex equal to the first one closes the ring and is dropped.
    ///
    /// # Returns
    /// A `ConfigError` if the lists differ in length, fewer than three distinct vertices
    /// remain, a cone angle lies outside `(0, pi/2)`, or the ring is not convex and
    /// counter-clockwise.
    pub fn new(mut cones: Vec<f64>, mut clocks: Vec<f64>) -> Result<Self, ConfigError> {
        if cones.len() != clocks.len() {
            return Err(ConfigError::VertexLengthMismatch { cones: cones.len(), clocks: clocks.len() });
        }
        if cones.len() > 3 && Self::closes_ring(&cones, &clocks) {
            cones.pop();
            clocks.pop();
        }
        if cones.len() < 3 {
            return Err(ConfigError::TooFewVertices { count: cones.len() });
        }
        if let Some((index, cone)) =
            cones.iter().copied().enumerate().find(|(_, c)| !(*c > 0.0 && *c < FRAC_PI_2))
        {
            return Err(ConfigError::InvalidVertexCone { index, cone });
        }
        if clocks.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::NonFiniteAngle { name: "clock" });
        }

        let polygon = Self::from_trusted(cones, clocks);
        let n = polygon.vertices.len();
        for (edge, pole) in polygon.poles.iter().enumerate() {
            let others_inside = (0..n)
                .filter(|j| *j != edge && *j != (edge + 1) % n)
                .all(|j| pole.dot(polygon.vertices[j]) > 0.0);
            if !others_inside {
                return Err(ConfigError::NotCounterClockwise { edge });
            }
        }
        Ok(polygon)
    }

    fn closes_ring(cones: &[f64], clocks: &[f64]) -> bool {
        let (Some(first), Some(last)) = (cones.first().zip(clocks.first()), cones.last().zip(clocks.last()))
        else {
            return false;
        };
        unit_vec_from_cone_clock(*first.0, *first.1)
            .approx_eq(&unit_vec_from_cone_clock(*last.0, *last.1), CLOSING_VERTEX_TOLERANCE)
    }

    pub fn cones(&self) -> &[f64] { &self.cones }

    pub fn clocks(&self) -> &[f64] { &self.clocks }

    pub fn vertices(&self) -> &[Vec3D<f64>] { &self.vertices }

    /// Edge poles, `poles()[i] = vertices()[i] x vertices()[i + 1]`.
    pub fn poles(&self) -> &[Vec3D<f64>] { &self.poles }

    /// Largest cone angle of any boundary point, attained at a vertex.
    pub fn max_excursion(&self) -> f64 { self.max_excursion }

    /// Checks a unit direction against every edge pole.
    pub fn contains_unit(&self, direction: Vec3D<f64>) -> bool {
        self.poles.iter().all(|pole| pole.dot(direction) > 0.0)
    }

    /// Solid angle in steradians from the spherical excess of the interior angles.
    #[allow(clippy::cast_precision_loss)]
    pub fn solid_angle(&self) -> f64 {
        let n = self.poles.len();
        let interior: f64 = (0..n)
            .map(|i| PI - self.poles[(i + n - 1) % n].angle_to(&self.poles[i]))
            .sum();
        interior - (n as f64 - 2.0) * PI
    }
}
