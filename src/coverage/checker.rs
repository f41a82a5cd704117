use super::state::StateVector;
use crate::config::RunSettings;
use crate::error::FrameError;
use crate::fov::SensorView;
use crate::frames::{EarthRotation, FrameChain};
use crate::geometry::{Matrix3, Vec3D, cone_clock_from_vec};
use crate::instrument::Spacecraft;
use crate::points::PointGroup;
use crate::{event, warn};
use bitvec::{bitbox, boxed::BitBox, order::Lsb0};
use std::sync::Arc;

/// Observation geometry of a single access.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessGeometry {
    /// Distance from spacecraft to ground point in km.
    pub range_km: f64,
    /// Off-nadir angle of the line of sight in radians.
    pub look_angle: f64,
    /// Angle between the reversed line of sight and the local vertical at the point.
    pub incidence_angle: f64,
    /// Sensor frame cone angle of the point.
    pub cone: f64,
    /// Sensor frame clock angle of the point.
    pub clock: f64,
}

/// Points visible at one timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageResult {
    time_index: usize,
    /// Visible point indices in ascending order.
    indices: Vec<usize>,
    /// Geometry per entry of `indices` when geometry recording is enabled, else empty.
    geometry: Vec<AccessGeometry>,
    /// The timestep could not be evaluated.
    skipped: bool,
}

impl CoverageResult {
    /// Result of an externally evaluated timestep, indices are sorted and deduplicated.
    pub fn from_indices(time_index: usize, mut indices: Vec<usize>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self { time_index, indices, geometry: Vec::new(), skipped: false }
    }

    pub(super) fn skipped(time_index: usize) -> Self {
        Self { time_index, indices: Vec::new(), geometry: Vec::new(), skipped: true }
    }

    pub fn time_index(&self) -> usize { self.time_index }

    pub fn indices(&self) -> &[usize] { &self.indices }

    pub fn geometry(&self) -> &[AccessGeometry] { &self.geometry }

    pub fn is_skipped(&self) -> bool { self.skipped }

    pub(super) fn into_parts(self) -> (usize, Vec<usize>, Vec<AccessGeometry>, bool) {
        (self.time_index, self.indices, self.geometry, self.skipped)
    }
}

/// Per-timestep geometry shared by every view evaluated at that timestep.
///
/// Holds the frame chain and the points above the horizon. It is read-only once built and
/// can be handed to further evaluations of the same timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestepGeometry {
    chain: FrameChain,
    candidates: Vec<usize>,
}

impl TimestepGeometry {
    pub fn time_index(&self) -> usize { self.chain.time_index() }

    pub fn chain(&self) -> &FrameChain { &self.chain }

    /// Indices of points above the horizon, ascending.
    pub fn candidates(&self) -> &[usize] { &self.candidates }
}

/// Evaluates which ground points a spacecraft sees at a single timestep.
#[derive(Clone)]
pub struct CoverageChecker {
    points: Arc<PointGroup>,
    spacecraft: Arc<Spacecraft>,
    earth: Arc<dyn EarthRotation>,
    settings: RunSettings,
}

impl CoverageChecker {
    pub fn new(
        points: Arc<PointGroup>,
        spacecraft: Arc<Spacecraft>,
        earth: Arc<dyn EarthRotation>,
        settings: RunSettings,
    ) -> Self {
        Self { points, spacecraft, earth, settings }
    }

    pub fn points(&self) -> &PointGroup { &self.points }

    pub fn spacecraft(&self) -> &Spacecraft { &self.spacecraft }

    pub fn settings(&self) -> &RunSettings { &self.settings }

    /// Builds the frame chain of a timestep and pre-filters the points by horizon.
    pub fn prepare(
        &self,
        state: &StateVector,
        julian_date: f64,
    ) -> Result<TimestepGeometry, FrameError> {
        let chain = FrameChain::build(
            state.time_index(),
            state.position(),
            state.velocity(),
            julian_date,
            self.earth.as_ref(),
            self.spacecraft.body(),
        )?;
        let candidates =
            self.points.horizon_candidates(chain.position_fixed(), self.settings.earth_radius_km);
        Ok(TimestepGeometry { chain, candidates })
    }

    /// Evaluates one timestep against a set of sensor views.
    ///
    /// The result is the ascending union over all views, and over the yaw flipped pass
    /// when enabled. Without any view every point above the horizon is visible. A
    /// degenerate frame is logged and yields an empty, skipped result.
    ///
    /// # Arguments
    /// * `state` - The spacecraft state of the timestep.
    /// * `julian_date` - Epoch of `state`.
    /// * `views` - Sensor views to union.
    /// * `previous` - Geometry of an earlier evaluation, reused if it belongs to the same
    ///   timestep.
    pub fn evaluate(
        &self,
        state: &StateVector,
        julian_date: f64,
        views: &[SensorView],
        previous: Option<&TimestepGeometry>,
    ) -> CoverageResult {
        let fresh;
        let geometry = match previous {
            Some(prev) if prev.time_index() == state.time_index() => prev,
            _ => match self.prepare(state, julian_date) {
                Ok(geometry) => {
                    fresh = geometry;
                    &fresh
                }
                Err(err) => {
                    warn!("Skipping timestep {}: {err}", state.time_index());
                    return CoverageResult::skipped(state.time_index());
                }
            },
        };
        let result = self.evaluate_geometry(geometry, views);
        event!("Timestep {}: {} points visible", result.time_index, result.indices.len());
        result
    }

    /// Evaluates prepared timestep geometry against a set of sensor views.
    pub fn evaluate_geometry(
        &self,
        geometry: &TimestepGeometry,
        views: &[SensorView],
    ) -> CoverageResult {
        let chain = &geometry.chain;
        let mut visible: BitBox<usize, Lsb0> = bitbox![usize, Lsb0; 0; self.points.size()];
        let record_len = if self.settings.record_geometry { self.points.size() } else { 0 };
        let mut records: Vec<Option<AccessGeometry>> = vec![None; record_len];

        if views.is_empty() {
            for &i in &geometry.candidates {
                visible.set(i, true);
            }
        }
        let passes: &[bool] = if self.settings.yaw_180 { &[false, true] } else { &[false] };
        for view in views {
            for &flip in passes {
                let to_sensor = chain.fixed_to_sensor(view.orientation(), flip);
                for &i in &geometry.candidates {
                    if visible[i] {
                        continue;
                    }
                    let Some(point) = self.points.get(i) else { continue };
                    let target = point.position(self.settings.earth_radius_km);
                    let line_of_sight = target - chain.position_fixed();
                    let in_sensor = to_sensor * line_of_sight;
                    if view.fov().contains_direction(in_sensor) {
                        visible.set(i, true);
                        if let Some(record) = records.get_mut(i) {
                            *record = Some(Self::access_geometry(
                                chain,
                                &to_sensor,
                                point.unit(),
                                line_of_sight,
                            ));
                        }
                    }
                }
            }
        }

        let indices: Vec<usize> = visible.iter_ones().collect();
        let geometry = if self.settings.record_geometry {
            indices.iter().filter_map(|i| records[*i]).collect()
        } else {
            Vec::new()
        };
        CoverageResult { time_index: chain.time_index(), indices, geometry, skipped: false }
    }

    fn access_geometry(
        chain: &FrameChain,
        to_sensor: &Matrix3,
        vertical: Vec3D<f64>,
        line_of_sight: Vec3D<f64>,
    ) -> AccessGeometry {
        let (cone, clock) = cone_clock_from_vec(*to_sensor * line_of_sight);
        AccessGeometry {
            range_km: line_of_sight.abs(),
            look_angle: chain.nadir_fixed().angle_to(&line_of_sight),
            incidence_angle: vertical.angle_to(&(-line_of_sight)),
            cone,
            clock,
        }
    }
}
