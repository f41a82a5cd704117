use crate::error::InputFormatError;
use crate::frames::julian_date_at;
use crate::geometry::Vec3D;
use chrono::{DateTime, Utc};

/// Inertial spacecraft state at one propagation step.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateVector {
    /// Index of the propagation step.
    time_index: usize,
    /// Seconds since the trajectory epoch.
    elapsed: f64,
    /// Position in km.
    position: Vec3D<f64>,
    /// Velocity in km/s.
    velocity: Vec3D<f64>,
}

impl StateVector {
    pub fn new(time_index: usize, elapsed: f64, position: Vec3D<f64>, velocity: Vec3D<f64>) -> Self {
        Self { time_index, elapsed, position, velocity }
    }

    pub fn time_index(&self) -> usize { self.time_index }

    pub fn elapsed(&self) -> f64 { self.elapsed }

    pub fn position(&self) -> Vec3D<f64> { self.position }

    pub fn velocity(&self) -> Vec3D<f64> { self.velocity }

    fn validate(&self) -> Result<(), InputFormatError> {
        let time_index = self.time_index;
        if !(self.elapsed.is_finite() && self.position.is_finite() && self.velocity.is_finite()) {
            return Err(InputFormatError::NonFiniteState { time_index });
        }
        if self.position.abs() == 0.0 {
            return Err(InputFormatError::ZeroPosition { time_index });
        }
        Ok(())
    }
}

/// Ordered sequence of states sharing an epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    epoch: DateTime<Utc>,
    states: Vec<StateVector>,
}

impl Trajectory {
    /// Validates and wraps propagated states.
    ///
    /// # Returns
    /// An `InputFormatError` for non-finite or zero-position states and for time indices
    /// that are not strictly increasing.
    pub fn new(epoch: DateTime<Utc>, states: Vec<StateVector>) -> Result<Self, InputFormatError> {
        for (position, state) in states.iter().enumerate() {
            state.validate()?;
            if position > 0 && states[position - 1].time_index >= state.time_index {
                return Err(InputFormatError::OutOfOrder { position, time_index: state.time_index });
            }
        }
        Ok(Self { epoch, states })
    }

    pub fn epoch(&self) -> DateTime<Utc> { self.epoch }

    pub fn states(&self) -> &[StateVector] { &self.states }

    pub fn len(&self) -> usize { self.states.len() }

    pub fn is_empty(&self) -> bool { self.states.is_empty() }

    /// Julian date of a state of this trajectory.
    pub fn julian_date(&self, state: &StateVector) -> f64 { julian_date_at(self.epoch, state.elapsed) }
}
