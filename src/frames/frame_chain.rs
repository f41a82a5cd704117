use super::earth::EarthRotation;
use super::orientation::{Orientation, ReferenceFrame};
use crate::error::FrameError;
use crate::geometry::{Matrix3, Vec3D};

/// Relative threshold below which position and velocity count as parallel.
const DEGENERATE_TOLERANCE: f64 = 1e-12;

/// Frame transformation chain for a single timestep.
///
/// All rotations end in the Earth fixed frame, since ground points are stored there:
/// `ECI -> EF -> Nadir -> Body -> Sensor`. Building a chain is the only fallible step of a
/// timestep evaluation, every sensor frame derived from it afterwards is well defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameChain {
    time_index: usize,
    /// Spacecraft position in Earth fixed coordinates (km).
    position_fixed: Vec3D<f64>,
    eci_to_fixed: Matrix3,
    fixed_to_nadir: Matrix3,
    nadir_to_body: Matrix3,
}

impl FrameChain {
    /// Builds the chain from an inertial state.
    ///
    /// # Arguments
    /// * `time_index` - Index of the timestep, carried into errors and logs.
    /// * `position` - Inertial position in km.
    /// * `velocity` - Inertial velocity in km/s.
    /// * `julian_date` - Epoch of the state.
    /// * `earth` - Earth rotation model.
    /// * `body` - Spacecraft bus orientation relative to the nadir frame.
    ///
    /// # Returns
    /// `FrameError::Degenerate` if position and velocity are (anti)parallel or zero.
    pub fn build(
        time_index: usize,
        position: Vec3D<f64>,
        velocity: Vec3D<f64>,
        julian_date: f64,
        earth: &dyn EarthRotation,
        body: &Orientation,
    ) -> Result<Self, FrameError> {
        let eci_to_fixed = earth.inertial_to_fixed(julian_date);
        let position_fixed = eci_to_fixed * position;
        // only the frame rotation is applied, the transport term omega x r is not
        let velocity_fixed = eci_to_fixed * velocity;

        let degenerate = FrameError::Degenerate { time_index };
        let z = (-position_fixed).normalize().ok_or(degenerate)?;
        let normal = z.cross(velocity_fixed);
        if normal.abs() <= DEGENERATE_TOLERANCE * velocity_fixed.abs() {
            return Err(degenerate);
        }
        let x = (-normal).normalize().ok_or(degenerate)?;
        let y = z.cross(x);

        Ok(Self {
            time_index,
            position_fixed,
            eci_to_fixed,
            fixed_to_nadir: Matrix3::from_rows(x, y, z),
            nadir_to_body: body.rotation_matrix(),
        })
    }

    pub fn time_index(&self) -> usize { self.time_index }

    pub fn position_fixed(&self) -> Vec3D<f64> { self.position_fixed }

    /// Unit nadir direction in Earth fixed coordinates.
    pub fn nadir_fixed(&self) -> Vec3D<f64> { self.fixed_to_nadir.row(2) }

    pub fn fixed_to_nadir(&self) -> Matrix3 { self.fixed_to_nadir }

    pub fn fixed_to_body(&self) -> Matrix3 { self.nadir_to_body * self.fixed_to_nadir }

    /// Rotation from Earth fixed into sensor coordinates.
    ///
    /// With `yaw_flip` set, a 180 deg rotation about the nadir (or body) Z axis is inserted
    /// below the sensor mount. Sensors referenced to the inertial or Earth fixed frame do
    /// not follow the spacecraft and are unaffected by the flip. `SensorBodyFixed` is
    /// rejected when instruments are built and is read as body fixed here.
    pub fn fixed_to_sensor(&self, sensor: &Orientation, yaw_flip: bool) -> Matrix3 {
        let mount = sensor.rotation_matrix();
        let flip = |m: Matrix3| if yaw_flip { Orientation::yaw_180() * m } else { m };
        match sensor.frame() {
            ReferenceFrame::EarthCenteredInertial => mount * self.eci_to_fixed.transpose(),
            ReferenceFrame::EarthFixed => mount,
            ReferenceFrame::NadirPointing => mount * flip(self.fixed_to_nadir),
            ReferenceFrame::ScBodyFixed | ReferenceFrame::SensorBodyFixed => {
                mount * flip(self.nadir_to_body) * self.fixed_to_nadir
            }
        }
    }
}
