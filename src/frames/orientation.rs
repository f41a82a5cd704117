use crate::error::ConfigError;
use crate::geometry::Matrix3;
use std::f64::consts::PI;
use strum_macros::{Display, EnumIter, EnumString};

/// Reference frames an orientation can be expressed in.
#[derive(
    Debug,
    Display,
    EnumString,
    EnumIter,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferenceFrame {
    /// Earth equator inertial frame (EarthMJ2000Eq-like).
    EarthCenteredInertial,
    /// Earth fixed frame, referenced to the equator and prime meridian.
    EarthFixed,
    /// Local orbital frame, Z towards nadir, X along `-(Z x V)` and `Y = Z x X`.
    NadirPointing,
    /// Frame fixed to the spacecraft bus.
    ScBodyFixed,
    /// Frame fixed to the sensor, boresight along +Z.
    SensorBodyFixed,
}

/// Euler rotation sequence of three principal axis indices (`1` = X, `2` = Y, `3` = Z).
///
/// Twelve sequences are valid: the six Tait-Bryan permutations of `1, 2, 3` and the six
/// proper Euler sequences such as `3-1-3`. Consecutive axes must differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EulerSequence([u8; 3]);

impl EulerSequence {
    /// The default `1-2-3` sequence.
    pub const XYZ: EulerSequence = EulerSequence([1, 2, 3]);

    pub fn new(first: u8, second: u8, third: u8) -> Result<Self, ConfigError> {
        let in_range = |a: u8| (1..=3).contains(&a);
        if in_range(first) && in_range(second) && in_range(third) && first != second && second != third
        {
            Ok(Self([first, second, third]))
        } else {
            Err(ConfigError::InvalidEulerSequence { first, second, third })
        }
    }

    pub fn axes(&self) -> [u8; 3] { self.0 }
}

impl Default for EulerSequence {
    fn default() -> Self { Self::XYZ }
}

/// Orientation of a frame relative to a reference frame, parameterized by three
/// intrinsic Euler rotations.
///
/// Sequence `a-b-c` with angles `(t1, t2, t3)` yields `R = R_c(t3) * R_b(t2) * R_a(t1)`,
/// each factor a coordinate system rotation (see [`Matrix3::axis_rotation`]). The result
/// maps reference frame components into the oriented frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Frame the angles are interpreted in.
    frame: ReferenceFrame,
    /// Euler angles in radians, in rotation order.
    angles: [f64; 3],
    /// Axis order the angles are applied in.
    sequence: EulerSequence,
}

impl Orientation {
    /// Creates a validated orientation.
    ///
    /// # Arguments
    /// * `frame` - The reference frame the rotation is relative to.
    /// * `angles` - The three Euler angles in radians.
    /// * `sequence` - The axis sequence the angles are applied in.
    ///
    /// # Returns
    /// `ConfigError::NonFiniteAngle` if any angle is `NaN` or infinite.
    pub fn new(
        frame: ReferenceFrame,
        angles: [f64; 3],
        sequence: EulerSequence,
    ) -> Result<Self, ConfigError> {
        const NAMES: [&str; 3] = ["euler_angle1", "euler_angle2", "euler_angle3"];
        if let Some(i) = angles.iter().position(|a| !a.is_finite()) {
            return Err(ConfigError::NonFiniteAngle { name: NAMES[i] });
        }
        Ok(Self { frame, angles, sequence })
    }

    /// Identity orientation, aligned with `frame`.
    pub const fn aligned(frame: ReferenceFrame) -> Self {
        Self { frame, angles: [0.0; 3], sequence: EulerSequence::XYZ }
    }

    /// Rotation about the Y axis of `frame` only, positive counter-clockwise.
    ///
    /// In the nadir frame this rolls the boresight cross-track.
    pub const fn side_look(frame: ReferenceFrame, angle: f64) -> Self {
        Self { frame, angles: [0.0, angle, 0.0], sequence: EulerSequence::XYZ }
    }

    /// Rotations about X, then Y, then Z of `frame`.
    pub const fn from_xyz_rotations(frame: ReferenceFrame, x: f64, y: f64, z: f64) -> Self {
        Self { frame, angles: [x, y, z], sequence: EulerSequence::XYZ }
    }

    pub fn frame(&self) -> ReferenceFrame { self.frame }

    pub fn angles(&self) -> [f64; 3] { self.angles }

    pub fn sequence(&self) -> EulerSequence { self.sequence }

    pub fn is_identity(&self) -> bool { self.angles.iter().all(|a| *a == 0.0) }

    /// Rotation matrix from the reference frame into the oriented frame.
    pub fn rotation_matrix(&self) -> Matrix3 {
        self.sequence.0.iter().zip(self.angles).fold(Matrix3::identity(), |acc, (axis, angle)| {
            // sequence axes are always in 1..=3
            Matrix3::axis_rotation(*axis, angle).unwrap_or_else(Matrix3::identity) * acc
        })
    }

    /// The rotation applied for the two-look yaw flip, 180 deg about the nadir axis.
    pub fn yaw_180() -> Matrix3 { Matrix3::z_rotation(PI) }
}

impl Default for Orientation {
    fn default() -> Self { Self::aligned(ReferenceFrame::ScBodyFixed) }
}
