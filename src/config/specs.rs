use crate::error::ConfigError;
use crate::fov::FovGeometry;
use crate::frames::{EulerSequence, Orientation, ReferenceFrame};
use crate::instrument::{Instrument, Spacecraft};
use crate::maneuver::ManeuverSpec;

/// Field of view description with angles in degrees.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "shape", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FovSpec {
    #[serde(alias = "CIRCULAR")]
    Conical {
        #[serde(rename = "fullConeAngle", alias = "diameter")]
        full_cone_angle: f64,
    },
    #[serde(rename_all = "camelCase")]
    Rectangular { angle_height: f64, angle_width: f64 },
    #[serde(rename_all = "camelCase")]
    Custom { custom_cone_angles_vector: Vec<f64>, custom_clock_angles_vector: Vec<f64> },
}

impl TryFrom<&FovSpec> for FovGeometry {
    type Error = ConfigError;

    fn try_from(spec: &FovSpec) -> Result<Self, Self::Error> {
        match spec {
            FovSpec::Conical { full_cone_angle } => {
                FovGeometry::conical(0.5 * full_cone_angle.to_radians())
            }
            FovSpec::Rectangular { angle_height, angle_width } => {
                FovGeometry::rectangular(angle_width.to_radians(), angle_height.to_radians())
            }
            FovSpec::Custom { custom_cone_angles_vector, custom_clock_angles_vector } => {
                FovGeometry::custom(
                    custom_cone_angles_vector.iter().map(|a| a.to_radians()).collect(),
                    custom_clock_angles_vector.iter().map(|a| a.to_radians()).collect(),
                )
            }
        }
    }
}

fn default_sequence() -> [u8; 3] { [1, 2, 3] }

/// How the angles of an [`OrientationSpec`] are given.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrientationConvention {
    #[default]
    Euler,
    SideLook,
    Xyz,
    RefFrameAligned,
}

/// Orientation description, angles in degrees.
///
/// A missing `referenceFrame` is resolved by the owner of the orientation: sensor mounts
/// and pointing options fall back to `SC_BODY_FIXED`, the spacecraft bus to
/// `NADIR_POINTING`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_frame: Option<ReferenceFrame>,
    #[serde(default)]
    pub convention: OrientationConvention,
    #[serde(default)]
    pub euler_angles: [f64; 3],
    #[serde(default = "default_sequence")]
    pub euler_sequence: [u8; 3],
    #[serde(default)]
    pub side_look_angle: f64,
    #[serde(default)]
    pub x_rotation: f64,
    #[serde(default)]
    pub y_rotation: f64,
    #[serde(default)]
    pub z_rotation: f64,
}

impl Default for OrientationSpec {
    fn default() -> Self {
        Self {
            reference_frame: None,
            convention: OrientationConvention::default(),
            euler_angles: [0.0; 3],
            euler_sequence: default_sequence(),
            side_look_angle: 0.0,
            x_rotation: 0.0,
            y_rotation: 0.0,
            z_rotation: 0.0,
        }
    }
}

impl OrientationSpec {
    /// Converts to an [`Orientation`], using `default_frame` when no frame is given.
    pub fn to_orientation(&self, default_frame: ReferenceFrame) -> Result<Orientation, ConfigError> {
        let frame = self.reference_frame.unwrap_or(default_frame);
        let (angles, sequence) = match self.convention {
            OrientationConvention::Euler => {
                let [first, second, third] = self.euler_sequence;
                (self.euler_angles, EulerSequence::new(first, second, third)?)
            }
            OrientationConvention::SideLook => ([0.0, self.side_look_angle, 0.0], EulerSequence::XYZ),
            OrientationConvention::Xyz => {
                ([self.x_rotation, self.y_rotation, self.z_rotation], EulerSequence::XYZ)
            }
            OrientationConvention::RefFrameAligned => ([0.0; 3], EulerSequence::XYZ),
        };
        Orientation::new(frame, angles.map(f64::to_radians), sequence)
    }
}

/// Sensor mount conversion, defaulting to the spacecraft body frame.
impl TryFrom<&OrientationSpec> for Orientation {
    type Error = ConfigError;

    fn try_from(spec: &OrientationSpec) -> Result<Self, Self::Error> {
        spec.to_orientation(ReferenceFrame::ScBodyFixed)
    }
}

/// Maneuver envelope description, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "maneuverType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ManeuverSpecInput {
    Circular {
        diameter: f64,
    },
    SingleRollOnly {
        #[serde(rename = "A_rollMin")]
        roll_min: f64,
        #[serde(rename = "A_rollMax")]
        roll_max: f64,
    },
    DoubleRollOnly {
        #[serde(rename = "A_rollMin")]
        a_roll_min: f64,
        #[serde(rename = "A_rollMax")]
        a_roll_max: f64,
        #[serde(rename = "B_rollMin")]
        b_roll_min: f64,
        #[serde(rename = "B_rollMax")]
        b_roll_max: f64,
    },
}

impl TryFrom<&ManeuverSpecInput> for ManeuverSpec {
    type Error = ConfigError;

    fn try_from(spec: &ManeuverSpecInput) -> Result<Self, Self::Error> {
        match *spec {
            ManeuverSpecInput::Circular { diameter } => ManeuverSpec::circular(diameter.to_radians()),
            ManeuverSpecInput::SingleRollOnly { roll_min, roll_max } => {
                ManeuverSpec::single_roll(roll_min.to_radians(), roll_max.to_radians())
            }
            ManeuverSpecInput::DoubleRollOnly { a_roll_min, a_roll_max, b_roll_min, b_roll_max } => {
                ManeuverSpec::double_roll(
                    (a_roll_min.to_radians(), a_roll_max.to_radians()),
                    (b_roll_min.to_radians(), b_roll_max.to_radians()),
                )
            }
        }
    }
}

/// Instrument description as read from a mission file.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentSpec {
    pub field_of_view_geometry: FovSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_field_of_view_geometry: Option<FovSpec>,
    #[serde(default)]
    pub orientation: OrientationSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maneuver: Option<ManeuverSpecInput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pointing_option: Vec<OrientationSpec>,
}

impl TryFrom<&InstrumentSpec> for Instrument {
    type Error = ConfigError;

    fn try_from(spec: &InstrumentSpec) -> Result<Self, Self::Error> {
        let mut instrument = Instrument::new(
            FovGeometry::try_from(&spec.field_of_view_geometry)?,
            Orientation::try_from(&spec.orientation)?,
        )?;
        if let Some(scene) = &spec.scene_field_of_view_geometry {
            instrument = instrument.with_scene_fov(FovGeometry::try_from(scene)?)?;
        }
        if let Some(maneuver) = &spec.maneuver {
            instrument = instrument.with_maneuver(ManeuverSpec::try_from(maneuver)?)?;
        }
        if !spec.pointing_option.is_empty() {
            let options = spec
                .pointing_option
                .iter()
                .map(Orientation::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            instrument = instrument.with_pointing_options(options)?;
        }
        Ok(instrument)
    }
}

/// Spacecraft bus orientation and its instruments.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacecraftSpec {
    #[serde(default)]
    pub bus_orientation: OrientationSpec,
    #[serde(default)]
    pub instrument: Vec<InstrumentSpec>,
}

impl TryFrom<&SpacecraftSpec> for Spacecraft {
    type Error = ConfigError;

    fn try_from(spec: &SpacecraftSpec) -> Result<Self, Self::Error> {
        let instruments =
            spec.instrument.iter().map(Instrument::try_from).collect::<Result<Vec<_>, _>>()?;
        let body = spec.bus_orientation.to_orientation(ReferenceFrame::NadirPointing)?;
        Spacecraft::new(body, instruments)
    }
}
