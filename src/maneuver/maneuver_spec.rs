use crate::error::ConfigError;
use crate::fov::{FovGeometry, SensorView};
use crate::frames::{Orientation, ReferenceFrame};
use crate::geometry::diagonal_angle;
use std::f64::consts::{PI, TAU};
use strum_macros::Display;

/// Closed roll interval about the nadir frame Y axis, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollRange {
    min: f64,
    max: f64,
}

impl RollRange {
    /// # Returns
    /// `ConfigError::InvalidRollRange` unless `-pi <= min < max <= pi`.
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        if min >= -PI && max <= PI && max > min {
            Ok(Self { min, max })
        } else {
            Err(ConfigError::InvalidRollRange { min, max })
        }
    }

    pub fn min(&self) -> f64 { self.min }

    pub fn max(&self) -> f64 { self.max }

    pub fn span(&self) -> f64 { self.max - self.min }

    pub fn center(&self) -> f64 { self.min + 0.5 * self.span() }
}

/// Maneuver envelope of an instrument, always relative to the nadir frame.
#[derive(Debug, Display, Clone, Copy, PartialEq)]
pub enum ManeuverSpec {
    /// Boresight can be pointed anywhere within a cone of full angle `diameter` around nadir.
    #[strum(to_string = "CIRCULAR")]
    Circular { diameter: f64 },
    /// Roll only within a single range.
    #[strum(to_string = "SINGLE_ROLL_ONLY")]
    SingleRollOnly(RollRange),
    /// Roll only within either of two ranges, typically one per side of the ground track.
    #[strum(to_string = "DOUBLE_ROLL_ONLY")]
    DoubleRollOnly(RollRange, RollRange),
}

impl ManeuverSpec {
    /// # Returns
    /// `ConfigError::InvalidManeuverDiameter` unless `diameter` lies in `(0, pi]`.
    pub fn circular(diameter: f64) -> Result<Self, ConfigError> {
        if diameter > 0.0 && diameter <= PI {
            Ok(ManeuverSpec::Circular { diameter })
        } else {
            Err(ConfigError::InvalidManeuverDiameter { diameter })
        }
    }

    pub fn single_roll(min: f64, max: f64) -> Result<Self, ConfigError> {
        Ok(ManeuverSpec::SingleRollOnly(RollRange::new(min, max)?))
    }

    pub fn double_roll(first: (f64, f64), second: (f64, f64)) -> Result<Self, ConfigError> {
        Ok(ManeuverSpec::DoubleRollOnly(
            RollRange::new(first.0, first.1)?,
            RollRange::new(second.0, second.1)?,
        ))
    }

    /// Resolves the field of regard of an instrument into proxy sensors.
    ///
    /// A circular maneuver yields one nadir aligned cone of full angle `diameter` plus the
    /// instrument's circumscribing diameter. A roll range yields one rectangle centered on
    /// the range, widened by the range in the roll direction. The double roll variant
    /// yields one proxy per range, and a point is in the field of regard if either one
    /// contains it.
    ///
    /// # Arguments
    /// * `fov` - The instrument (scene) field of view. Custom polygons are not supported.
    ///
    /// # Returns
    /// One or two proxy sensors, or a `ConfigError` if the combination is unsupported or
    /// the proxy shape leaves the valid angle range.
    pub fn resolve(&self, fov: &FovGeometry) -> Result<Vec<SensorView>, ConfigError> {
        match self {
            ManeuverSpec::Circular { diameter } => {
                let fov_diameter = match fov {
                    FovGeometry::Conical { half_angle } => 2.0 * half_angle,
                    FovGeometry::Rectangular { width, height, .. } => diagonal_angle(*width, *height),
                    FovGeometry::Custom(_) => return Err(ConfigError::UnsupportedManeuverFov),
                };
                let proxy_diameter = diameter + fov_diameter;
                if proxy_diameter > TAU {
                    return Err(ConfigError::ProxyConeOutOfRange { diameter: proxy_diameter });
                }
                let proxy = FovGeometry::conical(0.5 * proxy_diameter)?;
                Ok(vec![SensorView::new(
                    Orientation::aligned(ReferenceFrame::NadirPointing),
                    proxy,
                )])
            }
            ManeuverSpec::SingleRollOnly(range) => Ok(vec![Self::roll_proxy(range, fov)?]),
            ManeuverSpec::DoubleRollOnly(first, second) => {
                Ok(vec![Self::roll_proxy(first, fov)?, Self::roll_proxy(second, fov)?])
            }
        }
    }

    fn roll_proxy(range: &RollRange, fov: &FovGeometry) -> Result<SensorView, ConfigError> {
        let (along_roll, across_roll) = match fov {
            FovGeometry::Conical { half_angle } => (2.0 * half_angle, 2.0 * half_angle),
            FovGeometry::Rectangular { width, height, .. } => (*width, *height),
            FovGeometry::Custom(_) => return Err(ConfigError::UnsupportedManeuverFov),
        };
        let width = range.span() + along_roll;
        let height = across_roll;
        let proxy = FovGeometry::rectangular(width, height)
            .map_err(|_| ConfigError::ProxyRectangleOutOfRange { width, height })?;
        Ok(SensorView::new(
            Orientation::side_look(ReferenceFrame::NadirPointing, range.center()),
            proxy,
        ))
    }
}
