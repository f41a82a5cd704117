//! Immutable spacecraft and instrument aggregate.

use crate::error::ConfigError;
use crate::fov::{FovGeometry, SensorView};
use crate::frames::{Orientation, ReferenceFrame};
use crate::maneuver::ManeuverSpec;
use strum_macros::Display;

/// Which of an instrument's views a coverage run evaluates.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// The instrument field of view at its mounted orientation.
    #[strum(to_string = "field of view")]
    FieldOfView,
    /// The union of the maneuver proxy sensors.
    #[strum(to_string = "field of regard")]
    FieldOfRegard,
}

/// A pointable sensor, validated on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    fov: FovGeometry,
    scene_fov: Option<FovGeometry>,
    orientation: Orientation,
    maneuver: Option<ManeuverSpec>,
    /// Proxy sensors resolved from `maneuver` and the scene field of view.
    field_of_regard: Vec<SensorView>,
    pointing_options: Vec<Orientation>,
}

impl Instrument {
    /// Creates an instrument without scene field of view, maneuver or pointing options.
    ///
    /// # Returns
    /// `ConfigError::InvalidSensorFrame` if the orientation is given in the sensor's own
    /// frame.
    pub fn new(fov: FovGeometry, orientation: Orientation) -> Result<Self, ConfigError> {
        Self::check_mount(&orientation)?;
        Ok(Self {
            fov,
            scene_fov: None,
            orientation,
            maneuver: None,
            field_of_regard: Vec::new(),
            pointing_options: Vec::new(),
        })
    }

    fn check_mount(orientation: &Orientation) -> Result<(), ConfigError> {
        match orientation.frame() {
            ReferenceFrame::SensorBodyFixed => {
                Err(ConfigError::InvalidSensorFrame { frame: orientation.frame() })
            }
            _ => Ok(()),
        }
    }

    /// Sets the scene field of view and re-resolves an existing maneuver against it.
    pub fn with_scene_fov(mut self, scene_fov: FovGeometry) -> Result<Self, ConfigError> {
        self.scene_fov = Some(scene_fov);
        match self.maneuver {
            Some(maneuver) => self.with_maneuver(maneuver),
            None => Ok(self),
        }
    }

    /// Attaches a maneuver envelope and resolves its field of regard.
    pub fn with_maneuver(mut self, maneuver: ManeuverSpec) -> Result<Self, ConfigError> {
        self.field_of_regard = maneuver.resolve(self.scene_fov())?;
        self.maneuver = Some(maneuver);
        Ok(self)
    }

    /// Attaches discrete pointing options, each evaluated on its own.
    pub fn with_pointing_options(mut self, options: Vec<Orientation>) -> Result<Self, ConfigError> {
        options.iter().try_for_each(Self::check_mount)?;
        self.pointing_options = options;
        Ok(self)
    }

    pub fn fov(&self) -> &FovGeometry { &self.fov }

    /// The scene field of view, falling back to the instrument field of view.
    pub fn scene_fov(&self) -> &FovGeometry { self.scene_fov.as_ref().unwrap_or(&self.fov) }

    pub fn orientation(&self) -> &Orientation { &self.orientation }

    pub fn maneuver(&self) -> Option<&ManeuverSpec> { self.maneuver.as_ref() }

    pub fn pointing_options(&self) -> &[Orientation] { &self.pointing_options }

    /// Sensor views evaluated for `mode`.
    ///
    /// # Returns
    /// `ConfigError::MissingViewMode` when the field of regard is requested without a
    /// maneuver.
    pub fn views(&self, mode: ViewMode) -> Result<Vec<SensorView>, ConfigError> {
        match mode {
            ViewMode::FieldOfView => Ok(vec![SensorView::new(self.orientation, self.fov.clone())]),
            ViewMode::FieldOfRegard if self.maneuver.is_some() => Ok(self.field_of_regard.clone()),
            ViewMode::FieldOfRegard => Err(ConfigError::MissingViewMode { what: "maneuver" }),
        }
    }

    /// One single-view list per pointing option, in option order.
    pub fn pointing_option_views(&self) -> Result<Vec<Vec<SensorView>>, ConfigError> {
        if self.pointing_options.is_empty() {
            return Err(ConfigError::MissingViewMode { what: "pointing option" });
        }
        Ok(self
            .pointing_options
            .iter()
            .map(|o| vec![SensorView::new(*o, self.fov.clone())])
            .collect())
    }
}

/// A spacecraft bus carrying at most one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct Spacecraft {
    body: Orientation,
    instruments: Vec<Instrument>,
}

impl Spacecraft {
    /// # Arguments
    /// * `body` - Bus orientation, referenced to the nadir frame.
    /// * `instruments` - Mounted instruments, at most one.
    ///
    /// # Returns
    /// A `ConfigError` for a non nadir referenced bus or more than one instrument.
    pub fn new(body: Orientation, instruments: Vec<Instrument>) -> Result<Self, ConfigError> {
        if body.frame() != ReferenceFrame::NadirPointing {
            return Err(ConfigError::InvalidBodyFrame { frame: body.frame() });
        }
        if instruments.len() > 1 {
            return Err(ConfigError::UnsupportedInstrumentCount { count: instruments.len() });
        }
        Ok(Self { body, instruments })
    }

    /// A nadir aligned spacecraft with a single instrument.
    pub fn with_instrument(instrument: Instrument) -> Self {
        Self { body: Orientation::aligned(ReferenceFrame::NadirPointing), instruments: vec![instrument] }
    }

    pub fn body(&self) -> &Orientation { &self.body }

    pub fn instrument(&self) -> Option<&Instrument> { self.instruments.first() }

    /// Sensor views for `mode`, empty for a bus without instruments.
    pub fn views(&self, mode: ViewMode) -> Result<Vec<SensorView>, ConfigError> {
        self.instrument().map_or(Ok(Vec::new()), |i| i.views(mode))
    }
}

impl Default for Spacecraft {
    fn default() -> Self {
        Self { body: Orientation::aligned(ReferenceFrame::NadirPointing), instruments: Vec::new() }
    }
}
