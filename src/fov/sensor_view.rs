use super::FovGeometry;
use crate::frames::Orientation;

/// A field of view mounted with an orientation.
///
/// This is either an instrument's own view or a proxy sensor approximating (part of) its
/// field of regard.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorView {
    orientation: Orientation,
    fov: FovGeometry,
}

impl SensorView {
    pub fn new(orientation: Orientation, fov: FovGeometry) -> Self { Self { orientation, fov } }

    pub fn orientation(&self) -> &Orientation { &self.orientation }

    pub fn fov(&self) -> &FovGeometry { &self.fov }
}
