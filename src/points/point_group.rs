use crate::error::InputFormatError;
use crate::geometry::{Vec3D, unit_vec_from_ra_dec};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Cosine below which a latitude ring degenerates into a pole.
const POLE_COS_TOLERANCE: f64 = 1e-12;
/// Slack allowed when stepping a latitude band onto its upper bound.
const BOUND_TOLERANCE: f64 = 1e-9;

/// A single ground location on the unit sphere.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct GroundPoint {
    /// Earth fixed unit direction.
    unit: Vec3D<f64>,
    /// Geocentric latitude in radians.
    lat: f64,
    /// Longitude in radians.
    lon: f64,
}

impl GroundPoint {
    pub fn unit(&self) -> Vec3D<f64> { self.unit }

    pub fn lat(&self) -> f64 { self.lat }

    pub fn lon(&self) -> f64 { self.lon }

    /// Earth fixed position on a sphere of the given radius.
    pub fn position(&self, radius: f64) -> Vec3D<f64> { self.unit * radius }
}

/// Latitude/longitude box in radians, used for grid generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLonBounds {
    lat_lower: f64,
    lat_upper: f64,
    lon_lower: f64,
    lon_upper: f64,
}

impl LatLonBounds {
    /// # Returns
    /// `InputFormatError::InvalidGridSpec` unless lower bounds do not exceed upper bounds,
    /// latitudes lie in `[-pi/2, pi/2]` and longitudes in `[-pi, pi]`.
    pub fn new(
        lat_lower: f64,
        lat_upper: f64,
        lon_lower: f64,
        lon_upper: f64,
    ) -> Result<Self, InputFormatError> {
        let lat_ok = (-FRAC_PI_2..=FRAC_PI_2).contains(&lat_lower)
            && (-FRAC_PI_2..=FRAC_PI_2).contains(&lat_upper)
            && lat_lower <= lat_upper;
        let lon_ok = (-PI..=PI).contains(&lon_lower)
            && (-PI..=PI).contains(&lon_upper)
            && lon_lower <= lon_upper;
        if lat_ok && lon_ok {
            Ok(Self { lat_lower, lat_upper, lon_lower, lon_upper })
        } else {
            Err(InputFormatError::InvalidGridSpec)
        }
    }

    /// The whole globe.
    pub fn global() -> Self {
        Self { lat_lower: -FRAC_PI_2, lat_upper: FRAC_PI_2, lon_lower: -PI, lon_upper: PI }
    }

    fn wraps(&self) -> bool { self.lon_upper - self.lon_lower >= TAU - BOUND_TOLERANCE }
}

/// Append-only collection of ground points with stable indices.
#[derive(Debug, Clone, Default)]
pub struct PointGroup {
    points: Vec<GroundPoint>,
}

impl PointGroup {
    pub fn new() -> Self { Self::default() }

    /// Appends points from parallel latitude and longitude lists (radians).
    ///
    /// Either all points are appended or, on an invalid record, none.
    ///
    /// # Returns
    /// The index assigned to the first new point.
    pub fn add_points(&mut self, lats: &[f64], lons: &[f64]) -> Result<usize, InputFormatError> {
        if lats.len() != lons.len() {
            return Err(InputFormatError::LengthMismatch { lats: lats.len(), lons: lons.len() });
        }
        let first = self.points.len();
        let new_points = lats
            .iter()
            .zip(lons)
            .enumerate()
            .map(|(i, (lat, lon))| Self::validated(first + i, *lat, *lon))
            .collect::<Result<Vec<_>, _>>()?;
        self.points.extend(new_points);
        Ok(first)
    }

    /// Appends a single point and returns its index.
    pub fn add_point(&mut self, lat: f64, lon: f64) -> Result<usize, InputFormatError> {
        let index = self.points.len();
        self.points.push(Self::validated(index, lat, lon)?);
        Ok(index)
    }

    fn validated(index: usize, lat: f64, lon: f64) -> Result<GroundPoint, InputFormatError> {
        if !(-FRAC_PI_2..=FRAC_PI_2).contains(&lat) {
            return Err(InputFormatError::LatitudeOutOfRange { index, lat });
        }
        if !(-PI..=PI).contains(&lon) {
            return Err(InputFormatError::LongitudeOutOfRange { index, lon });
        }
        Ok(GroundPoint { unit: unit_vec_from_ra_dec(lon, lat), lat, lon })
    }

    /// Fills a latitude/longitude box with near uniformly spaced points.
    ///
    /// Latitude rings are `resolution` apart, starting at the lower bound. Along a ring
    /// the longitude step is `resolution / cos(lat)`, and rings spanning the full globe are
    /// evenly divided so the antimeridian is not sampled twice. A ring on a pole holds a
    /// single point.
    ///
    /// # Returns
    /// The number of points appended.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn add_points_by_angle(
        &mut self,
        bounds: &LatLonBounds,
        resolution: f64,
    ) -> Result<usize, InputFormatError> {
        if !(resolution > 0.0 && resolution <= PI) {
            return Err(InputFormatError::InvalidGridSpec);
        }
        let mut lats = Vec::new();
        let mut lons = Vec::new();
        let lat_span = bounds.lat_upper - bounds.lat_lower;
        let rings = ((lat_span + BOUND_TOLERANCE) / resolution).floor() as usize;
        for ring in 0..=rings {
            let lat = (bounds.lat_lower + ring as f64 * resolution).min(bounds.lat_upper);
            let cos_lat = lat.cos();
            if cos_lat < POLE_COS_TOLERANCE {
                lats.push(lat);
                lons.push(bounds.lon_lower.max(0.0).min(bounds.lon_upper));
                continue;
            }
            let lon_step = resolution / cos_lat;
            let (count, step) = if bounds.wraps() {
                let count = (TAU / lon_step - BOUND_TOLERANCE).ceil().max(1.0);
                (count as usize, TAU / count)
            } else {
                let span = bounds.lon_upper - bounds.lon_lower;
                (((span + BOUND_TOLERANCE) / lon_step).floor() as usize + 1, lon_step)
            };
            for k in 0..count {
                lats.push(lat);
                lons.push((bounds.lon_lower + k as f64 * step).min(bounds.lon_upper));
            }
        }
        self.add_points(&lats, &lons)?;
        Ok(lats.len())
    }

    pub fn size(&self) -> usize { self.points.len() }

    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    pub fn get(&self, index: usize) -> Option<&GroundPoint> { self.points.get(index) }

    pub fn points(&self) -> &[GroundPoint] { &self.points }

    /// All latitudes and longitudes in index order.
    pub fn lat_lon_vectors(&self) -> (Vec<f64>, Vec<f64>) {
        self.points.iter().map(|p| (p.lat, p.lon)).unzip()
    }

    /// Indices of points above the local horizon of an observer.
    ///
    /// A point with unit direction `u` qualifies if it lies on the observer's hemisphere
    /// and `(r / R - u) . u > 0`, i.e. the line of sight does not pass through the sphere.
    ///
    /// # Arguments
    /// * `observer` - Earth fixed observer position in km.
    /// * `radius` - Sphere radius in km.
    pub fn horizon_candidates(&self, observer: Vec3D<f64>, radius: f64) -> Vec<usize> {
        let scaled = observer / radius;
        self.points
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                let u = p.unit;
                scaled.dot(u) > 0.0 && (scaled - u).dot(u) > 0.0
            })
            .map(|(i, _)| i)
            .collect()
    }
}
