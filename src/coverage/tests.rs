use super::{
    AccessInterval, AccessTable, CoverageChecker, CoverageResult, CoverageRun, StateVector,
    Trajectory,
};
use crate::config::RunSettings;
use crate::error::{CoverageError, InputFormatError};
use crate::fov::FovGeometry;
use crate::frames::{
    EARTH_RADIUS_KM, EarthRotation, MeanSiderealRotation, NonRotatingEarth, Orientation,
    ReferenceFrame, julian_date,
};
use crate::geometry::{Vec3D, ra_dec_from_vec};
use crate::instrument::{Instrument, Spacecraft, ViewMode};
use crate::maneuver::ManeuverSpec;
use crate::points::{LatLonBounds, PointGroup};
use chrono::{TimeZone, Utc};
use std::f64::consts::PI;
use std::sync::Arc;

const ALTITUDE_KM: f64 = 700.0;
const SPEED: f64 = 7.5;

fn deg(d: f64) -> f64 { d.to_radians() }

fn sequential() -> RunSettings { RunSettings { parallel: false, ..RunSettings::default() } }

fn sat_radius() -> f64 { EARTH_RADIUS_KM + ALTITUDE_KM }

/// Equatorial state over longitude 0 moving east, so the nadir frame is
/// X = +Z (cross-track), Y = +Y (along-track), Z = -X (nadir).
fn overhead_state(time_index: usize) -> StateVector {
    StateVector::new(
        time_index,
        time_index as f64 * 10.0,
        Vec3D::new(sat_radius(), 0.0, 0.0),
        Vec3D::new(0.0, SPEED, 0.0),
    )
}

/// Latitude and longitude hit by a ray from the overhead position along an Earth fixed
/// direction.
fn ground_hit(direction: Vec3D<f64>) -> (f64, f64) {
    let sat = Vec3D::new(sat_radius(), 0.0, 0.0);
    let d = direction.normalize().unwrap();
    let b = sat.dot(d);
    let c = sat.dot(sat) - EARTH_RADIUS_KM * EARTH_RADIUS_KM;
    let t = -b - (b * b - c).sqrt();
    let (ra, dec) = ra_dec_from_vec(sat + d * t);
    (dec, if ra > PI { ra - 2.0 * PI } else { ra })
}

/// Ground point seen at `off_nadir` towards an Earth fixed axis from the overhead state.
fn off_nadir_point(off_nadir: f64, towards: Vec3D<f64>) -> (f64, f64) {
    let nadir = Vec3D::new(-1.0, 0.0, 0.0);
    ground_hit(nadir * off_nadir.cos() + towards * off_nadir.sin())
}

fn checker(points: PointGroup, spacecraft: Spacecraft, settings: RunSettings) -> CoverageChecker {
    CoverageChecker::new(Arc::new(points), Arc::new(spacecraft), Arc::new(NonRotatingEarth), settings)
}

fn nadir_instrument(fov: FovGeometry) -> Instrument {
    Instrument::new(fov, Orientation::aligned(ReferenceFrame::NadirPointing)).unwrap()
}

fn epoch() -> chrono::DateTime<Utc> { Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap() }

fn near_nadir_grid() -> PointGroup {
    let mut points = PointGroup::new();
    let bounds = LatLonBounds::new(deg(-12.0), deg(12.0), deg(-12.0), deg(12.0)).unwrap();
    points.add_points_by_angle(&bounds, deg(0.25)).unwrap();
    points
}

#[test]
fn test_rectangular_end_to_end() {
    let mut points = PointGroup::new();
    points.add_point(0.0, 0.0).unwrap();
    let (lat, lon) = off_nadir_point(deg(20.0), Vec3D::new(0.0, 1.0, 0.0));
    points.add_point(lat, lon).unwrap();
    let (lat, lon) = off_nadir_point(deg(10.0), Vec3D::new(0.0, 0.0, 1.0));
    points.add_point(lat, lon).unwrap();

    let instrument = nadir_instrument(FovGeometry::rectangular(deg(30.0), deg(10.0)).unwrap());
    let checker = checker(points, Spacecraft::with_instrument(instrument), sequential());
    let views = checker.spacecraft().views(ViewMode::FieldOfView).unwrap();
    let state = overhead_state(0);
    let result = checker.evaluate(&state, 2_451_545.0, &views, None);
    // nadir point and the point 10 deg along the wide axis, not the one 20 deg along-track
    assert_eq!(result.indices(), &[0, 2]);
    assert!(!result.is_skipped());
}

#[test]
fn test_evaluation_is_idempotent() {
    let instrument = nadir_instrument(FovGeometry::rectangular(deg(8.0), deg(3.0)).unwrap());
    let checker = checker(near_nadir_grid(), Spacecraft::with_instrument(instrument), sequential());
    let views = checker.spacecraft().views(ViewMode::FieldOfView).unwrap();
    let state = overhead_state(3);
    let first = checker.evaluate(&state, 2_451_545.0, &views, None);
    let second = checker.evaluate(&state, 2_451_545.0, &views, None);
    assert!(!first.indices().is_empty());
    assert_eq!(first, second);
    assert!(first.indices().windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_previous_geometry_is_reused_only_for_same_timestep() {
    let instrument = nadir_instrument(FovGeometry::conical(deg(4.0)).unwrap());
    let checker = checker(near_nadir_grid(), Spacecraft::with_instrument(instrument), sequential());
    let views = checker.spacecraft().views(ViewMode::FieldOfView).unwrap();
    let state = overhead_state(0);
    let geometry = checker.prepare(&state, 2_451_545.0).unwrap();
    let cached = checker.evaluate(&state, 2_451_545.0, &views, Some(&geometry));
    let fresh = checker.evaluate(&state, 2_451_545.0, &views, None);
    assert_eq!(cached, fresh);

    // geometry of another timestep is ignored
    let moved =
        StateVector::new(1, 10.0, Vec3D::new(0.0, sat_radius(), 0.0), Vec3D::new(-SPEED, 0.0, 0.0));
    let result = checker.evaluate(&moved, 2_451_545.0, &views, Some(&geometry));
    assert_eq!(result.time_index(), 1);
    assert!(result.indices().is_empty());
}

#[test]
fn test_yaw_flip_symmetric_fov_is_unchanged() {
    let instrument = nadir_instrument(FovGeometry::rectangular(deg(10.0), deg(10.0)).unwrap());
    let spacecraft = Spacecraft::with_instrument(instrument);
    let plain = checker(near_nadir_grid(), spacecraft.clone(), sequential());
    let flipped = checker(near_nadir_grid(), spacecraft, RunSettings { yaw_180: true, ..sequential() });
    let views = plain.spacecraft().views(ViewMode::FieldOfView).unwrap();
    let state = overhead_state(0);
    let a = plain.evaluate(&state, 2_451_545.0, &views, None);
    let b = flipped.evaluate(&state, 2_451_545.0, &views, None);
    assert!(!a.indices().is_empty());
    assert_eq!(a.indices(), b.indices());
}

#[test]
fn test_yaw_flip_asymmetric_pointing_adds_mirror_image() {
    let rolled = Orientation::side_look(ReferenceFrame::NadirPointing, deg(6.0));
    let instrument = Instrument::new(FovGeometry::rectangular(deg(6.0), deg(4.0)).unwrap(), rolled).unwrap();
    let spacecraft = Spacecraft::with_instrument(instrument);
    let plain = checker(near_nadir_grid(), spacecraft.clone(), sequential());
    let flipped = checker(near_nadir_grid(), spacecraft, RunSettings { yaw_180: true, ..sequential() });
    let views = plain.spacecraft().views(ViewMode::FieldOfView).unwrap();
    let state = overhead_state(0);
    let a = plain.evaluate(&state, 2_451_545.0, &views, None);
    let b = flipped.evaluate(&state, 2_451_545.0, &views, None);
    assert!(!a.indices().is_empty());
    assert!(a.indices().iter().all(|i| b.indices().contains(i)));
    assert!(b.indices().len() > a.indices().len());
}

#[test]
fn test_double_roll_union() {
    let mut points = PointGroup::new();
    // 30 deg off-nadir towards +X of the nadir frame, only the positive roll range reaches it
    let (lat, lon) = off_nadir_point(deg(30.0), Vec3D::new(0.0, 0.0, 1.0));
    points.add_point(lat, lon).unwrap();
    let maneuver = ManeuverSpec::double_roll((deg(-40.0), deg(-20.0)), (deg(20.0), deg(40.0))).unwrap();
    let instrument = nadir_instrument(FovGeometry::conical(deg(2.0)).unwrap()).with_maneuver(maneuver).unwrap();
    let checker = checker(points, Spacecraft::with_instrument(instrument), sequential());
    let proxies = checker.spacecraft().views(ViewMode::FieldOfRegard).unwrap();
    assert_eq!(proxies.len(), 2);
    let state = overhead_state(0);
    let first_only = checker.evaluate(&state, 2_451_545.0, &proxies[..1], None);
    let second_only = checker.evaluate(&state, 2_451_545.0, &proxies[1..], None);
    let union = checker.evaluate(&state, 2_451_545.0, &proxies, None);
    assert!(first_only.indices().is_empty());
    assert_eq!(second_only.indices(), &[0]);
    assert_eq!(union.indices(), &[0]);
    // the plain field of view does not reach that far
    let fov = checker.spacecraft().views(ViewMode::FieldOfView).unwrap();
    assert!(checker.evaluate(&state, 2_451_545.0, &fov, None).indices().is_empty());
}

#[test]
fn test_degenerate_timestep_is_skipped() {
    let mut points = PointGroup::new();
    points.add_point(0.0, 0.0).unwrap();
    let instrument = nadir_instrument(FovGeometry::conical(deg(5.0)).unwrap());
    let checker = checker(points, Spacecraft::with_instrument(instrument), sequential());
    let views = checker.spacecraft().views(ViewMode::FieldOfView).unwrap();
    let radial = StateVector::new(4, 40.0, Vec3D::new(sat_radius(), 0.0, 0.0), Vec3D::new(1.0, 0.0, 0.0));
    let result = checker.evaluate(&radial, 2_451_545.0, &views, None);
    assert!(result.is_skipped());
    assert!(result.indices().is_empty());
    assert_eq!(result.time_index(), 4);
}

#[test]
fn test_bus_without_instrument_sees_horizon() {
    let mut points = PointGroup::new();
    points.add_points(&[0.0, 0.0, 0.0], &[0.0, deg(20.0), deg(90.0)]).unwrap();
    let checker = checker(points, Spacecraft::default(), sequential());
    let views = checker.spacecraft().views(ViewMode::FieldOfRegard).unwrap();
    assert!(views.is_empty());
    let result = checker.evaluate(&overhead_state(0), 2_451_545.0, &views, None);
    assert_eq!(result.indices(), &[0, 1]);
}

#[test]
fn test_geometry_records() {
    let mut points = PointGroup::new();
    points.add_point(0.0, 0.0).unwrap();
    let (lat, lon) = off_nadir_point(deg(3.0), Vec3D::new(0.0, 0.0, 1.0));
    points.add_point(lat, lon).unwrap();
    let instrument = nadir_instrument(FovGeometry::conical(deg(5.0)).unwrap());
    let settings = RunSettings { record_geometry: true, ..sequential() };
    let checker = checker(points, Spacecraft::with_instrument(instrument), settings);
    let views = checker.spacecraft().views(ViewMode::FieldOfView).unwrap();
    let result = checker.evaluate(&overhead_state(0), 2_451_545.0, &views, None);
    assert_eq!(result.indices(), &[0, 1]);
    let nadir = result.geometry()[0];
    assert!((nadir.range_km - ALTITUDE_KM).abs() < 1e-6);
    assert!(nadir.look_angle.abs() < 1e-6);
    assert!(nadir.incidence_angle.abs() < 1e-6);
    let side = result.geometry()[1];
    assert!((side.look_angle - deg(3.0)).abs() < 1e-7);
    assert!((side.cone - deg(3.0)).abs() < 1e-7);
    assert!(side.clock.abs() < 1e-7 || (side.clock - 2.0 * PI).abs() < 1e-7);
    // incidence exceeds the look angle by the earth central angle
    assert!(side.incidence_angle > side.look_angle);
}

#[test]
fn test_rotating_earth_moves_ground_track() {
    let jd = julian_date(epoch());
    let theta = MeanSiderealRotation.sidereal_angle(jd);
    let mut points = PointGroup::new();
    points.add_points(&[0.0, 0.0], &[0.0, deg(45.0)]).unwrap();
    let instrument = nadir_instrument(FovGeometry::conical(deg(2.0)).unwrap());
    let checker = CoverageChecker::new(
        Arc::new(points),
        Arc::new(Spacecraft::with_instrument(instrument)),
        Arc::new(MeanSiderealRotation),
        sequential(),
    );
    // inertial position that lies over longitude 0 at this epoch
    let state = StateVector::new(
        0,
        0.0,
        Vec3D::new(sat_radius() * theta.cos(), sat_radius() * theta.sin(), 0.0),
        Vec3D::new(-SPEED * theta.sin(), SPEED * theta.cos(), 0.0),
    );
    let views = checker.spacecraft().views(ViewMode::FieldOfView).unwrap();
    assert_eq!(checker.evaluate(&state, jd, &views, None).indices(), &[0]);
}

fn sweep_trajectory() -> Trajectory {
    // timestep 2 has a radial velocity and cannot be evaluated
    let mut states = (0..5).map(overhead_state).collect::<Vec<_>>();
    states[2] = StateVector::new(2, 20.0, Vec3D::new(sat_radius(), 0.0, 0.0), Vec3D::new(2.0, 0.0, 0.0));
    Trajectory::new(epoch(), states).unwrap()
}

fn single_point_run(settings: RunSettings) -> CoverageRun {
    let mut points = PointGroup::new();
    points.add_points(&[0.0, 0.0], &[0.0, deg(60.0)]).unwrap();
    let instrument = nadir_instrument(FovGeometry::conical(deg(5.0)).unwrap());
    CoverageRun::new(checker(points, Spacecraft::with_instrument(instrument), settings))
}

#[test]
fn test_run_produces_sparse_table() {
    let table = single_point_run(sequential()).run(&sweep_trajectory(), ViewMode::FieldOfView).unwrap();
    let rows = table.rows().iter().map(|r| (r.time_index, r.point)).collect::<Vec<_>>();
    assert_eq!(rows, vec![(0, 0), (1, 0), (3, 0), (4, 0)]);
    assert_eq!(table.skipped_timesteps(), &[2]);
    assert_eq!(table.timesteps(), 5);
    assert!(table.points_at(2).is_empty());
    assert_eq!(table.points_at(3), vec![0]);
    assert_eq!(table.access_counts(2), vec![4, 0]);
    assert_eq!(
        table.intervals(),
        vec![
            AccessInterval { point: 0, start: 0, end: 1 },
            AccessInterval { point: 0, start: 3, end: 4 },
        ]
    );
}

#[test]
fn test_parallel_run_matches_sequential() {
    let trajectory = sweep_trajectory();
    let parallel = RunSettings { parallel: true, ..RunSettings::default() };
    let a = single_point_run(sequential()).run(&trajectory, ViewMode::FieldOfView).unwrap();
    let b = single_point_run(parallel).run(&trajectory, ViewMode::FieldOfView).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_cancelled_run_returns_no_table() {
    let run = single_point_run(sequential());
    run.cancellation_token().cancel();
    let res = run.run(&sweep_trajectory(), ViewMode::FieldOfView);
    assert_eq!(res, Err(CoverageError::Cancelled { completed: 0 }));
}

#[test]
fn test_field_of_regard_requires_maneuver() {
    let res = single_point_run(sequential()).run(&sweep_trajectory(), ViewMode::FieldOfRegard);
    assert!(matches!(res, Err(CoverageError::Configuration { .. })));
}

#[test]
fn test_pointing_options_are_not_unioned() {
    let mut points = PointGroup::new();
    let (lat, lon) = off_nadir_point(deg(20.0), Vec3D::new(0.0, 0.0, 1.0));
    points.add_point(lat, lon).unwrap();
    points.add_point(0.0, 0.0).unwrap();
    let options = vec![
        Orientation::side_look(ReferenceFrame::NadirPointing, deg(-20.0)),
        Orientation::side_look(ReferenceFrame::NadirPointing, deg(20.0)),
        Orientation::aligned(ReferenceFrame::NadirPointing),
    ];
    let instrument = nadir_instrument(FovGeometry::conical(deg(3.0)).unwrap())
        .with_pointing_options(options)
        .unwrap();
    let run = CoverageRun::new(checker(points, Spacecraft::with_instrument(instrument), sequential()));
    let trajectory = Trajectory::new(epoch(), vec![overhead_state(0), overhead_state(1)]).unwrap();
    let tables = run.run_pointing_options(&trajectory).unwrap();
    assert_eq!(tables.len(), 3);
    assert!(tables[0].is_empty());
    assert_eq!(tables[1].points_at(0), vec![0]);
    assert_eq!(tables[2].points_at(1), vec![1]);
}

#[test]
fn test_access_table_from_results() {
    let mut table = AccessTable::new();
    table.push_result(CoverageResult::from_indices(0, vec![3, 1, 3]));
    table.push_result(CoverageResult::from_indices(1, vec![]));
    table.push_result(CoverageResult::from_indices(2, vec![1]));
    table.push_result(CoverageResult::from_indices(3, vec![1, 2]));
    assert_eq!(table.len(), 5);
    assert_eq!(table.points_at(0), vec![1, 3]);
    assert!(table.points_at(1).is_empty());
    assert_eq!(table.access_counts(4), vec![0, 3, 1, 1]);
    assert_eq!(
        table.intervals(),
        vec![
            AccessInterval { point: 1, start: 0, end: 0 },
            AccessInterval { point: 1, start: 2, end: 3 },
            AccessInterval { point: 2, start: 3, end: 3 },
            AccessInterval { point: 3, start: 0, end: 0 },
        ]
    );
}

#[test]
fn test_trajectory_validation() {
    let ok = overhead_state(0);
    assert!(matches!(
        Trajectory::new(epoch(), vec![overhead_state(1), ok]),
        Err(InputFormatError::OutOfOrder { position: 1, time_index: 0 })
    ));
    assert!(matches!(
        Trajectory::new(epoch(), vec![ok, ok]),
        Err(InputFormatError::OutOfOrder { position: 1, .. })
    ));
    let nan = StateVector::new(1, 0.0, Vec3D::new(f64::NAN, 0.0, 0.0), Vec3D::zero());
    assert_eq!(
        Trajectory::new(epoch(), vec![ok, nan]),
        Err(InputFormatError::NonFiniteState { time_index: 1 })
    );
    let zero = StateVector::new(2, 0.0, Vec3D::zero(), Vec3D::new(0.0, 1.0, 0.0));
    assert_eq!(
        Trajectory::new(epoch(), vec![zero]),
        Err(InputFormatError::ZeroPosition { time_index: 2 })
    );
}

#[tokio::test]
async fn test_run_async() {
    let run = Arc::new(single_point_run(sequential()));
    let trajectory = Arc::new(sweep_trajectory());
    let expected = run.run(&trajectory, ViewMode::FieldOfView).unwrap();
    let table = Arc::clone(&run).run_async(Arc::clone(&trajectory), ViewMode::FieldOfView).await.unwrap();
    assert_eq!(table, expected);
}
