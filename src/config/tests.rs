use super::{
    FovSpec, InstrumentSpec, ManeuverSpecInput, OrientationConvention, OrientationSpec, PARALLEL_VAR,
    RECORD_GEOMETRY_VAR, RunSettings, SpacecraftSpec, YAW_180_VAR,
};
use crate::error::ConfigError;
use crate::fov::FovGeometry;
use crate::frames::{EARTH_RADIUS_KM, Orientation, ReferenceFrame};
use crate::instrument::{Instrument, Spacecraft, ViewMode};
use crate::maneuver::ManeuverSpec;
use rand::Rng;
use std::collections::HashMap;

fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-12 }

#[test]
fn test_conical_spec_accepts_circular_alias() {
    let specs = [
        r#"{"shape": "CONICAL", "fullConeAngle": 25}"#,
        r#"{"shape": "CIRCULAR", "diameter": 25}"#,
    ];
    for raw in specs {
        let spec: FovSpec = serde_json::from_str(raw).unwrap();
        let FovGeometry::Conical { half_angle } = FovGeometry::try_from(&spec).unwrap() else {
            panic!("expected a conical fov from {raw}");
        };
        assert!(close(half_angle, 12.5_f64.to_radians()));
    }
}

#[test]
fn test_rectangular_and_custom_specs() {
    let spec: FovSpec =
        serde_json::from_str(r#"{"shape": "RECTANGULAR", "angleHeight": 5, "angleWidth": 15}"#).unwrap();
    let FovGeometry::Rectangular { width, height, .. } = FovGeometry::try_from(&spec).unwrap() else {
        panic!("expected a rectangular fov");
    };
    assert!(close(width, 15_f64.to_radians()));
    assert!(close(height, 5_f64.to_radians()));

    let spec: FovSpec = serde_json::from_str(
        r#"{"shape": "CUSTOM",
            "customConeAnglesVector": [10, 10, 10, 10],
            "customClockAnglesVector": [0, 90, 180, 270]}"#,
    )
    .unwrap();
    let fov = FovGeometry::try_from(&spec).unwrap();
    assert!(fov.contains(5_f64.to_radians(), 0.3));
    assert!(!fov.contains(12_f64.to_radians(), 0.0));

    let clockwise = FovSpec::Custom {
        custom_cone_angles_vector: vec![10.0, 10.0, 10.0],
        custom_clock_angles_vector: vec![0.0, 240.0, 120.0],
    };
    assert!(matches!(
        FovGeometry::try_from(&clockwise),
        Err(ConfigError::NotCounterClockwise { .. })
    ));
}

#[test]
fn test_unknown_shape_is_rejected() {
    let res = serde_json::from_str::<FovSpec>(r#"{"shape": "ELLIPTICAL", "diameter": 3}"#);
    assert!(res.is_err());
}

#[test]
fn test_orientation_spec_defaults() {
    let spec: OrientationSpec = serde_json::from_str("{}").unwrap();
    assert_eq!(spec, OrientationSpec::default());
    let orientation = Orientation::try_from(&spec).unwrap();
    assert_eq!(orientation, Orientation::aligned(ReferenceFrame::ScBodyFixed));

    let spec: OrientationSpec = serde_json::from_str(
        r#"{"referenceFrame": "NADIR_POINTING", "eulerAngles": [0, 30, 0], "eulerSequence": [3, 1, 3]}"#,
    )
    .unwrap();
    let orientation = Orientation::try_from(&spec).unwrap();
    assert_eq!(orientation.frame(), ReferenceFrame::NadirPointing);
    assert_eq!(orientation.sequence().axes(), [3, 1, 3]);
    assert!(close(orientation.angles()[1], 30_f64.to_radians()));
}

#[test]
fn test_orientation_spec_conventions() {
    let spec: OrientationSpec = serde_json::from_str(
        r#"{"referenceFrame": "NADIR_POINTING", "convention": "SIDE_LOOK", "sideLookAngle": -25}"#,
    )
    .unwrap();
    assert_eq!(spec.convention, OrientationConvention::SideLook);
    assert_eq!(
        Orientation::try_from(&spec).unwrap(),
        Orientation::side_look(ReferenceFrame::NadirPointing, (-25_f64).to_radians())
    );

    let spec: OrientationSpec = serde_json::from_str(
        r#"{"convention": "XYZ", "xRotation": 10, "zRotation": -40}"#,
    )
    .unwrap();
    assert_eq!(
        Orientation::try_from(&spec).unwrap(),
        Orientation::from_xyz_rotations(
            ReferenceFrame::ScBodyFixed,
            10_f64.to_radians(),
            0.0,
            (-40_f64).to_radians()
        )
    );

    // euler fields are ignored outside the euler convention
    let spec: OrientationSpec = serde_json::from_str(
        r#"{"convention": "REF_FRAME_ALIGNED", "eulerAngles": [5, 5, 5], "eulerSequence": [1, 1, 1]}"#,
    )
    .unwrap();
    assert_eq!(Orientation::try_from(&spec).unwrap(), Orientation::aligned(ReferenceFrame::ScBodyFixed));

    let res = serde_json::from_str::<OrientationSpec>(r#"{"convention": "QUATERNION"}"#);
    assert!(res.is_err());
}

#[test]
fn test_orientation_spec_rejects_repeated_axis() {
    let spec = OrientationSpec { euler_sequence: [1, 1, 2], ..OrientationSpec::default() };
    assert_eq!(
        Orientation::try_from(&spec),
        Err(ConfigError::InvalidEulerSequence { first: 1, second: 1, third: 2 })
    );
}

#[test]
fn test_maneuver_specs() {
    let spec: ManeuverSpecInput =
        serde_json::from_str(r#"{"maneuverType": "SINGLE_ROLL_ONLY", "A_rollMin": -30, "A_rollMax": 10}"#)
            .unwrap();
    assert_eq!(spec, ManeuverSpecInput::SingleRollOnly { roll_min: -30.0, roll_max: 10.0 });
    assert!(matches!(ManeuverSpec::try_from(&spec), Ok(ManeuverSpec::SingleRollOnly(_))));

    let inverted = ManeuverSpecInput::SingleRollOnly { roll_min: 10.0, roll_max: -30.0 };
    assert!(matches!(
        ManeuverSpec::try_from(&inverted),
        Err(ConfigError::InvalidRollRange { .. })
    ));

    let spec: ManeuverSpecInput = serde_json::from_str(r#"{"maneuverType": "CIRCULAR", "diameter": 0}"#).unwrap();
    assert!(matches!(
        ManeuverSpec::try_from(&spec),
        Err(ConfigError::InvalidManeuverDiameter { .. })
    ));
}

#[test]
fn test_instrument_spec_with_maneuver() {
    let raw = r#"{
        "fieldOfViewGeometry": {"shape": "RECTANGULAR", "angleHeight": 4, "angleWidth": 6},
        "orientation": {"referenceFrame": "NADIR_POINTING"},
        "maneuver": {"maneuverType": "DOUBLE_ROLL_ONLY",
                     "A_rollMin": -40, "A_rollMax": -20, "B_rollMin": 20, "B_rollMax": 40}
    }"#;
    let spec: InstrumentSpec = serde_json::from_str(raw).unwrap();
    let instrument = Instrument::try_from(&spec).unwrap();
    let proxies = instrument.views(ViewMode::FieldOfRegard).unwrap();
    assert_eq!(proxies.len(), 2);
    assert!(close(proxies[1].orientation().angles()[1], 30_f64.to_radians()));
    assert!(instrument.pointing_options().is_empty());
}

#[test]
fn test_instrument_spec_scene_fov_drives_field_of_regard() {
    let raw = r#"{
        "fieldOfViewGeometry": {"shape": "CONICAL", "fullConeAngle": 2},
        "sceneFieldOfViewGeometry": {"shape": "CONICAL", "fullConeAngle": 10},
        "maneuver": {"maneuverType": "CIRCULAR", "diameter": 20}
    }"#;
    let spec: InstrumentSpec = serde_json::from_str(raw).unwrap();
    let instrument = Instrument::try_from(&spec).unwrap();
    let proxies = instrument.views(ViewMode::FieldOfRegard).unwrap();
    let FovGeometry::Conical { half_angle } = proxies[0].fov() else {
        panic!("circular maneuvers resolve to a conical proxy");
    };
    assert!(close(*half_angle, 15_f64.to_radians()));
}

#[test]
fn test_pointing_option_in_sensor_frame_is_rejected() {
    let raw = r#"{
        "fieldOfViewGeometry": {"shape": "CONICAL", "fullConeAngle": 5},
        "pointingOption": [
            {"referenceFrame": "NADIR_POINTING", "eulerAngles": [0, 10, 0]},
            {"referenceFrame": "SENSOR_BODY_FIXED"}
        ]
    }"#;
    let spec: InstrumentSpec = serde_json::from_str(raw).unwrap();
    assert_eq!(
        Instrument::try_from(&spec),
        Err(ConfigError::InvalidSensorFrame { frame: ReferenceFrame::SensorBodyFixed })
    );
}

#[test]
fn test_spacecraft_spec() {
    let instrument = r#"{"fieldOfViewGeometry": {"shape": "CONICAL", "fullConeAngle": 5}}"#;
    let raw = format!(r#"{{"instrument": [{instrument}]}}"#);
    let spec: SpacecraftSpec = serde_json::from_str(&raw).unwrap();
    let spacecraft = Spacecraft::try_from(&spec).unwrap();
    assert_eq!(spacecraft.body(), &Orientation::aligned(ReferenceFrame::NadirPointing));
    assert!(spacecraft.instrument().is_some());

    let raw = format!(r#"{{"instrument": [{instrument}, {instrument}]}}"#);
    let spec: SpacecraftSpec = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        Spacecraft::try_from(&spec),
        Err(ConfigError::UnsupportedInstrumentCount { count: 2 })
    );

    let raw = r#"{"busOrientation": {"referenceFrame": "EARTH_FIXED"}}"#;
    let spec: SpacecraftSpec = serde_json::from_str(raw).unwrap();
    assert_eq!(
        Spacecraft::try_from(&spec),
        Err(ConfigError::InvalidBodyFrame { frame: ReferenceFrame::EarthFixed })
    );
}

#[test]
fn test_partial_bus_orientation_is_nadir_referenced() {
    let spec: SpacecraftSpec =
        serde_json::from_str(r#"{"busOrientation": {"eulerAngles": [0, 0, 5]}}"#).unwrap();
    let spacecraft = Spacecraft::try_from(&spec).unwrap();
    assert_eq!(spacecraft.body().frame(), ReferenceFrame::NadirPointing);
    assert!(close(spacecraft.body().angles()[2], 5_f64.to_radians()));

    let spec: SpacecraftSpec = serde_json::from_str(
        r#"{"busOrientation": {"convention": "SIDE_LOOK", "sideLookAngle": 15}}"#,
    )
    .unwrap();
    let spacecraft = Spacecraft::try_from(&spec).unwrap();
    assert_eq!(
        spacecraft.body(),
        &Orientation::side_look(ReferenceFrame::NadirPointing, 15_f64.to_radians())
    );

    // sensor mounts keep the body frame default
    let spec: InstrumentSpec = serde_json::from_str(
        r#"{"fieldOfViewGeometry": {"shape": "CONICAL", "fullConeAngle": 5},
            "orientation": {"eulerAngles": [0, 0, 5]}}"#,
    )
    .unwrap();
    let instrument = Instrument::try_from(&spec).unwrap();
    assert_eq!(instrument.orientation().frame(), ReferenceFrame::ScBodyFixed);
}

#[test]
fn test_random_cone_diameters_convert_to_half_angles() {
    let mut rng = rand::rng();
    for _ in 0..200 {
        let diameter: f64 = rng.random_range(0.01..359.0);
        let spec = FovSpec::Conical { full_cone_angle: diameter };
        let FovGeometry::Conical { half_angle } = FovGeometry::try_from(&spec).unwrap() else {
            panic!("expected a conical fov");
        };
        assert!((half_angle - diameter.to_radians() / 2.0).abs() < 1e-12);
    }
}

#[test]
fn test_settings_defaults_and_json() {
    let defaults = RunSettings::default();
    assert!(!defaults.yaw_180);
    assert!(defaults.parallel);
    assert!(!defaults.record_geometry);
    assert!(close(defaults.earth_radius_km, EARTH_RADIUS_KM));

    let settings: RunSettings = serde_json::from_str(r#"{"yaw180": true, "earthRadiusKm": 6371.0}"#).unwrap();
    assert!(settings.yaw_180);
    assert!(settings.parallel);
    assert!(close(settings.earth_radius_km, 6371.0));
}

#[test]
fn test_settings_overlay() {
    let vars = HashMap::from([
        (YAW_180_VAR, "on"),
        (PARALLEL_VAR, "0"),
        (RECORD_GEOMETRY_VAR, "maybe"),
    ]);
    let settings = RunSettings::default().overlay(|name| vars.get(name).map(|v| (*v).to_string()));
    assert!(settings.yaw_180);
    assert!(!settings.parallel);
    // unparseable values keep the previous switch
    assert!(!settings.record_geometry);

    let untouched = RunSettings::default().overlay(|_| None);
    assert_eq!(untouched, RunSettings::default());
}
