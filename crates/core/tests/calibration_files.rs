use std::path::Path;

use sink_core::calibration::{Calibration, CalibrationError, ColorRange};
use tempfile::tempdir;

#[test]
fn loads_yaml_and_json_by_extension() {
    let dir = tempdir().expect("tempdir");
    let yaml = dir.path().join("site.yaml");
    let json = dir.path().join("site.json");
    std::fs::write(&yaml, "pixel_to_meter: 1.5\ngreen_absorption_rate: 18\n").unwrap();
    std::fs::write(&json, r#"{"wetlands_absorption_rate": 7.5, "neutral_floor": 230}"#).unwrap();

    let from_yaml = Calibration::load(&yaml).expect("yaml calibration");
    assert_eq!(from_yaml.pixel_to_meter, 1.5);
    assert_eq!(from_yaml.green_absorption_rate, 18.0);

    let from_json = Calibration::load(&json).expect("json calibration");
    assert_eq!(from_json.wetlands_absorption_rate, 7.5);
    assert_eq!(from_json.neutral_floor, 230);
    assert_eq!(from_json.water_range, ColorRange::water());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().expect("tempdir");
    let err = Calibration::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, CalibrationError::Io { .. }));
}

#[test]
fn unsupported_extension_is_rejected_before_reading() {
    let err = Calibration::load(Path::new("calibration.toml")).unwrap_err();
    assert!(matches!(err, CalibrationError::UnsupportedFormat(_)));
}

#[test]
fn load_or_default_without_path_uses_defaults() {
    assert_eq!(Calibration::load_or_default(None).unwrap(), Calibration::default());
}

#[test]
fn malformed_color_range_is_invalid() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("bad.yaml");
    std::fs::write(
        &path,
        "vegetation_range:\n  r: { low: 120, high: 100 }\n  g: { low: 100, high: 255 }\n  b: { low: 0, high: 100 }\n",
    )
    .unwrap();
    let err = Calibration::load(&path).unwrap_err();
    assert!(matches!(err, CalibrationError::Invalid(_)));
}

#[test]
fn defaults_round_trip_through_yaml() {
    let body = serde_yaml::to_string(&Calibration::default()).unwrap();
    let parsed = Calibration::from_str_with_format(&body, "yaml").unwrap();
    assert_eq!(parsed, Calibration::default());
}
