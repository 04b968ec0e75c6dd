use std::path::Path;

use framecheck::config::ProviderConfig;
use framecheck::pose::io_json::write_keypoints_json;
use framecheck::pose::{DetectorOutput, Keypoint, KeypointLabel, KeypointSet, PoseDetection};
use framecheck::provider::ImageInput;
use framecheck::service::FramingService;
use framecheck::status::{StatusCode, StatusResponse};

mod common;

/// (confidence, y) for nose, left ankle and right ankle.
type Pose3 = ((f64, f64), (f64, f64), (f64, f64));

fn subject(((nc, ny), (lc, ly), (rc, ry)): Pose3) -> KeypointSet {
    KeypointSet::default()
        .with(KeypointLabel::Nose, Keypoint::new(0.5, ny, nc))
        .with(KeypointLabel::LeftAnkle, Keypoint::new(0.45, ly, lc))
        .with(KeypointLabel::RightAnkle, Keypoint::new(0.55, ry, rc))
}

fn record(dir: &Path, name: &str, output: &DetectorOutput) -> std::path::PathBuf {
    let image = dir.join(name);
    common::write_bmp(&image, 48, 96);
    write_keypoints_json(&dir.join(format!("{name}.keypoints.json")), output).unwrap();
    image
}

#[test]
fn recorded_subjects_get_expected_status() {
    let dir = tempfile::tempdir().unwrap();
    let cases: [(&str, Pose3, StatusCode); 5] = [
        ("ok.bmp", ((0.9, 0.10), (0.9, 0.85), (0.9, 0.86)), StatusCode::Ok),
        ("head_cut.bmp", ((0.9, 0.02), (0.9, 0.85), (0.9, 0.85)), StatusCode::TooCloseHeadCut),
        ("no_head.bmp", ((0.3, 0.50), (0.9, 0.85), (0.9, 0.85)), StatusCode::HeadNotVisible),
        ("no_feet.bmp", ((0.9, 0.10), (0.2, 0.85), (0.2, 0.85)), StatusCode::TooCloseShowFeet),
        ("far.bmp", ((0.9, 0.10), (0.9, 0.30), (0.1, 0.50)), StatusCode::TooFar),
    ];

    let service = FramingService::from_config(ProviderConfig::default());
    for (name, pose, expected) in cases {
        let output = DetectorOutput::new(vec![PoseDetection::new(subject(pose))]);
        let image = record(dir.path(), name, &output);
        assert_eq!(service.check_file(&image), expected, "{name}");
    }
}

#[test]
fn only_the_first_detection_is_checked() {
    let dir = tempfile::tempdir().unwrap();
    let output = DetectorOutput::new(vec![
        PoseDetection::new(subject(((0.9, 0.10), (0.9, 0.30), (0.1, 0.5)))),
        PoseDetection::new(subject(((0.9, 0.10), (0.9, 0.85), (0.9, 0.86)))),
    ]);
    let image = record(dir.path(), "group.bmp", &output);

    let service = FramingService::from_config(ProviderConfig::default());
    assert_eq!(service.check_file(&image), StatusCode::TooFar);
}

#[test]
fn first_detection_without_confidence_is_no_person() {
    let dir = tempfile::tempdir().unwrap();
    let output = DetectorOutput::new(vec![
        PoseDetection::without_confidence(),
        PoseDetection::new(subject(((0.9, 0.10), (0.9, 0.85), (0.9, 0.86)))),
    ]);
    let image = record(dir.path(), "blurry.bmp", &output);

    let service = FramingService::from_config(ProviderConfig::default());
    assert_eq!(service.check_file(&image), StatusCode::NoPersonDetected);
}

#[test]
fn undecodable_bytes_report_decoding_error() {
    let service = FramingService::from_config(ProviderConfig::default());
    let status = service.check(&ImageInput::from_file(
        Path::new("upload.jpg"),
        b"this is not an image",
    ));
    assert_eq!(status, StatusCode::ErrorDecoding);
    assert_eq!(
        serde_json::to_string(&StatusResponse::new(status)).unwrap(),
        r#"{"status":"ERROR_DECODING"}"#
    );
}
