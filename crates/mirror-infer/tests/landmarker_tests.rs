mod common;

use common::{FakeSession, rgb_image};
use mirror_infer::{
    InferError, LANDMARK_COUNT, POSE_CONNECTIONS, PoseLandmarker, PoseLandmarkerOptions,
};
use std::time::Duration;

fn landmarker(session: FakeSession, smoothing: f32) -> PoseLandmarker {
    PoseLandmarker::new(
        Box::new(session),
        PoseLandmarkerOptions::default().with_smoothing(smoothing),
    )
}

#[test]
fn test_options_defaults() {
    let options = PoseLandmarkerOptions::default();
    assert_eq!(options.input_size(), 256);
    assert_eq!(options.min_pose_presence(), 0.5);
    assert_eq!(options.smoothing(), 0.5);
}

#[test]
fn test_detect_unletterboxes_landmarks() {
    // 512x256 into 256: scale 0.5, 64 px of padding top and bottom
    let session = FakeSession::uniform((128.0, 128.0, 32.0), 10.0, 0.9);
    let shape = session.last_input_shape.clone();
    let mut landmarker = landmarker(session, 0.0);

    let pose = landmarker.detect(&rgb_image(512, 256)).unwrap().unwrap();

    assert_eq!(*shape.lock().unwrap(), Some(vec![1, 256, 256, 3]));
    assert_eq!(pose.landmarks.len(), LANDMARK_COUNT);
    let nose = pose.landmarks[0];
    assert!((nose.x - 0.5).abs() < 1e-6);
    assert!((nose.y - 0.5).abs() < 1e-6);
    // 32 input px -> 64 source px -> 64 / 512
    assert!((nose.z - 0.125).abs() < 1e-6);
    assert!(nose.visibility > 0.99);
    assert_eq!(pose.landmarks[32].id, 32);
    assert_eq!(pose.connections, POSE_CONNECTIONS.to_vec());
    assert!(pose.joint_angles.is_some());
    assert_eq!(pose.timestamp, None);
}

#[test]
fn test_detect_below_presence_threshold() {
    let session = FakeSession::uniform((10.0, 10.0, 0.0), 10.0, 0.2);
    let mut landmarker = landmarker(session, 0.0);
    assert!(landmarker.detect(&rgb_image(64, 64)).unwrap().is_none());
}

#[test]
fn test_detect_presence_logit() {
    // out-of-range presence is read as a logit: sigmoid(-4) is well below 0.5
    let session = FakeSession::uniform((10.0, 10.0, 0.0), 10.0, -4.0);
    let mut landmarker = landmarker(session, 0.0);
    assert!(landmarker.detect(&rgb_image(64, 64)).unwrap().is_none());
}

#[test]
fn test_video_timestamps_must_increase() {
    let session = FakeSession::uniform((10.0, 10.0, 0.0), 10.0, 0.9);
    let mut landmarker = landmarker(session, 0.5);
    let image = rgb_image(64, 64);

    let pose = landmarker
        .detect_for_video(&image, Duration::from_millis(33))
        .unwrap()
        .unwrap();
    assert_eq!(pose.timestamp, Some(33.0));

    let result = landmarker.detect_for_video(&image, Duration::from_millis(33));
    assert!(matches!(result, Err(InferError::Timestamp { .. })));

    landmarker.reset();
    assert!(
        landmarker
            .detect_for_video(&image, Duration::from_millis(1))
            .unwrap()
            .is_some()
    );
}

#[test]
fn test_video_smoothing_blends_frames() {
    let image = rgb_image(256, 256);
    let session = FakeSession::uniform((0.0, 0.0, 0.0), 10.0, 0.9);
    let script = session.script.clone();
    let mut landmarker = landmarker(session, 0.5);

    let first = landmarker
        .detect_for_video(&image, Duration::from_millis(0))
        .unwrap()
        .unwrap();
    assert_eq!(first.landmarks[0].x, 0.0);

    script.set((256.0, 256.0, 0.0), 10.0, 0.9);
    let second = landmarker
        .detect_for_video(&image, Duration::from_millis(33))
        .unwrap()
        .unwrap();
    assert_eq!(second.landmarks[0].x, 0.5);
    assert_eq!(second.landmarks[0].y, 0.5);

    // losing the pose drops the smoothing history
    script.set((256.0, 256.0, 0.0), 10.0, 0.1);
    assert!(
        landmarker
            .detect_for_video(&image, Duration::from_millis(66))
            .unwrap()
            .is_none()
    );
    script.set((256.0, 256.0, 0.0), 10.0, 0.9);
    let regained = landmarker
        .detect_for_video(&image, Duration::from_millis(100))
        .unwrap()
        .unwrap();
    assert_eq!(regained.landmarks[0].x, 1.0);
}

#[test]
fn test_detect_never_smooths() {
    let image = rgb_image(256, 256);
    let session = FakeSession::uniform((0.0, 0.0, 0.0), 10.0, 0.9);
    let script = session.script.clone();
    let mut landmarker = landmarker(session, 0.9);

    landmarker.detect(&image).unwrap().unwrap();
    script.set((256.0, 0.0, 0.0), 10.0, 0.9);
    assert_eq!(landmarker.detect(&image).unwrap().unwrap().landmarks[0].x, 1.0);
}

#[test]
fn test_detect_converts_non_rgb_input() {
    let session = FakeSession::uniform((10.0, 10.0, 0.0), 10.0, 0.9);
    let mut landmarker = landmarker(session, 0.0);
    let rgba = mirror_image::Image::new(
        mirror_base::Vec2::new(2, 2),
        vec![255; 16],
        mirror_image::PixelFormat::Rgba8,
    )
    .unwrap();
    assert!(landmarker.detect(&rgba).unwrap().is_some());
}
