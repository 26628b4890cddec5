use {
    mirror_infer::JointAngles,
    pose_viewer::{Status, window_title},
};

#[test]
fn test_status_text() {
    assert_eq!(Status::Preparing.to_string(), "Preparing...");
    assert_eq!(Status::LoadingModel.to_string(), "Loading pose model...");
    assert_eq!(Status::StartingCamera.to_string(), "Starting camera...");
    assert_eq!(Status::Connected.to_string(), "Connected");
    assert!(Status::Error("no camera".into()).to_string().contains("no camera"));
}

#[test]
fn test_busy_states() {
    assert!(Status::Preparing.is_busy());
    assert!(Status::LoadingModel.is_busy());
    assert!(Status::StartingCamera.is_busy());
    assert!(!Status::Connected.is_busy());
    assert!(!Status::Stopped.is_busy());
    assert!(!Status::Error(String::new()).is_busy());
}

#[test]
fn test_title_without_angles() {
    assert_eq!(
        window_title(&Status::Connected, None),
        "Pose Mirror - Connected"
    );
}

#[test]
fn test_title_lists_known_angles() {
    let angles = JointAngles {
        left_elbow: Some(90),
        right_shoulder: Some(45),
        ..JointAngles::default()
    };
    let title = window_title(&Status::Connected, Some(&angles));
    assert!(title.starts_with("Pose Mirror - Connected"));
    assert!(title.contains("L elbow 90\u{b0}"));
    assert!(title.contains("R shoulder 45\u{b0}"));
    assert!(!title.contains("R elbow"));
}
