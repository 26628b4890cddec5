use mirror_infer::{LANDMARK_COUNT, Landmark, PoseData};
use mirror_scene::{BONE_COLOR, BONE_OPACITY, Skeleton};

fn pose(visibility: impl Fn(usize) -> f32) -> PoseData {
    let landmarks = (0..LANDMARK_COUNT)
        .map(|id| Landmark {
            id,
            x: id as f32 / LANDMARK_COUNT as f32,
            y: 0.5,
            z: 0.5,
            visibility: visibility(id),
        })
        .collect();
    PoseData::new(landmarks, None)
}

#[test]
fn test_rebuild_full_pose() {
    let mut skeleton = Skeleton::new();
    skeleton.rebuild(&pose(|_| 1.0));
    assert_eq!(skeleton.joints.len(), 33);
    assert_eq!(skeleton.bones.len(), 30);
    assert!(skeleton.bones.iter().all(|b| b.color == BONE_COLOR && b.opacity == BONE_OPACITY));

    let shoulder = &skeleton.joints[11];
    assert_eq!(shoulder.index, 11);
    assert_eq!(shoulder.radius, 0.18);
    assert_eq!(shoulder.color, 0x00ffff);
}

#[test]
fn test_rebuild_skips_invisible() {
    let mut skeleton = Skeleton::new();
    // left elbow hidden: drops 11-13 and 13-15
    skeleton.rebuild(&pose(|id| if id == 13 { 0.29 } else { 0.3 }));
    assert_eq!(skeleton.joints.len(), 32);
    assert!(skeleton.joints.iter().all(|j| j.index != 13));
    assert_eq!(skeleton.bones.len(), 28);
    assert!(!skeleton.bones.iter().any(|b| b.from == 13 || b.to == 13));
}

#[test]
fn test_rebuild_replaces_previous() {
    let mut skeleton = Skeleton::new();
    skeleton.rebuild(&pose(|_| 1.0));
    skeleton.rebuild(&pose(|id| if id < 11 { 1.0 } else { 0.0 }));
    assert_eq!(skeleton.joints.len(), 11);
    // face connections only
    assert_eq!(skeleton.bones.len(), 9);
}

#[test]
fn test_rebuild_empty_pose_clears() {
    let mut skeleton = Skeleton::new();
    skeleton.rebuild(&pose(|_| 1.0));
    skeleton.rebuild(&PoseData::new(Vec::new(), None));
    assert!(skeleton.is_empty());
}

#[test]
fn test_rebuild_ignores_out_of_range_connections() {
    let mut short = pose(|_| 1.0);
    short.landmarks.truncate(13);
    let mut skeleton = Skeleton::new();
    skeleton.rebuild(&short);
    assert_eq!(skeleton.joints.len(), 13);
    // the 9 face bones plus 11-12
    assert_eq!(skeleton.bones.len(), 10);
}
