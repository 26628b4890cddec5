use {
    mirror_base::Vec3,
    serde::{Deserialize, Serialize},
};

/// Number of body landmarks in the pose topology.
pub const LANDMARK_COUNT: usize = 33;

/// Landmarks below this visibility are neither drawn nor used for angles.
pub const VISIBILITY_THRESHOLD: f32 = 0.3;

/// Landmark index pairs drawn as bones.
pub const POSE_CONNECTIONS: [[usize; 2]; 30] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 7],
    [0, 4],
    [4, 5],
    [5, 6],
    [6, 8],
    [9, 10],
    [11, 12],
    [11, 13],
    [13, 15],
    [12, 14],
    [14, 16],
    [15, 17],
    [15, 19],
    [15, 21],
    [17, 19],
    [16, 18],
    [16, 20],
    [18, 20],
    [23, 24],
    [23, 25],
    [25, 27],
    [27, 29],
    [27, 31],
    [24, 26],
    [26, 28],
    [28, 30],
    [28, 32],
];

/// Named indices into the landmark list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseLandmark {
    pub const ALL: [PoseLandmark; LANDMARK_COUNT] = [
        PoseLandmark::Nose,
        PoseLandmark::LeftEyeInner,
        PoseLandmark::LeftEye,
        PoseLandmark::LeftEyeOuter,
        PoseLandmark::RightEyeInner,
        PoseLandmark::RightEye,
        PoseLandmark::RightEyeOuter,
        PoseLandmark::LeftEar,
        PoseLandmark::RightEar,
        PoseLandmark::MouthLeft,
        PoseLandmark::MouthRight,
        PoseLandmark::LeftShoulder,
        PoseLandmark::RightShoulder,
        PoseLandmark::LeftElbow,
        PoseLandmark::RightElbow,
        PoseLandmark::LeftWrist,
        PoseLandmark::RightWrist,
        PoseLandmark::LeftPinky,
        PoseLandmark::RightPinky,
        PoseLandmark::LeftIndex,
        PoseLandmark::RightIndex,
        PoseLandmark::LeftThumb,
        PoseLandmark::RightThumb,
        PoseLandmark::LeftHip,
        PoseLandmark::RightHip,
        PoseLandmark::LeftKnee,
        PoseLandmark::RightKnee,
        PoseLandmark::LeftAnkle,
        PoseLandmark::RightAnkle,
        PoseLandmark::LeftHeel,
        PoseLandmark::RightHeel,
        PoseLandmark::LeftFootIndex,
        PoseLandmark::RightFootIndex,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

fn full_visibility() -> f32 {
    1.0
}

/// One tracked point. `x`/`y` are normalized image coordinates with the
/// origin top-left, `z` is depth on roughly the scale of `x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[serde(default = "full_visibility")]
    pub visibility: f32,
}

impl Landmark {
    pub fn is_visible(&self) -> bool {
        self.visibility >= VISIBILITY_THRESHOLD
    }
}

/// Joint angles in whole degrees. An angle is missing when one of its three
/// landmarks is absent or not visible enough.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JointAngles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_elbow: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_elbow: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_knee: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_knee: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_shoulder: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_shoulder: Option<i32>,
}

impl JointAngles {
    pub fn from_landmarks(landmarks: &[Landmark]) -> Self {
        use PoseLandmark::*;
        let at = |a: PoseLandmark, b: PoseLandmark, c: PoseLandmark| {
            angle_at(
                landmarks.get(a.index())?,
                landmarks.get(b.index())?,
                landmarks.get(c.index())?,
            )
        };
        Self {
            left_elbow: at(LeftShoulder, LeftElbow, LeftWrist),
            right_elbow: at(RightShoulder, RightElbow, RightWrist),
            left_knee: at(LeftHip, LeftKnee, LeftAnkle),
            right_knee: at(RightHip, RightKnee, RightAnkle),
            left_shoulder: at(LeftElbow, LeftShoulder, LeftHip),
            right_shoulder: at(RightElbow, RightShoulder, RightHip),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// `(label, degrees)` for every present angle, in display order.
    pub fn entries(&self) -> Vec<(&'static str, i32)> {
        [
            ("L elbow", self.left_elbow),
            ("R elbow", self.right_elbow),
            ("L knee", self.left_knee),
            ("R knee", self.right_knee),
            ("L shoulder", self.left_shoulder),
            ("R shoulder", self.right_shoulder),
        ]
        .into_iter()
        .filter_map(|(label, angle)| angle.map(|a| (label, a)))
        .collect()
    }
}

// Angle at `b` in the image plane, in whole degrees.
fn angle_at(a: &Landmark, b: &Landmark, c: &Landmark) -> Option<i32> {
    if !(a.is_visible() && b.is_visible() && c.is_visible()) {
        return None;
    }
    let ba = Vec3::new(a.x - b.x, a.y - b.y, 0.0);
    let bc = Vec3::new(c.x - b.x, c.y - b.y, 0.0);
    let lengths = ba.length() * bc.length();
    if lengths == 0.0 {
        return None;
    }
    let cos = (ba.dot(bc) / lengths).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees().round() as i32)
}

/// One frame's detection result. Replaces the previous frame's result
/// wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseData {
    pub landmarks: Vec<Landmark>,
    #[serde(default)]
    pub connections: Vec<[usize; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joint_angles: Option<JointAngles>,
    /// Milliseconds since capture start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

impl PoseData {
    /// Attach the standard connections and computed joint angles.
    pub fn new(landmarks: Vec<Landmark>, timestamp: Option<f64>) -> Self {
        let joint_angles = Some(JointAngles::from_landmarks(&landmarks));
        Self {
            landmarks,
            connections: POSE_CONNECTIONS.to_vec(),
            joint_angles,
            timestamp,
        }
    }

    pub fn landmark(&self, which: PoseLandmark) -> Option<&Landmark> {
        self.landmarks.get(which.index())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
