mod landmarker;
mod postprocess;
mod preprocess;
mod types;

pub use landmarker::{PoseLandmarker, PoseLandmarkerOptions};
pub use postprocess::{decode_landmarks, sigmoid, smooth_landmarks};
pub use preprocess::{LetterboxInfo, preprocess};
pub use types::{
    JointAngles, LANDMARK_COUNT, Landmark, POSE_CONNECTIONS, PoseData, PoseLandmark,
    VISIBILITY_THRESHOLD,
};
