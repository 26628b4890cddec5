//! Model glue for the mirror pipeline: an ONNX Runtime backend behind the
//! `Backend`/`Session` seam, the pose data model, the single-pose
//! `PoseLandmarker`, and the background `Preloader` that gets the model
//! ready before the camera starts.

pub mod backend;
pub mod backends;
pub mod device;
pub mod error;
pub mod modelsource;
pub mod pose;
pub mod preload;
pub mod session;

pub use backend::Backend;
pub use backends::OnnxBackend;
pub use device::Device;
pub use error::InferError;
pub use modelsource::ModelSource;
pub use pose::{
    JointAngles, LANDMARK_COUNT, Landmark, LetterboxInfo, POSE_CONNECTIONS, PoseData,
    PoseLandmark, PoseLandmarker, PoseLandmarkerOptions, VISIBILITY_THRESHOLD,
};
pub use preload::{PreloadState, Preloader};
pub use session::Session;
