use {
    mirror_base::LogConfig,
    mirror_camera::CameraConfig,
    mirror_infer::{Device, InferError},
    std::path::PathBuf,
};

pub const DEFAULT_MODEL_PATH: &str = "models/pose_landmark_lite.onnx";
pub const DEFAULT_FALLBACK_MODEL_PATH: &str = "models/pose_landmark_full.onnx";
pub const DEFAULT_CAMERA: &str = "/dev/video0";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Model preloaded at start-up.
    pub model_path: PathBuf,
    /// Model loaded on demand when the preload failed.
    pub fallback_model_path: PathBuf,
    /// V4L2 device path or an image file to replay.
    pub camera: String,
    pub device: Device,
    pub log: LogConfig,
}

impl ViewerConfig {
    /// Read `MIRROR_MODEL_PATH`, `MIRROR_FALLBACK_MODEL_PATH`,
    /// `MIRROR_CAMERA`, `MIRROR_DEVICE` and the logging variables. A first
    /// command line argument overrides `MIRROR_CAMERA`.
    ///
    /// # Errors
    ///
    /// `InferError::Backend` for an unknown `MIRROR_DEVICE`.
    pub fn from_env_and_args() -> Result<Self, InferError> {
        let mut config = Self::from_vars(|name| std::env::var(name).ok(), std::env::args().skip(1))?;
        config.log = LogConfig::from_env();
        Ok(config)
    }

    pub fn from_vars<F, I>(var: F, mut args: I) -> Result<Self, InferError>
    where
        F: Fn(&str) -> Option<String>,
        I: Iterator<Item = String>,
    {
        let device = match var("MIRROR_DEVICE") {
            Some(value) => value.parse()?,
            None => Device::Cpu,
        };
        Ok(Self {
            model_path: var("MIRROR_MODEL_PATH")
                .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string())
                .into(),
            fallback_model_path: var("MIRROR_FALLBACK_MODEL_PATH")
                .unwrap_or_else(|| DEFAULT_FALLBACK_MODEL_PATH.to_string())
                .into(),
            camera: args
                .next()
                .or_else(|| var("MIRROR_CAMERA"))
                .unwrap_or_else(|| DEFAULT_CAMERA.to_string()),
            device,
            log: LogConfig::default(),
        })
    }

    /// 640x480 at 30 fps on the configured device.
    pub fn camera_config(&self) -> CameraConfig {
        CameraConfig::default().with_device(self.camera.clone())
    }
}
