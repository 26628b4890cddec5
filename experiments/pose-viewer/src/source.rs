use {
    mirror_camera::{Camera, CameraConfig, CameraError, StillCamera},
    mirror_image::Image,
    std::path::Path,
};

#[cfg(feature = "v4l2")]
use mirror_camera::V4l2Camera;

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// The camera picked from the configured source string.
pub enum CameraSource {
    #[cfg(feature = "v4l2")]
    V4l2(V4l2Camera),
    Still(StillCamera),
}

/// True when `source` names an image file rather than a capture device.
pub fn is_image_path(source: &str) -> bool {
    Path::new(source)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

impl CameraSource {
    /// Open the device or image file named in `config`.
    ///
    /// # Errors
    ///
    /// `CameraError::Device` for a missing device or file, or a device path
    /// in a build without the `v4l2` feature.
    pub async fn open(config: CameraConfig) -> Result<Self, CameraError> {
        if is_image_path(config.device()) {
            let camera = StillCamera::open(config.device(), &config).await?;
            return Ok(CameraSource::Still(camera));
        }
        Self::open_device(config).await
    }

    #[cfg(feature = "v4l2")]
    async fn open_device(config: CameraConfig) -> Result<Self, CameraError> {
        let camera = tokio::task::spawn_blocking(move || V4l2Camera::new(config))
            .await
            .map_err(|e| CameraError::Device(format!("camera open task failed: {e}")))??;
        Ok(CameraSource::V4l2(camera))
    }

    #[cfg(not(feature = "v4l2"))]
    async fn open_device(config: CameraConfig) -> Result<Self, CameraError> {
        Err(CameraError::Device(format!(
            "{}: built without V4L2 support, pass an image file instead",
            config.device()
        )))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "v4l2")]
            CameraSource::V4l2(_) => "v4l2",
            CameraSource::Still(_) => "still",
        }
    }
}

impl Camera for CameraSource {
    async fn recv(&mut self) -> Result<Image, CameraError> {
        match self {
            #[cfg(feature = "v4l2")]
            CameraSource::V4l2(camera) => camera.recv().await,
            CameraSource::Still(camera) => camera.recv().await,
        }
    }
}
