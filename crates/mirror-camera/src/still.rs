use {
    crate::{Camera, CameraConfig, CameraError},
    mirror_image::{Image, decode_image},
    std::path::Path,
    tokio::time::{Interval, MissedTickBehavior},
};

/// Camera that hands out the same frame at a fixed rate.
pub struct StillCamera {
    frame: Image,
    interval: Interval,
    frames_sent: u64,
}

impl StillCamera {
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// `CameraError::Decode` when `frame` cannot be converted to RGB.
    pub fn new(frame: Image, config: &CameraConfig) -> Result<Self, CameraError> {
        let frame = frame.to_rgb()?;
        let mut interval = tokio::time::interval(config.frame_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Ok(Self {
            frame,
            interval,
            frames_sent: 0,
        })
    }

    /// Load and decode an image file to replay.
    ///
    /// # Errors
    ///
    /// `CameraError::Device` when the file cannot be read and
    /// `CameraError::Decode` when it is not a supported image.
    pub async fn open(path: impl AsRef<Path>, config: &CameraConfig) -> Result<Self, CameraError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| CameraError::Device(format!("{}: {e}", path.display())))?;
        let frame = decode_image(bytes).await?;
        log::info!(
            "Replaying {} ({}x{}) at {} fps",
            path.display(),
            frame.width(),
            frame.height(),
            config.fps()
        );
        Self::new(frame, config)
    }

    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }
}

impl Camera for StillCamera {
    async fn recv(&mut self) -> Result<Image, CameraError> {
        self.interval.tick().await;
        self.frames_sent += 1;
        Ok(self.frame.clone())
    }
}
