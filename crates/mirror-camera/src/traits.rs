use {crate::CameraError, mirror_image::Image};

/// Async frame source.
#[allow(async_fn_in_trait)]
pub trait Camera {
    /// Receive the next frame, always in `PixelFormat::Rgb8`.
    async fn recv(&mut self) -> Result<Image, CameraError>;
}
