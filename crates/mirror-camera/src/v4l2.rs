use {
    crate::{Camera, CameraConfig, CameraError},
    mirror_base::Vec2,
    mirror_image::{Image, ImageError, PixelFormat, unpad_rows},
    std::thread::{self, JoinHandle},
    tokio::sync::mpsc,
    v4l::{
        Device, Format, FourCC,
        buffer::Type,
        io::{mmap::Stream as MmapStream, traits::CaptureStream},
        video::{Capture, capture::Parameters},
    },
};

type FrameResult = Result<Image, CameraError>;

// preferred first
const FORMATS: [&[u8; 4]; 2] = [b"MJPG", b"YUYV"];

/// Webcam read through V4L2 memory-mapped streaming.
///
/// Frames are decoded to RGB on a dedicated capture thread and handed over a
/// bounded channel. Dropping the camera closes the channel, which stops the
/// thread and releases the device.
pub struct V4l2Camera {
    config: CameraConfig,
    size: Vec2<usize>,
    format: PixelFormat,
    // bytes between row starts, for uncompressed formats
    stride: usize,
    device: Option<Device>,
    receiver: Option<mpsc::Receiver<FrameResult>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for V4l2Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Camera")
            .field("config", &self.config)
            .field("size", &self.size)
            .field("format", &self.format)
            .field("stride", &self.stride)
            .field("running", &self.thread_handle.is_some())
            .finish()
    }
}

impl Camera for V4l2Camera {
    async fn recv(&mut self) -> Result<Image, CameraError> {
        self.ensure_started()?;

        let receiver = self
            .receiver
            .as_mut()
            .ok_or_else(|| CameraError::Channel("receiver not initialized".to_string()))?;

        receiver
            .recv()
            .await
            .ok_or_else(|| CameraError::Channel("capture thread stopped".to_string()))?
    }
}

impl Drop for V4l2Camera {
    fn drop(&mut self) {
        drop(self.receiver.take());
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
        log::debug!("Closed {}", self.config.device());
    }
}

impl V4l2Camera {
    /// Open `config.device()` and negotiate MJPEG, or YUYV when the device
    /// has no MJPEG mode, at the configured size and rate.
    ///
    /// The device may round the size; `size()` reports what it picked.
    /// Capture itself starts on the first `recv`.
    ///
    /// # Errors
    ///
    /// `CameraError::Device` when the device cannot be opened, rejects the
    /// format or rate, or offers neither MJPEG nor YUYV.
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        let device = Device::with_path(config.device())
            .map_err(|e| CameraError::Device(format!("{}: {e}", config.device())))?;

        // try each format in order of preference, keep the first the
        // driver accepts unchanged
        let mut negotiated = None;
        for fourcc in FORMATS {
            let request = Format::new(config.width(), config.height(), FourCC::new(fourcc));
            let format = Capture::set_format(&device, &request)?;
            if format.fourcc == FourCC::new(fourcc) {
                negotiated = Some(format);
                break;
            }
        }
        let format = negotiated.ok_or_else(|| {
            CameraError::Device(format!(
                "{} supports neither MJPEG nor YUYV",
                config.device()
            ))
        })?;
        let pixel_format = PixelFormat::from_fourcc(format.fourcc.repr).ok_or_else(|| {
            CameraError::Device(format!("unexpected fourcc {}", format.fourcc))
        })?;

        // ideal and maximum rate are the same
        Capture::set_params(&device, &Parameters::with_fps(config.fps()))?;

        log::info!(
            "Opened {} at {}x{} {:?} (stride {}), {} fps",
            config.device(),
            format.width,
            format.height,
            pixel_format,
            format.stride,
            config.fps()
        );

        Ok(Self {
            size: Vec2::new(format.width as usize, format.height as usize),
            format: pixel_format,
            stride: format.stride as usize,
            config,
            device: Some(device),
            receiver: None,
            thread_handle: None,
        })
    }

    /// Start the capture thread on first use.
    fn ensure_started(&mut self) -> Result<(), CameraError> {
        if self.receiver.is_some() {
            return Ok(());
        }

        let device = self
            .device
            .take()
            .ok_or_else(|| CameraError::Device("device already consumed".to_string()))?;

        let buffer_count = self.config.buffer_count();
        let (tx, rx) = mpsc::channel(buffer_count as usize);
        let (size, format, stride) = (self.size, self.format, self.stride);

        // capture blocks, so it gets its own thread rather than a task
        let handle = thread::spawn(move || {
            if let Err(e) = Self::capture_loop(&device, &tx, buffer_count, size, format, stride) {
                log::error!("Capture thread error: {e}");
                // the receiver may already be gone
                let _ = tx.blocking_send(Err(e));
            }
        });

        self.receiver = Some(rx);
        self.thread_handle = Some(handle);
        Ok(())
    }

    fn capture_loop(
        device: &Device,
        tx: &mpsc::Sender<FrameResult>,
        buffer_count: u32,
        size: Vec2<usize>,
        format: PixelFormat,
        stride: usize,
    ) -> Result<(), CameraError> {
        let mut stream = MmapStream::with_buffers(device, Type::VideoCapture, buffer_count)
            .map_err(|e| CameraError::Stream(e.to_string()))?;

        loop {
            let (data, metadata) =
                CaptureStream::next(&mut stream).map_err(|e| CameraError::Stream(e.to_string()))?;
            // some drivers leave bytesused at 0, then the whole buffer counts
            let used = match metadata.bytesused as usize {
                0 => data.len(),
                used => used.min(data.len()),
            };
            let data = &data[..used];

            // the buffer is only valid until the next call
            let frame = match Self::to_frame(data, size, format, stride) {
                Ok(frame) => frame,
                Err(e) => {
                    // a corrupt MJPEG frame shouldn't end the stream
                    log::warn!("Dropping undecodable frame: {e}");
                    continue;
                }
            };

            if tx.blocking_send(Ok(frame)).is_err() {
                break;
            }
        }

        Ok(())
    }

    // Copy one captured buffer out as an RGB image. YUYV rows may be padded
    // and the buffer may run past the last row; both are trimmed here.
    fn to_frame(
        data: &[u8],
        size: Vec2<usize>,
        format: PixelFormat,
        stride: usize,
    ) -> Result<Image, ImageError> {
        let bytes = match format {
            PixelFormat::Yuyv => unpad_rows(data, size.x * 2, stride, size.y)?,
            _ => data.to_vec(),
        };
        Image::new(size, bytes, format)?.to_rgb()
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn size(&self) -> Vec2<usize> {
        self.size
    }
}
