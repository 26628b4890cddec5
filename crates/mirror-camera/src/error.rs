use {mirror_image::ImageError, std::fmt};

#[derive(Debug)]
pub enum CameraError {
    /// Opening or configuring the device failed.
    Device(String),
    /// The capture stream failed after the device was opened.
    Stream(String),
    Decode(ImageError),
    /// The capture thread is gone.
    Channel(String),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::Device(msg) => write!(f, "camera device error: {msg}"),
            CameraError::Stream(msg) => write!(f, "camera stream error: {msg}"),
            CameraError::Decode(err) => write!(f, "camera frame decode error: {err}"),
            CameraError::Channel(msg) => write!(f, "camera channel error: {msg}"),
        }
    }
}

impl std::error::Error for CameraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CameraError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::Device(err.to_string())
    }
}

impl From<ImageError> for CameraError {
    fn from(err: ImageError) -> Self {
        CameraError::Decode(err)
    }
}
