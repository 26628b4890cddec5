use {
    crate::Device,
    mirror_base::TensorError,
    mirror_image::ImageError,
    std::{fmt, time::Duration},
};

#[derive(Debug)]
pub enum InferError {
    ModelLoad(String),
    Backend(String),
    Shape { expected: String, got: String },
    InvalidInput { name: String, expected_names: Vec<String> },
    UnsupportedDevice(Device),
    /// Video-mode timestamps must strictly increase.
    Timestamp { previous: Duration, got: Duration },
    Image(ImageError),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::Backend(msg) => write!(f, "backend error: {msg}"),
            InferError::Shape { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
            InferError::InvalidInput {
                name,
                expected_names,
            } => write!(
                f,
                "invalid input '{name}', model expects {}",
                expected_names.join(", ")
            ),
            InferError::UnsupportedDevice(device) => write!(f, "unsupported device: {device}"),
            InferError::Timestamp { previous, got } => write!(
                f,
                "timestamp {}ms is not after previous {}ms",
                got.as_millis(),
                previous.as_millis()
            ),
            InferError::Image(err) => write!(f, "image error: {err}"),
        }
    }
}

impl std::error::Error for InferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InferError::Image(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ImageError> for InferError {
    fn from(err: ImageError) -> Self {
        InferError::Image(err)
    }
}

impl From<TensorError> for InferError {
    fn from(err: TensorError) -> Self {
        InferError::Backend(format!("tensor error: {err}"))
    }
}
