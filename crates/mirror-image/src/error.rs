use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ImageError {
    Decode(String),
    Format(String),
    Size { expected: usize, got: usize },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Decode(msg) => write!(f, "decode error: {msg}"),
            ImageError::Format(msg) => write!(f, "format error: {msg}"),
            ImageError::Size { expected, got } => {
                write!(f, "size error: expected {expected} bytes, got {got}")
            }
        }
    }
}

impl std::error::Error for ImageError {}

impl From<crates_image::ImageError> for ImageError {
    fn from(err: crates_image::ImageError) -> Self {
        ImageError::Decode(err.to_string())
    }
}
