//! Frame images for the mirror pipeline.
//!
//! Everything downstream of the camera works on packed `Rgb8` frames; this
//! crate holds the `Image` container, decoding of still images and MJPEG
//! frames, and the handful of pixel conversions the camera and window need.

mod convert;
pub use convert::*;

mod decode;
pub use decode::*;

mod error;
pub use error::*;

mod image;
pub use image::*;

mod pixelformat;
pub use pixelformat::*;
