//! Webcam capture for the mirror pipeline.
//!
//! All cameras implement the async `Camera` trait and hand out `Rgb8`
//! frames. `V4l2Camera` (feature `v4l2`) reads a real device; `StillCamera`
//! replays a single image at the configured frame rate.

pub mod config;
pub mod error;
pub mod still;
pub mod traits;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use config::CameraConfig;
pub use error::CameraError;
pub use still::StillCamera;
pub use traits::Camera;

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Camera;
