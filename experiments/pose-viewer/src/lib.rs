//! Pieces of the pose viewer that don't need a window: configuration,
//! camera selection, pipeline start-up, status text, frame composition and
//! the `Viewer` state machine that ties them together.

pub mod config;
pub mod pipeline;
pub mod source;
pub mod status;
pub mod view;
pub mod viewer;

pub use config::ViewerConfig;
pub use pipeline::{Pipeline, landmarker_loader, start_pipeline};
pub use source::CameraSource;
pub use status::{Status, window_title};
pub use view::{Layout, Rect, draw_frame, draw_scene};
pub use viewer::{FRAME_TIMEOUT, Viewer, ZOOM_STEP};
