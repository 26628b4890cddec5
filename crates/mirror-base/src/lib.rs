pub mod logging;
pub mod tensor;
pub mod vec2;
pub mod vec3;

pub use logging::{FileLogger, LogConfig, StdoutLogger, init_logger};
pub use tensor::{Tensor, TensorError};
pub use vec2::Vec2;
pub use vec3::Vec3;

// Re-export log crate so downstream crates can use mirror_base::log::*
pub use log;
