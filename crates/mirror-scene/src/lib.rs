//! The 3D side of the mirror: landmarks become a skeleton of spheres and
//! bones, seen through an orbiting perspective camera and rasterised in
//! software into a packed-pixel framebuffer.

mod camera;
pub use camera::*;

mod framebuffer;
pub use framebuffer::*;

mod lights;
pub use lights::*;

mod mapping;
pub use mapping::*;

mod renderer;
pub use renderer::*;

mod skeleton;
pub use skeleton::*;

mod throttle;
pub use throttle::*;
