//! Framebuffer access and composition for RGBA frame data.
//!
//! [`FramebufferView`] borrows the core's pixels without copying. The only
//! copy happens inside [`Renderer::render`], where the view is composed with
//! the border onto a canvas and handed to a [`Surface`].

mod pattern;
mod ppm;
mod render;
mod view;

pub use pattern::write_checkerboard_rgba;
pub use ppm::encode_ppm;
pub use render::{BorderStyle, MemorySurface, Renderer, Surface};
pub use view::{FrameError, FramebufferView};
