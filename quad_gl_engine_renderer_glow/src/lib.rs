/*!
# QuadGL Engine - glow Backend

OpenGL implementation of the QuadGL resource layer.

This crate provides [`GlowGraphicsDevice`], which implements the
`quad_gl_engine` `GraphicsDevice` trait on top of a `glow::Context`. Window and
context creation stay with the host application: the device receives a context
that is already current on the calling thread.

```no_run
use std::rc::Rc;
use quad_gl_engine::quadgl::device::{Config, GraphicsDevice};
use quad_gl_engine_renderer_glow::GlowGraphicsDevice;

# fn run(gl: glow::Context) -> quad_gl_engine::quadgl::Result<()> {
let device: Rc<dyn GraphicsDevice> = Rc::new(GlowGraphicsDevice::new(gl, &Config::default())?);
# Ok(())
# }
```
*/

mod glow_graphics_device;
mod glow_format;
mod debug;

pub use glow_graphics_device::GlowGraphicsDevice;

// Re-export debug utilities
pub use debug::{
    DebugConfig, get_debug_stats, get_duplicate_message_count, print_debug_stats_report,
    reset_debug_config,
};
