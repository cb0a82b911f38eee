/*!
# QuadGL Engine

Core traits and types for the QuadGL resource layer.

This crate wraps the raw handle-based primitives of an OpenGL-style graphics API
in scoped-ownership objects. Every GPU call goes through the [`GraphicsDevice`]
trait, so backends (glow/OpenGL today) plug in at runtime and tests run against
a recording mock without a GPU.

## Architecture

- **GraphicsDevice**: raw driver primitives (buffers, vertex arrays, shaders, textures, draws)
- **VertexBuffer / IndexBuffer**: immutable GPU buffers released on drop
- **BufferLayout**: per-vertex attribute description with running stride
- **VertexArray**: attribute slot configuration for one or more vertex buffers
- **Shader**: `#shader`-sectioned source parsing, compile, link, cached uniforms
- **Texture**: decoded RGBA8 2D texture
- **ErrorProbe**: drains and reports the driver's error queue around a call
- **Renderer**: clear + indexed draw helper

[`GraphicsDevice`]: crate::graphics_device::GraphicsDevice
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod resource;
pub mod error_probe;
pub mod renderer;


// Main quadgl namespace module
pub mod quadgl {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton (logging hub)
    pub use crate::engine::Engine;

    // Graphics device trait
    pub use crate::graphics_device::GraphicsDevice;

    // Draw helper
    pub use crate::renderer::{Renderer, RendererStats};

    // Error probe
    pub use crate::error_probe::{ErrorProbe, GpuErrorCode};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, FacadeLogger};
    }

    // Device sub-module with all raw device types
    pub mod device {
        pub use crate::graphics_device::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }
}

// Re-export math library at crate root
pub use glam;
