//! GPU resource wrappers
//!
//! Each wrapper owns exactly one driver handle and releases it on drop.

pub mod buffer;
pub mod buffer_layout;
pub mod vertex_array;
pub mod shader_source;
pub mod shader;
pub mod texture;

pub use buffer::{GpuBuffer, VertexBuffer, IndexBuffer};
pub use buffer_layout::{BufferLayout, VertexAttributeType};
pub use vertex_array::VertexArray;
pub use shader_source::{ShaderSources, SHADER_MARKER};
pub use shader::Shader;
pub use texture::Texture;
