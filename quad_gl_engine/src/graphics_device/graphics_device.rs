/// GraphicsDevice trait - raw driver primitives wrapped by every resource

use std::fmt;
use std::num::NonZeroU32;
use bitflags::bitflags;

use crate::error::Result;

// ============================================================================
// Handles
// ============================================================================

/// GPU buffer name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferHandle(pub NonZeroU32);

/// GPU vertex array object name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexArrayHandle(pub NonZeroU32);

/// GPU shader stage object name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderHandle(pub NonZeroU32);

/// GPU program object name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramHandle(pub NonZeroU32);

/// GPU texture name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub NonZeroU32);

/// Location of an active uniform inside a linked program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

// ============================================================================
// Enumerations
// ============================================================================

/// Binding point of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Per-vertex attribute data (ARRAY_BUFFER)
    Vertex,
    /// Element indices (ELEMENT_ARRAY_BUFFER)
    Index,
}

/// Numeric type of one vertex attribute component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Float,
    Int,
    UnsignedInt,
    Short,
    UnsignedShort,
    Byte,
    UnsignedByte,
}

impl AttributeType {
    /// Size of one component in bytes
    pub fn size_bytes(&self) -> u32 {
        match self {
            AttributeType::Float | AttributeType::Int | AttributeType::UnsignedInt => 4,
            AttributeType::Short | AttributeType::UnsignedShort => 2,
            AttributeType::Byte | AttributeType::UnsignedByte => 1,
        }
    }

    /// Integer types feed the shader as integers unless normalized
    pub fn is_integer(&self) -> bool {
        !matches!(self, AttributeType::Float)
    }
}

/// Shader stage kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Texture minification/magnification filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

/// Texture coordinate wrap mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureWrap {
    Repeat,
    MirroredRepeat,
    ClampToEdge,
}

/// Primitive assembly mode for draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
}

bitflags! {
    /// Framebuffer planes cleared by `GraphicsDevice::clear`
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

// ============================================================================
// Descriptors
// ============================================================================

/// One per-vertex input attribute as laid out inside a vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Number of components (1-4)
    pub component_count: u32,
    /// Component numeric type
    pub attribute_type: AttributeType,
    /// Map integer components to [0, 1] / [-1, 1]
    pub normalized: bool,
    /// Byte offset from the start of the vertex
    pub offset: u32,
}

impl VertexAttribute {
    /// Bytes occupied by this attribute inside one vertex
    pub fn size_bytes(&self) -> u32 {
        self.component_count * self.attribute_type.size_bytes()
    }
}

/// Value written to a uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec4([f32; 4]),
    /// Column-major 4x4 matrix
    Mat4([f32; 16]),
}

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// Raw driver interface
///
/// Mirrors the handle-based primitives of an OpenGL 3.3 core context. All calls
/// act on the device's implicit binding state ("current" buffer per target,
/// vertex array, program, texture unit), exactly like the underlying API.
/// Implemented by backend crates (e.g., `GlowGraphicsDevice`).
///
/// Creation calls are the only fallible ones; every other error is queued on
/// the device and observed through `get_error` (see `ErrorProbe`).
pub trait GraphicsDevice {
    // ===== BUFFERS =====

    /// Allocate a new buffer name
    fn create_buffer(&self) -> Result<BufferHandle>;

    /// Make `buffer` current for `target` (`None` clears the binding)
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferHandle>);

    /// Upload `data` to the buffer bound to `target` (static usage)
    fn buffer_data(&self, target: BufferTarget, data: &[u8]);

    /// Release a buffer name
    fn delete_buffer(&self, buffer: BufferHandle);

    // ===== VERTEX ARRAYS =====

    fn create_vertex_array(&self) -> Result<VertexArrayHandle>;
    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayHandle>);
    fn delete_vertex_array(&self, vertex_array: VertexArrayHandle);

    /// Enable attribute slot `index` on the bound vertex array
    fn enable_vertex_attribute(&self, index: u32);

    /// Point slot `index` of the bound vertex array at the bound vertex buffer
    fn vertex_attribute_pointer(&self, index: u32, attribute: &VertexAttribute, stride: u32);

    // ===== SHADERS =====

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle>;
    fn shader_source(&self, shader: ShaderHandle, source: &str);
    fn compile_shader(&self, shader: ShaderHandle);
    fn shader_compile_status(&self, shader: ShaderHandle) -> bool;
    fn shader_info_log(&self, shader: ShaderHandle) -> String;
    fn delete_shader(&self, shader: ShaderHandle);

    // ===== PROGRAMS =====

    fn create_program(&self) -> Result<ProgramHandle>;
    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle);
    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle);
    fn link_program(&self, program: ProgramHandle);
    fn program_link_status(&self, program: ProgramHandle) -> bool;
    fn program_info_log(&self, program: ProgramHandle) -> String;

    /// Check the program against the current context state
    ///
    /// Returns `true` when the program can execute. Backends without a
    /// validation query report success and rely on their debug output.
    fn validate_program(&self, _program: ProgramHandle) -> bool {
        true
    }

    /// Make `program` current (`None` clears it)
    fn use_program(&self, program: Option<ProgramHandle>);
    fn delete_program(&self, program: ProgramHandle);

    /// Resolve an active uniform (`None` when the linked program has no such name)
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;

    /// Write a uniform of the current program
    fn set_uniform(&self, location: UniformLocation, value: UniformValue);

    // ===== TEXTURES =====

    fn create_texture(&self) -> Result<TextureHandle>;

    /// Select the texture unit subsequent `bind_texture` calls act on
    fn active_texture_unit(&self, unit: u32);

    /// Bind a 2D texture on the active unit (`None` clears it)
    fn bind_texture(&self, texture: Option<TextureHandle>);

    /// Filtering of the bound 2D texture
    fn texture_filter(&self, min: TextureFilter, mag: TextureFilter);

    /// Wrapping of the bound 2D texture
    fn texture_wrap(&self, s: TextureWrap, t: TextureWrap);

    /// Upload tightly packed RGBA8 pixels to the bound 2D texture (level 0)
    fn texture_image_rgba8(&self, width: u32, height: u32, pixels: &[u8]);

    fn delete_texture(&self, texture: TextureHandle);

    // ===== FRAME =====

    fn clear_color(&self, color: [f32; 4]);
    fn clear(&self, flags: ClearFlags);

    /// Indexed draw using the bound vertex array, its index buffer and the current program
    ///
    /// Indices are `u32`; `offset` is in bytes into the index buffer.
    fn draw_elements(&self, topology: PrimitiveTopology, index_count: u32, offset: u32);

    // ===== ERRORS =====

    /// Pop one pending error code (`None` = GL_NO_ERROR)
    fn get_error(&self) -> Option<u32>;
}
