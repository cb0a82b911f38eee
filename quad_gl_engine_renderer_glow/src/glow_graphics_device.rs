/// GlowGraphicsDevice - GraphicsDevice implementation over a glow context
///
/// The context must be current on the calling thread for the whole lifetime of
/// the device. Handles are GL names; glow's native wrappers share the same
/// `NonZeroU32` representation, so conversions are free.

use glow::HasContext;
use quad_gl_engine::quadgl::device::{
    BufferHandle, BufferTarget, ClearFlags, Config, GraphicsDevice, PrimitiveTopology,
    ProgramHandle, ShaderHandle, ShaderStage, TextureFilter, TextureHandle, TextureWrap,
    UniformLocation, UniformValue, VertexArrayHandle, VertexAttribute,
};
use quad_gl_engine::quadgl::{Error, Result};
use quad_gl_engine::{quadgl_err, quadgl_error, quadgl_info, quadgl_warn};

use crate::debug::{self, DebugConfig};
use crate::glow_format::*;

/// Oldest desktop GL version exposing every call used here
const MIN_GL_VERSION: (u32, u32) = (3, 3);
/// Oldest GLES version exposing every call used here
const MIN_GLES_VERSION: (u32, u32) = (3, 0);

/// Reject contexts older than the minimum desktop or embedded version
fn check_version(app_name: &str, major: u32, minor: u32, is_embedded: bool) -> Result<()> {
    let (api, minimum) = if is_embedded {
        ("OpenGL ES", MIN_GLES_VERSION)
    } else {
        ("OpenGL", MIN_GL_VERSION)
    };
    if (major, minor) < minimum {
        let message = format!(
            "{}: {} {}.{} is too old (need {}.{})",
            app_name, api, major, minor, minimum.0, minimum.1
        );
        quadgl_error!("quadgl::glow", "{}", message);
        return Err(Error::InitializationFailed(message));
    }
    Ok(())
}

/// GraphicsDevice backed by a current glow context
pub struct GlowGraphicsDevice {
    gl: glow::Context,
}

impl GlowGraphicsDevice {
    /// Wrap an already current context
    ///
    /// Installs the debug-message callback when `config.enable_debug_output`
    /// is set and the context supports it.
    ///
    /// # Errors
    ///
    /// `Error::InitializationFailed` if the context is older than GL 3.3 / GLES 3.0.
    pub fn new(mut gl: glow::Context, config: &Config) -> Result<Self> {
        let (major, minor, is_embedded, vendor_info) = {
            let version = gl.version();
            (version.major, version.minor, version.is_embedded, version.vendor_info.clone())
        };
        let api = if is_embedded { "OpenGL ES" } else { "OpenGL" };
        let (vendor, renderer) = unsafe {
            (
                gl.get_parameter_string(glow::VENDOR),
                gl.get_parameter_string(glow::RENDERER),
            )
        };

        check_version(&config.app_name, major, minor, is_embedded)?;

        quadgl_info!(
            "quadgl::glow",
            "{}: {} {}.{} ({}) on {} / {}",
            config.app_name,
            api,
            major,
            minor,
            vendor_info,
            vendor,
            renderer
        );

        if config.enable_debug_output {
            if gl.supports_debug() {
                debug::init_debug_config(DebugConfig::from(config));
                unsafe {
                    gl.enable(glow::DEBUG_OUTPUT);
                    gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
                    gl.debug_message_callback(debug::gl_debug_callback);
                }
                quadgl_info!("quadgl::glow", "GL debug output enabled ({:?})", config.debug_severity);
            } else {
                quadgl_warn!("quadgl::glow", "GL debug output requested but KHR_debug is unavailable");
            }
        }

        Ok(Self { gl })
    }

    /// Underlying glow context
    pub fn context(&self) -> &glow::Context {
        &self.gl
    }
}

impl GraphicsDevice for GlowGraphicsDevice {
    // ===== BUFFERS =====

    fn create_buffer(&self) -> Result<BufferHandle> {
        let buffer = unsafe { self.gl.create_buffer() }
            .map_err(|e| quadgl_err!("quadgl::glow", "Failed to create buffer: {}", e))?;
        Ok(BufferHandle(buffer.0))
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferHandle>) {
        unsafe {
            self.gl.bind_buffer(buffer_target_to_gl(target), buffer.map(|b| glow::NativeBuffer(b.0)));
        }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        unsafe {
            self.gl.buffer_data_u8_slice(buffer_target_to_gl(target), data, glow::STATIC_DRAW);
        }
    }

    fn delete_buffer(&self, buffer: BufferHandle) {
        unsafe { self.gl.delete_buffer(glow::NativeBuffer(buffer.0)) }
    }

    // ===== VERTEX ARRAYS =====

    fn create_vertex_array(&self) -> Result<VertexArrayHandle> {
        let vertex_array = unsafe { self.gl.create_vertex_array() }
            .map_err(|e| quadgl_err!("quadgl::glow", "Failed to create vertex array: {}", e))?;
        Ok(VertexArrayHandle(vertex_array.0))
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayHandle>) {
        unsafe {
            self.gl.bind_vertex_array(vertex_array.map(|v| glow::NativeVertexArray(v.0)));
        }
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayHandle) {
        unsafe { self.gl.delete_vertex_array(glow::NativeVertexArray(vertex_array.0)) }
    }

    fn enable_vertex_attribute(&self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn vertex_attribute_pointer(&self, index: u32, attribute: &VertexAttribute, stride: u32) {
        let size = attribute.component_count as i32;
        let data_type = attribute_type_to_gl(attribute.attribute_type);
        unsafe {
            if uses_integer_pointer(attribute.attribute_type, attribute.normalized) {
                self.gl.vertex_attrib_pointer_i32(index, size, data_type, stride as i32, attribute.offset as i32);
            } else {
                self.gl.vertex_attrib_pointer_f32(
                    index,
                    size,
                    data_type,
                    attribute.normalized,
                    stride as i32,
                    attribute.offset as i32,
                );
            }
        }
    }

    // ===== SHADERS =====

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle> {
        let shader = unsafe { self.gl.create_shader(shader_stage_to_gl(stage)) }
            .map_err(|e| quadgl_err!("quadgl::glow", "Failed to create {} shader: {}", stage, e))?;
        Ok(ShaderHandle(shader.0))
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        unsafe { self.gl.shader_source(glow::NativeShader(shader.0), source) }
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        unsafe { self.gl.compile_shader(glow::NativeShader(shader.0)) }
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        unsafe { self.gl.get_shader_compile_status(glow::NativeShader(shader.0)) }
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        unsafe { self.gl.get_shader_info_log(glow::NativeShader(shader.0)) }
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        unsafe { self.gl.delete_shader(glow::NativeShader(shader.0)) }
    }

    // ===== PROGRAMS =====

    fn create_program(&self) -> Result<ProgramHandle> {
        let program = unsafe { self.gl.create_program() }
            .map_err(|e| quadgl_err!("quadgl::glow", "Failed to create program: {}", e))?;
        Ok(ProgramHandle(program.0))
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        unsafe {
            self.gl.attach_shader(glow::NativeProgram(program.0), glow::NativeShader(shader.0));
        }
    }

    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        unsafe {
            self.gl.detach_shader(glow::NativeProgram(program.0), glow::NativeShader(shader.0));
        }
    }

    fn link_program(&self, program: ProgramHandle) {
        unsafe { self.gl.link_program(glow::NativeProgram(program.0)) }
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        unsafe { self.gl.get_program_link_status(glow::NativeProgram(program.0)) }
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        unsafe { self.gl.get_program_info_log(glow::NativeProgram(program.0)) }
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        unsafe { self.gl.use_program(program.map(|p| glow::NativeProgram(p.0))) }
    }

    fn delete_program(&self, program: ProgramHandle) {
        unsafe { self.gl.delete_program(glow::NativeProgram(program.0)) }
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        unsafe { self.gl.get_uniform_location(glow::NativeProgram(program.0), name) }
            .map(|location| UniformLocation(location.0))
    }

    fn set_uniform(&self, location: UniformLocation, value: UniformValue) {
        let location = glow::NativeUniformLocation(location.0);
        unsafe {
            match value {
                UniformValue::Int(v) => self.gl.uniform_1_i32(Some(&location), v),
                UniformValue::Float(v) => self.gl.uniform_1_f32(Some(&location), v),
                UniformValue::Vec4([x, y, z, w]) => self.gl.uniform_4_f32(Some(&location), x, y, z, w),
                UniformValue::Mat4(m) => self.gl.uniform_matrix_4_f32_slice(Some(&location), false, &m),
            }
        }
    }

    // ===== TEXTURES =====

    fn create_texture(&self) -> Result<TextureHandle> {
        let texture = unsafe { self.gl.create_texture() }
            .map_err(|e| quadgl_err!("quadgl::glow", "Failed to create texture: {}", e))?;
        Ok(TextureHandle(texture.0))
    }

    fn active_texture_unit(&self, unit: u32) {
        unsafe { self.gl.active_texture(texture_unit_to_gl(unit)) }
    }

    fn bind_texture(&self, texture: Option<TextureHandle>) {
        unsafe {
            self.gl.bind_texture(glow::TEXTURE_2D, texture.map(|t| glow::NativeTexture(t.0)));
        }
    }

    fn texture_filter(&self, min: TextureFilter, mag: TextureFilter) {
        unsafe {
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, texture_filter_to_gl(min));
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, texture_filter_to_gl(mag));
        }
    }

    fn texture_wrap(&self, s: TextureWrap, t: TextureWrap) {
        unsafe {
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, texture_wrap_to_gl(s));
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, texture_wrap_to_gl(t));
        }
    }

    fn texture_image_rgba8(&self, width: u32, height: u32, pixels: &[u8]) {
        unsafe {
            // Rows are tightly packed whatever the width
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(pixels),
            );
        }
    }

    fn delete_texture(&self, texture: TextureHandle) {
        unsafe { self.gl.delete_texture(glow::NativeTexture(texture.0)) }
    }

    // ===== FRAME =====

    fn clear_color(&self, color: [f32; 4]) {
        unsafe { self.gl.clear_color(color[0], color[1], color[2], color[3]) }
    }

    fn clear(&self, flags: ClearFlags) {
        unsafe { self.gl.clear(clear_flags_to_gl(flags)) }
    }

    fn draw_elements(&self, topology: PrimitiveTopology, index_count: u32, offset: u32) {
        unsafe {
            self.gl.draw_elements(
                topology_to_gl(topology),
                index_count as i32,
                glow::UNSIGNED_INT,
                offset as i32,
            );
        }
    }

    // ===== ERRORS =====

    fn get_error(&self) -> Option<u32> {
        match unsafe { self.gl.get_error() } {
            glow::NO_ERROR => None,
            code => Some(code),
        }
    }
}

#[cfg(test)]
#[path = "glow_graphics_device_tests.rs"]
mod tests;
