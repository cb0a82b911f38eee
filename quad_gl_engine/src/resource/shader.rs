/// Shader - a linked vertex + fragment program with cached uniform lookup
///
/// Construction is all-or-nothing: both stages are compiled before a program
/// object exists, and every intermediate object is released whatever the
/// outcome. The program is never relinked, so cached locations stay valid for
/// the lifetime of the wrapper.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, ProgramHandle, ShaderHandle, ShaderStage, UniformLocation, UniformValue,
};
use crate::resource::ShaderSources;
use crate::{quadgl_debug, quadgl_error, quadgl_warn};

// ===== STAGE OBJECT =====

/// Compiled stage, deleted when dropped
struct StageObject<'a> {
    device: &'a dyn GraphicsDevice,
    handle: ShaderHandle,
}

impl<'a> StageObject<'a> {
    fn compile(device: &'a dyn GraphicsDevice, stage: ShaderStage, source: &str) -> Result<Self> {
        let handle = device.create_shader(stage)?;
        let object = Self { device, handle };

        device.shader_source(handle, source);
        device.compile_shader(handle);

        if !device.shader_compile_status(handle) {
            let log = device.shader_info_log(handle);
            quadgl_error!(
                "quadgl::Shader",
                "Failed to compile {} shader:\n{}",
                stage,
                log.trim_end()
            );
            return Err(Error::ShaderCompile { stage, log });
        }

        Ok(object)
    }
}

impl Drop for StageObject<'_> {
    fn drop(&mut self) {
        self.device.delete_shader(self.handle);
    }
}

// ===== SHADER =====

/// Linked vertex + fragment program with a uniform location cache
pub struct Shader {
    device: Rc<dyn GraphicsDevice>,
    program: ProgramHandle,
    path: Option<PathBuf>,
    /// Name -> location; `None` remembers names the program does not use
    uniform_cache: RefCell<FxHashMap<String, Option<UniformLocation>>>,
}

impl Shader {
    /// Read a dual-section file and build the program from it
    ///
    /// # Errors
    ///
    /// `Error::Io` if the file cannot be read, `Error::ShaderCompile` or
    /// `Error::ShaderLink` if the driver rejects the sources.
    pub fn from_file(device: Rc<dyn GraphicsDevice>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let sources = ShaderSources::from_file(path)?;
        let mut shader = Self::from_sources(device, &sources)?;
        shader.path = Some(path.to_path_buf());
        quadgl_debug!("quadgl::Shader", "Loaded {}", path.display());
        Ok(shader)
    }

    /// Compile, link and validate an already split source pair
    pub fn from_sources(device: Rc<dyn GraphicsDevice>, sources: &ShaderSources) -> Result<Self> {
        let vertex = StageObject::compile(device.as_ref(), ShaderStage::Vertex, &sources.vertex)?;
        let fragment = StageObject::compile(device.as_ref(), ShaderStage::Fragment, &sources.fragment)?;

        let program = device.create_program()?;
        let shader = Self {
            device: Rc::clone(&device),
            program,
            path: None,
            uniform_cache: RefCell::new(FxHashMap::default()),
        };

        device.attach_shader(program, vertex.handle);
        device.attach_shader(program, fragment.handle);
        device.link_program(program);

        if !device.program_link_status(program) {
            let log = device.program_info_log(program);
            quadgl_error!("quadgl::Shader", "Failed to link program:\n{}", log.trim_end());
            return Err(Error::ShaderLink(log));
        }

        if !device.validate_program(program) {
            let log = device.program_info_log(program);
            quadgl_error!("quadgl::Shader", "Program validation failed:\n{}", log.trim_end());
            return Err(Error::ShaderLink(log));
        }

        device.detach_shader(program, vertex.handle);
        device.detach_shader(program, fragment.handle);

        quadgl_debug!("quadgl::Shader", "Linked program #{}", program.0);
        Ok(shader)
    }

    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    /// Source file, when built with `from_file`
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn bind(&self) {
        self.device.use_program(Some(self.program));
    }

    pub fn unbind(&self) {
        self.device.use_program(None);
    }

    /// Bind the program and set `name` to `value`
    ///
    /// Names the linked program does not use are reported once and ignored.
    pub fn set_uniform(&self, name: &str, value: UniformValue) {
        let Some(location) = self.uniform_location(name) else {
            return;
        };
        self.bind();
        self.device.set_uniform(location, value);
    }

    pub fn set_uniform_1i(&self, name: &str, value: i32) {
        self.set_uniform(name, UniformValue::Int(value));
    }

    pub fn set_uniform_1f(&self, name: &str, value: f32) {
        self.set_uniform(name, UniformValue::Float(value));
    }

    pub fn set_uniform_4f(&self, name: &str, x: f32, y: f32, z: f32, w: f32) {
        self.set_uniform(name, UniformValue::Vec4([x, y, z, w]));
    }

    /// Column-major upload, no transpose
    pub fn set_uniform_mat4(&self, name: &str, matrix: &glam::Mat4) {
        self.set_uniform(name, UniformValue::Mat4(matrix.to_cols_array()));
    }

    fn uniform_location(&self, name: &str) -> Option<UniformLocation> {
        if let Some(cached) = self.uniform_cache.borrow().get(name) {
            return *cached;
        }

        let location = self.device.uniform_location(self.program, name);
        if location.is_none() {
            quadgl_warn!(
                "quadgl::Shader",
                "Uniform '{}' doesn't exist in program #{}",
                name,
                self.program.0
            );
        }
        self.uniform_cache.borrow_mut().insert(name.to_string(), location);
        location
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        self.device.delete_program(self.program);
    }
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
