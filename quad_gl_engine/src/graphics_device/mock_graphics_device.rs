/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Behaves like a tiny OpenGL state machine: it hands out names, tracks the
/// "current" binding per target, stores per-vertex-array attribute state,
/// compiles and links fake shaders, and queues GL error codes whenever a call
/// would be invalid on a real context. Every call is also appended to a call
/// log so tests can assert ordering.
///
/// Shader sources compile when they contain `main` and do not contain
/// `COMPILE_ERROR`. Linking fails when either stage is missing/uncompiled or a
/// source contains `LINK_ERROR`. Active uniforms are discovered from
/// `uniform <type> <name>;` declarations, in declaration order.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::{BTreeMap, VecDeque};
use std::num::NonZeroU32;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, BufferHandle, VertexArrayHandle, ShaderHandle, ProgramHandle,
    TextureHandle, UniformLocation, BufferTarget, ShaderStage, TextureFilter,
    TextureWrap, PrimitiveTopology, ClearFlags, VertexAttribute, UniformValue,
};

pub const GL_INVALID_ENUM: u32 = 0x0500;
pub const GL_INVALID_VALUE: u32 = 0x0501;
pub const GL_INVALID_OPERATION: u32 = 0x0502;
pub const GL_OUT_OF_MEMORY: u32 = 0x0505;

/// GL_MAX_VERTEX_ATTRIBS guaranteed minimum
pub const MAX_VERTEX_ATTRIBUTES: u32 = 16;
/// GL_MAX_COMBINED_TEXTURE_IMAGE_UNITS guaranteed minimum (3.3)
pub const MAX_TEXTURE_UNITS: u32 = 48;

// ============================================================================
// Mock objects
// ============================================================================

/// Kind of GPU object, used to key deletion bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Buffer,
    VertexArray,
    Shader,
    Program,
    Texture,
}

#[derive(Debug, Clone, Default)]
pub struct MockBuffer {
    pub data: Vec<u8>,
    pub upload_count: u32,
}

/// Attribute slot state of a vertex array
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockAttribute {
    pub enabled: bool,
    /// (attribute, stride, source buffer)
    pub pointer: Option<(VertexAttribute, u32, BufferHandle)>,
}

#[derive(Debug, Clone, Default)]
pub struct MockVertexArray {
    pub attributes: BTreeMap<u32, MockAttribute>,
    pub index_buffer: Option<BufferHandle>,
}

#[derive(Debug, Clone)]
pub struct MockShader {
    pub stage: ShaderStage,
    pub source: String,
    pub compiled: bool,
    pub info_log: String,
}

#[derive(Debug, Clone, Default)]
pub struct MockProgram {
    pub attached: Vec<ShaderHandle>,
    pub linked: bool,
    pub info_log: String,
    /// Active uniform names; the index is the location
    pub uniforms: Vec<String>,
    pub values: FxHashMap<u32, UniformValue>,
}

#[derive(Debug, Clone, Default)]
pub struct MockTexture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub min_filter: Option<TextureFilter>,
    pub mag_filter: Option<TextureFilter>,
    pub wrap_s: Option<TextureWrap>,
    pub wrap_t: Option<TextureWrap>,
}

/// One recorded `draw_elements` call with the state it observed
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub topology: PrimitiveTopology,
    pub index_count: u32,
    pub offset: u32,
    pub vertex_array: VertexArrayHandle,
    pub index_buffer: Option<BufferHandle>,
    pub program: ProgramHandle,
}

/// Complete mock context state (public for inspection in tests)
#[derive(Debug, Default)]
pub struct MockState {
    next_name: u32,

    pub buffers: FxHashMap<BufferHandle, MockBuffer>,
    pub bound_buffers: FxHashMap<BufferTarget, BufferHandle>,

    pub vertex_arrays: FxHashMap<VertexArrayHandle, MockVertexArray>,
    pub bound_vertex_array: Option<VertexArrayHandle>,

    pub shaders: FxHashMap<ShaderHandle, MockShader>,
    pub programs: FxHashMap<ProgramHandle, MockProgram>,
    pub current_program: Option<ProgramHandle>,

    pub textures: FxHashMap<TextureHandle, MockTexture>,
    pub active_unit: u32,
    pub texture_units: BTreeMap<u32, TextureHandle>,

    pub clear_color: [f32; 4],
    pub clears: Vec<ClearFlags>,
    pub draws: Vec<DrawCall>,

    /// Pending error codes, oldest first
    pub errors: VecDeque<u32>,
    /// Successful deletions per (kind, raw name)
    pub deletions: FxHashMap<(HandleKind, u32), u32>,
    /// Deletions of names that were not alive (double free / never created)
    pub invalid_deletes: u32,
    /// Number of `uniform_location` queries
    pub uniform_lookups: u32,
    /// Every accepted `set_uniform` (location, value), in order
    pub uniform_writes: Vec<(u32, UniformValue)>,
    /// Names of every device call, in order
    pub calls: Vec<&'static str>,

    /// Refuse creation of this kind of object
    pub fail_creation: Option<HandleKind>,
    /// Report validation failure for every program
    pub fail_validation: bool,
}

impl MockState {
    fn allocate(&mut self, kind: HandleKind) -> Result<NonZeroU32> {
        if self.fail_creation == Some(kind) {
            return Err(Error::BackendError(format!("mock device refused to create {:?}", kind)));
        }
        self.next_name += 1;
        NonZeroU32::new(self.next_name)
            .ok_or_else(|| Error::BackendError("mock device ran out of names".to_string()))
    }

    fn push_error(&mut self, code: u32) {
        self.errors.push_back(code);
    }

    fn record_deletion(&mut self, kind: HandleKind, name: NonZeroU32, existed: bool) {
        if existed {
            *self.deletions.entry((kind, name.get())).or_insert(0) += 1;
        } else {
            self.invalid_deletes += 1;
        }
    }

    fn bound_vertex_array_mut(&mut self) -> Option<&mut MockVertexArray> {
        let handle = self.bound_vertex_array?;
        self.vertex_arrays.get_mut(&handle)
    }

    fn bound_texture_mut(&mut self) -> Option<&mut MockTexture> {
        let handle = *self.texture_units.get(&self.active_unit)?;
        self.textures.get_mut(&handle)
    }
}

/// Parse `uniform <type> <name>;` declarations
fn declared_uniforms(source: &str) -> Vec<String> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("uniform "))
        .filter_map(|line| {
            let declaration = line.trim_end_matches(';');
            let name = declaration.split_whitespace().last()?;
            Some(name.split('[').next().unwrap_or(name).to_string())
        })
        .collect()
}

// ============================================================================
// Mock device
// ============================================================================

pub struct MockGraphicsDevice {
    state: RefCell<MockState>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(MockState::default()),
        }
    }

    /// Read-only view of the mock context
    pub fn state(&self) -> Ref<'_, MockState> {
        self.state.borrow()
    }

    /// Mutable view (failure injection, resets between cases)
    pub fn state_mut(&self) -> RefMut<'_, MockState> {
        self.state.borrow_mut()
    }

    /// Queue an error code as if a previous call had failed
    pub fn push_error(&self, code: u32) {
        self.state.borrow_mut().push_error(code);
    }

    /// Number of objects of every kind still alive
    pub fn live_object_count(&self) -> usize {
        let state = self.state.borrow();
        state.buffers.len()
            + state.vertex_arrays.len()
            + state.shaders.len()
            + state.programs.len()
            + state.textures.len()
    }

    /// How many times the named object was released
    pub fn deletion_count(&self, kind: HandleKind, name: NonZeroU32) -> u32 {
        self.state
            .borrow()
            .deletions
            .get(&(kind, name.get()))
            .copied()
            .unwrap_or(0)
    }

    /// Forget recorded calls, draws and errors while keeping live objects
    pub fn reset_log(&self) {
        let mut state = self.state.borrow_mut();
        state.calls.clear();
        state.draws.clear();
        state.clears.clear();
        state.errors.clear();
        state.uniform_writes.clear();
        state.uniform_lookups = 0;
    }

    fn call(&self, name: &'static str) -> RefMut<'_, MockState> {
        let mut state = self.state.borrow_mut();
        state.calls.push(name);
        state
    }
}

impl Default for MockGraphicsDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    // ===== BUFFERS =====

    fn create_buffer(&self) -> Result<BufferHandle> {
        let mut state = self.call("create_buffer");
        let handle = BufferHandle(state.allocate(HandleKind::Buffer)?);
        state.buffers.insert(handle, MockBuffer::default());
        Ok(handle)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferHandle>) {
        let mut state = self.call("bind_buffer");
        match buffer {
            Some(handle) if !state.buffers.contains_key(&handle) => {
                state.push_error(GL_INVALID_OPERATION);
                return;
            }
            Some(handle) => {
                state.bound_buffers.insert(target, handle);
            }
            None => {
                state.bound_buffers.remove(&target);
            }
        }
        // The element array binding is part of vertex array state
        if target == BufferTarget::Index {
            if let Some(vertex_array) = state.bound_vertex_array_mut() {
                vertex_array.index_buffer = buffer;
            }
        }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        let mut state = self.call("buffer_data");
        let Some(handle) = state.bound_buffers.get(&target).copied() else {
            state.push_error(GL_INVALID_OPERATION);
            return;
        };
        if let Some(buffer) = state.buffers.get_mut(&handle) {
            buffer.data = data.to_vec();
            buffer.upload_count += 1;
        }
    }

    fn delete_buffer(&self, buffer: BufferHandle) {
        let mut state = self.call("delete_buffer");
        let existed = state.buffers.remove(&buffer).is_some();
        if existed {
            state.bound_buffers.retain(|_, bound| *bound != buffer);
        }
        state.record_deletion(HandleKind::Buffer, buffer.0, existed);
    }

    // ===== VERTEX ARRAYS =====

    fn create_vertex_array(&self) -> Result<VertexArrayHandle> {
        let mut state = self.call("create_vertex_array");
        let handle = VertexArrayHandle(state.allocate(HandleKind::VertexArray)?);
        state.vertex_arrays.insert(handle, MockVertexArray::default());
        Ok(handle)
    }

    fn bind_vertex_array(&self, vertex_array: Option<VertexArrayHandle>) {
        let mut state = self.call("bind_vertex_array");
        match vertex_array {
            Some(handle) => {
                let Some(index_buffer) = state.vertex_arrays.get(&handle).map(|v| v.index_buffer) else {
                    state.push_error(GL_INVALID_OPERATION);
                    return;
                };
                state.bound_vertex_array = Some(handle);
                match index_buffer {
                    Some(buffer) => {
                        state.bound_buffers.insert(BufferTarget::Index, buffer);
                    }
                    None => {
                        state.bound_buffers.remove(&BufferTarget::Index);
                    }
                }
            }
            None => {
                state.bound_vertex_array = None;
                state.bound_buffers.remove(&BufferTarget::Index);
            }
        }
    }

    fn delete_vertex_array(&self, vertex_array: VertexArrayHandle) {
        let mut state = self.call("delete_vertex_array");
        let existed = state.vertex_arrays.remove(&vertex_array).is_some();
        if existed && state.bound_vertex_array == Some(vertex_array) {
            state.bound_vertex_array = None;
        }
        state.record_deletion(HandleKind::VertexArray, vertex_array.0, existed);
    }

    fn enable_vertex_attribute(&self, index: u32) {
        let mut state = self.call("enable_vertex_attribute");
        if index >= MAX_VERTEX_ATTRIBUTES {
            state.push_error(GL_INVALID_VALUE);
            return;
        }
        match state.bound_vertex_array_mut() {
            Some(vertex_array) => vertex_array.attributes.entry(index).or_default().enabled = true,
            None => state.push_error(GL_INVALID_OPERATION),
        }
    }

    fn vertex_attribute_pointer(&self, index: u32, attribute: &VertexAttribute, stride: u32) {
        let mut state = self.call("vertex_attribute_pointer");
        if index >= MAX_VERTEX_ATTRIBUTES || !(1..=4).contains(&attribute.component_count) {
            state.push_error(GL_INVALID_VALUE);
            return;
        }
        let Some(buffer) = state.bound_buffers.get(&BufferTarget::Vertex).copied() else {
            state.push_error(GL_INVALID_OPERATION);
            return;
        };
        match state.bound_vertex_array_mut() {
            Some(vertex_array) => {
                vertex_array.attributes.entry(index).or_default().pointer = Some((*attribute, stride, buffer));
            }
            None => state.push_error(GL_INVALID_OPERATION),
        }
    }

    // ===== SHADERS =====

    fn create_shader(&self, stage: ShaderStage) -> Result<ShaderHandle> {
        let mut state = self.call("create_shader");
        let handle = ShaderHandle(state.allocate(HandleKind::Shader)?);
        state.shaders.insert(handle, MockShader {
            stage,
            source: String::new(),
            compiled: false,
            info_log: String::new(),
        });
        Ok(handle)
    }

    fn shader_source(&self, shader: ShaderHandle, source: &str) {
        let mut state = self.call("shader_source");
        match state.shaders.get_mut(&shader) {
            Some(mock) => mock.source = source.to_string(),
            None => state.push_error(GL_INVALID_VALUE),
        }
    }

    fn compile_shader(&self, shader: ShaderHandle) {
        let mut state = self.call("compile_shader");
        let Some(mock) = state.shaders.get_mut(&shader) else {
            state.push_error(GL_INVALID_VALUE);
            return;
        };
        mock.compiled = mock.source.contains("main") && !mock.source.contains("COMPILE_ERROR");
        mock.info_log = if mock.compiled {
            String::new()
        } else {
            format!("0:1({}): error: syntax error, unexpected end of file", mock.stage)
        };
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        let state = self.call("shader_compile_status");
        state.shaders.get(&shader).map(|s| s.compiled).unwrap_or(false)
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        let state = self.call("shader_info_log");
        state.shaders.get(&shader).map(|s| s.info_log.clone()).unwrap_or_default()
    }

    fn delete_shader(&self, shader: ShaderHandle) {
        let mut state = self.call("delete_shader");
        let existed = state.shaders.remove(&shader).is_some();
        state.record_deletion(HandleKind::Shader, shader.0, existed);
    }

    // ===== PROGRAMS =====

    fn create_program(&self) -> Result<ProgramHandle> {
        let mut state = self.call("create_program");
        let handle = ProgramHandle(state.allocate(HandleKind::Program)?);
        state.programs.insert(handle, MockProgram::default());
        Ok(handle)
    }

    fn attach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        let mut state = self.call("attach_shader");
        if !state.shaders.contains_key(&shader) {
            state.push_error(GL_INVALID_VALUE);
            return;
        }
        match state.programs.get_mut(&program) {
            Some(mock) if mock.attached.contains(&shader) => state.push_error(GL_INVALID_OPERATION),
            Some(mock) => mock.attached.push(shader),
            None => state.push_error(GL_INVALID_VALUE),
        }
    }

    fn detach_shader(&self, program: ProgramHandle, shader: ShaderHandle) {
        let mut state = self.call("detach_shader");
        match state.programs.get_mut(&program) {
            Some(mock) if mock.attached.contains(&shader) => mock.attached.retain(|s| *s != shader),
            _ => state.push_error(GL_INVALID_OPERATION),
        }
    }

    fn link_program(&self, program: ProgramHandle) {
        let mut state = self.call("link_program");
        let Some(attached) = state.programs.get(&program).map(|p| p.attached.clone()) else {
            state.push_error(GL_INVALID_VALUE);
            return;
        };

        let stages: Vec<&MockShader> = attached.iter().filter_map(|s| state.shaders.get(s)).collect();
        let has_stage = |stage: ShaderStage| stages.iter().any(|s| s.stage == stage && s.compiled);
        let failure = if !has_stage(ShaderStage::Vertex) {
            Some("error: no compiled vertex shader attached")
        } else if !has_stage(ShaderStage::Fragment) {
            Some("error: no compiled fragment shader attached")
        } else if stages.iter().any(|s| s.source.contains("LINK_ERROR")) {
            Some("error: unresolved symbol between stages")
        } else {
            None
        };

        let mut uniforms: Vec<String> = Vec::new();
        for stage in &stages {
            for name in declared_uniforms(&stage.source) {
                if !uniforms.contains(&name) {
                    uniforms.push(name);
                }
            }
        }

        if let Some(mock) = state.programs.get_mut(&program) {
            mock.linked = failure.is_none();
            mock.info_log = failure.unwrap_or_default().to_string();
            mock.uniforms = if mock.linked { uniforms } else { Vec::new() };
            mock.values.clear();
        }
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        let state = self.call("program_link_status");
        state.programs.get(&program).map(|p| p.linked).unwrap_or(false)
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        let state = self.call("program_info_log");
        state.programs.get(&program).map(|p| p.info_log.clone()).unwrap_or_default()
    }

    fn validate_program(&self, program: ProgramHandle) -> bool {
        let mut state = self.call("validate_program");
        let linked = state.programs.get(&program).map(|p| p.linked).unwrap_or(false);
        let valid = linked && !state.fail_validation;
        if !valid {
            if let Some(mock) = state.programs.get_mut(&program) {
                mock.info_log = "validation failed: program is not executable in the current state".to_string();
            }
        }
        valid
    }

    fn use_program(&self, program: Option<ProgramHandle>) {
        let mut state = self.call("use_program");
        match program {
            Some(handle) => {
                if state.programs.get(&handle).map(|p| p.linked).unwrap_or(false) {
                    state.current_program = Some(handle);
                } else {
                    state.push_error(GL_INVALID_OPERATION);
                }
            }
            None => state.current_program = None,
        }
    }

    fn delete_program(&self, program: ProgramHandle) {
        let mut state = self.call("delete_program");
        let existed = state.programs.remove(&program).is_some();
        if existed && state.current_program == Some(program) {
            state.current_program = None;
        }
        state.record_deletion(HandleKind::Program, program.0, existed);
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        let mut state = self.call("uniform_location");
        state.uniform_lookups += 1;
        let mock = state.programs.get(&program)?;
        mock.uniforms
            .iter()
            .position(|uniform| uniform == name)
            .map(|index| UniformLocation(index as u32))
    }

    fn set_uniform(&self, location: UniformLocation, value: UniformValue) {
        let mut state = self.call("set_uniform");
        let Some(program) = state.current_program else {
            state.push_error(GL_INVALID_OPERATION);
            return;
        };
        let accepted = match state.programs.get_mut(&program) {
            Some(mock) if (location.0 as usize) < mock.uniforms.len() => {
                mock.values.insert(location.0, value);
                true
            }
            _ => false,
        };
        if accepted {
            state.uniform_writes.push((location.0, value));
        } else {
            state.push_error(GL_INVALID_OPERATION);
        }
    }

    // ===== TEXTURES =====

    fn create_texture(&self) -> Result<TextureHandle> {
        let mut state = self.call("create_texture");
        let handle = TextureHandle(state.allocate(HandleKind::Texture)?);
        state.textures.insert(handle, MockTexture::default());
        Ok(handle)
    }

    fn active_texture_unit(&self, unit: u32) {
        let mut state = self.call("active_texture_unit");
        if unit >= MAX_TEXTURE_UNITS {
            state.push_error(GL_INVALID_ENUM);
        } else {
            state.active_unit = unit;
        }
    }

    fn bind_texture(&self, texture: Option<TextureHandle>) {
        let mut state = self.call("bind_texture");
        let unit = state.active_unit;
        match texture {
            Some(handle) if !state.textures.contains_key(&handle) => state.push_error(GL_INVALID_OPERATION),
            Some(handle) => {
                state.texture_units.insert(unit, handle);
            }
            None => {
                state.texture_units.remove(&unit);
            }
        }
    }

    fn texture_filter(&self, min: TextureFilter, mag: TextureFilter) {
        let mut state = self.call("texture_filter");
        match state.bound_texture_mut() {
            Some(texture) => {
                texture.min_filter = Some(min);
                texture.mag_filter = Some(mag);
            }
            None => state.push_error(GL_INVALID_OPERATION),
        }
    }

    fn texture_wrap(&self, s: TextureWrap, t: TextureWrap) {
        let mut state = self.call("texture_wrap");
        match state.bound_texture_mut() {
            Some(texture) => {
                texture.wrap_s = Some(s);
                texture.wrap_t = Some(t);
            }
            None => state.push_error(GL_INVALID_OPERATION),
        }
    }

    fn texture_image_rgba8(&self, width: u32, height: u32, pixels: &[u8]) {
        let mut state = self.call("texture_image_rgba8");
        if pixels.len() != (width as usize) * (height as usize) * 4 {
            state.push_error(GL_INVALID_VALUE);
            return;
        }
        match state.bound_texture_mut() {
            Some(texture) => {
                texture.width = width;
                texture.height = height;
                texture.pixels = pixels.to_vec();
            }
            None => state.push_error(GL_INVALID_OPERATION),
        }
    }

    fn delete_texture(&self, texture: TextureHandle) {
        let mut state = self.call("delete_texture");
        let existed = state.textures.remove(&texture).is_some();
        if existed {
            state.texture_units.retain(|_, bound| *bound != texture);
        }
        state.record_deletion(HandleKind::Texture, texture.0, existed);
    }

    // ===== FRAME =====

    fn clear_color(&self, color: [f32; 4]) {
        let mut state = self.call("clear_color");
        state.clear_color = color;
    }

    fn clear(&self, flags: ClearFlags) {
        let mut state = self.call("clear");
        state.clears.push(flags);
    }

    fn draw_elements(&self, topology: PrimitiveTopology, index_count: u32, offset: u32) {
        let mut state = self.call("draw_elements");
        let (Some(vertex_array), Some(program)) = (state.bound_vertex_array, state.current_program) else {
            state.push_error(GL_INVALID_OPERATION);
            return;
        };
        let index_buffer = state.vertex_arrays.get(&vertex_array).and_then(|v| v.index_buffer);
        state.draws.push(DrawCall {
            topology,
            index_count,
            offset,
            vertex_array,
            index_buffer,
            program,
        });
    }

    // ===== ERRORS =====

    fn get_error(&self) -> Option<u32> {
        let mut state = self.call("get_error");
        state.errors.pop_front()
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
