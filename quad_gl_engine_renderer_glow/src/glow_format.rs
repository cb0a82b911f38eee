/// Engine enum -> GL constant conversions
///
/// Pure functions, testable without a context.

use quad_gl_engine::quadgl::device::{
    AttributeType, BufferTarget, ClearFlags, PrimitiveTopology, ShaderStage, TextureFilter,
    TextureWrap,
};

pub(crate) fn buffer_target_to_gl(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Vertex => glow::ARRAY_BUFFER,
        BufferTarget::Index => glow::ELEMENT_ARRAY_BUFFER,
    }
}

pub(crate) fn attribute_type_to_gl(attribute_type: AttributeType) -> u32 {
    match attribute_type {
        AttributeType::Float => glow::FLOAT,
        AttributeType::Int => glow::INT,
        AttributeType::UnsignedInt => glow::UNSIGNED_INT,
        AttributeType::Short => glow::SHORT,
        AttributeType::UnsignedShort => glow::UNSIGNED_SHORT,
        AttributeType::Byte => glow::BYTE,
        AttributeType::UnsignedByte => glow::UNSIGNED_BYTE,
    }
}

pub(crate) fn shader_stage_to_gl(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

/// Value for `tex_parameter_i32`
pub(crate) fn texture_filter_to_gl(filter: TextureFilter) -> i32 {
    match filter {
        TextureFilter::Nearest => glow::NEAREST as i32,
        TextureFilter::Linear => glow::LINEAR as i32,
    }
}

/// Value for `tex_parameter_i32`
pub(crate) fn texture_wrap_to_gl(wrap: TextureWrap) -> i32 {
    match wrap {
        TextureWrap::Repeat => glow::REPEAT as i32,
        TextureWrap::MirroredRepeat => glow::MIRRORED_REPEAT as i32,
        TextureWrap::ClampToEdge => glow::CLAMP_TO_EDGE as i32,
    }
}

pub(crate) fn topology_to_gl(topology: PrimitiveTopology) -> u32 {
    match topology {
        PrimitiveTopology::Points => glow::POINTS,
        PrimitiveTopology::Lines => glow::LINES,
        PrimitiveTopology::LineStrip => glow::LINE_STRIP,
        PrimitiveTopology::Triangles => glow::TRIANGLES,
        PrimitiveTopology::TriangleStrip => glow::TRIANGLE_STRIP,
    }
}

pub(crate) fn clear_flags_to_gl(flags: ClearFlags) -> u32 {
    let mut mask = 0;
    if flags.contains(ClearFlags::COLOR) {
        mask |= glow::COLOR_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::DEPTH) {
        mask |= glow::DEPTH_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::STENCIL) {
        mask |= glow::STENCIL_BUFFER_BIT;
    }
    mask
}

/// `GL_TEXTURE0 + unit`
pub(crate) fn texture_unit_to_gl(unit: u32) -> u32 {
    glow::TEXTURE0 + unit
}

/// Integer attributes go through `glVertexAttribIPointer` unless normalized
pub(crate) fn uses_integer_pointer(attribute_type: AttributeType, normalized: bool) -> bool {
    attribute_type.is_integer() && !normalized
}

#[cfg(test)]
#[path = "glow_format_tests.rs"]
mod tests;
