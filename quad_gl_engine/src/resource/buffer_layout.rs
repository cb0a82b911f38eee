/// BufferLayout - how the bytes of one vertex map to shader attributes
///
/// Attributes are appended in order; each one starts where the previous one
/// ended, and the layout's stride is the running total. The caller guarantees
/// that the stride matches the vertex data the layout is paired with.

use bytemuck::Pod;

use crate::error::{Error, Result};
use crate::graphics_device::{AttributeType, VertexAttribute};

/// Rust scalar types usable as vertex attribute components
pub trait VertexAttributeType: Pod {
    const ATTRIBUTE_TYPE: AttributeType;
    const NORMALIZED: bool;
}

impl VertexAttributeType for f32 {
    const ATTRIBUTE_TYPE: AttributeType = AttributeType::Float;
    const NORMALIZED: bool = false;
}

impl VertexAttributeType for i32 {
    const ATTRIBUTE_TYPE: AttributeType = AttributeType::Int;
    const NORMALIZED: bool = false;
}

impl VertexAttributeType for u32 {
    const ATTRIBUTE_TYPE: AttributeType = AttributeType::UnsignedInt;
    const NORMALIZED: bool = false;
}

impl VertexAttributeType for i16 {
    const ATTRIBUTE_TYPE: AttributeType = AttributeType::Short;
    const NORMALIZED: bool = false;
}

impl VertexAttributeType for u16 {
    const ATTRIBUTE_TYPE: AttributeType = AttributeType::UnsignedShort;
    const NORMALIZED: bool = false;
}

impl VertexAttributeType for i8 {
    const ATTRIBUTE_TYPE: AttributeType = AttributeType::Byte;
    const NORMALIZED: bool = false;
}

// Colors packed as bytes reach the shader as [0, 1] floats
impl VertexAttributeType for u8 {
    const ATTRIBUTE_TYPE: AttributeType = AttributeType::UnsignedByte;
    const NORMALIZED: bool = true;
}

/// Ordered vertex attribute descriptors with their total stride
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferLayout {
    attributes: Vec<VertexAttribute>,
    stride: u32,
}

impl BufferLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `count` components of `T`
    ///
    /// # Example
    ///
    /// ```
    /// use quad_gl_engine::quadgl::resource::BufferLayout;
    ///
    /// let mut layout = BufferLayout::new();
    /// layout.push::<f32>(2)?.push::<f32>(2)?;
    /// assert_eq!(layout.stride(), 16);
    /// # Ok::<(), quad_gl_engine::quadgl::Error>(())
    /// ```
    pub fn push<T: VertexAttributeType>(&mut self, count: u32) -> Result<&mut Self> {
        self.push_attribute(T::ATTRIBUTE_TYPE, count, T::NORMALIZED)
    }

    /// Append an attribute with an explicit type and normalization flag
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` when `count` is not in 1..=4.
    pub fn push_attribute(
        &mut self,
        attribute_type: AttributeType,
        count: u32,
        normalized: bool,
    ) -> Result<&mut Self> {
        if !(1..=4).contains(&count) {
            return Err(Error::InvalidResource(format!(
                "vertex attribute {} must have 1 to 4 components, got {}",
                self.attributes.len(),
                count
            )));
        }

        let attribute = VertexAttribute {
            component_count: count,
            attribute_type,
            normalized,
            offset: self.stride,
        };
        self.stride += attribute.size_bytes();
        self.attributes.push(attribute);
        Ok(self)
    }

    /// Attributes in slot order
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Bytes per vertex
    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[cfg(test)]
#[path = "buffer_layout_tests.rs"]
mod tests;
