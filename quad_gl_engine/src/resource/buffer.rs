/// Immutable GPU buffers (vertex data and element indices)
///
/// A buffer is allocated and filled once at construction (static usage) and
/// released when its owner is dropped. There is no update, read-back or resize.

use std::rc::Rc;
use bytemuck::Pod;

use crate::error::{Error, Result};
use crate::graphics_device::{BufferHandle, BufferTarget, GraphicsDevice};
use crate::quadgl_trace;

// ===== GPU BUFFER =====

/// One GPU buffer bound to a fixed target kind
pub struct GpuBuffer {
    device: Rc<dyn GraphicsDevice>,
    handle: BufferHandle,
    target: BufferTarget,
    size: u64,
}

impl GpuBuffer {
    /// Allocate a buffer for `target` and upload `data`
    ///
    /// The buffer is left bound to `target`.
    pub fn new(device: Rc<dyn GraphicsDevice>, target: BufferTarget, data: &[u8]) -> Result<Self> {
        let handle = device.create_buffer()?;

        // Owned from here on: any later failure still releases the handle
        let buffer = Self {
            device,
            handle,
            target,
            size: data.len() as u64,
        };

        buffer.bind();
        buffer.device.buffer_data(target, data);

        quadgl_trace!(
            "quadgl::GpuBuffer",
            "Created {:?} buffer #{} ({} bytes)",
            target,
            handle.0,
            buffer.size
        );

        Ok(buffer)
    }

    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    pub fn target(&self) -> BufferTarget {
        self.target
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Make this buffer current for its target
    pub fn bind(&self) {
        self.device.bind_buffer(self.target, Some(self.handle));
    }

    /// Clear the binding of this buffer's target
    pub fn unbind(&self) {
        self.device.bind_buffer(self.target, None);
    }
}

impl Drop for GpuBuffer {
    fn drop(&mut self) {
        self.device.delete_buffer(self.handle);
        quadgl_trace!("quadgl::GpuBuffer", "Released buffer #{}", self.handle.0);
    }
}

// ===== VERTEX BUFFER =====

/// Per-vertex attribute data
pub struct VertexBuffer {
    buffer: GpuBuffer,
}

impl VertexBuffer {
    /// Upload a slice of plain-old-data vertices
    ///
    /// # Example
    ///
    /// ```ignore
    /// let positions: [f32; 8] = [-0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, 0.5];
    /// let vb = VertexBuffer::new(device.clone(), &positions)?;
    /// ```
    pub fn new<T: Pod>(device: Rc<dyn GraphicsDevice>, vertices: &[T]) -> Result<Self> {
        Ok(Self {
            buffer: GpuBuffer::new(device, BufferTarget::Vertex, bytemuck::cast_slice(vertices))?,
        })
    }

    pub fn handle(&self) -> BufferHandle {
        self.buffer.handle()
    }

    pub fn size(&self) -> u64 {
        self.buffer.size()
    }

    pub fn bind(&self) {
        self.buffer.bind();
    }

    pub fn unbind(&self) {
        self.buffer.unbind();
    }
}

// ===== INDEX BUFFER =====

fn index_count(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        Error::InvalidResource(format!("index buffer holds {} indices, at most {} allowed", len, u32::MAX))
    })
}

/// Element indices (`u32`)
pub struct IndexBuffer {
    buffer: GpuBuffer,
    count: u32,
}

impl IndexBuffer {
    /// Upload `indices` as a static element buffer
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if there are more than `u32::MAX` indices; no
    /// GPU object is created in that case.
    pub fn new(device: Rc<dyn GraphicsDevice>, indices: &[u32]) -> Result<Self> {
        let count = index_count(indices.len())?;
        Ok(Self {
            buffer: GpuBuffer::new(device, BufferTarget::Index, bytemuck::cast_slice(indices))?,
            count,
        })
    }

    pub fn handle(&self) -> BufferHandle {
        self.buffer.handle()
    }

    /// Number of indices
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn size(&self) -> u64 {
        self.buffer.size()
    }

    pub fn bind(&self) {
        self.buffer.bind();
    }

    pub fn unbind(&self) {
        self.buffer.unbind();
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
