/// VertexArray - attribute slot configuration for one or more vertex buffers

use std::rc::Rc;

use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, VertexArrayHandle};
use crate::resource::{BufferLayout, VertexBuffer};
use crate::quadgl_trace;

/// Owns one vertex array object
///
/// Slots are handed out in increasing order across every `add_buffer` call,
/// so several buffers can feed different attributes of the same vertex.
pub struct VertexArray {
    device: Rc<dyn GraphicsDevice>,
    handle: VertexArrayHandle,
    next_slot: u32,
}

impl VertexArray {
    pub fn new(device: Rc<dyn GraphicsDevice>) -> Result<Self> {
        let handle = device.create_vertex_array()?;
        quadgl_trace!("quadgl::VertexArray", "Created vertex array #{}", handle.0);
        Ok(Self {
            device,
            handle,
            next_slot: 0,
        })
    }

    /// Route the attributes described by `layout` to `buffer`
    ///
    /// Leaves this vertex array and `buffer` bound.
    pub fn add_buffer(&mut self, buffer: &VertexBuffer, layout: &BufferLayout) {
        self.bind();
        buffer.bind();

        for attribute in layout.attributes() {
            self.device.enable_vertex_attribute(self.next_slot);
            self.device.vertex_attribute_pointer(self.next_slot, attribute, layout.stride());
            self.next_slot += 1;
        }

        quadgl_trace!(
            "quadgl::VertexArray",
            "Vertex array #{}: {} attribute(s) from buffer #{} (stride {})",
            self.handle.0,
            layout.len(),
            buffer.handle().0,
            layout.stride()
        );
    }

    /// Number of configured attribute slots
    pub fn attribute_count(&self) -> u32 {
        self.next_slot
    }

    pub fn handle(&self) -> VertexArrayHandle {
        self.handle
    }

    pub fn bind(&self) {
        self.device.bind_vertex_array(Some(self.handle));
    }

    pub fn unbind(&self) {
        self.device.bind_vertex_array(None);
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        self.device.delete_vertex_array(self.handle);
    }
}

#[cfg(test)]
#[path = "vertex_array_tests.rs"]
mod tests;
