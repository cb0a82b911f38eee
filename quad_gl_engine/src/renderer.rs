/// Renderer - frame clear and indexed draw over the resource wrappers

use std::cell::Cell;
use std::rc::Rc;

use crate::error::Result;
use crate::error_probe::ErrorProbe;
use crate::graphics_device::{ClearFlags, Config, GraphicsDevice, PrimitiveTopology};
use crate::resource::{IndexBuffer, Shader, VertexArray};
use crate::quadgl_info;

/// Renderer statistics
///
/// Totals saturate at `u32::MAX` until `Renderer::reset_stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RendererStats {
    /// Number of draw calls since the last reset
    pub draw_calls: u32,
    /// Number of triangles drawn since the last reset
    pub triangles: u32,
}

/// Frame clear and indexed triangle draws over a shared device
pub struct Renderer {
    device: Rc<dyn GraphicsDevice>,
    config: Config,
    stats: Cell<RendererStats>,
}

impl Renderer {
    pub fn new(device: Rc<dyn GraphicsDevice>, config: Config) -> Self {
        quadgl_info!(
            "quadgl::Renderer",
            "Renderer ready for '{}' (error checks {})",
            config.app_name,
            if config.check_errors { "on" } else { "off" }
        );
        Self {
            device,
            config,
            stats: Cell::new(RendererStats::default()),
        }
    }

    /// Clear the color buffer with the configured clear color
    pub fn clear(&self) {
        self.device.clear_color(self.config.clear_color);
        self.device.clear(ClearFlags::COLOR);
    }

    /// Draw every index of `index_buffer` as triangles
    ///
    /// # Errors
    ///
    /// `Error::GpuError` when error checks are enabled and the driver reported
    /// an error during the draw.
    pub fn draw(&self, vertex_array: &VertexArray, index_buffer: &IndexBuffer, shader: &Shader) -> Result<()> {
        let count = index_buffer.count();
        let submit = || {
            shader.bind();
            vertex_array.bind();
            index_buffer.bind();
            self.device.draw_elements(PrimitiveTopology::Triangles, count, 0);
        };

        if self.config.check_errors {
            ErrorProbe::new(self.device.as_ref()).probe("Renderer::draw", submit)?;
        } else {
            submit();
        }

        let mut stats = self.stats.get();
        stats.draw_calls = stats.draw_calls.saturating_add(1);
        stats.triangles = stats.triangles.saturating_add(count / 3);
        self.stats.set(stats);
        Ok(())
    }

    pub fn stats(&self) -> RendererStats {
        self.stats.get()
    }

    pub fn reset_stats(&self) {
        self.stats.set(RendererStats::default());
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
