/// Graphics device module - raw handle-based driver primitives

// Module declarations
pub mod graphics_device;
pub mod config;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;
pub use config::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
