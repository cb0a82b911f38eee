//! ErrorProbe - attributes driver errors to a single call
//!
//! Usage pattern: `clear()` right before the operation, `check_and_log()` right
//! after, so only errors raised by that operation are reported. `probe()` wraps
//! both around a closure and turns a reported error into `Error::GpuError`.

use crate::error::{Error, Result};
use crate::graphics_device::GraphicsDevice;
use crate::quadgl_error;

/// Upper bound on errors drained by `clear()`; a lost context may report an error forever
const MAX_DRAINED_ERRORS: usize = 64;

/// Standard GL error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpuErrorCode {
    InvalidEnum,
    InvalidValue,
    InvalidOperation,
    StackOverflow,
    StackUnderflow,
    OutOfMemory,
    InvalidFramebufferOperation,
    ContextLost,
    Unknown(u32),
}

impl GpuErrorCode {
    pub fn from_raw(code: u32) -> Self {
        match code {
            0x0500 => GpuErrorCode::InvalidEnum,
            0x0501 => GpuErrorCode::InvalidValue,
            0x0502 => GpuErrorCode::InvalidOperation,
            0x0503 => GpuErrorCode::StackOverflow,
            0x0504 => GpuErrorCode::StackUnderflow,
            0x0505 => GpuErrorCode::OutOfMemory,
            0x0506 => GpuErrorCode::InvalidFramebufferOperation,
            0x0507 => GpuErrorCode::ContextLost,
            other => GpuErrorCode::Unknown(other),
        }
    }

    pub fn raw(&self) -> u32 {
        match self {
            GpuErrorCode::InvalidEnum => 0x0500,
            GpuErrorCode::InvalidValue => 0x0501,
            GpuErrorCode::InvalidOperation => 0x0502,
            GpuErrorCode::StackOverflow => 0x0503,
            GpuErrorCode::StackUnderflow => 0x0504,
            GpuErrorCode::OutOfMemory => 0x0505,
            GpuErrorCode::InvalidFramebufferOperation => 0x0506,
            GpuErrorCode::ContextLost => 0x0507,
            GpuErrorCode::Unknown(code) => *code,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GpuErrorCode::InvalidEnum => "GL_INVALID_ENUM",
            GpuErrorCode::InvalidValue => "GL_INVALID_VALUE",
            GpuErrorCode::InvalidOperation => "GL_INVALID_OPERATION",
            GpuErrorCode::StackOverflow => "GL_STACK_OVERFLOW",
            GpuErrorCode::StackUnderflow => "GL_STACK_UNDERFLOW",
            GpuErrorCode::OutOfMemory => "GL_OUT_OF_MEMORY",
            GpuErrorCode::InvalidFramebufferOperation => "GL_INVALID_FRAMEBUFFER_OPERATION",
            GpuErrorCode::ContextLost => "GL_CONTEXT_LOST",
            GpuErrorCode::Unknown(_) => "UNKNOWN",
        }
    }
}

/// Drains and reports the device error queue
pub struct ErrorProbe<'a> {
    device: &'a dyn GraphicsDevice,
}

impl<'a> ErrorProbe<'a> {
    pub fn new(device: &'a dyn GraphicsDevice) -> Self {
        Self { device }
    }

    /// Discard every pending error
    pub fn clear(&self) {
        for _ in 0..MAX_DRAINED_ERRORS {
            if self.device.get_error().is_none() {
                return;
            }
        }
    }

    /// Pop one pending error; log it and return `false` if there was one
    pub fn check_and_log(&self, context: &str) -> bool {
        match self.device.get_error() {
            Some(code) => {
                Self::report(code, context);
                false
            }
            None => true,
        }
    }

    /// Run `op` between `clear()` and an error check
    ///
    /// # Errors
    ///
    /// `Error::OutOfMemory` if `op` raised GL_OUT_OF_MEMORY, otherwise
    /// `Error::GpuError` carrying the first error raised by `op`.
    pub fn probe<T>(&self, context: &str, op: impl FnOnce() -> T) -> Result<T> {
        self.clear();
        let value = op();
        match self.device.get_error() {
            Some(code) => {
                Self::report(code, context);
                Err(match GpuErrorCode::from_raw(code) {
                    GpuErrorCode::OutOfMemory => Error::OutOfMemory,
                    _ => Error::GpuError {
                        code,
                        context: context.to_string(),
                    },
                })
            }
            None => Ok(value),
        }
    }

    fn report(code: u32, context: &str) {
        quadgl_error!(
            "quadgl::ErrorProbe",
            "[OpenGL Error] {} (0x{:04X}) in {}",
            GpuErrorCode::from_raw(code).name(),
            code,
            context
        );
    }
}

#[cfg(test)]
#[path = "error_probe_tests.rs"]
mod tests;
