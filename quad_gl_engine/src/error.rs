//! Error types for the QuadGL engine
//!
//! This module defines the error type shared by the device layer and every
//! resource wrapper, plus the `quadgl_err!` / `quadgl_bail!` helpers that log
//! an error before handing it back to the caller.

use std::fmt;
use crate::error_probe::GpuErrorCode;
use crate::graphics_device::ShaderStage;

/// Result type for QuadGL operations
pub type Result<T> = std::result::Result<T, Error>;

/// QuadGL errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (driver refused a handle, missing extension, ...)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (bad layout, pixel buffer size mismatch, ...)
    InvalidResource(String),

    /// Initialization failed (device, debug output)
    InitializationFailed(String),

    /// Reading a source file failed
    Io(String),

    /// A shader stage failed to compile
    ShaderCompile {
        stage: ShaderStage,
        log: String,
    },

    /// Program linking or validation failed
    ShaderLink(String),

    /// An image file could not be decoded
    ImageDecode {
        path: String,
        reason: String,
    },

    /// The driver reported an error after a probed call
    GpuError {
        code: u32,
        context: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
            Error::ShaderCompile { stage, log } => {
                write!(f, "Failed to compile {} shader: {}", stage, log)
            }
            Error::ShaderLink(log) => write!(f, "Failed to link shader program: {}", log),
            Error::ImageDecode { path, reason } => {
                write!(f, "Failed to decode image '{}': {}", path, reason)
            }
            Error::GpuError { code, context } => write!(
                f,
                "GPU error {} (0x{:04X}) in {}",
                GpuErrorCode::from_raw(*code).name(),
                code,
                context
            ),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(error.to_string())
    }
}

// ===== ERROR MACROS =====

/// Log an ERROR message and build an `Error::BackendError` from it
///
/// # Example
///
/// ```no_run
/// # use quad_gl_engine::quadgl_err;
/// let err = quadgl_err!("quadgl::Texture", "Texture {} has no pixels", 3);
/// ```
#[macro_export]
macro_rules! quadgl_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::quadgl_error!($source, "{}", message);
        $crate::quadgl::Error::BackendError(message)
    }};
}

/// Log an ERROR message and return `Err(Error::BackendError)` from the current function
///
/// # Example
///
/// ```no_run
/// # use quad_gl_engine::{quadgl_bail, quadgl::Result};
/// fn check(count: u32) -> Result<()> {
///     if count == 0 {
///         quadgl_bail!("quadgl::IndexBuffer", "Index buffer is empty");
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! quadgl_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::quadgl_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
