/// Device and renderer configuration

/// Which driver debug messages are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugSeverity {
    /// High severity only
    ErrorsOnly,
    /// High and medium severity
    ErrorsAndWarnings,
    /// Everything, including notifications
    All,
}

/// Where driver debug messages go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugOutput {
    /// Colored stderr output
    Console,
    /// Append to a file (no colors)
    File(String),
    /// Both console and file
    Both(String),
}

/// Counters of driver debug messages received so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugStats {
    pub errors: u32,
    pub warnings: u32,
    pub info: u32,
    pub notifications: u32,
}

impl DebugStats {
    pub fn total(&self) -> u32 {
        self.errors + self.warnings + self.info + self.notifications
    }
}

/// Configuration shared by device backends and the renderer
#[derive(Debug, Clone)]
pub struct Config {
    /// Application name (used in logs)
    pub app_name: String,
    /// Install the driver debug-message callback (KHR_debug) when available
    pub enable_debug_output: bool,
    /// Debug message filter
    pub debug_severity: DebugSeverity,
    /// Debug message destination
    pub debug_output: DebugOutput,
    /// Abort on any high-severity debug message
    pub panic_on_debug_error: bool,
    /// Wrap renderer draws in an `ErrorProbe`
    pub check_errors: bool,
    /// RGBA color used by `Renderer::clear`
    pub clear_color: [f32; 4],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "QuadGL Application".to_string(),
            enable_debug_output: cfg!(debug_assertions),
            debug_severity: DebugSeverity::ErrorsAndWarnings,
            debug_output: DebugOutput::Console,
            panic_on_debug_error: false,
            check_errors: cfg!(debug_assertions),
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}
