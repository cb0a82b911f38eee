/// GL Debug Output - Handles KHR_debug messages with colored output
///
/// This module provides the debug-message callback installed by
/// `GlowGraphicsDevice` when debug output is enabled, with support for colored
/// console output, file logging, message grouping and statistics.

use colored::*;
use quad_gl_engine::quadgl::device::{Config, DebugOutput, DebugSeverity, DebugStats};
use rustc_hash::FxHashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Global debug configuration (shared with the callback)
static DEBUG_CONFIG: Mutex<Option<DebugConfig>> = Mutex::new(None);

/// Global debug statistics (atomic counters)
static DEBUG_STATS: DebugStatsTracker = DebugStatsTracker::new();

/// Global message tracker for grouping identical messages
static MESSAGE_TRACKER: Mutex<Option<MessageTracker>> = Mutex::new(None);

/// Debug configuration for the callback
#[derive(Debug, Clone)]
pub struct DebugConfig {
    pub severity: DebugSeverity,
    pub output: DebugOutput,
    pub panic_on_error: bool,
    pub enable_stats: bool,
}

impl From<&Config> for DebugConfig {
    fn from(config: &Config) -> Self {
        Self {
            severity: config.debug_severity,
            output: config.debug_output.clone(),
            panic_on_error: config.panic_on_debug_error,
            enable_stats: true,
        }
    }
}

/// Severity class of a GL debug message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageLevel {
    Error,
    Warning,
    Info,
    Notification,
}

impl MessageLevel {
    pub(crate) fn from_gl(severity: u32) -> Self {
        match severity {
            glow::DEBUG_SEVERITY_HIGH => MessageLevel::Error,
            glow::DEBUG_SEVERITY_MEDIUM => MessageLevel::Warning,
            glow::DEBUG_SEVERITY_LOW => MessageLevel::Info,
            _ => MessageLevel::Notification,
        }
    }

    pub(crate) fn is_displayed(&self, filter: DebugSeverity) -> bool {
        match filter {
            DebugSeverity::ErrorsOnly => *self == MessageLevel::Error,
            DebugSeverity::ErrorsAndWarnings => {
                matches!(self, MessageLevel::Error | MessageLevel::Warning)
            }
            DebugSeverity::All => true,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            MessageLevel::Error => "ERROR",
            MessageLevel::Warning => "WARNING",
            MessageLevel::Info => "INFO",
            MessageLevel::Notification => "NOTIFICATION",
        }
    }

    fn colored_label(&self) -> ColoredString {
        match self {
            MessageLevel::Error => self.label().red().bold(),
            MessageLevel::Warning => self.label().yellow().bold(),
            MessageLevel::Info => self.label().cyan(),
            MessageLevel::Notification => self.label().bright_black(),
        }
    }
}

pub(crate) fn source_name(source: u32) -> &'static str {
    match source {
        glow::DEBUG_SOURCE_API => "API",
        glow::DEBUG_SOURCE_WINDOW_SYSTEM => "Window System",
        glow::DEBUG_SOURCE_SHADER_COMPILER => "Shader Compiler",
        glow::DEBUG_SOURCE_THIRD_PARTY => "Third Party",
        glow::DEBUG_SOURCE_APPLICATION => "Application",
        _ => "Other",
    }
}

pub(crate) fn type_name(message_type: u32) -> &'static str {
    match message_type {
        glow::DEBUG_TYPE_ERROR => "Error",
        glow::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated",
        glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined Behavior",
        glow::DEBUG_TYPE_PORTABILITY => "Portability",
        glow::DEBUG_TYPE_PERFORMANCE => "Performance",
        glow::DEBUG_TYPE_MARKER => "Marker",
        _ => "Other",
    }
}

/// Thread-safe debug statistics tracker
struct DebugStatsTracker {
    errors: AtomicU32,
    warnings: AtomicU32,
    info: AtomicU32,
    notifications: AtomicU32,
}

impl DebugStatsTracker {
    const fn new() -> Self {
        Self {
            errors: AtomicU32::new(0),
            warnings: AtomicU32::new(0),
            info: AtomicU32::new(0),
            notifications: AtomicU32::new(0),
        }
    }

    fn increment(&self, level: MessageLevel) {
        let counter = match level {
            MessageLevel::Error => &self.errors,
            MessageLevel::Warning => &self.warnings,
            MessageLevel::Info => &self.info,
            MessageLevel::Notification => &self.notifications,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn get_stats(&self) -> DebugStats {
        DebugStats {
            errors: self.errors.load(Ordering::Relaxed),
            warnings: self.warnings.load(Ordering::Relaxed),
            info: self.info.load(Ordering::Relaxed),
            notifications: self.notifications.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.errors.store(0, Ordering::Relaxed);
        self.warnings.store(0, Ordering::Relaxed);
        self.info.store(0, Ordering::Relaxed);
        self.notifications.store(0, Ordering::Relaxed);
    }
}

/// Message tracker for grouping identical messages
#[derive(Default)]
struct MessageTracker {
    messages: FxHashMap<String, u32>,
}

impl MessageTracker {
    fn track_message(&mut self, message: &str) -> u32 {
        let count = self.messages.entry(message.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    fn duplicate_count(&self) -> usize {
        self.messages.values().filter(|&&count| count > 1).count()
    }
}

/// Initialize debug configuration
///
/// Resets statistics and message grouping.
pub fn init_debug_config(config: DebugConfig) {
    DEBUG_STATS.reset();

    if let Ok(mut tracker) = MESSAGE_TRACKER.lock() {
        *tracker = Some(MessageTracker::default());
    }
    if let Ok(mut current) = DEBUG_CONFIG.lock() {
        *current = Some(config);
    }
}

/// Drop the configuration; the callback ignores messages afterwards
pub fn reset_debug_config() {
    DEBUG_STATS.reset();
    if let Ok(mut tracker) = MESSAGE_TRACKER.lock() {
        *tracker = None;
    }
    if let Ok(mut current) = DEBUG_CONFIG.lock() {
        *current = None;
    }
}

/// Get current debug message statistics
pub fn get_debug_stats() -> DebugStats {
    DEBUG_STATS.get_stats()
}

/// Number of distinct messages received more than once
pub fn get_duplicate_message_count() -> usize {
    MESSAGE_TRACKER
        .lock()
        .ok()
        .and_then(|tracker| tracker.as_ref().map(MessageTracker::duplicate_count))
        .unwrap_or(0)
}

/// Print debug statistics report
pub fn print_debug_stats_report() {
    let stats = get_debug_stats();

    if stats.total() == 0 {
        println!("\n{}", "✓ No GL debug messages".green().bold());
        return;
    }

    println!("\n{}", "=== GL Debug Statistics Report ===".bright_blue().bold());

    if stats.errors > 0 {
        println!("  {} {}", "Errors:".red().bold(), stats.errors);
    }
    if stats.warnings > 0 {
        println!("  {} {}", "Warnings:".yellow().bold(), stats.warnings);
    }
    if stats.info > 0 {
        println!("  {} {}", "Info:".cyan(), stats.info);
    }
    if stats.notifications > 0 {
        println!("  {} {}", "Notifications:".bright_black(), stats.notifications);
    }

    println!("  {} {}", "Total:".white().bold(), stats.total());

    let duplicate_count = get_duplicate_message_count();
    if duplicate_count > 0 {
        println!("\n  {} {} message(s) appeared multiple times", "ℹ".cyan(), duplicate_count);
    }

    println!("{}\n", "==================================".bright_blue().bold());
}

/// GL debug message callback
///
/// Installed through `glow::HasContext::debug_message_callback`; runs on the
/// thread issuing the offending call when synchronous output is enabled.
pub fn gl_debug_callback(source: u32, message_type: u32, id: u32, severity: u32, message: &str) {
    let config = match DEBUG_CONFIG.lock() {
        Ok(guard) => match guard.as_ref() {
            Some(config) => config.clone(),
            None => return,
        },
        Err(_) => return,
    };

    let level = MessageLevel::from_gl(severity);
    if !level.is_displayed(config.severity) {
        return;
    }

    if config.enable_stats {
        DEBUG_STATS.increment(level);
    }

    let occurrence_count = if config.enable_stats {
        MESSAGE_TRACKER
            .lock()
            .map(|mut tracker| tracker.get_or_insert_with(MessageTracker::default).track_message(message))
            .unwrap_or(1)
    } else {
        1
    };

    let repeat_indicator = if occurrence_count > 1 {
        format!(" [×{}]", occurrence_count)
    } else {
        String::new()
    };

    let source_str = source_name(source);
    let type_str = type_name(message_type);

    let console_output = format!(
        "{} {} [{} / {}]{}\n  ├─ {}: {}\n  └─ {}\n",
        "[OPENGL".bright_blue().bold(),
        format!("{}]", level.colored_label()).bright_blue().bold(),
        source_str.bright_black(),
        type_str.bright_black(),
        repeat_indicator.yellow(),
        "Message ID".bright_black(),
        id.to_string().white(),
        message.white()
    );

    let file_output = format!(
        "[OPENGL {}] [{} / {}]{}\n  ├─ Message ID: {}\n  └─ {}\n",
        level.label(),
        source_str,
        type_str,
        repeat_indicator,
        id,
        message
    );

    match &config.output {
        DebugOutput::Console => {
            eprint!("{}", console_output);
        }
        DebugOutput::File(path) => {
            write_to_file(path, &file_output);
        }
        DebugOutput::Both(path) => {
            eprint!("{}", console_output);
            write_to_file(path, &file_output);
        }
    }

    if config.panic_on_error && level == MessageLevel::Error {
        panic!(
            "\n⚠️  PANIC ON GL ERROR (Strict Mode)\n\
            Message ID: {}\n\
            Source: {}\n\
            Type: {}\n\
            Message: {}\n",
            id, source_str, type_str, message
        );
    }
}

/// Write message to log file
fn write_to_file(path: &str, message: &str) {
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{}", message);
    }
}

#[cfg(test)]
#[path = "debug_tests.rs"]
mod tests;
