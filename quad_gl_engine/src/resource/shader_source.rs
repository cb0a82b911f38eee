//! Dual-section shader source files
//!
//! A single text file carries both stages:
//!
//! ```text
//! #shader vertex
//! #version 330 core
//! ...
//! #shader fragment
//! #version 330 core
//! ...
//! ```
//!
//! A line containing the `#shader` marker selects the stage named after the
//! marker and is not copied. Every other line is appended, with a newline, to
//! the selected stage. Lines before the first marker are dropped. A marker
//! naming neither `vertex` nor `fragment` keeps the current selection.
//! Both `\n` and `\r\n` end a line, so CRLF files yield the same sources as
//! LF files.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::graphics_device::ShaderStage;
use crate::quadgl_warn;

/// Token introducing a stage switch
pub const SHADER_MARKER: &str = "#shader";

/// Source text of both stages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    /// Split a dual-section source text
    ///
    /// # Example
    ///
    /// ```
    /// use quad_gl_engine::quadgl::resource::ShaderSources;
    ///
    /// let sources = ShaderSources::parse("#shader vertex\nA\n#shader fragment\nB\n");
    /// assert_eq!(sources.vertex, "A\n");
    /// assert_eq!(sources.fragment, "B\n");
    /// ```
    pub fn parse(source: &str) -> Self {
        let mut sources = Self::default();
        let mut current: Option<ShaderStage> = None;

        for (number, line) in source.lines().enumerate() {
            if let Some(position) = line.find(SHADER_MARKER) {
                let selector = &line[position + SHADER_MARKER.len()..];
                if selector.contains("vertex") {
                    current = Some(ShaderStage::Vertex);
                } else if selector.contains("fragment") {
                    current = Some(ShaderStage::Fragment);
                } else {
                    quadgl_warn!(
                        "quadgl::ShaderSources",
                        "Line {}: unknown shader stage in '{}', keeping current section",
                        number + 1,
                        line.trim()
                    );
                }
                continue;
            }

            if let Some(stage) = current {
                let text = sources.stage_mut(stage);
                text.push_str(line);
                text.push('\n');
            }
        }

        sources
    }

    /// Read and split a dual-section source file
    ///
    /// # Errors
    ///
    /// `Error::Io` if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Ok(Self::parse(&text))
    }

    /// Source text of `stage`
    pub fn stage(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }

    fn stage_mut(&mut self, stage: ShaderStage) -> &mut String {
        match stage {
            ShaderStage::Vertex => &mut self.vertex,
            ShaderStage::Fragment => &mut self.fragment,
        }
    }
}

#[cfg(test)]
#[path = "shader_source_tests.rs"]
mod tests;
