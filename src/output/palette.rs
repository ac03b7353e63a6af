//! Report coloring.
//!
//! [`Palette`] is a plain value handed to every rendering function. There is
//! no process-wide color state: a plain palette produces escape-free text,
//! which is what the tests and non-terminal output use.

use yansi::{Color, Paint};

/// Colors used by the report and the prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Size block headers ("5 bytes")
    pub size_header: Color,
    /// Fingerprint headers ("Hash: ...")
    pub hash_header: Color,
    /// Prompt text and the freed-space summary
    pub prompt: Color,
    /// Diagnostics and failures
    pub warning: Color,
    enabled: bool,
}

impl Default for Palette {
    fn default() -> Self {
        Self::colored()
    }
}

impl Palette {
    /// Green size headers, blue prompts, yellow warnings.
    #[must_use]
    pub fn colored() -> Self {
        Self {
            size_header: Color::Green,
            hash_header: Color::Primary,
            prompt: Color::Blue,
            warning: Color::Yellow,
            enabled: true,
        }
    }

    /// No escape codes at all.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::colored()
        }
    }

    /// Pick a palette from a color switch.
    #[must_use]
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled && color != Color::Primary {
            text.fg(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// Style a size header.
    #[must_use]
    pub fn size_header(&self, text: &str) -> String {
        self.paint(text, self.size_header)
    }

    /// Style a fingerprint header.
    #[must_use]
    pub fn hash_header(&self, text: &str) -> String {
        self.paint(text, self.hash_header)
    }

    /// Style prompt text.
    #[must_use]
    pub fn prompt(&self, text: &str) -> String {
        self.paint(text, self.prompt)
    }

    /// Style a warning line.
    #[must_use]
    pub fn warning(&self, text: &str) -> String {
        self.paint(text, self.warning)
    }
}
