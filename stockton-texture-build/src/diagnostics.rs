//! Messages about what the processor did to a texture.
//! Build tools parse these out of logs, so don't change the wording.

use std::fmt;

use log::{log, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// The texture was resized so it could be compressed
    Resized { width: u32, height: u32 },

    /// Compression was asked for, but the texture couldn't be compressed
    CompressionSkipped,
}

impl Diagnostic {
    pub fn level(&self) -> Level {
        match self {
            Diagnostic::Resized { .. } => Level::Warn,
            Diagnostic::CompressionSkipped => Level::Info,
        }
    }

    /// Log this diagnostic and add it to `list`.
    pub fn emit(self, list: &mut Vec<Diagnostic>) {
        log!(self.level(), "{}", self);
        list.push(self);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Resized { width, height } => {
                write!(f, "Texture resized to: {}x{}", width, height)
            }
            Diagnostic::CompressionSkipped => write!(
                f,
                "Texture must be square, power-of-two; skipping compression"
            ),
        }
    }
}
