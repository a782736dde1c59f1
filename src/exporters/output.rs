//! Output directory layout
//!
//! Every handler writes below its own sub-directory of the output root, so
//! two handlers can use the same file name without colliding.

use crate::handler::{HandlerError, HandlerResult};
use std::path::{Path, PathBuf};

/// Configuration key for the output root
pub const OUTPUT_DIR_KEY: &str = "output_dir";
pub const DEFAULT_OUTPUT_DIR: &str = "export";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirectory {
    root: PathBuf,
}

impl Default for OutputDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

impl OutputDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir_for(&self, handler: &str) -> PathBuf {
        self.root.join(handler)
    }

    pub fn file_for(&self, handler: &str, file: &str) -> PathBuf {
        self.dir_for(handler).join(file)
    }

    /// Write `content` to the handler's file, creating directories as needed
    pub fn write(&self, handler: &str, file: &str, content: &str) -> HandlerResult<PathBuf> {
        let dir = self.dir_for(handler);
        std::fs::create_dir_all(&dir).map_err(|e| HandlerError::io(&dir, e))?;

        let path = dir.join(file);
        std::fs::write(&path, content).map_err(|e| HandlerError::io(&path, e))?;
        log::debug!("Wrote {} byte(s) to {}", content.len(), path.display());
        Ok(path)
    }
}
