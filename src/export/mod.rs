//! Textual export of a node's nested structure.
//!
//! Two renderings are provided: a DOT-like description for visualization, and
//! a JSON snapshot for tooling. Both are export-only. The `save_*` variants
//! persist the rendered text, overwriting the destination.

mod dot;
mod json;

pub use json::*;

use std::path::Path;

use tracing::debug;

use crate::error::{FractalError, Result};

/// Writes `text` to `path`, surfacing any IO failure with the path attached.
pub(crate) fn write_text(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|source| FractalError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "wrote export");
    Ok(())
}
