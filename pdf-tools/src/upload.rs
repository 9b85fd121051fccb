use serde::{Deserialize, Serialize};

use crate::{
    catalog::{ACCEPTED_EXTENSIONS, ToolKind},
    error::{ToolError, ToolResult},
};

/// Metadata of a file picked in the browser. The bytes never reach us.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub size_bytes: u64,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    /// Size in mebibytes with two decimals, as shown next to the file name.
    pub fn size_label(&self) -> String {
        #[allow(clippy::cast_precision_loss)]
        let mb = self.size_bytes as f64 / 1024.0 / 1024.0;
        format!("{mb:.2} MB")
    }

    /// File name without its last extension.
    pub fn stem(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map_or(self.name.as_str(), |(stem, _)| stem)
    }

    fn has_accepted_extension(&self) -> bool {
        let lower = self.name.to_ascii_lowercase();
        ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
    }
}

/// Checks a picked file list against the tool's picker rules.
///
/// # Errors
/// - [`ToolError::NoFiles`] for an empty list
/// - [`ToolError::TooManyFiles`] when a single-file tool gets several
/// - [`ToolError::EmptyFileName`] / [`ToolError::UnsupportedFile`] per file
pub fn validate_selection(tool: ToolKind, files: &[UploadedFile]) -> ToolResult<()> {
    if files.is_empty() {
        return Err(ToolError::NoFiles);
    }
    if files.len() > 1 && !tool.accepts_multiple() {
        return Err(ToolError::TooManyFiles {
            tool,
            count: files.len(),
        });
    }
    for f in files {
        if f.name.trim().is_empty() {
            return Err(ToolError::EmptyFileName);
        }
        if !f.has_accepted_extension() {
            return Err(ToolError::UnsupportedFile {
                name: f.name.clone(),
            });
        }
    }
    Ok(())
}
