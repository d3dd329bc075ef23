//! Error types for manifest extraction

use std::path::PathBuf;

/// Errors surfaced by the decoders and the file-level entry points.
///
/// Missing manifest sections, unresolvable version variables and
/// unsupported declaration shapes are not errors; extractors degrade to
/// empty collections or the unknown-versions list instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The manifest text is not well-formed XML or JSON.
    #[error("invalid {format} input: {details}")]
    InvalidUserInput {
        format: &'static str,
        details: String,
    },

    /// The file name matches none of the supported manifest dialects.
    #[error("unsupported manifest file: {}", .0.display())]
    UnsupportedManifest(PathBuf),

    /// Reading a manifest or props file failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn invalid_xml(details: impl ToString) -> Self {
        Self::InvalidUserInput {
            format: "XML",
            details: details.to_string(),
        }
    }

    pub(crate) fn invalid_json(details: impl ToString) -> Self {
        Self::InvalidUserInput {
            format: "JSON",
            details: details.to_string(),
        }
    }

    /// Whether this error was caused by malformed manifest text.
    pub fn is_invalid_user_input(&self) -> bool {
        matches!(self, Self::InvalidUserInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
