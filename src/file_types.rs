//! Manifest dialect detection
//!
//! Maps a manifest file name to the parser that understands it.

use std::path::Path;

use crate::parsers::ManifestParser;
use crate::parsers::csproj::CsprojParser;
use crate::parsers::packages_config::PackagesConfigParser;
use crate::parsers::project_json::ProjectJsonParser;

/// Supported manifest dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// Legacy `project.json`
    ProjectJson,
    /// `packages.config`
    PackagesConfig,
    /// MSBuild project file (*.csproj, *.vbproj, *.fsproj)
    ProjectFile,
}

impl ManifestKind {
    /// Detect the dialect from a file path, ignoring case.
    ///
    /// Returns `None` if the file name matches no known manifest.
    pub fn detect(path: &Path) -> Option<Self> {
        let filename = path.file_name()?.to_str()?.to_ascii_lowercase();
        if filename == "project.json" {
            Some(ManifestKind::ProjectJson)
        } else if filename == "packages.config" {
            Some(ManifestKind::PackagesConfig)
        } else if [".csproj", ".vbproj", ".fsproj"]
            .iter()
            .any(|ext| filename.ends_with(ext))
        {
            Some(ManifestKind::ProjectFile)
        } else {
            None
        }
    }

    /// The parser for this dialect.
    pub fn parser(self) -> Box<dyn ManifestParser> {
        match self {
            ManifestKind::ProjectJson => Box::new(ProjectJsonParser::new()),
            ManifestKind::PackagesConfig => Box::new(PackagesConfigParser::new()),
            ManifestKind::ProjectFile => Box::new(CsprojParser::new()),
        }
    }
}
