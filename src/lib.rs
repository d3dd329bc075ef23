//! dotnet-deptree - dependency trees for .NET manifests
//!
//! This crate turns legacy .NET manifests (`project.json`,
//! `packages.config` and MSBuild project files) into a uniform
//! [`DependencyTreeNode`] holding direct dependencies, their versions,
//! prod/dev classification and framework scoping.
//!
//! The per-dialect builders in [`parsers`] are pure functions over decoded
//! manifests. [`build_dep_tree_from_files`] and
//! [`target_frameworks_from_files`] add file reading and dialect detection.

use std::path::{Path, PathBuf};

pub mod config;
pub mod decoder;
pub mod error;
pub mod file_types;
pub mod parsers;
pub mod props;
pub mod tree;
pub mod utils;

pub use config::ExtractOptions;
pub use error::{Error, Result};
pub use file_types::ManifestKind;
pub use parsers::ManifestParser;
pub use props::PropsLookup;
pub use tree::{DepType, DependencyTreeNode};

async fn read_manifest(root: &Path, target_file: &Path) -> Result<(ManifestKind, String)> {
    let path: PathBuf = root.join(target_file);
    let kind =
        ManifestKind::detect(&path).ok_or_else(|| Error::UnsupportedManifest(path.clone()))?;
    tracing::debug!("Reading {:?} manifest {}", kind, path.display());

    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| Error::Io { path, source })?;
    Ok((kind, content))
}

/// Read `target_file` (relative to `root`) and build its dependency tree.
pub async fn build_dep_tree_from_files(
    root: impl AsRef<Path>,
    target_file: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<DependencyTreeNode> {
    let (kind, content) = read_manifest(root.as_ref(), target_file.as_ref()).await?;
    kind.parser().parse(&content, options)
}

/// Read `target_file` (relative to `root`) and list its target frameworks.
pub async fn target_frameworks_from_files(
    root: impl AsRef<Path>,
    target_file: impl AsRef<Path>,
) -> Result<Vec<String>> {
    let (kind, content) = read_manifest(root.as_ref(), target_file.as_ref()).await?;
    let parser = kind.parser();
    let manifest = parser.decode(&content)?;
    Ok(parser.target_frameworks(&manifest))
}

/// Read a props file such as `Directory.Build.props` into an external
/// property table.
pub async fn props_from_file(path: impl AsRef<Path>) -> Result<PropsLookup> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
    props::extract_props(&content)
}
