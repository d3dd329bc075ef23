//! Tree builders for .NET manifest dialects (project.json, packages.config, *.csproj)

use serde_json::Value;

use crate::config::ExtractOptions;
use crate::error::Result;
use crate::tree::DependencyTreeNode;

/// A manifest dialect: how to decode it, build its dependency tree and
/// derive its target frameworks.
pub trait ManifestParser: Send + Sync {
    /// Decode raw manifest text into a value tree
    fn decode(&self, content: &str) -> Result<Value>;

    /// Build the root dependency node from an already-decoded manifest
    fn build_tree(&self, manifest: &Value, options: &ExtractOptions) -> DependencyTreeNode;

    /// Target framework monikers declared by the manifest
    fn target_frameworks(&self, manifest: &Value) -> Vec<String>;

    /// Decode and build in one step
    fn parse(&self, content: &str, options: &ExtractOptions) -> Result<DependencyTreeNode> {
        let manifest = self.decode(content)?;
        Ok(self.build_tree(&manifest, options))
    }
}

pub mod csproj;
pub mod packages_config;
pub mod project_json;
