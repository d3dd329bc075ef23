//! Builder for `packages.config` manifests

use serde_json::Value;

use super::ManifestParser;
use crate::config::ExtractOptions;
use crate::decoder::decode_xml;
use crate::error::Result;
use crate::tree::{DepType, DependencyTreeNode};
use crate::utils::{attribute, children, is_truthy};

/// Parser for `packages.config` files
#[derive(Debug, Default)]
pub struct PackagesConfigParser;

impl PackagesConfigParser {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestParser for PackagesConfigParser {
    fn decode(&self, content: &str) -> Result<Value> {
        decode_xml(content)
    }

    fn build_tree(&self, manifest: &Value, options: &ExtractOptions) -> DependencyTreeNode {
        build_tree(manifest, options.include_dev)
    }

    fn target_frameworks(&self, manifest: &Value) -> Vec<String> {
        target_frameworks(manifest)
    }
}

fn packages(manifest: &Value) -> impl Iterator<Item = &Value> {
    manifest
        .get("packages")
        .into_iter()
        .flat_map(|packages| children(packages, "package"))
}

/// Build the dependency tree of a decoded `packages.config`.
pub fn build_tree(manifest: &Value, include_dev: bool) -> DependencyTreeNode {
    let mut root = DependencyTreeNode::root("");
    let mut has_dev = false;

    for package in packages(manifest) {
        let Some(id) = attribute(package, "id") else {
            tracing::debug!("Skipping <package> without id");
            continue;
        };

        let is_dev = is_truthy(attribute(package, "developmentDependency"));
        has_dev |= is_dev;
        if is_dev && !include_dev {
            tracing::debug!("Skipping development dependency {}", id);
            continue;
        }

        let version = attribute(package, "version").unwrap_or_default();
        let frameworks = attribute(package, "targetFramework")
            .map(|framework| vec![framework.to_string()])
            .unwrap_or_default();

        root.dependencies.insert(
            id.to_string(),
            DependencyTreeNode::leaf(id, version, DepType::from_dev_flag(is_dev))
                .with_target_frameworks(frameworks),
        );
    }

    root.has_dev_dependencies = Some(has_dev);
    root
}

/// Distinct `targetFramework` attributes in first-seen order.
pub fn target_frameworks(manifest: &Value) -> Vec<String> {
    let mut frameworks: Vec<String> = Vec::new();
    for framework in packages(manifest).filter_map(|p| attribute(p, "targetFramework")) {
        if !frameworks.iter().any(|f| f == framework) {
            frameworks.push(framework.to_string());
        }
    }
    frameworks
}
