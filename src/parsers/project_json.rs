//! Builder for legacy `project.json` manifests

use serde_json::Value;

use super::ManifestParser;
use crate::config::ExtractOptions;
use crate::decoder::decode_json;
use crate::error::Result;
use crate::tree::{DepType, DependencyTreeNode};
use crate::utils::text_value;

/// Dependency `type` that marks a build-time (development) dependency
const BUILD_TYPE: &str = "build";

/// Parser for `project.json` files
#[derive(Debug, Default)]
pub struct ProjectJsonParser;

impl ProjectJsonParser {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestParser for ProjectJsonParser {
    fn decode(&self, content: &str) -> Result<Value> {
        decode_json(content)
    }

    fn build_tree(&self, manifest: &Value, options: &ExtractOptions) -> DependencyTreeNode {
        build_tree(manifest, options.include_dev)
    }

    fn target_frameworks(&self, manifest: &Value) -> Vec<String> {
        target_frameworks(manifest)
    }
}

/// Build the dependency tree of a decoded `project.json`.
///
/// Each entry of `dependencies` is either a version string or an object
/// with `version` and an optional `type`.
pub fn build_tree(manifest: &Value, include_dev: bool) -> DependencyTreeNode {
    let mut root = DependencyTreeNode::root("");
    let Some(declared) = manifest.get("dependencies").and_then(Value::as_object) else {
        return root;
    };

    let mut has_dev = false;
    for (name, spec) in declared {
        let (version, is_dev) = match spec {
            Value::Object(fields) => (
                fields.get("version").and_then(text_value).unwrap_or_default(),
                fields.get("type").and_then(Value::as_str) == Some(BUILD_TYPE),
            ),
            other => (text_value(other).unwrap_or_default(), false),
        };

        has_dev |= is_dev;
        if is_dev && !include_dev {
            tracing::debug!("Skipping build dependency {}", name);
            continue;
        }

        root.dependencies.insert(
            name.clone(),
            DependencyTreeNode::leaf(name.as_str(), version, DepType::from_dev_flag(is_dev)),
        );
    }

    root.has_dev_dependencies = Some(has_dev);
    root
}

/// Framework monikers are the keys of the `frameworks` map.
pub fn target_frameworks(manifest: &Value) -> Vec<String> {
    manifest
        .get("frameworks")
        .and_then(Value::as_object)
        .map(|frameworks| frameworks.keys().cloned().collect())
        .unwrap_or_default()
}
