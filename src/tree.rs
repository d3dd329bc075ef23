//! Normalized dependency tree shared by every manifest dialect

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Direct children of a node, keyed by dependency name in declaration order.
///
/// Re-inserting an existing name replaces the node but keeps the position
/// where the name was first seen.
pub type Dependencies = IndexMap<String, DependencyTreeNode>;

/// Production vs development classification of a declared package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepType {
    Prod,
    Dev,
}

impl DepType {
    pub fn from_dev_flag(is_dev: bool) -> Self {
        if is_dev { DepType::Dev } else { DepType::Prod }
    }
}

/// One package as declared in a manifest, or the synthetic root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyTreeNode {
    /// Package name (may be empty on the root)
    pub name: String,
    /// Literal version string as declared (empty on the root)
    pub version: String,
    /// Direct dependencies only
    #[serde(default)]
    pub dependencies: Dependencies,
    /// Absent on the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dep_type: Option<DepType>,
    /// Root only: whether any declaration was a development dependency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_dev_dependencies: Option<bool>,
    /// Frameworks the manifest scoped this dependency to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_frameworks: Option<Vec<String>>,
    /// Root only: names whose version variable could not be resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies_with_unknown_versions: Option<Vec<String>>,
    /// Set by callers that detect cycles while stitching trees together; never set here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cyclic: Option<bool>,
}

impl DependencyTreeNode {
    /// Create an empty root node.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_dev_dependencies: Some(false),
            ..Self::default()
        }
    }

    /// Create a childless dependency node.
    pub fn leaf(name: impl Into<String>, version: impl Into<String>, dep_type: DepType) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            dep_type: Some(dep_type),
            ..Self::default()
        }
    }

    /// Attach framework scoping; an empty list leaves the field absent.
    pub fn with_target_frameworks(mut self, frameworks: Vec<String>) -> Self {
        if !frameworks.is_empty() {
            self.target_frameworks = Some(frameworks);
        }
        self
    }

    pub fn has_dev_dependencies(&self) -> bool {
        self.has_dev_dependencies.unwrap_or(false)
    }

    pub fn is_dev(&self) -> bool {
        self.dep_type == Some(DepType::Dev)
    }

    /// Names that could not be given a version, or an empty slice.
    pub fn unknown_versions(&self) -> &[String] {
        self.dependencies_with_unknown_versions
            .as_deref()
            .unwrap_or_default()
    }
}
