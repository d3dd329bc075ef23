//! `<Reference Include="Name, Version=..., Culture=...">` items

use serde_json::Value;

use super::{Extracted, PropertyTables, declared_version, project};
use crate::props::PropsLookup;
use crate::tree::{DepType, DependencyTreeNode};
use crate::utils::{attribute, children};

/// Parsed form of a `Reference` item's `Include` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceInclude {
    pub name: String,
    pub version: Option<String>,
    pub culture: Option<String>,
    pub processor_architecture: Option<String>,
    pub public_key_token: Option<String>,
}

impl ReferenceInclude {
    /// Parse `"Name, Key=Value, ..."`. Unknown keys are ignored.
    pub fn parse(include: &str) -> Self {
        let mut segments = include.split(',');
        let mut parsed = Self {
            name: segments.next().unwrap_or_default().trim().to_string(),
            ..Self::default()
        };

        for segment in segments {
            let Some((key, value)) = segment.split_once('=') else {
                continue;
            };
            let value = Some(value.trim().to_string());
            match key.trim().to_ascii_lowercase().as_str() {
                "version" => parsed.version = value,
                "culture" => parsed.culture = value,
                "processorarchitecture" => parsed.processor_architecture = value,
                "publickeytoken" => parsed.public_key_token = value,
                _ => {}
            }
        }

        parsed
    }
}

/// Collect the `Reference` items of the first item group that has any.
///
/// A `developmentDependency` marker on these items is not honored: every
/// node is production and none is filtered out.
pub fn extract(manifest: &Value, props: &PropsLookup) -> Extracted {
    let mut extracted = Extracted::default();
    let Some(project) = project(manifest) else {
        return extracted;
    };
    let Some(group) = children(project, "ItemGroup").find(|group| group.get("Reference").is_some())
    else {
        return extracted;
    };
    let tables = PropertyTables::for_project(project, props);

    for item in children(group, "Reference") {
        let Some(include) = attribute(item, "Include").map(ReferenceInclude::parse) else {
            tracing::debug!("Skipping Reference without Include attribute");
            continue;
        };
        if include.name.is_empty() {
            continue;
        }

        let declared = include
            .version
            .clone()
            .or_else(|| declared_version(item));

        match tables.resolve(declared.as_deref()) {
            Some(version) => {
                let node = DependencyTreeNode::leaf(include.name.as_str(), version, DepType::Prod);
                extracted.dependencies.insert(include.name, node);
            }
            None => {
                tracing::debug!("Could not resolve a version for {}", include.name);
                extracted.unknown_versions.push(include.name);
            }
        }
    }

    extracted
}
