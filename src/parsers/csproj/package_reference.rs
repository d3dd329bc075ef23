//! `<PackageReference>` items

use serde_json::Value;

use super::{Extracted, PropertyTables, declared_version, project};
use crate::props::PropsLookup;
use crate::tree::{DepType, DependencyTreeNode};
use crate::utils::{attribute, children, is_truthy};

use super::frameworks::conditional_frameworks;

/// Collect every `PackageReference` across all item groups.
///
/// Items without an `Include` attribute (e.g. `Update`-only references) are
/// skipped. Frameworks named by an item group's `Condition` are attached to
/// each node from that group.
pub fn extract(manifest: &Value, include_dev: bool, props: &PropsLookup) -> Extracted {
    let mut extracted = Extracted::default();
    let Some(project) = project(manifest) else {
        return extracted;
    };
    let tables = PropertyTables::for_project(project, props);

    for group in children(project, "ItemGroup") {
        if group.get("PackageReference").is_none() {
            continue;
        }
        let frameworks = conditional_frameworks(group);

        for item in children(group, "PackageReference") {
            let Some(name) = attribute(item, "Include") else {
                tracing::debug!("Skipping PackageReference without Include attribute");
                continue;
            };

            let is_dev = is_truthy(attribute(item, "developmentDependency"));
            extracted.has_dev_dependencies |= is_dev;
            if is_dev && !include_dev {
                tracing::debug!("Skipping development dependency {}", name);
                continue;
            }

            match tables.resolve(declared_version(item).as_deref()) {
                Some(version) => {
                    let node =
                        DependencyTreeNode::leaf(name, version, DepType::from_dev_flag(is_dev))
                            .with_target_frameworks(frameworks.clone());
                    extracted.dependencies.insert(name.to_string(), node);
                }
                None => {
                    tracing::debug!("Could not resolve a version for {}", name);
                    extracted.unknown_versions.push(name.to_string());
                }
            }
        }
    }

    extracted
}
