//! Target framework monikers of a project file

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::project;
use crate::utils::{attribute, children, first_text, text_value};

/// `...TargetFramework)' == '<moniker>'` inside an item group condition
static CONDITION_FRAMEWORK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"TargetFramework\)'\s*==\s*'([^']+)'").expect("condition pattern is valid")
});

const FRAMEWORK_KEYS: [&str; 3] = ["TargetFramework", "TargetFrameworks", "TargetFrameworkVersion"];

/// Frameworks named in an item group's `Condition`, in match order.
///
/// Duplicates are kept.
pub fn conditional_frameworks(group: &Value) -> Vec<String> {
    let Some(condition) = attribute(group, "Condition") else {
        return Vec::new();
    };
    CONDITION_FRAMEWORK
        .captures_iter(condition)
        .map(|captures| captures[1].trim().to_string())
        .collect()
}

/// Frameworks declared by the first property group that mentions any of
/// `TargetFramework`, `TargetFrameworks` or `TargetFrameworkVersion`.
///
/// Plural lists are split on `;`, a `TargetFrameworkVersion` implies the
/// .NET Framework family. The result is de-duplicated in first-seen order.
pub fn target_frameworks(manifest: &Value) -> Vec<String> {
    let Some(group) = project(manifest).and_then(|project| {
        children(project, "PropertyGroup")
            .find(|group| FRAMEWORK_KEYS.iter().any(|key| group.get(*key).is_some()))
    }) else {
        return Vec::new();
    };

    let mut found: Vec<String> = Vec::new();

    for value in children(group, "TargetFrameworks") {
        if let Some(list) = text_value(value) {
            found.extend(
                list.split(';')
                    .map(str::trim)
                    .filter(|moniker| !moniker.is_empty())
                    .map(str::to_string),
            );
        }
    }

    if let Some(version) = first_text(group, "TargetFrameworkVersion") {
        found.push(format!(".NETFramework,Version={version}"));
    }

    found.extend(children(group, "TargetFramework").filter_map(text_value));

    let mut frameworks: Vec<String> = Vec::with_capacity(found.len());
    for moniker in found {
        if !frameworks.contains(&moniker) {
            frameworks.push(moniker);
        }
    }
    frameworks
}
