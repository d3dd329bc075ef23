//! MSBuild property lookup and `$(Name)` version resolution

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::decoder::{ATTRIBUTES_KEY, TEXT_KEY, decode_xml};
use crate::error::Result;
use crate::utils::{children, text_value};

/// Flat property name to value table.
pub type PropsLookup = hashbrown::HashMap<String, String>;

/// `$(Identifier)` at the very start of a declared value
static VARIABLE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$\(([A-Za-z_][A-Za-z0-9_.\-]*)\)").expect("variable reference pattern is valid")
});

/// Name of the property referenced by a declared version, if it is a reference.
pub fn variable_name(declared: &str) -> Option<&str> {
    VARIABLE_REFERENCE
        .captures(declared)
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str())
}

/// Resolve a declared version against the manifest's own properties first,
/// then the externally supplied table.
///
/// Literal versions come back unchanged. A reference to a property that
/// neither table defines yields `None`.
pub fn resolve_version(
    declared: &str,
    manifest_props: &PropsLookup,
    external_props: &PropsLookup,
) -> Option<String> {
    let Some(name) = variable_name(declared) else {
        return Some(declared.to_string());
    };

    let resolved = manifest_props
        .get(name)
        .or_else(|| external_props.get(name))
        .cloned();
    if resolved.is_none() {
        tracing::debug!("Property $({}) is not defined", name);
    }
    resolved
}

/// Flatten every `PropertyGroup` of a decoded `Project` element.
///
/// Groups are visited in document order and a later group overwrites an
/// earlier value for the same property.
pub fn manifest_properties(project: &Value) -> PropsLookup {
    let mut props = PropsLookup::new();

    for group in children(project, "PropertyGroup") {
        let Some(fields) = group.as_object() else {
            continue;
        };
        for (key, value) in fields {
            if key == ATTRIBUTES_KEY || key == TEXT_KEY {
                continue;
            }
            if let Some(text) = text_value(value) {
                props.insert(key.clone(), text);
            }
        }
    }

    props
}

/// Build an external property table from a props file such as
/// `Directory.Build.props`.
pub fn extract_props(content: &str) -> Result<PropsLookup> {
    let document = decode_xml(content)?;
    Ok(document
        .get("Project")
        .map(manifest_properties)
        .unwrap_or_default())
}
