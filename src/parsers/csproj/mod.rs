//! Builder for MSBuild project files (*.csproj, *.vbproj, *.fsproj)
//!
//! A project file can declare packages in two styles:
//! - `<PackageReference Include="Name" Version="1.0.0" />` items
//! - `<Reference Include="Name, Version=1.0.0.0, Culture=neutral" />` items
//!
//! Each style is extracted on its own into an [`Extracted`] result and the
//! two results are merged, `PackageReference` taking precedence.

use serde_json::Value;

use super::ManifestParser;
use crate::config::ExtractOptions;
use crate::decoder::decode_xml;
use crate::error::Result;
use crate::props::{PropsLookup, manifest_properties, resolve_version};
use crate::tree::{Dependencies, DependencyTreeNode};
use crate::utils::{attribute, children, first_text};

pub mod frameworks;
pub mod package_reference;
pub mod reference;

pub use frameworks::target_frameworks;

/// Parser for MSBuild project files
#[derive(Debug, Default)]
pub struct CsprojParser;

impl CsprojParser {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestParser for CsprojParser {
    fn decode(&self, content: &str) -> Result<Value> {
        decode_xml(content)
    }

    fn build_tree(&self, manifest: &Value, options: &ExtractOptions) -> DependencyTreeNode {
        build_tree(manifest, options.include_dev, &options.props)
    }

    fn target_frameworks(&self, manifest: &Value) -> Vec<String> {
        target_frameworks(manifest)
    }
}

/// Result of one declaration style's extraction.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Extracted {
    pub dependencies: Dependencies,
    pub has_dev_dependencies: bool,
    pub unknown_versions: Vec<String>,
}

/// Property tables consulted when a version is a `$(Name)` reference.
#[derive(Debug)]
pub struct PropertyTables<'a> {
    /// The project's own `PropertyGroup` values
    pub manifest: PropsLookup,
    /// Caller-supplied table with lower precedence
    pub external: &'a PropsLookup,
}

impl<'a> PropertyTables<'a> {
    pub fn for_project(project: &Value, external: &'a PropsLookup) -> Self {
        Self {
            manifest: manifest_properties(project),
            external,
        }
    }

    /// Resolve a declared version; `None` or an empty result means unknown.
    pub fn resolve(&self, declared: Option<&str>) -> Option<String> {
        let declared = declared?;
        resolve_version(declared, &self.manifest, self.external).filter(|v| !v.is_empty())
    }
}

/// The `Project` element of a decoded project file, if any.
pub(crate) fn project(manifest: &Value) -> Option<&Value> {
    manifest.get("Project")
}

/// Version declared on an item: a non-blank `Version` attribute first, then
/// a `<Version>` child element.
pub(crate) fn declared_version(item: &Value) -> Option<String> {
    attribute(item, "Version")
        .filter(|version| !version.trim().is_empty())
        .map(str::to_string)
        .or_else(|| first_text(item, "Version"))
}

/// Package name from the first property group declaring `PackageId` or
/// `AssemblyName`.
pub fn project_name(manifest: &Value) -> String {
    let Some(project) = project(manifest) else {
        return String::new();
    };

    children(project, "PropertyGroup")
        .find(|group| group.get("PackageId").is_some() || group.get("AssemblyName").is_some())
        .and_then(|group| first_text(group, "PackageId").or_else(|| first_text(group, "AssemblyName")))
        .unwrap_or_default()
}

/// Combine both declaration styles into one result.
///
/// `PackageReference` nodes replace same-named `Reference` nodes, which keep
/// their original position. Names resolved by either style are dropped from
/// both unknown-version lists; the result is the `PackageReference` list when
/// anything is left in it, otherwise the `Reference` list.
pub fn merge(references: Extracted, package_references: Extracted) -> Extracted {
    let mut dependencies = references.dependencies;
    for (name, node) in package_references.dependencies {
        dependencies.insert(name, node);
    }

    let still_unknown = |names: Vec<String>| -> Vec<String> {
        names
            .into_iter()
            .filter(|name| !dependencies.contains_key(name))
            .collect()
    };
    let from_package_references = still_unknown(package_references.unknown_versions);
    let unknown_versions = if from_package_references.is_empty() {
        still_unknown(references.unknown_versions)
    } else {
        from_package_references
    };

    Extracted {
        dependencies,
        has_dev_dependencies: references.has_dev_dependencies
            || package_references.has_dev_dependencies,
        unknown_versions,
    }
}

/// Build the dependency tree of a decoded project file.
pub fn build_tree(manifest: &Value, include_dev: bool, props: &PropsLookup) -> DependencyTreeNode {
    let package_references = package_reference::extract(manifest, include_dev, props);
    let references = reference::extract(manifest, props);
    let merged = merge(references, package_references);

    let mut root = DependencyTreeNode::root(project_name(manifest));
    root.dependencies = merged.dependencies;
    root.has_dev_dependencies = Some(merged.has_dev_dependencies);
    if !merged.unknown_versions.is_empty() {
        root.dependencies_with_unknown_versions = Some(merged.unknown_versions);
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::DepType;

    fn tree(content: &str, include_dev: bool) -> DependencyTreeNode {
        build_tree(&decode_xml(content).unwrap(), include_dev, &PropsLookup::new())
    }

    #[test]
    fn test_sdk_style_project() {
        let content = r#"
<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFramework>net8.0</TargetFramework>
    <AssemblyName>My.App</AssemblyName>
  </PropertyGroup>
  <ItemGroup>
    <PackageReference Include="Newtonsoft.Json" Version="13.0.3" />
    <PackageReference Include="Serilog" Version="3.1.1" />
  </ItemGroup>
</Project>
"#;
        let root = tree(content, false);

        assert_eq!(root.name, "My.App");
        assert_eq!(root.version, "");
        assert_eq!(root.has_dev_dependencies, Some(false));
        assert!(root.dependencies_with_unknown_versions.is_none());
        let names: Vec<_> = root.dependencies.keys().cloned().collect();
        assert_eq!(names, vec!["Newtonsoft.Json", "Serilog"]);
        assert_eq!(root.dependencies["Serilog"].dep_type, Some(DepType::Prod));
    }

    #[test]
    fn test_package_id_wins_over_assembly_name() {
        let content = r#"<Project>
  <PropertyGroup><OutputType>Exe</OutputType></PropertyGroup>
  <PropertyGroup>
    <AssemblyName>Asm</AssemblyName>
    <PackageId>Pkg</PackageId>
  </PropertyGroup>
</Project>"#;
        assert_eq!(project_name(&decode_xml(content).unwrap()), "Pkg");
    }

    #[test]
    fn test_no_name_is_empty() {
        assert_eq!(project_name(&decode_xml("<Project />").unwrap()), "");
    }

    #[test]
    fn test_package_reference_wins_over_reference() {
        let content = r#"<Project>
  <ItemGroup>
    <Reference Include="X, Version=2.0.0.0, Culture=neutral" />
    <Reference Include="Y, Version=3.0.0.0" />
  </ItemGroup>
  <ItemGroup>
    <PackageReference Include="X" Version="1.0.0" />
  </ItemGroup>
</Project>"#;
        let root = tree(content, false);

        let names: Vec<_> = root.dependencies.keys().cloned().collect();
        assert_eq!(names, vec!["X", "Y"]);
        assert_eq!(root.dependencies["X"].version, "1.0.0");
        assert_eq!(root.dependencies["Y"].version, "3.0.0.0");
    }

    #[test]
    fn test_unknown_versions_prefer_package_reference_list() {
        let content = r#"<Project>
  <ItemGroup>
    <Reference Include="System.Web" />
    <PackageReference Include="A" Version="$(AVersion)" />
  </ItemGroup>
</Project>"#;
        let root = tree(content, false);

        assert!(root.dependencies.is_empty());
        assert_eq!(root.unknown_versions(), ["A".to_string()]);
    }

    #[test]
    fn test_unknown_versions_fall_back_to_reference_list() {
        let content = r#"<Project>
  <ItemGroup>
    <Reference Include="System.Web" />
  </ItemGroup>
</Project>"#;
        let root = tree(content, false);
        assert_eq!(root.unknown_versions(), ["System.Web".to_string()]);
    }

    #[test]
    fn test_unknown_name_never_in_dependencies() {
        let references = Extracted {
            unknown_versions: vec!["X".into()],
            ..Extracted::default()
        };
        let mut package_references = Extracted::default();
        package_references.dependencies.insert(
            "X".into(),
            DependencyTreeNode::leaf("X", "1.0.0", DepType::Prod),
        );

        let merged = merge(references, package_references);
        assert!(merged.dependencies.contains_key("X"));
        assert!(merged.unknown_versions.is_empty());
    }

    #[test]
    fn test_reference_unknowns_survive_when_package_reference_unknowns_resolve() {
        let content = r#"<Project>
  <ItemGroup>
    <Reference Include="A, Version=2.0.0.0" />
    <Reference Include="System" />
  </ItemGroup>
  <ItemGroup>
    <PackageReference Include="A" Version="$(Missing)" />
  </ItemGroup>
</Project>"#;
        let root = tree(content, false);

        assert_eq!(root.dependencies["A"].version, "2.0.0.0");
        assert_eq!(root.unknown_versions(), ["System".to_string()]);
    }

    #[test]
    fn test_reference_dev_marker_keeps_production_node() {
        let content = r#"<Project>
  <ItemGroup>
    <Reference Include="X, Version=1.0.0.0" developmentDependency="true" />
  </ItemGroup>
</Project>"#;
        let root = tree(content, false);

        assert_eq!(root.dependencies["X"].dep_type, Some(DepType::Prod));
        assert_eq!(root.has_dev_dependencies, Some(false));
    }

    #[test]
    fn test_dev_flag_is_or_of_both_styles() {
        let references = Extracted::default();
        let package_references = Extracted {
            has_dev_dependencies: true,
            ..Extracted::default()
        };
        assert!(merge(references, package_references).has_dev_dependencies);
    }

    #[test]
    fn test_empty_project() {
        let root = tree("<Project></Project>", true);
        assert!(root.dependencies.is_empty());
        assert_eq!(root.has_dev_dependencies, Some(false));
        assert!(root.dependencies_with_unknown_versions.is_none());
    }

    #[test]
    fn test_parser_uses_external_props() {
        let content = r#"<Project>
  <ItemGroup>
    <PackageReference Include="Serilog" Version="$(SerilogVersion)" />
  </ItemGroup>
</Project>"#;
        let mut props = PropsLookup::new();
        props.insert("SerilogVersion".into(), "3.1.1".into());
        let options = ExtractOptions::new(false).with_props(props);

        let root = CsprojParser::new().parse(content, &options).unwrap();
        assert_eq!(root.dependencies["Serilog"].version, "3.1.1");
    }
}
