//! Extraction options

use serde::Deserialize;

use crate::props::PropsLookup;

/// Options shared by every tree builder.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractOptions {
    /// Keep development dependencies in the tree
    pub include_dev: bool,
    /// External property table, consulted after the manifest's own properties
    pub props: PropsLookup,
}

impl ExtractOptions {
    pub fn new(include_dev: bool) -> Self {
        Self {
            include_dev,
            props: PropsLookup::new(),
        }
    }

    pub fn with_props(mut self, props: PropsLookup) -> Self {
        self.props = props;
        self
    }

    /// Parse options from a JSON value, falling back to defaults when absent
    /// or malformed.
    pub fn from_json(options: Option<serde_json::Value>) -> Self {
        match options {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed extraction options: {}", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert!(!options.include_dev);
        assert!(options.props.is_empty());
    }

    #[test]
    fn test_parse_from_json() {
        let options = ExtractOptions::from_json(Some(json!({
            "includeDev": true,
            "props": { "SerilogVersion": "3.1.1" }
        })));
        assert!(options.include_dev);
        assert_eq!(options.props["SerilogVersion"], "3.1.1");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = ExtractOptions::from_json(Some(json!({ "includeDev": true })));
        assert!(options.include_dev);
        assert!(options.props.is_empty());
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let options = ExtractOptions::from_json(Some(json!({ "includeDev": "maybe" })));
        assert_eq!(options, ExtractOptions::default());
    }

    #[test]
    fn test_none_is_default() {
        assert_eq!(ExtractOptions::from_json(None), ExtractOptions::default());
    }
}
