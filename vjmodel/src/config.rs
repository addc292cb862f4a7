use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{VjError, VjResult};

/// Fully resolved generation settings for one target.
///
/// Every field has a default, so a TOML document only needs to list what it
/// overrides:
///
/// ```rust
/// # use vjmodel::config::Configuration;
/// let config = Configuration::from_toml_str(r#"setter_prefixes = ["set", "with"]"#).unwrap();
/// assert_eq!(config.setter_prefixes, vec!["set", "with"]);
/// assert_eq!(config.getter_prefixes, vec!["is", "get"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Name of the generated class. Derived from the interface when unset.
    pub name: Option<String>,
    /// Package for unqualified class names. The interface's package when unset.
    pub output_package: Option<String>,
    pub getter_prefixes: Vec<String>,
    pub setter_prefixes: Vec<String>,
    pub base_clazz_name: String,
    pub extra_interface_names: Vec<String>,
    pub import_classes: Vec<String>,
    /// Methods some other part of the generator already implements.
    pub implemented_method_names: Vec<String>,
    /// Degrade malformed accessors to plain methods instead of reporting them.
    pub ignore_malformed_properties: bool,
    pub comparable_enabled: bool,
    pub ordering_method_name: String,
    pub final_class_enabled: bool,
    pub final_members_enabled: bool,
    pub ensure_not_null_enabled: bool,
    pub synchronized_access_enabled: bool,
    /// Package whose types are visible without an import.
    pub implicit_package: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            name: None,
            output_package: None,
            getter_prefixes: vec!["is".into(), "get".into()],
            setter_prefixes: vec!["set".into()],
            base_clazz_name: "java.lang.Object".into(),
            extra_interface_names: Vec::new(),
            import_classes: vec!["java.util.Arrays".into(), "java.util.Objects".into()],
            implemented_method_names: Vec::new(),
            ignore_malformed_properties: false,
            comparable_enabled: true,
            ordering_method_name: "compareTo".into(),
            final_class_enabled: true,
            final_members_enabled: true,
            ensure_not_null_enabled: true,
            synchronized_access_enabled: false,
            implicit_package: "java.lang".into(),
        }
    }
}

impl Configuration {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> VjResult<Self> {
        toml::from_str(text).map_err(|source| VjError::ConfigParseError {
            source,
            file: "<inline>".to_string(),
        })
    }

    /// Load a configuration from a TOML file.
    pub fn load_from_toml(path: &Path) -> VjResult<Self> {
        let toml_str = std::fs::read_to_string(path)?;

        toml::from_str(&toml_str).map_err(|source| VjError::ConfigParseError {
            source,
            file: path.display().to_string(),
        })
    }

    /// Base class name, falling back to the default when configured empty.
    pub fn base_clazz_name(&self) -> &str {
        if self.base_clazz_name.is_empty() {
            "java.lang.Object"
        } else {
            &self.base_clazz_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Configuration::from_toml_str("").unwrap(), Configuration::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = Configuration::from_toml_str(
            r#"
            name = "PersonValue"
            ignore_malformed_properties = true
            implemented_method_names = ["toString"]
            "#,
        )
        .unwrap();

        assert_eq!(config.name.as_deref(), Some("PersonValue"));
        assert!(config.ignore_malformed_properties);
        assert_eq!(config.implemented_method_names, vec!["toString"]);
        assert_eq!(config.base_clazz_name(), "java.lang.Object");
        assert!(config.final_class_enabled);
    }

    #[test]
    fn malformed_document_is_reported() {
        let err = Configuration::from_toml_str("getter_prefixes = 3").unwrap_err();
        assert!(err.is_config_parse_error(), "unexpected error {err}");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Configuration::load_from_toml(Path::new("/nonexistent/vjmodel.toml")).unwrap_err();
        assert!(err.is_io_error());
    }

    #[test]
    fn empty_base_name_falls_back() {
        let config = Configuration {
            base_clazz_name: String::new(),
            ..Configuration::default()
        };
        assert_eq!(config.base_clazz_name(), "java.lang.Object");
    }
}
