//! Generator configuration
//!
//! Every field has a default, so an empty JSON object is a valid configuration:
//!
//! ```json
//! {
//!   "maxAnalysisDepth": 10,
//!   "defaults": { "maxDepth": 3, "skipTypes": ["Asset", "AssetWrapper"] },
//!   "externalTypes": { "Validation": "@player-ui/types" },
//!   "namespaceFallbackPackage": "@player-ui/types",
//!   "sameFileTypes": ["ListItem"],
//!   "typeImportPath": "../types"
//! }
//! ```

use error_stack::Report;
use indexmap::{IndexMap, IndexSet};
use player_xlr::constants::{ASSET, ASSET_WRAPPER};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_MAX_ANALYSIS_DEPTH, DEFAULT_MAX_DEFAULTS_DEPTH, DEFAULT_RUNTIME_PACKAGE,
    DEFAULT_TYPE_IMPORT_PATH, DEFAULT_TYPES_PACKAGE,
};
use crate::error::{Error, Result};

/// Policy for default-value synthesis
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefaultValueConfig {
    /// Nesting depth at which nested objects default to `{}`
    pub max_depth:  usize,
    /// Type names whose properties are never defaulted
    pub skip_types: IndexSet<String>,
}

impl Default for DefaultValueConfig {
    fn default() -> Self {
        Self {
            max_depth:  DEFAULT_MAX_DEFAULTS_DEPTH,
            skip_types: [ASSET, ASSET_WRAPPER].into_iter().map(String::from).collect(),
        }
    }
}

/// Where referenced types are imported from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportConfig {
    /// Type or namespace name to the package that exports it
    pub external_types:             IndexMap<String, String>,
    /// Package for namespaces missing from `external_types`
    pub namespace_fallback_package: String,
    /// Types declared next to the type under generation
    pub same_file_types:            IndexSet<String>,
    /// Module the type under generation (and its same-file siblings) come from
    pub type_import_path:           String,
    /// Package exporting `Asset`
    pub types_package:              String,
    /// Package exporting the builder runtime
    pub runtime_package:            String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            external_types:             IndexMap::new(),
            namespace_fallback_package: DEFAULT_TYPES_PACKAGE.to_string(),
            same_file_types:            IndexSet::new(),
            type_import_path:           DEFAULT_TYPE_IMPORT_PATH.to_string(),
            types_package:              DEFAULT_TYPES_PACKAGE.to_string(),
            runtime_package:            DEFAULT_RUNTIME_PACKAGE.to_string(),
        }
    }
}

/// Top-level generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Recursion limit for the type analyzer
    pub max_analysis_depth: usize,
    /// Default-value synthesis policy
    pub defaults:           DefaultValueConfig,
    /// Import attribution
    #[serde(flatten)]
    pub imports:            ImportConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_analysis_depth: DEFAULT_MAX_ANALYSIS_DEPTH,
            defaults:           DefaultValueConfig::default(),
            imports:            ImportConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Read a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Report::new(Error::invalid("generator configuration", e)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests fail loudly")]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = GeneratorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.max_analysis_depth, 10);
        assert_eq!(config.defaults.max_depth, 3);
        assert!(config.defaults.skip_types.contains("AssetWrapper"));
        assert_eq!(config.imports.namespace_fallback_package, "@player-ui/types");
    }

    #[test]
    fn test_partial_config_keeps_remaining_defaults() {
        let config = GeneratorConfig::from_json_str(
            r#"{
                "defaults": { "maxDepth": 1 },
                "externalTypes": { "Validation": "@player-ui/types", "Schema": "@acme/schema" },
                "sameFileTypes": ["ListItem"]
            }"#,
        )
        .unwrap();

        assert_eq!(config.defaults.max_depth, 1);
        assert_eq!(config.defaults.skip_types.len(), 2);
        assert_eq!(
            config.imports.external_types.get("Schema").map(String::as_str),
            Some("@acme/schema")
        );
        assert!(config.imports.same_file_types.contains("ListItem"));
        assert_eq!(config.imports.type_import_path, "../types");
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let report = GeneratorConfig::from_json_str(r#"{ "maxAnalysisDepth": "deep" }"#)
            .unwrap_err();
        assert!(matches!(report.current_context(), Error::InvalidConfig(_)));
    }
}
