//! Builder generation
//!
//! [`BuilderGenerator`] ties the pipeline together for one named object type:
//!
//! 1. analyze every property ([`crate::analysis`])
//! 2. synthesize defaults ([`crate::defaults`])
//! 3. find asset-wrapper paths ([`crate::asset_paths`])
//! 4. render setter parameter types, tracking imports ([`crate::transform`],
//!    [`crate::imports`]); the analysis decides which properties also get an
//!    `addX` append method and which store through asset slots
//! 5. emit the TypeScript source
//!
//! Each call to [`BuilderGenerator::generate`] owns a fresh import tracker, so a
//! generator can be shared across threads and types.

mod property;
mod render;

use std::sync::Arc;

use error_stack::{Report, ResultExt};
use heck::ToLowerCamelCase;
use itertools::Itertools;
pub use property::{BuilderProperty, array_element};
use player_xlr::constants::ASSET;
use player_xlr::{NamedType, ObjectNode, extract_base_name};
pub use render::{BuilderTemplate, Setter, SetterKind};
use serde_json::Value;
use tracing::{debug, info};

use crate::analysis::{AnalysisOptions, AnalysisRequest, TypeAnalyzer};
use crate::asset_paths::{AssetWrapperPath, AssetWrapperPathFinder};
use crate::config::GeneratorConfig;
use crate::defaults::DefaultValueGenerator;
use crate::error::{Error, Result};
use crate::imports::{ImportGenerator, ModulePathFn, TypeResolver};
use crate::registry::TypeRegistry;
use crate::syntax::{Declarations, GenericParam, Literal, TypeExpr, bind_generics};
use crate::transform::TypeTransformer;

/// Output of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBuilder {
    /// Name of the built type
    pub type_name:           String,
    /// Name of the generated builder class
    pub builder_name:        String,
    /// TypeScript source
    pub code:                String,
    /// Referenced types no import could be found for
    pub unresolved_types:    Vec<String>,
    /// Slot paths embedded in the builder
    pub asset_wrapper_paths: Vec<AssetWrapperPath>,
}

/// Generates fluent builders for named object types
pub struct BuilderGenerator {
    config:       GeneratorConfig,
    registry:     TypeRegistry,
    declarations: Declarations,
    resolver:     Option<Arc<dyn TypeResolver>>,
    module_path:  Option<ModulePathFn>,
}

impl Default for BuilderGenerator {
    fn default() -> Self { Self::new(GeneratorConfig::default()) }
}

/// `ActionAsset` -> `action`, `ListItem` -> `listItem`
fn factory_name(type_name: &str) -> String {
    let stem = type_name
        .strip_suffix(ASSET)
        .filter(|stem| !stem.is_empty())
        .unwrap_or(type_name);
    stem.to_lower_camel_case()
}

/// The `"literal"` of `extends Asset<"literal">`
fn asset_type(object: &ObjectNode) -> Option<String> {
    let base = object.extends.as_deref()?;
    if extract_base_name(&base.reference) != ASSET {
        return None;
    }
    match TypeExpr::from(base) {
        TypeExpr::Reference(reference) => match reference.args.first() {
            Some(TypeExpr::Literal(Literal::String(asset_type))) => Some(asset_type.clone()),
            _ => None,
        },
        _ => None,
    }
}

impl BuilderGenerator {
    /// Generator with an empty registry and no declarations
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            registry: TypeRegistry::new(),
            declarations: Declarations::new(),
            resolver: None,
            module_path: None,
        }
    }

    /// Register every given type for reference resolution
    #[must_use]
    pub fn with_types(self, types: &[NamedType]) -> Self {
        Self {
            registry: TypeRegistry::from_named_types(types),
            declarations: Declarations::from_named_types(types),
            ..self
        }
    }

    /// Replace the registry
    #[must_use]
    pub fn with_registry(self, registry: TypeRegistry) -> Self { Self { registry, ..self } }

    /// Replace the declarations the analyzer resolves against
    #[must_use]
    pub fn with_declarations(self, declarations: Declarations) -> Self {
        Self {
            declarations,
            ..self
        }
    }

    /// Resolve imports through `resolver`
    #[must_use]
    pub fn with_resolver(self, resolver: Arc<dyn TypeResolver>) -> Self {
        Self {
            resolver: Some(resolver),
            ..self
        }
    }

    /// Route manual imports through `module_path`
    #[must_use]
    pub fn with_module_path(self, module_path: ModulePathFn) -> Self {
        Self {
            module_path: Some(module_path),
            ..self
        }
    }

    /// Configuration in use
    pub const fn config(&self) -> &GeneratorConfig { &self.config }

    /// Generate builders for several types, one after another
    pub fn generate_all(&self, types: &[NamedType]) -> Result<Vec<GeneratedBuilder>> {
        types.iter().map(|named| self.generate(named)).collect()
    }

    /// Generate the builder for one named object type
    pub fn generate(&self, named: &NamedType) -> Result<GeneratedBuilder> {
        let type_name = named.name.as_str();
        let object = named.as_object().ok_or_else(|| {
            Report::new(Error::NotAnObjectType {
                type_name: type_name.to_string(),
                kind:      named.node.kind().to_string(),
            })
        })?;
        info!(type_name = %type_name, properties = object.properties.len(), "Generating builder");

        let params: Vec<GenericParam> = named
            .generic_tokens
            .iter()
            .flatten()
            .map(GenericParam::from)
            .collect();

        let mut imports = ImportGenerator::new(self.config.imports.clone(), type_name)
            .with_generic_params(named.generic_symbols());
        if let Some(resolver) = &self.resolver {
            imports = imports.with_resolver(Arc::clone(resolver));
        }
        if let Some(module_path) = &self.module_path {
            imports = imports.with_module_path(Arc::clone(module_path));
        }

        let properties = self
            .analyze_properties(object, &params)
            .attach(format!("Type: {type_name}"))?;

        let defaults = DefaultValueGenerator::new(self.config.defaults.clone())
            .with_registry(&self.registry)
            .generate_defaults(object, asset_type(object).as_deref());
        let asset_wrapper_paths = AssetWrapperPathFinder::new(&self.registry)
            .find_asset_wrapper_paths_for(type_name, object);

        let mut transformer = TypeTransformer::new(&self.registry, &mut imports);
        let (generic_decl, generic_args) = generic_lists(named, &mut transformer);
        let setters: Vec<Setter> = properties
            .iter()
            .filter(|property| property.has_setter())
            .flat_map(|property| property_methods(property, &mut transformer))
            .collect();

        let builder_name = format!("{type_name}Builder");
        let template = BuilderTemplate {
            type_name: type_name.to_string(),
            builder_name: builder_name.clone(),
            factory_name: factory_name(type_name),
            generic_decl,
            generic_args,
            imports: imports.generate_imports(type_name),
            defaults: render_json(&Value::Object(defaults))?,
            asset_paths: if asset_wrapper_paths.is_empty() {
                None
            } else {
                Some(render_json(&asset_wrapper_paths)?)
            },
            setters,
        };

        let unresolved_types = imports.unresolved_types();
        debug!(
            type_name = %type_name,
            setters = template.setters.len(),
            asset_wrapper_paths = asset_wrapper_paths.len(),
            unresolved = unresolved_types.len(),
            "Builder generated"
        );

        Ok(GeneratedBuilder {
            type_name: type_name.to_string(),
            builder_name,
            code: template.render(),
            unresolved_types,
            asset_wrapper_paths,
        })
    }

    fn analyze_properties<'a>(
        &self,
        object: &'a ObjectNode,
        params: &[GenericParam],
    ) -> Result<Vec<BuilderProperty<'a>>> {
        let analyzer = TypeAnalyzer::new(self.declarations.clone())
            .with_max_depth(self.config.max_analysis_depth);
        let options = AnalysisOptions::with_max_depth(self.config.max_analysis_depth)
            .with_generic_context(bind_generics(params, &[]));

        object
            .properties
            .iter()
            .map(|(name, property)| {
                let expr = TypeExpr::from(&property.node);
                let request = AnalysisRequest::new(name.as_str(), &expr)
                    .with_options(options.for_child(!property.required));
                let analysis = analyzer
                    .analyze(request)
                    .attach(format!("Property: {name}"))?;
                Ok(BuilderProperty::new(name, property, &analysis, &self.registry))
            })
            .collect()
    }
}

/// `withX`, plus `addX` for arrays
fn property_methods(
    property: &BuilderProperty<'_>,
    transformer: &mut TypeTransformer<'_>,
) -> Vec<Setter> {
    let description = property.description().map(str::to_string);
    let mut methods = vec![Setter {
        method:      property.setter_name(),
        property:    property.name.to_string(),
        param_type:  transformer.transform_type(property.node, true),
        kind:        property.setter_kind(),
        description: description.clone(),
    }];

    if property.has_adder() {
        let param_type = match array_element(property.node) {
            Some(element) => transformer.transform_type(element, true),
            None => {
                let array = transformer.transform_type_for_constraint(property.node);
                if array.contains(' ') {
                    format!("({array})[number]")
                } else {
                    format!("{array}[number]")
                }
            },
        };
        methods.push(Setter {
            method: property.adder_name(),
            property: property.name.to_string(),
            param_type,
            kind: property.adder_kind(),
            description,
        });
    }
    methods
}

/// `<T extends C = D>` and `<T>` for the generic tokens of `named`
fn generic_lists(named: &NamedType, transformer: &mut TypeTransformer<'_>) -> (String, String) {
    let Some(tokens) = named.generic_tokens.as_deref().filter(|tokens| !tokens.is_empty()) else {
        return (String::new(), String::new());
    };

    let declared = tokens
        .iter()
        .map(|token| {
            let mut text = token.symbol.clone();
            if let Some(constraint) = &token.constraints {
                text.push_str(" extends ");
                text.push_str(&transformer.transform_type_for_constraint(constraint));
            }
            if let Some(default) = &token.default {
                text.push_str(" = ");
                text.push_str(&transformer.transform_type_for_constraint(default));
            }
            text
        })
        .join(", ");
    let symbols = tokens.iter().map(|token| token.symbol.as_str()).join(", ");
    (format!("<{declared}>"), format!("<{symbols}>"))
}

fn render_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Report::new(Error::failed_to("render generated JSON", e)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests fail loudly")]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::imports::SourceResolver;

    fn named(value: serde_json::Value) -> NamedType { NamedType::from_value(value).unwrap() }

    fn action_asset() -> NamedType {
        named(json!({
            "name": "ActionAsset",
            "source": "src/assets/action/types.ts",
            "type": "object",
            "genericTokens": [{
                "symbol": "AnyTextAsset",
                "constraints": { "type": "ref", "ref": "Asset" },
                "default": { "type": "ref", "ref": "Asset" }
            }],
            "extends": {
                "type": "ref",
                "ref": "Asset<\"action\">",
                "genericArguments": [{ "type": "string", "const": "action" }]
            },
            "properties": {
                "value": { "required": false, "node": { "type": "string", "description": "Transition value" } },
                "label": { "required": false, "node": {
                    "type": "ref",
                    "ref": "AssetWrapper<AnyTextAsset>",
                    "genericArguments": [{ "type": "ref", "ref": "AnyTextAsset" }]
                } },
                "exp": { "required": false, "node": { "type": "ref", "ref": "Expression" } },
                "metaData": { "required": false, "node": { "type": "ref", "ref": "ActionMetaData" } }
            }
        }))
    }

    fn meta_data() -> NamedType {
        named(json!({
            "name": "ActionMetaData",
            "source": "src/assets/action/types.ts",
            "type": "object",
            "properties": {
                "beacon": { "required": false, "node": { "type": "string" } },
                "skipValidation": { "required": false, "node": { "type": "boolean" } }
            }
        }))
    }

    #[test]
    fn test_factory_and_asset_type_names() {
        assert_eq!(factory_name("ActionAsset"), "action");
        assert_eq!(factory_name("ListItem"), "listItem");
        assert_eq!(factory_name("Asset"), "asset");

        let action = action_asset();
        assert_eq!(asset_type(action.as_object().unwrap()).as_deref(), Some("action"));
        assert_eq!(asset_type(meta_data().as_object().unwrap()), None);
    }

    #[test]
    fn test_generates_action_asset_builder() {
        let types = [action_asset(), meta_data()];
        let generator = BuilderGenerator::default()
            .with_types(&types)
            .with_resolver(Arc::new(SourceResolver::from_named_types(&types)));

        let generated = generator.generate(&types[0]).unwrap();
        assert_eq!(generated.builder_name, "ActionAssetBuilder");
        assert_eq!(generated.asset_wrapper_paths, [["label"]]);
        assert!(generated.unresolved_types.is_empty());

        let code = &generated.code;
        assert!(code.contains("import type { ActionAsset, ActionMetaData } from \"../types\";"));
        assert!(code.contains("import type { Asset } from \"@player-ui/types\";"));
        assert!(!code.contains("import type { AnyTextAsset"));
        assert!(code.contains("export class ActionAssetBuilder<AnyTextAsset extends Asset = Asset>"));
        assert!(code.contains(r#"private static readonly defaults: Record<string, unknown> = {"type":"action","id":""};"#));
        assert!(code.contains(r#"__assetWrapperPaths__: ReadonlyArray<ReadonlyArray<string>> = [["label"]];"#));
        assert!(code.contains("withValue(value: string | TaggedTemplateValue): ActionAssetBuilder<AnyTextAsset>"));
        assert!(code.contains(
            "withLabel(value: AnyTextAsset | FluentBuilder<AnyTextAsset, BaseBuildContext>)"
        ));
        assert!(code.contains("withExp(value: string | TaggedTemplateValue)"));
        assert!(code.contains(
            "withMetaData(value: ActionMetaData | FluentBuilder<ActionMetaData, BaseBuildContext> \
             | FluentPartial<ActionMetaData, BaseBuildContext>)"
        ));
        assert!(code.contains("   * Transition value"));
        assert!(code.contains("export function action<AnyTextAsset extends Asset = Asset>("));
    }

    fn list_asset() -> NamedType {
        named(json!({
            "name": "ListAsset",
            "source": "src/assets/list/types.ts",
            "type": "object",
            "extends": { "type": "ref", "ref": "Asset<\"list\">" },
            "properties": {
                "values": { "required": false, "node": {
                    "type": "array", "elementType": { "type": "ref", "ref": "AssetWrapper" }
                } },
                "title": { "required": false, "node": { "type": "ref", "ref": "AssetWrapper" } },
                "tags": { "required": false, "node": { "type": "array", "elementType": { "type": "string" } } },
                "labels": { "required": false, "node": { "type": "ref", "ref": "Labels" } },
                "meta": { "required": false, "node": { "type": "object", "properties": {
                    "a": { "required": false, "node": { "type": "object", "properties": {
                        "b": { "required": false, "node": { "type": "string" } }
                    } } }
                } } }
            }
        }))
    }

    fn labels() -> NamedType {
        named(json!({
            "name": "Labels",
            "source": "src/assets/list/types.ts",
            "type": "array",
            "elementType": { "type": "string" }
        }))
    }

    #[test]
    fn test_array_and_slot_methods_follow_analysis() {
        let types = [list_asset(), labels()];
        let generated = BuilderGenerator::default()
            .with_types(&types)
            .generate(&types[0])
            .unwrap();
        let code = &generated.code;

        assert!(code.contains(
            "withValues(value: Array<Asset | FluentBuilder<Asset, BaseBuildContext>>): ListAssetBuilder {\n    \
             return this.setSlot(\"values\", value, true, true);"
        ));
        assert!(code.contains(
            "addValues(value: Asset | FluentBuilder<Asset, BaseBuildContext>): ListAssetBuilder {\n    \
             return this.appendSlot(\"values\", value, true);"
        ));
        assert!(code.contains("return this.setSlot(\"title\", value, true, false);"));
        assert!(code.contains(
            "withTags(value: Array<string | TaggedTemplateValue>): ListAssetBuilder {\n    \
             return this.set(\"tags\", value);"
        ));
        assert!(code.contains(
            "addTags(value: string | TaggedTemplateValue): ListAssetBuilder {\n    \
             return this.append(\"tags\", value);"
        ));
        assert!(code.contains("addLabels(value: Labels[number]): ListAssetBuilder"));
        assert!(code.contains("  addTags(value: string | TaggedTemplateValue): ListAssetBuilder;"));
        assert!(!code.contains("addMeta"));
        assert!(!code.contains("addTitle"));

        let meta = "{ a?: { b?: string } }";
        assert!(code.contains(&format!(
            "withMeta(value: {meta} | FluentBuilder<{meta}, BaseBuildContext> \
             | FluentPartial<{meta}, BaseBuildContext>): ListAssetBuilder {{"
        )));
    }

    #[test]
    fn test_analysis_depth_limit_drops_append_methods() {
        let types = [list_asset(), labels()];
        let config = GeneratorConfig {
            max_analysis_depth: 0,
            ..GeneratorConfig::default()
        };
        let generated = BuilderGenerator::new(config)
            .with_types(&types)
            .generate(&types[0])
            .unwrap();

        assert!(!generated.code.contains("addTags("));
        assert!(generated.code.contains("withTags("));
    }

    #[test]
    fn test_required_constants_have_no_setter() {
        let text = named(json!({
            "name": "TextAsset",
            "source": "text.ts",
            "type": "object",
            "extends": { "type": "ref", "ref": "Asset<\"text\">" },
            "properties": {
                "type": { "required": true, "node": { "type": "string", "const": "text" } },
                "value": { "required": true, "node": { "type": "string" } }
            }
        }));
        let generated = BuilderGenerator::default().generate(&text).unwrap();
        assert!(!generated.code.contains("withType("));
        assert!(generated.code.contains("withValue("));
        assert!(generated.code.contains(r#"{"type":"text","id":"","value":""}"#));
        assert!(!generated.code.contains("__assetWrapperPaths__"));
    }

    #[test]
    fn test_unresolved_imports_are_reported_not_fatal() {
        let holder = named(json!({
            "name": "Holder",
            "source": "holder.ts",
            "type": "object",
            "properties": { "ghost": { "required": false, "node": { "type": "ref", "ref": "Ghost" } } }
        }));
        let generator = BuilderGenerator::default()
            .with_resolver(Arc::new(SourceResolver::from_named_types([&holder])));

        let generated = generator.generate(&holder).unwrap();
        assert_eq!(generated.unresolved_types, ["Ghost"]);
    }

    #[test]
    fn test_non_object_types_are_rejected() {
        let alias = named(json!({ "name": "Name", "source": "a.ts", "type": "string" }));
        let report = BuilderGenerator::default().generate(&alias).unwrap_err();
        assert!(matches!(
            report.current_context(),
            Error::NotAnObjectType { kind, .. } if kind == "string"
        ));
    }

    #[test]
    fn test_generate_all_uses_fresh_imports_per_type() {
        let types = [action_asset(), meta_data()];
        let generated = BuilderGenerator::default()
            .with_types(&types)
            .generate_all(&types)
            .unwrap();

        assert_eq!(generated.len(), 2);
        assert!(generated[1].code.contains("import type { ActionMetaData } from \"../types\";"));
        assert!(!generated[1].code.contains("import type { Asset }"));
    }
}
